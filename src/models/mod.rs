//! Model catalog discovery and selection state.

pub mod catalog;
pub mod policy;
pub mod store;

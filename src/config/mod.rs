//! Configuration constants and shared settings types.

pub mod constants;
pub mod types;

//! Client-side model settings for the promptdeck chat console.
//!
//! The crate has exactly one stateful unit, [`ModelSettingsStore`]: it keeps
//! the user's manual model/effort overrides, lazily discovers the remote
//! model catalog once per store lifetime, and merges it with a built-in
//! fallback list. Every accessor degrades to the fallback list instead of
//! failing the caller; the degraded path is observable via
//! [`CatalogStatus`].

pub mod assets;
pub mod config;
pub mod models;

pub use config::types::EffortLevel;
pub use models::catalog::{CatalogClient, CatalogError};
pub use models::policy::ExclusionPolicy;
pub use models::store::{
    CatalogStatus, FallbackReason, ModelSettings, ModelSettingsStore, SelectionUpdate,
    SharedModelSettingsStore, new_shared_settings_store,
};

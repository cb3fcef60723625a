//! The model settings store: manual overrides plus the memoized catalog.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Deserializer, Serialize};
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use super::catalog::{CatalogClient, CatalogError};
use super::policy::{self, ExclusionPolicy};
use crate::config::types::EffortLevel;

/// Snapshot of the current settings, as exposed to consumers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelSettings {
    /// Manual model override; `None` means "use the default".
    pub model: Option<String>,
    /// Manual effort override.
    pub effort: Option<EffortLevel>,
    /// Merged model list, always a superset of the fallback ids.
    pub available_models: Vec<String>,
}

/// Why the catalog degraded to fallback-only mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    MissingCredential,
    Transport,
    HttpStatus(u16),
    MalformedResponse,
}

impl From<&CatalogError> for FallbackReason {
    fn from(err: &CatalogError) -> Self {
        match err {
            CatalogError::MissingCredential => Self::MissingCredential,
            CatalogError::Transport(_) => Self::Transport,
            CatalogError::Status(code) => Self::HttpStatus(*code),
            CatalogError::MalformedResponse => Self::MalformedResponse,
        }
    }
}

/// Outcome of the one-time catalog load.
///
/// Fetch failures never reach callers as errors; this is how a consumer
/// finds out the list it got was fallback-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogStatus {
    /// Remote ids were fetched, filtered, and merged with the fallbacks.
    RemoteMerged,
    /// Only the fallback list is available.
    FallbackOnly(FallbackReason),
}

/// Partial update for the manual overrides.
///
/// Each field is tri-state: absent leaves the override unchanged, an
/// explicit `null` clears it, a string sets it (subject to normalization).
/// Deserializes from JSON with exactly those semantics, so a UI can forward
/// a sparse `{"model": ..., "effort": ...}` payload untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SelectionUpdate {
    #[serde(default, deserialize_with = "double_option")]
    pub model: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub effort: Option<Option<String>>,
}

impl SelectionUpdate {
    pub fn model(mut self, value: impl Into<String>) -> Self {
        self.model = Some(Some(value.into()));
        self
    }

    pub fn clear_model(mut self) -> Self {
        self.model = Some(None);
        self
    }

    pub fn effort(mut self, value: impl Into<String>) -> Self {
        self.effort = Some(Some(value.into()));
        self
    }

    pub fn clear_effort(mut self) -> Self {
        self.effort = Some(None);
        self
    }
}

fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

#[derive(Debug, Default)]
struct Overrides {
    model: Option<String>,
    effort: Option<EffortLevel>,
}

#[derive(Debug)]
struct CatalogSnapshot {
    models: Vec<String>,
    status: CatalogStatus,
}

/// Process-lifetime settings store.
///
/// Construct one instance at startup and hand it to consumers (typically as
/// [`SharedModelSettingsStore`]); there is no ambient global. The catalog is
/// fetched at most once per store: concurrent first callers share the
/// in-flight request through the [`OnceCell`], and the memo lives until the
/// store is dropped.
#[derive(Debug)]
pub struct ModelSettingsStore {
    client: CatalogClient,
    policy: ExclusionPolicy,
    overrides: RwLock<Overrides>,
    catalog: OnceCell<CatalogSnapshot>,
}

impl Default for ModelSettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelSettingsStore {
    /// Build a store with credential and endpoint from the environment.
    pub fn new() -> Self {
        Self::with_client(CatalogClient::from_env())
    }

    /// Build a store around a specific catalog client.
    pub fn with_client(client: CatalogClient) -> Self {
        Self::with_policy(client, ExclusionPolicy::default())
    }

    /// Build a store with a custom exclusion policy.
    pub fn with_policy(client: CatalogClient, policy: ExclusionPolicy) -> Self {
        Self {
            client,
            policy,
            overrides: RwLock::new(Overrides::default()),
            catalog: OnceCell::new(),
        }
    }

    /// The merged model list. Never fails: with no credential or on any
    /// fetch problem this is the fallback list.
    pub async fn available_models(&self) -> Vec<String> {
        self.snapshot().await.models.clone()
    }

    /// Whether the list came from a remote merge or degraded to fallbacks.
    ///
    /// Forces the same one-time load as [`available_models`](Self::available_models).
    pub async fn catalog_status(&self) -> CatalogStatus {
        self.snapshot().await.status
    }

    async fn snapshot(&self) -> &CatalogSnapshot {
        self.catalog
            .get_or_init(|| async {
                match self.client.fetch_model_ids().await {
                    Ok(ids) => {
                        info!(count = ids.len(), "fetched remote model catalog");
                        CatalogSnapshot {
                            models: self.policy.merge_with_fallbacks(&ids),
                            status: CatalogStatus::RemoteMerged,
                        }
                    }
                    Err(err) => {
                        match &err {
                            CatalogError::MissingCredential => {
                                debug!("no API credential, using fallback model list")
                            }
                            other => {
                                warn!(error = %other, "model catalog fetch failed, using fallback list")
                            }
                        }
                        CatalogSnapshot {
                            models: policy::fallback_models(),
                            status: CatalogStatus::FallbackOnly((&err).into()),
                        }
                    }
                }
            })
            .await
    }

    /// Apply a partial update to the manual overrides.
    ///
    /// Model values are trimmed; empty or whitespace-only values clear the
    /// override. Effort values are matched case-insensitively against the
    /// closed set; unrecognized values are ignored and the previous value
    /// kept.
    pub fn update_selection(&self, update: SelectionUpdate) {
        let mut overrides = self.overrides.write();

        if let Some(model) = update.model {
            overrides.model = model
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty());
        }

        if let Some(effort) = update.effort {
            match effort {
                None => overrides.effort = None,
                Some(raw) => {
                    if raw.trim().is_empty() {
                        overrides.effort = None;
                    } else if let Some(level) = EffortLevel::parse(&raw) {
                        overrides.effort = Some(level);
                    } else {
                        debug!(value = %raw, "ignoring unrecognized effort level");
                    }
                }
            }
        }
    }

    /// Current manual model override, if any.
    pub fn selected_model(&self) -> Option<String> {
        self.overrides.read().model.clone()
    }

    /// Current manual effort override, if any.
    pub fn effort(&self) -> Option<EffortLevel> {
        self.overrides.read().effort
    }

    /// Current overrides together with the merged model list.
    pub async fn settings(&self) -> ModelSettings {
        let available_models = self.available_models().await;
        let overrides = self.overrides.read();
        ModelSettings {
            model: overrides.model.clone(),
            effort: overrides.effort,
            available_models,
        }
    }
}

/// Thread-safe reference-counted settings store.
pub type SharedModelSettingsStore = Arc<ModelSettingsStore>;

/// Create a shared store configured from the environment.
pub fn new_shared_settings_store() -> SharedModelSettingsStore {
    Arc::new(ModelSettingsStore::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_store() -> ModelSettingsStore {
        // No credential means no request is ever attempted.
        ModelSettingsStore::with_client(CatalogClient::new("http://127.0.0.1:0", None))
    }

    #[test]
    fn model_values_are_trimmed() {
        let store = offline_store();
        store.update_selection(SelectionUpdate::default().model("  custom-model  "));
        assert_eq!(store.selected_model().as_deref(), Some("custom-model"));
    }

    #[test]
    fn effort_is_normalized_to_lowercase() {
        let store = offline_store();
        store.update_selection(SelectionUpdate::default().effort("HIGH"));
        assert_eq!(store.effort(), Some(EffortLevel::High));
        assert_eq!(store.effort().map(EffortLevel::as_str), Some("high"));
    }

    #[test]
    fn empty_model_clears_and_invalid_effort_is_ignored() {
        let store = offline_store();
        store.update_selection(
            SelectionUpdate::default()
                .model("custom-model")
                .effort("high"),
        );

        store.update_selection(SelectionUpdate::default().model("").effort("ultra"));
        assert_eq!(store.selected_model(), None);
        assert_eq!(store.effort(), Some(EffortLevel::High));
    }

    #[test]
    fn explicit_clears_reset_both_overrides() {
        let store = offline_store();
        store.update_selection(
            SelectionUpdate::default()
                .model("custom-model")
                .effort("low"),
        );

        store.update_selection(SelectionUpdate::default().clear_model().clear_effort());
        assert_eq!(store.selected_model(), None);
        assert_eq!(store.effort(), None);
    }

    #[test]
    fn absent_fields_leave_overrides_untouched() {
        let store = offline_store();
        store.update_selection(
            SelectionUpdate::default()
                .model("custom-model")
                .effort("medium"),
        );

        store.update_selection(SelectionUpdate::default());
        assert_eq!(store.selected_model().as_deref(), Some("custom-model"));
        assert_eq!(store.effort(), Some(EffortLevel::Medium));
    }

    #[test]
    fn whitespace_only_model_clears_the_override() {
        let store = offline_store();
        store.update_selection(SelectionUpdate::default().model("custom-model"));
        store.update_selection(SelectionUpdate::default().model("   "));
        assert_eq!(store.selected_model(), None);
    }

    #[test]
    fn sparse_json_payloads_carry_tri_state_semantics() {
        let update: SelectionUpdate =
            serde_json::from_value(serde_json::json!({"effort": "HIGH"})).expect("deserialize");
        assert!(update.model.is_none());
        assert_eq!(update.effort, Some(Some("HIGH".to_string())));

        let update: SelectionUpdate =
            serde_json::from_value(serde_json::json!({"model": null, "effort": ""}))
                .expect("deserialize");
        assert_eq!(update.model, Some(None));
        assert_eq!(update.effort, Some(Some(String::new())));
    }

    #[tokio::test]
    async fn settings_expose_fallbacks_without_transport() {
        let store = offline_store();
        let settings = store.settings().await;
        assert!(settings.available_models.contains(&"gpt-4o".to_string()));
        assert_eq!(
            store.catalog_status().await,
            CatalogStatus::FallbackOnly(FallbackReason::MissingCredential)
        );
    }
}

//! HTTP client for the remote model catalog endpoint.

use std::time::Duration;

use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::config::constants::{env, urls};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Reasons a catalog fetch can fail. None of these reach the public
/// settings surface; the store maps them all to the fallback list.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("no API credential configured")]
    MissingCredential,
    #[error("catalog request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("catalog endpoint returned HTTP {0}")]
    Status(u16),
    #[error("no 'data' array in catalog response")]
    MalformedResponse,
}

/// Client for the OpenAI-style `GET {base}/models` listing.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl CatalogClient {
    /// Build a client from a base URL and an optional credential.
    ///
    /// Empty or whitespace-only credentials count as absent.
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key
                .map(|key| key.trim().to_string())
                .filter(|key| !key.is_empty()),
        }
    }

    /// Build a client from the process environment.
    ///
    /// The credential comes from `PROMPTDECK_API_KEY`, falling back to
    /// `OPENAI_API_KEY`; the endpoint honors an `OPENAI_BASE_URL` override.
    pub fn from_env() -> Self {
        let api_key = read_env(env::API_KEY).or_else(|| read_env(env::OPENAI_API_KEY));
        let base_url =
            read_env(env::BASE_URL).unwrap_or_else(|| urls::OPENAI_API_BASE.to_string());
        Self::new(base_url, api_key)
    }

    /// Whether a credential is available, i.e. whether a fetch would be
    /// attempted at all.
    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// Fetch the list of model ids advertised by the endpoint.
    pub async fn fetch_model_ids(&self) -> Result<Vec<String>, CatalogError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or(CatalogError::MissingCredential)?;

        let url = format!("{}/models", self.base_url.trim_end_matches('/'));
        let response = self.client.get(&url).bearer_auth(key).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status.as_u16()));
        }

        let json: JsonValue = response.json().await?;
        let models = json["data"]
            .as_array()
            .ok_or(CatalogError::MalformedResponse)?
            .iter()
            .filter_map(|model| model["id"].as_str())
            .map(str::to_string)
            .collect();

        Ok(models)
    }
}

fn read_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

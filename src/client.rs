use std::collections::HashMap;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::types::PlaceRecord;

/// Relative path of the dataset on the host, matching where the original
/// page fetched it from
pub const DEFAULT_DATASET_PATH: &str = "/data_output/frost_tool_dict.json";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// What went wrong during a fetch-variant lookup.
///
/// The rendered message is the same generic string for all three, but the
/// cause stays distinguishable here and in the logs.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
    #[error("server returned {0}")]
    Status(StatusCode),
    #[error("malformed dataset: {0}")]
    Parse(#[source] serde_json::Error),
}

/// Configuration for FrostClient
#[derive(Debug, Clone)]
pub struct FrostClientConfig {
    /// Base URL of the host serving the dataset, e.g. `http://localhost:3000`
    pub base_url: String,
    /// Path of the dataset resource under the base URL
    pub dataset_path: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl FrostClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            dataset_path: DEFAULT_DATASET_PATH.to_string(),
            timeout: REQUEST_TIMEOUT,
        }
    }
}

/// Fetch-variant data source: retrieves the ZIP-to-place dataset from a host
/// on every lookup. Nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct FrostClient {
    http: Client,
    config: FrostClientConfig,
}

impl FrostClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, LookupError> {
        Self::with_config(FrostClientConfig::new(base_url))
    }

    pub fn with_config(config: FrostClientConfig) -> Result<Self, LookupError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(LookupError::Network)?;
        Ok(Self { http, config })
    }

    fn dataset_url(&self) -> String {
        format!(
            "{}{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.dataset_path
        )
    }

    /// Retrieve and parse the full dataset.
    ///
    /// Each call issues a fresh GET; a non-success status or an unparseable
    /// body is an error, an empty object is not.
    pub async fn fetch_dataset(&self) -> Result<HashMap<String, PlaceRecord>, LookupError> {
        let url = self.dataset_url();
        tracing::debug!("Fetching dataset from {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(LookupError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status));
        }

        let body = response.text().await.map_err(LookupError::Network)?;
        serde_json::from_str(&body).map_err(LookupError::Parse)
    }

    /// Look up one ZIP code against a freshly fetched dataset.
    ///
    /// `Ok(None)` means the dataset was retrieved and the key is absent;
    /// exact, case-sensitive map lookup, no validation of the key itself.
    pub async fn lookup(&self, zip: &str) -> Result<Option<PlaceRecord>, LookupError> {
        let mut dataset = self.fetch_dataset().await?;
        Ok(dataset.remove(zip))
    }
}

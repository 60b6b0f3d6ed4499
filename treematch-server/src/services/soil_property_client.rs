//! Soil property provider client
//!
//! Queries the external soil-data provider for one property at one coordinate
//! and a fixed depth band:
//!
//! `GET {base_url}?key=..&lat=..&lon=..&property=..&depth=..`
//!
//! Expected response shape (only the first entry per property is used):
//!
//! ```json
//! {"property": {"ph": [{"value": {"value": 6.2, "unit": null}, "depth": {...}}]}}
//! ```
//!
//! Every call is a fresh round trip: no retries and no caching.

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use treematch_common::config::SoilApiConfig;

const USER_AGENT: &str = concat!("TreeMatch/", env!("CARGO_PKG_VERSION"));

/// Soil provider client errors
#[derive(Debug, Error)]
pub enum SoilApiError {
    /// No API key was configured, so no request was sent
    #[error("Soil API key not configured")]
    MissingApiKey,

    /// Network communication error (connect, timeout, body read)
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Provider answered with a non-success status
    #[error("API error {0}: {1}")]
    ApiError(u16, String),

    /// Response body was not the expected JSON
    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Provider response body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SoilPropertyResponse {
    #[serde(default)]
    pub property: HashMap<String, Vec<PropertyEntry>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PropertyEntry {
    #[serde(default)]
    pub value: Option<EntryValue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EntryValue {
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
}

impl SoilPropertyResponse {
    /// First reported value for `property_name`, if the provider returned one
    pub fn first_value(&self, property_name: &str) -> Option<f64> {
        self.property
            .get(property_name)?
            .first()?
            .value
            .as_ref()?
            .value
    }
}

/// Source of soil property values
///
/// The HTTP client is the production implementation; tests substitute
/// in-process stubs.
#[async_trait]
pub trait SoilPropertySource: Send + Sync {
    /// Raw provider JSON for one property at an explicit depth band
    async fn fetch_raw(
        &self,
        latitude: f64,
        longitude: f64,
        property_name: &str,
        depth: &str,
    ) -> Result<serde_json::Value, SoilApiError>;

    /// Value of one property at the configured depth band
    ///
    /// `Ok(None)` means the provider answered but had no entry for the property.
    async fn fetch_value(
        &self,
        latitude: f64,
        longitude: f64,
        property_name: &str,
    ) -> Result<Option<f64>, SoilApiError>;
}

/// HTTP client for the soil property provider
pub struct SoilPropertyClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    depth: String,
}

impl SoilPropertyClient {
    pub fn new(config: &SoilApiConfig) -> Result<Self, SoilApiError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SoilApiError::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            depth: config.depth.clone(),
        })
    }

    /// Depth band sent with every value lookup
    pub fn depth(&self) -> &str {
        &self.depth
    }
}

#[async_trait]
impl SoilPropertySource for SoilPropertyClient {
    async fn fetch_raw(
        &self,
        latitude: f64,
        longitude: f64,
        property_name: &str,
        depth: &str,
    ) -> Result<serde_json::Value, SoilApiError> {
        let api_key = self.api_key.as_deref().ok_or(SoilApiError::MissingApiKey)?;

        let lat = latitude.to_string();
        let lon = longitude.to_string();
        let params = [
            ("key", api_key),
            ("lat", lat.as_str()),
            ("lon", lon.as_str()),
            ("property", property_name),
            ("depth", depth),
        ];

        // The key is a credential; keep it out of the logs. reqwest errors
        // carry the request URL (and so the key) unless stripped.
        tracing::debug!(
            base_url = %self.base_url,
            latitude,
            longitude,
            property = %property_name,
            depth = %depth,
            "Querying soil property API"
        );

        let response = self
            .http_client
            .get(&self.base_url)
            .query(&params)
            .send()
            .await
            .map_err(|e| SoilApiError::NetworkError(e.without_url().to_string()))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SoilApiError::ApiError(status.as_u16(), error_text));
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| SoilApiError::ParseError(e.without_url().to_string()))
    }

    async fn fetch_value(
        &self,
        latitude: f64,
        longitude: f64,
        property_name: &str,
    ) -> Result<Option<f64>, SoilApiError> {
        let body = self
            .fetch_raw(latitude, longitude, property_name, &self.depth)
            .await?;

        let parsed: SoilPropertyResponse = serde_json::from_value(body)
            .map_err(|e| SoilApiError::ParseError(e.to_string()))?;

        let value = parsed.first_value(property_name);

        tracing::info!(
            property = %property_name,
            found = value.is_some(),
            "Soil property lookup complete"
        );

        Ok(value)
    }
}

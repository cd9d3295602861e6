use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::{DEFAULT_ENDPOINT, DEFAULT_STORAGE_KEY, ERROR_DISMISS_DELAY};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("storage key cannot be empty")]
    EmptyStorageKey,
}

/// Settings handed over by the shell at startup.
///
/// Every field is optional on the wire; anything left out keeps its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Weather endpoint. City queries POST here, coordinate queries GET
    /// `<endpoint>/~<lat>,<lon>`.
    pub endpoint: String,

    /// Key holding the JSON-encoded recent searches.
    pub storage_key: String,

    pub error_dismiss_ms: u64,

    /// False when the host has no geolocation API at all.
    pub geolocation_supported: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            error_dismiss_ms: u64::try_from(ERROR_DISMISS_DELAY.as_millis()).unwrap_or(u64::MAX),
            geolocation_supported: true,
        }
    }
}

impl ClientConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.endpoint_url()?;
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }
        Ok(())
    }

    /// Parses the endpoint, accepting only absolute http(s) URLs.
    pub fn endpoint_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.endpoint).map_err(|e| ConfigError::InvalidEndpoint {
            endpoint: self.endpoint.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEndpoint {
                endpoint: self.endpoint.clone(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }
        Ok(url)
    }

    #[must_use]
    pub const fn error_dismiss_delay(&self) -> Duration {
        Duration::from_millis(self.error_dismiss_ms)
    }
}

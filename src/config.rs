//! Upstream configuration
//!
//! The backend address is a plain value handed to whatever forwards
//! requests. Nothing in this crate reads it from global state.

use crate::error::{Result, SyncError};
use crate::protocol::Route;
use serde::{Deserialize, Serialize};

/// Environment variable holding the backend address
pub const API_HOST_VAR: &str = "API_HOST";

/// Where protocol requests are forwarded to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the editing backend, e.g. `http://localhost:80`
    pub api_host: String,
}

impl UpstreamConfig {
    /// Create a config for `api_host`
    ///
    /// # Errors
    ///
    /// Returns `SyncError::Config` if the host is empty.
    pub fn new(api_host: impl Into<String>) -> Result<Self> {
        let api_host = api_host.into();
        let trimmed = api_host.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(SyncError::Config("api_host must not be empty".to_string()));
        }

        Ok(Self {
            api_host: trimmed.to_string(),
        })
    }

    /// Read the backend address from `API_HOST`
    pub fn from_env() -> Result<Self> {
        let host = std::env::var(API_HOST_VAR)
            .map_err(|e| SyncError::Config(format!("{}: {}", API_HOST_VAR, e)))?;
        let config = Self::new(host)?;
        tracing::debug!(api_host = %config.api_host, "loaded upstream config");
        Ok(config)
    }

    /// Full URL of `route` on this backend
    ///
    /// ```rust
    /// use eggwalker_core::config::UpstreamConfig;
    /// use eggwalker_core::protocol::Route;
    ///
    /// let config = UpstreamConfig::new("http://localhost:8080/").unwrap();
    /// assert_eq!(config.url_for(&Route::Delete), "http://localhost:8080/delete");
    /// ```
    pub fn url_for(&self, route: &Route) -> String {
        format!("{}{}", self.api_host, route.path())
    }
}

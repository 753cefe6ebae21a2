//! Client configuration.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::error::{AppError, AppResult};

// -----------------------------------------------------------------------------
// Constants
// -----------------------------------------------------------------------------

/// Analysis backend base URL
pub const API_BASE_URL: &str = "http://localhost:5000";

/// Optional override file, looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "kbju-tracker.json";

/// Per-request timeout for the analysis call
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Client settings; every field has a default so partial documents are fine.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub probe_health: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: API_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            probe_health: true,
        }
    }
}

impl Config {
    /// Parse an override document, e.g. `{"api_base_url": "http://10.0.0.2:5000"}`.
    pub fn from_json_str(raw: &str) -> AppResult<Self> {
        serde_json::from_str(raw).map_err(|e| AppError::FileProcessing(e.to_string()))
    }

    /// Read `path` if it exists, otherwise fall back to the defaults.
    pub fn load_or_default(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .map_err(|e| AppError::FileProcessing(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&raw)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Join an endpoint path onto the base URL without doubling slashes.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

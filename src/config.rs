//! Resolved console configuration. Values arrive from CLI flags or their
//! environment variables; blank values fall back to defaults so an exported but
//! empty variable does not break the console. Nothing here is secret.

use crate::api::ApiError;
use std::{
    env,
    path::{Path, PathBuf},
    time::Duration,
};

pub const DEFAULT_API_BASE_URL: &str = "http://geek.itheima.net/v1_0";
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;
const STORAGE_DIR: &str = ".newsdesk";
const STORAGE_FILE: &str = "storage.json";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub timeout: Duration,
    pub storage_path: PathBuf,
}

impl AppConfig {
    /// Builds a config, normalizing the base URL and rejecting a zero timeout.
    ///
    /// # Errors
    /// Returns `ApiError::Config` if the base URL is not an absolute http(s) URL
    /// or the timeout is zero.
    pub fn new(
        api_base_url: Option<&str>,
        timeout_ms: u64,
        storage_path: Option<&Path>,
    ) -> Result<Self, ApiError> {
        let api_base_url = api_base_url
            .and_then(normalize_value)
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let api_base_url = api_base_url.trim_end_matches('/').to_string();

        let parsed = url::Url::parse(&api_base_url)
            .map_err(|err| ApiError::Config(format!("Invalid API base URL {api_base_url}: {err}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::Config(format!(
                "Unsupported API base URL scheme: {}",
                parsed.scheme()
            )));
        }

        if timeout_ms == 0 {
            return Err(ApiError::Config(
                "Request timeout must be greater than zero.".to_string(),
            ));
        }

        let storage_path = storage_path
            .filter(|path| !path.as_os_str().is_empty())
            .map_or_else(default_storage_path, Path::to_path_buf);

        Ok(Self {
            api_base_url,
            timeout: Duration::from_millis(timeout_ms),
            storage_path,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            storage_path: default_storage_path(),
        }
    }
}

/// `$HOME/.newsdesk/storage.json`, or a relative path when `HOME` is unset.
#[must_use]
pub fn default_storage_path() -> PathBuf {
    env::var("HOME")
        .ok()
        .and_then(|home| normalize_value(&home))
        .map_or_else(|| PathBuf::from(STORAGE_DIR), |home| PathBuf::from(home).join(STORAGE_DIR))
        .join(STORAGE_FILE)
}

fn normalize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

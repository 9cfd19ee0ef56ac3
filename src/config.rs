//! Configuration helpers for the maintenance API client.
//!
//! The only setting is the backend base URL. It comes from `--api-url`, then
//! the `MAINTENANCE_API_URL` environment variable (a `.env` file is loaded by
//! the binary), then the local development default.

/// Environment variable holding the API base URL.
pub const API_URL_ENV: &str = "MAINTENANCE_API_URL";

/// Backend address used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Resolved client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(&base_url.into()),
        }
    }

    /// Build the configuration from the environment, falling back to the default URL.
    pub fn from_env() -> Self {
        Self::new(base_url_from_env())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

/// Read the API base URL from the environment.
pub fn base_url_from_env() -> String {
    std::env::var(API_URL_ENV)
        .ok()
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

// Endpoints are joined as `{base}{endpoint}` with endpoints starting at `/`.
fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

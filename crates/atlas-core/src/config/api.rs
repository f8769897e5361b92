//! Remote access API configuration.

use serde::{Deserialize, Serialize};

/// Remote access API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the remote identity/RBAC/menu API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds applied at the HTTP client level.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

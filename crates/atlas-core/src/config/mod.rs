//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod api;
pub mod cache;
pub mod logging;
pub mod session;
pub mod store;

use serde::{Deserialize, Serialize};

use self::api::ApiConfig;
use self::cache::CacheConfig;
use self::logging::LoggingConfig;
use self::session::SessionConfig;
use self::store::StoreConfig;

use crate::error::AppError;

/// Root client configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Remote access API settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Session management settings.
    #[serde(default)]
    pub session: SessionConfig,
    /// Resource cache settings.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Persistent key/value store settings.
    #[serde(default)]
    pub store: StoreConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `ATLAS_`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("ATLAS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            session: SessionConfig::default(),
            cache: CacheConfig::default(),
            store: StoreConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.session.snapshot_freshness_ms, 500);
        assert_eq!(config.cache.menu_ttl_seconds, 300);
        assert_eq!(config.store.provider, "file");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_empty_sections_deserialize_with_defaults() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.api.request_timeout_seconds, 10);
        assert_eq!(config.cache.permission_ttl_seconds, 120);
    }
}

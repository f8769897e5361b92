//! Resource cache configuration.

use serde::{Deserialize, Serialize};

/// TTL configuration for the single-flight resource caches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// TTL for the cached menu list in seconds.
    #[serde(default = "default_menu_ttl")]
    pub menu_ttl_seconds: u64,
    /// TTL for the cached navigation tree in seconds.
    #[serde(default = "default_navigation_ttl")]
    pub navigation_ttl_seconds: u64,
    /// TTL for the cached role set in seconds.
    #[serde(default = "default_role_ttl")]
    pub role_ttl_seconds: u64,
    /// TTL for the cached permission set in seconds.
    #[serde(default = "default_permission_ttl")]
    pub permission_ttl_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            menu_ttl_seconds: default_menu_ttl(),
            navigation_ttl_seconds: default_navigation_ttl(),
            role_ttl_seconds: default_role_ttl(),
            permission_ttl_seconds: default_permission_ttl(),
        }
    }
}

fn default_menu_ttl() -> u64 {
    300
}

fn default_navigation_ttl() -> u64 {
    300
}

fn default_role_ttl() -> u64 {
    300
}

fn default_permission_ttl() -> u64 {
    120
}

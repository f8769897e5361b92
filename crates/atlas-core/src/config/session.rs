//! Session management configuration.

use serde::{Deserialize, Serialize};

/// Session management configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Freshness window for the memoized identity snapshot, in milliseconds.
    ///
    /// Repeated reads inside this window return the memoized snapshot
    /// without re-decoding the credential.
    #[serde(default = "default_snapshot_freshness")]
    pub snapshot_freshness_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            snapshot_freshness_ms: default_snapshot_freshness(),
        }
    }
}

fn default_snapshot_freshness() -> u64 {
    500
}

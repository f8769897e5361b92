//! In-memory credential slot mirrored to persistent storage.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::warn;

use atlas_core::traits::StateStore;

/// Storage key for the persisted bearer token.
pub const TOKEN_KEY: &str = "atlas.auth.token";

#[derive(Debug, Default)]
struct Slot {
    /// Whether the one-time load from persistent storage has happened.
    loaded: bool,
    /// The raw token currently held in memory.
    token: Option<String>,
}

/// Owns the bearer token: in-memory first, mirrored to a [`StateStore`].
///
/// Reads are memory-first; the persistent copy is consulted exactly once,
/// on the first access after startup. Storage failures are logged and
/// treated as "absent" — they never propagate.
#[derive(Debug)]
pub struct CredentialStore {
    store: Arc<dyn StateStore>,
    slot: Mutex<Slot>,
}

impl CredentialStore {
    /// Create a credential store backed by the given persistent store.
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self {
            store,
            slot: Mutex::new(Slot::default()),
        }
    }

    /// Replace the credential. `None` removes it.
    ///
    /// The persistent mirror is updated before this returns.
    pub async fn set(&self, token: Option<String>) {
        let mut slot = self.slot.lock().await;
        slot.loaded = true;
        slot.token = token.clone();

        let result = match &token {
            Some(raw) => self.store.set(TOKEN_KEY, raw).await,
            None => self.store.remove(TOKEN_KEY).await,
        };
        if let Err(error) = result {
            warn!(%error, "failed to persist credential change; in-memory value stands");
        }
    }

    /// The current raw token, loading from persistent storage on the very
    /// first call after startup.
    pub async fn get(&self) -> Option<String> {
        let mut slot = self.slot.lock().await;
        if !slot.loaded {
            slot.loaded = true;
            match self.store.get(TOKEN_KEY).await {
                Ok(token) => slot.token = token,
                Err(error) => {
                    warn!(%error, "failed to load persisted credential; treating as absent");
                    slot.token = None;
                }
            }
        }
        slot.token.clone()
    }

    /// Drop the in-memory token without touching the persistent mirror.
    ///
    /// Used when an expired or undecodable credential is observed on read.
    pub async fn discard_in_memory(&self) {
        let mut slot = self.slot.lock().await;
        slot.loaded = true;
        slot.token = None;
    }

    /// Remove the credential from memory and from persistent storage.
    pub async fn clear(&self) {
        self.set(None).await;
    }
}

//! Pending-verification slot mirrored to persistent storage.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::warn;

use atlas_core::traits::StateStore;
use atlas_entity::PendingVerification;

/// Storage key for the persisted pending-verification record.
///
/// The whole triple is stored as one serialized JSON value so that a
/// partial record is never observable across restarts.
pub const PENDING_KEY: &str = "atlas.auth.pending";

#[derive(Debug, Default)]
struct Slot {
    loaded: bool,
    pending: Option<PendingVerification>,
}

/// Owns the optional pending-verification record produced by a
/// first-factor login, mirrored to a [`StateStore`].
///
/// Same memory-first, load-once, swallow-storage-failures contract as the
/// credential store.
#[derive(Debug)]
pub struct PendingVerificationStore {
    store: Arc<dyn StateStore>,
    slot: Mutex<Slot>,
}

impl PendingVerificationStore {
    /// Create a pending-verification store backed by the given persistent
    /// store.
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self {
            store,
            slot: Mutex::new(Slot::default()),
        }
    }

    /// Record a pending verification, replacing any existing one.
    pub async fn set(&self, pending: PendingVerification) {
        let mut slot = self.slot.lock().await;
        slot.loaded = true;
        slot.pending = Some(pending.clone());

        match serde_json::to_string(&pending) {
            Ok(serialized) => {
                if let Err(error) = self.store.set(PENDING_KEY, &serialized).await {
                    warn!(%error, "failed to persist pending verification; in-memory value stands");
                }
            }
            Err(error) => {
                warn!(%error, "failed to serialize pending verification; not persisted");
            }
        }
    }

    /// The current pending-verification record, loading from persistent
    /// storage on the very first call after startup.
    pub async fn get(&self) -> Option<PendingVerification> {
        let mut slot = self.slot.lock().await;
        if !slot.loaded {
            slot.loaded = true;
            slot.pending = match self.store.get(PENDING_KEY).await {
                Ok(Some(serialized)) => match serde_json::from_str(&serialized) {
                    Ok(pending) => Some(pending),
                    Err(error) => {
                        warn!(%error, "persisted pending verification is corrupt; discarding");
                        None
                    }
                },
                Ok(None) => None,
                Err(error) => {
                    warn!(%error, "failed to load pending verification; treating as absent");
                    None
                }
            };
        }
        slot.pending.clone()
    }

    /// Whether an actionable pending verification is present (identifier
    /// and challenge token both non-empty).
    pub async fn has_pending(&self) -> bool {
        self.get()
            .await
            .map(|pending| pending.is_actionable())
            .unwrap_or(false)
    }

    /// Remove the pending-verification record from memory and storage.
    pub async fn clear(&self) {
        let mut slot = self.slot.lock().await;
        slot.loaded = true;
        slot.pending = None;

        if let Err(error) = self.store.remove(PENDING_KEY).await {
            warn!(%error, "failed to remove persisted pending verification");
        }
    }
}

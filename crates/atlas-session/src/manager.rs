//! Session state machine composing the credential and pending-verification
//! stores.
//!
//! The manager owns the externally visible authentication state. Every
//! mutation persists first, then dispatches a change notification to all
//! registered observers *before* the mutating call returns, so dependent
//! reads are never stale relative to the write that triggered them.
//! Dispatch happens outside the internal locks; a re-entrant observer
//! cannot deadlock.

use std::sync::{Arc, Mutex as StdMutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;
use tracing::{debug, warn};

use atlas_core::config::session::SessionConfig;
use atlas_core::events::SessionEvent;
use atlas_core::traits::{StateStore, TokenBearer};
use atlas_entity::{Credential, IdentitySnapshot, PendingVerification};

use crate::credential::CredentialStore;
use crate::token;
use crate::verification::PendingVerificationStore;

/// The externally visible session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No valid credential and no pending verification.
    Anonymous,
    /// A first factor succeeded; a second factor is awaited.
    PendingVerification,
    /// A valid credential is present.
    Authenticated,
}

type Observer = Arc<dyn Fn(&SessionEvent) + Send + Sync>;

struct SnapshotMemo {
    snapshot: IdentitySnapshot,
    taken_at: Instant,
}

/// The session state machine.
///
/// Constructed once per process and shared by reference (`Arc`); it is
/// never an ambient global. All state transitions go through `set_*` and
/// `clear` so persistence and change notification stay consistent.
pub struct SessionManager {
    credentials: CredentialStore,
    verification: PendingVerificationStore,
    memo: StdMutex<Option<SnapshotMemo>>,
    observers: StdMutex<Vec<Observer>>,
    snapshot_freshness: Duration,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("credentials", &self.credentials)
            .field("verification", &self.verification)
            .field("snapshot_freshness", &self.snapshot_freshness)
            .finish()
    }
}

impl SessionManager {
    /// Create a session manager over the given persistent store.
    pub fn new(store: Arc<dyn StateStore>, config: &SessionConfig) -> Self {
        Self {
            credentials: CredentialStore::new(store.clone()),
            verification: PendingVerificationStore::new(store),
            memo: StdMutex::new(None),
            observers: StdMutex::new(Vec::new()),
            snapshot_freshness: Duration::from_millis(config.snapshot_freshness_ms),
        }
    }

    /// Register an observer called synchronously after every state
    /// transition.
    pub fn subscribe<F>(&self, observer: F)
    where
        F: Fn(&SessionEvent) + Send + Sync + 'static,
    {
        lock(&self.observers).push(Arc::new(observer));
    }

    /// Replace the bearer credential. `None` removes it.
    ///
    /// Persists before returning and notifies observers. Clearing a
    /// pending verification after a successful second factor is the
    /// caller's responsibility.
    pub async fn set_credential(&self, raw: Option<String>) {
        self.credentials.set(raw).await;
        self.invalidate_snapshot();

        let authenticated = self.valid_credential().await.is_some();
        self.notify(&SessionEvent::CredentialChanged { authenticated });
    }

    /// The current raw bearer token, if a valid credential is present.
    pub async fn credential(&self) -> Option<String> {
        self.valid_credential()
            .await
            .map(|credential| credential.raw().to_string())
    }

    /// Record a pending verification produced by a first-factor login.
    pub async fn set_pending(
        &self,
        identifier: impl Into<String>,
        challenge_token: impl Into<String>,
        channel: impl Into<String>,
    ) {
        self.verification
            .set(PendingVerification::new(identifier, challenge_token, channel))
            .await;
        self.notify(&SessionEvent::VerificationChanged { pending: true });
    }

    /// The current pending-verification record, if any.
    pub async fn pending(&self) -> Option<PendingVerification> {
        self.verification.get().await
    }

    /// Whether an actionable pending verification is present.
    pub async fn has_pending(&self) -> bool {
        self.verification.has_pending().await
    }

    /// Remove the pending-verification record.
    pub async fn clear_pending(&self) {
        self.verification.clear().await;
        self.notify(&SessionEvent::VerificationChanged { pending: false });
    }

    /// Clear the whole session: credential and pending verification,
    /// in memory and in persistent storage.
    pub async fn clear(&self) {
        self.credentials.clear().await;
        self.verification.clear().await;
        self.invalidate_snapshot();
        self.notify(&SessionEvent::Cleared);
    }

    /// The current session state.
    pub async fn state(&self) -> SessionState {
        if self.valid_credential().await.is_some() {
            SessionState::Authenticated
        } else if self.has_pending().await {
            SessionState::PendingVerification
        } else {
            SessionState::Anonymous
        }
    }

    /// The externally visible identity snapshot.
    ///
    /// Recomputed only when no memoized snapshot exists or its age
    /// exceeds the configured freshness window; otherwise the memoized
    /// snapshot is returned as-is.
    pub async fn authentication_state(&self) -> IdentitySnapshot {
        if let Some(memoized) = self.fresh_memo() {
            return memoized;
        }

        let snapshot = match self.valid_credential().await {
            Some(credential) => IdentitySnapshot::authenticated(
                credential.claims().clone(),
                credential.expires_at(),
            ),
            None => IdentitySnapshot::anonymous(),
        };

        *lock(&self.memo) = Some(SnapshotMemo {
            snapshot: snapshot.clone(),
            taken_at: Instant::now(),
        });
        snapshot
    }

    /// Look up a claim on the current identity snapshot.
    pub async fn find_claim(&self, name: &str) -> Option<String> {
        self.authentication_state().await.find_claim(name)
    }

    /// The current credential when it decodes and has not expired.
    ///
    /// An expired or undecodable token is discarded from memory silently
    /// (the session reverts to anonymous) and is never retried.
    async fn valid_credential(&self) -> Option<Credential> {
        let raw = self.credentials.get().await?;
        match token::decode(&raw) {
            Ok(credential) if !credential.is_expired() => Some(credential),
            Ok(_) => {
                debug!("credential expired; discarding");
                self.credentials.discard_in_memory().await;
                self.invalidate_snapshot();
                None
            }
            Err(error) => {
                warn!(%error, "credential failed to decode; discarding");
                self.credentials.discard_in_memory().await;
                self.invalidate_snapshot();
                None
            }
        }
    }

    fn fresh_memo(&self) -> Option<IdentitySnapshot> {
        let memo = lock(&self.memo);
        memo.as_ref()
            .filter(|m| m.taken_at.elapsed() < self.snapshot_freshness)
            .map(|m| m.snapshot.clone())
    }

    fn invalidate_snapshot(&self) {
        *lock(&self.memo) = None;
    }

    /// Dispatch an event to all observers, outside the internal locks.
    fn notify(&self, event: &SessionEvent) {
        let observers: Vec<Observer> = lock(&self.observers).clone();
        for observer in observers {
            observer(event);
        }
    }
}

#[async_trait]
impl TokenBearer for SessionManager {
    async fn bearer_token(&self) -> Option<String> {
        self.credential().await
    }
}

fn lock<T>(mutex: &StdMutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

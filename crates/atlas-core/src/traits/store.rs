//! Persistent key/value store trait for session state.
//!
//! This is the interface to the host platform's durable storage (a state
//! file on desktop, local storage in a browser shell). All values are
//! plain strings; callers serialize structured values as JSON.

use async_trait::async_trait;

use crate::result::AppResult;

/// Trait for persistent key/value storage backends.
///
/// Every operation is fallible. The session layer treats a failed `get`
/// as "absent" and a failed `set`/`remove` as a no-op, logging the error
/// rather than propagating it.
#[async_trait]
pub trait StateStore: Send + Sync + std::fmt::Debug + 'static {
    /// Get a value by key. Returns `None` if the key does not exist.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Set a value, replacing any existing entry for the key.
    async fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Remove a key. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> AppResult<()>;
}

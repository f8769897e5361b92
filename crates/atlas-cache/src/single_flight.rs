//! Generic single-flight TTL cache.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex as StdMutex, MutexGuard, PoisonError};
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::broadcast;
use tokio::time::Instant;
use tracing::{debug, warn};

use atlas_core::result::AppResult;

struct CachedEntry<T> {
    value: T,
    fetched_at: Instant,
    ttl: Duration,
}

impl<T> CachedEntry<T> {
    fn is_fresh(&self) -> bool {
        self.fetched_at.elapsed() < self.ttl
    }
}

struct Inner<T> {
    /// Cached values, read on the fast path without taking `in_flight`.
    entries: DashMap<String, CachedEntry<T>>,
    /// One broadcast sender per key currently being fetched.
    in_flight: StdMutex<HashMap<String, broadcast::Sender<Option<T>>>>,
}

/// A keyed cache in which at most one fetch per key is in flight at any
/// instant.
///
/// [`SingleFlight::get_or_fetch`] returns the cached value while it is
/// fresh. On a miss, the first caller starts the fetch and every
/// concurrent caller for the same key awaits that same fetch. The fetch
/// runs in a spawned task, so callers that stop waiting do not cancel it;
/// the result still lands in the cache for future callers.
///
/// Failed fetches resolve every waiter to `None`, leave the cache entry
/// unpopulated, and are retried by the next call.
pub struct SingleFlight<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for SingleFlight<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> std::fmt::Debug for SingleFlight<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SingleFlight")
            .field("entries", &self.inner.entries.len())
            .finish()
    }
}

impl<T> Default for SingleFlight<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SingleFlight<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                entries: DashMap::new(),
                in_flight: StdMutex::new(HashMap::new()),
            }),
        }
    }

    /// Return the cached value for `key` while it is fresh; otherwise
    /// ensure exactly one fetch is in flight for `key` and await its
    /// result.
    ///
    /// Returns `None` when the fetch fails; the entry is left unpopulated
    /// so the next call retries.
    pub async fn get_or_fetch<F, Fut>(&self, key: &str, ttl: Duration, fetch: F) -> Option<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<T>> + Send + 'static,
    {
        // Fast path: fresh entry, no lock.
        if let Some(value) = self.fresh(key) {
            return Some(value);
        }

        // Slow path. The freshness check above and the start of a fetch
        // are not atomic, so the entry must be re-checked once the
        // in-flight registry is held.
        let mut receiver = {
            let mut in_flight = lock(&self.inner.in_flight);

            if let Some(value) = self.fresh(key) {
                return Some(value);
            }

            if let Some(sender) = in_flight.get(key) {
                debug!(key, "joining in-flight fetch");
                sender.subscribe()
            } else {
                let (sender, receiver) = broadcast::channel(1);
                in_flight.insert(key.to_string(), sender);
                drop(in_flight);

                self.spawn_fetch(key, ttl, fetch());
                receiver
            }
        };

        match receiver.recv().await {
            Ok(value) => value,
            // The sender dropped without broadcasting; fall back to the
            // cache in case the fetch still completed.
            Err(_) => self.fresh(key),
        }
    }

    /// Drop the cached entry for `key`, if any.
    pub fn invalidate(&self, key: &str) {
        self.inner.entries.remove(key);
    }

    /// Drop every cached entry.
    pub fn clear(&self) {
        self.inner.entries.clear();
    }

    fn fresh(&self, key: &str) -> Option<T> {
        let entry = self.inner.entries.get(key)?;
        entry.is_fresh().then(|| entry.value.clone())
    }

    /// Run the fetch in its own task: store the result on success, then
    /// clear the in-flight marker, then wake the waiters.
    fn spawn_fetch<Fut>(&self, key: &str, ttl: Duration, fetch: Fut)
    where
        Fut: Future<Output = AppResult<T>> + Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        let key = key.to_string();

        tokio::spawn(async move {
            let outcome = match fetch.await {
                Ok(value) => {
                    inner.entries.insert(
                        key.clone(),
                        CachedEntry {
                            value: value.clone(),
                            fetched_at: Instant::now(),
                            ttl,
                        },
                    );
                    Some(value)
                }
                Err(error) => {
                    warn!(key = %key, %error, "fetch failed; waiters receive fallback");
                    None
                }
            };

            let sender = lock(&inner.in_flight).remove(&key);
            if let Some(sender) = sender {
                // No receivers left is fine; the result is already cached.
                let _ = sender.send(outcome);
            }
        });
    }
}

fn lock<T>(mutex: &StdMutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use atlas_core::error::AppError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter() -> Arc<AtomicUsize> {
        Arc::new(AtomicUsize::new(0))
    }

    async fn fetch(calls: Arc<AtomicUsize>) -> AppResult<String> {
        calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(50)).await;
        Ok("value".to_string())
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_callers_share_one_fetch() {
        let cache: SingleFlight<String> = SingleFlight::new();
        let calls = counter();

        let (a, b, c) = tokio::join!(
            cache.get_or_fetch("k", Duration::from_secs(60), {
                let calls = calls.clone();
                move || fetch(calls)
            }),
            cache.get_or_fetch("k", Duration::from_secs(60), {
                let calls = calls.clone();
                move || fetch(calls)
            }),
            cache.get_or_fetch("k", Duration::from_secs(60), {
                let calls = calls.clone();
                move || fetch(calls)
            }),
        );

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(a.as_deref(), Some("value"));
        assert_eq!(b.as_deref(), Some("value"));
        assert_eq!(c.as_deref(), Some("value"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fresh_entry_skips_fetch() {
        let cache: SingleFlight<u32> = SingleFlight::new();
        let calls = counter();

        for _ in 0..3 {
            let calls = calls.clone();
            let got = cache
                .get_or_fetch("k", Duration::from_secs(60), move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(7)
                })
                .await;
            assert_eq!(got, Some(7));
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_entry_is_refetched() {
        let cache: SingleFlight<u32> = SingleFlight::new();
        let calls = counter();

        let fetch = |calls: Arc<AtomicUsize>| {
            move || async move { Ok(calls.fetch_add(1, Ordering::SeqCst) as u32) }
        };

        assert_eq!(
            cache
                .get_or_fetch("k", Duration::from_secs(30), fetch(calls.clone()))
                .await,
            Some(0)
        );

        tokio::time::advance(Duration::from_secs(31)).await;

        assert_eq!(
            cache
                .get_or_fetch("k", Duration::from_secs(30), fetch(calls.clone()))
                .await,
            Some(1)
        );
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_fetch_does_not_poison_entry() {
        let cache: SingleFlight<u32> = SingleFlight::new();
        let calls = counter();

        let failing = {
            let calls = calls.clone();
            move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(AppError::external_service("backend offline"))
            }
        };
        assert_eq!(
            cache
                .get_or_fetch("k", Duration::from_secs(60), failing)
                .await,
            None
        );

        // The failure was not cached; the next call fetches again.
        let succeeding = {
            let calls = calls.clone();
            move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(42)
            }
        };
        assert_eq!(
            cache
                .get_or_fetch("k", Duration::from_secs(60), succeeding)
                .await,
            Some(42)
        );
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_caller_does_not_cancel_fetch() {
        let cache: SingleFlight<u32> = SingleFlight::new();
        let calls = counter();

        let abandoned = {
            let cache = cache.clone();
            let calls = calls.clone();
            tokio::spawn(async move {
                cache
                    .get_or_fetch("k", Duration::from_secs(60), move || async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(50)).await;
                        Ok(9)
                    })
                    .await
            })
        };
        tokio::task::yield_now().await;
        abandoned.abort();

        // The spawned fetch keeps running and populates the cache.
        tokio::time::sleep(Duration::from_millis(100)).await;
        let calls_after = calls.clone();
        let got = cache
            .get_or_fetch("k", Duration::from_secs(60), move || async move {
                calls_after.fetch_add(1, Ordering::SeqCst);
                Ok(0)
            })
            .await;

        assert_eq!(got, Some(9));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalidate_forces_refetch() {
        let cache: SingleFlight<u32> = SingleFlight::new();
        let calls = counter();

        let fetch = |calls: Arc<AtomicUsize>| {
            move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(1)
            }
        };

        cache
            .get_or_fetch("k", Duration::from_secs(60), fetch(calls.clone()))
            .await;
        cache.invalidate("k");
        cache
            .get_or_fetch("k", Duration::from_secs(60), fetch(calls.clone()))
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}

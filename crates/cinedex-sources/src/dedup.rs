use futures::future::{BoxFuture, FutureExt, Shared};
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

use crate::error::FetchError;
use crate::request_key::RequestKey;

/// Handle to an in-flight request. Cloning it shares the same settlement.
pub type PendingFetch<T> = Shared<BoxFuture<'static, Result<T, FetchError>>>;

struct InFlight<T> {
    generation: u64,
    pending: PendingFetch<T>,
}

type Registry<T> = Arc<Mutex<HashMap<RequestKey, InFlight<T>>>>;

fn lock<T>(registry: &Mutex<HashMap<RequestKey, InFlight<T>>>) -> MutexGuard<'_, HashMap<RequestKey, InFlight<T>>> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Clears a registry entry when the task owning it finishes, panics or is
/// dropped by the runtime.
struct SettleGuard<T> {
    registry: Registry<T>,
    key: RequestKey,
    generation: u64,
}

impl<T> Drop for SettleGuard<T> {
    fn drop(&mut self) {
        let mut in_flight = lock(&self.registry);
        let owns_entry = in_flight
            .get(&self.key)
            .map(|entry| entry.generation == self.generation)
            .unwrap_or(false);
        if owns_entry {
            in_flight.remove(&self.key);
            debug!(key = %self.key, "request settled");
        }
    }
}

/// Collapses concurrent requests for the same resource into one operation.
///
/// The first caller for a key starts the operation on the tokio runtime; every
/// caller arriving before it settles gets a clone of the same shared future and
/// observes the same `Ok` value or `FetchError`. The registry entry is removed
/// before the result is visible to anyone, so a call made after settlement
/// always starts a fresh operation. Nothing is cached beyond that window.
pub struct RequestDeduplicator<T> {
    in_flight: Registry<T>,
    next_generation: AtomicU64,
}

impl<T> RequestDeduplicator<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            in_flight: Arc::new(Mutex::new(HashMap::new())),
            next_generation: AtomicU64::new(0),
        }
    }

    /// Join the pending request for `key`, or start `operation` if there is
    /// none.
    ///
    /// Registration happens when this is called, not when the returned future
    /// is first polled. Dropping the returned future does not cancel the
    /// operation. Must be called from within a tokio runtime.
    pub fn fetch<F, Fut>(&self, key: RequestKey, operation: F) -> PendingFetch<T>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, FetchError>> + Send + 'static,
    {
        // Held across spawn + insert so the task cannot clear the entry
        // before it exists.
        let mut in_flight = lock(&self.in_flight);

        if let Some(entry) = in_flight.get(&key) {
            debug!(key = %key, "joining in-flight request");
            return entry.pending.clone();
        }

        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let guard = SettleGuard {
            registry: Arc::clone(&self.in_flight),
            key: key.clone(),
            generation,
        };

        let handle = tokio::spawn(async move {
            let _guard = guard;
            operation().await
        });

        let task_key = key.clone();
        let pending = async move {
            match handle.await {
                Ok(result) => result,
                Err(e) => {
                    warn!(key = %task_key, error = %e, "request task did not complete");
                    Err(FetchError::Aborted(e.to_string()))
                }
            }
        }
        .boxed()
        .shared();

        debug!(key = %key, "starting request");
        in_flight.insert(
            key,
            InFlight {
                generation,
                pending: pending.clone(),
            },
        );
        pending
    }

    /// Number of distinct keys currently in flight
    pub fn in_flight(&self) -> usize {
        lock(&self.in_flight).len()
    }

    pub fn is_in_flight(&self, key: &RequestKey) -> bool {
        lock(&self.in_flight).contains_key(key)
    }
}

impl<T> Default for RequestDeduplicator<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future::join_all;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    fn key(path: &str) -> RequestKey {
        RequestKey::new(path, &[("page", "1")])
    }

    #[tokio::test]
    async fn test_concurrent_callers_share_one_operation() {
        let dedup = RequestDeduplicator::<u32>::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let pending: Vec<_> = (0..5)
            .map(|_| {
                let calls = Arc::clone(&calls);
                dedup.fetch(key("/movie/popular"), move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(20)).await;
                    Ok(42)
                })
            })
            .collect();

        assert_eq!(dedup.in_flight(), 1);

        let results = join_all(pending).await;
        assert_eq!(results.len(), 5);
        assert!(results.iter().all(|r| *r == Ok(42)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(dedup.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_failure_is_shared_by_all_waiters() {
        let dedup = RequestDeduplicator::<u32>::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let make_op = |calls: Arc<AtomicUsize>| {
            move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(10)).await;
                Err::<u32, _>(FetchError::status(500, "Internal Server Error"))
            }
        };

        let first = dedup.fetch(key("/movie/top_rated"), make_op(Arc::clone(&calls)));
        let second = dedup.fetch(key("/movie/top_rated"), make_op(Arc::clone(&calls)));
        let (a, b) = futures::join!(first, second);

        assert_eq!(a, b);
        assert_eq!(a.unwrap_err().status_code(), Some(500));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_settled_entry_is_not_reused() {
        let dedup = RequestDeduplicator::<u32>::new();
        let k = key("/movie/upcoming");

        let first = dedup.fetch(k.clone(), || async { Ok(1) }).await;
        assert_eq!(first, Ok(1));
        assert!(!dedup.is_in_flight(&k));

        let second = dedup
            .fetch(k.clone(), || async { Err(FetchError::status(404, "Not Found")) })
            .await;
        assert!(second.unwrap_err().to_string().contains("404"));
        assert_eq!(dedup.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_immediate_operation_still_shared() {
        let dedup = RequestDeduplicator::<u32>::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let c1 = Arc::clone(&calls);
        let first = dedup.fetch(key("/trending/movie/week"), move || async move {
            c1.fetch_add(1, Ordering::SeqCst);
            Ok(7)
        });
        let c2 = Arc::clone(&calls);
        let second = dedup.fetch(key("/trending/movie/week"), move || async move {
            c2.fetch_add(1, Ordering::SeqCst);
            Ok(8)
        });

        assert_eq!(first.await, Ok(7));
        assert_eq!(second.await, Ok(7));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_different_keys_not_deduplicated() {
        let dedup = RequestDeduplicator::<u32>::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let c1 = Arc::clone(&calls);
        let one = dedup.fetch(key("/movie/popular"), move || async move {
            c1.fetch_add(1, Ordering::SeqCst);
            Ok(1)
        });
        let c2 = Arc::clone(&calls);
        let two = dedup.fetch(RequestKey::new("/movie/popular", &[("page", "2")]), move || async move {
            c2.fetch_add(1, Ordering::SeqCst);
            Ok(2)
        });

        assert_eq!(dedup.in_flight(), 2);
        let (a, b) = futures::join!(one, two);
        assert_eq!((a, b), (Ok(1), Ok(2)));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_abandoned_caller_does_not_cancel() {
        let dedup = RequestDeduplicator::<u32>::new();
        let (tx, rx) = tokio::sync::oneshot::channel();

        let pending = dedup.fetch(key("/movie/550"), move || async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            let _ = tx.send(());
            Ok(550)
        });
        drop(pending);

        rx.await.unwrap();
        tokio::task::yield_now().await;
        assert_eq!(dedup.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_panicking_operation_clears_entry() {
        let dedup = RequestDeduplicator::<u32>::new();
        let k = key("/search/movie");

        let result = dedup
            .fetch(k.clone(), || async {
                if true {
                    panic!("transport exploded");
                }
                Ok(0)
            })
            .await;

        assert!(matches!(result, Err(FetchError::Aborted(_))));
        assert!(!dedup.is_in_flight(&k));

        // the key is usable again
        assert_eq!(dedup.fetch(k, || async { Ok(3) }).await, Ok(3));
    }
}

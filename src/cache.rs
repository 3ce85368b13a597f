//! Per-request cache
//!
//! Deduplicates identical upstream calls within one page render. The cache
//! memoizes the *pending* operation, not just its resolved value: the first
//! caller for a key installs a shared future, and every concurrent caller
//! for the same key awaits that same future, so the network call runs at
//! most once per render. Failures are memoized the same way, which is why
//! cached results carry their errors in an `Arc`.
//!
//! A cache instance is scoped to exactly one render (it lives inside the
//! render's `PageContext`); there is no TTL and no cross-request sharing.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Mutex;

use futures::future::{BoxFuture, Shared};
use futures::FutureExt;

/// Cache key: operation identity plus a stable serialization of its arguments
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    op: &'static str,
    args: String,
}

impl CacheKey {
    pub fn new(op: &'static str, args: impl Into<String>) -> Self {
        Self {
            op,
            args: args.into(),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.op, self.args)
    }
}

type SharedFetch<T> = Shared<BoxFuture<'static, T>>;

/// In-flight memoization table for one page render
#[derive(Default)]
pub struct RequestCache {
    // Entries are type-erased shared futures; the op name in the key pins
    // the concrete output type.
    entries: Mutex<HashMap<CacheKey, Box<dyn Any + Send + Sync>>>,
}

impl RequestCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct operations started in this render
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Resolve `key` through the cache. On a miss, `fetch` produces the
    /// future that is installed (shared) and awaited; on a hit, the caller
    /// awaits the already-installed future whether or not it has resolved.
    pub async fn get_or_fetch<T, F, Fut>(&self, key: CacheKey, fetch: F) -> T
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = T> + Send + 'static,
    {
        let shared: SharedFetch<T> = {
            let mut entries = self.lock();
            let hit = entries
                .get(&key)
                .and_then(|entry| entry.downcast_ref::<SharedFetch<T>>())
                .cloned();
            match hit {
                Some(existing) => existing,
                None => {
                    let fut: SharedFetch<T> = fetch().boxed().shared();
                    entries.insert(key, Box::new(fut.clone()));
                    fut
                }
            }
        };
        // Lock released before awaiting; concurrent callers poll the same
        // shared future.
        shared.await
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<CacheKey, Box<dyn Any + Send + Sync>>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl fmt::Debug for RequestCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestCache")
            .field("entries", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_second_call_reuses_resolved_value() {
        let cache = RequestCache::new();
        let calls = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let calls = calls.clone();
            let value: u32 = cache
                .get_or_fetch(CacheKey::new("op", "a"), move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    42
                })
                .await;
            assert_eq!(value, 42);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_distinct_keys_fetch_separately() {
        let cache = RequestCache::new();
        let calls = Arc::new(AtomicUsize::new(0));

        for args in ["a", "b"] {
            let calls = calls.clone();
            cache
                .get_or_fetch(CacheKey::new("op", args), move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    args.len()
                })
                .await;
        }

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.len(), 2);
    }

    #[tokio::test]
    async fn test_same_args_different_op_do_not_collide() {
        let cache = RequestCache::new();

        let a: u32 = cache
            .get_or_fetch(CacheKey::new("first", "x"), || async { 1 })
            .await;
        let b: u64 = cache
            .get_or_fetch(CacheKey::new("second", "x"), || async { 2 })
            .await;

        assert_eq!(a, 1);
        assert_eq!(b, 2);
    }
}

//! Keyed cache of fetched collections.
//!
//! Each [`QueryKey`] holds at most one value. A query returns the cached value
//! while it is fresh and fetches otherwise; a successful mutation marks its
//! key stale so the next query fetches exactly once. Failed fetches keep the
//! previous value and record the error message.
//!
//! The internal mutex is only held for bookkeeping, never across an await.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use mockable::Clock;
use tracing::debug;

use super::ports::ApiError;

/// Name under which a collection is cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// Mechanic list.
    Mechanics,
    /// Service catalogue.
    Services,
    /// Service requests.
    ServiceRequests,
    /// Feedback entries.
    Feedbacks,
    /// User accounts.
    Profiles,
    /// Monitoring counters.
    Monitoring,
}

impl QueryKey {
    /// Stable key name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mechanics => "mechanics",
            Self::Services => "services",
            Self::ServiceRequests => "serviceRequests",
            Self::Feedbacks => "feedbacks",
            Self::Profiles => "profiles",
            Self::Monitoring => "monitoring",
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Observable state of one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryStatus {
    /// Never fetched.
    Idle,
    /// A fetch is in flight.
    Fetching,
    /// Holds data fetched at the given time.
    Ready {
        /// When the data was fetched.
        fetched_at: DateTime<Utc>,
    },
    /// Holds data that a mutation has since invalidated.
    Stale {
        /// When the data was fetched.
        fetched_at: DateTime<Utc>,
    },
    /// The last fetch failed.
    Failed {
        /// Error message of the failed fetch.
        message: String,
    },
}

type CachedValue = Arc<dyn Any + Send + Sync>;

#[derive(Default)]
struct Entry {
    value: Option<CachedValue>,
    fetched_at: Option<DateTime<Utc>>,
    stale: bool,
    fetching: bool,
    error: Option<String>,
}

impl Entry {
    fn fresh<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        if self.stale || self.error.is_some() {
            return None;
        }
        self.value.clone()?.downcast::<T>().ok()
    }

    fn status(&self) -> QueryStatus {
        if self.fetching {
            return QueryStatus::Fetching;
        }
        if let Some(message) = &self.error {
            return QueryStatus::Failed {
                message: message.clone(),
            };
        }
        match (self.fetched_at, self.stale) {
            (Some(fetched_at), true) => QueryStatus::Stale { fetched_at },
            (Some(fetched_at), false) => QueryStatus::Ready { fetched_at },
            (None, _) => QueryStatus::Idle,
        }
    }
}

/// In-process cache shared by every query of one console session.
pub struct QueryCache {
    entries: Mutex<HashMap<QueryKey, Entry>>,
    clock: Arc<dyn Clock>,
}

impl QueryCache {
    /// Create an empty cache stamping entries with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
        }
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<QueryKey, Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the fresh value under `key`, or run `fetch` and cache its result.
    ///
    /// # Errors
    ///
    /// Returns the fetch error; the previously cached value is kept.
    pub async fn fetch<T, F, Fut>(&self, key: QueryKey, fetch: F) -> Result<Arc<T>, ApiError>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        {
            let mut entries = self.entries();
            let entry = entries.entry(key).or_default();
            if let Some(hit) = entry.fresh::<T>() {
                debug!(key = key.as_str(), "query cache hit");
                return Ok(hit);
            }
            entry.fetching = true;
        }

        debug!(key = key.as_str(), "fetching query");
        let outcome = fetch().await;

        let mut entries = self.entries();
        let entry = entries.entry(key).or_default();
        entry.fetching = false;
        match outcome {
            Ok(value) => {
                let value = Arc::new(value);
                let erased: CachedValue = value.clone();
                entry.value = Some(erased);
                entry.fetched_at = Some(self.clock.utc());
                entry.stale = false;
                entry.error = None;
                Ok(value)
            }
            Err(error) => {
                entry.error = Some(error.to_string());
                Err(error)
            }
        }
    }

    /// Cached value under `key` regardless of freshness.
    #[must_use]
    pub fn peek<T: Send + Sync + 'static>(&self, key: QueryKey) -> Option<Arc<T>> {
        self.entries()
            .get(&key)
            .and_then(|entry| entry.value.clone())
            .and_then(|value| value.downcast::<T>().ok())
    }

    /// Mark `key` stale so the next query fetches.
    pub fn invalidate(&self, key: QueryKey) {
        if let Some(entry) = self.entries().get_mut(&key) {
            entry.stale = true;
        }
        debug!(key = key.as_str(), "query invalidated");
    }

    /// Current state of `key`.
    #[must_use]
    pub fn status(&self, key: QueryKey) -> QueryStatus {
        self.entries()
            .get(&key)
            .map_or(QueryStatus::Idle, Entry::status)
    }
}

impl fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.entries();
        let mut keys: Vec<_> = entries.keys().map(|key| key.as_str()).collect();
        keys.sort_unstable();
        f.debug_struct("QueryCache")
            .field("keys", &keys)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};
    use rstest::{fixture, rstest};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixtureClock {
        utc_now: DateTime<Utc>,
    }

    impl Clock for FixtureClock {
        fn local(&self) -> DateTime<Local> {
            self.utc_now.with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            self.utc_now
        }
    }

    fn fixture_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0)
            .single()
            .expect("valid fixture timestamp")
    }

    #[fixture]
    fn cache() -> QueryCache {
        QueryCache::new(Arc::new(FixtureClock {
            utc_now: fixture_time(),
        }))
    }

    async fn load(
        cache: &QueryCache,
        calls: &AtomicUsize,
        result: Result<Vec<u8>, ApiError>,
    ) -> Result<Arc<Vec<u8>>, ApiError> {
        cache
            .fetch(QueryKey::Mechanics, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                result
            })
            .await
    }

    #[rstest]
    #[tokio::test]
    async fn fresh_values_are_served_from_cache(cache: QueryCache) {
        let calls = AtomicUsize::new(0);
        let first = load(&cache, &calls, Ok(vec![1])).await.expect("first fetch");
        let second = load(&cache, &calls, Ok(vec![2])).await.expect("cache hit");

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(first, second);
        assert_eq!(
            cache.status(QueryKey::Mechanics),
            QueryStatus::Ready {
                fetched_at: fixture_time()
            }
        );
    }

    #[rstest]
    #[tokio::test]
    async fn invalidation_forces_exactly_one_refetch(cache: QueryCache) {
        let calls = AtomicUsize::new(0);
        load(&cache, &calls, Ok(vec![1])).await.expect("first fetch");
        cache.invalidate(QueryKey::Mechanics);
        assert!(matches!(
            cache.status(QueryKey::Mechanics),
            QueryStatus::Stale { .. }
        ));

        let refreshed = load(&cache, &calls, Ok(vec![9])).await.expect("refetch");
        load(&cache, &calls, Ok(vec![0])).await.expect("cache hit");

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(*refreshed, vec![9]);
    }

    #[rstest]
    #[tokio::test]
    async fn failures_keep_the_previous_value(cache: QueryCache) {
        let calls = AtomicUsize::new(0);
        load(&cache, &calls, Ok(vec![1])).await.expect("first fetch");
        cache.invalidate(QueryKey::Mechanics);

        let err = load(&cache, &calls, Err(ApiError::status(503_u16, "down")))
            .await
            .expect_err("fetch fails");

        assert_eq!(err.to_string(), "down");
        assert_eq!(
            cache.status(QueryKey::Mechanics),
            QueryStatus::Failed {
                message: "down".to_owned()
            }
        );
        assert_eq!(
            cache.peek::<Vec<u8>>(QueryKey::Mechanics).as_deref(),
            Some(&vec![1])
        );
    }

    #[rstest]
    fn untouched_keys_are_idle(cache: QueryCache) {
        assert_eq!(cache.status(QueryKey::Profiles), QueryStatus::Idle);
        cache.invalidate(QueryKey::Profiles);
        assert_eq!(cache.status(QueryKey::Profiles), QueryStatus::Idle);
    }

    #[rstest]
    #[case(QueryKey::ServiceRequests, "serviceRequests")]
    #[case(QueryKey::Profiles, "profiles")]
    fn keys_have_stable_names(#[case] key: QueryKey, #[case] expected: &str) {
        assert_eq!(key.to_string(), expected);
    }
}

use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use std::sync::Mutex;

use super::source::{TrendError, TrendSnapshot, TrendSource};

/// Time-limited snapshot of trending terms, refreshed lazily from a
/// [`TrendSource`].
///
/// Starts empty. The first lookup, and any lookup at or after the snapshot's
/// deadline, fetches a fresh snapshot while holding the lock, so concurrent
/// callers never refresh twice for the same window. A failed refresh leaves the
/// cache empty and the next lookup tries again.
pub struct TrendCache {
    source: Box<dyn TrendSource>,
    snapshot: Mutex<Option<TrendSnapshot>>,
}

impl TrendCache {
    pub fn new(source: Box<dyn TrendSource>) -> Self {
        Self {
            source,
            snapshot: Mutex::new(None),
        }
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Current trending terms, refreshing first if the cache is empty or expired
    pub fn terms_at(&self, now: DateTime<Utc>) -> Result<BTreeSet<String>, TrendError> {
        let mut guard = self.snapshot.lock().map_err(|_| TrendError::Poisoned)?;

        if let Some(snapshot) = guard.as_ref() {
            if snapshot.is_valid_at(now) {
                return Ok(snapshot.terms.clone());
            }
        }

        // Drop the stale snapshot before fetching so a failure leaves the cache empty
        *guard = None;
        let fresh = self.source.fetch(now)?;
        tracing::debug!(
            source = self.source.name(),
            terms = fresh.terms.len(),
            valid_until = %fresh.valid_until,
            "Refreshed trend cache"
        );
        let terms = fresh.terms.clone();
        *guard = Some(fresh);
        Ok(terms)
    }

    /// Whether a snapshot is held and still valid at `now`
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        match self.snapshot.lock() {
            Ok(guard) => guard.as_ref().is_some_and(|s| s.is_valid_at(now)),
            Err(_) => false,
        }
    }

    /// Discard the held snapshot so the next lookup refreshes
    pub fn invalidate(&self) {
        if let Ok(mut guard) = self.snapshot.lock() {
            *guard = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trends::source::{StaticTrendSource, DEFAULT_TREND_TTL};
    use chrono::Duration;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Counts fetches and optionally fails them
    struct CountingSource {
        fetches: Arc<AtomicUsize>,
        fail: bool,
    }

    impl TrendSource for CountingSource {
        fn name(&self) -> &str {
            "counting"
        }

        fn fetch(&self, now: DateTime<Utc>) -> Result<TrendSnapshot, TrendError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(TrendError::Unavailable("forced failure".to_string()));
            }
            StaticTrendSource::default().fetch(now)
        }
    }

    fn counting_cache(fail: bool) -> (TrendCache, Arc<AtomicUsize>) {
        let fetches = Arc::new(AtomicUsize::new(0));
        let cache = TrendCache::new(Box::new(CountingSource {
            fetches: fetches.clone(),
            fail,
        }));
        (cache, fetches)
    }

    #[test]
    fn test_starts_empty() {
        let cache = TrendCache::new(Box::new(StaticTrendSource::new(DEFAULT_TREND_TTL)));
        assert!(!cache.is_valid_at(Utc::now()));
        assert_eq!(cache.source_name(), "static");
    }

    #[test]
    fn test_refreshes_once_per_window() {
        let (cache, fetches) = counting_cache(false);
        let now = Utc::now();

        let terms = cache.terms_at(now).unwrap();
        assert!(terms.contains("economia"));
        cache.terms_at(now + Duration::minutes(30)).unwrap();
        cache.terms_at(now + Duration::minutes(59)).unwrap();

        assert_eq!(fetches.load(Ordering::SeqCst), 1);
        assert!(cache.is_valid_at(now + Duration::minutes(59)));
    }

    #[test]
    fn test_refreshes_after_expiry() {
        let (cache, fetches) = counting_cache(false);
        let now = Utc::now();

        cache.terms_at(now).unwrap();
        cache.terms_at(now + Duration::hours(1)).unwrap();

        assert_eq!(fetches.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_failed_refresh_leaves_cache_empty_and_retries() {
        let (cache, fetches) = counting_cache(true);
        let now = Utc::now();

        assert!(cache.terms_at(now).is_err());
        assert!(!cache.is_valid_at(now));
        assert!(cache.terms_at(now).is_err());
        assert_eq!(fetches.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_invalidate_forces_refresh() {
        let (cache, fetches) = counting_cache(false);
        let now = Utc::now();

        cache.terms_at(now).unwrap();
        cache.invalidate();
        assert!(!cache.is_valid_at(now));
        cache.terms_at(now).unwrap();

        assert_eq!(fetches.load(Ordering::SeqCst), 2);
    }
}

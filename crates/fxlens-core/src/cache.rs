//! In-memory memoization of resolved rates.
//!
//! Two independent TTL classes share one store:
//!
//! | Class | Key | Default TTL | Expiry |
//! |-------|-----|-------------|--------|
//! | [`TtlClass::Current`] | `BASE_TARGET` | 300 s | lazily removed on the next lookup |
//! | [`TtlClass::Series`] | `BASE_TARGET` + days | 600 s | deferred deletion task, plus lookup check |
//!
//! There is no size bound and no LRU eviction. Concurrent misses for the same
//! key are not coalesced; each caller runs its own resolution.

use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

use crate::{CurrencyPair, Period, RateQuote, RateSeries};

/// Expiry class of a cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TtlClass {
    Current,
    Series,
}

/// Time-to-live per entry class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTtl {
    pub current: Duration,
    pub series: Duration,
}

impl Default for CacheTtl {
    fn default() -> Self {
        Self {
            current: Duration::from_secs(300),
            series: Duration::from_secs(600),
        }
    }
}

impl CacheTtl {
    pub const fn of(&self, class: TtlClass) -> Duration {
        match class {
            TtlClass::Current => self.current,
            TtlClass::Series => self.series,
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry<T> {
    value: T,
    inserted_at: Instant,
}

impl<T> CacheEntry<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            inserted_at: Instant::now(),
        }
    }

    fn is_fresh(&self, ttl: Duration) -> bool {
        self.inserted_at.elapsed() < ttl
    }
}

type SeriesKey = (String, usize);

#[derive(Debug, Default)]
struct CacheInner {
    current: HashMap<String, CacheEntry<RateQuote>>,
    series: HashMap<SeriesKey, CacheEntry<RateSeries>>,
}

/// Session-scoped rate cache, cheap to clone and shared between resolvers.
#[derive(Debug, Clone)]
pub struct RateCache {
    inner: Arc<RwLock<CacheInner>>,
    ttl: CacheTtl,
}

impl Default for RateCache {
    fn default() -> Self {
        Self::new(CacheTtl::default())
    }
}

impl RateCache {
    pub fn new(ttl: CacheTtl) -> Self {
        Self {
            inner: Arc::new(RwLock::new(CacheInner::default())),
            ttl,
        }
    }

    pub const fn ttl(&self) -> CacheTtl {
        self.ttl
    }

    /// Fresh current quote for the pair. A stale entry is removed.
    pub async fn get_current(&self, pair: &CurrencyPair) -> Option<RateQuote> {
        let key = pair.key();
        {
            let store = self.inner.read().await;
            match store.current.get(&key) {
                None => return None,
                Some(entry) if entry.is_fresh(self.ttl.current) => {
                    debug!(pair = %key, "current rate cache hit");
                    return Some(entry.value.clone());
                }
                Some(_) => {}
            }
        }

        let mut store = self.inner.write().await;
        // Another writer may have refreshed the entry between the two locks.
        if store
            .current
            .get(&key)
            .is_some_and(|entry| !entry.is_fresh(self.ttl.current))
        {
            debug!(pair = %key, "evicting stale current rate");
            store.current.remove(&key);
        }
        None
    }

    pub async fn put_current(&self, quote: RateQuote) {
        let key = quote.pair.key();
        let mut store = self.inner.write().await;
        store.current.insert(key, CacheEntry::new(quote));
    }

    /// Fresh series for the pair and exact period. No partial reuse across periods.
    pub async fn get_series(&self, pair: &CurrencyPair, period: Period) -> Option<RateSeries> {
        let key = (pair.key(), period.days());
        let store = self.inner.read().await;
        store
            .series
            .get(&key)
            .filter(|entry| entry.is_fresh(self.ttl.series))
            .map(|entry| {
                debug!(pair = %key.0, days = key.1, "series cache hit");
                entry.value.clone()
            })
    }

    /// Stores a series and schedules its deletion once the series TTL elapses.
    pub async fn put_series(&self, series: RateSeries, period: Period) {
        let key = (series.pair.key(), period.days());
        let entry = CacheEntry::new(series);
        let inserted_at = entry.inserted_at;
        {
            let mut store = self.inner.write().await;
            store.series.insert(key.clone(), entry);
        }
        self.schedule_series_expiry(key, inserted_at);
    }

    fn schedule_series_expiry(&self, key: SeriesKey, inserted_at: Instant) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            return;
        };
        let weak: Weak<RwLock<CacheInner>> = Arc::downgrade(&self.inner);
        let ttl = self.ttl.series;
        handle.spawn(async move {
            tokio::time::sleep_until(inserted_at + ttl).await;
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let mut store = inner.write().await;
            // A newer insert for the same key owns its own timer.
            if store
                .series
                .get(&key)
                .is_some_and(|entry| entry.inserted_at == inserted_at)
            {
                debug!(pair = %key.0, days = key.1, "series cache entry expired");
                store.series.remove(&key);
            }
        });
    }

    /// Number of stored entries of a class, stale ones included.
    pub async fn len(&self, class: TtlClass) -> usize {
        let store = self.inner.read().await;
        match class {
            TtlClass::Current => store.current.len(),
            TtlClass::Series => store.series.len(),
        }
    }

    pub async fn clear(&self) {
        let mut store = self.inner.write().await;
        store.current.clear();
        store.series.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::calendar::today_utc;
    use crate::{Provenance, SeriesPoint, UtcDateTime};

    fn pair() -> CurrencyPair {
        CurrencyPair::parse("USD", "EUR").expect("valid pair")
    }

    fn quote(rate: f64) -> RateQuote {
        RateQuote::new(pair(), rate, UtcDateTime::now(), Provenance::Live)
    }

    fn series() -> RateSeries {
        RateSeries::new(
            pair(),
            vec![SeriesPoint::new(today_utc(), 0.92, Provenance::Live)],
        )
    }

    #[tokio::test(start_paused = true)]
    async fn current_entry_expires_lazily() {
        let cache = RateCache::default();
        cache.put_current(quote(0.92)).await;

        tokio::time::advance(Duration::from_secs(299)).await;
        let hit = cache.get_current(&pair()).await.expect("fresh entry");
        assert_eq!(hit.rate, 0.92);
        assert_eq!(hit.provenance, Provenance::Live);

        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(cache.len(TtlClass::Current).await, 1);
        assert!(cache.get_current(&pair()).await.is_none());
        assert_eq!(cache.len(TtlClass::Current).await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn series_entry_self_deletes() {
        let cache = RateCache::default();
        cache.put_series(series(), Period::WEEK).await;
        assert!(cache.get_series(&pair(), Period::WEEK).await.is_some());
        assert!(cache.get_series(&pair(), Period::MONTH).await.is_none());

        tokio::time::sleep(Duration::from_secs(601)).await;
        assert_eq!(cache.len(TtlClass::Series).await, 0);
        assert!(cache.get_series(&pair(), Period::WEEK).await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn reinsert_keeps_newer_series_alive() {
        let cache = RateCache::default();
        cache.put_series(series(), Period::WEEK).await;
        tokio::time::sleep(Duration::from_secs(400)).await;
        cache.put_series(series(), Period::WEEK).await;

        tokio::time::sleep(Duration::from_secs(201)).await;
        assert!(cache.get_series(&pair(), Period::WEEK).await.is_some());

        tokio::time::sleep(Duration::from_secs(400)).await;
        assert!(cache.get_series(&pair(), Period::WEEK).await.is_none());
    }
}

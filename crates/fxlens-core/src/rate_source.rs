//! Current-rate resolution.
//!
//! [`RateSource::resolve_current`] walks the tiers in order and always
//! returns a quote:
//!
//! 1. fresh cache entry (provenance preserved)
//! 2. live remote quote, cached for the current-rate TTL
//! 3. fallback table constant, not cached
//! 4. synthetic rate, not cached

use std::sync::Arc;

use tracing::{info, warn};

use crate::cache::RateCache;
use crate::fallback::{fallback_rate, synthetic_rate};
use crate::provider::RateProvider;
use crate::random::RandomSource;
use crate::{CurrencyPair, Provenance, RateQuote, UtcDateTime};

#[derive(Clone)]
pub struct RateSource {
    provider: Arc<dyn RateProvider>,
    cache: RateCache,
    random: Arc<RandomSource>,
}

impl RateSource {
    pub fn new(provider: Arc<dyn RateProvider>, cache: RateCache, random: Arc<RandomSource>) -> Self {
        Self {
            provider,
            cache,
            random,
        }
    }

    pub fn provider(&self) -> &dyn RateProvider {
        self.provider.as_ref()
    }

    pub fn cache(&self) -> &RateCache {
        &self.cache
    }

    pub fn random(&self) -> &RandomSource {
        &self.random
    }

    pub async fn resolve_current(&self, pair: &CurrencyPair) -> RateQuote {
        if let Some(quote) = self.cache.get_current(pair).await {
            return quote;
        }

        match self.provider.latest(pair).await {
            Ok(remote) => {
                let quote = RateQuote::new(pair.clone(), remote.rate, remote.as_of(), Provenance::Live);
                info!(pair = %pair, rate = quote.rate, provenance = %quote.provenance, "resolved current rate");
                self.cache.put_current(quote.clone()).await;
                quote
            }
            Err(error) => {
                warn!(
                    pair = %pair,
                    provider = self.provider.id(),
                    code = error.code(),
                    error = %error,
                    "live rate unavailable, using local tiers"
                );
                self.fallback_quote(pair)
            }
        }
    }

    /// Quote from the local tiers only: fallback table, then synthesis.
    pub fn fallback_quote(&self, pair: &CurrencyPair) -> RateQuote {
        let (rate, provenance) = match fallback_rate(pair) {
            Some(rate) => (rate, Provenance::FallbackTable),
            None => (synthetic_rate(pair, &self.random), Provenance::Synthetic),
        };
        info!(pair = %pair, rate, provenance = %provenance, "resolved current rate");
        RateQuote::new(pair.clone(), rate, UtcDateTime::now(), provenance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{ProviderFuture, RemoteRate, SourceError};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use time::Date;

    struct FixedProvider {
        rate: Option<f64>,
        calls: AtomicUsize,
    }

    impl RateProvider for FixedProvider {
        fn id(&self) -> &'static str {
            "fixed"
        }

        fn latest<'a>(&'a self, _pair: &'a CurrencyPair) -> ProviderFuture<'a> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let result = self
                .rate
                .map(|rate| RemoteRate::new(rate, None))
                .ok_or_else(|| SourceError::unavailable("disabled"));
            Box::pin(async move { result })
        }

        fn on_date<'a>(&'a self, pair: &'a CurrencyPair, _date: Date) -> ProviderFuture<'a> {
            self.latest(pair)
        }
    }

    fn source(rate: Option<f64>) -> (RateSource, Arc<FixedProvider>) {
        let provider = Arc::new(FixedProvider {
            rate,
            calls: AtomicUsize::new(0),
        });
        let source = RateSource::new(
            provider.clone(),
            RateCache::default(),
            Arc::new(RandomSource::from_seed(1)),
        );
        (source, provider)
    }

    #[tokio::test]
    async fn live_quote_is_cached() {
        let (source, provider) = source(Some(0.9311));
        let pair = CurrencyPair::parse("USD", "EUR").expect("valid pair");

        let first = source.resolve_current(&pair).await;
        let second = source.resolve_current(&pair).await;

        assert_eq!(first.provenance, Provenance::Live);
        assert_eq!(first, second);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn local_tiers_are_retried_live_each_time() {
        let (source, provider) = source(None);
        let known = CurrencyPair::parse("USD", "EUR").expect("valid pair");
        let unknown = CurrencyPair::parse("SEK", "NOK").expect("valid pair");

        let table = source.resolve_current(&known).await;
        assert_eq!((table.rate, table.provenance), (0.92, Provenance::FallbackTable));
        source.resolve_current(&known).await;
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);

        let synthetic = source.resolve_current(&unknown).await;
        assert_eq!(synthetic.provenance, Provenance::Synthetic);
        assert!(synthetic.rate.is_finite() && synthetic.rate > 0.0);
    }
}

use time::Duration as DateDuration;
use tracing::{debug, info, warn};

use crate::domain::calendar::today_utc;
use crate::fallback::{random_walk_step, synthesize_series};
use crate::rate_source::RateSource;
use crate::{CurrencyPair, Period, Provenance, RateSeries, SeriesPoint};

/// Builds daily rate series ending today.
#[derive(Clone)]
pub struct HistorySeries {
    source: RateSource,
}

impl HistorySeries {
    pub fn new(source: RateSource) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &RateSource {
        &self.source
    }

    /// Series of exactly `period.days()` points, ascending, last point today.
    ///
    /// Today's value is [`RateSource::resolve_current`]. Past days query the
    /// provider for that date and fall back to a random walk from the adjacent
    /// more recent day. If today's rate itself could not be fetched live the
    /// whole series is synthesized around it and not cached.
    pub async fn resolve_series(&self, pair: &CurrencyPair, period: Period) -> RateSeries {
        let cache = self.source.cache();
        if let Some(series) = cache.get_series(pair, period).await {
            return series;
        }

        let days = period.days();
        let today = today_utc();
        let current = self.source.resolve_current(pair).await;

        if !current.provenance.is_live() {
            warn!(
                pair = %pair,
                days,
                provenance = %current.provenance,
                "remote source unavailable, synthesizing series"
            );
            return synthesize_series(pair, days, current.rate, today, self.source.random());
        }

        let provider = self.source.provider();
        let mut points = Vec::with_capacity(days);
        points.push(SeriesPoint::new(today, current.rate, current.provenance));
        let mut previous = current.rate;
        let mut synthesized = 0_usize;

        for i in 1..days {
            let date = today - DateDuration::days(i as i64);
            let (rate, provenance) = match provider.on_date(pair, date).await {
                Ok(remote) => (remote.rate, Provenance::Live),
                Err(error) => {
                    debug!(pair = %pair, %date, error = %error, "historical rate unavailable");
                    synthesized += 1;
                    (random_walk_step(previous, self.source.random()), Provenance::Synthetic)
                }
            };
            points.push(SeriesPoint::new(date, rate, provenance));
            previous = rate;
        }

        info!(pair = %pair, days, synthesized, "resolved rate series");
        let series = RateSeries::new(pair.clone(), points);
        cache.put_series(series.clone(), period).await;
        series
    }
}

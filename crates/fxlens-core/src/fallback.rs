//! Local rate tiers: the compiled-in fallback table and synthetic generation.

use time::{Date, Duration as DateDuration};

use crate::domain::round_to;
use crate::random::RandomSource;
use crate::{CurrencyCode, CurrencyPair, Provenance, RateSeries, SeriesPoint};

/// Fixed rates for major pairs, keyed by `BASE_TARGET`.
pub const FALLBACK_RATES: &[(&str, f64)] = &[
    ("USD_EUR", 0.92),
    ("USD_RUB", 95.0),
    ("USD_GBP", 0.79),
    ("USD_JPY", 150.0),
    ("USD_CNY", 7.25),
    ("USD_CHF", 0.90),
    ("USD_CAD", 1.35),
    ("USD_AUD", 1.55),
    ("USD_TRY", 32.5),
    ("EUR_USD", 1.09),
    ("EUR_RUB", 103.5),
    ("EUR_GBP", 0.86),
    ("EUR_JPY", 163.0),
    ("EUR_CHF", 0.98),
    ("RUB_USD", 0.0105),
    ("RUB_EUR", 0.0097),
    ("RUB_CNY", 0.076),
    ("GBP_USD", 1.27),
    ("GBP_EUR", 1.16),
    ("GBP_JPY", 190.0),
    ("JPY_USD", 0.0067),
    ("CNY_USD", 0.138),
    ("CHF_USD", 1.11),
];

/// Units of each currency per one USD, used to derive cross rates.
pub const REFERENCE_RATES: &[(&str, f64)] = &[
    ("USD", 1.0),
    ("EUR", 0.92),
    ("RUB", 95.0),
    ("GBP", 0.79),
    ("JPY", 150.0),
    ("CNY", 7.25),
    ("CHF", 0.90),
    ("CAD", 1.35),
    ("AUD", 1.55),
    ("TRY", 32.5),
];

/// Relative amplitude of one random-walk step.
const WALK_STEP: f64 = 0.02;
/// Maximum relative drift of the pure synthesis path.
const SYNTHETIC_DRIFT: f64 = 0.015;

pub fn fallback_rate(pair: &CurrencyPair) -> Option<f64> {
    let key = pair.key();
    FALLBACK_RATES
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map(|(_, rate)| *rate)
}

fn reference(code: &CurrencyCode) -> Option<f64> {
    REFERENCE_RATES
        .iter()
        .find(|(candidate, _)| *candidate == code.as_str())
        .map(|(_, rate)| *rate)
}

/// Cross rate over the reference table, rounded to 4 decimals.
pub fn reference_rate(pair: &CurrencyPair) -> Option<f64> {
    let base = reference(pair.base())?;
    let target = reference(pair.target())?;
    Some(round_to(target / base, 4))
}

/// Plausible rate for any pair: the reference cross rate, or uniform in `[1, 3)`.
pub fn synthetic_rate(pair: &CurrencyPair, random: &RandomSource) -> f64 {
    reference_rate(pair).unwrap_or_else(|| random.uniform(1.0, 3.0))
}

/// `previous + previous * U * 0.02` with `U` uniform in `[-0.5, 0.5)`.
pub fn random_walk_step(previous: f64, random: &RandomSource) -> f64 {
    let u = random.unit() - 0.5;
    previous + previous * u * WALK_STEP
}

/// Fully synthetic series ending at `today` with value `anchor`.
///
/// The point `i` days before today drifts from the anchor by at most
/// 1.5 % scaled by `i / (days - 1)`: the oldest point may move the full 1.5 %
/// and the allowed drift shrinks linearly to zero at today, so the series
/// runs into the anchor without a jump on the last day.
pub fn synthesize_series(
    pair: &CurrencyPair,
    days: usize,
    anchor: f64,
    today: Date,
    random: &RandomSource,
) -> RateSeries {
    let points = (0..days)
        .rev()
        .map(|i| {
            let date = today - DateDuration::days(i as i64);
            if i == 0 {
                return SeriesPoint::new(date, anchor, Provenance::Synthetic);
            }
            let scale = i as f64 / (days - 1) as f64;
            let change = (random.unit() - 0.5) * SYNTHETIC_DRIFT * 2.0;
            let rate = round_to(anchor * (1.0 + change * scale), 4);
            SeriesPoint::new(date, rate, Provenance::Synthetic)
        })
        .collect();
    RateSeries::new(pair.clone(), points)
}

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use time::Date;

use super::calendar::{self, format_label};
use super::timestamp::UtcDateTime;
use super::currency::CurrencyPair;
use crate::ValidationError;

/// Resolution tier that produced a rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Provenance {
    Live,
    FallbackTable,
    Synthetic,
}

impl Provenance {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::FallbackTable => "fallback-table",
            Self::Synthetic => "synthetic",
        }
    }

    /// Whether the value came from the remote source rather than local data.
    pub const fn is_live(self) -> bool {
        matches!(self, Self::Live)
    }
}

impl Display for Provenance {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved current exchange rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateQuote {
    pub pair: CurrencyPair,
    pub rate: f64,
    pub as_of: UtcDateTime,
    pub provenance: Provenance,
}

impl RateQuote {
    pub fn new(
        pair: CurrencyPair,
        rate: f64,
        as_of: UtcDateTime,
        provenance: Provenance,
    ) -> Self {
        Self {
            pair,
            rate,
            as_of,
            provenance,
        }
    }

    /// Amount in the target currency, rounded to cents.
    pub fn convert(&self, amount: f64) -> f64 {
        round_to(amount * self.rate, 2)
    }
}

/// Number of calendar days covered by a series, today included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct Period(usize);

impl Period {
    pub const WEEK: Self = Self(7);
    pub const MONTH: Self = Self(30);
    /// Longest series that can be requested.
    pub const MAX_DAYS: usize = 366;

    pub fn new(days: usize) -> Result<Self, ValidationError> {
        if days == 0 || days > Self::MAX_DAYS {
            return Err(ValidationError::InvalidPeriod { days });
        }
        Ok(Self(days))
    }

    pub const fn days(self) -> usize {
        self.0
    }
}

impl Default for Period {
    fn default() -> Self {
        Self::WEEK
    }
}

impl TryFrom<usize> for Period {
    type Error = ValidationError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Period> for usize {
    fn from(value: Period) -> Self {
        value.0
    }
}

/// One dated value in a rate series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    #[serde(with = "calendar::serde_date")]
    pub date: Date,
    pub label: String,
    pub rate: f64,
    pub provenance: Provenance,
}

impl SeriesPoint {
    pub fn new(date: Date, rate: f64, provenance: Provenance) -> Self {
        Self {
            date,
            label: format_label(date),
            rate,
            provenance,
        }
    }
}

/// Chronologically ascending daily rates; the last point is today.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSeries {
    pub pair: CurrencyPair,
    pub points: Vec<SeriesPoint>,
}

impl RateSeries {
    pub fn new(pair: CurrencyPair, mut points: Vec<SeriesPoint>) -> Self {
        points.sort_by_key(|point| point.date);
        Self { pair, points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn rates(&self) -> Vec<f64> {
        self.points.iter().map(|point| point.rate).collect()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.points.iter().map(|point| point.label.as_str()).collect()
    }

    pub fn latest(&self) -> Option<&SeriesPoint> {
        self.points.last()
    }
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Month;

    fn pair() -> CurrencyPair {
        CurrencyPair::parse("USD", "EUR").expect("valid pair")
    }

    #[test]
    fn provenance_serializes_as_kebab_case() {
        let json = serde_json::to_string(&Provenance::FallbackTable).expect("serialize");
        assert_eq!(json, "\"fallback-table\"");
        assert_eq!(Provenance::Synthetic.to_string(), "synthetic");
    }

    #[test]
    fn period_rejects_zero_days() {
        assert_eq!(Period::new(0), Err(ValidationError::InvalidPeriod { days: 0 }));
        assert_eq!(Period::default().days(), 7);
        assert_eq!(Period::MONTH.days(), 30);
    }

    #[test]
    fn period_is_capped_at_a_leap_year() {
        assert_eq!(Period::new(366).map(Period::days), Ok(366));
        assert_eq!(
            Period::new(367),
            Err(ValidationError::InvalidPeriod { days: 367 })
        );
        assert_eq!(
            Period::new(5_000_000),
            Err(ValidationError::InvalidPeriod { days: 5_000_000 })
        );
        assert!(serde_json::from_str::<Period>("400").is_err());
    }

    #[test]
    fn series_orders_points_by_date() {
        let day = |d| Date::from_calendar_date(2024, Month::May, d).expect("valid date");
        let series = RateSeries::new(
            pair(),
            vec![
                SeriesPoint::new(day(3), 0.93, Provenance::Live),
                SeriesPoint::new(day(1), 0.91, Provenance::Synthetic),
                SeriesPoint::new(day(2), 0.92, Provenance::Live),
            ],
        );

        assert_eq!(series.rates(), vec![0.91, 0.92, 0.93]);
        assert_eq!(series.labels(), vec!["01.05", "02.05", "03.05"]);
    }

    #[test]
    fn conversion_rounds_to_cents() {
        let quote = RateQuote::new(pair(), 0.9234, UtcDateTime::now(), Provenance::Live);
        assert_eq!(quote.convert(100.0), 92.34);
        assert_eq!(quote.convert(1.0), 0.92);
    }
}

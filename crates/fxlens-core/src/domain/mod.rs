//! # Domain Models
//!
//! Canonical value types for exchange-rate resolution.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`CurrencyCode`] | Validated 3-letter currency code |
//! | [`CurrencyPair`] | Ordered (base, target) pair, base != target |
//! | [`Provenance`] | Tier that produced a rate (live, fallback-table, synthetic) |
//! | [`RateQuote`] | Current rate with timestamp and provenance |
//! | [`Period`] | Number of days covered by a series |
//! | [`SeriesPoint`] | One dated rate |
//! | [`RateSeries`] | Ascending daily rates ending today |
//!
//! Construction validates invariants, so a [`CurrencyPair`] with equal codes
//! cannot reach the resolution pipeline:
//!
//! ```rust
//! use fxlens_core::{CurrencyPair, ValidationError};
//!
//! let err = CurrencyPair::parse("USD", "usd").unwrap_err();
//! assert!(matches!(err, ValidationError::InvalidPair { .. }));
//! ```

pub mod calendar;
mod currency;
mod models;
mod timestamp;

pub use currency::{CurrencyCode, CurrencyPair, SUPPORTED_CURRENCIES};
pub use models::{Period, Provenance, RateQuote, RateSeries, SeriesPoint};
pub(crate) use models::round_to;
pub use timestamp::UtcDateTime;

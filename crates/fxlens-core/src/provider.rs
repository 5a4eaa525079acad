//! Remote rate provider contract.
//!
//! A [`RateProvider`] answers two questions for a [`CurrencyPair`]: what is the
//! latest rate, and what was the rate on a given calendar day. Every failure is
//! reported as a [`SourceError`]; callers in [`crate::rate_source`] and
//! [`crate::history`] absorb these errors by dropping to the next tier, so
//! nothing above them ever sees a remote failure.

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use serde::Serialize;
use time::Date;

use crate::{CurrencyPair, UtcDateTime};

/// Adapter-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    /// Transport failure, non-2xx status or open circuit.
    Unavailable,
    /// The response arrived but did not contain a usable rate.
    MalformedPayload,
    /// The pair has no rate at the source.
    MissingRate,
}

/// A transient failure of the remote tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
}

impl SourceError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Unavailable,
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::MalformedPayload,
            message: message.into(),
        }
    }

    pub fn missing_rate(pair: &CurrencyPair) -> Self {
        Self {
            kind: SourceErrorKind::MissingRate,
            message: format!("no rate for '{}' under '{}'", pair.target(), pair.base()),
        }
    }

    /// The remote answered 404 for this pair and version.
    pub fn not_published(pair: &CurrencyPair, version: &str) -> Self {
        Self {
            kind: SourceErrorKind::MissingRate,
            message: format!("no '{pair}' rate published for {version}"),
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::Unavailable => "source.unavailable",
            SourceErrorKind::MalformedPayload => "source.malformed_payload",
            SourceErrorKind::MissingRate => "source.missing_rate",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

/// A rate as reported by the remote source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RemoteRate {
    pub rate: f64,
    /// Day the source says the rate belongs to, when it reports one.
    pub date: Option<Date>,
}

impl RemoteRate {
    pub fn new(rate: f64, date: Option<Date>) -> Self {
        Self { rate, date }
    }

    /// Observation time: start of the reported day, or now.
    pub fn as_of(&self) -> UtcDateTime {
        self.date.map_or_else(UtcDateTime::now, UtcDateTime::start_of)
    }
}

pub type ProviderFuture<'a> = Pin<Box<dyn Future<Output = Result<RemoteRate, SourceError>> + Send + 'a>>;

/// Remote quote source.
///
/// Implementations must be `Send + Sync`; a single instance is shared by the
/// current-rate and history resolvers, which may run concurrently.
pub trait RateProvider: Send + Sync {
    /// Short identifier used in logs.
    fn id(&self) -> &'static str;

    /// Latest published rate for the pair.
    fn latest<'a>(&'a self, pair: &'a CurrencyPair) -> ProviderFuture<'a>;

    /// Rate published for a specific calendar day.
    fn on_date<'a>(&'a self, pair: &'a CurrencyPair, date: Date) -> ProviderFuture<'a>;
}

/// Outcome of a connectivity probe against the remote source.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ApiStatus {
    Connected { sample_rate: f64 },
    Degraded { reason: String },
}

/// Fetch the latest USD/EUR rate to report whether the provider is reachable.
pub async fn probe(provider: &dyn RateProvider) -> ApiStatus {
    let pair = match CurrencyPair::parse("USD", "EUR") {
        Ok(pair) => pair,
        Err(error) => {
            return ApiStatus::Degraded {
                reason: error.to_string(),
            }
        }
    };

    match provider.latest(&pair).await {
        Ok(rate) => ApiStatus::Connected {
            sample_rate: rate.rate,
        },
        Err(error) => ApiStatus::Degraded {
            reason: error.to_string(),
        },
    }
}

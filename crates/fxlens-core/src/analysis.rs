//! End-to-end analysis of a currency pair.
//!
//! [`Analyzer::analyze`] validates the request, resolves the current quote and
//! the history series concurrently, reduces the series to [`Statistics`] and
//! optionally records the conversion with a [`ConversionStore`].

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::adapters::CurrencyApiAdapter;
use crate::cache::RateCache;
use crate::config::ResolverConfig;
use crate::error::{CoreError, PersistenceError, ValidationError};
use crate::history::HistorySeries;
use crate::http_client::{HttpClient, OfflineHttpClient, ReqwestHttpClient};
use crate::provider::{self, ApiStatus, RateProvider};
use crate::random::RandomSource;
use crate::rate_source::RateSource;
use crate::statistics::{compute_stats, Statistics};
use crate::store::ConversionStore;
use crate::{CurrencyPair, Period, RateQuote, RateSeries};

/// Input of one analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub base: String,
    pub target: String,
    pub amount: f64,
    pub period: Period,
    pub user_id: Option<String>,
}

impl AnalysisRequest {
    pub fn new(base: impl Into<String>, target: impl Into<String>, amount: f64, period: Period) -> Self {
        Self {
            base: base.into(),
            target: target.into(),
            amount,
            period,
            user_id: None,
        }
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
}

/// Statistics outcome; a short series is a state, not a failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum StatsState {
    Ready(Statistics),
    InsufficientData { len: usize },
}

impl StatsState {
    pub fn statistics(&self) -> Option<&Statistics> {
        match self {
            Self::Ready(statistics) => Some(statistics),
            Self::InsufficientData { .. } => None,
        }
    }
}

/// Result handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub quote: RateQuote,
    pub amount: f64,
    pub converted_amount: f64,
    pub series: RateSeries,
    pub statistics: StatsState,
    /// Id of the recorded conversion, when one was stored.
    pub conversion_id: Option<String>,
    pub warnings: Vec<String>,
}

/// Validated conversion of `amount` at the quote's rate, rounded to cents.
pub fn convert(amount: f64, quote: &RateQuote) -> Result<f64, ValidationError> {
    validate_amount(amount)?;
    Ok(quote.convert(amount))
}

fn validate_amount(amount: f64) -> Result<f64, ValidationError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(ValidationError::InvalidAmount {
            value: amount.to_string(),
        });
    }
    Ok(amount)
}

/// Session-scoped resolution pipeline.
#[derive(Clone)]
pub struct Analyzer {
    history: HistorySeries,
    store: Option<Arc<dyn ConversionStore>>,
}

impl Analyzer {
    pub fn new(history: HistorySeries, store: Option<Arc<dyn ConversionStore>>) -> Self {
        Self { history, store }
    }

    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    pub fn rate_source(&self) -> &RateSource {
        self.history.source()
    }

    pub fn history(&self) -> &HistorySeries {
        &self.history
    }

    pub fn store(&self) -> Option<&dyn ConversionStore> {
        self.store.as_deref()
    }

    pub async fn resolve_current(&self, pair: &CurrencyPair) -> RateQuote {
        self.rate_source().resolve_current(pair).await
    }

    pub async fn resolve_series(&self, pair: &CurrencyPair, period: Period) -> RateSeries {
        self.history.resolve_series(pair, period).await
    }

    /// Probe the configured provider.
    pub async fn probe(&self) -> ApiStatus {
        provider::probe(self.rate_source().provider()).await
    }

    pub async fn analyze(&self, request: AnalysisRequest) -> Result<Analysis, CoreError> {
        let pair = CurrencyPair::parse(&request.base, &request.target)?;
        let amount = validate_amount(request.amount)?;
        let user_id = match request.user_id.as_deref().map(str::trim) {
            Some("") => return Err(ValidationError::EmptyUserId.into()),
            other => other,
        };

        let (quote, series) = tokio::join!(
            self.resolve_current(&pair),
            self.resolve_series(&pair, request.period)
        );

        let statistics = match compute_stats(&series.rates()) {
            Ok(statistics) => StatsState::Ready(statistics),
            Err(insufficient) => {
                debug!(pair = %pair, len = insufficient.len, "series too short for statistics");
                StatsState::InsufficientData {
                    len: insufficient.len,
                }
            }
        };

        let converted_amount = quote.convert(amount);
        let mut warnings = Vec::new();
        let mut conversion_id = None;

        match (user_id, self.store.clone()) {
            (Some(user_id), Some(store)) => {
                let user_id = user_id.to_string();
                let record_pair = pair.clone();
                // Stores may do blocking I/O (DuckDB), keep it off the async workers.
                let recorded = tokio::task::spawn_blocking(move || {
                    store.add_conversion(&user_id, &record_pair, amount, converted_amount)
                })
                .await
                .unwrap_or_else(|join_error| {
                    Err(PersistenceError::new(format!("store task failed: {join_error}")))
                });

                match recorded {
                    Ok(id) => conversion_id = Some(id),
                    Err(error) => {
                        warn!(pair = %pair, error = %error, "failed to record conversion");
                        warnings.push(format!("conversion not recorded: {}", error.message()));
                    }
                }
            }
            (Some(_), None) => debug!("no conversion store configured, skipping record"),
            (None, _) => {}
        }

        Ok(Analysis {
            quote,
            amount,
            converted_amount,
            series,
            statistics,
            conversion_id,
            warnings,
        })
    }
}

/// Builder wiring an [`Analyzer`] from configuration.
///
/// ```rust
/// use fxlens_core::{AnalysisRequest, Analyzer, Period, Provenance};
///
/// # tokio_test_block(async {
/// let analyzer = Analyzer::builder().with_offline(true).with_seed(7).build();
/// let analysis = analyzer
///     .analyze(AnalysisRequest::new("USD", "EUR", 100.0, Period::WEEK))
///     .await
///     .unwrap();
/// assert_eq!(analysis.quote.provenance, Provenance::FallbackTable);
/// assert_eq!(analysis.converted_amount, 92.0);
/// # });
/// # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(f)
/// # }
/// ```
#[derive(Default)]
pub struct AnalyzerBuilder {
    config: Option<ResolverConfig>,
    offline: bool,
    seed: Option<u64>,
    http_client: Option<Arc<dyn HttpClient>>,
    provider: Option<Arc<dyn RateProvider>>,
    store: Option<Arc<dyn ConversionStore>>,
}

impl AnalyzerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Use a transport that never reaches the network.
    pub fn with_offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_http_client(mut self, http_client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(http_client);
        self
    }

    /// Replace the remote adapter entirely. Takes precedence over the HTTP client.
    pub fn with_provider(mut self, provider: Arc<dyn RateProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn with_store(mut self, store: Arc<dyn ConversionStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn build(self) -> Analyzer {
        let config = self.config.unwrap_or_else(ResolverConfig::from_env);

        let provider = self.provider.unwrap_or_else(|| {
            let http_client: Arc<dyn HttpClient> = if self.offline {
                Arc::new(OfflineHttpClient)
            } else {
                self.http_client
                    .unwrap_or_else(|| Arc::new(ReqwestHttpClient::new()))
            };
            Arc::new(
                CurrencyApiAdapter::with_http_client(http_client)
                    .base_url(config.api_base_url.clone())
                    .timeout_ms(config.request_timeout_ms)
                    .circuit_breaker(config.circuit_breaker),
            )
        });

        let random = Arc::new(match self.seed {
            Some(seed) => RandomSource::from_seed(seed),
            None => RandomSource::new(),
        });

        let source = RateSource::new(provider, RateCache::new(config.cache_ttl), random);
        Analyzer::new(HistorySeries::new(source), self.store)
    }
}

//! # fxlens Core
//!
//! Exchange-rate resolution with tiered fallback, caching and descriptive
//! statistics.
//!
//! ## Overview
//!
//! - **Current rates** resolve through cache, live remote quote, fallback
//!   table and synthetic generation, in that order. Resolution never fails;
//!   every quote carries the [`Provenance`] of the tier that produced it.
//! - **History series** cover a [`Period`] of days ending today, filling gaps
//!   with a bounded random walk.
//! - **Statistics** reduce a series to min, max, mean, endpoint change and a
//!   mean relative step.
//! - **Analysis** joins the above and optionally records the conversion.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Remote provider adapters (currency API) |
//! | [`analysis`] | Analyzer pipeline and report types |
//! | [`cache`] | TTL cache for quotes and series |
//! | [`circuit_breaker`] | Circuit breaker for the remote tier |
//! | [`config`] | Resolver configuration |
//! | [`domain`] | Currency codes, pairs, quotes and series |
//! | [`error`] | Core error types |
//! | [`fallback`] | Fallback table and synthetic rate generation |
//! | [`history`] | Daily series resolution |
//! | [`http_client`] | HTTP client abstraction |
//! | [`provider`] | Remote provider contract |
//! | [`random`] | Seedable random source |
//! | [`rate_source`] | Current rate resolution |
//! | [`statistics`] | Series statistics |
//! | [`store`] | Conversion history collaborator |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fxlens_core::{AnalysisRequest, Analyzer, Period};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let analyzer = Analyzer::builder().build();
//!     let analysis = analyzer
//!         .analyze(AnalysisRequest::new("USD", "EUR", 100.0, Period::WEEK))
//!         .await?;
//!
//!     println!(
//!         "100 USD = {:.2} EUR ({})",
//!         analysis.converted_amount, analysis.quote.provenance
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  CLI / Caller   │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │    Analyzer     │────▶│ Conversion Store │
//! └────────┬────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ History Series  │────▶│    Rate Cache    │
//! │  Rate Source    │     └──────────────────┘
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │  Rate Provider  │────▶│ Circuit Breaker  │
//! │ (currency api)  │     │   HTTP Client    │
//! └─────────────────┘     └──────────────────┘
//! ```

pub mod adapters;
pub mod analysis;
pub mod cache;
pub mod circuit_breaker;
pub mod config;
pub mod domain;
pub mod error;
pub mod fallback;
pub mod history;
pub mod http_client;
pub mod provider;
pub mod random;
pub mod rate_source;
pub mod statistics;
pub mod store;

// Adapters
pub use adapters::CurrencyApiAdapter;

// Analysis pipeline
pub use analysis::{convert, Analysis, AnalysisRequest, Analyzer, AnalyzerBuilder, StatsState};

// Caching
pub use cache::{CacheTtl, RateCache, TtlClass};

// Circuit breaker
pub use circuit_breaker::{CircuitBreaker, CircuitBreakerConfig, CircuitState};

pub use config::ResolverConfig;

// Domain models
pub use domain::{
    CurrencyCode, CurrencyPair, Period, Provenance, RateQuote, RateSeries, SeriesPoint,
    UtcDateTime, SUPPORTED_CURRENCIES,
};

// Error types
pub use error::{CoreError, InsufficientData, PersistenceError, ValidationError};

// HTTP client types
pub use http_client::{
    HttpClient, HttpError, HttpRequest, HttpResponse, OfflineHttpClient, ReqwestHttpClient,
};

// Provider contract
pub use provider::{ApiStatus, RateProvider, RemoteRate, SourceError, SourceErrorKind};

pub use random::RandomSource;

// Resolvers
pub use history::HistorySeries;
pub use rate_source::RateSource;

pub use statistics::{compute_stats, Statistics};

// Persistence (re-exported from fxlens-warehouse)
pub use fxlens_warehouse::{
    ConversionRecord, FavoritePair, Warehouse, WarehouseConfig, WarehouseError,
    DEFAULT_HISTORY_LIMIT,
};
pub use store::ConversionStore;

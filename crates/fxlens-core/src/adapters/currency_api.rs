use std::sync::Arc;

use serde_json::Value;
use time::Date;
use tracing::debug;

use crate::circuit_breaker::{CircuitBreaker, CircuitBreakerConfig};
use crate::domain::calendar::{format_api_date, parse_api_date};
use crate::http_client::{HttpClient, HttpRequest, OfflineHttpClient};
use crate::provider::{ProviderFuture, RateProvider, RemoteRate, SourceError};
use crate::CurrencyPair;

pub const DEFAULT_BASE_URL: &str = "https://cdn.jsdelivr.net/npm/@fawazahmed0/currency-api@1";

/// Adapter for the free jsDelivr-hosted currency API.
///
/// Paths look like `{base_url}/{latest|YYYY-MM-DD}/currencies/{base}/{target}.json`
/// with lowercase codes.
#[derive(Clone)]
pub struct CurrencyApiAdapter {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
    timeout_ms: u64,
    circuit_breaker: Arc<CircuitBreaker>,
}

impl Default for CurrencyApiAdapter {
    fn default() -> Self {
        Self {
            http_client: Arc::new(OfflineHttpClient),
            base_url: String::from(DEFAULT_BASE_URL),
            timeout_ms: 3_000,
            circuit_breaker: Arc::new(CircuitBreaker::default()),
        }
    }
}

impl CurrencyApiAdapter {
    pub fn with_http_client(http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client,
            ..Self::default()
        }
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn circuit_breaker(mut self, config: CircuitBreakerConfig) -> Self {
        self.circuit_breaker = Arc::new(CircuitBreaker::new(config));
        self
    }

    pub fn breaker(&self) -> &CircuitBreaker {
        &self.circuit_breaker
    }

    fn endpoint(&self, pair: &CurrencyPair, date: Option<Date>) -> String {
        let version = date.map_or_else(|| String::from("latest"), format_api_date);
        format!(
            "{}/{}/currencies/{}/{}.json",
            self.base_url,
            version,
            pair.base().to_lowercase(),
            pair.target().to_lowercase()
        )
    }

    async fn fetch(&self, pair: &CurrencyPair, date: Option<Date>) -> Result<RemoteRate, SourceError> {
        if !self.circuit_breaker.allow_request() {
            return Err(SourceError::unavailable("currency api circuit breaker is open"));
        }

        let url = self.endpoint(pair, date);
        debug!(%url, "requesting rate");
        let request = HttpRequest::get(url)
            .with_header("accept", "application/json")
            .with_timeout_ms(self.timeout_ms);

        let response = self.http_client.execute(request).await.map_err(|e| {
            self.circuit_breaker.record_failure();
            SourceError::unavailable(format!("currency api transport error: {}", e.message()))
        })?;

        // Only server-side failures count against the breaker. A 404 means the
        // remote is up but has nothing published for that path.
        if response.status >= 500 {
            self.circuit_breaker.record_failure();
            return Err(SourceError::unavailable(format!(
                "currency api returned status {}",
                response.status
            )));
        }

        self.circuit_breaker.record_success();
        if response.status == 404 {
            let version = date.map_or_else(|| String::from("latest"), format_api_date);
            return Err(SourceError::not_published(pair, &version));
        }
        if !response.is_success() {
            return Err(SourceError::unavailable(format!(
                "currency api returned status {}",
                response.status
            )));
        }

        parse_rate_payload(&response.body, pair)
    }
}

impl RateProvider for CurrencyApiAdapter {
    fn id(&self) -> &'static str {
        "currency-api"
    }

    fn latest<'a>(&'a self, pair: &'a CurrencyPair) -> ProviderFuture<'a> {
        Box::pin(self.fetch(pair, None))
    }

    fn on_date<'a>(&'a self, pair: &'a CurrencyPair, date: Date) -> ProviderFuture<'a> {
        Box::pin(self.fetch(pair, Some(date)))
    }
}

/// Extract the target rate from either `{"eur": 0.92}` or `{"usd": {"eur": 0.92}}`.
fn parse_rate_payload(body: &str, pair: &CurrencyPair) -> Result<RemoteRate, SourceError> {
    let payload: Value = serde_json::from_str(body)
        .map_err(|e| SourceError::malformed(format!("failed to parse currency api response: {e}")))?;
    if !payload.is_object() {
        return Err(SourceError::malformed("currency api response is not an object"));
    }

    let base = pair.base().to_lowercase();
    let target = pair.target().to_lowercase();
    let raw = payload
        .get(&target)
        .or_else(|| payload.get(&base).and_then(|nested| nested.get(&target)))
        .ok_or_else(|| SourceError::missing_rate(pair))?;

    let rate = match raw {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
    .ok_or_else(|| SourceError::malformed(format!("rate for '{target}' is not numeric")))?;

    if !rate.is_finite() || rate <= 0.0 {
        return Err(SourceError::malformed(format!(
            "rate for '{target}' must be positive, got {rate}"
        )));
    }

    let date = payload
        .get("date")
        .and_then(Value::as_str)
        .and_then(parse_api_date);

    Ok(RemoteRate::new(rate, date))
}

use std::time::Duration;

use crate::adapters::DEFAULT_BASE_URL;
use crate::cache::CacheTtl;
use crate::circuit_breaker::CircuitBreakerConfig;

pub const API_BASE_URL_ENV: &str = "FXLENS_API_BASE_URL";

/// Settings for the resolution pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolverConfig {
    pub cache_ttl: CacheTtl,
    pub api_base_url: String,
    pub request_timeout_ms: u64,
    pub circuit_breaker: CircuitBreakerConfig,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            cache_ttl: CacheTtl::default(),
            api_base_url: String::from(DEFAULT_BASE_URL),
            request_timeout_ms: 3_000,
            circuit_breaker: CircuitBreakerConfig::default(),
        }
    }
}

impl ResolverConfig {
    /// Defaults with `FXLENS_API_BASE_URL` applied when set and non-empty.
    pub fn from_env() -> Self {
        let config = Self::default();
        match std::env::var(API_BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => config.with_api_base_url(url.trim()),
            _ => config,
        }
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_request_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.request_timeout_ms = timeout_ms;
        self
    }

    pub fn with_current_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl.current = ttl;
        self
    }

    pub fn with_series_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl.series = ttl;
        self
    }

    pub fn with_circuit_breaker(mut self, config: CircuitBreakerConfig) -> Self {
        self.circuit_breaker = config;
        self
    }
}

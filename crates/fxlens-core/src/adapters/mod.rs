//! Remote rate provider adapters.

mod currency_api;

pub use currency_api::{CurrencyApiAdapter, DEFAULT_BASE_URL};

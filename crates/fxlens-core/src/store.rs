use fxlens_warehouse::{ConversionRecord, Warehouse};

use crate::error::PersistenceError;
use crate::CurrencyPair;

/// Conversion history collaborator used by the analyzer.
pub trait ConversionStore: Send + Sync {
    /// Record a conversion and return the stored id.
    fn add_conversion(
        &self,
        user_id: &str,
        pair: &CurrencyPair,
        amount: f64,
        result: f64,
    ) -> Result<String, PersistenceError>;

    /// Newest first, at most `limit` entries.
    fn conversion_history(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<ConversionRecord>, PersistenceError>;
}

impl ConversionStore for Warehouse {
    fn add_conversion(
        &self,
        user_id: &str,
        pair: &CurrencyPair,
        amount: f64,
        result: f64,
    ) -> Result<String, PersistenceError> {
        Ok(Warehouse::add_conversion(
            self,
            user_id,
            pair.base().as_str(),
            pair.target().as_str(),
            amount,
            result,
        )?)
    }

    fn conversion_history(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<ConversionRecord>, PersistenceError> {
        Ok(Warehouse::conversion_history(self, user_id, limit)?)
    }
}

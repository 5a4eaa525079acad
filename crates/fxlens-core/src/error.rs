use thiserror::Error;

/// Validation errors raised before any rate resolution happens.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("currency code cannot be empty")]
    EmptyCurrency,
    #[error("currency must be a 3-letter ISO code: '{value}'")]
    InvalidCurrency { value: String },
    #[error("base and target currency must differ: '{code}'")]
    InvalidPair { code: String },

    #[error("period must cover between 1 and 366 days, got {days}")]
    InvalidPeriod { days: usize },
    #[error("amount must be a finite, non-negative number: {value}")]
    InvalidAmount { value: String },

    #[error("user id cannot be empty")]
    EmptyUserId,
}

/// Returned by the statistics engine when a series cannot be reduced.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("not enough data for statistics: {len} point(s), need at least 2")]
pub struct InsufficientData {
    pub len: usize,
}

/// Failure reported by a conversion store collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("conversion store failed: {message}")]
pub struct PersistenceError {
    message: String,
}

impl PersistenceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<fxlens_warehouse::WarehouseError> for PersistenceError {
    fn from(error: fxlens_warehouse::WarehouseError) -> Self {
        Self::new(error.to_string())
    }
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

use tally_domain::MonthKeyError;
use thiserror::Error;
use uuid::Uuid;

/// Failures raised by ledger operations. None of them leave a partial change behind.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Category not found: {0}")]
    NotFound(Uuid),
    #[error("Invalid month key: {0}")]
    InvalidMonthKey(#[from] MonthKeyError),
}

pub type CoreResult<T> = Result<T, CoreError>;

/// Failures reported by an actuals feed.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Feed unavailable: {0}")]
    Unavailable(String),
    #[error("Feed returned malformed data: {0}")]
    Malformed(String),
}

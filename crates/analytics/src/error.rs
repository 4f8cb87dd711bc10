use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    /// Client-supplied values failed validation.
    #[error("{0}")]
    InvalidInput(String),

    /// The symbol is unknown, or the requested window holds no data.
    #[error("{0}")]
    NotFound(String),

    /// The price store failed to answer a query.
    #[error("Price store error: {0}")]
    Store(String),
}

impl From<CoreError> for AnalyticsError {
    fn from(err: CoreError) -> Self {
        AnalyticsError::InvalidInput(err.to_string())
    }
}

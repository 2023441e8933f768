//! Receipt store failure type.

use receipt_db::DbError;
use thiserror::Error;

/// Failure of the receipt store itself, as opposed to "no such receipt".
///
/// Never crosses the service facade: resolvers log it and answer
/// `{ success: false, error: "Failed to lookup receipt" }`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store cannot be reached (closed pool, exhausted pool, lost file).
    #[error("Receipt store unavailable: {0}")]
    Unavailable(String),

    /// The store was reached but the query failed.
    #[error("Receipt store query failed: {0}")]
    Query(String),
}

impl From<DbError> for StoreError {
    fn from(err: DbError) -> Self {
        if err.is_unavailable() {
            StoreError::Unavailable(err.to_string())
        } else {
            StoreError::Query(err.to_string())
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

//! Error types for the storage boundary

use thiserror::Error;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Failures crossing the storage boundary.
///
/// Only `NotFound` and `BadRequest` carry meaning for callers; everything
/// else (connectivity, driver faults, serialization) is folded into
/// `Database` and surfaces as a server error.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("no server matches the given id")]
    NotFound,

    #[error("malformed server id: {0}")]
    BadRequest(String),

    #[error("database error: {0}")]
    Database(String),
}

impl From<mongodb::error::Error> for StoreError {
    fn from(e: mongodb::error::Error) -> Self {
        StoreError::Database(e.to_string())
    }
}

//! Store errors

use thiserror::Error;

/// Account store errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Account does not exist
    #[error("account not found")]
    NotFound,

    /// Backend could not be reached or failed mid-request
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Result alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

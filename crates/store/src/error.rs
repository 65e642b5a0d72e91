//! Store operation errors.

use thiserror::Error;

use oficina_core::DomainError;

/// Failure while reading or writing a backing record.
///
/// Infrastructure failures (`Io`, `Serde`) are distinct from rejected input
/// (`Validation`); the conversion into [`DomainError`] keeps that split so
/// the HTTP layer can map them to 500 vs 400.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization failure: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("validation failed: {0}")]
    Validation(String),
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(msg) => DomainError::Validation(msg),
            other => DomainError::Storage(other.to_string()),
        }
    }
}

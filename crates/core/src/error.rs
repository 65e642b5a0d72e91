//! Failure taxonomy shared by every layer of the backend.

use thiserror::Error;

/// Result type used across the service layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Typed failure surfaced to callers.
///
/// Every fallible operation returns one of these; nothing is silently
/// swallowed. Unexpected lower-level failures are wrapped into `Storage`
/// with the original message preserved for diagnostics.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Malformed or missing input. Recoverable by retrying with corrected
    /// input.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Duplicate email at registration.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Bad credentials at login. The message is deliberately identical for
    /// unknown email and wrong password.
    #[error("{0}")]
    Authentication(String),

    /// Missing, malformed, invalid or expired bearer token. The reason is
    /// never disclosed to the caller.
    #[error("unauthorized")]
    Unauthorized,

    /// Lookup miss by identifier.
    #[error("not found: {0}")]
    NotFound(String),

    /// Underlying storage was unreadable or unwritable. The message carries
    /// operator-facing detail; the HTTP layer maps it to a generic response.
    #[error("storage failure: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn authentication(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}

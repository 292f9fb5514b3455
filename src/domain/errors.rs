//! # Domain Errors
//!
//! Validation failures for user-supplied domain objects.
//!
//! Trade aggregation has no error path; these errors only cover inputs the
//! user edits directly, such as alert preferences and risk limits.

use thiserror::Error;

/// Error type for domain validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Email address is missing or malformed.
    #[error("invalid email: {0}")]
    InvalidEmail(String),

    /// A threshold or limit is out of range.
    #[error("invalid threshold: {field} - {reason}")]
    InvalidThreshold {
        /// Name of the offending field.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

impl DomainError {
    /// Creates an invalid email error.
    #[must_use]
    pub fn invalid_email(email: impl Into<String>) -> Self {
        Self::InvalidEmail(email.into())
    }

    /// Creates an invalid threshold error.
    #[must_use]
    pub fn invalid_threshold(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidThreshold {
            field,
            reason: reason.into(),
        }
    }
}

/// Result type for domain validation.
pub type DomainResult<T> = Result<T, DomainError>;

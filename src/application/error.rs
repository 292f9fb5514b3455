//! # Application Errors
//!
//! Error types for the application layer.
//!
//! These errors represent failures while loading trades and alert rules.
//! Alert delivery failures are reported through
//! [`DeliveryStatus`](crate::application::services::DeliveryStatus) instead.
//!
//! # Error Hierarchy
//!
//! ```text
//! ApplicationError
//! ├── Domain(DomainError)          - Invalid stored preferences or limits
//! └── Repository(RepositoryError)  - Store read or write failures
//! ```
//!
//! # Examples
//!
//! ```
//! use settlement_risk::application::error::ApplicationError;
//! use settlement_risk::domain::errors::DomainError;
//! use settlement_risk::infrastructure::persistence::RepositoryError;
//!
//! let err: ApplicationError = DomainError::invalid_email("nobody").into();
//! assert!(err.is_validation());
//!
//! let err: ApplicationError = RepositoryError::connection("reset").into();
//! assert!(err.is_retryable());
//! ```

use crate::domain::errors::DomainError;
use crate::infrastructure::persistence::RepositoryError;
use thiserror::Error;

/// Application layer error.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Stored alert rules failed validation.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// The store could not be read or written.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl ApplicationError {
    /// Returns true if this error is retryable.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Repository(e) => e.is_retryable(),
            Self::Domain(_) => false,
        }
    }

    /// Returns true if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Repository(e) if e.is_not_found())
    }

    /// Returns true if this is a validation error.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Domain(_))
    }
}

/// Result type for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_domain_error() {
        let app_err: ApplicationError = DomainError::invalid_email("nobody").into();
        assert!(app_err.to_string().contains("nobody"));
        assert!(app_err.is_validation());
        assert!(!app_err.is_retryable());
    }

    #[test]
    fn from_repository_error() {
        let app_err: ApplicationError = RepositoryError::connection("reset").into();
        assert!(app_err.to_string().contains("repository"));
        assert!(app_err.is_retryable());
        assert!(!app_err.is_validation());

        let app_err: ApplicationError = RepositoryError::not_found("Trade", "7").into();
        assert!(app_err.is_not_found());
        assert!(!app_err.is_retryable());
    }
}

//! # Store Errors
//!
//! Error types for the REST store client.
//!
//! # Examples
//!
//! ```
//! use settlement_risk::infrastructure::rest::error::StoreError;
//!
//! let error = StoreError::timeout("Request timed out after 10000ms");
//! assert!(error.is_retryable());
//!
//! let error = StoreError::authentication("Invalid API key");
//! assert!(!error.is_retryable());
//! ```

use crate::infrastructure::persistence::RepositoryError;
use thiserror::Error;

/// Error type for REST store operations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Request timed out.
    #[error("store timeout: {message}")]
    Timeout {
        /// Error message.
        message: String,
    },

    /// Network or connection error, or a 5xx answer.
    #[error("store connection error: {message}")]
    Connection {
        /// Error message.
        message: String,
    },

    /// Credentials rejected.
    #[error("store authentication error: {message}")]
    Authentication {
        /// Error message.
        message: String,
    },

    /// Rate limit exceeded.
    #[error("store rate limit exceeded: {message}")]
    RateLimited {
        /// Error message.
        message: String,
    },

    /// The store rejected the request.
    #[error("store invalid request: {message}")]
    InvalidRequest {
        /// Error message.
        message: String,
    },

    /// The response could not be decoded.
    #[error("store protocol error: {message}")]
    Protocol {
        /// Error message.
        message: String,
    },

    /// Client-side setup failure.
    #[error("store internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl StoreError {
    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates an authentication error.
    #[must_use]
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// Creates a rate limited error.
    #[must_use]
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::RateLimited {
            message: message.into(),
        }
    }

    /// Creates an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Creates a protocol error.
    #[must_use]
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this error is retryable.
    ///
    /// Retryable errors are transient and may succeed on retry.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. } | Self::Connection { .. } | Self::RateLimited { .. }
        )
    }

    /// Returns true if the request itself was at fault.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidRequest { .. } | Self::Authentication { .. }
        )
    }
}

impl From<StoreError> for RepositoryError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Timeout { message }
            | StoreError::Connection { message }
            | StoreError::RateLimited { message } => Self::Connection(message),
            StoreError::Authentication { message } => Self::Unauthorized(message),
            StoreError::InvalidRequest { message } => Self::Query(message),
            StoreError::Protocol { message } => Self::Serialization(message),
            StoreError::Internal { message } => Self::Internal(message),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

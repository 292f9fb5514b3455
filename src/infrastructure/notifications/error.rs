//! # Notification Errors
//!
//! Error types for alert delivery.

use thiserror::Error;

/// Error type for alert notifications.
#[derive(Debug, Clone, Error)]
pub enum NotificationError {
    /// No recipients configured.
    #[error("no alert recipients configured")]
    NoRecipients,

    /// A sender or recipient address could not be parsed.
    #[error("invalid email address '{address}': {message}")]
    InvalidAddress {
        /// The offending address.
        address: String,
        /// Parser message.
        message: String,
    },

    /// The message could not be assembled.
    #[error("failed to build alert email: {message}")]
    Build {
        /// Error message.
        message: String,
    },

    /// The mail server refused or dropped the message.
    #[error("alert delivery failed: {message}")]
    Transport {
        /// Error message.
        message: String,
        /// Whether a later attempt may succeed.
        transient: bool,
    },

    /// Missing or inconsistent notifier settings.
    #[error("notifier configuration error: {message}")]
    Configuration {
        /// Error message.
        message: String,
    },
}

impl NotificationError {
    /// Creates an invalid address error.
    #[must_use]
    pub fn invalid_address(address: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidAddress {
            address: address.into(),
            message: message.into(),
        }
    }

    /// Creates a build error.
    #[must_use]
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }

    /// Creates a transport error.
    #[must_use]
    pub fn transport(message: impl Into<String>, transient: bool) -> Self {
        Self::Transport {
            message: message.into(),
            transient,
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Returns true if sending again may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport { transient: true, .. })
    }
}

/// Result type for notification operations.
pub type NotificationResult<T> = Result<T, NotificationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_transient_transport_is_retryable() {
        assert!(NotificationError::transport("421 busy", true).is_retryable());
        assert!(!NotificationError::transport("550 rejected", false).is_retryable());
        assert!(!NotificationError::NoRecipients.is_retryable());
        assert!(!NotificationError::configuration("missing host").is_retryable());
    }

    #[test]
    fn display_names_address() {
        let err = NotificationError::invalid_address("ops@", "missing domain");
        assert_eq!(
            err.to_string(),
            "invalid email address 'ops@': missing domain"
        );
    }
}

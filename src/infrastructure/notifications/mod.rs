//! # Alert Notifications
//!
//! Delivery of evaluated alerts to people.
//!
//! - [`AlertNotifier`]: Delivery port
//! - [`SmtpAlertNotifier`]: Plain-text email over STARTTLS
//! - [`RecordingNotifier`]: Keeps digests in memory for tests and dry runs

pub mod email;
pub mod error;
pub mod memory;

pub use email::{SmtpAlertNotifier, SmtpConfig, alert_body, alert_subject};
pub use error::{NotificationError, NotificationResult};
pub use memory::RecordingNotifier;

use crate::domain::services::Alert;
use async_trait::async_trait;
use std::fmt;

/// Delivers a digest of alerts.
#[async_trait]
pub trait AlertNotifier: Send + Sync + fmt::Debug {
    /// Sends one digest covering `alerts`. Does nothing for an empty slice.
    ///
    /// # Errors
    ///
    /// Returns a `NotificationError` if the digest cannot be delivered.
    async fn notify(&self, alerts: &[Alert]) -> NotificationResult<()>;
}

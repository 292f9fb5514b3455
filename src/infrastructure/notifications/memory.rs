//! # Recording Notifier
//!
//! Keeps every digest in memory instead of sending it.

use crate::domain::services::Alert;
use crate::infrastructure::notifications::AlertNotifier;
use crate::infrastructure::notifications::error::{NotificationError, NotificationResult};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

/// Notifier that records digests, optionally failing every call.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    digests: Arc<Mutex<Vec<Vec<Alert>>>>,
    failure: Option<NotificationError>,
}

impl RecordingNotifier {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a recorder whose every call fails with `error`.
    #[must_use]
    pub fn failing(error: NotificationError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    /// Returns the recorded digests.
    #[must_use]
    pub fn digests(&self) -> Vec<Vec<Alert>> {
        self.digests.lock().clone()
    }

    /// Returns the number of recorded digests.
    #[must_use]
    pub fn digest_count(&self) -> usize {
        self.digests.lock().len()
    }
}

#[async_trait]
impl AlertNotifier for RecordingNotifier {
    async fn notify(&self, alerts: &[Alert]) -> NotificationResult<()> {
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        if !alerts.is_empty() {
            self.digests.lock().push(alerts.to_vec());
        }
        Ok(())
    }
}

//! # Alert Preferences
//!
//! Per-user notification thresholds and the desk-wide risk limits.

use crate::domain::errors::{DomainError, DomainResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default counterparty trade-count threshold.
pub const DEFAULT_COUNTERPARTY_TRADE_THRESHOLD: u64 = 10;

/// A user's alert settings.
///
/// An unsettled value threshold of zero disables the value alert; the
/// counterparty threshold defaults to
/// [`DEFAULT_COUNTERPARTY_TRADE_THRESHOLD`] trades.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertPreferences {
    /// Owner of the preferences, if scoped to a user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Address notifications are sent to.
    #[serde(default)]
    pub email: String,
    /// Alert when total unsettled value exceeds this amount.
    #[serde(default)]
    pub unsettled_trade_threshold: Decimal,
    /// Alert when trades with one counterparty exceed this count.
    #[serde(default = "default_counterparty_threshold")]
    pub counterparty_trade_threshold: u64,
}

fn default_counterparty_threshold() -> u64 {
    DEFAULT_COUNTERPARTY_TRADE_THRESHOLD
}

impl Default for AlertPreferences {
    fn default() -> Self {
        Self {
            user_id: None,
            email: String::new(),
            unsettled_trade_threshold: Decimal::ZERO,
            counterparty_trade_threshold: DEFAULT_COUNTERPARTY_TRADE_THRESHOLD,
        }
    }
}

impl AlertPreferences {
    /// Creates default preferences for a user.
    #[must_use]
    pub fn for_user(user_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            email: email.into(),
            ..Default::default()
        }
    }

    /// Sets the unsettled value threshold.
    #[must_use]
    pub fn with_unsettled_threshold(mut self, threshold: Decimal) -> Self {
        self.unsettled_trade_threshold = threshold;
        self
    }

    /// Sets the counterparty trade-count threshold.
    #[must_use]
    pub fn with_counterparty_threshold(mut self, threshold: u64) -> Self {
        self.counterparty_trade_threshold = threshold;
        self
    }

    /// Returns true if the unsettled value alert is enabled.
    #[must_use]
    pub fn value_alert_enabled(&self) -> bool {
        self.unsettled_trade_threshold > Decimal::ZERO
    }

    /// Checks the preferences before they are saved.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidEmail` if the address is blank or has no
    /// `@`, and `DomainError::InvalidThreshold` for a negative value threshold.
    pub fn validate(&self) -> DomainResult<()> {
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(DomainError::invalid_email(self.email.clone()));
        }
        if self.unsettled_trade_threshold.is_sign_negative() {
            return Err(DomainError::invalid_threshold(
                "unsettled_trade_threshold",
                "must not be negative",
            ));
        }
        Ok(())
    }
}

/// Desk-wide hard limits.
///
/// Every limit is optional; an unset limit is never breached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskLimits {
    /// Maximum number of open (unsettled) trades.
    #[serde(default)]
    pub max_unsettled_trades: Option<u64>,
    /// Maximum absolute exposure to a single counterparty.
    #[serde(default)]
    pub max_counterparty_exposure: Option<Decimal>,
    /// Maximum absolute value of a single open trade.
    #[serde(default)]
    pub max_single_trade_value: Option<Decimal>,
}

impl RiskLimits {
    /// Sets the open trade limit.
    #[must_use]
    pub fn with_max_unsettled_trades(mut self, limit: u64) -> Self {
        self.max_unsettled_trades = Some(limit);
        self
    }

    /// Sets the counterparty exposure limit.
    #[must_use]
    pub fn with_max_counterparty_exposure(mut self, limit: Decimal) -> Self {
        self.max_counterparty_exposure = Some(limit);
        self
    }

    /// Sets the single trade value limit.
    #[must_use]
    pub fn with_max_single_trade_value(mut self, limit: Decimal) -> Self {
        self.max_single_trade_value = Some(limit);
        self
    }

    /// Checks that no limit is negative.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidThreshold` naming the first negative limit.
    pub fn validate(&self) -> DomainResult<()> {
        if self
            .max_counterparty_exposure
            .is_some_and(|l| l.is_sign_negative())
        {
            return Err(DomainError::invalid_threshold(
                "max_counterparty_exposure",
                "must not be negative",
            ));
        }
        if self
            .max_single_trade_value
            .is_some_and(|l| l.is_sign_negative())
        {
            return Err(DomainError::invalid_threshold(
                "max_single_trade_value",
                "must not be negative",
            ));
        }
        Ok(())
    }
}

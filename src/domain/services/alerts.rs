//! # Alert Evaluation
//!
//! Pure threshold checks over a [`RiskMetrics`] snapshot.
//!
//! Two rule sources feed the evaluator:
//!
//! - [`AlertPreferences`]: a user's value and trade-count thresholds
//! - [`RiskLimits`]: desk-wide hard limits
//!
//! Every comparison is a strict "exceeds": a figure equal to its threshold
//! raises nothing.

use crate::domain::entities::{AlertPreferences, RiskLimits};
use crate::domain::services::metrics::RiskMetrics;
use crate::domain::value_objects::{AlertSeverity, CounterpartyName};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rule that produced an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    /// Total unsettled value above the user's threshold.
    UnsettledValue,
    /// Trades with one counterparty above the user's threshold.
    CounterpartyTradeCount,
    /// Open trade count above the desk limit.
    UnsettledTradeLimit,
    /// Counterparty exposure above the desk limit.
    CounterpartyExposureLimit,
    /// Single open trade above the desk limit.
    SingleTradeLimit,
}

impl AlertKind {
    /// Default severity for the rule.
    #[must_use]
    pub const fn severity(self) -> AlertSeverity {
        match self {
            Self::CounterpartyTradeCount => AlertSeverity::Medium,
            Self::UnsettledValue
            | Self::UnsettledTradeLimit
            | Self::CounterpartyExposureLimit
            | Self::SingleTradeLimit => AlertSeverity::High,
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::UnsettledValue => "unsettled_value",
            Self::CounterpartyTradeCount => "counterparty_trade_count",
            Self::UnsettledTradeLimit => "unsettled_trade_limit",
            Self::CounterpartyExposureLimit => "counterparty_exposure_limit",
            Self::SingleTradeLimit => "single_trade_limit",
        };
        write!(f, "{s}")
    }
}

/// A breached threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    /// Rule that fired.
    pub kind: AlertKind,
    /// Severity.
    pub severity: AlertSeverity,
    /// Short headline.
    pub title: String,
    /// Human-readable detail.
    pub description: String,
    /// Counterparty concerned, for per-counterparty rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counterparty: Option<CounterpartyName>,
    /// Observed figure.
    pub observed: Decimal,
    /// Threshold it exceeded.
    pub threshold: Decimal,
}

impl Alert {
    fn new(kind: AlertKind, title: impl Into<String>, observed: Decimal, threshold: Decimal) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            title: title.into(),
            description: String::new(),
            counterparty: None,
            observed,
            threshold,
        }
    }

    fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    fn with_counterparty(mut self, counterparty: CounterpartyName) -> Self {
        self.counterparty = Some(counterparty);
        self
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.title)?;
        if !self.description.is_empty() {
            write!(f, ": {}", self.description)?;
        }
        Ok(())
    }
}

/// Evaluates alert rules against metrics.
#[derive(Debug, Clone, Default)]
pub struct AlertEvaluator {
    preferences: Option<AlertPreferences>,
    limits: RiskLimits,
}

impl AlertEvaluator {
    /// Creates an evaluator with no rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a user's preference thresholds.
    #[must_use]
    pub fn with_preferences(mut self, preferences: AlertPreferences) -> Self {
        self.preferences = Some(preferences);
        self
    }

    /// Adds desk-wide limits.
    #[must_use]
    pub fn with_limits(mut self, limits: RiskLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Returns the preferences, if any.
    #[must_use]
    pub fn preferences(&self) -> Option<&AlertPreferences> {
        self.preferences.as_ref()
    }

    /// Returns every alert raised by `metrics`, most severe first.
    ///
    /// Alerts of equal severity keep rule order.
    #[must_use]
    pub fn evaluate(&self, metrics: &RiskMetrics) -> Vec<Alert> {
        let mut alerts = Vec::new();
        if let Some(prefs) = &self.preferences {
            self.check_preferences(prefs, metrics, &mut alerts);
        }
        self.check_limits(metrics, &mut alerts);
        alerts.sort_by(|a, b| b.severity.cmp(&a.severity));
        alerts
    }

    fn check_preferences(&self, prefs: &AlertPreferences, metrics: &RiskMetrics, out: &mut Vec<Alert>) {
        let total = metrics.summary.total_unsettled_value;
        if prefs.value_alert_enabled() && total > prefs.unsettled_trade_threshold {
            out.push(
                Alert::new(
                    AlertKind::UnsettledValue,
                    "Unsettled value threshold exceeded",
                    total,
                    prefs.unsettled_trade_threshold,
                )
                .with_description(format!(
                    "{} unsettled trades worth {} exceed the {} threshold",
                    metrics.summary.unsettled_trades, total, prefs.unsettled_trade_threshold
                )),
            );
        }

        let limit = prefs.counterparty_trade_threshold;
        for activity in metrics
            .counterparty_activity
            .iter()
            .filter(|a| a.total > limit)
        {
            out.push(
                Alert::new(
                    AlertKind::CounterpartyTradeCount,
                    format!("High activity with {}", activity.name),
                    Decimal::from(activity.total),
                    Decimal::from(limit),
                )
                .with_description(format!(
                    "{} trades with {} exceed the {} trade threshold",
                    activity.total, activity.name, limit
                ))
                .with_counterparty(activity.name.clone()),
            );
        }
    }

    fn check_limits(&self, metrics: &RiskMetrics, out: &mut Vec<Alert>) {
        if let Some(max) = self.limits.max_unsettled_trades {
            let open = metrics.summary.unsettled_trades;
            if open > max {
                out.push(
                    Alert::new(
                        AlertKind::UnsettledTradeLimit,
                        "Unsettled trade limit exceeded",
                        Decimal::from(open),
                        Decimal::from(max),
                    )
                    .with_description(format!("{open} open trades, limit {max}")),
                );
            }
        }

        if let Some(max) = self.limits.max_counterparty_exposure {
            for exposure in metrics
                .counterparty_exposure
                .iter()
                .filter(|e| e.amount > max)
            {
                out.push(
                    Alert::new(
                        AlertKind::CounterpartyExposureLimit,
                        format!("Exposure limit exceeded for {}", exposure.name),
                        exposure.amount,
                        max,
                    )
                    .with_description(format!(
                        "exposure {} to {} exceeds limit {}",
                        exposure.amount, exposure.name, max
                    ))
                    .with_counterparty(exposure.name.clone()),
                );
            }
        }

        if let Some(max) = self.limits.max_single_trade_value {
            for fail in metrics.open_trades.iter().take_while(|f| f.amount > max) {
                let id = fail
                    .id
                    .as_ref()
                    .map_or_else(|| "without id".to_string(), ToString::to_string);
                out.push(
                    Alert::new(AlertKind::SingleTradeLimit, "Single trade limit exceeded", fail.amount, max)
                        .with_description(format!(
                            "open trade {id} with {} worth {} exceeds limit {max}",
                            fail.counterparty, fail.amount
                        ))
                        .with_counterparty(fail.counterparty.clone()),
                );
            }
        }
    }
}

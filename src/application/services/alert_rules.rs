//! # Alert Rules
//!
//! Builds an [`AlertEvaluator`] from desk limits and a user's stored
//! preferences.

use crate::application::error::ApplicationResult;
use crate::domain::entities::RiskLimits;
use crate::domain::services::AlertEvaluator;
use crate::infrastructure::persistence::AlertPreferencesRepository;

/// Loads the alert rules for `user_id`.
///
/// Without a user, or when the user has no stored preferences, only the
/// desk limits apply.
///
/// # Errors
///
/// Returns `ApplicationError::Domain` if the limits or the stored
/// preferences are invalid, or `ApplicationError::Repository` if the
/// preferences cannot be read.
pub async fn load_alert_rules(
    preferences: &dyn AlertPreferencesRepository,
    user_id: Option<&str>,
    limits: RiskLimits,
) -> ApplicationResult<AlertEvaluator> {
    limits.validate()?;
    let evaluator = AlertEvaluator::new().with_limits(limits);

    let Some(user_id) = user_id else {
        return Ok(evaluator);
    };
    match preferences.get(user_id).await? {
        Some(prefs) => {
            prefs.validate()?;
            tracing::debug!(user_id, "loaded alert preferences");
            Ok(evaluator.with_preferences(prefs))
        }
        None => {
            tracing::warn!(user_id, "no stored alert preferences");
            Ok(evaluator)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::entities::AlertPreferences;
    use crate::infrastructure::persistence::in_memory::InMemoryAlertPreferencesRepository;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn stored_preferences_are_attached() {
        let repo = InMemoryAlertPreferencesRepository::new();
        repo.upsert(&AlertPreferences::for_user("u-1", "ops@desk.com"))
            .await
            .unwrap();

        let evaluator = load_alert_rules(&repo, Some("u-1"), RiskLimits::default())
            .await
            .unwrap();
        assert_eq!(evaluator.preferences().unwrap().email, "ops@desk.com");

        let evaluator = load_alert_rules(&repo, Some("u-2"), RiskLimits::default())
            .await
            .unwrap();
        assert!(evaluator.preferences().is_none());

        let evaluator = load_alert_rules(&repo, None, RiskLimits::default())
            .await
            .unwrap();
        assert!(evaluator.preferences().is_none());
    }

    #[tokio::test]
    async fn invalid_stored_preferences_are_rejected() {
        let repo = InMemoryAlertPreferencesRepository::new();
        repo.upsert(&AlertPreferences::for_user("u-1", "nobody"))
            .await
            .unwrap();

        let err = load_alert_rules(&repo, Some("u-1"), RiskLimits::default())
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn invalid_limits_are_rejected() {
        let repo = InMemoryAlertPreferencesRepository::new();
        let limits = RiskLimits::default().with_max_counterparty_exposure(Decimal::new(-1, 0));

        let err = load_alert_rules(&repo, None, limits).await.unwrap_err();
        assert!(err.is_validation());
    }
}

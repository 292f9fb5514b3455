//! # In-Memory Alert Preferences Repository
//!
//! Uses [`DashMap`] for thread-safe concurrent access, keyed by user id.

use crate::domain::entities::AlertPreferences;
use crate::infrastructure::persistence::traits::{
    AlertPreferencesRepository, RepositoryError, RepositoryResult,
};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// In-memory implementation of [`AlertPreferencesRepository`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryAlertPreferencesRepository {
    preferences: Arc<DashMap<String, AlertPreferences>>,
}

impl InMemoryAlertPreferencesRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of users with saved preferences.
    #[must_use]
    pub fn len(&self) -> usize {
        self.preferences.len()
    }

    /// Returns true if nothing is saved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.preferences.is_empty()
    }
}

#[async_trait]
impl AlertPreferencesRepository for InMemoryAlertPreferencesRepository {
    async fn get(&self, user_id: &str) -> RepositoryResult<Option<AlertPreferences>> {
        Ok(self.preferences.get(user_id).map(|entry| entry.value().clone()))
    }

    async fn upsert(&self, preferences: &AlertPreferences) -> RepositoryResult<()> {
        let user_id = preferences
            .user_id
            .clone()
            .ok_or_else(|| RepositoryError::query("alert preferences need a user id"))?;
        self.preferences.insert(user_id, preferences.clone());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn get_missing_is_none() {
        let repo = InMemoryAlertPreferencesRepository::new();
        assert!(repo.get("u-1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn upsert_inserts_then_replaces() {
        let repo = InMemoryAlertPreferencesRepository::new();
        let prefs = AlertPreferences::for_user("u-1", "ops@desk.com");
        repo.upsert(&prefs).await.unwrap();
        assert_eq!(repo.get("u-1").await.unwrap(), Some(prefs.clone()));

        let updated = prefs.with_unsettled_threshold(Decimal::new(5_000_000, 0));
        repo.upsert(&updated).await.unwrap();
        assert_eq!(repo.len(), 1);
        assert_eq!(
            repo.get("u-1").await.unwrap().unwrap().unsettled_trade_threshold,
            Decimal::new(5_000_000, 0)
        );
    }

    #[tokio::test]
    async fn upsert_requires_user_id() {
        let repo = InMemoryAlertPreferencesRepository::new();
        let err = repo.upsert(&AlertPreferences::default()).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Query(_)));
        assert!(repo.is_empty());
    }
}

//! # REST Store
//!
//! [`TradeSource`], [`SettlementFailSource`] and
//! [`AlertPreferencesRepository`] over a PostgREST-style HTTP API.
//!
//! Every request carries the API key twice, as the `apikey` header and as
//! a bearer token. Filters use the `column=op.value` syntax:
//!
//! | Filter          | Parameter                          |
//! |-----------------|------------------------------------|
//! | trade date from | `trade_date=gte.YYYY-MM-DD`        |
//! | trade date to   | `trade_date=lte.YYYY-MM-DD`        |
//! | counterparty    | `counterparty_name=eq.<name>`      |
//! | side            | `buy_sell_indicator=eq.Buy`        |
//! | status          | `settlement_status=eq.settled`     |
//! | unsettled       | `or=(settlement_status.eq.unsettled,settlement_status.is.null)` |
//!
//! Rows without a status count as unsettled, so the unsettled filter
//! matches them too.

use crate::domain::entities::{AlertPreferences, RawTrade, SettlementFail};
use crate::domain::value_objects::SettlementStatus;
use crate::infrastructure::persistence::traits::{
    AlertPreferencesRepository, RepositoryError, RepositoryResult, SettlementFailSource,
    TradeQuery, TradeSource,
};
use crate::infrastructure::rest::error::{StoreError, StoreResult};
use crate::infrastructure::rest::http_client::HttpClient;
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Connection settings for [`RestStore`].
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestStoreConfig {
    /// Project URL, e.g. `https://abc.supabase.co`.
    pub base_url: String,
    /// API key sent as `apikey` and bearer token.
    pub api_key: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Trades table.
    pub trades_table: String,
    /// Settlement fails view.
    pub fails_view: String,
    /// Alert preferences table.
    pub preferences_table: String,
}

impl Default for RestStoreConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            trades_table: "trades".to_string(),
            fails_view: "settlement_fails_view".to_string(),
            preferences_table: "alert_preferences".to_string(),
        }
    }
}

impl RestStoreConfig {
    /// Creates settings for a project URL and key.
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

impl fmt::Debug for RestStoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestStoreConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout_ms", &self.timeout_ms)
            .field("trades_table", &self.trades_table)
            .field("fails_view", &self.fails_view)
            .field("preferences_table", &self.preferences_table)
            .finish()
    }
}

/// REST client for the hosted store.
#[derive(Debug, Clone)]
pub struct RestStore {
    client: HttpClient,
    config: RestStoreConfig,
}

impl RestStore {
    /// Creates a store client.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidRequest` if the URL or key is blank or
    /// the key is not a valid header value, and `StoreError::Internal` if
    /// the HTTP client cannot be built.
    pub fn new(config: RestStoreConfig) -> StoreResult<Self> {
        if config.base_url.trim().is_empty() {
            return Err(StoreError::invalid_request("store base URL is empty"));
        }
        if config.api_key.trim().is_empty() {
            return Err(StoreError::invalid_request("store API key is empty"));
        }

        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&config.api_key)
            .map_err(|_| StoreError::invalid_request("API key is not a valid header value"))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| StoreError::invalid_request("API key is not a valid header value"))?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let client = HttpClient::with_headers(config.timeout_ms, headers)?;
        Ok(Self { client, config })
    }

    /// Returns the settings.
    #[must_use]
    pub fn config(&self) -> &RestStoreConfig {
        &self.config
    }

    fn table_url(&self, table: &str) -> String {
        format!(
            "{}/rest/v1/{}",
            self.config.base_url.trim_end_matches('/'),
            table
        )
    }

    /// Builds the query string for a trade page.
    #[must_use]
    pub fn trade_params(query: &TradeQuery, offset: usize, limit: usize) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("select", "*".to_string()),
            ("order", "settlement_date.desc,id.asc".to_string()),
            ("offset", offset.to_string()),
            ("limit", limit.to_string()),
        ];
        if let Some(from) = query.trade_date_from {
            params.push(("trade_date", format!("gte.{from}")));
        }
        if let Some(to) = query.trade_date_to {
            params.push(("trade_date", format!("lte.{to}")));
        }
        if let Some(counterparty) = &query.counterparty {
            params.push(("counterparty_name", format!("eq.{counterparty}")));
        }
        if let Some(side) = query.side {
            params.push(("buy_sell_indicator", format!("eq.{side}")));
        }
        match query.status {
            Some(SettlementStatus::Unsettled) => params.push((
                "or",
                "(settlement_status.eq.unsettled,settlement_status.is.null)".to_string(),
            )),
            Some(status) => params.push(("settlement_status", format!("eq.{}", status.as_str()))),
            None => {}
        }
        params
    }
}

#[async_trait]
impl TradeSource for RestStore {
    async fn fetch_page(
        &self,
        query: &TradeQuery,
        offset: usize,
        limit: usize,
    ) -> RepositoryResult<Vec<RawTrade>> {
        let url = self.table_url(&self.config.trades_table);
        let params = Self::trade_params(query, offset, limit);
        let rows: Vec<RawTrade> = self
            .client
            .get_with_params(&url, &params)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, offset, limit, "trade page fetch failed"))?;
        tracing::debug!(offset, limit, rows = rows.len(), "fetched trade page");
        Ok(rows)
    }
}

#[async_trait]
impl SettlementFailSource for RestStore {
    async fn fetch_fails(&self) -> RepositoryResult<Vec<SettlementFail>> {
        let url = self.table_url(&self.config.fails_view);
        let params = [("select", "*"), ("order", "fail_days.desc")];
        let fails: Vec<SettlementFail> = self.client.get_with_params(&url, &params).await?;
        tracing::debug!(rows = fails.len(), "fetched settlement fails");
        Ok(fails)
    }
}

#[async_trait]
impl AlertPreferencesRepository for RestStore {
    async fn get(&self, user_id: &str) -> RepositoryResult<Option<AlertPreferences>> {
        let url = self.table_url(&self.config.preferences_table);
        let params = [
            ("select", "*".to_string()),
            ("user_id", format!("eq.{user_id}")),
            ("limit", "1".to_string()),
        ];
        let rows: Vec<AlertPreferences> = self.client.get_with_params(&url, &params).await?;
        Ok(rows.into_iter().next())
    }

    async fn upsert(&self, preferences: &AlertPreferences) -> RepositoryResult<()> {
        if preferences.user_id.is_none() {
            return Err(RepositoryError::query("alert preferences need a user id"));
        }
        let url = format!(
            "{}?on_conflict=user_id",
            self.table_url(&self.config.preferences_table)
        );
        let mut headers = HeaderMap::new();
        headers.insert(
            "Prefer",
            HeaderValue::from_static("resolution=merge-duplicates"),
        );
        self.client
            .post_with_headers(&url, preferences, headers)
            .await?;
        tracing::info!(user_id = ?preferences.user_id, "saved alert preferences");
        Ok(())
    }
}

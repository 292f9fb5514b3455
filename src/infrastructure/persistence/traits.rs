//! # Repository Traits
//!
//! Port definitions for the external store.
//!
//! # Available Ports
//!
//! - [`TradeSource`]: Paged trade reads
//! - [`SettlementFailSource`]: The settlement-fails view
//! - [`AlertPreferencesRepository`]: Per-user alert settings
//!
//! # Examples
//!
//! ```ignore
//! use settlement_risk::infrastructure::persistence::traits::{TradeQuery, TradeSource};
//!
//! async fn load(source: &impl TradeSource) {
//!     let rows = source.fetch_all(&TradeQuery::new(), 1000).await.unwrap();
//!     println!("Loaded {} trades", rows.len());
//! }
//! ```

use crate::domain::entities::{AlertPreferences, RawTrade, SettlementFail, Trade};
use crate::domain::value_objects::{CounterpartyName, ParseEnumError, SettlementStatus, TradeSide};
use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Page size used by [`TradeSource::fetch_all`] callers by default.
pub const DEFAULT_PAGE_SIZE: usize = 1000;

/// Error type for repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Entity not found.
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound {
        /// Type of entity.
        entity_type: &'static str,
        /// Entity identifier.
        id: String,
    },

    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// The store rejected the credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Query error.
    #[error("Query error: {0}")]
    Query(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RepositoryError {
    /// Creates a not found error.
    #[must_use]
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates an unauthorized error.
    #[must_use]
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    /// Creates a query error.
    #[must_use]
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns true if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true if the operation may succeed on retry.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

// ============================================================================
// Queries
// ============================================================================

/// Trade-date window presets of the report screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeFrame {
    /// Last 7 days.
    #[default]
    Last7Days,
    /// Last 30 days.
    Last30Days,
    /// Last 90 days.
    Last90Days,
}

impl TimeFrame {
    /// Returns the window length in days.
    #[must_use]
    pub const fn days(self) -> u64 {
        match self {
            Self::Last7Days => 7,
            Self::Last30Days => 30,
            Self::Last90Days => 90,
        }
    }

    /// Returns the inclusive `(from, to)` window ending at `today`.
    #[must_use]
    pub fn range(self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let from = today
            .checked_sub_days(Days::new(self.days()))
            .unwrap_or(NaiveDate::MIN);
        (from, today)
    }
}

impl fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Last {} Days", self.days())
    }
}

impl FromStr for TimeFrame {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(' ', "");
        match normalized.as_str() {
            "7d" | "7" | "last7days" => Ok(Self::Last7Days),
            "30d" | "30" | "last30days" => Ok(Self::Last30Days),
            "90d" | "90" | "last90days" => Ok(Self::Last90Days),
            _ => Err(ParseEnumError::InvalidValue("TimeFrame", s.to_string())),
        }
    }
}

/// Filters for a trade read.
///
/// Every filter is optional; the empty query selects every trade.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeQuery {
    /// First trade date, inclusive.
    pub trade_date_from: Option<NaiveDate>,
    /// Last trade date, inclusive.
    pub trade_date_to: Option<NaiveDate>,
    /// Exact counterparty.
    pub counterparty: Option<CounterpartyName>,
    /// Trade direction.
    pub side: Option<TradeSide>,
    /// Settlement status.
    pub status: Option<SettlementStatus>,
}

impl TradeQuery {
    /// Creates an unfiltered query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a query for a time frame ending at `today`.
    #[must_use]
    pub fn for_time_frame(time_frame: TimeFrame, today: NaiveDate) -> Self {
        let (from, to) = time_frame.range(today);
        Self::new().with_trade_dates(from, to)
    }

    /// Restricts trade dates to `from..=to`.
    #[must_use]
    pub fn with_trade_dates(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.trade_date_from = Some(from);
        self.trade_date_to = Some(to);
        self
    }

    /// Restricts to one counterparty.
    #[must_use]
    pub fn with_counterparty(mut self, counterparty: impl Into<String>) -> Self {
        self.counterparty = Some(CounterpartyName::new(counterparty));
        self
    }

    /// Restricts to one side.
    #[must_use]
    pub fn with_side(mut self, side: TradeSide) -> Self {
        self.side = Some(side);
        self
    }

    /// Restricts to one settlement status.
    #[must_use]
    pub fn with_status(mut self, status: SettlementStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns true if no filter is set.
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        *self == Self::default()
    }

    /// Returns true if a normalized trade passes every filter.
    ///
    /// A trade without a trade date fails any date filter.
    #[must_use]
    pub fn matches(&self, trade: &Trade) -> bool {
        if let Some(from) = self.trade_date_from
            && trade.trade_date.is_none_or(|d| d < from)
        {
            return false;
        }
        if let Some(to) = self.trade_date_to
            && trade.trade_date.is_none_or(|d| d > to)
        {
            return false;
        }
        if self
            .counterparty
            .as_ref()
            .is_some_and(|cp| *cp != trade.counterparty)
        {
            return false;
        }
        if self.side.is_some_and(|side| trade.side != Some(side)) {
            return false;
        }
        if self.status.is_some_and(|status| trade.status != status) {
            return false;
        }
        true
    }
}

// ============================================================================
// Ports
// ============================================================================

/// Paged read access to trade rows.
#[async_trait]
pub trait TradeSource: Send + Sync + fmt::Debug {
    /// Fetches up to `limit` rows matching `query`, skipping `offset`.
    ///
    /// Implementations keep a stable row order across calls so that
    /// consecutive pages neither overlap nor skip rows.
    ///
    /// # Errors
    ///
    /// Returns a `RepositoryError` if the store cannot be read.
    async fn fetch_page(
        &self,
        query: &TradeQuery,
        offset: usize,
        limit: usize,
    ) -> RepositoryResult<Vec<RawTrade>>;

    /// Fetches every row matching `query`, one page at a time.
    ///
    /// Stops at the first page shorter than `page_size`. A page size of
    /// zero is treated as one.
    ///
    /// # Errors
    ///
    /// Returns the first page error; rows from earlier pages are dropped.
    async fn fetch_all(
        &self,
        query: &TradeQuery,
        page_size: usize,
    ) -> RepositoryResult<Vec<RawTrade>> {
        let page_size = page_size.max(1);
        let mut rows = Vec::new();
        let mut offset = 0usize;
        loop {
            let page = self.fetch_page(query, offset, page_size).await?;
            let fetched = page.len();
            rows.extend(page);
            if fetched < page_size {
                break;
            }
            offset = offset.saturating_add(fetched);
        }
        tracing::debug!(rows = rows.len(), page_size, "fetched all trade pages");
        Ok(rows)
    }
}

/// Read access to the settlement-fails view.
#[async_trait]
pub trait SettlementFailSource: Send + Sync + fmt::Debug {
    /// Fetches every fail, most fail days first.
    ///
    /// # Errors
    ///
    /// Returns a `RepositoryError` if the store cannot be read.
    async fn fetch_fails(&self) -> RepositoryResult<Vec<SettlementFail>>;
}

/// Per-user alert settings.
#[async_trait]
pub trait AlertPreferencesRepository: Send + Sync + fmt::Debug {
    /// Gets a user's preferences.
    ///
    /// Returns `None` if the user never saved any.
    ///
    /// # Errors
    ///
    /// Returns a `RepositoryError` if the store cannot be read.
    async fn get(&self, user_id: &str) -> RepositoryResult<Option<AlertPreferences>>;

    /// Inserts or replaces a user's preferences.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Query` if the preferences carry no user id,
    /// or another `RepositoryError` if the write fails.
    async fn upsert(&self, preferences: &AlertPreferences) -> RepositoryResult<()>;
}

//! # In-Memory Trade Source
//!
//! In-memory implementation of [`TradeSource`] and [`SettlementFailSource`]
//! for tests and offline runs over exported files.

use crate::domain::entities::{RawTrade, SettlementFail, sort_by_fail_days};
use crate::domain::services::normalizer::normalize_trade;
use crate::infrastructure::persistence::traits::{
    RepositoryResult, SettlementFailSource, TradeQuery, TradeSource,
};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of [`TradeSource`].
///
/// Rows are served in insertion order. Filters are evaluated on the
/// normalized form of each row.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTradeSource {
    trades: Arc<RwLock<Vec<RawTrade>>>,
    fails: Arc<RwLock<Vec<SettlementFail>>>,
}

impl InMemoryTradeSource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a source holding `trades`.
    #[must_use]
    pub fn with_trades(trades: Vec<RawTrade>) -> Self {
        Self {
            trades: Arc::new(RwLock::new(trades)),
            fails: Arc::default(),
        }
    }

    /// Returns the number of stored rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.trades
            .try_read()
            .map(|guard| guard.len())
            .unwrap_or(0)
    }

    /// Returns true if no rows are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends a row.
    pub async fn push(&self, trade: RawTrade) {
        self.trades.write().await.push(trade);
    }

    /// Replaces every row.
    pub async fn replace(&self, trades: Vec<RawTrade>) {
        *self.trades.write().await = trades;
    }

    /// Replaces the settlement fails.
    pub async fn set_fails(&self, fails: Vec<SettlementFail>) {
        *self.fails.write().await = fails;
    }
}

#[async_trait]
impl TradeSource for InMemoryTradeSource {
    async fn fetch_page(
        &self,
        query: &TradeQuery,
        offset: usize,
        limit: usize,
    ) -> RepositoryResult<Vec<RawTrade>> {
        let trades = self.trades.read().await;
        let page = trades
            .iter()
            .filter(|raw| query.is_unfiltered() || query.matches(&normalize_trade(raw)))
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();
        Ok(page)
    }
}

#[async_trait]
impl SettlementFailSource for InMemoryTradeSource {
    async fn fetch_fails(&self) -> RepositoryResult<Vec<SettlementFail>> {
        let mut fails = self.fails.read().await.clone();
        sort_by_fail_days(&mut fails);
        Ok(fails)
    }
}

//! # Trade Snapshot
//!
//! The host-side list of normalized trades that aggregation runs over.
//!
//! Changes from the store's feed are applied in arrival order:
//!
//! - Insert puts the new trade first (newest first)
//! - Update replaces every trade with the same id, and is ignored if none match
//! - Delete removes every trade with the id

use crate::domain::entities::{RawTrade, Trade};
use crate::domain::events::TradeChange;
use crate::domain::services::normalizer::{normalize_trade, normalize_trades};
use crate::domain::value_objects::TradeId;

/// Outcome of applying one change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotUpdate {
    /// The snapshot changed.
    Applied,
    /// Nothing matched; the snapshot is unchanged.
    Ignored,
}

impl SnapshotUpdate {
    /// Returns true if the snapshot changed.
    #[must_use]
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Ordered list of normalized trades.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TradeSnapshot {
    trades: Vec<Trade>,
}

impl TradeSnapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a snapshot from raw rows, keeping their order.
    #[must_use]
    pub fn from_raw(raw: &[RawTrade]) -> Self {
        Self {
            trades: normalize_trades(raw),
        }
    }

    /// Replaces every trade, e.g. after a full reload.
    pub fn replace_all(&mut self, raw: &[RawTrade]) {
        self.trades = normalize_trades(raw);
    }

    /// Returns the trades in snapshot order.
    #[must_use]
    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    /// Returns the number of trades.
    #[must_use]
    pub fn len(&self) -> usize {
        self.trades.len()
    }

    /// Returns true if the snapshot holds no trades.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    /// Returns true if a trade with `id` is present.
    #[must_use]
    pub fn contains(&self, id: &TradeId) -> bool {
        self.trades.iter().any(|t| t.has_id(id))
    }

    /// Applies one change.
    pub fn apply(&mut self, change: &TradeChange) -> SnapshotUpdate {
        match change {
            TradeChange::Insert(raw) => {
                self.trades.insert(0, normalize_trade(raw));
                SnapshotUpdate::Applied
            }
            TradeChange::Update(raw) => {
                let Some(id) = raw.trade_id() else {
                    return SnapshotUpdate::Ignored;
                };
                let updated = normalize_trade(raw);
                let mut hit = false;
                for slot in self.trades.iter_mut().filter(|t| t.has_id(&id)) {
                    *slot = updated.clone();
                    hit = true;
                }
                if hit {
                    SnapshotUpdate::Applied
                } else {
                    SnapshotUpdate::Ignored
                }
            }
            TradeChange::Delete(id) => {
                let before = self.trades.len();
                self.trades.retain(|t| !t.has_id(id));
                if self.trades.len() < before {
                    SnapshotUpdate::Applied
                } else {
                    SnapshotUpdate::Ignored
                }
            }
        }
    }
}

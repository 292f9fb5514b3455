//! # Risk Metrics
//!
//! Assembles the dashboard's derived risk figures from a normalized trade
//! list. Every derivation is an independent read-only fold over the same
//! slice; nothing is cached between calls.
//!
//! | Output                  | Trades considered | Ranked by               |
//! |-------------------------|-------------------|-------------------------|
//! | `counterparty_exposure` | all               | summed absolute amount  |
//! | `counterparty_activity` | all               | buy plus sell count     |
//! | `top_fails`             | unsettled         | absolute amount, top N  |
//! | `location_exposure`     | unsettled         | summed absolute amount  |
//!
//! Ties keep first-occurrence order of the input list.

use crate::domain::entities::{RawTrade, Trade};
use crate::domain::services::grouping::group_by;
use crate::domain::services::normalizer::normalize_trades;
use crate::domain::services::ranking::{RankedEntry, rank_descending, top_entry};
use crate::domain::value_objects::arithmetic::accumulate;
use crate::domain::value_objects::{
    CounterpartyName, SettlementLocation, TradeId, TradeSide,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name shown by headline figures when there is no data.
pub const NOT_AVAILABLE: &str = "N/A";

/// Default number of top fails.
pub const DEFAULT_TOP_FAILS: usize = 3;

/// Default number of most active counterparties.
pub const DEFAULT_MOST_ACTIVE: usize = 1;

// ============================================================================
// Output records
// ============================================================================

/// Unsettled trade counts per settlement location.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationCounts {
    /// Fedwire.
    #[serde(rename = "Fed")]
    pub fed: u64,
    /// Depository Trust Company.
    #[serde(rename = "DTC")]
    pub dtc: u64,
    /// Euroclear.
    #[serde(rename = "Euroclear")]
    pub euroclear: u64,
    /// Location missing or unrecognized.
    #[serde(rename = "Unknown")]
    pub unknown: u64,
}

impl LocationCounts {
    /// Counts one trade at `location`.
    pub fn record(&mut self, location: SettlementLocation) {
        let slot = match location {
            SettlementLocation::Fed => &mut self.fed,
            SettlementLocation::Dtc => &mut self.dtc,
            SettlementLocation::Euroclear => &mut self.euroclear,
            SettlementLocation::Unknown => &mut self.unknown,
        };
        *slot = slot.saturating_add(1);
    }

    /// Returns the count for `location`.
    #[must_use]
    pub const fn get(&self, location: SettlementLocation) -> u64 {
        match location {
            SettlementLocation::Fed => self.fed,
            SettlementLocation::Dtc => self.dtc,
            SettlementLocation::Euroclear => self.euroclear,
            SettlementLocation::Unknown => self.unknown,
        }
    }

    /// Returns the count over all locations.
    #[must_use]
    pub fn total(&self) -> u64 {
        SettlementLocation::ALL
            .iter()
            .fold(0u64, |acc, loc| acc.saturating_add(self.get(*loc)))
    }
}

/// Exposure to one counterparty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterpartyExposure {
    /// Counterparty.
    pub name: CounterpartyName,
    /// Sum of absolute net amounts over all of its trades.
    pub amount: Decimal,
    /// Unsettled trades per location.
    pub location_counts: LocationCounts,
}

impl Default for CounterpartyExposure {
    fn default() -> Self {
        Self {
            name: CounterpartyName::unknown(),
            amount: Decimal::ZERO,
            location_counts: LocationCounts::default(),
        }
    }
}

/// Trade counts for one counterparty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterpartyActivity {
    /// Counterparty.
    pub name: CounterpartyName,
    /// Buy trades.
    pub buy_count: u64,
    /// Sell trades.
    pub sell_count: u64,
    /// Trades without a recognized side; not part of `total`.
    pub unclassified: u64,
    /// Buy and sell trades.
    pub total: u64,
}

impl Default for CounterpartyActivity {
    fn default() -> Self {
        Self {
            name: CounterpartyName::unknown(),
            buy_count: 0,
            sell_count: 0,
            unclassified: 0,
            total: 0,
        }
    }
}

impl CounterpartyActivity {
    fn record(&mut self, side: Option<TradeSide>) {
        let slot = match side {
            Some(TradeSide::Buy) => &mut self.buy_count,
            Some(TradeSide::Sell) => &mut self.sell_count,
            None => {
                self.unclassified = self.unclassified.saturating_add(1);
                return;
            }
        };
        *slot = slot.saturating_add(1);
        self.total = self.buy_count.saturating_add(self.sell_count);
    }
}

/// An unsettled trade selected as a top fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedTrade {
    /// Store key.
    pub id: Option<TradeId>,
    /// Trade direction.
    pub side: Option<TradeSide>,
    /// Quantity.
    pub quantity: Decimal,
    /// Settlement date.
    pub date: Option<NaiveDate>,
    /// Counterparty.
    pub counterparty: CounterpartyName,
    /// Absolute net amount.
    pub amount: Decimal,
}

impl From<&Trade> for FailedTrade {
    fn from(trade: &Trade) -> Self {
        Self {
            id: trade.id.clone(),
            side: trade.side,
            quantity: trade.quantity,
            date: trade.settlement_date,
            counterparty: trade.counterparty.clone(),
            amount: trade.exposure(),
        }
    }
}

/// Unsettled exposure at one settlement location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationExposure {
    /// Settlement location.
    pub location: SettlementLocation,
    /// Unsettled trades.
    pub count: u64,
    /// Sum of their absolute net amounts.
    pub amount: Decimal,
}

/// A single named figure, e.g. the largest exposure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Headline {
    /// Subject of the figure, [`NOT_AVAILABLE`] when there is no data.
    pub name: String,
    /// Value of the figure.
    pub amount: Decimal,
}

impl Headline {
    /// Creates a headline.
    #[must_use]
    pub fn new(name: impl Into<String>, amount: Decimal) -> Self {
        Self {
            name: name.into(),
            amount,
        }
    }

    /// The "no data" headline: `{name: "N/A", amount: 0}`.
    #[must_use]
    pub fn not_available() -> Self {
        Self::new(NOT_AVAILABLE, Decimal::ZERO)
    }

    /// Returns true for the "no data" headline.
    #[must_use]
    pub fn is_not_available(&self) -> bool {
        self.name == NOT_AVAILABLE && self.amount.is_zero()
    }
}

impl Default for Headline {
    fn default() -> Self {
        Self::not_available()
    }
}

impl fmt::Display for Headline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.amount)
    }
}

/// Portfolio-level figures from the dashboard cards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    /// Number of trades.
    pub total_trades: u64,
    /// Number of unsettled trades.
    pub unsettled_trades: u64,
    /// Sum of absolute net amounts of unsettled trades.
    pub total_unsettled_value: Decimal,
    /// Counterparty with the largest unsettled exposure.
    pub largest_unsettled_exposure: Headline,
    /// Unsettled buys.
    pub unsettled_buy_count: u64,
    /// Unsettled sells.
    pub unsettled_sell_count: u64,
    /// Absolute value of unsettled buys.
    pub unsettled_buy_value: Decimal,
    /// Absolute value of unsettled sells.
    pub unsettled_sell_value: Decimal,
}

/// Every derived figure for one trade list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskMetrics {
    /// Counterparties by descending exposure.
    pub counterparty_exposure: Vec<CounterpartyExposure>,
    /// Counterparties by descending trade count.
    pub counterparty_activity: Vec<CounterpartyActivity>,
    /// Most active counterparties, truncated for display.
    pub most_active: Vec<CounterpartyActivity>,
    /// Largest unsettled trades.
    pub top_fails: Vec<FailedTrade>,
    /// Every unsettled trade by descending amount; `top_fails` is its head.
    ///
    /// Kept for limit checks and left out of serialized output.
    #[serde(skip)]
    pub open_trades: Vec<FailedTrade>,
    /// Unsettled exposure by location.
    pub location_exposure: Vec<LocationExposure>,
    /// Portfolio summary.
    pub summary: PortfolioSummary,
}

impl RiskMetrics {
    /// Counterparty with the largest exposure, or the "no data" headline.
    #[must_use]
    pub fn largest_exposure(&self) -> Headline {
        self.counterparty_exposure
            .first()
            .map_or_else(Headline::not_available, |e| {
                Headline::new(e.name.as_str(), e.amount)
            })
    }

    /// Counterparty with the most trades, or the "no data" headline.
    ///
    /// The amount is the buy plus sell count.
    #[must_use]
    pub fn most_active(&self) -> Headline {
        self.counterparty_activity
            .first()
            .map_or_else(Headline::not_available, |a| {
                Headline::new(a.name.as_str(), Decimal::from(a.total))
            })
    }

    /// Returns true if no trades contributed to any figure.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.summary.total_trades == 0
    }
}

// ============================================================================
// Derivations
// ============================================================================

/// Exposure per counterparty over all trades, descending.
///
/// Amounts are absolute; location counts include unsettled trades only.
#[must_use]
pub fn counterparty_exposure(trades: &[Trade]) -> Vec<CounterpartyExposure> {
    let grouped = group_by(
        trades,
        |t| t.counterparty.clone(),
        |agg: &mut CounterpartyExposure, t| {
            agg.amount = accumulate(agg.amount, t.exposure(), "counterparty_exposure");
            if t.is_unsettled() {
                agg.location_counts.record(t.location);
            }
        },
    );

    let entries = grouped.into_entries().into_iter().map(|(name, mut agg)| {
        agg.name = name;
        agg
    });
    into_items(rank_descending(entries, |e| e.amount, None))
}

/// Trade counts per counterparty, descending by buy plus sell count,
/// keeping `limit`.
#[must_use]
pub fn counterparty_activity(trades: &[Trade], limit: Option<usize>) -> Vec<CounterpartyActivity> {
    let grouped = group_by(
        trades,
        |t| t.counterparty.clone(),
        |agg: &mut CounterpartyActivity, t| agg.record(t.side),
    );

    let entries = grouped.into_entries().into_iter().map(|(name, mut agg)| {
        agg.name = name;
        agg
    });
    into_items(rank_descending(entries, |a| a.total, limit))
}

/// The `n` unsettled trades with the largest absolute amount.
#[must_use]
pub fn top_fails(trades: &[Trade], n: usize) -> Vec<FailedTrade> {
    ranked_unsettled(trades, Some(n))
}

/// Every unsettled trade, descending by absolute amount.
#[must_use]
pub fn open_trades(trades: &[Trade]) -> Vec<FailedTrade> {
    ranked_unsettled(trades, None)
}

fn ranked_unsettled(trades: &[Trade], limit: Option<usize>) -> Vec<FailedTrade> {
    let unsettled = trades.iter().filter(|t| t.is_unsettled());
    rank_descending(unsettled, |t| t.exposure(), limit)
        .into_iter()
        .map(|r| FailedTrade::from(r.item))
        .collect()
}

/// Unsettled count and amount per settlement location, descending by amount.
#[must_use]
pub fn location_exposure(trades: &[Trade]) -> Vec<LocationExposure> {
    let unsettled = trades.iter().filter(|t| t.is_unsettled());
    let grouped = group_by(
        unsettled,
        |t| t.location,
        |agg: &mut (u64, Decimal), t| {
            agg.0 = agg.0.saturating_add(1);
            agg.1 = accumulate(agg.1, t.exposure(), "location_exposure");
        },
    );

    let entries = grouped
        .into_entries()
        .into_iter()
        .map(|(location, (count, amount))| LocationExposure {
            location,
            count,
            amount,
        });
    into_items(rank_descending(entries, |e| e.amount, None))
}

/// Portfolio summary figures.
#[must_use]
pub fn portfolio_summary(trades: &[Trade]) -> PortfolioSummary {
    let mut summary = PortfolioSummary {
        total_trades: u64::try_from(trades.len()).unwrap_or(u64::MAX),
        ..PortfolioSummary::default()
    };

    for trade in trades.iter().filter(|t| t.is_unsettled()) {
        let value = trade.exposure();
        summary.unsettled_trades = summary.unsettled_trades.saturating_add(1);
        summary.total_unsettled_value =
            accumulate(summary.total_unsettled_value, value, "total_unsettled_value");
        match trade.side {
            Some(TradeSide::Buy) => {
                summary.unsettled_buy_count = summary.unsettled_buy_count.saturating_add(1);
                summary.unsettled_buy_value =
                    accumulate(summary.unsettled_buy_value, value, "unsettled_buy_value");
            }
            Some(TradeSide::Sell) => {
                summary.unsettled_sell_count = summary.unsettled_sell_count.saturating_add(1);
                summary.unsettled_sell_value =
                    accumulate(summary.unsettled_sell_value, value, "unsettled_sell_value");
            }
            None => {}
        }
    }

    let by_counterparty = group_by(
        trades.iter().filter(|t| t.is_unsettled()),
        |t| t.counterparty.clone(),
        |sum: &mut Decimal, t| *sum = accumulate(*sum, t.exposure(), "unsettled_exposure"),
    );
    summary.largest_unsettled_exposure = top_entry(by_counterparty.into_entries(), |e| e.1)
        .map_or_else(Headline::not_available, |r| {
            Headline::new(r.item.0.as_str(), r.item.1)
        });

    summary
}

fn into_items<T, S>(ranked: Vec<RankedEntry<T, S>>) -> Vec<T> {
    ranked.into_iter().map(RankedEntry::into_item).collect()
}

// ============================================================================
// Aggregator
// ============================================================================

/// Output sizes for the truncated rankings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregatorConfig {
    /// Number of top fails to report.
    pub top_fails: usize,
    /// Number of most active counterparties to report.
    pub most_active: usize,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            top_fails: DEFAULT_TOP_FAILS,
            most_active: DEFAULT_MOST_ACTIVE,
        }
    }
}

impl AggregatorConfig {
    /// Sets the number of top fails.
    #[must_use]
    pub fn with_top_fails(mut self, n: usize) -> Self {
        self.top_fails = n;
        self
    }

    /// Sets the number of most active counterparties.
    #[must_use]
    pub fn with_most_active(mut self, n: usize) -> Self {
        self.most_active = n;
        self
    }
}

/// Stateless metric assembler.
///
/// # Examples
///
/// ```
/// use settlement_risk::domain::entities::RawTrade;
/// use settlement_risk::domain::services::metrics::RiskAggregator;
///
/// let metrics = RiskAggregator::default().aggregate_raw(&[
///     RawTrade::new().with_counterparty("UBS").with_net_money(-500_000),
/// ]);
/// assert_eq!(metrics.largest_exposure().name, "UBS");
///
/// let empty = RiskAggregator::default().aggregate(&[]);
/// assert!(empty.largest_exposure().is_not_available());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RiskAggregator {
    config: AggregatorConfig,
}

impl RiskAggregator {
    /// Creates an aggregator with the given output sizes.
    #[must_use]
    pub fn new(config: AggregatorConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Derives every metric from a normalized trade list.
    #[must_use]
    pub fn aggregate(&self, trades: &[Trade]) -> RiskMetrics {
        let counterparty_activity = counterparty_activity(trades, None);
        let most_active = counterparty_activity
            .iter()
            .take(self.config.most_active)
            .cloned()
            .collect();
        let open_trades = open_trades(trades);
        let top_fails = open_trades.iter().take(self.config.top_fails).cloned().collect();

        RiskMetrics {
            counterparty_exposure: counterparty_exposure(trades),
            counterparty_activity,
            most_active,
            top_fails,
            open_trades,
            location_exposure: location_exposure(trades),
            summary: portfolio_summary(trades),
        }
    }

    /// Normalizes raw rows, then derives every metric.
    #[must_use]
    pub fn aggregate_raw(&self, raw: &[RawTrade]) -> RiskMetrics {
        self.aggregate(&normalize_trades(raw))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::domain::services::normalizer::normalize_trade;

    fn trade(cp: &str, net: i64, status: &str, location: &str, side: &str) -> Trade {
        normalize_trade(
            &RawTrade::new()
                .with_counterparty(cp)
                .with_net_money(net)
                .with_status(status)
                .with_location(location)
                .with_side(side),
        )
    }

    #[test]
    fn exposure_sums_all_trades_counts_unsettled_locations() {
        let trades = vec![
            trade("UBS", -500_000, "unsettled", "Fed", "Buy"),
            trade("UBS", 300_000, "settled", "DTC", "Sell"),
        ];

        let exposure = counterparty_exposure(&trades);
        assert_eq!(exposure.len(), 1);
        assert_eq!(exposure[0].name.as_str(), "UBS");
        assert_eq!(exposure[0].amount, Decimal::new(800_000, 0));
        assert_eq!(exposure[0].location_counts.fed, 1);
        assert_eq!(exposure[0].location_counts.dtc, 0);
        assert_eq!(exposure[0].location_counts.euroclear, 0);
    }

    #[test]
    fn location_counts_serialize_with_venue_names() {
        let mut counts = LocationCounts::default();
        counts.record(SettlementLocation::Fed);
        counts.record(SettlementLocation::Dtc);
        counts.record(SettlementLocation::Dtc);
        let json = serde_json::to_value(counts).unwrap();
        assert_eq!(json["Fed"], 1);
        assert_eq!(json["DTC"], 2);
        assert_eq!(json["Euroclear"], 0);
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn activity_counts_sides_and_unclassified() {
        let trades = vec![
            trade("A", 1, "settled", "Fed", "Buy"),
            trade("B", 1, "settled", "Fed", "Sell"),
            trade("B", 1, "settled", "Fed", "Buy"),
            trade("B", 1, "settled", "Fed", "?"),
        ];

        let activity = counterparty_activity(&trades, None);
        assert_eq!(activity[0].name.as_str(), "B");
        assert_eq!(activity[0].buy_count, 1);
        assert_eq!(activity[0].sell_count, 1);
        assert_eq!(activity[0].unclassified, 1);
        assert_eq!(activity[0].total, 2);
        assert_eq!(activity[1].total, 1);

        assert_eq!(counterparty_activity(&trades, Some(1)).len(), 1);
    }

    #[test]
    fn sideless_trades_do_not_rank_activity() {
        let trades = vec![
            trade("A", 1, "settled", "Fed", "Buy"),
            trade("A", 1, "settled", "Fed", "Sell"),
            trade("B", 1, "settled", "Fed", "Buy"),
            trade("B", 1, "settled", "Fed", ""),
            trade("B", 1, "settled", "Fed", "hold"),
        ];

        let activity = counterparty_activity(&trades, None);
        assert_eq!(activity[0].name.as_str(), "A");
        assert_eq!(activity[0].total, 2);
        assert_eq!(activity[1].name.as_str(), "B");
        assert_eq!(activity[1].total, 1);
        assert_eq!(activity[1].unclassified, 2);

        let metrics = RiskAggregator::default().aggregate(&trades);
        assert_eq!(metrics.most_active(), Headline::new("A", Decimal::from(2u64)));
    }

    #[test]
    fn top_fails_filters_settled_and_keeps_tie_order() {
        let mut trades: Vec<Trade> = [100, 500, 200, 500, 50]
            .iter()
            .enumerate()
            .map(|(i, amount)| {
                normalize_trade(
                    &RawTrade::new()
                        .with_id(i64::try_from(i).unwrap())
                        .with_net_money(*amount),
                )
            })
            .collect();
        trades.push(trade("Big", 1_000_000, "settled", "Fed", "Buy"));

        let fails = top_fails(&trades, 3);
        let ids: Vec<_> = fails.iter().map(|f| f.id.clone().unwrap().to_string()).collect();
        assert_eq!(ids, vec!["1", "3", "2"]);
        assert_eq!(fails[0].amount, Decimal::new(500, 0));
    }

    #[test]
    fn open_trades_keep_every_unsettled_trade() {
        let trades: Vec<Trade> = (1..=5)
            .map(|i| trade(&format!("CP{i}"), i * 1_000, "unsettled", "Fed", "Buy"))
            .chain(std::iter::once(trade("S", 9_000, "settled", "Fed", "Buy")))
            .collect();

        let metrics = RiskAggregator::default().aggregate(&trades);
        assert_eq!(metrics.top_fails.len(), 3);
        assert_eq!(metrics.open_trades.len(), 5);
        assert_eq!(metrics.open_trades[..3], metrics.top_fails[..]);
        assert_eq!(metrics.open_trades[4].amount, Decimal::new(1_000, 0));

        let json = serde_json::to_value(&metrics).unwrap();
        assert!(json.get("openTrades").is_none());
    }

    #[test]
    fn location_exposure_ignores_settled() {
        let trades = vec![
            trade("A", -100, "unsettled", "Euroclear", "Buy"),
            trade("A", 400, "unsettled", "DTC", "Buy"),
            trade("B", 900, "settled", "Fed", "Sell"),
            trade("B", 50, "unsettled", "DTC", "Sell"),
        ];

        let locations = location_exposure(&trades);
        assert_eq!(locations.len(), 2);
        assert_eq!(locations[0].location, SettlementLocation::Dtc);
        assert_eq!(locations[0].count, 2);
        assert_eq!(locations[0].amount, Decimal::new(450, 0));
        assert_eq!(locations[1].location, SettlementLocation::Euroclear);
        assert!(locations.iter().all(|l| l.location != SettlementLocation::Fed));
    }

    #[test]
    fn summary_figures() {
        let trades = vec![
            trade("A", -100, "unsettled", "Fed", "Buy"),
            trade("B", 400, "unsettled", "DTC", "Sell"),
            trade("B", 900, "settled", "Fed", "Sell"),
            trade("C", 50, "unsettled", "Fed", ""),
        ];

        let summary = portfolio_summary(&trades);
        assert_eq!(summary.total_trades, 4);
        assert_eq!(summary.unsettled_trades, 3);
        assert_eq!(summary.total_unsettled_value, Decimal::new(550, 0));
        assert_eq!(summary.unsettled_buy_count, 1);
        assert_eq!(summary.unsettled_sell_count, 1);
        assert_eq!(summary.unsettled_buy_value, Decimal::new(100, 0));
        assert_eq!(summary.unsettled_sell_value, Decimal::new(400, 0));
        assert_eq!(summary.largest_unsettled_exposure, Headline::new("B", Decimal::new(400, 0)));
    }

    #[test]
    fn empty_input_degrades_to_sentinels() {
        let metrics = RiskAggregator::default().aggregate(&[]);
        assert!(metrics.counterparty_exposure.is_empty());
        assert!(metrics.counterparty_activity.is_empty());
        assert!(metrics.most_active.is_empty());
        assert!(metrics.top_fails.is_empty());
        assert!(metrics.location_exposure.is_empty());
        assert!(metrics.is_empty());
        assert_eq!(metrics.largest_exposure(), Headline::not_available());
        assert_eq!(metrics.most_active(), Headline::not_available());
        assert!(metrics.summary.largest_unsettled_exposure.is_not_available());
    }

    #[test]
    fn aggregator_respects_config() {
        let trades: Vec<Trade> = (1..=6)
            .map(|i| trade(&format!("CP{i}"), i * 10, "unsettled", "Fed", "Buy"))
            .collect();

        let metrics = RiskAggregator::new(
            AggregatorConfig::default()
                .with_top_fails(5)
                .with_most_active(2),
        )
        .aggregate(&trades);
        assert_eq!(metrics.top_fails.len(), 5);
        assert_eq!(metrics.most_active.len(), 2);
        assert_eq!(metrics.counterparty_activity.len(), 6);
    }

    #[test]
    fn headline_accessors() {
        let trades = vec![
            trade("A", 100, "unsettled", "Fed", "Buy"),
            trade("B", 700, "settled", "Fed", "Buy"),
            trade("A", 100, "settled", "Fed", "Sell"),
        ];
        let metrics = RiskAggregator::default().aggregate(&trades);
        assert_eq!(metrics.largest_exposure(), Headline::new("B", Decimal::new(700, 0)));
        assert_eq!(metrics.most_active(), Headline::new("A", Decimal::from(2u64)));
    }

    #[test]
    fn metrics_serialize_camel_case() {
        let trades = vec![trade("UBS", -500_000, "unsettled", "Fed", "Buy")];
        let json = serde_json::to_value(RiskAggregator::default().aggregate(&trades)).unwrap();
        assert_eq!(json["counterpartyExposure"][0]["name"], "UBS");
        assert_eq!(json["counterpartyExposure"][0]["locationCounts"]["Fed"], 1);
        assert_eq!(json["summary"]["unsettledTrades"], 1);
    }

    #[test]
    fn aggregate_is_repeatable() {
        let trades = vec![
            trade("A", 100, "unsettled", "Fed", "Buy"),
            trade("B", 100, "unsettled", "DTC", "Sell"),
        ];
        let agg = RiskAggregator::default();
        assert_eq!(agg.aggregate(&trades), agg.aggregate(&trades));
    }
}

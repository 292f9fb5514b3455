//! Conservation and ordering properties of metric assembly.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use proptest::prelude::*;
use rust_decimal::Decimal;
use settlement_risk::domain::entities::{RawTrade, Trade};
use settlement_risk::domain::services::metrics::{counterparty_activity, location_exposure};
use settlement_risk::domain::services::{RiskAggregator, normalize_trades};
use std::collections::HashMap;

const COUNTERPARTIES: [&str; 4] = ["UBS", "BNP", "Citadel", " 'UBS' "];
const STATUSES: [&str; 3] = ["unsettled", "settled", "pending"];
const LOCATIONS: [&str; 4] = ["Fed", "DTC", "Euroclear", "vault"];
const SIDES: [&str; 3] = ["Buy", "sell", ""];

fn trade_strategy() -> impl Strategy<Value = RawTrade> {
    (0..4usize, -1_000_000_000i64..1_000_000_000, 0..3usize, 0..4usize, 0..3usize).prop_map(
        |(cp, amount, status, location, side)| {
            RawTrade::new()
                .with_counterparty(COUNTERPARTIES[cp])
                .with_net_money(amount)
                .with_status(STATUSES[status])
                .with_location(LOCATIONS[location])
                .with_side(SIDES[side])
        },
    )
}

fn book() -> impl Strategy<Value = Vec<Trade>> {
    proptest::collection::vec(trade_strategy(), 0..60).prop_map(|raw| normalize_trades(&raw))
}

fn exposure_map(trades: &[Trade]) -> HashMap<String, Decimal> {
    RiskAggregator::default()
        .aggregate(trades)
        .counterparty_exposure
        .into_iter()
        .map(|e| (e.name.as_str().to_string(), e.amount))
        .collect()
}

proptest! {
    #[test]
    fn exposure_conserves_absolute_amounts(trades in book()) {
        let metrics = RiskAggregator::default().aggregate(&trades);
        let ranked: Decimal = metrics.counterparty_exposure.iter().map(|e| e.amount).sum();
        let direct: Decimal = trades.iter().map(Trade::exposure).sum();
        prop_assert_eq!(ranked, direct);
    }

    #[test]
    fn activity_counts_every_trade(trades in book()) {
        let activity = counterparty_activity(&trades, None);
        let sided = trades.iter().filter(|t| t.side.is_some()).count() as u64;
        let total: u64 = activity.iter().map(|a| a.total).sum();
        let unclassified: u64 = activity.iter().map(|a| a.unclassified).sum();
        prop_assert_eq!(total, sided);
        prop_assert_eq!(total + unclassified, trades.len() as u64);
        for a in &activity {
            prop_assert_eq!(a.buy_count + a.sell_count, a.total);
        }
    }

    #[test]
    fn locations_cover_unsettled_trades_only(trades in book()) {
        let metrics = RiskAggregator::default().aggregate(&trades);
        let by_location = location_exposure(&trades);
        let count: u64 = by_location.iter().map(|l| l.count).sum();
        let amount: Decimal = by_location.iter().map(|l| l.amount).sum();
        prop_assert_eq!(count, metrics.summary.unsettled_trades);
        prop_assert_eq!(amount, metrics.summary.total_unsettled_value);

        let located: u64 = metrics
            .counterparty_exposure
            .iter()
            .map(|e| e.location_counts.total())
            .sum();
        prop_assert_eq!(located, metrics.summary.unsettled_trades);
    }

    #[test]
    fn top_fails_are_bounded_and_descending(trades in book()) {
        let metrics = RiskAggregator::default().aggregate(&trades);
        let unsettled = trades.iter().filter(|t| t.is_unsettled()).count();
        prop_assert_eq!(metrics.top_fails.len(), unsettled.min(3));
        for pair in metrics.top_fails.windows(2) {
            prop_assert!(pair[0].amount >= pair[1].amount);
        }
        if let Some(max) = trades.iter().filter(|t| t.is_unsettled()).map(Trade::exposure).max() {
            prop_assert_eq!(metrics.top_fails[0].amount, max);
        }
    }

    #[test]
    fn exposure_ignores_input_order(trades in book()) {
        let mut reversed = trades.clone();
        reversed.reverse();
        prop_assert_eq!(exposure_map(&trades), exposure_map(&reversed));
    }

    #[test]
    fn most_active_matches_activity_leader(trades in book()) {
        let metrics = RiskAggregator::default().aggregate(&trades);
        prop_assert!(metrics.most_active.len() <= 1);
        let leader = metrics.most_active();
        match metrics.counterparty_activity.first() {
            Some(first) => {
                prop_assert_eq!(leader.name.as_str(), first.name.as_str());
                prop_assert!(metrics.counterparty_activity.iter().all(|a| a.total <= first.total));
            }
            None => prop_assert!(leader.is_not_available()),
        }
    }
}

//! Snapshot maintenance from realtime payloads through to alert delivery.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use rust_decimal::Decimal;
use serde_json::json;
use settlement_risk::application::services::RiskMonitor;
use settlement_risk::domain::entities::{AlertPreferences, RawTrade};
use settlement_risk::domain::events::TradeChange;
use settlement_risk::domain::services::{AlertEvaluator, AlertKind, RiskAggregator};
use settlement_risk::infrastructure::notifications::RecordingNotifier;
use settlement_risk::infrastructure::persistence::in_memory::{
    InMemoryAlertPreferencesRepository, InMemoryTradeSource,
};
use settlement_risk::infrastructure::persistence::AlertPreferencesRepository;
use std::sync::Arc;

fn initial_book() -> Vec<RawTrade> {
    serde_json::from_value(json!([
        {"id": 1, "counterparty_name": "UBS", "net_money": -400000, "settlement_location": "Fed",
         "buy_sell_indicator": "Buy"},
        {"id": 2, "counterparty_name": "BNP", "net_money": 250000, "settlement_status": "settled",
         "buy_sell_indicator": "Sell"}
    ]))
    .unwrap()
}

#[tokio::test]
async fn realtime_feed_keeps_metrics_current() {
    let source = Arc::new(InMemoryTradeSource::with_trades(initial_book()));
    let monitor = RiskMonitor::new(source, RiskAggregator::default());
    monitor.refresh().await.unwrap();
    assert_eq!(monitor.metrics().summary.total_unsettled_value, Decimal::from(400_000));

    let payloads = [
        json!({"eventType": "INSERT", "new": {"id": 3, "counterparty_name": "BNP", "net_money": 900000, "settlement_location": "Euroclear"}}),
        json!({"eventType": "UPDATE", "new": {"id": 1, "counterparty_name": "UBS", "net_money": -400000, "settlement_status": "settled"}}),
        json!({"eventType": "DELETE", "old": {"id": 2}}),
        json!({"eventType": "TRUNCATE"}),
    ];
    let changes: Vec<TradeChange> = payloads.iter().filter_map(TradeChange::from_realtime).collect();
    assert_eq!(changes.len(), 3);

    let applied = monitor.run(futures::stream::iter(changes)).await;
    assert_eq!(applied, 3);

    let metrics = monitor.metrics();
    assert_eq!(monitor.trade_count(), 2);
    assert_eq!(metrics.summary.unsettled_trades, 1);
    assert_eq!(metrics.top_fails[0].amount, Decimal::from(900_000));
    assert_eq!(metrics.largest_exposure().name, "BNP");
    assert_eq!(metrics.summary.largest_unsettled_exposure.name, "BNP");
}

#[tokio::test]
async fn stored_preferences_drive_alerts() {
    let repo = InMemoryAlertPreferencesRepository::new();
    repo.upsert(
        &AlertPreferences::for_user("u-1", "ops@example.com")
            .with_unsettled_threshold(Decimal::from(100_000))
            .with_counterparty_threshold(0),
    )
    .await
    .unwrap();

    let monitor = RiskMonitor::new(
        Arc::new(InMemoryTradeSource::with_trades(initial_book())),
        RiskAggregator::default(),
    );
    monitor.refresh().await.unwrap();

    let prefs = repo.get("u-1").await.unwrap().unwrap();
    let evaluator = AlertEvaluator::new().with_preferences(prefs);
    let notifier = RecordingNotifier::new();
    let report = monitor.check_alerts(&evaluator, &notifier).await;

    assert!(report.is_delivered());
    assert_eq!(report.alerts[0].kind, AlertKind::UnsettledValue);
    assert!(
        report
            .alerts
            .iter()
            .filter(|a| a.kind == AlertKind::CounterpartyTradeCount)
            .count()
            == 2
    );
    assert_eq!(notifier.digests()[0], report.alerts);
}

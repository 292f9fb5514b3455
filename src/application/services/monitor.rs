//! # Risk Monitor
//!
//! Keeps a trade snapshot and its risk metrics current.
//!
//! The monitor loads the full trade list from a [`TradeSource`], then
//! applies change events as they arrive. Every change that alters the
//! snapshot triggers a full re-aggregation, so the published metrics always
//! describe the current list.
//!
//! Changes that arrive while a reload is in flight are buffered and
//! replayed on top of the reloaded rows. A replayed insert whose id the
//! reload already returned is applied as an update.
//!
//! # Example
//!
//! ```ignore
//! let monitor = RiskMonitor::new(Arc::new(store), RiskAggregator::default())
//!     .with_query(TradeQuery::for_time_frame(TimeFrame::Last30Days, today));
//! monitor.refresh().await?;
//! monitor.run(changes).await;
//! ```

use crate::application::error::ApplicationResult;
use crate::application::services::snapshot::{SnapshotUpdate, TradeSnapshot};
use crate::domain::events::{DomainEvent, TradeChange, TradeChangeEvent};
use crate::domain::services::normalizer::normalize_trade;
use crate::domain::services::{Alert, AlertEvaluator, RiskAggregator, RiskMetrics};
use crate::infrastructure::notifications::{AlertNotifier, NotificationError};
use crate::infrastructure::persistence::{DEFAULT_PAGE_SIZE, TradeQuery, TradeSource};
use chrono::{DateTime, Utc};
use futures::{Stream, StreamExt};
use parking_lot::RwLock;
use std::borrow::Cow;
use std::sync::Arc;

/// What happened to an alert digest.
#[derive(Debug, Clone)]
pub enum DeliveryStatus {
    /// No alerts were raised, so nothing was sent.
    Skipped,
    /// The notifier accepted the digest.
    Delivered,
    /// The notifier failed.
    Failed(NotificationError),
}

/// Result of one alert check.
#[derive(Debug, Clone)]
pub struct AlertReport {
    /// Alerts raised, most severe first.
    pub alerts: Vec<Alert>,
    /// Delivery outcome.
    pub delivery: DeliveryStatus,
}

impl AlertReport {
    /// Returns true if the digest reached the notifier.
    #[must_use]
    pub fn is_delivered(&self) -> bool {
        matches!(self.delivery, DeliveryStatus::Delivered)
    }
}

#[derive(Debug, Default)]
struct MonitorState {
    snapshot: TradeSnapshot,
    metrics: RiskMetrics,
    refreshed_at: Option<DateTime<Utc>>,
    /// Changes seen since the in-flight reload started.
    pending: Option<Vec<TradeChange>>,
}

impl MonitorState {
    fn recompute(&mut self, aggregator: &RiskAggregator) {
        self.metrics = aggregator.aggregate(self.snapshot.trades());
    }

    fn replay(&mut self, change: &TradeChange) {
        let change = match change {
            TradeChange::Insert(raw)
                if raw
                    .trade_id()
                    .is_some_and(|id| self.snapshot.contains(&id)) =>
            {
                Cow::Owned(TradeChange::Update(raw.clone()))
            }
            _ => Cow::Borrowed(change),
        };
        self.snapshot.apply(&change);
    }
}

/// Snapshot owner that recomputes metrics on every change.
#[derive(Debug)]
pub struct RiskMonitor {
    source: Arc<dyn TradeSource>,
    aggregator: RiskAggregator,
    query: TradeQuery,
    page_size: usize,
    state: RwLock<MonitorState>,
}

impl RiskMonitor {
    /// Creates a monitor with an empty snapshot and an unfiltered query.
    #[must_use]
    pub fn new(source: Arc<dyn TradeSource>, aggregator: RiskAggregator) -> Self {
        Self {
            source,
            aggregator,
            query: TradeQuery::new(),
            page_size: DEFAULT_PAGE_SIZE,
            state: RwLock::new(MonitorState::default()),
        }
    }

    /// Sets the query used for loading and for scoping changes.
    #[must_use]
    pub fn with_query(mut self, query: TradeQuery) -> Self {
        self.query = query;
        self
    }

    /// Sets the page size used when loading.
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Returns the active query.
    #[must_use]
    pub fn query(&self) -> &TradeQuery {
        &self.query
    }

    /// Returns the latest metrics.
    #[must_use]
    pub fn metrics(&self) -> RiskMetrics {
        self.state.read().metrics.clone()
    }

    /// Returns a copy of the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> TradeSnapshot {
        self.state.read().snapshot.clone()
    }

    /// Returns the number of trades in the snapshot.
    #[must_use]
    pub fn trade_count(&self) -> usize {
        self.state.read().snapshot.len()
    }

    /// Returns when the snapshot was last loaded in full.
    #[must_use]
    pub fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.state.read().refreshed_at
    }

    /// Reloads every matching trade and recomputes the metrics.
    ///
    /// Changes applied while the pages are loading are replayed on the
    /// reloaded rows. On failure the previous snapshot and metrics stay in
    /// place, with those changes already applied to them.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Repository` if any page cannot be read.
    pub async fn refresh(&self) -> ApplicationResult<RiskMetrics> {
        self.state.write().pending.get_or_insert_with(Vec::new);
        let fetched = self.source.fetch_all(&self.query, self.page_size).await;

        let mut state = self.state.write();
        let pending = state.pending.take().unwrap_or_default();
        let rows = fetched.inspect_err(|e| tracing::error!(error = %e, "trade reload failed"))?;

        state.snapshot.replace_all(&rows);
        for change in &pending {
            state.replay(change);
        }
        state.recompute(&self.aggregator);
        state.refreshed_at = Some(Utc::now());
        tracing::info!(
            trades = state.snapshot.len(),
            replayed = pending.len(),
            unsettled = state.metrics.summary.unsettled_trades,
            "trade snapshot reloaded"
        );
        Ok(state.metrics.clone())
    }

    /// Applies one change and recomputes the metrics if the snapshot changed.
    pub fn apply_change(&self, change: &TradeChange) -> SnapshotUpdate {
        let mut state = self.state.write();
        let Some(change) = self.scope(change, &state.snapshot) else {
            tracing::debug!(trade_id = ?change.trade_id(), "change outside query ignored");
            return SnapshotUpdate::Ignored;
        };

        let outcome = state.snapshot.apply(&change);
        if outcome.is_applied() {
            state.recompute(&self.aggregator);
        }
        tracing::debug!(
            event_type = %change.event_type(),
            trade_id = ?change.trade_id(),
            ?outcome,
            trades = state.snapshot.len(),
            "applied trade change"
        );
        if let Some(pending) = state.pending.as_mut() {
            pending.push(change.into_owned());
        }
        outcome
    }

    /// Applies a change event.
    pub fn apply_event(&self, event: &TradeChangeEvent) -> SnapshotUpdate {
        tracing::trace!(
            event_id = %event.event_id(),
            event = event.event_name(),
            "received trade change"
        );
        self.apply_change(&event.change)
    }

    /// Applies changes until the stream ends.
    ///
    /// Returns the number of changes that altered the snapshot.
    pub async fn run<S>(&self, changes: S) -> usize
    where
        S: Stream<Item = TradeChange>,
    {
        let mut changes = std::pin::pin!(changes);
        let mut applied = 0usize;
        while let Some(change) = changes.next().await {
            if self.apply_change(&change).is_applied() {
                applied = applied.saturating_add(1);
            }
        }
        tracing::info!(applied, "change stream ended");
        applied
    }

    /// Evaluates the latest metrics and sends any alerts.
    ///
    /// A delivery failure is logged and reported in the result; it never
    /// discards the evaluated alerts.
    pub async fn check_alerts(
        &self,
        evaluator: &AlertEvaluator,
        notifier: &dyn AlertNotifier,
    ) -> AlertReport {
        let alerts = evaluator.evaluate(&self.metrics());
        if alerts.is_empty() {
            return AlertReport {
                alerts,
                delivery: DeliveryStatus::Skipped,
            };
        }

        let delivery = match notifier.notify(&alerts).await {
            Ok(()) => DeliveryStatus::Delivered,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    retryable = e.is_retryable(),
                    alerts = alerts.len(),
                    "alert notification failed"
                );
                DeliveryStatus::Failed(e)
            }
        };
        AlertReport { alerts, delivery }
    }

    /// Narrows a change to the active query.
    ///
    /// Inserts outside the query are dropped. An update that moves a trade
    /// out of the query becomes a delete, and one that moves a trade not in
    /// `snapshot` into the query becomes an insert.
    fn scope<'a>(
        &self,
        change: &'a TradeChange,
        snapshot: &TradeSnapshot,
    ) -> Option<Cow<'a, TradeChange>> {
        if self.query.is_unfiltered() {
            return Some(Cow::Borrowed(change));
        }
        match change {
            TradeChange::Insert(raw) if !self.query.matches(&normalize_trade(raw)) => None,
            TradeChange::Update(raw) => {
                let id = raw.trade_id()?;
                if !self.query.matches(&normalize_trade(raw)) {
                    Some(Cow::Owned(TradeChange::Delete(id)))
                } else if snapshot.contains(&id) {
                    Some(Cow::Borrowed(change))
                } else {
                    Some(Cow::Owned(TradeChange::Insert(raw.clone())))
                }
            }
            _ => Some(Cow::Borrowed(change)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::domain::entities::{RawTrade, RiskLimits};
    use crate::domain::value_objects::{SettlementStatus, TradeId};
    use crate::infrastructure::notifications::RecordingNotifier;
    use crate::infrastructure::persistence::RepositoryResult;
    use crate::infrastructure::persistence::in_memory::InMemoryTradeSource;
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use tokio::sync::Notify;

    fn raw(id: i64, name: &str, amount: i64, status: &str) -> RawTrade {
        RawTrade::new()
            .with_id(id)
            .with_counterparty(name)
            .with_net_money(amount)
            .with_status(status)
            .with_location("Fed")
    }

    fn monitor(rows: Vec<RawTrade>) -> RiskMonitor {
        RiskMonitor::new(
            Arc::new(InMemoryTradeSource::with_trades(rows)),
            RiskAggregator::default(),
        )
    }

    #[tokio::test]
    async fn refresh_loads_every_page() {
        let rows = (1..=25).map(|i| raw(i, "UBS", 100, "unsettled")).collect();
        let monitor = monitor(rows).with_page_size(10);
        assert!(monitor.refreshed_at().is_none());

        let metrics = monitor.refresh().await.unwrap();
        assert_eq!(monitor.trade_count(), 25);
        assert_eq!(metrics.summary.total_trades, 25);
        assert_eq!(metrics.summary.total_unsettled_value, Decimal::from(2500));
        assert!(monitor.refreshed_at().is_some());
    }

    #[tokio::test]
    async fn changes_recompute_metrics() {
        let monitor = monitor(vec![raw(1, "UBS", 100, "unsettled")]);
        monitor.refresh().await.unwrap();

        let outcome = monitor.apply_change(&TradeChange::Insert(raw(2, "BNP", -500, "unsettled")));
        assert!(outcome.is_applied());
        assert_eq!(monitor.metrics().largest_exposure().name, "BNP");

        monitor.apply_change(&TradeChange::Delete(TradeId::from(2)));
        assert_eq!(monitor.metrics().largest_exposure().name, "UBS");

        let ignored = monitor.apply_change(&TradeChange::Delete(TradeId::from(42)));
        assert_eq!(ignored, SnapshotUpdate::Ignored);
    }

    #[tokio::test]
    async fn run_consumes_stream() {
        let monitor = monitor(Vec::new());
        let changes = futures::stream::iter(vec![
            TradeChange::Insert(raw(1, "UBS", 10, "unsettled")),
            TradeChange::Update(raw(1, "UBS", 20, "unsettled")),
            TradeChange::Update(raw(9, "UBS", 20, "unsettled")),
            TradeChange::Delete(TradeId::from(1)),
        ]);
        assert_eq!(monitor.run(changes).await, 3);
        assert!(monitor.metrics().is_empty());
    }

    #[tokio::test]
    async fn query_scopes_changes() {
        let monitor = monitor(vec![raw(1, "UBS", 100, "unsettled")])
            .with_query(TradeQuery::new().with_status(SettlementStatus::Unsettled));
        monitor.refresh().await.unwrap();

        let settled = TradeChange::Insert(raw(2, "UBS", 100, "settled"));
        assert_eq!(monitor.apply_change(&settled), SnapshotUpdate::Ignored);

        let now_settled = TradeChange::Update(raw(1, "UBS", 100, "settled"));
        assert!(monitor.apply_change(&now_settled).is_applied());
        assert_eq!(monitor.trade_count(), 0);
    }

    #[tokio::test]
    async fn update_into_query_inserts_trade() {
        let monitor = monitor(vec![raw(1, "UBS", 100, "settled")])
            .with_query(TradeQuery::new().with_status(SettlementStatus::Unsettled));
        monitor.refresh().await.unwrap();
        assert_eq!(monitor.trade_count(), 0);

        let reopened = TradeChange::Update(raw(1, "UBS", 100, "unsettled"));
        assert!(monitor.apply_change(&reopened).is_applied());
        assert_eq!(monitor.trade_count(), 1);
        assert_eq!(monitor.metrics().summary.unsettled_trades, 1);

        let again = TradeChange::Update(raw(1, "UBS", 250, "unsettled"));
        assert!(monitor.apply_change(&again).is_applied());
        assert_eq!(monitor.trade_count(), 1);
        assert_eq!(monitor.metrics().summary.total_unsettled_value, Decimal::from(250));
    }

    #[derive(Debug)]
    struct GatedSource {
        rows: Vec<RawTrade>,
        started: Arc<Notify>,
        release: Arc<Notify>,
    }

    #[async_trait]
    impl TradeSource for GatedSource {
        async fn fetch_page(
            &self,
            _query: &TradeQuery,
            offset: usize,
            limit: usize,
        ) -> RepositoryResult<Vec<RawTrade>> {
            self.started.notify_one();
            self.release.notified().await;
            Ok(self.rows.iter().skip(offset).take(limit).cloned().collect())
        }
    }

    #[tokio::test]
    async fn changes_during_reload_are_replayed() {
        let started = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let source = GatedSource {
            rows: vec![raw(1, "UBS", 100, "unsettled"), raw(3, "BNP", 50, "unsettled")],
            started: Arc::clone(&started),
            release: Arc::clone(&release),
        };
        let monitor = RiskMonitor::new(Arc::new(source), RiskAggregator::default());

        let changes = async {
            started.notified().await;
            monitor.apply_change(&TradeChange::Insert(raw(2, "Citadel", 500, "unsettled")));
            monitor.apply_change(&TradeChange::Update(raw(1, "UBS", 300, "unsettled")));
            monitor.apply_change(&TradeChange::Insert(raw(3, "BNP", 50, "unsettled")));
            release.notify_one();
        };
        let (metrics, ()) = tokio::join!(monitor.refresh(), changes);

        let metrics = metrics.unwrap();
        assert_eq!(monitor.trade_count(), 3);
        assert_eq!(metrics.summary.total_unsettled_value, Decimal::from(850));

        monitor.apply_change(&TradeChange::Delete(TradeId::from(2)));
        assert_eq!(monitor.trade_count(), 2);
    }

    #[tokio::test]
    async fn check_alerts_reports_delivery() {
        let monitor = monitor(vec![
            raw(1, "UBS", 100, "unsettled"),
            raw(2, "UBS", 100, "unsettled"),
        ]);
        monitor.refresh().await.unwrap();
        let evaluator =
            AlertEvaluator::new().with_limits(RiskLimits::default().with_max_unsettled_trades(1));

        let notifier = RecordingNotifier::new();
        let report = monitor.check_alerts(&evaluator, &notifier).await;
        assert!(report.is_delivered());
        assert_eq!(notifier.digest_count(), 1);

        let failing = RecordingNotifier::failing(NotificationError::NoRecipients);
        let report = monitor.check_alerts(&evaluator, &failing).await;
        assert_eq!(report.alerts.len(), 1);
        assert!(matches!(report.delivery, DeliveryStatus::Failed(_)));
    }

    #[tokio::test]
    async fn quiet_book_skips_delivery() {
        let monitor = monitor(vec![raw(1, "UBS", 100, "settled")]);
        monitor.refresh().await.unwrap();
        let notifier = RecordingNotifier::new();
        let report = monitor
            .check_alerts(&AlertEvaluator::new(), &notifier)
            .await;
        assert!(matches!(report.delivery, DeliveryStatus::Skipped));
        assert_eq!(notifier.digest_count(), 0);
    }
}

//! # Settlement Risk
//!
//! Settlement-risk aggregation for a trade book.
//!
//! Raw trade rows are normalized into typed [`Trade`](domain::entities::Trade)
//! records, grouped per counterparty and per settlement location, ranked,
//! and assembled into a single [`RiskMetrics`](domain::services::RiskMetrics)
//! value:
//!
//! - counterparty exposure, largest first, with per-location counts of open trades
//! - buy/sell activity per counterparty
//! - the largest open trades ("top fails")
//! - open trade count and value per settlement location
//! - portfolio summary figures
//!
//! Aggregation is a pure function of the full trade list. The
//! [`RiskMonitor`](application::services::RiskMonitor) keeps that list current
//! from a store and a change feed, and checks alert thresholds.
//!
//! # Layers
//!
//! - [`domain`]: Value objects, trade records, aggregation and alert rules
//! - [`application`]: Snapshot maintenance, monitoring, error hierarchy
//! - [`infrastructure`]: REST store client, in-memory stores, email notifier
//! - [`config`]: Layered configuration
//! - [`telemetry`]: Tracing setup
//!
//! # Example
//!
//! ```
//! use settlement_risk::domain::entities::RawTrade;
//! use settlement_risk::domain::services::RiskAggregator;
//!
//! let rows = vec![
//!     RawTrade::new()
//!         .with_id(1)
//!         .with_counterparty("Goldman Sachs")
//!         .with_net_money(-800_000)
//!         .with_status("unsettled")
//!         .with_location("Fed"),
//! ];
//! let metrics = RiskAggregator::default().aggregate_raw(&rows);
//! assert_eq!(metrics.largest_exposure().name, "Goldman Sachs");
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod telemetry;

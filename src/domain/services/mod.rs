//! # Domain Services
//!
//! Pure computations over normalized trades.
//!
//! ## Pipeline
//!
//! - [`normalizer`]: Raw row to typed [`Trade`](crate::domain::entities::Trade)
//! - [`grouping`]: Keyed running aggregates
//! - [`ranking`]: Stable descending rank with top-N cut
//! - [`metrics`]: [`RiskAggregator`] assembling [`RiskMetrics`]
//!
//! ## Rules
//!
//! - [`alerts`]: [`AlertEvaluator`] threshold checks

pub mod alerts;
pub mod grouping;
pub mod metrics;
pub mod normalizer;
pub mod ranking;

pub use alerts::{Alert, AlertEvaluator, AlertKind};
pub use grouping::{Grouped, group_by};
pub use metrics::{
    AggregatorConfig, CounterpartyActivity, CounterpartyExposure, FailedTrade, Headline,
    LocationCounts, LocationExposure, NOT_AVAILABLE, PortfolioSummary, RiskAggregator,
    RiskMetrics,
};
pub use normalizer::{coerce_decimal, normalize_trade, normalize_trades, parse_date};
pub use ranking::{RankedEntry, rank_descending, top_entry};

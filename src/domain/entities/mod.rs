//! # Domain Entities
//!
//! Records the risk computations operate on.
//!
//! - [`RawTrade`]: Trade row as delivered by the store
//! - [`Trade`]: Normalized trade
//! - [`SettlementFail`]: Row of the settlement-fails view
//! - [`AlertPreferences`], [`RiskLimits`]: Alert thresholds

pub mod alert_preferences;
pub mod settlement_fail;
pub mod trade;

pub use alert_preferences::{AlertPreferences, DEFAULT_COUNTERPARTY_TRADE_THRESHOLD, RiskLimits};
pub use settlement_fail::{SettlementFail, sort_by_fail_days, total_fail_cost};
pub use trade::{RawTrade, Trade};

//! # Application Services
//!
//! Services that orchestrate domain logic and infrastructure.
//!
//! - [`load_alert_rules`]: Desk limits plus a user's stored preferences
//! - [`TradeSnapshot`]: Normalized trade list maintained from change events
//! - [`RiskMonitor`]: Loads trades, applies changes, recomputes metrics and dispatches alerts

pub mod alert_rules;
pub mod monitor;
pub mod snapshot;

pub use alert_rules::load_alert_rules;
pub use monitor::{AlertReport, DeliveryStatus, RiskMonitor};
pub use snapshot::{SnapshotUpdate, TradeSnapshot};

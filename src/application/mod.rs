//! # Application Layer
//!
//! Orchestration of the store, the aggregation pipeline and alert delivery.
//!
//! - [`error`]: Application error hierarchy
//! - [`services`]: [`RiskMonitor`](services::RiskMonitor) and [`TradeSnapshot`](services::TradeSnapshot)

pub mod error;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};

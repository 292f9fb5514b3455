//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Identity Types
//!
//! - [`TradeId`]: Store-assigned trade key
//! - [`CounterpartyName`]: Normalized counterparty grouping key
//! - [`EventId`]: Change event identifier
//!
//! ## Arithmetic
//!
//! - [`CheckedArithmetic`]: Trait for safe arithmetic operations
//! - [`accumulate`]: Saturating running totals
//!
//! ## Domain Enums
//!
//! - [`TradeSide`]: Buy or Sell
//! - [`SettlementStatus`]: Settled, unsettled or unknown
//! - [`SettlementLocation`]: Fed, DTC, Euroclear or unknown
//! - [`AlertSeverity`]: Low, medium or high

pub mod arithmetic;
pub mod enums;
pub mod ids;

pub use arithmetic::{ArithmeticError, ArithmeticResult, CheckedArithmetic, accumulate};
pub use enums::{AlertSeverity, ParseEnumError, SettlementLocation, SettlementStatus, TradeSide};
pub use ids::{CounterpartyName, EventId, TradeId, UNKNOWN_COUNTERPARTY};

//! # Domain Events
//!
//! Change notifications from the store's realtime feed.
//!
//! - [`TradeChange`]: Insert, update or delete of a trade row
//! - [`TradeChangeEvent`]: A change with its [`EventMetadata`]

pub mod domain_event;
pub mod trade_change;

pub use domain_event::{DomainEvent, EventMetadata, EventType};
pub use trade_change::{TradeChange, TradeChangeEvent};

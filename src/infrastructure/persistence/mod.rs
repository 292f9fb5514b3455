//! # Persistence Layer
//!
//! Ports to the external store and their in-memory implementations.
//!
//! ## Ports
//!
//! - [`TradeSource`]: Paged trade reads
//! - [`SettlementFailSource`]: Settlement-fails view
//! - [`AlertPreferencesRepository`]: Alert preferences
//!
//! The REST implementation lives in
//! [`infrastructure::rest`](crate::infrastructure::rest).

pub mod in_memory;
pub mod traits;

pub use traits::{
    AlertPreferencesRepository, DEFAULT_PAGE_SIZE, RepositoryError, RepositoryResult,
    SettlementFailSource, TimeFrame, TradeQuery, TradeSource,
};

//! # In-Memory Repositories
//!
//! In-memory implementations for testing and offline use.
//!
//! - [`InMemoryTradeSource`]: Trade rows and settlement fails
//! - [`InMemoryAlertPreferencesRepository`]: Alert preferences

pub mod alert_preferences_repository;
pub mod trade_source;

pub use alert_preferences_repository::InMemoryAlertPreferencesRepository;
pub use trade_source::InMemoryTradeSource;

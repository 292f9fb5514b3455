//! # REST Store Adapter
//!
//! HTTP access to the hosted trade store.
//!
//! - [`RestStore`]: Trades, settlement fails and alert preferences
//! - [`HttpClient`]: Timeouts, default headers and status mapping
//! - [`StoreError`]: Transport-level failures

pub mod error;
pub mod http_client;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use http_client::HttpClient;
pub use store::{DEFAULT_TIMEOUT_MS, RestStore, RestStoreConfig};

//! # Domain Layer
//!
//! Trade records, their normalization, and the risk figures derived from
//! them. Nothing in this layer performs I/O.
//!
//! - [`value_objects`]: Identifiers, enums and checked arithmetic
//! - [`entities`]: Raw and normalized trades, fails, alert settings
//! - [`events`]: Change feed events
//! - [`services`]: Normalizer, grouping, ranking, metrics and alerts
//! - [`errors`]: Validation errors

pub mod entities;
pub mod errors;
pub mod events;
pub mod services;
pub mod value_objects;

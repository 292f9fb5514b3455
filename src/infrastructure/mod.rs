//! # Infrastructure Layer
//!
//! Adapters between the domain and the outside world.
//!
//! - [`persistence`]: Store ports and in-memory implementations
//! - [`rest`]: REST client for the hosted store
//! - [`notifications`]: Alert delivery

pub mod notifications;
pub mod persistence;
pub mod rest;

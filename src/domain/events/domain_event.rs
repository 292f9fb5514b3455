//! # Domain Event Trait
//!
//! Base trait for change events, along with common event metadata.

use crate::domain::value_objects::EventId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Type of domain event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    /// A trade row was added.
    Insert,
    /// A trade row was changed.
    Update,
    /// A trade row was removed.
    Delete,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insert => write!(f, "INSERT"),
            Self::Update => write!(f, "UPDATE"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// Trait for all domain events.
///
/// Events are immutable records of something that happened in the store.
pub trait DomainEvent: Send + Sync + fmt::Debug {
    /// Returns the unique identifier for this event.
    fn event_id(&self) -> EventId;

    /// Returns when this event was received.
    fn received_at(&self) -> DateTime<Utc>;

    /// Returns the type of this event.
    fn event_type(&self) -> EventType;

    /// Returns the human-readable name of this event.
    fn event_name(&self) -> &'static str;
}

/// Common metadata for all domain events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetadata {
    /// Unique identifier for this event.
    pub event_id: EventId,
    /// When this event was received.
    pub received_at: DateTime<Utc>,
}

impl EventMetadata {
    /// Creates new event metadata with a generated event ID.
    #[must_use]
    pub fn new() -> Self {
        Self {
            event_id: EventId::new_v4(),
            received_at: Utc::now(),
        }
    }

    /// Creates event metadata with specific values (for replay).
    #[must_use]
    pub fn from_parts(event_id: EventId, received_at: DateTime<Utc>) -> Self {
        Self {
            event_id,
            received_at,
        }
    }
}

impl Default for EventMetadata {
    fn default() -> Self {
        Self::new()
    }
}

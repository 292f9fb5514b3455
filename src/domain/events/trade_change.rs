//! # Trade Change Events
//!
//! Insert, update and delete notifications from the store's change feed.
//!
//! The feed delivers rows in the store's raw shape; normalization happens
//! when the change is applied to a snapshot.

use crate::domain::entities::RawTrade;
use crate::domain::events::domain_event::{DomainEvent, EventMetadata, EventType};
use crate::domain::value_objects::{EventId, TradeId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A change to the trades table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "record", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeChange {
    /// A new row.
    Insert(RawTrade),
    /// A changed row, matched to the snapshot by id.
    Update(RawTrade),
    /// A removed row.
    Delete(TradeId),
}

impl TradeChange {
    /// Returns the type of this change.
    #[must_use]
    pub fn event_type(&self) -> EventType {
        match self {
            Self::Insert(_) => EventType::Insert,
            Self::Update(_) => EventType::Update,
            Self::Delete(_) => EventType::Delete,
        }
    }

    /// Returns the id of the affected row, if known.
    #[must_use]
    pub fn trade_id(&self) -> Option<TradeId> {
        match self {
            Self::Insert(raw) | Self::Update(raw) => raw.trade_id(),
            Self::Delete(id) => Some(id.clone()),
        }
    }

    /// Decodes a realtime notification payload.
    ///
    /// The payload carries `eventType` plus the `new` row for inserts and
    /// updates, or the `old` row for deletes. Returns `None` for other
    /// event types, a missing row or a delete without a usable id.
    #[must_use]
    pub fn from_realtime(payload: &Value) -> Option<Self> {
        let event_type = payload.get("eventType")?.as_str()?;
        match event_type.to_ascii_uppercase().as_str() {
            "INSERT" => Some(Self::Insert(row(payload, "new")?)),
            "UPDATE" => Some(Self::Update(row(payload, "new")?)),
            "DELETE" => payload
                .get("old")
                .and_then(|old| old.get("id"))
                .and_then(TradeId::from_json)
                .map(Self::Delete),
            _ => None,
        }
    }
}

fn row(payload: &Value, key: &str) -> Option<RawTrade> {
    let value = payload.get(key)?;
    if !value.is_object() {
        return None;
    }
    serde_json::from_value(value.clone()).ok()
}

/// A change with its event metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeChangeEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// The change.
    pub change: TradeChange,
}

impl TradeChangeEvent {
    /// Wraps a change with fresh metadata.
    #[must_use]
    pub fn new(change: TradeChange) -> Self {
        Self {
            metadata: EventMetadata::new(),
            change,
        }
    }
}

impl From<TradeChange> for TradeChangeEvent {
    fn from(change: TradeChange) -> Self {
        Self::new(change)
    }
}

impl DomainEvent for TradeChangeEvent {
    fn event_id(&self) -> EventId {
        self.metadata.event_id
    }

    fn received_at(&self) -> DateTime<Utc> {
        self.metadata.received_at
    }

    fn event_type(&self) -> EventType {
        self.change.event_type()
    }

    fn event_name(&self) -> &'static str {
        match self.change {
            TradeChange::Insert(_) => "TradeInserted",
            TradeChange::Update(_) => "TradeUpdated",
            TradeChange::Delete(_) => "TradeDeleted",
        }
    }
}

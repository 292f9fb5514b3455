//! # Identifiers
//!
//! Identity types for trades, counterparties and change events.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Sentinel used for trades whose counterparty is missing or blank.
pub const UNKNOWN_COUNTERPARTY: &str = "Unknown";

/// Opaque trade identifier as assigned by the store.
///
/// Numeric keys are kept in their decimal string form so both integer and
/// text primary keys compare the same way.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TradeId(String);

impl TradeId {
    /// Creates a trade identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Builds an identifier from a raw JSON key.
    ///
    /// Returns `None` for null, blank strings and non-scalar values.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(Self::new(s.trim())),
            serde_json::Value::Number(n) => Some(Self::new(n.to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for TradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for TradeId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for TradeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Normalized counterparty name, used as the grouping key.
///
/// Construction through [`CounterpartyName::normalize`] strips surrounding
/// whitespace and quote characters; an empty result becomes
/// [`UNKNOWN_COUNTERPARTY`].
///
/// # Examples
///
/// ```
/// use settlement_risk::domain::value_objects::CounterpartyName;
///
/// assert_eq!(CounterpartyName::normalize(Some("  'Citadel'  ")).as_str(), "Citadel");
/// assert!(CounterpartyName::normalize(None).is_unknown());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CounterpartyName(String);

impl CounterpartyName {
    /// Creates a name without normalization.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the sentinel name for missing counterparties.
    #[must_use]
    pub fn unknown() -> Self {
        Self(UNKNOWN_COUNTERPARTY.to_string())
    }

    /// Normalizes a raw counterparty field.
    #[must_use]
    pub fn normalize(raw: Option<&str>) -> Self {
        let trimmed = raw
            .map(|s| s.trim_matches(|c: char| c.is_whitespace() || is_quote(c)))
            .unwrap_or_default();
        if trimmed.is_empty() {
            Self::unknown()
        } else {
            Self(trimmed.to_string())
        }
    }

    /// Returns the name as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true for the missing-counterparty sentinel.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN_COUNTERPARTY
    }
}

impl fmt::Display for CounterpartyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_quote(c: char) -> bool {
    matches!(c, '\'' | '"' | '`' | '\u{2018}' | '\u{2019}' | '\u{201C}' | '\u{201D}')
}

/// Identifier of a change event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(Uuid);

impl EventId {
    /// Generates a random event identifier.
    #[must_use]
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub fn get(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn trade_id_from_numeric_json() {
        assert_eq!(TradeId::from_json(&json!(42)), Some(TradeId::from(42)));
    }

    #[test]
    fn trade_id_from_string_json() {
        assert_eq!(
            TradeId::from_json(&json!(" T-1 ")),
            Some(TradeId::new("T-1"))
        );
    }

    #[test]
    fn trade_id_rejects_null_and_blank() {
        assert_eq!(TradeId::from_json(&json!(null)), None);
        assert_eq!(TradeId::from_json(&json!("  ")), None);
        assert_eq!(TradeId::from_json(&json!({"id": 1})), None);
    }

    #[test]
    fn counterparty_strips_quotes_and_whitespace() {
        assert_eq!(
            CounterpartyName::normalize(Some("  'Citadel'  ")).as_str(),
            "Citadel"
        );
        assert_eq!(
            CounterpartyName::normalize(Some("\"Goldman Sachs\"")).as_str(),
            "Goldman Sachs"
        );
    }

    #[test]
    fn counterparty_keeps_inner_apostrophes() {
        assert_eq!(
            CounterpartyName::normalize(Some("Moody's Capital")).as_str(),
            "Moody's Capital"
        );
    }

    #[test]
    fn counterparty_missing_or_blank_is_unknown() {
        assert!(CounterpartyName::normalize(None).is_unknown());
        assert!(CounterpartyName::normalize(Some(" '' ")).is_unknown());
    }

    #[test]
    fn counterparty_serializes_as_plain_string() {
        let json = serde_json::to_string(&CounterpartyName::new("UBS")).unwrap();
        assert_eq!(json, "\"UBS\"");
    }

    #[test]
    fn event_ids_are_unique() {
        assert_ne!(EventId::new_v4(), EventId::new_v4());
    }
}

//! # Trade Records
//!
//! [`RawTrade`] is the loosely typed row exactly as the store delivers it.
//! [`Trade`] is the fully typed record produced by the normalizer; every
//! aggregation works on `Trade` only.

use crate::domain::value_objects::{
    CounterpartyName, SettlementLocation, SettlementStatus, TradeId, TradeSide,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A trade row with every field optional and loosely typed.
///
/// Numeric columns keep the raw JSON value (number, numeric string, bool or
/// null) so that coercion happens in one place. Text columns accept any
/// scalar and stringify it. Deserialization of a JSON object never fails on
/// field content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawTrade {
    /// Store primary key.
    pub id: Option<Value>,
    /// Buy/sell indicator, any casing.
    #[serde(deserialize_with = "lenient_string")]
    pub buy_sell_indicator: Option<String>,
    /// Product type, e.g. `Treasury`.
    #[serde(deserialize_with = "lenient_string")]
    pub product_type: Option<String>,
    /// CUSIP of the security.
    #[serde(deserialize_with = "lenient_string")]
    pub cusip: Option<String>,
    /// Quantity traded.
    pub quantity: Option<Value>,
    /// Execution price.
    pub price: Option<Value>,
    /// Signed net settlement amount.
    pub net_money: Option<Value>,
    /// Counterparty name, possibly quoted or padded.
    #[serde(deserialize_with = "lenient_string")]
    pub counterparty_name: Option<String>,
    /// Trade date as text.
    #[serde(deserialize_with = "lenient_string")]
    pub trade_date: Option<String>,
    /// Contractual settlement date as text.
    #[serde(deserialize_with = "lenient_string")]
    pub settlement_date: Option<String>,
    /// Settlement status, any casing.
    #[serde(deserialize_with = "lenient_string")]
    pub settlement_status: Option<String>,
    /// Settlement location, any casing.
    #[serde(deserialize_with = "lenient_string")]
    pub settlement_location: Option<String>,
    /// Settlement currency.
    #[serde(deserialize_with = "lenient_string")]
    pub currency: Option<String>,
}

impl RawTrade {
    /// Creates an empty raw trade.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the store key.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<Value>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the buy/sell indicator.
    #[must_use]
    pub fn with_side(mut self, side: impl Into<String>) -> Self {
        self.buy_sell_indicator = Some(side.into());
        self
    }

    /// Sets the counterparty name.
    #[must_use]
    pub fn with_counterparty(mut self, name: impl Into<String>) -> Self {
        self.counterparty_name = Some(name.into());
        self
    }

    /// Sets the net money column.
    #[must_use]
    pub fn with_net_money(mut self, amount: impl Into<Value>) -> Self {
        self.net_money = Some(amount.into());
        self
    }

    /// Sets the quantity column.
    #[must_use]
    pub fn with_quantity(mut self, quantity: impl Into<Value>) -> Self {
        self.quantity = Some(quantity.into());
        self
    }

    /// Sets the settlement status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.settlement_status = Some(status.into());
        self
    }

    /// Sets the settlement location.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.settlement_location = Some(location.into());
        self
    }

    /// Sets the settlement date.
    #[must_use]
    pub fn with_settlement_date(mut self, date: impl Into<String>) -> Self {
        self.settlement_date = Some(date.into());
        self
    }

    /// Sets the trade date.
    #[must_use]
    pub fn with_trade_date(mut self, date: impl Into<String>) -> Self {
        self.trade_date = Some(date.into());
        self
    }

    /// Returns the store key when it is usable as an identifier.
    #[must_use]
    pub fn trade_id(&self) -> Option<TradeId> {
        self.id.as_ref().and_then(TradeId::from_json)
    }
}

/// A normalized trade.
///
/// Field names serialize with the store's column names so a normalized
/// record can be written back or exported without remapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    /// Store key, if the row carried a usable one.
    pub id: Option<TradeId>,
    /// Trade direction; `None` when the indicator was missing or unrecognized.
    #[serde(rename = "buy_sell_indicator")]
    pub side: Option<TradeSide>,
    /// Product type.
    pub product_type: Option<String>,
    /// CUSIP.
    pub cusip: Option<String>,
    /// Quantity, zero when unparseable.
    pub quantity: Decimal,
    /// Price, zero when unparseable.
    pub price: Decimal,
    /// Signed net amount, zero when unparseable.
    pub net_money: Decimal,
    /// Normalized counterparty.
    #[serde(rename = "counterparty_name")]
    pub counterparty: CounterpartyName,
    /// Trade date.
    pub trade_date: Option<NaiveDate>,
    /// Settlement date.
    pub settlement_date: Option<NaiveDate>,
    /// Settlement status.
    #[serde(rename = "settlement_status")]
    pub status: SettlementStatus,
    /// Settlement location.
    #[serde(rename = "settlement_location")]
    pub location: SettlementLocation,
    /// Currency code.
    pub currency: Option<String>,
}

impl Trade {
    /// Returns the risk magnitude of this trade (absolute net amount).
    #[inline]
    #[must_use]
    pub fn exposure(&self) -> Decimal {
        self.net_money.abs()
    }

    /// Returns true if settlement is still outstanding.
    #[inline]
    #[must_use]
    pub fn is_unsettled(&self) -> bool {
        self.status.is_open()
    }

    /// Returns true if the trade has the given id.
    #[must_use]
    pub fn has_id(&self, id: &TradeId) -> bool {
        self.id.as_ref() == Some(id)
    }
}

/// Accepts any JSON scalar as an optional string.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn raw_trade_tolerates_missing_fields() {
        let raw: RawTrade = serde_json::from_value(json!({})).unwrap();
        assert_eq!(raw, RawTrade::default());
    }

    #[test]
    fn raw_trade_tolerates_odd_types() {
        let raw: RawTrade = serde_json::from_value(json!({
            "id": 7,
            "buy_sell_indicator": 1,
            "counterparty_name": null,
            "net_money": "12.5",
            "settlement_status": ["settled"],
            "extra_column": "ignored"
        }))
        .unwrap();

        assert_eq!(raw.trade_id(), Some(TradeId::from(7)));
        assert_eq!(raw.buy_sell_indicator.as_deref(), Some("1"));
        assert!(raw.counterparty_name.is_none());
        assert_eq!(raw.net_money, Some(json!("12.5")));
        assert!(raw.settlement_status.is_none());
    }

    #[test]
    fn builder_sets_fields() {
        let raw = RawTrade::new()
            .with_id(1)
            .with_side("Buy")
            .with_counterparty("UBS")
            .with_net_money(-500_000)
            .with_status("unsettled")
            .with_location("Fed");

        assert_eq!(raw.trade_id(), Some(TradeId::from(1)));
        assert_eq!(raw.counterparty_name.as_deref(), Some("UBS"));
        assert_eq!(raw.net_money, Some(json!(-500_000)));
    }

    #[test]
    fn normalized_trade_serializes_with_store_columns() {
        let trade = Trade {
            id: Some(TradeId::from(1)),
            side: Some(TradeSide::Sell),
            product_type: None,
            cusip: None,
            quantity: Decimal::new(10, 0),
            price: Decimal::new(100, 0),
            net_money: Decimal::new(-1000, 0),
            counterparty: CounterpartyName::new("UBS"),
            trade_date: None,
            settlement_date: NaiveDate::from_ymd_opt(2024, 3, 1),
            status: SettlementStatus::Unsettled,
            location: SettlementLocation::Dtc,
            currency: Some("USD".to_string()),
        };

        let value = serde_json::to_value(&trade).unwrap();
        assert_eq!(value["buy_sell_indicator"], "Sell");
        assert_eq!(value["counterparty_name"], "UBS");
        assert_eq!(value["settlement_status"], "unsettled");
        assert_eq!(value["settlement_location"], "DTC");
        assert_eq!(value["settlement_date"], "2024-03-01");
        assert_eq!(trade.exposure(), Decimal::new(1000, 0));
        assert!(trade.is_unsettled());
    }
}

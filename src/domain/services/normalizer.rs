//! # Trade Normalizer
//!
//! Converts [`RawTrade`] rows into fully typed [`Trade`] records.
//!
//! Normalization never fails. Lossy defaults apply instead:
//!
//! | Field                 | Missing / unparseable        |
//! |-----------------------|------------------------------|
//! | quantity, price, net  | `0`                          |
//! | settlement_status     | `unsettled` (open risk)      |
//! | settlement_location   | `Unknown`                    |
//! | counterparty_name     | `Unknown`                    |
//! | buy_sell_indicator    | no side                      |
//! | dates                 | absent                       |

use crate::domain::entities::{RawTrade, Trade};
use crate::domain::value_objects::{
    CounterpartyName, SettlementLocation, SettlementStatus, TradeSide,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde_json::{Number, Value};
use std::str::FromStr;

/// Normalizes a single raw trade.
///
/// # Examples
///
/// ```
/// use settlement_risk::domain::entities::RawTrade;
/// use settlement_risk::domain::services::normalizer::normalize_trade;
/// use settlement_risk::domain::value_objects::SettlementStatus;
/// use rust_decimal::Decimal;
///
/// let trade = normalize_trade(&RawTrade::new().with_net_money("not a number"));
/// assert_eq!(trade.net_money, Decimal::ZERO);
/// assert_eq!(trade.counterparty.as_str(), "Unknown");
/// assert_eq!(trade.status, SettlementStatus::Unsettled);
/// ```
#[must_use]
pub fn normalize_trade(raw: &RawTrade) -> Trade {
    Trade {
        id: raw.trade_id(),
        side: TradeSide::normalize(raw.buy_sell_indicator.as_deref()),
        product_type: clean_text(raw.product_type.as_deref()),
        cusip: clean_text(raw.cusip.as_deref()),
        quantity: coerce_decimal(raw.quantity.as_ref()),
        price: coerce_decimal(raw.price.as_ref()),
        net_money: coerce_decimal(raw.net_money.as_ref()),
        counterparty: CounterpartyName::normalize(raw.counterparty_name.as_deref()),
        trade_date: parse_date(raw.trade_date.as_deref()),
        settlement_date: parse_date(raw.settlement_date.as_deref()),
        status: SettlementStatus::normalize(raw.settlement_status.as_deref()),
        location: SettlementLocation::normalize(raw.settlement_location.as_deref()),
        currency: clean_text(raw.currency.as_deref()),
    }
}

/// Normalizes a list of raw trades, preserving order.
#[must_use]
pub fn normalize_trades(raw: &[RawTrade]) -> Vec<Trade> {
    raw.iter().map(normalize_trade).collect()
}

/// Coerces a loosely typed JSON value to a decimal, defaulting to zero.
///
/// Accepts numbers, numeric strings (including scientific notation) and
/// booleans (`true` is one). Anything else, including non-finite floats,
/// yields zero.
#[must_use]
pub fn coerce_decimal(value: Option<&Value>) -> Decimal {
    match value {
        Some(Value::Number(n)) => number_to_decimal(n),
        Some(Value::String(s)) => parse_decimal(s),
        Some(Value::Bool(true)) => Decimal::ONE,
        _ => Decimal::ZERO,
    }
}

fn number_to_decimal(n: &Number) -> Decimal {
    if let Some(i) = n.as_i64() {
        return Decimal::from(i);
    }
    if let Some(u) = n.as_u64() {
        return Decimal::from(u);
    }
    let text = n.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
        .or_else(|| n.as_f64().and_then(Decimal::from_f64))
        .unwrap_or(Decimal::ZERO)
}

fn parse_decimal(s: &str) -> Decimal {
    let s = s.trim();
    if s.is_empty() {
        return Decimal::ZERO;
    }
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .unwrap_or(Decimal::ZERO)
}

/// Parses a calendar date from `YYYY-MM-DD`, RFC 3339 or a naive ISO
/// date-time. Returns `None` for anything else.
#[must_use]
pub fn parse_date(raw: Option<&str>) -> Option<NaiveDate> {
    let s = raw?.trim();
    if s.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
}

fn clean_text(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

//! # Settlement Fails
//!
//! Rows of the store's settlement-fails view: trades past their settlement
//! date, with the number of days failed and the accrued fail cost.

use crate::domain::entities::trade::lenient_string;
use crate::domain::value_objects::arithmetic::accumulate;
use crate::domain::value_objects::{CounterpartyName, TradeId};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// A failed settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementFail {
    /// Trade key.
    #[serde(default, deserialize_with = "trade_id")]
    pub id: Option<TradeId>,
    /// Counterparty as reported by the view.
    #[serde(
        rename = "counterparty_name",
        default = "CounterpartyName::unknown",
        deserialize_with = "counterparty"
    )]
    pub counterparty: CounterpartyName,
    /// Contractual settlement date.
    #[serde(default)]
    pub settlement_date: Option<NaiveDate>,
    /// Days elapsed since the contractual settlement date.
    #[serde(default)]
    pub fail_days: i64,
    /// Signed net amount of the failed trade.
    #[serde(default)]
    pub net_money: Decimal,
    /// Cost accrued by the fail.
    #[serde(default)]
    pub fail_cost: Decimal,
}

impl SettlementFail {
    /// Returns the absolute value at risk.
    #[must_use]
    pub fn value(&self) -> Decimal {
        self.net_money.abs()
    }
}

/// Orders fails oldest first (most fail days), keeping input order for ties.
pub fn sort_by_fail_days(fails: &mut [SettlementFail]) {
    fails.sort_by(|a, b| b.fail_days.cmp(&a.fail_days));
}

/// Sums the fail cost over all fails.
#[must_use]
pub fn total_fail_cost(fails: &[SettlementFail]) -> Decimal {
    fails
        .iter()
        .fold(Decimal::ZERO, |acc, f| accumulate(acc, f.fail_cost, "fail_cost"))
}

fn trade_id<'de, D>(deserializer: D) -> Result<Option<TradeId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = lenient_string(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()).map(TradeId::new))
}

fn counterparty<'de, D>(deserializer: D) -> Result<CounterpartyName, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = lenient_string(deserializer)?;
    Ok(CounterpartyName::normalize(raw.as_deref()))
}

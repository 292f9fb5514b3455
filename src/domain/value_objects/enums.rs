//! # Domain Enums
//!
//! Enumeration types for settlement-risk concepts.
//!
//! - [`TradeSide`] - Buy or Sell direction
//! - [`SettlementStatus`] - Settled, unsettled or unknown
//! - [`SettlementLocation`] - Depository through which a trade settles
//! - [`AlertSeverity`] - Severity attached to risk alerts
//!
//! Parsing is case-insensitive for every enum. Strict parsing goes through
//! `FromStr`; the lenient `normalize` constructors used on raw store rows
//! never fail and fall back to the documented defaults instead.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Trade direction.
///
/// # Examples
///
/// ```
/// use settlement_risk::domain::value_objects::enums::TradeSide;
///
/// assert_eq!("buy".parse::<TradeSide>().unwrap(), TradeSide::Buy);
/// assert_eq!(TradeSide::Sell.to_string(), "Sell");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TradeSide {
    /// Buying the security.
    Buy = 0,
    /// Selling the security.
    Sell = 1,
}

impl TradeSide {
    /// Parses a raw indicator, returning `None` for missing or unrecognized text.
    #[must_use]
    pub fn normalize(raw: Option<&str>) -> Option<Self> {
        raw.and_then(|s| s.trim().parse().ok())
    }

    /// Returns true if this is a buy.
    #[inline]
    #[must_use]
    pub const fn is_buy(self) -> bool {
        matches!(self, Self::Buy)
    }

    /// Returns true if this is a sell.
    #[inline]
    #[must_use]
    pub const fn is_sell(self) -> bool {
        matches!(self, Self::Sell)
    }
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "Buy"),
            Self::Sell => write!(f, "Sell"),
        }
    }
}

impl FromStr for TradeSide {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "BUY" | "B" => Ok(Self::Buy),
            "SELL" | "S" => Ok(Self::Sell),
            _ => Err(ParseEnumError::InvalidValue("TradeSide", s.to_string())),
        }
    }
}

/// Settlement status of a trade.
///
/// A missing status is treated as open risk: [`SettlementStatus::normalize`]
/// maps absent or blank input to [`SettlementStatus::Unsettled`]. Text that is
/// present but unrecognized becomes [`SettlementStatus::Unknown`].
///
/// # Examples
///
/// ```
/// use settlement_risk::domain::value_objects::enums::SettlementStatus;
///
/// assert_eq!(SettlementStatus::normalize(None), SettlementStatus::Unsettled);
/// assert_eq!(SettlementStatus::normalize(Some("SETTLED")), SettlementStatus::Settled);
/// assert_eq!(SettlementStatus::normalize(Some("pending")), SettlementStatus::Unknown);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum SettlementStatus {
    /// Settlement completed.
    Settled = 0,
    /// Settlement outstanding.
    #[default]
    Unsettled = 1,
    /// Status reported but not recognized.
    Unknown = 2,
}

impl SettlementStatus {
    /// Normalizes a raw status value.
    #[must_use]
    pub fn normalize(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => Self::Unsettled,
            Some(s) => s.parse().unwrap_or(Self::Unknown),
        }
    }

    /// Returns true if the trade still carries settlement risk.
    #[inline]
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Unsettled)
    }

    /// Returns the lower-case wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Settled => "settled",
            Self::Unsettled => "unsettled",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SettlementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettlementStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "settled" => Ok(Self::Settled),
            "unsettled" => Ok(Self::Unsettled),
            "unknown" => Ok(Self::Unknown),
            _ => Err(ParseEnumError::InvalidValue(
                "SettlementStatus",
                s.to_string(),
            )),
        }
    }
}

/// Settlement venue or depository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum SettlementLocation {
    /// Federal Reserve (Fedwire Securities).
    Fed = 0,
    /// Depository Trust Company.
    #[serde(rename = "DTC")]
    Dtc = 1,
    /// Euroclear.
    Euroclear = 2,
    /// Missing or unrecognized location.
    #[default]
    Unknown = 3,
}

impl SettlementLocation {
    /// All locations in reporting order.
    pub const ALL: [Self; 4] = [Self::Fed, Self::Dtc, Self::Euroclear, Self::Unknown];

    /// Normalizes a raw location, defaulting to [`SettlementLocation::Unknown`].
    #[must_use]
    pub fn normalize(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.trim().parse().ok())
            .unwrap_or(Self::Unknown)
    }

    /// Returns the display name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fed => "Fed",
            Self::Dtc => "DTC",
            Self::Euroclear => "Euroclear",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for SettlementLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettlementLocation {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "FED" | "FEDWIRE" => Ok(Self::Fed),
            "DTC" => Ok(Self::Dtc),
            "EUROCLEAR" => Ok(Self::Euroclear),
            "UNKNOWN" => Ok(Self::Unknown),
            _ => Err(ParseEnumError::InvalidValue(
                "SettlementLocation",
                s.to_string(),
            )),
        }
    }
}

/// Severity of a risk alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    /// Informational breach.
    Low,
    /// Breach worth attention today.
    Medium,
    /// Breach requiring immediate action.
    High,
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

impl FromStr for AlertSeverity {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParseEnumError::InvalidValue("AlertSeverity", s.to_string())),
        }
    }
}

/// Error type for parsing enum values from strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseEnumError {
    /// The provided string value is not valid for the enum.
    InvalidValue(&'static str, String),
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue(enum_name, value) => {
                write!(f, "invalid {} value: '{}'", enum_name, value)
            }
        }
    }
}

impl std::error::Error for ParseEnumError {}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod trade_side {
        use super::*;

        #[test]
        fn from_str_is_case_insensitive() {
            assert_eq!("BUY".parse::<TradeSide>().unwrap(), TradeSide::Buy);
            assert_eq!("Buy".parse::<TradeSide>().unwrap(), TradeSide::Buy);
            assert_eq!("sell".parse::<TradeSide>().unwrap(), TradeSide::Sell);
        }

        #[test]
        fn from_str_invalid() {
            assert!("HOLD".parse::<TradeSide>().is_err());
        }

        #[test]
        fn normalize_handles_missing_and_padding() {
            assert_eq!(TradeSide::normalize(Some("  sell ")), Some(TradeSide::Sell));
            assert_eq!(TradeSide::normalize(Some("short")), None);
            assert_eq!(TradeSide::normalize(None), None);
        }

        #[test]
        fn serde_matches_store_spelling() {
            let json = serde_json::to_string(&TradeSide::Buy).unwrap();
            assert_eq!(json, "\"Buy\"");
        }
    }

    mod settlement_status {
        use super::*;

        #[test]
        fn missing_defaults_to_unsettled() {
            assert_eq!(SettlementStatus::normalize(None), SettlementStatus::Unsettled);
            assert_eq!(
                SettlementStatus::normalize(Some("   ")),
                SettlementStatus::Unsettled
            );
        }

        #[test]
        fn recognized_values_ignore_case() {
            assert_eq!(
                SettlementStatus::normalize(Some("Settled")),
                SettlementStatus::Settled
            );
            assert_eq!(
                SettlementStatus::normalize(Some("UNSETTLED")),
                SettlementStatus::Unsettled
            );
        }

        #[test]
        fn unrecognized_is_unknown_not_open() {
            let status = SettlementStatus::normalize(Some("pending"));
            assert_eq!(status, SettlementStatus::Unknown);
            assert!(!status.is_open());
        }

        #[test]
        fn serde_lowercase() {
            let json = serde_json::to_string(&SettlementStatus::Unsettled).unwrap();
            assert_eq!(json, "\"unsettled\"");
        }
    }

    mod settlement_location {
        use super::*;

        #[test]
        fn normalize_known_locations() {
            assert_eq!(
                SettlementLocation::normalize(Some("dtc")),
                SettlementLocation::Dtc
            );
            assert_eq!(
                SettlementLocation::normalize(Some("EUROCLEAR")),
                SettlementLocation::Euroclear
            );
            assert_eq!(
                SettlementLocation::normalize(Some("Fed")),
                SettlementLocation::Fed
            );
        }

        #[test]
        fn normalize_defaults_to_unknown() {
            assert_eq!(SettlementLocation::normalize(None), SettlementLocation::Unknown);
            assert_eq!(
                SettlementLocation::normalize(Some("Clearstream")),
                SettlementLocation::Unknown
            );
        }

        #[test]
        fn display_and_serde_agree() {
            for location in SettlementLocation::ALL {
                let json = serde_json::to_string(&location).unwrap();
                assert_eq!(json, format!("\"{}\"", location));
            }
        }
    }

    mod alert_severity {
        use super::*;

        #[test]
        fn ordering_puts_high_last() {
            assert!(AlertSeverity::High > AlertSeverity::Medium);
            assert!(AlertSeverity::Medium > AlertSeverity::Low);
        }

        #[test]
        fn from_str_works() {
            assert_eq!("HIGH".parse::<AlertSeverity>().unwrap(), AlertSeverity::High);
            assert!("critical".parse::<AlertSeverity>().is_err());
        }
    }

    mod parse_enum_error {
        use super::*;

        #[test]
        fn display_format() {
            let err = ParseEnumError::InvalidValue("TradeSide", "HOLD".to_string());
            assert_eq!(err.to_string(), "invalid TradeSide value: 'HOLD'");
        }
    }
}

//! # Checked Arithmetic
//!
//! Overflow-safe accumulation for exposure sums and trade counts.
//!
//! Aggregation never fails, so running totals go through
//! [`accumulate`] which saturates at the type's maximum and logs a warning
//! instead of panicking.
//!
//! # Examples
//!
//! ```
//! use settlement_risk::domain::value_objects::arithmetic::{accumulate, CheckedArithmetic};
//! use rust_decimal::Decimal;
//!
//! let total = accumulate(Decimal::new(100, 0), Decimal::new(250, 0), "exposure");
//! assert_eq!(total, Decimal::new(350, 0));
//! assert!(Decimal::MAX.safe_add(Decimal::ONE).is_err());
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

/// Error type for arithmetic operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ArithmeticError {
    /// Arithmetic operation resulted in overflow.
    #[error("arithmetic overflow")]
    Overflow,

    /// Arithmetic operation resulted in underflow.
    #[error("arithmetic underflow")]
    Underflow,
}

/// Result type for arithmetic operations.
pub type ArithmeticResult<T> = Result<T, ArithmeticError>;

/// Trait for checked arithmetic operations.
///
/// Provides safe arithmetic methods that return `Result` instead of
/// panicking on overflow or underflow.
pub trait CheckedArithmetic: Sized + Copy {
    /// Upper bound used when a sum saturates.
    const SATURATED: Self;

    /// Safely add two values.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Overflow` if the result would overflow.
    fn safe_add(self, rhs: Self) -> ArithmeticResult<Self>;

    /// Safely subtract two values.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Underflow` if the result would underflow.
    fn safe_sub(self, rhs: Self) -> ArithmeticResult<Self>;
}

impl CheckedArithmetic for Decimal {
    const SATURATED: Self = Decimal::MAX;

    #[inline]
    fn safe_add(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_add(rhs).ok_or(ArithmeticError::Overflow)
    }

    #[inline]
    fn safe_sub(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_sub(rhs).ok_or(ArithmeticError::Underflow)
    }
}

impl CheckedArithmetic for u64 {
    const SATURATED: Self = u64::MAX;

    #[inline]
    fn safe_add(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_add(rhs).ok_or(ArithmeticError::Overflow)
    }

    #[inline]
    fn safe_sub(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_sub(rhs).ok_or(ArithmeticError::Underflow)
    }
}

/// Adds `rhs` to a running total, saturating on overflow.
///
/// `what` names the total in the warning emitted when saturation happens.
#[must_use]
pub fn accumulate<T: CheckedArithmetic>(total: T, rhs: T, what: &'static str) -> T {
    match total.safe_add(rhs) {
        Ok(sum) => sum,
        Err(e) => {
            tracing::warn!(total = what, error = %e, "running total saturated");
            T::SATURATED
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_correctly() {
        assert_eq!(ArithmeticError::Overflow.to_string(), "arithmetic overflow");
        assert_eq!(
            ArithmeticError::Underflow.to_string(),
            "arithmetic underflow"
        );
    }

    #[test]
    fn decimal_safe_add_overflow() {
        assert_eq!(
            Decimal::MAX.safe_add(Decimal::ONE),
            Err(ArithmeticError::Overflow)
        );
        assert_eq!(
            Decimal::new(1, 0).safe_add(Decimal::new(2, 0)).unwrap(),
            Decimal::new(3, 0)
        );
    }

    #[test]
    fn decimal_safe_sub_underflow() {
        assert_eq!(
            Decimal::MIN.safe_sub(Decimal::ONE),
            Err(ArithmeticError::Underflow)
        );
    }

    #[test]
    fn u64_safe_add_overflow() {
        assert_eq!(u64::MAX.safe_add(1), Err(ArithmeticError::Overflow));
        assert_eq!(0u64.safe_sub(1), Err(ArithmeticError::Underflow));
    }

    #[test]
    fn accumulate_saturates_instead_of_panicking() {
        assert_eq!(accumulate(Decimal::MAX, Decimal::ONE, "test"), Decimal::MAX);
        assert_eq!(accumulate(u64::MAX, 5, "test"), u64::MAX);
        assert_eq!(accumulate(2u64, 3, "test"), 5);
    }
}

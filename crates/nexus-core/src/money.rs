//! # Money Module
//!
//! Prices and totals as integer minor units (cents).
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Espresso at 2.50 × 2                                                   │
//! │                                                                         │
//! │  Floating point:  2.5 * 2 = 5.0 (fine)... until 0.1 + 0.2 shows up     │
//! │  Integer cents:   250 * 2 = 500 (always exact)                          │
//! │                                                                         │
//! │  Receipt hashes cover the cent values, so they MUST be exact.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use nexus_core::money::Money;
//!
//! let price = Money::from_major_minor(2, 50);
//! let line_total = price.multiply_quantity(2);
//! assert_eq!(line_total.cents(), 500);
//! assert_eq!(line_total.to_string(), "5.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};
use ts_rs::TS;

/// A monetary value in the smallest currency unit.
///
/// Operators saturate instead of wrapping. The sale engine uses the
/// `checked_*` forms and rejects a sale that would leave the `i64` range.
///
/// Signed so that a mis-keyed negative price is representable and visible
/// rather than silently wrapped. The catalog does not enforce non-negative
/// prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// For negative amounts only the major unit carries the sign:
    /// `from_major_minor(-5, 50)` is -5.50.
    ///
    /// ```rust
    /// use nexus_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(2, 50).cents(), 250);
    /// assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Major unit portion (truncated toward zero).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Minor unit portion, always 0-99.
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit price by a quantity, saturating at the `i64` bounds.
    ///
    /// ```rust
    /// use nexus_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Line total, or `None` if it does not fit in an `i64` of cents.
    ///
    /// ```rust
    /// use nexus_core::money::Money;
    ///
    /// assert!(Money::from_cents(250).checked_multiply_quantity(i64::MAX).is_none());
    /// ```
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }
}

/// Plain decimal rendering (`5.00`, `-5.50`).
///
/// Currency symbols and locale formatting belong to whoever prints the
/// receipt.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

/// Grand totals are sums of line totals.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.major(), 10);
        assert_eq!(money.minor(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(250).to_string(), "2.50");
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::from_cents(-5).to_string(), "-0.05");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a * 3).cents(), 3000);

        let mut running = Money::zero();
        running += a;
        running += b;
        assert_eq!(running.cents(), 1500);
    }

    #[test]
    fn test_out_of_range_arithmetic() {
        let price = Money::from_cents(250);
        let huge = 100_000_000_000_000_000;

        assert_eq!(price.checked_multiply_quantity(4), Some(Money::from_cents(1000)));
        assert!(price.checked_multiply_quantity(huge).is_none());
        assert!(Money::from_cents(i64::MAX)
            .checked_add(Money::from_cents(1))
            .is_none());

        assert_eq!(price.multiply_quantity(huge).cents(), i64::MAX);
        assert_eq!((Money::from_cents(i64::MAX) + price).cents(), i64::MAX);
        assert_eq!((Money::from_cents(-250) * huge).cents(), i64::MIN);
    }

    #[test]
    fn test_sum_of_line_totals() {
        let lines = [
            Money::from_cents(250).multiply_quantity(2),
            Money::from_cents(199).multiply_quantity(3),
        ];
        let total: Money = lines.iter().copied().sum();
        assert_eq!(total.cents(), 500 + 597);

        let empty: Money = std::iter::empty().sum();
        assert!(empty.is_zero());
    }
}

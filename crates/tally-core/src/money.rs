//! # Money Module
//!
//! Provides the `Money` type for exact currency values and the `WholeUnits`
//! type for rounded chart values.
//!
//! ## Two Precisions, Two Types
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  WHERE EACH PRECISION IS USED                                           │
//! │                                                                         │
//! │  Money (exact, minor units)                                             │
//! │    Product.price ──► OrderLineItem line total ──► OrderState.total()    │
//! │    formatted to "8.00" only when shown or submitted                     │
//! │                                                                         │
//! │  WholeUnits (rounded, major units)                                      │
//! │    Order.Total ──► StatsAggregator buckets ──► chart values (20, 0, 7)  │
//! │                                                                         │
//! │  Summation ALWAYS happens in Money; rounding happens once, at the end.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::money::Money;
//!
//! let price = Money::parse_decimal("2.50").unwrap();
//! let line = price.multiply_quantity(2);
//! assert_eq!(line.to_decimal_string(), "5.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use crate::error::ValidationError;

/// Number of minor units in one major unit.
const MINOR_PER_MAJOR: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: totals of returned orders may be negative upstream
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **No float constructor**: decimal text goes through [`Money::parse_decimal`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Parses decimal text such as `"19.99"`, `"2.5"`, `"3"` or `"-1.25"`.
    ///
    /// ## Rules
    /// - Surrounding whitespace is ignored
    /// - An optional leading `+` or `-`
    /// - Digits with at most one `.`; at least one digit overall
    /// - More than two fractional digits round half away from zero
    ///   (`"0.125"` → 13 cents)
    ///
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("19.99").unwrap().cents(), 1999);
    /// assert_eq!(Money::parse_decimal("2.5").unwrap().cents(), 250);
    /// assert!(Money::parse_decimal("abc").is_err());
    /// ```
    pub fn parse_decimal(text: &str) -> Result<Money, ValidationError> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: format!("{reason}: '{text}'"),
        };

        let trimmed = text.trim();
        let (negative, unsigned) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };

        let (whole, fraction) = match unsigned.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (unsigned, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid("no digits"));
        }
        if !whole.bytes().all(|b| b.is_ascii_digit())
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid("not a decimal number"));
        }

        let overflow = || invalid("amount too large");

        let mut cents: i64 = 0;
        for digit in whole.bytes() {
            cents = cents
                .checked_mul(10)
                .and_then(|c| c.checked_add(i64::from(digit - b'0')))
                .ok_or_else(overflow)?;
        }
        cents = cents.checked_mul(MINOR_PER_MAJOR).ok_or_else(overflow)?;

        let mut digits = fraction.bytes().map(|b| i64::from(b - b'0'));
        let tenths = digits.next().unwrap_or(0);
        let hundredths = digits.next().unwrap_or(0);
        let round_up = digits.next().is_some_and(|d| d >= 5);

        cents = cents
            .checked_add(tenths * 10 + hundredths + i64::from(round_up))
            .ok_or_else(overflow)?;

        Ok(Money(if negative { -cents } else { cents }))
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (truncated toward zero).
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / MINOR_PER_MAJOR
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % MINOR_PER_MAJOR).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Multiplies money by a quantity, saturating at the `i64` bounds.
    ///
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }

    /// Formats the amount with exactly two fractional digits and no currency
    /// symbol. This is the wire format of `price` and `Total`.
    ///
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(800).to_decimal_string(), "8.00");
    /// assert_eq!(Money::from_cents(-5).to_decimal_string(), "-0.05");
    /// ```
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.dollars().unsigned_abs(), self.cents_part())
    }

    /// Rounds to the nearest whole currency unit, half away from zero.
    ///
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1999).round_to_whole_units().value(), 20);
    /// assert_eq!(Money::from_cents(1049).round_to_whole_units().value(), 10);
    /// assert_eq!(Money::from_cents(-150).round_to_whole_units().value(), -2);
    /// ```
    pub const fn round_to_whole_units(&self) -> WholeUnits {
        let half = MINOR_PER_MAJOR / 2;
        let rounded = if self.0 < 0 {
            self.0.saturating_sub(half) / MINOR_PER_MAJOR
        } else {
            self.0.saturating_add(half) / MINOR_PER_MAJOR
        };
        WholeUnits(rounded)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows a currency symbol, e.g. `$10.99`. Use
/// [`Money::to_decimal_string`] for wire values.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.dollars().unsigned_abs(), self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition saturates at the `i64` bounds.
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

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Whole Units
// =============================================================================

/// A currency amount rounded to whole major units.
///
/// Only produced by [`Money::round_to_whole_units`]; there is no
/// conversion back to `Money`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WholeUnits(i64);

impl WholeUnits {
    /// Zero whole units.
    #[inline]
    pub const fn zero() -> Self {
        WholeUnits(0)
    }

    /// Returns the rounded value.
    #[inline]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for WholeUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
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
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_decimal_string() {
        assert_eq!(Money::from_cents(800).to_decimal_string(), "8.00");
        assert_eq!(Money::from_cents(7).to_decimal_string(), "0.07");
        assert_eq!(Money::from_cents(123456).to_decimal_string(), "1234.56");
    }

    #[test]
    fn test_parse_decimal_accepts_common_shapes() {
        assert_eq!(Money::parse_decimal("19.99").unwrap().cents(), 1999);
        assert_eq!(Money::parse_decimal("2.5").unwrap().cents(), 250);
        assert_eq!(Money::parse_decimal("3").unwrap().cents(), 300);
        assert_eq!(Money::parse_decimal(" 4.00 ").unwrap().cents(), 400);
        assert_eq!(Money::parse_decimal(".75").unwrap().cents(), 75);
        assert_eq!(Money::parse_decimal("5.").unwrap().cents(), 500);
        assert_eq!(Money::parse_decimal("-1.25").unwrap().cents(), -125);
        assert_eq!(Money::parse_decimal("+1.25").unwrap().cents(), 125);
    }

    #[test]
    fn test_parse_decimal_rounds_extra_digits() {
        assert_eq!(Money::parse_decimal("0.125").unwrap().cents(), 13);
        assert_eq!(Money::parse_decimal("0.1249").unwrap().cents(), 12);
        assert_eq!(Money::parse_decimal("-0.125").unwrap().cents(), -13);
        assert_eq!(Money::parse_decimal("9.999").unwrap().cents(), 1000);
    }

    #[test]
    fn test_parse_decimal_rejects_garbage() {
        for bad in ["", " ", "abc", "1.2.3", "-", ".", "1e3", "$5", "12,50"] {
            assert!(Money::parse_decimal(bad).is_err(), "accepted {bad:?}");
        }
        assert!(Money::parse_decimal("99999999999999999999").is_err());
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!(a.multiply_quantity(3).cents(), 3000);

        let total: Money = [a, b, b].iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge = Money::parse_decimal("90000000000000000.00").unwrap();

        let total: Money = [huge, huge].iter().sum();
        assert_eq!(total, Money::from_cents(i64::MAX));
        assert_eq!(huge.multiply_quantity(u32::MAX).cents(), i64::MAX);
        assert_eq!(
            Money::from_cents(i64::MIN).to_decimal_string(),
            "-92233720368547758.08"
        );

        let mut running = Money::from_cents(i64::MAX - 1);
        running += Money::from_cents(10);
        assert_eq!(running.cents(), i64::MAX);
        assert_eq!(running.round_to_whole_units().value(), i64::MAX / 100);
    }

    #[test]
    fn test_round_to_whole_units() {
        assert_eq!(Money::from_cents(1999).round_to_whole_units().value(), 20);
        assert_eq!(Money::from_cents(1050).round_to_whole_units().value(), 11);
        assert_eq!(Money::from_cents(1049).round_to_whole_units().value(), 10);
        assert_eq!(Money::from_cents(0).round_to_whole_units(), WholeUnits::zero());
        assert_eq!(Money::from_cents(-149).round_to_whole_units().value(), -1);
        assert_eq!(Money::from_cents(-150).round_to_whole_units().value(), -2);
    }
}

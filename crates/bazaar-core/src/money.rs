//! # Money Module
//!
//! Provides the `Money` type for handling unit prices safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A price range search with floats can then miss an item priced at      │
//! │  exactly the boundary (15.00 stored as 14.999999...).                   │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    "15.00" is parsed digit by digit into 1500 cents, and every          │
//! │    comparison in the database happens on integers.                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bazaar_core::money::Money;
//!
//! let price = Money::parse("unit_price", "10.99").unwrap();
//! assert_eq!(price.cents(), 1099);
//!
//! // NEVER do this:
//! // let bad = Money::from_float(10.99); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::ValidationError;

/// Number of fractional digits carried by a price.
const MINOR_DIGITS: usize = 2;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: a search bound may legitimately be negative before it
///   is rejected, so the type must be able to hold one
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Ord**: range checks compare `Money` directly
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use bazaar_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents 10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the amount in major units as a JSON-friendly number.
    ///
    /// ## Note
    /// Only for serializing responses. Nothing in the system computes or
    /// compares with the returned float.
    #[inline]
    pub fn to_major_units(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Parses a decimal string such as `"15"`, `"15.5"` or `"-0.99"` into
    /// cents without going through floating point.
    ///
    /// ## Rules
    /// - Optional leading `+` or `-`
    /// - At least one digit overall; `".5"` is accepted as `0.50`
    /// - At most two fractional digits
    ///
    /// `field` names the input in the returned error.
    ///
    /// ## Example
    /// ```rust
    /// use bazaar_core::money::Money;
    ///
    /// assert_eq!(Money::parse("min_price", "15.01").unwrap().cents(), 1501);
    /// assert_eq!(Money::parse("min_price", "-5").unwrap().cents(), -500);
    /// assert!(Money::parse("min_price", "15.001").is_err());
    /// assert!(Money::parse("min_price", "abc").is_err());
    /// ```
    pub fn parse(field: &str, input: &str) -> Result<Money, ValidationError> {
        let invalid = || ValidationError::invalid_format(field, "must be a decimal number");

        let trimmed = input.trim();
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
            return Err(invalid());
        }
        if unsigned.ends_with('.') {
            return Err(invalid());
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if fraction.len() > MINOR_DIGITS {
            return Err(ValidationError::invalid_format(
                field,
                "must have at most two decimal places",
            ));
        }

        let too_large = || ValidationError::invalid_format(field, "is too large");

        let whole_value: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| too_large())?
        };

        // "5" → 50 cents, "05" → 5 cents
        let mut fraction_value: i64 = 0;
        for (idx, digit) in fraction.bytes().enumerate() {
            let scale = 10_i64.pow((MINOR_DIGITS - 1 - idx) as u32);
            fraction_value += i64::from(digit - b'0') * scale;
        }

        let cents = whole_value
            .checked_mul(100)
            .and_then(|c| c.checked_add(fraction_value))
            .ok_or_else(too_large)?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money as a plain decimal, e.g. `10.99`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
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
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::from_cents(0).to_string(), "0.00");
    }

    #[test]
    fn test_parse_whole_and_fractional() {
        assert_eq!(Money::parse("p", "15").unwrap().cents(), 1500);
        assert_eq!(Money::parse("p", "15.0").unwrap().cents(), 1500);
        assert_eq!(Money::parse("p", "15.5").unwrap().cents(), 1550);
        assert_eq!(Money::parse("p", "15.01").unwrap().cents(), 1501);
        assert_eq!(Money::parse("p", ".5").unwrap().cents(), 50);
        assert_eq!(Money::parse("p", " 0 ").unwrap().cents(), 0);
        assert_eq!(Money::parse("p", "+3.25").unwrap().cents(), 325);
    }

    #[test]
    fn test_parse_negative() {
        let money = Money::parse("p", "-5").unwrap();
        assert_eq!(money.cents(), -500);
        assert!(money.is_negative());

        assert_eq!(Money::parse("p", "-0.99").unwrap().cents(), -99);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for input in ["", " ", "abc", "1.2.3", "15.", "-", ".", "1e3", "15.001", "--1", "1,50"] {
            assert!(Money::parse("min_price", input).is_err(), "accepted {input:?}");
        }
    }

    #[test]
    fn test_parse_error_names_field() {
        let err = Money::parse("max_price", "ten").unwrap_err();
        assert_eq!(
            err.to_string(),
            "max_price has invalid format: must be a decimal number"
        );
    }

    #[test]
    fn test_parse_overflow() {
        assert!(Money::parse("p", "99999999999999999999").is_err());
        assert!(Money::parse("p", "92233720368547758.08").is_err());
    }

    #[test]
    fn test_ordering() {
        assert!(Money::from_cents(1500) < Money::from_cents(1501));
        assert!(Money::zero() > Money::from_cents(-1));
    }

    #[test]
    fn test_major_units() {
        assert_eq!(Money::from_cents(1501).to_major_units(), 15.01);
        assert_eq!(Money::from_cents(0).to_major_units(), 0.0);
    }
}

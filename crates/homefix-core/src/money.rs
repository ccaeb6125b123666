//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing a quotation in floating point:                                 │
//! │    subtotal + tax can land one đồng away from the stored total          │
//! │    after a reload, and the figure on screen "drifts".                   │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Đồng                                             │
//! │    The đồng has no minor unit in practice, so one i64 = one đồng.       │
//! │    Rate and quantity products are rounded ONCE, half-up, and every      │
//! │    sum after that is exact integer addition.                            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use homefix_core::money::Money;
//! use homefix_core::types::Percent;
//!
//! let subtotal = Money::from_dong(115_000);
//! let tax = subtotal.apply_rate(Percent::from_percent(10));
//! assert_eq!(tax.dong(), 11_500);
//! assert_eq!((subtotal + tax).to_string(), "126.500 ₫");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use ts_rs::TS;

use crate::error::{CoreResult, ValidationError};
use crate::types::{Percent, Quantity};
use crate::MAX_AMOUNT;

/// Basis points in 100 %.
pub(crate) const BPS_SCALE: i128 = 10_000;

/// Thousandths in one unit of quantity.
pub(crate) const MILLI_SCALE: i128 = 1_000;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole đồng.
///
/// ## Design Decisions
/// - **i64 (signed)**: negative values are representable so validation can
///   reject them by field name instead of failing to parse
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Serialized as a bare number**: `{"total": 126500}`
///
/// ## Where Money is Used
/// ```text
/// LineItem.unit_price ──► PricedLine.amount ──► items_total
///                                                  │
///   material + labor + travel ─────────────────────┤
///                                                  ▼
///                    subtotal ──► margin ──► tax ──► total
///
/// base_cost ──► after PIT ──► after profit ──► net / final price
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole đồng.
    ///
    /// ## Example
    /// ```rust
    /// use homefix_core::money::Money;
    ///
    /// let price = Money::from_dong(50_000);
    /// assert_eq!(price.dong(), 50_000);
    /// ```
    #[inline]
    pub const fn from_dong(dong: i64) -> Self {
        Money(dong)
    }

    /// Converts a JSON number into Money, rounding half-up to whole đồng.
    ///
    /// The sign is checked before rounding, so `-0.4` is rejected rather
    /// than becoming zero.
    ///
    /// ## Example
    /// ```rust
    /// use homefix_core::money::Money;
    ///
    /// assert_eq!(Money::try_from_f64(49_999.5, "unitPrice").unwrap().dong(), 50_000);
    /// assert!(Money::try_from_f64(f64::NAN, "unitPrice").is_err());
    /// assert!(Money::try_from_f64(-0.4, "baseCost").is_err());
    /// ```
    pub fn try_from_f64(value: f64, field: &str) -> CoreResult<Self> {
        if !value.is_finite() {
            return Err(ValidationError::NotANumber {
                field: field.to_string(),
            });
        }

        if value < 0.0 {
            return Err(ValidationError::MustBeNonNegative {
                field: field.to_string(),
            });
        }

        if value > MAX_AMOUNT as f64 {
            return Err(ValidationError::OutOfRange {
                field: field.to_string(),
                min: 0,
                max: MAX_AMOUNT,
            });
        }

        Ok(Money(value.round() as i64))
    }

    /// Returns the value in whole đồng.
    #[inline]
    pub const fn dong(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns `self × rate`, rounded half-up to whole đồng.
    ///
    /// ## Implementation
    /// Integer math in i128: `(amount × bps + 5000) / 10000`.
    ///
    /// ## Example
    /// ```rust
    /// use homefix_core::money::Money;
    /// use homefix_core::types::Percent;
    ///
    /// // 1.005 đồng rounds down, 12.5 đồng rounds up
    /// assert_eq!(Money::from_dong(67).apply_rate(Percent::from_bps(150)).dong(), 1);
    /// assert_eq!(Money::from_dong(125).apply_rate(Percent::from_percent(10)).dong(), 13);
    /// ```
    pub fn apply_rate(&self, rate: Percent) -> Money {
        let scaled = self.0 as i128 * rate.bps() as i128;
        Money::from_bounded(div_round_half_up(scaled, BPS_SCALE))
    }

    /// Returns `self × quantity`, rounded half-up to whole đồng.
    ///
    /// ## Example
    /// ```rust
    /// use homefix_core::money::Money;
    /// use homefix_core::types::Quantity;
    ///
    /// let cable_per_metre = Money::from_dong(12_345);
    /// let amount = cable_per_metre.multiply_quantity(Quantity::from_milli(1_500));
    /// assert_eq!(amount.dong(), 18_518); // 18 517.5 rounds up
    /// ```
    pub fn multiply_quantity(&self, qty: Quantity) -> Money {
        let scaled = self.0 as i128 * qty.milli() as i128;
        Money::from_bounded(div_round_half_up(scaled, MILLI_SCALE))
    }

    /// Rounds up to the next multiple of 1000 đồng.
    ///
    /// Multiples of 1000 (including zero) are left unchanged.
    ///
    /// ## Example
    /// ```rust
    /// use homefix_core::money::Money;
    ///
    /// assert_eq!(Money::from_dong(1_215_500).ceil_to_thousand().dong(), 1_216_000);
    /// assert_eq!(Money::from_dong(2_000).ceil_to_thousand().dong(), 2_000);
    /// ```
    pub fn ceil_to_thousand(&self) -> Money {
        Money::from_bounded(ceil_div(self.0 as i128, 1_000) * 1_000)
    }

    /// Narrows an i128 intermediate back to Money.
    ///
    /// Engine inputs are capped by `MAX_AMOUNT`, `MAX_QUANTITY_MILLI` and
    /// `MAX_RATE_BPS`, which keeps every product well inside i64.
    #[inline]
    pub(crate) fn from_bounded(value: i128) -> Money {
        Money(value as i64)
    }
}

// =============================================================================
// Integer Rounding Helpers
// =============================================================================

/// `num / den` rounded half away from zero (half-up for non-negative input).
pub(crate) fn div_round_half_up(num: i128, den: i128) -> i128 {
    debug_assert!(den > 0);
    if num >= 0 {
        (num + den / 2) / den
    } else {
        -((-num + den / 2) / den)
    }
}

/// `num / den` rounded towards positive infinity.
pub(crate) fn ceil_div(num: i128, den: i128) -> i128 {
    debug_assert!(den > 0);
    let quotient = num / den;
    if num % den > 0 {
        quotient + 1
    } else {
        quotient
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Vietnamese grouping: `1.313.000 ₫`.
///
/// Frontends with their own locale handling should format `dong()` instead.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }

        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{} ₫", sign, grouped)
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
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

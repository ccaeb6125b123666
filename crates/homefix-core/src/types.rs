//! # Scalar Types
//!
//! Fixed-point scalars shared by both calculations.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Money       │   │    Percent      │   │    Quantity     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  i64 đồng       │   │  i64 bps        │   │  i64 milli      │       │
//! │  │  (money.rs)     │   │  1500 = 15 %    │   │  1500 = 1.5     │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  JSON carries what a form shows: `"marginRate": 15`, `"quantity": 1.5`  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use ts_rs::TS;

use crate::error::{CoreResult, ValidationError};
use crate::{MAX_QUANTITY_MILLI, MAX_RATE_BPS};

// =============================================================================
// Percent
// =============================================================================

/// A percentage rate in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01 % = 1/10000, so `8.25 %` is stored exactly as `825`.
/// Signed so that a negative rate built in code can be reported by field name.
///
/// Serialized as a percentage (`15`, `8.25`), the same unit requests use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, TS)]
#[ts(export)]
pub struct Percent(#[ts(type = "number")] i64);

impl Percent {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: i64) -> Self {
        Percent(bps)
    }

    /// Creates a rate from a whole percentage (`15` = 15 %).
    #[inline]
    pub const fn from_percent(pct: i64) -> Self {
        Percent(pct * 100)
    }

    /// Converts a JSON number percentage, rounding to the nearest basis point.
    ///
    /// ## Example
    /// ```rust
    /// use homefix_core::types::Percent;
    ///
    /// assert_eq!(Percent::try_from_percentage(8.25, "vatRate").unwrap().bps(), 825);
    /// assert!(Percent::try_from_percentage(f64::NAN, "vatRate").is_err());
    /// assert!(Percent::try_from_percentage(-0.004, "marginRate").is_err());
    /// ```
    pub fn try_from_percentage(pct: f64, field: &str) -> CoreResult<Self> {
        if !pct.is_finite() {
            return Err(ValidationError::NotANumber {
                field: field.to_string(),
            });
        }

        if pct < 0.0 {
            return Err(ValidationError::MustBeNonNegative {
                field: field.to_string(),
            });
        }

        let bps = (pct * 100.0).round();
        if bps > MAX_RATE_BPS as f64 {
            return Err(ValidationError::OutOfRange {
                field: field.to_string(),
                min: 0,
                max: MAX_RATE_BPS / 100,
            });
        }

        Ok(Percent(bps as i64))
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> i64 {
        self.0
    }

    /// Returns the rate as a percentage.
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        Percent(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for Percent {
    fn default() -> Self {
        Percent::zero()
    }
}

impl Serialize for Percent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % 100 == 0 {
            serializer.serialize_i64(self.0 / 100)
        } else {
            serializer.serialize_f64(self.percentage())
        }
    }
}

impl<'de> Deserialize<'de> for Percent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let pct = f64::deserialize(deserializer)?;
        Percent::try_from_percentage(pct, "rate").map_err(de::Error::custom)
    }
}

/// `15%`, `8.25%`, `8.5%`.
impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let whole = abs / 100;
        let frac = abs % 100;

        if frac == 0 {
            write!(f, "{}{}%", sign, whole)
        } else if frac % 10 == 0 {
            write!(f, "{}{}.{}%", sign, whole, frac / 10)
        } else {
            write!(f, "{}{}.{:02}%", sign, whole, frac)
        }
    }
}

// =============================================================================
// Quantity
// =============================================================================

/// A line item quantity in thousandths of a unit.
///
/// Repair work is not always counted in whole pieces: 1.5 m of cable or
/// 0.25 of a day's labor are ordinary line items.
///
/// Serialized as a plain number of units (`2`, `1.5`), so a stored line can
/// be sent back unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, TS)]
#[ts(export)]
pub struct Quantity(#[ts(type = "number")] i64);

impl Quantity {
    /// Creates a quantity from whole units.
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Quantity(units * 1_000)
    }

    /// Creates a quantity from thousandths of a unit.
    #[inline]
    pub const fn from_milli(milli: i64) -> Self {
        Quantity(milli)
    }

    /// Converts a JSON number, rounding to the nearest thousandth.
    ///
    /// ## Example
    /// ```rust
    /// use homefix_core::types::Quantity;
    ///
    /// assert_eq!(Quantity::try_from_f64(1.5, "quantity").unwrap().milli(), 1_500);
    /// assert!(Quantity::try_from_f64(-0.0004, "quantity").is_err());
    /// ```
    pub fn try_from_f64(value: f64, field: &str) -> CoreResult<Self> {
        if !value.is_finite() {
            return Err(ValidationError::NotANumber {
                field: field.to_string(),
            });
        }

        if value < 0.0 {
            return Err(ValidationError::MustBePositive {
                field: field.to_string(),
            });
        }

        let milli = (value * 1_000.0).round();
        if milli > MAX_QUANTITY_MILLI as f64 {
            return Err(ValidationError::OutOfRange {
                field: field.to_string(),
                min: 0,
                max: MAX_QUANTITY_MILLI / 1_000,
            });
        }

        Ok(Quantity(milli as i64))
    }

    /// Returns the quantity in thousandths.
    #[inline]
    pub const fn milli(&self) -> i64 {
        self.0
    }

    /// Returns the quantity as a plain number of units.
    #[inline]
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 1_000.0
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % 1_000 == 0 {
            serializer.serialize_i64(self.0 / 1_000)
        } else {
            serializer.serialize_f64(self.as_f64())
        }
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Quantity::try_from_f64(value, "quantity").map_err(de::Error::custom)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_from_percentage() {
        assert_eq!(Percent::try_from_percentage(15.0, "marginRate").unwrap().bps(), 1_500);
        assert_eq!(Percent::try_from_percentage(8.25, "vatRate").unwrap().bps(), 825);
        assert_eq!(Percent::try_from_percentage(0.0, "taxRate").unwrap(), Percent::zero());
    }

    #[test]
    fn test_negative_inputs_are_rejected_before_rounding() {
        assert_eq!(
            Percent::try_from_percentage(-0.004, "marginRate").unwrap_err(),
            ValidationError::MustBeNonNegative {
                field: "marginRate".to_string()
            }
        );
        assert_eq!(
            Quantity::try_from_f64(-0.0004, "items[0].quantity").unwrap_err(),
            ValidationError::MustBePositive {
                field: "items[0].quantity".to_string()
            }
        );
    }

    #[test]
    fn test_percent_rejects_nonsense() {
        let err = Percent::try_from_percentage(f64::NAN, "profitRate").unwrap_err();
        assert_eq!(err.field(), "profitRate");

        let err = Percent::try_from_percentage(5_000.0, "profitRate").unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { .. }));
    }

    #[test]
    fn test_percent_display() {
        assert_eq!(Percent::from_percent(15).to_string(), "15%");
        assert_eq!(Percent::from_bps(825).to_string(), "8.25%");
        assert_eq!(Percent::from_bps(850).to_string(), "8.5%");
        assert_eq!(Percent::from_bps(5).to_string(), "0.05%");
        assert_eq!(Percent::from_bps(-1_000).to_string(), "-10%");
    }

    #[test]
    fn test_quantity_conversions() {
        assert_eq!(Quantity::from_units(2).milli(), 2_000);
        assert_eq!(Quantity::try_from_f64(0.25, "quantity").unwrap().milli(), 250);
        assert!((Quantity::from_milli(1_500).as_f64() - 1.5).abs() < f64::EPSILON);

        let err = Quantity::try_from_f64(f64::INFINITY, "items[0].quantity").unwrap_err();
        assert_eq!(err.field(), "items[0].quantity");
    }

    #[test]
    fn test_json_uses_form_units() {
        assert_eq!(serde_json::to_string(&Percent::from_percent(15)).unwrap(), "15");
        assert_eq!(serde_json::to_string(&Percent::from_bps(825)).unwrap(), "8.25");
        assert_eq!(serde_json::to_string(&Quantity::from_units(2)).unwrap(), "2");
        assert_eq!(serde_json::to_string(&Quantity::from_milli(1_500)).unwrap(), "1.5");

        let rate: Percent = serde_json::from_str("8.25").unwrap();
        assert_eq!(rate.bps(), 825);
        let qty: Quantity = serde_json::from_str("2").unwrap();
        assert_eq!(qty.milli(), 2_000);

        assert!(serde_json::from_str::<Percent>("-0.004").is_err());
        assert!(serde_json::from_str::<Quantity>("-1").is_err());
    }
}

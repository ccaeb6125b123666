//! # Quotation Totals
//!
//! Turns a quotation's rows and extra costs into its persisted totals.
//!
//! ## Calculation Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  items (named rows only)                                                │
//! │    Σ round(quantity × unit_price) ─────────────► items_total            │
//! │                                                     │                   │
//! │  + material_cost + labor_cost + travel_cost         ▼                   │
//! │                                          subtotal_before_margin         │
//! │                                                     │                   │
//! │  margin_amount = round(subtotal × margin_rate)      ▼                   │
//! │                                          subtotal_after_margin          │
//! │                                                     │                   │
//! │  tax = round(subtotal_after_margin × tax_rate)      ▼                   │
//! │                                                   total                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding Policy
//! Half-up to whole đồng, applied exactly three times: each row amount, the
//! margin, and the tax. Everything else is integer addition, so
//! `subtotal_after_margin + tax == total` always holds.
//!
//! ## Example
//! ```rust
//! use homefix_core::money::Money;
//! use homefix_core::quotation::{compute_quotation_totals, LineItem, QuotationCostInputs};
//! use homefix_core::types::Quantity;
//!
//! let inputs = QuotationCostInputs {
//!     items: vec![LineItem::new("Outlet install", Quantity::from_units(2), Money::from_dong(50_000))],
//!     ..QuotationCostInputs::default()
//! };
//!
//! let totals = compute_quotation_totals(&inputs).unwrap();
//! assert_eq!(totals.total.dong(), 126_500);
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreResult, ValidationError};
use crate::money::Money;
use crate::rates::QuotationRates;
use crate::types::Quantity;
use crate::validation::{
    validate_item_count, validate_item_name, validate_non_negative_money,
    validate_positive_quantity,
};
use crate::MAX_AMOUNT;

// =============================================================================
// Inputs
// =============================================================================

/// A single priced row on a quotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    /// Rows with an empty name are blank form rows and are dropped.
    pub name: String,
    pub quantity: Quantity,
    pub unit_price: Money,
}

impl LineItem {
    pub fn new(name: impl Into<String>, quantity: Quantity, unit_price: Money) -> Self {
        LineItem {
            name: name.into(),
            quantity,
            unit_price,
        }
    }

    /// `round(quantity × unit_price)`.
    #[inline]
    pub fn amount(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    /// Whether this row takes part in the totals.
    #[inline]
    pub fn is_named(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

/// Everything a quotation's totals depend on.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct QuotationCostInputs {
    pub items: Vec<LineItem>,
    pub material_cost: Money,
    pub labor_cost: Money,
    pub travel_cost: Money,
    pub rates: QuotationRates,
}

impl QuotationCostInputs {
    /// Checks every input the totals depend on, failing on the first problem.
    ///
    /// Unnamed rows are skipped: they never reach the totals.
    pub fn validate(&self) -> CoreResult<()> {
        validate_item_count(self.items.len())?;

        for (index, item) in self.items.iter().enumerate() {
            if !item.is_named() {
                continue;
            }
            validate_item_name(&item.name, &format!("items[{}].name", index))?;
            validate_positive_quantity(item.quantity, &format!("items[{}].quantity", index))?;
            validate_non_negative_money(item.unit_price, &format!("items[{}].unitPrice", index))?;
        }

        validate_non_negative_money(self.material_cost, "materialCost")?;
        validate_non_negative_money(self.labor_cost, "laborCost")?;
        validate_non_negative_money(self.travel_cost, "travelCost")?;
        self.rates.validate()?;

        Ok(())
    }
}

// =============================================================================
// Results
// =============================================================================

/// A named row with its rounded amount, as the quotation record stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PricedLine {
    pub name: String,
    pub quantity: Quantity,
    pub unit_price: Money,
    pub amount: Money,
}

/// Derived totals of a quotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct QuotationTotals {
    pub items_total: Money,
    pub subtotal_before_margin: Money,
    pub margin_amount: Money,
    pub subtotal_after_margin: Money,
    pub tax: Money,
    pub total: Money,
}

impl QuotationTotals {
    /// The fields written back onto the quotation record.
    pub fn persist_patch(&self) -> QuotationTotalsPatch {
        QuotationTotalsPatch {
            subtotal: self.subtotal_after_margin,
            tax: self.tax,
            total: self.total,
        }
    }
}

/// `subtotal` / `tax` / `total` columns of a quotation record.
///
/// `subtotal` is the taxed base, i.e. after the margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct QuotationTotalsPatch {
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
}

/// Kept rows plus totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct QuotationSheet {
    pub lines: Vec<PricedLine>,
    pub totals: QuotationTotals,
}

// =============================================================================
// Engine
// =============================================================================

/// Computes a quotation's totals.
///
/// Rows with an empty name are excluded silently. Any negative cost,
/// non-positive quantity on a named row, or negative rate fails with a
/// [`ValidationError`] naming the field; no partial totals are produced.
pub fn compute_quotation_totals(inputs: &QuotationCostInputs) -> CoreResult<QuotationTotals> {
    price_quotation(inputs).map(|sheet| sheet.totals)
}

/// Computes a quotation's totals together with the rows that were kept.
pub fn price_quotation(inputs: &QuotationCostInputs) -> CoreResult<QuotationSheet> {
    inputs.validate()?;

    let mut lines = Vec::with_capacity(inputs.items.len());
    for (index, item) in inputs.items.iter().enumerate() {
        if !item.is_named() {
            continue;
        }

        let amount = item.amount();
        if amount.dong() > MAX_AMOUNT {
            return Err(ValidationError::OutOfRange {
                field: format!("items[{}].amount", index),
                min: 0,
                max: MAX_AMOUNT,
            });
        }

        lines.push(PricedLine {
            name: item.name.trim().to_string(),
            quantity: item.quantity,
            unit_price: item.unit_price,
            amount,
        });
    }

    let items_total: Money = lines.iter().map(|line| line.amount).sum();
    let subtotal_before_margin =
        items_total + inputs.material_cost + inputs.labor_cost + inputs.travel_cost;
    let margin_amount = subtotal_before_margin.apply_rate(inputs.rates.margin_rate);
    let subtotal_after_margin = subtotal_before_margin + margin_amount;
    let tax = subtotal_after_margin.apply_rate(inputs.rates.tax_rate);
    let total = subtotal_after_margin + tax;

    Ok(QuotationSheet {
        lines,
        totals: QuotationTotals {
            items_total,
            subtotal_before_margin,
            margin_amount,
            subtotal_after_margin,
            tax,
            total,
        },
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Percent;
    use proptest::prelude::*;

    fn item(name: &str, units: i64, unit_price: i64) -> LineItem {
        LineItem::new(name, Quantity::from_units(units), Money::from_dong(unit_price))
    }

    fn rates(margin: i64, tax: i64) -> QuotationRates {
        QuotationRates {
            margin_rate: Percent::from_percent(margin),
            tax_rate: Percent::from_percent(tax),
        }
    }

    #[test]
    fn test_single_item_with_default_rates() {
        let inputs = QuotationCostInputs {
            items: vec![item("Outlet install", 2, 50_000)],
            ..QuotationCostInputs::default()
        };

        let totals = compute_quotation_totals(&inputs).unwrap();
        assert_eq!(totals.items_total.dong(), 100_000);
        assert_eq!(totals.subtotal_before_margin.dong(), 100_000);
        assert_eq!(totals.margin_amount.dong(), 15_000);
        assert_eq!(totals.subtotal_after_margin.dong(), 115_000);
        assert_eq!(totals.tax.dong(), 11_500);
        assert_eq!(totals.total.dong(), 126_500);
    }

    #[test]
    fn test_unnamed_rows_are_excluded() {
        let inputs = QuotationCostInputs {
            items: vec![
                item("Replace faucet", 1, 300_000),
                item("", 5, 999_000),
                item("   ", 1, 10_000),
            ],
            rates: rates(0, 0),
            ..QuotationCostInputs::default()
        };

        let sheet = price_quotation(&inputs).unwrap();
        assert_eq!(sheet.lines.len(), 1);
        assert_eq!(sheet.lines[0].name, "Replace faucet");
        assert_eq!(sheet.totals.items_total.dong(), 300_000);
    }

    #[test]
    fn test_unnamed_rows_are_not_validated() {
        let inputs = QuotationCostInputs {
            items: vec![
                item("", -3, -1),
                item("Paint wall", 1, 200_000),
            ],
            ..QuotationCostInputs::default()
        };

        assert!(compute_quotation_totals(&inputs).is_ok());
    }

    #[test]
    fn test_empty_items() {
        let inputs = QuotationCostInputs {
            labor_cost: Money::from_dong(200_000),
            ..QuotationCostInputs::default()
        };

        let totals = compute_quotation_totals(&inputs).unwrap();
        assert!(totals.items_total.is_zero());
        assert_eq!(totals.subtotal_before_margin.dong(), 200_000);
        assert_eq!(totals.margin_amount.dong(), 30_000);
        assert_eq!(totals.total.dong(), 253_000);
    }

    #[test]
    fn test_zero_margin_is_no_markup() {
        let inputs = QuotationCostInputs {
            items: vec![item("Inspect wiring", 1, 150_000)],
            travel_cost: Money::from_dong(50_000),
            rates: rates(0, 10),
            ..QuotationCostInputs::default()
        };

        let totals = compute_quotation_totals(&inputs).unwrap();
        assert!(totals.margin_amount.is_zero());
        assert_eq!(totals.subtotal_after_margin, totals.subtotal_before_margin);
        assert_eq!(totals.tax.dong(), 20_000);
    }

    #[test]
    fn test_fractional_quantity_rounds_per_row() {
        // 1.5 × 12 345 = 18 517.5 → 18 518, twice → 37 036 (not 37 035)
        let row = LineItem::new("Cable", Quantity::from_milli(1_500), Money::from_dong(12_345));
        let inputs = QuotationCostInputs {
            items: vec![row.clone(), row],
            rates: rates(0, 0),
            ..QuotationCostInputs::default()
        };

        let totals = compute_quotation_totals(&inputs).unwrap();
        assert_eq!(totals.items_total.dong(), 37_036);
    }

    #[test]
    fn test_rounded_margin_and_tax_still_sum_exactly() {
        let inputs = QuotationCostInputs {
            items: vec![item("Fix hinge", 1, 33_333)],
            material_cost: Money::from_dong(7),
            rates: QuotationRates {
                margin_rate: Percent::from_bps(1_250),
                tax_rate: Percent::from_bps(825),
            },
            ..QuotationCostInputs::default()
        };

        let totals = compute_quotation_totals(&inputs).unwrap();
        // 33 340 × 12.5 % = 4 167.5 → 4 168
        assert_eq!(totals.margin_amount.dong(), 4_168);
        // 37 508 × 8.25 % = 3 094.41 → 3 094
        assert_eq!(totals.tax.dong(), 3_094);
        assert_eq!(totals.subtotal_after_margin + totals.tax, totals.total);
        assert_eq!(totals.total.dong(), 40_602);
    }

    #[test]
    fn test_rejects_negative_inputs() {
        let inputs = QuotationCostInputs {
            material_cost: Money::from_dong(-1),
            ..QuotationCostInputs::default()
        };
        assert_eq!(
            compute_quotation_totals(&inputs).unwrap_err().field(),
            "materialCost"
        );

        let inputs = QuotationCostInputs {
            items: vec![item("Door", 0, 100)],
            ..QuotationCostInputs::default()
        };
        assert_eq!(
            compute_quotation_totals(&inputs).unwrap_err(),
            ValidationError::MustBePositive {
                field: "items[0].quantity".to_string()
            }
        );

        let inputs = QuotationCostInputs {
            items: vec![item("", 1, 1), item("Door", 1, -100)],
            ..QuotationCostInputs::default()
        };
        assert_eq!(
            compute_quotation_totals(&inputs).unwrap_err().field(),
            "items[1].unitPrice"
        );

        let inputs = QuotationCostInputs {
            rates: rates(-15, 10),
            ..QuotationCostInputs::default()
        };
        assert_eq!(
            compute_quotation_totals(&inputs).unwrap_err().field(),
            "marginRate"
        );
    }

    #[test]
    fn test_rejects_oversized_row_amount() {
        let inputs = QuotationCostInputs {
            items: vec![LineItem::new(
                "Whole building",
                Quantity::from_units(1_000_000),
                Money::from_dong(MAX_AMOUNT),
            )],
            ..QuotationCostInputs::default()
        };

        let err = compute_quotation_totals(&inputs).unwrap_err();
        assert_eq!(err.field(), "items[0].amount");
    }

    #[test]
    fn test_persist_patch_uses_marked_up_subtotal() {
        let inputs = QuotationCostInputs {
            items: vec![item("Outlet install", 2, 50_000)],
            ..QuotationCostInputs::default()
        };

        let patch = compute_quotation_totals(&inputs).unwrap().persist_patch();
        assert_eq!(patch.subtotal.dong(), 115_000);
        assert_eq!(patch.tax.dong(), 11_500);
        assert_eq!(patch.total.dong(), 126_500);
    }

    #[test]
    fn test_inputs_deserialize_with_defaults() {
        let json = r#"{"items":[{"name":"Outlet install","quantity":2,"unitPrice":50000}]}"#;
        let inputs: QuotationCostInputs = serde_json::from_str(json).unwrap();

        assert!(inputs.material_cost.is_zero());
        assert_eq!(inputs.rates, QuotationRates::default());
        assert_eq!(compute_quotation_totals(&inputs).unwrap().total.dong(), 126_500);
    }

    #[test]
    fn test_priced_lines_reprice_to_the_same_total() {
        let inputs = QuotationCostInputs {
            items: vec![
                item("Outlet install", 2, 50_000),
                LineItem::new("Cable", Quantity::from_milli(1_500), Money::from_dong(12_345)),
            ],
            labor_cost: Money::from_dong(80_000),
            ..QuotationCostInputs::default()
        };
        let sheet = price_quotation(&inputs).unwrap();

        let json = serde_json::to_value(&sheet.lines).unwrap();
        assert_eq!(json[0]["quantity"], 2);
        assert_eq!(json[1]["quantity"], 1.5);

        let stored: Vec<LineItem> = serde_json::from_value(json).unwrap();
        let again = QuotationCostInputs {
            items: stored,
            ..inputs
        };
        assert_eq!(compute_quotation_totals(&again).unwrap(), sheet.totals);
    }

    fn arb_item() -> impl Strategy<Value = LineItem> {
        (
            prop_oneof![Just(String::new()), "[a-z]{1,12}"],
            1i64..100_000,
            0i64..10_000_000,
        )
            .prop_map(|(name, milli, price)| {
                LineItem::new(name, Quantity::from_milli(milli), Money::from_dong(price))
            })
    }

    proptest! {
        #[test]
        fn prop_totals_are_ordered(
            items in prop::collection::vec(arb_item(), 0..20),
            material in 0i64..100_000_000,
            labor in 0i64..100_000_000,
            travel in 0i64..100_000_000,
            margin in 0i64..10_000,
            tax in 0i64..10_000,
        ) {
            let inputs = QuotationCostInputs {
                items,
                material_cost: Money::from_dong(material),
                labor_cost: Money::from_dong(labor),
                travel_cost: Money::from_dong(travel),
                rates: QuotationRates {
                    margin_rate: Percent::from_bps(margin),
                    tax_rate: Percent::from_bps(tax),
                },
            };

            let t = compute_quotation_totals(&inputs).unwrap();
            prop_assert!(t.total >= t.subtotal_after_margin);
            prop_assert!(t.subtotal_after_margin >= t.subtotal_before_margin);
            prop_assert!(t.subtotal_before_margin >= t.items_total);
            prop_assert!(t.items_total >= Money::zero());
            prop_assert_eq!(t.subtotal_before_margin + t.margin_amount, t.subtotal_after_margin);
            prop_assert_eq!(t.subtotal_after_margin + t.tax, t.total);
        }

        #[test]
        fn prop_zero_rates_sum_costs_exactly(
            items in prop::collection::vec(arb_item(), 0..20),
            material in 0i64..100_000_000,
            labor in 0i64..100_000_000,
            travel in 0i64..100_000_000,
        ) {
            let inputs = QuotationCostInputs {
                items,
                material_cost: Money::from_dong(material),
                labor_cost: Money::from_dong(labor),
                travel_cost: Money::from_dong(travel),
                rates: QuotationRates {
                    margin_rate: Percent::zero(),
                    tax_rate: Percent::zero(),
                },
            };

            let t = compute_quotation_totals(&inputs).unwrap();
            prop_assert_eq!(
                t.total.dong(),
                t.items_total.dong() + material + labor + travel
            );
        }
    }
}

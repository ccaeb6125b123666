//! # Price Calculator
//!
//! Recommended selling price of a catalog item from its base cost.
//!
//! ## Markup Chain
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  base_cost                                                              │
//! │     │  × (1 + personal_income_tax_rate)                                 │
//! │     ▼                                                                   │
//! │  after_personal_income_tax                                              │
//! │     │  × (1 + profit_rate)                                              │
//! │     ▼                                                                   │
//! │  after_profit ──── ceil_to_thousand ───► net_price_vat_exclusive        │
//! │     │  × (1 + vat_rate)                    (catalog unit price)         │
//! │     ▼                                                                   │
//! │  ceil_to_thousand ─────────────────────► final_price_vat_inclusive      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each markup compounds on the previous stage's output.
//!
//! ## Precision
//! The chain is carried as an exact fraction in i128 (the numerator over
//! `10_000` per applied rate), so both `ceil_to_thousand` results are exact.
//! The two displayed intermediates are rounded half-up to whole đồng and the
//! reported amounts are differences of displayed values, so the breakdown
//! rows always add up. `vat_amount` therefore includes the rounding
//! remainder of the final price, matching figures quoted in the past.
//!
//! ## Example
//! ```rust
//! use homefix_core::money::Money;
//! use homefix_core::pricing::{compute_selling_price, CostToPriceInputs};
//!
//! let breakdown = compute_selling_price(&CostToPriceInputs::new(Money::from_dong(850_000))).unwrap();
//! assert_eq!(breakdown.net_price_vat_exclusive.dong(), 1_216_000);
//! assert_eq!(breakdown.final_price_vat_inclusive.dong(), 1_313_000);
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreResult;
use crate::money::{ceil_div, div_round_half_up, Money, BPS_SCALE};
use crate::rates::MarkupRates;
use crate::types::Percent;
use crate::validation::validate_non_negative_money;

// =============================================================================
// Inputs
// =============================================================================

/// Base cost plus the markups to apply to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CostToPriceInputs {
    pub base_cost: Money,
    #[serde(default)]
    pub rates: MarkupRates,
}

impl CostToPriceInputs {
    /// Base cost with the default markups (10 % / 30 % / 8 %).
    pub fn new(base_cost: Money) -> Self {
        CostToPriceInputs {
            base_cost,
            rates: MarkupRates::default(),
        }
    }

    pub fn validate(&self) -> CoreResult<()> {
        validate_non_negative_money(self.base_cost, "baseCost")?;
        self.rates.validate()?;
        Ok(())
    }
}

// =============================================================================
// Results
// =============================================================================

/// Every intermediate amount of the markup chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PriceBreakdown {
    pub base_cost: Money,
    pub after_personal_income_tax: Money,
    pub personal_income_tax_amount: Money,
    pub after_profit: Money,
    pub profit_amount: Money,
    pub final_price_vat_inclusive: Money,
    /// `final_price_vat_inclusive − after_profit`, rounding remainder included.
    pub vat_amount: Money,
    /// Unit price quoted on line items; VAT is itemized separately.
    pub net_price_vat_exclusive: Money,
}

/// Which stage of the markup chain a [`BreakdownStep`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum StepKind {
    BaseCost,
    PersonalIncomeTax,
    Profit,
    Vat,
}

/// One row of the step-by-step explanation shown next to the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BreakdownStep {
    pub kind: StepKind,
    /// `None` for the base cost row.
    pub rate: Option<Percent>,
    pub amount: Money,
    pub running_total: Money,
}

/// What the catalog record stores after a (re)calculation.
///
/// Keeping `base_cost` lets the price be recomputed later when rates change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CatalogPricePatch {
    pub unit_price: Money,
    pub base_cost: Money,
}

impl PriceBreakdown {
    /// The chain as display rows; amounts sum to the VAT-inclusive price.
    ///
    /// ## Example
    /// ```rust
    /// use homefix_core::money::Money;
    /// use homefix_core::pricing::{compute_selling_price, CostToPriceInputs};
    ///
    /// let inputs = CostToPriceInputs::new(Money::from_dong(850_000));
    /// let breakdown = compute_selling_price(&inputs).unwrap();
    /// let steps = breakdown.steps(&inputs.rates);
    ///
    /// let sum: Money = steps.iter().map(|s| s.amount).sum();
    /// assert_eq!(sum, breakdown.final_price_vat_inclusive);
    /// ```
    pub fn steps(&self, rates: &MarkupRates) -> Vec<BreakdownStep> {
        vec![
            BreakdownStep {
                kind: StepKind::BaseCost,
                rate: None,
                amount: self.base_cost,
                running_total: self.base_cost,
            },
            BreakdownStep {
                kind: StepKind::PersonalIncomeTax,
                rate: Some(rates.personal_income_tax_rate),
                amount: self.personal_income_tax_amount,
                running_total: self.after_personal_income_tax,
            },
            BreakdownStep {
                kind: StepKind::Profit,
                rate: Some(rates.profit_rate),
                amount: self.profit_amount,
                running_total: self.after_profit,
            },
            BreakdownStep {
                kind: StepKind::Vat,
                rate: Some(rates.vat_rate),
                amount: self.vat_amount,
                running_total: self.final_price_vat_inclusive,
            },
        ]
    }

    /// The fields written back onto the catalog item.
    pub fn catalog_patch(&self) -> CatalogPricePatch {
        CatalogPricePatch {
            unit_price: self.net_price_vat_exclusive,
            base_cost: self.base_cost,
        }
    }
}

// =============================================================================
// Engine
// =============================================================================

/// `ceil(x / 1000) × 1000`: the "clean price" rule.
///
/// ```rust
/// use homefix_core::money::Money;
/// use homefix_core::pricing::ceil_to_thousand;
///
/// assert_eq!(ceil_to_thousand(Money::from_dong(0)).dong(), 0);
/// assert_eq!(ceil_to_thousand(Money::from_dong(1)).dong(), 1_000);
/// assert_eq!(ceil_to_thousand(Money::from_dong(1_000)).dong(), 1_000);
/// assert_eq!(ceil_to_thousand(Money::from_dong(1_001)).dong(), 2_000);
/// ```
#[inline]
pub fn ceil_to_thousand(amount: Money) -> Money {
    amount.ceil_to_thousand()
}

/// Computes the recommended selling price and its breakdown.
///
/// Fails with a [`crate::ValidationError`] naming `baseCost` or the offending
/// rate; never returns a partial breakdown.
pub fn compute_selling_price(inputs: &CostToPriceInputs) -> CoreResult<PriceBreakdown> {
    inputs.validate()?;

    let base = inputs.base_cost.dong() as i128;
    let pit_factor = BPS_SCALE + inputs.rates.personal_income_tax_rate.bps() as i128;
    let profit_factor = BPS_SCALE + inputs.rates.profit_rate.bps() as i128;
    let vat_factor = BPS_SCALE + inputs.rates.vat_rate.bps() as i128;

    // Exact numerators over BPS_SCALE^1, ^2 and ^3.
    let after_pit_exact = base * pit_factor;
    let after_profit_exact = after_pit_exact * profit_factor;
    let with_vat_exact = after_profit_exact * vat_factor;

    let scale_1 = BPS_SCALE;
    let scale_2 = BPS_SCALE * BPS_SCALE;
    let scale_3 = scale_2 * BPS_SCALE;

    let after_personal_income_tax = Money::from_bounded(div_round_half_up(after_pit_exact, scale_1));
    let after_profit = Money::from_bounded(div_round_half_up(after_profit_exact, scale_2));
    let final_price_vat_inclusive =
        Money::from_bounded(ceil_div(with_vat_exact, scale_3 * 1_000) * 1_000);
    let net_price_vat_exclusive =
        Money::from_bounded(ceil_div(after_profit_exact, scale_2 * 1_000) * 1_000);

    Ok(PriceBreakdown {
        base_cost: inputs.base_cost,
        after_personal_income_tax,
        personal_income_tax_amount: after_personal_income_tax - inputs.base_cost,
        after_profit,
        profit_amount: after_profit - after_personal_income_tax,
        final_price_vat_inclusive,
        vat_amount: final_price_vat_inclusive - after_profit,
        net_price_vat_exclusive,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

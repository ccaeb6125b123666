//! # Rate Sets
//!
//! The two calculations use unrelated percentages, so they get unrelated
//! types. Passing price-calculator rates to a quotation is a type error.
//!
//! ```text
//! ┌──────────────────────────────┐   ┌──────────────────────────────────┐
//! │  QuotationRates              │   │  MarkupRates                     │
//! │  ──────────────────────────  │   │  ──────────────────────────────  │
//! │  margin_rate     15 %        │   │  personal_income_tax_rate  10 %  │
//! │  tax_rate        10 %        │   │  profit_rate               30 %  │
//! │                              │   │  vat_rate                   8 %  │
//! │  used by quotation.rs        │   │  used by pricing.rs              │
//! └──────────────────────────────┘   └──────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::Percent;
use crate::validation::{validate_rate, ValidationResult};

/// Default quotation margin (15 %).
pub const DEFAULT_MARGIN_RATE: Percent = Percent::from_percent(15);

/// Default quotation tax (10 %).
pub const DEFAULT_TAX_RATE: Percent = Percent::from_percent(10);

/// Default personal-income-tax markup (10 %).
pub const DEFAULT_PERSONAL_INCOME_TAX_RATE: Percent = Percent::from_percent(10);

/// Default profit markup (30 %).
pub const DEFAULT_PROFIT_RATE: Percent = Percent::from_percent(30);

/// Default VAT (8 %).
pub const DEFAULT_VAT_RATE: Percent = Percent::from_percent(8);

// =============================================================================
// Quotation Rates
// =============================================================================

/// Margin and tax applied to a quotation's cost subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct QuotationRates {
    /// Markup on items + material + labor + travel.
    pub margin_rate: Percent,

    /// Tax on the marked-up subtotal.
    pub tax_rate: Percent,
}

impl QuotationRates {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_rate(self.margin_rate, "marginRate")?;
        validate_rate(self.tax_rate, "taxRate")?;
        Ok(())
    }
}

impl Default for QuotationRates {
    fn default() -> Self {
        QuotationRates {
            margin_rate: DEFAULT_MARGIN_RATE,
            tax_rate: DEFAULT_TAX_RATE,
        }
    }
}

// =============================================================================
// Markup Rates
// =============================================================================

/// The three compounding markups of the price calculator.
///
/// Each rate applies to the previous stage's output, not to the base cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct MarkupRates {
    pub personal_income_tax_rate: Percent,
    pub profit_rate: Percent,
    pub vat_rate: Percent,
}

impl MarkupRates {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_rate(self.personal_income_tax_rate, "personalIncomeTaxRate")?;
        validate_rate(self.profit_rate, "profitRate")?;
        validate_rate(self.vat_rate, "vatRate")?;
        Ok(())
    }
}

impl Default for MarkupRates {
    fn default() -> Self {
        MarkupRates {
            personal_income_tax_rate: DEFAULT_PERSONAL_INCOME_TAX_RATE,
            profit_rate: DEFAULT_PROFIT_RATE,
            vat_rate: DEFAULT_VAT_RATE,
        }
    }
}

//! # Price Calculator Commands
//!
//! Recommended selling price for a catalog item.
//!
//! ## User Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Price Calculator                                                       │
//! │                                                                         │
//! │  Base cost                                      850.000 ₫               │
//! │  + Personal income tax (10%)      85.000 ₫      935.000 ₫               │
//! │  + Profit (30%)                  280.500 ₫    1.215.500 ₫               │
//! │  + VAT (8%, rounded up)           97.500 ₫    1.313.000 ₫               │
//! │                                                                         │
//! │  Catalog unit price (VAT excl.)               1.216.000 ₫   [Save]      │
//! │                                                                         │
//! │  invoke calculate_selling_price → breakdown, steps, catalogPatch        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use homefix_core::{
    BreakdownStep, CatalogPricePatch, CostToPriceInputs, CoreResult, MarkupRates, PriceBreakdown,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{rate_or, required_money, NumericInput};
use crate::error::ApiError;
use crate::state::ConfigState;

/// Payload of `calculate_selling_price`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SellingPriceRequest {
    pub base_cost: Option<NumericInput>,
    pub personal_income_tax_rate: Option<NumericInput>,
    pub profit_rate: Option<NumericInput>,
    pub vat_rate: Option<NumericInput>,
}

impl SellingPriceRequest {
    pub fn into_inputs(self, config: &ConfigState) -> CoreResult<CostToPriceInputs> {
        let defaults = config.markup_rates;

        Ok(CostToPriceInputs {
            base_cost: required_money(self.base_cost.as_ref(), "baseCost")?,
            rates: MarkupRates {
                personal_income_tax_rate: rate_or(
                    self.personal_income_tax_rate.as_ref(),
                    "personalIncomeTaxRate",
                    defaults.personal_income_tax_rate,
                )?,
                profit_rate: rate_or(self.profit_rate.as_ref(), "profitRate", defaults.profit_rate)?,
                vat_rate: rate_or(self.vat_rate.as_ref(), "vatRate", defaults.vat_rate)?,
            },
        })
    }
}

/// Response of `calculate_selling_price`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellingPriceResponse {
    pub breakdown: PriceBreakdown,
    pub rates: MarkupRates,
    pub steps: Vec<BreakdownStep>,
    pub catalog_patch: CatalogPricePatch,
}

/// Runs the markup chain for one base cost.
pub fn calculate_selling_price(
    config: &ConfigState,
    request: SellingPriceRequest,
) -> Result<SellingPriceResponse, ApiError> {
    debug!("calculate_selling_price command");

    let inputs = request.into_inputs(config)?;
    let breakdown = homefix_core::compute_selling_price(&inputs)?;

    info!(
        base_cost = breakdown.base_cost.dong(),
        net_price = breakdown.net_price_vat_exclusive.dong(),
        final_price = breakdown.final_price_vat_inclusive.dong(),
        "Selling price computed"
    );

    Ok(SellingPriceResponse {
        steps: breakdown.steps(&inputs.rates),
        catalog_patch: breakdown.catalog_patch(),
        breakdown,
        rates: inputs.rates,
    })
}

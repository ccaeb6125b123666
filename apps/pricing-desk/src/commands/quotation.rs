//! # Quotation Commands
//!
//! Totals for the quotation editor and for the quotation persistence service.
//!
//! ## User Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Quotation Editor                                                       │
//! │                                                                         │
//! │  ┌────────────────────────────────────────────────────────────────┐    │
//! │  │  Outlet install          x2        50.000 ₫      100.000 ₫     │    │
//! │  │  (blank row)                                                   │    │
//! │  ├────────────────────────────────────────────────────────────────┤    │
//! │  │  Material / Labor / Travel                            0 ₫     │    │
//! │  │  Margin (15%)                                    15.000 ₫     │    │
//! │  │  Tax (10%)                                       11.500 ₫     │    │
//! │  │  ──────────────────────────────────────────────────────       │    │
//! │  │  TOTAL                                          126.500 ₫     │    │
//! │  └────────────────────────────────────────────────────────────────┘    │
//! │                                                                         │
//! │  calculate_quotation_totals → live totals while editing                 │
//! │  price_quotation            → rows + totals + record patch on save      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use homefix_core::{
    CoreResult, LineItem, Money, PricedLine, Quantity, QuotationCostInputs, QuotationRates,
    QuotationTotals, QuotationTotalsPatch,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{money_or_zero, rate_or, required_money, required_quantity, NumericInput};
use crate::error::ApiError;
use crate::state::ConfigState;

/// A quotation row as the editor sends it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LineItemRequest {
    pub name: String,
    pub quantity: Option<NumericInput>,
    pub unit_price: Option<NumericInput>,
}

/// Payload of `calculate_quotation_totals` and `price_quotation`.
///
/// Omitted costs count as zero; omitted rates use the configured defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuotationRequest {
    pub items: Vec<LineItemRequest>,
    pub material_cost: Option<NumericInput>,
    pub labor_cost: Option<NumericInput>,
    pub travel_cost: Option<NumericInput>,
    pub margin_rate: Option<NumericInput>,
    pub tax_rate: Option<NumericInput>,
}

impl QuotationRequest {
    /// Converts the payload into engine inputs.
    ///
    /// Blank rows are passed through untouched (the engine drops them), so
    /// their quantity and price are not parsed.
    pub fn into_inputs(self, config: &ConfigState) -> CoreResult<QuotationCostInputs> {
        let defaults = config.quotation_rates;

        let mut items = Vec::with_capacity(self.items.len());
        for (index, row) in self.items.into_iter().enumerate() {
            if row.name.trim().is_empty() {
                items.push(LineItem::new(row.name, Quantity::from_milli(0), Money::zero()));
                continue;
            }

            let quantity =
                required_quantity(row.quantity.as_ref(), &format!("items[{}].quantity", index))?;
            let unit_price =
                required_money(row.unit_price.as_ref(), &format!("items[{}].unitPrice", index))?;
            items.push(LineItem::new(row.name, quantity, unit_price));
        }

        Ok(QuotationCostInputs {
            items,
            material_cost: money_or_zero(self.material_cost.as_ref(), "materialCost")?,
            labor_cost: money_or_zero(self.labor_cost.as_ref(), "laborCost")?,
            travel_cost: money_or_zero(self.travel_cost.as_ref(), "travelCost")?,
            rates: QuotationRates {
                margin_rate: rate_or(self.margin_rate.as_ref(), "marginRate", defaults.margin_rate)?,
                tax_rate: rate_or(self.tax_rate.as_ref(), "taxRate", defaults.tax_rate)?,
            },
        })
    }
}

/// Totals plus the rates they were computed with.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationTotalsResponse {
    pub totals: QuotationTotals,
    pub rates: QuotationRates,
}

/// Everything the quotation persistence service writes on save.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationSheetResponse {
    pub lines: Vec<PricedLine>,
    pub totals: QuotationTotals,
    pub rates: QuotationRates,
    pub patch: QuotationTotalsPatch,
}

/// Computes live totals for the quotation editor.
pub fn calculate_quotation_totals(
    config: &ConfigState,
    request: QuotationRequest,
) -> Result<QuotationTotalsResponse, ApiError> {
    debug!(rows = request.items.len(), "calculate_quotation_totals command");

    let inputs = request.into_inputs(config)?;
    let totals = homefix_core::compute_quotation_totals(&inputs)?;

    debug!(total = totals.total.dong(), "Quotation totals computed");
    Ok(QuotationTotalsResponse {
        totals,
        rates: inputs.rates,
    })
}

/// Prices a quotation for saving: kept rows, totals and the record patch.
pub fn price_quotation(
    config: &ConfigState,
    request: QuotationRequest,
) -> Result<QuotationSheetResponse, ApiError> {
    debug!(rows = request.items.len(), "price_quotation command");

    let inputs = request.into_inputs(config)?;
    let sheet = homefix_core::price_quotation(&inputs)?;

    info!(
        kept_rows = sheet.lines.len(),
        dropped_rows = inputs.items.len() - sheet.lines.len(),
        total = sheet.totals.total.dong(),
        "Quotation priced"
    );

    Ok(QuotationSheetResponse {
        patch: sheet.totals.persist_patch(),
        lines: sheet.lines,
        totals: sheet.totals,
        rates: inputs.rates,
    })
}

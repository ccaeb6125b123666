//! # homefix-core: Pricing Engine for Homefix
//!
//! Pure functions that price home-repair work. No I/O, no shared state:
//! every call is deterministic and safe from any number of threads.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Homefix Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │          Frontend / CRUD handlers (quotations, catalog)         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON commands                          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    pricing-desk (commands)                      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ homefix-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │ quotation │  │  pricing  │  │ validation│  │   │
//! │  │   │   Money   │  │  totals   │  │  markup   │  │   rules   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money in whole đồng with half-up rounding helpers
//! - [`types`] - `Percent` (basis points) and `Quantity` (thousandths)
//! - [`rates`] - `QuotationRates` and `MarkupRates`, kept apart on purpose
//! - [`quotation`] - quotation totals (items, costs, margin, tax)
//! - [`pricing`] - cost-to-price markup chain and `ceil_to_thousand`
//! - [`validation`] - input checks shared by both engines
//! - [`error`] - `ValidationError`
//!
//! ## Example Usage
//!
//! ```rust
//! use homefix_core::{compute_selling_price, CostToPriceInputs, Money};
//!
//! let breakdown = compute_selling_price(&CostToPriceInputs::new(Money::from_dong(850_000)))?;
//! assert_eq!(breakdown.net_price_vat_exclusive.to_string(), "1.216.000 ₫");
//! # Ok::<(), homefix_core::ValidationError>(())
//! ```

pub mod error;
pub mod money;
pub mod pricing;
pub mod quotation;
pub mod rates;
pub mod types;
pub mod validation;

pub use error::{CoreResult, ValidationError};
pub use money::Money;
pub use pricing::{
    ceil_to_thousand, compute_selling_price, BreakdownStep, CatalogPricePatch, CostToPriceInputs,
    PriceBreakdown, StepKind,
};
pub use quotation::{
    compute_quotation_totals, price_quotation, LineItem, PricedLine, QuotationCostInputs,
    QuotationSheet, QuotationTotals, QuotationTotalsPatch,
};
pub use rates::{MarkupRates, QuotationRates};
pub use types::{Percent, Quantity};

// =============================================================================
// Engine Limits
// =============================================================================

/// Largest accepted cost, price or row amount (one trillion đồng).
///
/// Together with the other limits this keeps every i128 intermediate, and
/// every result narrowed back to i64, far from overflow.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;

/// Largest accepted rate: 1000 %.
pub const MAX_RATE_BPS: i64 = 100_000;

/// Largest accepted quantity: one million units.
pub const MAX_QUANTITY_MILLI: i64 = 1_000_000_000;

/// Maximum rows on one quotation.
pub const MAX_LINE_ITEMS: usize = 500;

/// Maximum characters in a line item name.
pub const MAX_ITEM_NAME_LEN: usize = 200;

//! # Commands Module
//!
//! All commands exposed to CRUD handlers and the frontend.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs               ◄─── You are here (envelope, dispatch, inputs)
//! ├── quotation.rs         ◄─── Quotation totals and priced lines
//! ├── price_calculator.rs  ◄─── Cost-to-price markup chain
//! └── config.rs            ◄─── Configuration retrieval
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  stdin:                                                                 │
//! │  { "command": "calculate_selling_price",                                │
//! │    "payload": { "baseCost": 850000 } }                                  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  dispatch(&config, envelope)                                            │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  price_calculator::calculate_selling_price(&config, request)            │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  stdout:                                                                │
//! │  { "ok": true, "data": { "breakdown": {...}, "steps": [...] } }         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod price_calculator;
pub mod quotation;

use homefix_core::{CoreResult, Money, Percent, Quantity, ValidationError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::ApiError;
use crate::state::ConfigState;

// =============================================================================
// Envelope
// =============================================================================

/// One command request as read from stdin.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandEnvelope {
    pub command: String,

    #[serde(default)]
    pub payload: Value,
}

/// Names accepted by [`dispatch`].
pub const COMMANDS: &[&str] = &[
    "calculate_quotation_totals",
    "price_quotation",
    "calculate_selling_price",
    "get_config",
];

/// Routes an envelope to its command and serializes the result.
pub fn dispatch(config: &ConfigState, envelope: CommandEnvelope) -> Result<Value, ApiError> {
    debug!(command = %envelope.command, "dispatch");

    match envelope.command.as_str() {
        "calculate_quotation_totals" => {
            let request = serde_json::from_value(envelope.payload)?;
            to_json(quotation::calculate_quotation_totals(config, request)?)
        }
        "price_quotation" => {
            let request = serde_json::from_value(envelope.payload)?;
            to_json(quotation::price_quotation(config, request)?)
        }
        "calculate_selling_price" => {
            let request = serde_json::from_value(envelope.payload)?;
            to_json(price_calculator::calculate_selling_price(config, request)?)
        }
        "get_config" => to_json(config::get_config(config)),
        other => Err(ApiError::unknown_command(other)),
    }
}

fn to_json<T: Serialize>(response: T) -> Result<Value, ApiError> {
    serde_json::to_value(response)
        .map_err(|e| ApiError::internal(format!("Failed to serialize response: {}", e)))
}

// =============================================================================
// Numeric Inputs
// =============================================================================

/// A number as sent by a form: either a JSON number or numeric text.
///
/// Blank text counts as "not provided".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
}

impl NumericInput {
    /// Returns `None` for blank text, the parsed number otherwise.
    pub fn value(&self, field: &str) -> CoreResult<Option<f64>> {
        match self {
            NumericInput::Number(n) => Ok(Some(*n)),
            NumericInput::Text(text) => {
                let text = text.trim();
                if text.is_empty() {
                    return Ok(None);
                }
                text.parse::<f64>()
                    .map(Some)
                    .map_err(|_| ValidationError::NotANumber {
                        field: field.to_string(),
                    })
            }
        }
    }
}

impl From<f64> for NumericInput {
    fn from(n: f64) -> Self {
        NumericInput::Number(n)
    }
}

fn provided(input: Option<&NumericInput>, field: &str) -> CoreResult<Option<f64>> {
    match input {
        Some(input) => input.value(field),
        None => Ok(None),
    }
}

/// A cost that defaults to zero when omitted.
pub(crate) fn money_or_zero(input: Option<&NumericInput>, field: &str) -> CoreResult<Money> {
    match provided(input, field)? {
        Some(value) => Money::try_from_f64(value, field),
        None => Ok(Money::zero()),
    }
}

/// A money value the caller must supply.
pub(crate) fn required_money(input: Option<&NumericInput>, field: &str) -> CoreResult<Money> {
    match provided(input, field)? {
        Some(value) => Money::try_from_f64(value, field),
        None => Err(ValidationError::Required {
            field: field.to_string(),
        }),
    }
}

/// A quantity the caller must supply.
pub(crate) fn required_quantity(input: Option<&NumericInput>, field: &str) -> CoreResult<Quantity> {
    match provided(input, field)? {
        Some(value) => Quantity::try_from_f64(value, field),
        None => Err(ValidationError::Required {
            field: field.to_string(),
        }),
    }
}

/// A percentage that falls back to the configured rate when omitted.
pub(crate) fn rate_or(
    input: Option<&NumericInput>,
    field: &str,
    default: Percent,
) -> CoreResult<Percent> {
    match provided(input, field)? {
        Some(value) => Percent::try_from_percentage(value, field),
        None => Ok(default),
    }
}

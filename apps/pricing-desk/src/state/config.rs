//! # Configuration State
//!
//! Company details and the two default rate sets, loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`HOMEFIX_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after loading and is passed to each command
//! by reference, so no lock is needed.

use std::env;

use homefix_core::validation::validate_rate;
use homefix_core::{MarkupRates, Percent, QuotationRates};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Shown on quotations.
    pub company_name: String,

    /// Currency code (ISO 4217)
    pub currency_code: String,

    /// Defaults for quotations that omit margin or tax.
    pub quotation_rates: QuotationRates,

    /// Defaults for the price calculator.
    pub markup_rates: MarkupRates,
}

impl Default for ConfigState {
    /// ## Default Values
    /// - Company: "Homefix Services"
    /// - Currency: VND
    /// - Quotation: 15 % margin, 10 % tax
    /// - Price calculator: 10 % PIT, 30 % profit, 8 % VAT
    fn default() -> Self {
        ConfigState {
            company_name: "Homefix Services".to_string(),
            currency_code: "VND".to_string(),
            quotation_rates: QuotationRates::default(),
            markup_rates: MarkupRates::default(),
        }
    }
}

impl ConfigState {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// Missing keys fall back to [`ConfigState::default`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ConfigState::default();

        Ok(ConfigState {
            company_name: lookup("HOMEFIX_COMPANY_NAME").unwrap_or(defaults.company_name),

            currency_code: lookup("HOMEFIX_CURRENCY_CODE").unwrap_or(defaults.currency_code),

            quotation_rates: QuotationRates {
                margin_rate: rate_var(
                    &lookup,
                    "HOMEFIX_QUOTE_MARGIN_RATE",
                    defaults.quotation_rates.margin_rate,
                )?,
                tax_rate: rate_var(
                    &lookup,
                    "HOMEFIX_QUOTE_TAX_RATE",
                    defaults.quotation_rates.tax_rate,
                )?,
            },

            markup_rates: MarkupRates {
                personal_income_tax_rate: rate_var(
                    &lookup,
                    "HOMEFIX_PIT_RATE",
                    defaults.markup_rates.personal_income_tax_rate,
                )?,
                profit_rate: rate_var(
                    &lookup,
                    "HOMEFIX_PROFIT_RATE",
                    defaults.markup_rates.profit_rate,
                )?,
                vat_rate: rate_var(&lookup, "HOMEFIX_VAT_RATE", defaults.markup_rates.vat_rate)?,
            },
        })
    }
}

/// Reads a percentage variable (`"15"`, `"8.25"`).
fn rate_var<F>(lookup: &F, key: &str, default: Percent) -> Result<Percent, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };

    let pct: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue(key.to_string()))?;
    let rate = Percent::try_from_percentage(pct, key)
        .map_err(|_| ConfigError::InvalidValue(key.to_string()))?;
    validate_rate(rate, key).map_err(|_| ConfigError::InvalidValue(key.to_string()))?;

    Ok(rate)
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ConfigState::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, ConfigState::default());
        assert_eq!(config.quotation_rates.margin_rate, Percent::from_percent(15));
        assert_eq!(config.markup_rates.vat_rate, Percent::from_percent(8));
    }

    #[test]
    fn test_overrides() {
        let config = ConfigState::from_lookup(lookup_from(&[
            ("HOMEFIX_COMPANY_NAME", "Sửa Nhà 24h"),
            ("HOMEFIX_QUOTE_MARGIN_RATE", "20"),
            ("HOMEFIX_VAT_RATE", " 10 "),
            ("HOMEFIX_PROFIT_RATE", "27.5"),
        ]))
        .unwrap();

        assert_eq!(config.company_name, "Sửa Nhà 24h");
        assert_eq!(config.quotation_rates.margin_rate, Percent::from_percent(20));
        assert_eq!(config.quotation_rates.tax_rate, Percent::from_percent(10));
        assert_eq!(config.markup_rates.vat_rate, Percent::from_percent(10));
        assert_eq!(config.markup_rates.profit_rate, Percent::from_bps(2_750));
    }

    #[test]
    fn test_invalid_values_name_the_variable() {
        let err = ConfigState::from_lookup(lookup_from(&[("HOMEFIX_QUOTE_TAX_RATE", "ten")]))
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for HOMEFIX_QUOTE_TAX_RATE");

        let err =
            ConfigState::from_lookup(lookup_from(&[("HOMEFIX_PIT_RATE", "-5")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref key) if key == "HOMEFIX_PIT_RATE"));

        assert!(ConfigState::from_lookup(lookup_from(&[("HOMEFIX_VAT_RATE", "NaN")])).is_err());
    }
}

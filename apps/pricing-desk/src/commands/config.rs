//! # Config Commands
//!
//! Retrieval of the loaded configuration.

use tracing::debug;

use crate::state::ConfigState;

/// Gets the current application configuration.
///
/// ## When Used
/// - Editor startup (pre-fill margin, tax and markup fields)
/// - Quotation header (company name, currency)
pub fn get_config(config: &ConfigState) -> ConfigState {
    debug!("get_config command");
    config.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_config_serializes_rate_sets_separately() {
        let json = serde_json::to_value(get_config(&ConfigState::default())).unwrap();

        assert_eq!(json["currencyCode"], "VND");
        assert_eq!(json["quotationRates"]["marginRate"], 15);
        assert_eq!(json["markupRates"]["profitRate"], 30);
    }

    #[test]
    fn test_prefilled_rates_round_trip_through_the_calculators() {
        use crate::commands::price_calculator::calculate_selling_price;
        use crate::commands::quotation::calculate_quotation_totals;
        use serde_json::json;

        let config = ConfigState::default();
        let json = serde_json::to_value(get_config(&config)).unwrap();

        let mut markup = json["markupRates"].clone();
        markup["baseCost"] = json!(850000);
        let price =
            calculate_selling_price(&config, serde_json::from_value(markup).unwrap()).unwrap();
        assert_eq!(price.breakdown.final_price_vat_inclusive.dong(), 1_313_000);
        assert_eq!(price.breakdown.net_price_vat_exclusive.dong(), 1_216_000);

        let mut quote = json["quotationRates"].clone();
        quote["items"] = json!([{ "name": "Outlet install", "quantity": 2, "unitPrice": 50000 }]);
        let totals =
            calculate_quotation_totals(&config, serde_json::from_value(quote).unwrap()).unwrap();
        assert_eq!(totals.totals.total.dong(), 126_500);
    }
}

//! # Homefix Pricing Desk
//!
//! Command layer between quotation/catalog CRUD handlers and the pricing
//! engine in `homefix-core`.
//!
//! ## Module Structure
//! ```text
//! src/
//! ├── lib.rs       ◄─── You are here (startup, execute)
//! ├── main.rs      ◄─── Binary entry point
//! ├── error.rs     ◄─── ApiError returned to callers
//! ├── commands/    ◄─── calculate_quotation_totals, calculate_selling_price, ...
//! └── state/       ◄─── ConfigState
//! ```

pub mod commands;
pub mod error;
pub mod state;

use std::io::Read;
use std::process::ExitCode;

use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

use crate::commands::CommandEnvelope;
use crate::error::{ApiError, ErrorCode};
use crate::state::ConfigState;

/// What the binary prints to stdout.
#[derive(Debug, Clone, Serialize)]
pub struct CommandResponse {
    pub ok: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

impl CommandResponse {
    fn success(data: Value) -> Self {
        CommandResponse {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    fn failure(error: ApiError) -> Self {
        CommandResponse {
            ok: false,
            data: None,
            error: Some(error),
        }
    }
}

/// Exit status for a response.
///
/// - `0`: command succeeded
/// - `1`: command ran and rejected its input
/// - `2`: the request itself was unusable (bad envelope, unknown command)
pub fn exit_status(response: &CommandResponse) -> u8 {
    match response.error.as_ref().map(|e| e.code) {
        None => 0,
        Some(ErrorCode::InvalidEnvelope | ErrorCode::UnknownCommand) => 2,
        Some(_) => 1,
    }
}

/// Parses one envelope and runs it.
pub fn execute(config: &ConfigState, input: &str) -> CommandResponse {
    let envelope: CommandEnvelope = match serde_json::from_str(input) {
        Ok(envelope) => envelope,
        Err(e) => {
            return CommandResponse::failure(ApiError::new(
                ErrorCode::InvalidEnvelope,
                format!("Malformed envelope: {}", e),
            ))
        }
    };

    let command = envelope.command.clone();
    match commands::dispatch(config, envelope) {
        Ok(data) => {
            info!(%command, "Command succeeded");
            CommandResponse::success(data)
        }
        Err(err) => {
            info!(%command, error = %err, "Command failed");
            CommandResponse::failure(err)
        }
    }
}

/// Runs the binary: configuration, one command from stdin, response on stdout.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Initialize Logging ── tracing-subscriber on stderr, RUST_LOG aware  │
/// │  2. Load ConfigState ──── HOMEFIX_* environment variables               │
/// │  3. Read stdin ────────── one JSON envelope                             │
/// │  4. Execute ───────────── dispatch to the command                       │
/// │  5. Print response ────── one JSON line on stdout                       │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> ExitCode {
    init_tracing();

    info!("Starting Homefix pricing desk");

    let response = match ConfigState::load() {
        Ok(config) => {
            info!(
                company = %config.company_name,
                margin = %config.quotation_rates.margin_rate,
                tax = %config.quotation_rates.tax_rate,
                "Configuration loaded"
            );

            let mut input = String::new();
            match std::io::stdin().read_to_string(&mut input) {
                Ok(_) => execute(&config, &input),
                Err(e) => {
                    error!("Failed to read stdin: {}", e);
                    CommandResponse::failure(ApiError::internal("Failed to read request"))
                }
            }
        }
        Err(e) => CommandResponse::failure(ApiError::from(e)),
    };

    match serde_json::to_string(&response) {
        Ok(line) => println!("{}", line),
        Err(e) => {
            error!("Failed to serialize response: {}", e);
            return ExitCode::from(1);
        }
    }

    ExitCode::from(exit_status(&response))
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=homefix_pricing=trace` - Show trace for this crate only
/// - Default: INFO, DEBUG for this crate
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,homefix_pricing=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::TRACE)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execute_selling_price() {
        let response = execute(
            &ConfigState::default(),
            r#"{"command":"calculate_selling_price","payload":{"baseCost":850000}}"#,
        );

        assert!(response.ok);
        assert_eq!(exit_status(&response), 0);
        let data = response.data.unwrap();
        assert_eq!(data["breakdown"]["finalPriceVatInclusive"], 1_313_000);
    }

    #[test]
    fn test_execute_validation_failure() {
        let response = execute(
            &ConfigState::default(),
            r#"{"command":"calculate_selling_price","payload":{"baseCost":-1}}"#,
        );

        assert!(!response.ok);
        assert_eq!(exit_status(&response), 1);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(json["error"]["field"], "baseCost");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_execute_malformed_envelope() {
        let response = execute(&ConfigState::default(), "not json");
        assert_eq!(exit_status(&response), 2);
        assert_eq!(response.error.unwrap().code, ErrorCode::InvalidEnvelope);
    }

    #[test]
    fn test_execute_unknown_command() {
        let response = execute(&ConfigState::default(), r#"{"command":"print_pdf"}"#);
        assert_eq!(exit_status(&response), 2);
    }

    #[test]
    fn test_malformed_payload_is_a_command_error() {
        let response = execute(
            &ConfigState::default(),
            r#"{"command":"price_quotation","payload":{"items":"nope"}}"#,
        );
        assert_eq!(exit_status(&response), 1);
    }

    #[test]
    fn test_execute_rejects_small_negative_base_cost() {
        let response = execute(
            &ConfigState::default(),
            r#"{"command":"calculate_selling_price","payload":{"baseCost":-0.4}}"#,
        );

        assert!(!response.ok);
        assert_eq!(exit_status(&response), 1);
        assert_eq!(response.error.unwrap().field.as_deref(), Some("baseCost"));
    }

    #[test]
    fn test_execute_quotation() {
        let response = execute(
            &ConfigState::default(),
            r#"{"command":"price_quotation","payload":{
                "items":[{"name":"Outlet install","quantity":2,"unitPrice":50000},
                         {"name":"","quantity":9,"unitPrice":9}]
            }}"#,
        );

        let data = response.data.unwrap();
        assert_eq!(data["totals"]["total"], 126_500);
        assert_eq!(data["lines"].as_array().unwrap().len(), 1);
        assert_eq!(data["patch"]["subtotal"], 115_000);
    }
}

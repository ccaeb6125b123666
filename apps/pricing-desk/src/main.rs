//! # Homefix Pricing Desk Entry Point
//!
//! Reads one command envelope from stdin and prints one JSON response line.
//!
//! ## Process Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Homefix Pricing Desk                             │
//! │                                                                         │
//! │  Quotation / catalog CRUD handler                                       │
//! │         │                                                               │
//! │         │  stdin: { "command": "...", "payload": { ... } }              │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                    Rust Backend (this crate)                     │  │
//! │  │                                                                  │  │
//! │  │  main.rs ────► Hands off to lib.rs                              │  │
//! │  │  lib.rs ─────► Logging, configuration, envelope parsing         │  │
//! │  │  commands/ ──► calculate_quotation_totals, price_quotation,     │  │
//! │  │                calculate_selling_price, get_config              │  │
//! │  │  state/ ─────► ConfigState                                      │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  homefix-core (pure pricing engine)                                     │
//! │                                                                         │
//! │  stdout: { "ok": true, "data": ... } | { "ok": false, "error": ... }   │
//! │  stderr: tracing output                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

fn main() -> ExitCode {
    homefix_pricing::run()
}

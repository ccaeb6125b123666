//! # Application State
//!
//! ```text
//! state/
//! ├── mod.rs     ◄─── You are here (exports)
//! └── config.rs  ◄─── ConfigState: company details, default rate sets
//! ```
//!
//! The pricing engine is stateless, so configuration is the only state.
//! It is loaded once in `run()` and handed to every command explicitly.

pub mod config;

pub use config::{ConfigError, ConfigState};

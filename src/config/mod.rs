//! Logger configuration.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (read & deserialize)
//!     → LoggerConfig (all fields defaulted)
//!     → LoggerConfig::build(ctx) → Slogger
//! ```
//!
//! # Design Decisions
//! - An empty file is a valid config: console output on stdout at INFO
//! - Unknown level names are not errors; they select INFO like `set_level`

pub mod loader;
pub mod schema;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{ConsoleConfig, Format, LoggerConfig, Output};

//! Configuration module for strata
//!
//! Resolution order:
//! 1. CLI flags (`--local`, `--config`, `--out`)
//! 2. Project config (`strata.toml`)
//! 3. Built-in defaults (the canonical stack)
//!
//! The execution mode is resolved exactly once, before any build step runs.

mod loader;
#[cfg(test)]
mod tests;
mod types;

pub use loader::{load_or_default, load_with_warnings, ConfigWarning, CONFIG_FILE};
pub use types::{
    ApiConfig, AppConfig, Config, DatabaseConfig, ExecutionMode, LayerConfig, DATABASE_URL_VAR,
};

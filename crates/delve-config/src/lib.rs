//! # Delve Configuration
//!
//! Configuration model for the delve research tool.
//!
//! ## Precedence
//!
//! Values are resolved from lowest to highest priority:
//!
//! 1. Built-in defaults
//! 2. TOML config file (`--config`, or `~/.config/delve/config.toml` if present)
//! 3. Process environment (`PATH_TO_SAVE`, `OPENAI_API_KEY`, ...)
//! 4. Command-line overrides
//!
//! `.env` files are loaded into the process environment by the binary before
//! [`DelveConfig::load`] runs, so they sit at the same level as real
//! environment variables.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use delve_config::{ConfigOverrides, DelveConfig};
//!
//! let config = DelveConfig::load(None, ConfigOverrides::default())?;
//! config.validate_for_research()?;
//! # Ok::<(), delve_config::ConfigError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod loader;
mod validation;

pub use config::*;
pub use loader::*;
pub use validation::*;

//! delve command-line interface
//!
//! Argument parsing lives in [`cli`]; each subcommand has a module under
//! [`commands`]. [`context`] turns loaded configuration into a ready
//! pipeline.

pub mod cli;
pub mod commands;
pub mod context;
pub mod logging;

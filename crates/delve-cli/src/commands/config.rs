use anyhow::{Context, Result};
use colored::Colorize;
use delve_config::DelveConfig;
use std::path::PathBuf;

use crate::cli::ConfigCommands;

/// Execute config subcommand
pub fn execute(config: &DelveConfig, cmd: ConfigCommands) -> Result<bool> {
    match cmd {
        ConfigCommands::Show => show(config),
        ConfigCommands::Init { path, force } => init(path, force),
    }
}

/// Show the current effective configuration
fn show(config: &DelveConfig) -> Result<bool> {
    println!("{}", config.display_as_toml()?);
    Ok(true)
}

/// Initialize a new config file
fn init(path: Option<PathBuf>, force: bool) -> Result<bool> {
    let config_path = path
        .or_else(DelveConfig::default_config_path)
        .context("Could not determine config file path")?;

    if config_path.exists() && !force {
        println!(
            "{} Config file already exists at: {}",
            "Error:".red().bold(),
            config_path.display()
        );
        println!("Use {} to overwrite", "--force".yellow());
        return Ok(false);
    }

    DelveConfig::create_example(&config_path)?;

    println!(
        "{} Created config file at: {}",
        "Success:".green().bold(),
        config_path.display()
    );
    println!("\n{}", "Edit this file to point delve at your vault.".dimmed());
    Ok(true)
}

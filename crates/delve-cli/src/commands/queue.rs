use anyhow::Result;
use colored::Colorize;
use delve_config::DelveConfig;
use delve_core::consistency;
use delve_core::identifier::NOTE_EXTENSION;

use crate::cli::QueueCommands;
use crate::context;

/// Execute a queue subcommand. Returns whether the command succeeded.
pub fn execute(config: &DelveConfig, cmd: QueueCommands) -> Result<bool> {
    match cmd {
        QueueCommands::Verify => verify(config),
    }
}

fn verify(config: &DelveConfig) -> Result<bool> {
    let queue = context::queue(config);
    let entries = queue.read()?;
    if entries.is_empty() {
        println!("Queue is empty!");
        return Ok(true);
    }

    println!("Checking {} queued topic(s) in {}", entries.len(), queue.path().display());
    let report = consistency::report(&entries);
    let mut mismatches = 0;
    for entry in &report {
        let file = format!("{}.{}", entry.future_stem, NOTE_EXTENSION);
        if entry.is_consistent() {
            println!("{} {} -> {}", "✓".green(), entry.identifier, file);
        } else {
            mismatches += 1;
            println!("{} {} -> {}", "✗".red(), entry.identifier, file);
        }
    }

    if mismatches == 0 {
        println!("\nAll queued topics match their future file names.");
        Ok(true)
    } else {
        println!(
            "\n{} {} topic(s) will not match their file names.",
            "Warning:".yellow().bold(),
            mismatches
        );
        Ok(false)
    }
}

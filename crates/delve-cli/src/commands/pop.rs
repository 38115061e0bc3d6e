use anyhow::{bail, Result};
use colored::Colorize;
use delve_config::DelveConfig;
use delve_pipeline::{PopOutcome, QueueRunner};

use super::research::print_report;
use crate::cli::PopArgs;
use crate::context;

/// Execute `pop`. Returns whether the command succeeded.
pub async fn execute(config: &DelveConfig, args: PopArgs) -> Result<bool> {
    if args.list {
        list(config)?;
        return Ok(true);
    }
    if args.clear {
        context::queue(config).clear()?;
        println!("Queue cleared!");
        return Ok(true);
    }
    if let Some(topic) = args.check {
        check(config, &topic)?;
        return Ok(true);
    }

    let count = parse_count(args.count.as_deref())?;
    let runner = QueueRunner::new(context::pipeline(config)?);

    let summary = runner
        .pop_each(count, |item, outcome| print_outcome(item, count, outcome))
        .await?;

    println!(
        "\nCompleted: {} of {} items processed successfully",
        summary.succeeded, summary.requested
    );
    Ok(summary.is_complete())
}

fn list(config: &DelveConfig) -> Result<()> {
    let entries = context::queue(config).read()?;
    if entries.is_empty() {
        println!("Queue is empty!");
        return Ok(());
    }
    println!("Current queue:");
    for (i, entry) in entries.iter().enumerate() {
        println!("{}. {}", i + 1, entry);
    }
    Ok(())
}

fn check(config: &DelveConfig, topic: &str) -> Result<()> {
    let vault = context::vault(config)?;
    if vault.contains(topic) {
        println!(
            "Topic '{}' already exists: {}",
            topic,
            vault.note_path(topic).display()
        );
    } else {
        println!("Topic '{}' does not exist yet.", topic);
    }
    Ok(())
}

fn parse_count(raw: Option<&str>) -> Result<usize> {
    let Some(raw) = raw else {
        return Ok(1);
    };
    match raw.parse::<i64>() {
        Ok(n) if n > 0 => Ok(n as usize),
        Ok(_) => bail!("Count must be a positive integer"),
        Err(_) => bail!("Count must be a valid integer, got {:?}", raw),
    }
}

fn print_outcome(item: usize, count: usize, outcome: &PopOutcome) {
    println!("\n--- Item {} of {} ---", item, count);
    match outcome {
        PopOutcome::Empty => println!("Queue is empty!"),
        PopOutcome::Skipped(topic) => {
            println!("Topic '{}' already exists. Removed from queue.", topic)
        }
        PopOutcome::Discarded(topic) => {
            println!("Topic '{}' is not a usable note name. Removed from queue.", topic)
        }
        PopOutcome::Researched(report) => print_report(report),
        PopOutcome::Failed { topic, error } => {
            eprintln!("{} {}: {}", "Failed:".red().bold(), topic, error);
            println!("Stopping.");
        }
    }
}

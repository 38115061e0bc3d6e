use anyhow::Result;
use colored::Colorize;
use delve_config::DelveConfig;
use delve_pipeline::ResearchReport;

use crate::context;

/// Research one topic end to end. Returns whether a note was written.
pub async fn execute(config: &DelveConfig, topic: &str) -> Result<bool> {
    let pipeline = context::pipeline(config)?;

    println!("Researching: {}", topic.bold());
    match pipeline.run(topic).await {
        Ok(report) => {
            print_report(&report);
            Ok(true)
        }
        Err(e) if e.is_side_effect_free() => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

pub(crate) fn print_report(report: &ResearchReport) {
    println!(
        "{} Created note: {}",
        "✓".green().bold(),
        report.note_path.display()
    );
    if !report.linked_concepts.is_empty() {
        println!("  Linked: {}", report.linked_concepts.join(", "));
    }
    if !report.existing_links.is_empty() {
        println!("  Existing notes: {}", report.existing_links.join(", "));
    }
    if report.enqueued > 0 {
        println!("  Queued {} new concept(s)", report.enqueued);
    }
}

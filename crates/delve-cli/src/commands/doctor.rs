use anyhow::Result;
use colored::Colorize;
use delve_config::DelveConfig;
use delve_core::Vault;

use crate::context;

fn pass(message: impl std::fmt::Display) {
    println!("   {} {}", "✓".green(), message);
}

fn fail(message: impl std::fmt::Display) -> Result<bool> {
    println!("   {} {}", "✗".red(), message);
    Ok(false)
}

/// Run the setup checks in order, stopping at the first hard failure.
/// Creates a missing vault directory and queue file along the way.
pub fn execute(config: &DelveConfig) -> Result<bool> {
    println!("{}", "Checking delve setup...".bold());

    println!("\n1. Settings");
    match config.api_key() {
        Ok(_) => pass("OPENAI_API_KEY found"),
        Err(e) => return fail(e),
    }
    let vault_path = match config.vault_path() {
        Ok(path) => {
            pass(format!("PATH_TO_SAVE = {}", path.display()));
            path
        }
        Err(e) => return fail(e),
    };

    println!("\n2. Template");
    let template = &config.vault.template;
    if template.is_file() {
        pass(format!("{} found", template.display()));
    } else {
        return fail(format!("{} not found", template.display()));
    }

    println!("\n3. Vault directory");
    if vault_path.is_dir() {
        pass("Vault directory accessible");
    } else {
        println!("   {} Vault directory missing, creating...", "!".yellow());
        if let Err(e) = Vault::new(vault_path).ensure_exists() {
            return fail(e);
        }
        pass("Vault directory created");
    }

    println!("\n4. Queue file");
    let queue = context::queue(config);
    if queue.path().is_file() {
        pass(format!("{} found", queue.path().display()));
    } else {
        println!("   {} {} not found, creating...", "!".yellow(), queue.path().display());
        if let Err(e) = queue.write(&[]) {
            return fail(e);
        }
        pass(format!("{} created", queue.path().display()));
    }

    println!("\n{}", "Setup looks good!".green().bold());
    println!("\nYou can now run:");
    println!("  delve research \"Your Topic\"");
    println!("  delve pop");
    Ok(true)
}

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing::debug;

use delve_cli::{
    cli::{Cli, Commands},
    commands, logging,
};
use delve_config::{ConfigOverrides, DelveConfig};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // .env values never override variables already set in the environment
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    logging::init(cli.level_filter());

    let overrides = ConfigOverrides {
        vault_path: cli.vault,
        queue_path: cli.queue,
    };
    let config = DelveConfig::load(cli.config, overrides)?;
    debug!("Effective config: {:?}", config.vault);

    let succeeded = match cli.command {
        Commands::Research { topic } => commands::research::execute(&config, &topic.join(" ")).await?,
        Commands::Pop(args) => commands::pop::execute(&config, args).await?,
        Commands::Queue(cmd) => commands::queue::execute(&config, cmd)?,
        Commands::Doctor => commands::doctor::execute(&config)?,
        Commands::Config(cmd) => commands::config::execute(&config, cmd)?,
    };

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

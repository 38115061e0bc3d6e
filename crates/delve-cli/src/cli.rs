use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

/// Log level options for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    Off,
    /// Error messages only
    Error,
    /// Warnings and errors (default)
    Warn,
    /// Informational messages
    Info,
    /// Debug messages
    Debug,
    /// Trace-level messages (most verbose)
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Parser)]
#[command(name = "delve")]
#[command(about = "delve - research topics into a cross-linked markdown vault")]
#[command(version)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Set log level (off, error, warn, info, debug, trace). RUST_LOG wins when set
    #[arg(short = 'l', long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Enable verbose logging (shortcut for --log-level=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (defaults to ~/.config/delve/config.toml)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Vault directory (overrides PATH_TO_SAVE and the config file)
    #[arg(long, global = true)]
    pub vault: Option<PathBuf>,

    /// Queue file (overrides DELVE_QUEUE_FILE and the config file)
    #[arg(long, global = true)]
    pub queue: Option<PathBuf>,
}

impl Cli {
    /// Effective log level: `--log-level`, then `--verbose`, then warn
    pub fn level_filter(&self) -> LevelFilter {
        match (self.log_level, self.verbose) {
            (Some(level), _) => level.into(),
            (None, true) => LevelFilter::DEBUG,
            (None, false) => LevelFilter::WARN,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Research a topic and write its note
    Research {
        /// Topic to research
        #[arg(required = true, num_args = 1.., value_name = "TOPIC")]
        topic: Vec<String>,
    },

    /// Process queued topics, or inspect the queue
    Pop(PopArgs),

    /// Queue maintenance
    #[command(subcommand)]
    Queue(QueueCommands),

    /// Check that delve is ready to run
    Doctor,

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Args, Debug)]
#[command(group = clap::ArgGroup::new("mode").args(["count", "list", "clear", "check"]))]
pub struct PopArgs {
    /// Number of entries to process (default 1)
    #[arg(value_name = "COUNT")]
    pub count: Option<String>,

    /// List queued topics
    #[arg(long)]
    pub list: bool,

    /// Remove every queued topic
    #[arg(long)]
    pub clear: bool,

    /// Report whether a note for TOPIC already exists
    #[arg(long, value_name = "TOPIC")]
    pub check: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum QueueCommands {
    /// Check that every queued topic maps to the file name its note will get
    Verify,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration (API key redacted)
    Show,

    /// Write an example config file
    Init {
        /// Path for the config file (defaults to ~/.config/delve/config.toml)
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(short = 'F', long)]
        force: bool,
    },
}

//! Tracing subscriber setup

use tracing_subscriber::filter::{EnvFilter, LevelFilter};

/// Install a stderr subscriber. `RUST_LOG` takes precedence over `level`.
pub fn init(level: LevelFilter) {
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

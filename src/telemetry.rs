use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, EnvFilter, Registry};

use crate::config::{Config, RunMode};

/// Installs the global `tracing` subscriber.
///
/// Production emits bunyan JSON lines on stdout, development emits the
/// human-readable `fmt` output. `RUST_LOG` overrides the default `INFO`
/// filter. Records from the `log` facade (actix's `Logger` middleware) are
/// forwarded into the same subscriber.
pub fn init(config: &Config) -> Result<(), TryInitError> {
    let app_name = env!("CARGO_PKG_NAME").to_string();
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("INFO"));

    let (bunyan, pretty) = match config.run_mode {
        RunMode::Production => (
            Some(BunyanFormattingLayer::new(app_name, std::io::stdout)),
            None,
        ),
        RunMode::Development => (None, Some(fmt::layer().with_target(false))),
    };

    Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(bunyan)
        .with(pretty)
        .try_init()
}

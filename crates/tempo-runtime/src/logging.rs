//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

use crate::{LogConfig, LogFormat};

/// Install the global subscriber, writing to stderr
///
/// `RUST_LOG` wins over the configured filter. Returns `false` if a
/// subscriber was already installed.
pub fn init_tracing(config: &LogConfig) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let installed = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };
    installed.is_ok()
}

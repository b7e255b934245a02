//! Log subscriber setup
//!
//! `RUST_LOG` wins over the verbosity flags when it is set.

use tracing_subscriber::EnvFilter;

use crate::commands::LogFormat;
use crate::config::Verbosity;

/// Builds the filter for a verbosity level, honouring `RUST_LOG`
#[must_use]
pub fn env_filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity.default_filter()))
}

/// Installs the global subscriber writing to stderr
///
/// Does nothing if a subscriber is already installed.
pub fn init_logging(verbosity: Verbosity, format: LogFormat) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbosity))
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}

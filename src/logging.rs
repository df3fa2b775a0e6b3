//! Stderr logging for the command-line tool.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install a stderr subscriber. `-v` flags win over `RUST_LOG`;
/// without either, only warnings are shown.
pub fn init_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| return EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    // stdout carries results, so logs stay on stderr.
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .init();
}

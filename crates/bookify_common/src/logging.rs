//! Logging utilities for the Bookify client.
//!
//! Every binary and test that wants log output goes through `init` /
//! `init_with_level` so the subscriber is configured the same way everywhere.

use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber with the default log level (INFO).
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific log level.
///
/// The `RUST_LOG` environment variable still takes precedence for targets it
/// names; `level` only sets the floor for the `bookify` crates.
pub fn init_with_level(level: Level) {
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("bookify={}", level).parse().unwrap());

    // Use try_init so repeated calls (e.g. from tests) are harmless.
    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}

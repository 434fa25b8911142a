//! Diagnostics for the `sixpack` binary.
//!
//! Log lines go to stderr in compact form; stdout is reserved for the
//! dashboard, day listings and prompts.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the subscriber for a normal `sixpack` run
///
/// Only warnings and errors are shown, e.g. a skipped out-of-range day in the
/// store. `RUST_LOG` takes precedence when set.
pub fn init() {
    init_with_level("warn")
}

/// Install the subscriber with `level` as the fallback filter
///
/// `sixpack --verbose` passes `debug`, which also prints store loads, saves
/// and lock acquisition. A `RUST_LOG` directive wins over `level`.
pub fn init_with_level(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

/// Route logs through the test harness so they show only for failing tests
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}

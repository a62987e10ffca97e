//! Diagnostics setup for the `majiang` binary.
//!
//! The engine emits `tracing` events (hand start/end at `info`, every state
//! transition and claim at `debug`). The CLI routes them to stderr so they
//! never mix with command output on stdout.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "warn";

/// Initialize logging for the application.
///
/// Honours `RUST_LOG` (e.g. `RUST_LOG=majiang_engine=debug`). Calling it a
/// second time is a no-op.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}

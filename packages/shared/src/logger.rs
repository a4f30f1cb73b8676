//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence. Without it, `default_level` applies to the
/// calling binary and its workspace crates, and `warn` to everything else.
pub fn setup_logger(bin_name: &str, default_level: &str) {
    let crate_name = bin_name.replace('-', "_");
    let default_directive = [
        crate_name.as_str(),
        "kanban_realtime_server",
        "kanban_realtime_client",
        "tower_http",
    ]
    .iter()
    .fold("warn".to_string(), |directive, target| {
        format!("{directive},{target}={default_level}")
    });

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    // try_init: integration tests may initialize more than once per process
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init();
}

// src/utils/logging.rs
use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` always wins. Without it the pipeline logs at `info`, or at
/// `debug` for this crate when the run was started with `--debug`.
pub fn setup_logging(debug_mode: bool) {
    let fallback = if debug_mode { "info,meeting_notes=debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(fallback));

    // A second init (e.g. from tests) is harmless, so ignore the error.
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();

    tracing::debug!(debug_mode, "Logging setup complete.");
}

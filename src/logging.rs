//! Developer diagnostics through `tracing`.
//!
//! User-facing output (prompts, progress, command output) goes straight to
//! the terminal. Tracing events are for debugging and are silent unless
//! `RUST_LOG` asks for them.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber.
///
/// Reads `RUST_LOG`, defaulting to `warn`. Writes compact lines to stderr.
///
/// ```bash
/// RUST_LOG=gai=debug gai agent "clean up my branches"
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}

//! Tracing setup
//!
//! The codec logs through `tracing` macros only; the binary installs the
//! subscriber. Library users bring their own.

/// Initialize tracing for the command-line tool
///
/// Call early in main() before any logging occurs.
/// Set `verbose` to true for debug-level output.
/// Calling it more than once is harmless.
pub fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = if verbose { "debug" } else { "warn" };

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_file(false)
                .compact(),
        )
        .with(tracing_subscriber::EnvFilter::new(level))
        .try_init();
}

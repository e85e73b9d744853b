//! Logging and tracing configuration for digarch-extents
//!
//! Structured logging uses the `tracing` crate. Review notices for the
//! processing archivist are emitted under the `archivist_review` target
//! (see [`crate::review`]), progress under the crate's own targets.
//!
//! # Environment Variable Control
//!
//! Set `RUST_LOG` to override the verbosity flag:
//! ```bash
//! RUST_LOG=debug digarch-extents ftk -f Report.xml -o out/
//! RUST_LOG=archivist_review=warn digarch-extents hdd -d M12345 -o out/
//! RUST_LOG=digarch_extents::ftk=trace digarch-extents ftk -f Report.xml -o out/
//! ```

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default filter directive for a `-v` count
///
/// Review notices are warnings, so they stay visible at verbosity 0.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn,digarch_extents=info",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize the logging/tracing system
///
/// Call this once at startup (in main.rs)
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)      // Show module path or review target
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_writer(std::io::stderr)
                .compact(),
        );

    // Ignore error if a subscriber is already set
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Check if debug logging is enabled
/// Can be used to skip expensive debug computations
#[inline]
pub fn is_debug_enabled() -> bool {
    tracing::enabled!(Level::DEBUG)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_by_verbosity() {
        assert_eq!(default_directive(0), "warn,digarch_extents=info");
        assert_eq!(default_directive(1), "info");
        assert_eq!(default_directive(2), "debug");
        assert_eq!(default_directive(7), "trace");
    }

    #[test]
    fn test_init() {
        init(2);
        tracing::info!("Test log message");
        tracing::debug!(key = "value", "Structured log");
    }
}

//! Tracing initialization for tests and binaries.
//!
//! Ported directly from `examples/N0YPR-RustyFt8/src/tracing_init.rs`.
//! Provides centralized tracing setup with environment-based filtering.

#[cfg(test)]
use once_cell::sync::Lazy;

/// Initialize tracing for tests with environment-based filtering.
///
/// Uses `RUST_LOG` to control output:
/// - `RUST_LOG=rustyft8=debug` - show all debug output
/// - `RUST_LOG=rustyft8::sync=trace` - trace a specific module
///
/// Call this once at the start of each test that needs tracing. Multiple
/// calls are safe (uses `once_cell`).
#[cfg(test)]
pub fn init_test_tracing() {
    static TRACING: Lazy<()> = Lazy::new(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rustyft8=warn"));

        fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(false)
            .with_line_number(true)
            .with_test_writer()
            .init();
    });

    Lazy::force(&TRACING);
}

/// Initialize tracing for binaries with environment-based filtering.
///
/// Call this early in `main()` to enable tracing throughout the
/// application.
pub fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rustyft8=info"));

    fmt().with_env_filter(filter).with_target(true).with_thread_ids(true).with_line_number(true).init();
}

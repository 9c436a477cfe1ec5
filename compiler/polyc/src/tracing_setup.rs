//! Log output for the `polyc` driver.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the global subscriber.
///
/// Filtering comes from `POLY_LOG`, falling back to `RUST_LOG`; with neither
/// set nothing is installed. Safe to call more than once.
/// Example: `POLY_LOG=poly_resolve=trace polyc run cases.json`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let directives = std::env::var("POLY_LOG").or_else(|_| std::env::var("RUST_LOG"));
        if let Ok(directives) = directives {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .with(EnvFilter::new(directives))
                .init();
        }
    });
}

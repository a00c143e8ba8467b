//! Tracing setup for shells and tests.

use std::sync::Once;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_DIRECTIVE: &str = "petfolio_core=info";

/// Install a global formatting subscriber.
///
/// `RUST_LOG` takes precedence over `default_directive`. Returns `false` when
/// a subscriber was already installed.
pub fn init(default_directive: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}

/// Initializes a test-friendly subscriber once per process.
pub fn init_for_tests() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        // Debug level in debug builds, info in release builds.
        let directive = if cfg!(debug_assertions) {
            "petfolio_core=debug"
        } else {
            DEFAULT_DIRECTIVE
        };

        // Another test binary helper may already have set a subscriber.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(directive))
            .with_test_writer()
            .try_init();
    });
}

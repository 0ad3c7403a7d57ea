// ABOUTME: Test support utilities.
// ABOUTME: Provides a scripted fake engine and tracing setup for integration tests.

use std::sync::Once;

// Each test binary only uses some of these items, so allow dead_code.
#[allow(dead_code)]
pub mod fake_engine;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call multiple times.
#[allow(dead_code)]
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter = EnvFilter::from_default_env()
            .add_directive("dockwire=trace".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

//! Tracing setup for tests.

use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber that writes through the test harness.
///
/// The filter is read from `RUST_LOG`. Safe to call from every test: only
/// the first call installs a subscriber, later calls are no-ops.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

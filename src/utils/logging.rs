//! Logging utilities
//!
//! Provides logging setup and configuration.

use env_logger::Env;

/// Setup logging for the cloud store.
///
/// Honours `RUST_LOG` and falls back to `info`. Calling it again after a
/// logger is installed is a no-op.
pub fn init() {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("info")).try_init();
}

/// Setup logging for tests, captured by the test harness
pub fn init_for_tests() {
    let _ = env_logger::builder().is_test(true).try_init();
}

//! Helpers shared by the crate's in-module tests.

use tracing_subscriber::EnvFilter;

/// Install a tracing subscriber for the current test binary.
///
/// Output honours `RUST_LOG` and goes through the test writer so it stays
/// attached to the owning test. Installation races between parallel tests
/// are harmless; the first caller wins.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

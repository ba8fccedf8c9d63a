//! Shared helpers for integration tests.

use tracing_subscriber::EnvFilter;

/// Installs a test-writer subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mailkit_mime=debug,mailkit_codec=debug".into()),
        )
        .with_test_writer()
        .try_init();
}

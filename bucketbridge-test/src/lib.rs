//! Test utilities for bucketbridge
//!
//! - [`RecordingClient`]: a client double that journals every remote call
//! - [`LiveMinio`]: opt-in access to a real MinIO for end-to-end tests
//! - [`init_tracing`]: log output for test runs
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bucketbridge_test::RecordingClient;
//! use std::sync::Arc;
//!
//! # async fn run() {
//! let recorder = Arc::new(RecordingClient::ephemeral());
//! // hand `recorder.clone()` to the code under test, then:
//! assert!(recorder.calls().is_empty());
//! # }
//! ```

pub mod live;
pub mod recording;

pub use live::LiveMinio;
pub use recording::{ClientCall, RecordingClient};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Timeout for waiting on a live store
pub const STARTUP_TIMEOUT_SECS: u64 = 30;

/// Install a fmt subscriber writing through the test harness. Safe to call
/// from every test; only the first call installs anything.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bucketbridge=debug,bucketbridge_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}

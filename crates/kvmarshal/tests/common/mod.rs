//! Shared fixtures for integration tests.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::sync::Once;

use kvmarshal::{BackendError, Context, Kv, MapKv, Value};
use parking_lot::Mutex;

static TRACING_INIT: Once = Once::new();

/// Route decoder logs to the test output.
///
/// Enable with `RUST_LOG=kvmarshal=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_test_writer().with_target(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}

/// Wraps a [`MapKv`], recording every key looked up.
///
/// Keys listed in `failing` return a backend error instead of a value.
#[derive(Default)]
pub struct RecordingKv {
    inner: MapKv,
    failing: Vec<String>,
    calls: Mutex<Vec<String>>,
}

impl RecordingKv {
    pub fn new(inner: MapKv) -> Self {
        Self {
            inner,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn failing_on(mut self, key: &str) -> Self {
        self.failing.push(key.to_owned());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

impl Kv for RecordingKv {
    fn get(&self, ctx: &Context, key: &str) -> Result<Value, BackendError> {
        self.calls.lock().push(key.to_owned());
        if self.failing.iter().any(|k| k == key) {
            return Err(BackendError::other(format!("connection reset reading {key}")));
        }
        self.inner.get(ctx, key)
    }
}

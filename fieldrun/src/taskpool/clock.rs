//! Injectable time source for the pool.
//!
//! The pool's teardown timers run against a [`Clock`] trait so tests can
//! drive them deterministically (tokio's paused virtual time works
//! through [`TokioClock`] unchanged).

use std::future::Future;
use std::pin::Pin;
use std::time::{Duration, Instant};

/// Abstract time source.
pub trait Clock: Send + Sync + 'static {
    /// Returns the current instant.
    fn now(&self) -> Instant;

    /// Returns a future that resolves after `duration`.
    fn after(&self, duration: Duration) -> Pin<Box<dyn Future<Output = ()> + Send>>;
}

/// Production clock backed by `tokio::time`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn after(&self, duration: Duration) -> Pin<Box<dyn Future<Output = ()> + Send>> {
        Box::pin(tokio::time::sleep(duration))
    }
}

//! Tokio-backed clock.

use std::future::Future;
use std::time::Duration;

use acswitch_domain::time::{Timestamp, now};

use crate::ports::Clock;

/// [`Clock`] backed by `tokio::time`.
///
/// Sleeps follow tokio's timer, so tests running with a paused runtime can
/// advance time without waiting.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }

    fn now(&self) -> Timestamp {
        now()
    }
}

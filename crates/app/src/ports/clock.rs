//! Clock port — time source for the auto-toggle loop.

use std::future::Future;
use std::time::Duration;

use acswitch_domain::time::Timestamp;

/// Sleeps and reads wall-clock time.
pub trait Clock: Send + Sync + 'static {
    /// Complete after `duration` has elapsed.
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;

    /// Current wall-clock time, used to stamp toggles.
    fn now(&self) -> Timestamp;
}

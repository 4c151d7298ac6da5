//! Appliance controller — toggling and the background auto-toggle loop.
//!
//! The controller is a cheap, cloneable handle. The chat front end and the
//! background loop each hold one; all driver calls go through a single async
//! mutex so the browser session is only ever used by one caller at a time.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use acswitch_domain::error::{AcSwitchError, AutoToggleError};
use acswitch_domain::status::ApplianceStatus;
use acswitch_domain::switch::SwitchState;

use crate::ports::{Clock, SwitchDriver};

/// Upper bound on how long `stop_auto_toggle` waits for the loop to exit.
pub const STOP_GRACE: Duration = Duration::from_secs(1);

/// Use-case service that owns the switch driver and the auto-toggle loop.
pub struct ApplianceController<D, C> {
    inner: Arc<Inner<D, C>>,
}

struct Inner<D, C> {
    driver: tokio::sync::Mutex<D>,
    clock: C,
    status: Mutex<ApplianceStatus>,
    auto_toggle: Mutex<Option<AutoToggleTask>>,
}

struct AutoToggleTask {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl<D, C> Clone for ApplianceController<D, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<D, C> ApplianceController<D, C>
where
    D: SwitchDriver + Send + 'static,
    C: Clock,
{
    /// Create a controller around an already logged-in driver.
    pub fn new(driver: D, clock: C) -> Self {
        Self {
            inner: Arc::new(Inner {
                driver: tokio::sync::Mutex::new(driver),
                clock,
                status: Mutex::new(ApplianceStatus::default()),
                auto_toggle: Mutex::new(None),
            }),
        }
    }

    /// Click the switch once and accept any confirmation popup.
    ///
    /// The remembered state only flips when the click succeeds. A failure to
    /// dismiss the popup is logged but does not undo the toggle.
    ///
    /// # Errors
    ///
    /// Returns [`AcSwitchError::Driver`] when the click fails. No retry is
    /// attempted.
    pub async fn toggle(&self) -> Result<SwitchState, AcSwitchError> {
        let mut driver = self.inner.driver.lock().await;

        if let Err(err) = driver.click_toggle().await {
            tracing::error!(error = %err, "failed to toggle AC");
            return Err(err);
        }

        let state = self.lock_status().record_toggle(self.inner.clock.now());
        tracing::info!(state = %state, "AC toggled");

        match driver.dismiss_popup().await {
            Ok(true) => tracing::info!("popup accepted"),
            Ok(false) => tracing::debug!("no popup appeared"),
            Err(err) => tracing::warn!(error = %err, "failed to dismiss popup"),
        }

        Ok(state)
    }

    /// Start toggling the switch every `interval_secs` seconds in the background.
    ///
    /// The first tick is skipped, so the first toggle happens one full
    /// interval after the call.
    ///
    /// # Errors
    ///
    /// Returns [`AutoToggleError::AlreadyActive`] if a loop is already running.
    pub fn start_auto_toggle(&self, interval_secs: u64) -> Result<(), AcSwitchError> {
        let mut slot = lock(&self.inner.auto_toggle);
        if slot.is_some() {
            tracing::warn!("auto-toggle is already active");
            return Err(AutoToggleError::AlreadyActive.into());
        }

        {
            let mut status = self.lock_status();
            status.auto_toggle_active = true;
            status.auto_toggle_interval_secs = interval_secs;
        }

        let cancel = CancellationToken::new();
        let handle = tokio::spawn(auto_toggle_loop(
            self.clone(),
            Duration::from_secs(interval_secs),
            cancel.clone(),
        ));
        *slot = Some(AutoToggleTask { cancel, handle });

        tracing::info!(interval_secs, "auto-toggle started");
        Ok(())
    }

    /// Stop the background loop and wait up to [`STOP_GRACE`] for it to exit.
    ///
    /// # Errors
    ///
    /// Returns [`AutoToggleError::NotActive`] if no loop is running.
    pub async fn stop_auto_toggle(&self) -> Result<(), AcSwitchError> {
        let Some(task) = lock(&self.inner.auto_toggle).take() else {
            tracing::warn!("auto-toggle is not active");
            return Err(AutoToggleError::NotActive.into());
        };

        self.lock_status().auto_toggle_active = false;
        task.cancel.cancel();

        if tokio::time::timeout(STOP_GRACE, task.handle).await.is_err() {
            tracing::warn!(
                grace_secs = STOP_GRACE.as_secs(),
                "auto-toggle loop still busy after stop, leaving it to finish"
            );
        }

        tracing::info!("auto-toggle stopped");
        Ok(())
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn status(&self) -> ApplianceStatus {
        self.lock_status().clone()
    }

    /// Best-effort cleanup before the process exits.
    ///
    /// Stops the loop, turns the appliance off if it is on, then releases the
    /// driver session. Every step runs even when an earlier one fails.
    pub async fn shutdown(&self) {
        tracing::info!("shutting down appliance controller");

        if self.status().auto_toggle_active {
            if let Err(err) = self.stop_auto_toggle().await {
                tracing::warn!(error = %err, "failed to stop auto-toggle during shutdown");
            }
        }

        if self.status().is_on() {
            tracing::info!("turning off AC before exit");
            if let Err(err) = self.toggle().await {
                tracing::error!(error = %err, "failed to turn off AC during shutdown");
            }
        }

        match self.inner.driver.lock().await.quit().await {
            Ok(()) => tracing::info!("switch driver closed"),
            Err(err) => tracing::error!(error = %err, "failed to close switch driver"),
        }
    }

    fn lock_status(&self) -> MutexGuard<'_, ApplianceStatus> {
        lock(&self.inner.status)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

async fn auto_toggle_loop<D, C>(
    controller: ApplianceController<D, C>,
    interval: Duration,
    cancel: CancellationToken,
) where
    D: SwitchDriver + Send + 'static,
    C: Clock,
{
    tracing::info!("auto-toggle loop started");
    let mut iteration: u64 = 0;

    loop {
        if iteration > 0 {
            match controller.toggle().await {
                Ok(state) => tracing::info!(iteration, state = %state, "auto-toggle tick"),
                Err(err) => tracing::error!(iteration, error = %err, "auto-toggle tick failed"),
            }
        }

        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            () = controller.inner.clock.sleep(interval) => {}
        }
        iteration += 1;
    }

    tracing::info!(iterations = iteration, "auto-toggle loop ended");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::TokioClock;
    use std::future::Future;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    // ── Recording driver ───────────────────────────────────────────

    #[derive(Default)]
    struct Calls {
        clicks: AtomicUsize,
        popups: AtomicUsize,
        quits: AtomicUsize,
        fail_clicks: AtomicBool,
        fail_quit: AtomicBool,
    }

    struct RecordingDriver {
        calls: Arc<Calls>,
        popup_present: bool,
    }

    impl SwitchDriver for RecordingDriver {
        fn click_toggle(&mut self) -> impl Future<Output = Result<(), AcSwitchError>> + Send {
            let result = if self.calls.fail_clicks.load(Ordering::SeqCst) {
                Err(AcSwitchError::Driver("element not clickable".into()))
            } else {
                self.calls.clicks.fetch_add(1, Ordering::SeqCst);
                Ok(())
            };
            async { result }
        }

        fn dismiss_popup(&mut self) -> impl Future<Output = Result<bool, AcSwitchError>> + Send {
            self.calls.popups.fetch_add(1, Ordering::SeqCst);
            let present = self.popup_present;
            async move { Ok(present) }
        }

        fn quit(&mut self) -> impl Future<Output = Result<(), AcSwitchError>> + Send {
            self.calls.quits.fetch_add(1, Ordering::SeqCst);
            let result = if self.calls.fail_quit.load(Ordering::SeqCst) {
                Err(AcSwitchError::Driver("session lost".into()))
            } else {
                Ok(())
            };
            async { result }
        }
    }

    fn controller() -> (ApplianceController<RecordingDriver, TokioClock>, Arc<Calls>) {
        let calls = Arc::new(Calls::default());
        let driver = RecordingDriver {
            calls: Arc::clone(&calls),
            popup_present: false,
        };
        (ApplianceController::new(driver, TokioClock), calls)
    }

    // ── Status ─────────────────────────────────────────────────────

    #[tokio::test]
    async fn should_report_off_and_inactive_after_construction() {
        let (controller, _) = controller();
        let status = controller.status();
        assert!(!status.is_on());
        assert!(!status.auto_toggle_active);
        assert_eq!(status.auto_toggle_interval_secs, 600);
    }

    // ── Toggle ─────────────────────────────────────────────────────

    #[tokio::test]
    async fn should_flip_state_on_successive_toggles() {
        let (controller, calls) = controller();

        assert_eq!(controller.toggle().await.unwrap(), SwitchState::On);
        assert!(controller.status().is_on());

        assert_eq!(controller.toggle().await.unwrap(), SwitchState::Off);
        assert!(!controller.status().is_on());

        assert_eq!(calls.clicks.load(Ordering::SeqCst), 2);
        assert_eq!(controller.status().toggle_count, 2);
        assert!(controller.status().last_toggled.is_some());
    }

    #[tokio::test]
    async fn should_check_for_popup_after_each_click() {
        let calls = Arc::new(Calls::default());
        let driver = RecordingDriver {
            calls: Arc::clone(&calls),
            popup_present: true,
        };
        let controller = ApplianceController::new(driver, TokioClock);

        controller.toggle().await.unwrap();
        assert_eq!(calls.popups.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn should_keep_state_when_click_fails() {
        let (controller, calls) = controller();
        calls.fail_clicks.store(true, Ordering::SeqCst);

        let result = controller.toggle().await;
        assert!(matches!(result, Err(AcSwitchError::Driver(_))));
        assert!(!controller.status().is_on());
        assert_eq!(controller.status().toggle_count, 0);
        assert_eq!(calls.popups.load(Ordering::SeqCst), 0);
    }

    // ── Start / stop ───────────────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn should_reject_second_start() {
        let (controller, _) = controller();
        controller.start_auto_toggle(60).unwrap();

        let result = controller.start_auto_toggle(60);
        assert!(matches!(
            result,
            Err(AcSwitchError::AutoToggle(AutoToggleError::AlreadyActive))
        ));

        controller.stop_auto_toggle().await.unwrap();
    }

    #[tokio::test]
    async fn should_reject_stop_when_not_active() {
        let (controller, _) = controller();
        let result = controller.stop_auto_toggle().await;
        assert!(matches!(
            result,
            Err(AcSwitchError::AutoToggle(AutoToggleError::NotActive))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn should_record_interval_and_active_flag() {
        let (controller, _) = controller();
        controller.start_auto_toggle(120).unwrap();

        let status = controller.status();
        assert!(status.auto_toggle_active);
        assert_eq!(status.auto_toggle_interval_secs, 120);

        controller.stop_auto_toggle().await.unwrap();
        let status = controller.status();
        assert!(!status.auto_toggle_active);
        assert_eq!(status.auto_toggle_interval_secs, 120);
    }

    #[tokio::test(start_paused = true)]
    async fn should_skip_first_tick() {
        let (controller, calls) = controller();
        controller.start_auto_toggle(2).unwrap();

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(calls.clicks.load(Ordering::SeqCst), 0);

        controller.stop_auto_toggle().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn should_not_toggle_when_stopped_before_first_interval() {
        let (controller, calls) = controller();
        controller.start_auto_toggle(2).unwrap();

        tokio::time::sleep(Duration::from_millis(500)).await;
        controller.stop_auto_toggle().await.unwrap();

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(calls.clicks.load(Ordering::SeqCst), 0);
        assert!(!controller.status().is_on());
    }

    #[tokio::test(start_paused = true)]
    async fn should_toggle_once_per_interval() {
        let (controller, calls) = controller();
        controller.start_auto_toggle(60).unwrap();

        tokio::time::sleep(Duration::from_secs(60 * 3 + 30)).await;
        assert_eq!(calls.clicks.load(Ordering::SeqCst), 3);
        assert!(controller.status().is_on());

        controller.stop_auto_toggle().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn should_keep_looping_after_driver_failure() {
        let (controller, calls) = controller();
        calls.fail_clicks.store(true, Ordering::SeqCst);
        controller.start_auto_toggle(60).unwrap();

        tokio::time::sleep(Duration::from_secs(90)).await;
        assert_eq!(controller.status().toggle_count, 0);

        calls.fail_clicks.store(false, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(controller.status().toggle_count, 1);

        controller.stop_auto_toggle().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn should_allow_restart_after_stop() {
        let (controller, _) = controller();
        controller.start_auto_toggle(60).unwrap();
        controller.stop_auto_toggle().await.unwrap();

        assert!(controller.start_auto_toggle(30).is_ok());
        assert_eq!(controller.status().auto_toggle_interval_secs, 30);
        controller.stop_auto_toggle().await.unwrap();
    }

    // ── Shutdown ───────────────────────────────────────────────────

    #[tokio::test]
    async fn should_turn_off_and_quit_on_shutdown() {
        let (controller, calls) = controller();
        controller.toggle().await.unwrap();
        assert!(controller.status().is_on());

        controller.shutdown().await;

        assert!(!controller.status().is_on());
        assert_eq!(calls.clicks.load(Ordering::SeqCst), 2);
        assert_eq!(calls.quits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn should_stop_loop_on_shutdown() {
        let (controller, calls) = controller();
        controller.start_auto_toggle(60).unwrap();

        controller.shutdown().await;

        assert!(!controller.status().auto_toggle_active);
        assert_eq!(calls.quits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn should_quit_even_when_turning_off_fails() {
        let (controller, calls) = controller();
        controller.toggle().await.unwrap();
        calls.fail_clicks.store(true, Ordering::SeqCst);

        controller.shutdown().await;

        assert!(controller.status().is_on());
        assert_eq!(calls.quits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn should_not_toggle_on_shutdown_when_already_off() {
        let (controller, calls) = controller();
        calls.fail_quit.store(true, Ordering::SeqCst);

        controller.shutdown().await;

        assert_eq!(calls.clicks.load(Ordering::SeqCst), 0);
        assert_eq!(calls.quits.load(Ordering::SeqCst), 1);
    }
}

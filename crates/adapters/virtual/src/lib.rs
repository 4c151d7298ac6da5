//! # acswitch-adapter-virtual
//!
//! Simulated control page implementing the `SwitchDriver` port.
//!
//! ## Behaviour
//!
//! | Call | Effect |
//! |------|--------|
//! | `click_toggle` | Flips the simulated switch; raises a popup when popups are enabled |
//! | `dismiss_popup` | Accepts the pending popup, `false` if none |
//! | `quit` | Closes the session; later clicks fail |
//!
//! Clones share the same simulated page, so a test can keep a clone to
//! observe what the controller did.
//!
//! ## Dependency rule
//!
//! Depends on `acswitch-app` (port traits) and `acswitch-domain` only.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use acswitch_app::ports::SwitchDriver;
use acswitch_domain::error::AcSwitchError;
use acswitch_domain::switch::SwitchState;

/// Errors raised by the simulated page.
#[derive(Debug, thiserror::Error)]
pub enum VirtualSwitchError {
    #[error("virtual session is closed")]
    SessionClosed,

    #[error("virtual switch is unavailable")]
    Unavailable,
}

impl From<VirtualSwitchError> for AcSwitchError {
    fn from(err: VirtualSwitchError) -> Self {
        Self::Driver(Box::new(err))
    }
}

#[derive(Debug, Default)]
struct Page {
    state: SwitchState,
    clicks: u64,
    popups_enabled: bool,
    pending_popup: bool,
    unavailable: bool,
    closed: bool,
}

/// A simulated toggle page.
#[derive(Debug, Clone, Default)]
pub struct VirtualSwitchDriver {
    page: Arc<Mutex<Page>>,
}

impl VirtualSwitchDriver {
    /// Raise a confirmation popup after every click.
    #[must_use]
    pub fn with_popups(self) -> Self {
        self.lock().popups_enabled = true;
        self
    }

    /// Make subsequent clicks fail, as if the control disappeared.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.lock().unavailable = unavailable;
    }

    #[must_use]
    pub fn state(&self) -> SwitchState {
        self.lock().state
    }

    /// Number of successful clicks.
    #[must_use]
    pub fn clicks(&self) -> u64 {
        self.lock().clicks
    }

    #[must_use]
    pub fn has_pending_popup(&self) -> bool {
        self.lock().pending_popup
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    fn click(&self) -> Result<(), VirtualSwitchError> {
        let mut page = self.lock();
        if page.closed {
            return Err(VirtualSwitchError::SessionClosed);
        }
        if page.unavailable {
            return Err(VirtualSwitchError::Unavailable);
        }
        page.state = page.state.toggled();
        page.clicks += 1;
        page.pending_popup = page.popups_enabled;
        tracing::debug!(state = %page.state, "virtual switch clicked");
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, Page> {
        self.page.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SwitchDriver for VirtualSwitchDriver {
    fn click_toggle(&mut self) -> impl Future<Output = Result<(), AcSwitchError>> + Send {
        let result = self.click().map_err(AcSwitchError::from);
        async { result }
    }

    fn dismiss_popup(&mut self) -> impl Future<Output = Result<bool, AcSwitchError>> + Send {
        let accepted = std::mem::take(&mut self.lock().pending_popup);
        async move { Ok(accepted) }
    }

    fn quit(&mut self) -> impl Future<Output = Result<(), AcSwitchError>> + Send {
        self.lock().closed = true;
        tracing::info!("virtual session closed");
        async { Ok(()) }
    }
}

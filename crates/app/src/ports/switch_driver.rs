//! Switch driver port — the browser session that operates the control page.
//!
//! Implementations are black boxes from the application's point of view: they
//! know the page, the selector and how to wait for it. Login happens while the
//! adapter is constructed, before it is handed to the controller.

use std::future::Future;

use acswitch_domain::error::AcSwitchError;

/// Drives the on/off control of the appliance.
///
/// Methods take `&mut self`: the controller serialises every call, so a
/// manual toggle and an auto-toggle tick never share the session.
pub trait SwitchDriver {
    /// Wait for the toggle control to be clickable and click it once.
    fn click_toggle(&mut self) -> impl Future<Output = Result<(), AcSwitchError>> + Send;

    /// Accept a confirmation dialog if one is showing.
    ///
    /// Returns `false` when no dialog was present, which is not an error.
    fn dismiss_popup(&mut self) -> impl Future<Output = Result<bool, AcSwitchError>> + Send;

    /// Release the browser session. Calling it again is a no-op.
    fn quit(&mut self) -> impl Future<Output = Result<(), AcSwitchError>> + Send;
}

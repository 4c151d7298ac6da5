//! Appliance status snapshot reported by `/status`.

use serde::Serialize;

use crate::switch::SwitchState;
use crate::time::Timestamp;

/// Auto-toggle interval in effect before the loop has ever been started.
pub const INITIAL_INTERVAL_SECS: u64 = 600;

/// Point-in-time copy of the controller state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplianceStatus {
    pub switch: SwitchState,
    pub auto_toggle_active: bool,
    pub auto_toggle_interval_secs: u64,
    /// Successful toggles since start-up, manual and automatic.
    pub toggle_count: u64,
    pub last_toggled: Option<Timestamp>,
}

impl ApplianceStatus {
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.switch.is_on()
    }

    /// Record one successful toggle at `at`.
    pub fn record_toggle(&mut self, at: Timestamp) -> SwitchState {
        self.switch = self.switch.toggled();
        self.toggle_count += 1;
        self.last_toggled = Some(at);
        self.switch
    }
}

impl Default for ApplianceStatus {
    fn default() -> Self {
        Self {
            switch: SwitchState::Off,
            auto_toggle_active: false,
            auto_toggle_interval_secs: INITIAL_INTERVAL_SECS,
            toggle_count: 0,
            last_toggled: None,
        }
    }
}

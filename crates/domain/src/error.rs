//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`AcSwitchError`] via `#[from]` or an explicit `From` impl.

use crate::interval::IntervalError;

/// Boxed source error coming from an adapter (browser session, chat API, …).
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Top-level error shared by the application layer and its adapters.
#[derive(Debug, thiserror::Error)]
pub enum AcSwitchError {
    /// User input failed validation.
    #[error("validation error: {0}")]
    Validation(#[from] IntervalError),

    /// The auto-toggle loop was asked to do something its state forbids.
    #[error("{0}")]
    AutoToggle(#[from] AutoToggleError),

    /// The browser-automation session failed (element missing, session lost, …).
    #[error("switch driver error: {0}")]
    Driver(#[source] BoxedError),

    /// The chat transport failed to fetch or deliver messages.
    #[error("chat transport error: {0}")]
    Transport(#[source] BoxedError),
}

/// Misuse of the start/stop pair on the auto-toggle loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AutoToggleError {
    /// `start` was called while a loop is already running.
    #[error("auto-toggle is already active")]
    AlreadyActive,

    /// `stop` was called while no loop is running.
    #[error("auto-toggle is not active")]
    NotActive,
}

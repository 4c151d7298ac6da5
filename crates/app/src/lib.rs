//! # acswitch-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `SwitchDriver` — click the toggle control, dismiss popups, release the session
//!   - `ChatTransport` — fetch incoming chat messages, send replies
//!   - `Clock` — sleep and read the time, so loop timing is testable
//! - Define **driving/inbound** use-cases:
//!   - `ApplianceController` — toggle, start/stop the auto-toggle loop, status, shutdown
//!   - `CommandFront` — translate chat commands into controller calls and reply text
//!
//! ## Dependency rule
//! Depends on `acswitch-domain` only (plus `tokio` for tasks and timers).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod clock;
pub mod ports;
pub mod services;

//! Command front — turns chat commands into controller calls and reply text.
//!
//! Holds no state of its own beyond the controller handle. Every command maps
//! to at most one controller call.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use acswitch_domain::command::Command;
use acswitch_domain::error::{AcSwitchError, AutoToggleError};
use acswitch_domain::interval::{Interval, IntervalError};
use acswitch_domain::status::ApplianceStatus;
use acswitch_domain::switch::SwitchState;
use acswitch_domain::time;

use crate::ports::{ChatTransport, Clock, IncomingMessage, SwitchDriver};
use crate::services::appliance_controller::ApplianceController;

/// Pause before polling again after the transport fails.
pub const TRANSPORT_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Reply to `/start` and `/help`.
pub const HELP_TEXT: &str = "🏠 AC Controller Bot\n\n\
    Available commands:\n\
    /status - Check AC status\n\
    /toggle - Toggle AC manually\n\
    /auto_start [minutes] - Start auto-toggle (default 10 min)\n\
    /auto_stop - Stop auto-toggle\n\
    /help - Show this help message";

/// Chat-facing translation layer over an [`ApplianceController`].
pub struct CommandFront<D, C> {
    controller: ApplianceController<D, C>,
    bot_username: Option<String>,
}

impl<D, C> CommandFront<D, C>
where
    D: SwitchDriver + Send + 'static,
    C: Clock,
{
    pub fn new(controller: ApplianceController<D, C>) -> Self {
        Self {
            controller,
            bot_username: None,
        }
    }

    /// Only answer `/cmd@name` mentions of this bot; unset accepts any mention.
    #[must_use]
    pub fn with_bot_username(mut self, username: impl Into<String>) -> Self {
        self.bot_username = Some(username.into());
        self
    }

    /// Handle one incoming message, returning the reply if it was a command.
    pub async fn handle_message(&self, message: &IncomingMessage) -> Option<String> {
        let command = Command::parse_for(&message.text, self.bot_username.as_deref())?;
        tracing::info!(
            command = command.name(),
            user_id = message.user_id,
            chat_id = message.chat_id,
            "command received"
        );
        Some(self.handle(command).await)
    }

    /// Execute a parsed command and render the reply.
    pub async fn handle(&self, command: Command) -> String {
        match command {
            Command::Start | Command::Help => HELP_TEXT.to_string(),
            Command::Status => {
                let status = self.controller.status();
                tracing::info!(
                    ac_on = status.is_on(),
                    auto_toggle_active = status.auto_toggle_active,
                    "status requested"
                );
                render_status(&status)
            }
            Command::Toggle => match self.controller.toggle().await {
                Ok(state) => format!(
                    "✅ AC toggled successfully!\nAC is now: {}",
                    state_label(state)
                ),
                Err(_) => "❌ Failed to toggle AC".to_string(),
            },
            Command::AutoStart(arg) => self.auto_start(arg.as_deref()),
            Command::AutoStop => match self.controller.stop_auto_toggle().await {
                Ok(()) => "⏹️ Auto-toggle stopped".to_string(),
                Err(_) => "❌ Auto-toggle is not active".to_string(),
            },
        }
    }

    fn auto_start(&self, arg: Option<&str>) -> String {
        let interval = match Interval::parse_or_default(arg) {
            Ok(interval) => interval,
            Err(err) => {
                tracing::warn!(error = %err, "invalid auto-toggle interval");
                return match err {
                    IntervalError::TooShort(_) => "❌ Interval must be at least 1 minute",
                    IntervalError::NotANumber(_) => "❌ Please provide a valid number of minutes",
                }
                .to_string();
            }
        };

        match self.controller.start_auto_toggle(interval.as_secs()) {
            Ok(()) => format!("🔄 Auto-toggle started!\n⏱️ Interval: {interval}"),
            Err(AcSwitchError::AutoToggle(AutoToggleError::AlreadyActive)) => {
                "❌ Auto-toggle is already active".to_string()
            }
            Err(err) => format!("❌ Failed to start auto-toggle: {err}"),
        }
    }

    /// Serve commands from `transport` until `shutdown` is cancelled.
    ///
    /// Messages are handled one at a time. Transport failures are logged and
    /// polling resumes after [`TRANSPORT_RETRY_DELAY`].
    pub async fn run<T: ChatTransport>(&self, transport: &mut T, shutdown: CancellationToken) {
        tracing::info!("command front started");

        loop {
            let batch = tokio::select! {
                biased;
                () = shutdown.cancelled() => break,
                batch = transport.next_messages() => batch,
            };

            match batch {
                Ok(messages) => {
                    for message in messages {
                        let Some(reply) = self.handle_message(&message).await else {
                            continue;
                        };
                        if let Err(err) = transport.reply(message.chat_id, &reply).await {
                            tracing::warn!(
                                chat_id = message.chat_id,
                                error = %err,
                                "failed to send reply"
                            );
                        }
                    }
                }
                Err(err) => {
                    tracing::error!(error = %err, "failed to fetch messages");
                    tokio::select! {
                        biased;
                        () = shutdown.cancelled() => break,
                        () = tokio::time::sleep(TRANSPORT_RETRY_DELAY) => {}
                    }
                }
            }
        }

        tracing::info!("command front stopped");
    }
}

fn state_label(state: SwitchState) -> &'static str {
    match state {
        SwitchState::On => "🟢 ON",
        SwitchState::Off => "🔴 OFF",
    }
}

fn render_status(status: &ApplianceStatus) -> String {
    let auto = if status.auto_toggle_active {
        "🔄 ACTIVE"
    } else {
        "⏹️ STOPPED"
    };
    let mut text = format!(
        "🏠 AC Status: {}\n🤖 Auto-toggle: {auto}\n⏱️ Interval: {} seconds\n🔢 Toggles: {}",
        state_label(status.switch),
        status.auto_toggle_interval_secs,
        status.toggle_count,
    );
    if let Some(ts) = status.last_toggled {
        text.push_str(&format!("\n🕒 Last toggle: {}", time::display_utc(ts)));
    }
    text
}

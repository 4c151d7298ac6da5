//! # acswitchd — AC switch daemon
//!
//! Composition root that wires the switch driver to the chat front end.
//!
//! ## Responsibilities
//! - Load configuration (`config.json`, env vars)
//! - Install logging (daily files, optional console)
//! - Build the switch driver; the WebDriver one waits for a manual login
//! - Construct the `ApplianceController`, optionally starting auto-toggle
//! - Serve chat commands until SIGINT/SIGTERM
//! - Shut the controller down explicitly: stop the loop, switch off, close the browser
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;
mod logging;

use std::process::ExitCode;

use tokio_util::sync::CancellationToken;

use acswitch_adapter_telegram::TelegramTransport;
use acswitch_adapter_virtual::VirtualSwitchDriver;
use acswitch_adapter_webdriver::WebDriverSwitch;
use acswitch_app::clock::TokioClock;
use acswitch_app::ports::{ChatTransport, SwitchDriver};
use acswitch_app::services::appliance_controller::ApplianceController;
use acswitch_app::services::command_front::CommandFront;

use crate::config::{Config, DriverKind};

type BoxError = Box<dyn std::error::Error>;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), BoxError> {
    let config = Config::load(&Config::path_from_env())?;
    let _log_guard = logging::init(&config.logging)?;

    tracing::info!("=== AC Controller Bot starting ===");

    let transport = TelegramTransport::new(&config.bot_token, &config.telegram)?;
    let bot_username = transport.bot_username().await?;
    tracing::info!(bot = bot_username.as_deref().unwrap_or("<unnamed>"), "bot identified");

    match config.driver.kind {
        DriverKind::Webdriver => {
            let driver = WebDriverSwitch::connect(config.driver.webdriver.clone()).await?;
            serve(driver, transport, bot_username, &config).await;
        }
        DriverKind::Virtual => {
            tracing::warn!("using the virtual switch driver, no browser will be opened");
            serve(VirtualSwitchDriver::default(), transport, bot_username, &config).await;
        }
    }

    tracing::info!("=== AC Controller Bot stopped ===");
    Ok(())
}

async fn serve<D, T>(driver: D, mut transport: T, bot_username: Option<String>, config: &Config)
where
    D: SwitchDriver + Send + 'static,
    T: ChatTransport,
{
    let controller = ApplianceController::new(driver, TokioClock);

    if config.auto_start_enabled {
        let interval = config.default_interval();
        tracing::info!(interval_minutes = interval.minutes(), "auto-start enabled");
        if let Err(err) = controller.start_auto_toggle(interval.as_secs()) {
            tracing::warn!(error = %err, "auto-start failed");
        }
    }

    let shutdown = CancellationToken::new();
    tokio::spawn(wait_for_signal(shutdown.clone()));

    eprintln!("Starting Telegram bot...");
    let mut front = CommandFront::new(controller.clone());
    if let Some(name) = bot_username {
        front = front.with_bot_username(name);
    }
    front.run(&mut transport, shutdown).await;

    controller.shutdown().await;
}

async fn wait_for_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    tracing::info!("shutdown signal received, shutting down");
    shutdown.cancel();
}

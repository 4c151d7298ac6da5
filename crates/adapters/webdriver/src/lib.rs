//! # acswitch-adapter-webdriver
//!
//! Drives the AC control page in a real browser through a W3C WebDriver
//! server (chromedriver).
//!
//! ## How it works
//!
//! 1. [`WebDriverSwitch::connect`] starts a Chrome session with notifications
//!    and the password manager disabled, then opens the control page.
//! 2. The human logs in by hand in that window. The adapter waits up to
//!    `login_timeout_secs` for the toggle control to become clickable.
//! 3. Every `click_toggle` waits for the control again and clicks it;
//!    `dismiss_popup` accepts the confirmation alert when there is one.
//!
//! ## Dependency rule
//!
//! Same as other adapters: depends on `acswitch-app` and `acswitch-domain`.

mod config;
mod error;

pub use config::WebDriverConfig;
pub use error::WebDriverAdapterError;

use std::time::Duration;

use thirtyfour::prelude::*;

use acswitch_app::ports::SwitchDriver;
use acswitch_domain::error::AcSwitchError;

/// `SwitchDriver` backed by a thirtyfour [`WebDriver`] session.
pub struct WebDriverSwitch {
    config: WebDriverConfig,
    session: Option<WebDriver>,
}

impl WebDriverSwitch {
    /// Start a browser session, open the control page and wait for the
    /// user to log in.
    ///
    /// # Errors
    ///
    /// Returns [`WebDriverAdapterError::Session`] if the session cannot be
    /// created or the page cannot be opened, and
    /// [`WebDriverAdapterError::SwitchNotFound`] if login does not complete
    /// within the configured timeout. The session is closed on failure.
    pub async fn connect(config: WebDriverConfig) -> Result<Self, WebDriverAdapterError> {
        let mut caps = DesiredCapabilities::chrome();
        caps.add_arg("--disable-notifications")?;
        caps.add_experimental_option(
            "prefs",
            serde_json::json!({
                "credentials_enable_service": false,
                "profile.password_manager_enabled": false,
            }),
        )?;

        tracing::info!(webdriver_url = %config.webdriver_url, "initializing Chrome driver");
        let session = WebDriver::new(&config.webdriver_url, caps).await?;

        let mut switch = Self {
            config,
            session: Some(session),
        };

        if let Err(err) = switch.open_and_wait_for_login().await {
            if let Err(quit_err) = switch.close().await {
                tracing::warn!(error = %quit_err, "failed to close session after login failure");
            }
            return Err(err);
        }

        Ok(switch)
    }

    async fn open_and_wait_for_login(&self) -> Result<(), WebDriverAdapterError> {
        self.session()?.goto(&self.config.page_url).await?;

        tracing::info!(
            page_url = %self.config.page_url,
            timeout_secs = self.config.login_timeout_secs,
            "please log in manually in the opened browser window"
        );
        eprintln!("Please log in manually in the opened browser window...");

        self.wait_for_switch(self.config.login_timeout()).await?;

        tracing::info!("login complete, AC switch detected");
        eprintln!("Login complete! AC switch detected.");
        Ok(())
    }

    async fn wait_for_switch(&self, timeout: Duration) -> Result<WebElement, WebDriverAdapterError> {
        let selector = &self.config.toggle_selector;
        self.session()?
            .query(By::Css(selector.as_str()))
            .wait(timeout, self.config.poll_interval())
            .and_clickable()
            .first()
            .await
            .map_err(|source| WebDriverAdapterError::SwitchNotFound {
                selector: selector.clone(),
                source: Box::new(source),
            })
    }

    async fn close(&mut self) -> Result<(), WebDriverAdapterError> {
        match self.session.take() {
            Some(session) => {
                session.quit().await?;
                tracing::info!("browser session closed");
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn session(&self) -> Result<&WebDriver, WebDriverAdapterError> {
        self.session
            .as_ref()
            .ok_or(WebDriverAdapterError::NotConnected)
    }
}

impl SwitchDriver for WebDriverSwitch {
    async fn click_toggle(&mut self) -> Result<(), AcSwitchError> {
        let button = self.wait_for_switch(self.config.element_timeout()).await?;
        button
            .click()
            .await
            .map_err(WebDriverAdapterError::from)?;
        Ok(())
    }

    async fn dismiss_popup(&mut self) -> Result<bool, AcSwitchError> {
        match self.session()?.accept_alert().await {
            Ok(()) => Ok(true),
            Err(WebDriverError::NoSuchAlert(_)) => Ok(false),
            Err(err) => Err(WebDriverAdapterError::from(err).into()),
        }
    }

    async fn quit(&mut self) -> Result<(), AcSwitchError> {
        self.close().await.map_err(AcSwitchError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disconnected() -> WebDriverSwitch {
        WebDriverSwitch {
            config: WebDriverConfig::default(),
            session: None,
        }
    }

    #[tokio::test]
    async fn should_fail_click_without_session() {
        let mut switch = disconnected();
        let err = switch.click_toggle().await.unwrap_err();
        assert!(matches!(err, AcSwitchError::Driver(_)));
        assert!(err.to_string().contains("browser session is closed"));
    }

    #[tokio::test]
    async fn should_fail_popup_check_without_session() {
        let mut switch = disconnected();
        assert!(switch.dismiss_popup().await.is_err());
    }

    #[tokio::test]
    async fn should_treat_quit_without_session_as_noop() {
        let mut switch = disconnected();
        assert!(switch.quit().await.is_ok());
        assert!(switch.quit().await.is_ok());
    }
}

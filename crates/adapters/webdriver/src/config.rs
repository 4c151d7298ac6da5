//! WebDriver adapter configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Where the browser lives and what it should click.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebDriverConfig {
    /// URL of the running chromedriver (or any W3C WebDriver server).
    pub webdriver_url: String,
    /// Control page opened after the session starts.
    pub page_url: String,
    /// CSS selector of the on/off switch.
    pub toggle_selector: String,
    /// How long to wait for the human to finish logging in, in seconds.
    pub login_timeout_secs: u64,
    /// How long each click waits for the switch to become clickable, in seconds.
    pub element_timeout_secs: u64,
    /// Delay between element polls, in milliseconds.
    pub poll_interval_millis: u64,
}

impl WebDriverConfig {
    #[must_use]
    pub fn login_timeout(&self) -> Duration {
        Duration::from_secs(self.login_timeout_secs)
    }

    #[must_use]
    pub fn element_timeout(&self) -> Duration {
        Duration::from_secs(self.element_timeout_secs)
    }

    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_millis)
    }
}

impl Default for WebDriverConfig {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:9515".to_string(),
            page_url: "https://w5.ab.ust.hk/njggt/app/home".to_string(),
            toggle_selector: "button[role='switch']".to_string(),
            login_timeout_secs: 300,
            element_timeout_secs: 300,
            poll_interval_millis: 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_have_sensible_defaults() {
        let config = WebDriverConfig::default();
        assert_eq!(config.webdriver_url, "http://localhost:9515");
        assert_eq!(config.toggle_selector, "button[role='switch']");
        assert_eq!(config.login_timeout(), Duration::from_secs(300));
        assert_eq!(config.element_timeout(), Duration::from_secs(300));
        assert_eq!(config.poll_interval(), Duration::from_millis(500));
    }

    #[test]
    fn should_deserialize_from_json() {
        let json = r##"{
            "webdriver_url": "http://selenium:4444",
            "page_url": "https://example.com/ac",
            "toggle_selector": "#power",
            "login_timeout_secs": 60,
            "element_timeout_secs": 10,
            "poll_interval_millis": 250
        }"##;
        let config: WebDriverConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.webdriver_url, "http://selenium:4444");
        assert_eq!(config.page_url, "https://example.com/ac");
        assert_eq!(config.toggle_selector, "#power");
        assert_eq!(config.login_timeout_secs, 60);
        assert_eq!(config.element_timeout_secs, 10);
        assert_eq!(config.poll_interval_millis, 250);
    }

    #[test]
    fn should_use_defaults_for_missing_fields() {
        let config: WebDriverConfig =
            serde_json::from_str(r#"{"webdriver_url": "http://127.0.0.1:4444"}"#).unwrap();
        assert_eq!(config.webdriver_url, "http://127.0.0.1:4444");
        assert_eq!(config.login_timeout_secs, 300);
        assert_eq!(config.toggle_selector, "button[role='switch']");
    }
}

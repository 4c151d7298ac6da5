//! Configuration loading — JSON file with environment variable overrides.
//!
//! Reads `config.json` from the working directory (or the path in
//! `ACSWITCH_CONFIG`). When the file is missing a default one is written and
//! start-up stops so the user can fill in the bot token. Environment
//! variables take precedence over file values.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use acswitch_adapter_telegram::TelegramConfig;
use acswitch_adapter_webdriver::WebDriverConfig;
use acswitch_domain::interval::{DEFAULT_INTERVAL_MINUTES, Interval};

/// Config file used when `ACSWITCH_CONFIG` is not set.
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Token written into a fresh config file; start-up refuses to run with it.
pub const PLACEHOLDER_TOKEN: &str = "YOUR_BOT_TOKEN_HERE";

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Telegram bot token.
    pub bot_token: String,
    /// Start the auto-toggle loop as soon as the driver is ready.
    pub auto_start_enabled: bool,
    /// Interval used by `auto_start_enabled`, in minutes.
    pub default_interval_minutes: u64,
    pub logging: LoggingConfig,
    pub driver: DriverConfig,
    pub telegram: TelegramConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level name (`DEBUG`, `INFO`, `WARNING`, …) or a full `RUST_LOG` directive.
    pub level: String,
    /// Mirror log output to stderr.
    pub keep_console_output: bool,
    /// Daily log files to keep; `0` keeps them all.
    pub max_log_files: usize,
    /// Directory holding the log files.
    pub directory: PathBuf,
}

/// Which switch driver to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriverKind {
    /// Real browser through a WebDriver server.
    #[default]
    Webdriver,
    /// Simulated page, for dry runs.
    Virtual,
}

/// Switch driver selection and browser settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    pub kind: DriverKind,
    #[serde(flatten)]
    pub webdriver: WebDriverConfig,
}

impl Config {
    /// Config path from `ACSWITCH_CONFIG`, falling back to [`DEFAULT_CONFIG_PATH`].
    #[must_use]
    pub fn path_from_env() -> PathBuf {
        std::env::var_os("ACSWITCH_CONFIG")
            .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from)
    }

    /// Load configuration from `path`, then apply environment-variable
    /// overrides and validate.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Created`] after writing a default file when
    /// `path` does not exist, and a parse, I/O or validation error otherwise.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::from_file(path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Self::write_default(path)?;
                Err(ConfigError::Created(path.to_path_buf()))
            }
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn write_default(path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(&Self::default()).map_err(ConfigError::Parse)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("ACSWITCH_BOT_TOKEN") {
            self.bot_token = val;
        }
        if let Some(val) = var("ACSWITCH_WEBDRIVER_URL") {
            self.driver.webdriver.webdriver_url = val;
        }
        if let Some(val) = var("ACSWITCH_LOG") {
            self.logging.level = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.level = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.bot_token.trim().is_empty() || self.bot_token == PLACEHOLDER_TOKEN {
            return Err(ConfigError::MissingToken);
        }
        if self.default_interval_minutes == 0 {
            return Err(ConfigError::Validation(
                "default_interval_minutes must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Interval used when auto-start is enabled.
    #[must_use]
    pub fn default_interval(&self) -> Interval {
        Interval::from_minutes(self.default_interval_minutes).unwrap_or_default()
    }
}

impl LoggingConfig {
    /// Turn the configured level into an `EnvFilter` directive.
    ///
    /// Level names are matched case-insensitively, with `WARNING` and
    /// `CRITICAL` mapped to `warn` and `error`. Anything else is passed
    /// through as a directive.
    #[must_use]
    pub fn filter_directive(&self) -> String {
        let level = self.level.trim();
        match level.to_ascii_lowercase().as_str() {
            "trace" => "trace".to_string(),
            "debug" => "debug".to_string(),
            "info" => "info".to_string(),
            "warn" | "warning" => "warn".to_string(),
            "error" | "critical" | "fatal" => "error".to_string(),
            _ => level.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot_token: PLACEHOLDER_TOKEN.to_string(),
            auto_start_enabled: false,
            default_interval_minutes: DEFAULT_INTERVAL_MINUTES,
            logging: LoggingConfig::default(),
            driver: DriverConfig::default(),
            telegram: TelegramConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "INFO".to_string(),
            keep_console_output: true,
            max_log_files: 7,
            directory: PathBuf::from("logs"),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parse failure.
    #[error("failed to parse config file: {0}")]
    Parse(#[source] serde_json::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// No config file existed; a default one was written.
    #[error("created {}. Please add your bot token and restart.", .0.display())]
    Created(PathBuf),
    /// The bot token is empty or still the placeholder.
    #[error("please set bot_token in the config file (or ACSWITCH_BOT_TOKEN)")]
    MissingToken,
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

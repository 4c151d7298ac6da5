//! WebDriver adapter error types.

use acswitch_domain::error::AcSwitchError;
use thirtyfour::error::WebDriverError;

/// Errors specific to the WebDriver adapter.
#[derive(Debug, thiserror::Error)]
pub enum WebDriverAdapterError {
    /// The session was already closed with `quit`.
    #[error("browser session is closed")]
    NotConnected,

    /// Starting the session, navigating, or a browser command failed.
    #[error("webdriver command failed: {0}")]
    Session(#[source] Box<WebDriverError>),

    /// The toggle control never became clickable.
    #[error("switch '{selector}' not clickable: {source}")]
    SwitchNotFound {
        selector: String,
        #[source]
        source: Box<WebDriverError>,
    },
}

impl From<WebDriverError> for WebDriverAdapterError {
    fn from(err: WebDriverError) -> Self {
        Self::Session(Box::new(err))
    }
}

impl From<WebDriverAdapterError> for AcSwitchError {
    fn from(err: WebDriverAdapterError) -> Self {
        Self::Driver(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_not_connected_error() {
        let err = WebDriverAdapterError::NotConnected;
        assert_eq!(err.to_string(), "browser session is closed");
    }

    #[test]
    fn should_convert_to_driver_error() {
        let err: AcSwitchError = WebDriverAdapterError::NotConnected.into();
        assert!(matches!(err, AcSwitchError::Driver(_)));
        assert_eq!(
            err.to_string(),
            "switch driver error: browser session is closed"
        );
    }
}

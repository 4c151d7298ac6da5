//! Auto-toggle interval, expressed in whole minutes.

use std::fmt;
use std::str::FromStr;

/// Interval used when `/auto_start` is sent without an argument.
pub const DEFAULT_INTERVAL_MINUTES: u64 = 10;

/// A validated auto-toggle interval of at least one minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Interval {
    minutes: u64,
}

/// Reasons an interval argument is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntervalError {
    /// The argument is not an integer.
    #[error("'{0}' is not a whole number of minutes")]
    NotANumber(String),

    /// The argument is an integer below one minute.
    #[error("interval must be at least 1 minute, got {0}")]
    TooShort(i64),
}

impl Interval {
    /// Build an interval from a number of minutes.
    ///
    /// # Errors
    ///
    /// Returns [`IntervalError::TooShort`] when `minutes` is zero.
    pub fn from_minutes(minutes: u64) -> Result<Self, IntervalError> {
        if minutes == 0 {
            return Err(IntervalError::TooShort(0));
        }
        Ok(Self { minutes })
    }

    #[must_use]
    pub fn minutes(self) -> u64 {
        self.minutes
    }

    #[must_use]
    pub fn as_secs(self) -> u64 {
        self.minutes.saturating_mul(60)
    }

    /// Parse an optional command argument, falling back to the default
    /// interval when it is absent.
    ///
    /// # Errors
    ///
    /// Returns an [`IntervalError`] when the argument is present but invalid.
    pub fn parse_or_default(arg: Option<&str>) -> Result<Self, IntervalError> {
        arg.map_or_else(|| Ok(Self::default()), str::parse)
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self {
            minutes: DEFAULT_INTERVAL_MINUTES,
        }
    }
}

impl FromStr for Interval {
    type Err = IntervalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s
            .trim()
            .parse()
            .map_err(|_| IntervalError::NotANumber(s.to_string()))?;
        match u64::try_from(value) {
            Ok(minutes) if minutes >= 1 => Ok(Self { minutes }),
            _ => Err(IntervalError::TooShort(value)),
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.minutes == 1 {
            f.write_str("1 minute")
        } else {
            write!(f, "{} minutes", self.minutes)
        }
    }
}

//! Toggle timestamps.
//!
//! The controller stamps every successful click so `/status` can say when the
//! switch last moved. Times are kept and shown in UTC.

use chrono::{DateTime, Utc};

/// When a toggle happened.
pub type Timestamp = DateTime<Utc>;

/// Current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Render a toggle time for chat replies, e.g. `2024-03-01 08:30:00 UTC`.
#[must_use]
pub fn display_utc(ts: Timestamp) -> String {
    ts.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn should_render_seconds_precision_in_utc() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 5).unwrap();
        assert_eq!(display_utc(ts), "2024-03-01 08:30:05 UTC");
    }

    #[test]
    fn should_move_forward() {
        let first = now();
        let second = now();
        assert!(second >= first);
    }
}

//! Timestamp provider
//!
//! Every log line starts with the local wall-clock time in
//! `YYYY-MM-DD HH:mm:ss` form. The [`Clock`] is part of the logger
//! configuration so tests can pin it to a known instant.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// strftime pattern for the line prefix
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Source of the timestamp written at the start of each line
///
/// # Examples
///
/// ```
/// use unklogger::Clock;
/// use chrono::NaiveDate;
///
/// let at = NaiveDate::from_ymd_opt(2025, 1, 8)
///     .and_then(|d| d.and_hms_opt(9, 5, 3))
///     .expect("valid datetime");
/// assert_eq!(Clock::Fixed(at).now(), "2025-01-08 09:05:03");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Clock {
    /// Current local time
    #[default]
    Local,

    /// Always reports the same instant
    Fixed(NaiveDateTime),
}

impl Clock {
    /// Render the current time of this clock
    #[must_use]
    pub fn now(&self) -> String {
        match self {
            Clock::Local => format_timestamp(&Local::now().naive_local()),
            Clock::Fixed(at) => format_timestamp(at),
        }
    }
}

/// Format a local date/time as `YYYY-MM-DD HH:mm:ss`
#[must_use]
pub fn format_timestamp(datetime: &NaiveDateTime) -> String {
    datetime.format(TIMESTAMP_FORMAT).to_string()
}

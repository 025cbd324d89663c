//! Wall-clock timestamps.
//!
//! Decisions are stamped with the controller's local wall-clock time, the
//! same clock the hour-of-day feature is read from.

use chrono::{Local, NaiveDateTime, Timelike};

/// Local wall-clock timestamp attached to every decision record.
pub type Timestamp = NaiveDateTime;

/// Textual layout of a [`Timestamp`] in the durable log.
pub const LOG_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Return the current local time, truncated to whole seconds.
#[must_use]
pub fn now() -> Timestamp {
    let ts = Local::now().naive_local();
    ts.with_nanosecond(0).unwrap_or(ts)
}

/// Return the current local hour of day (`0..=23`).
#[must_use]
pub fn current_hour() -> u8 {
    // `hour()` is always below 24.
    u8::try_from(Local::now().hour()).unwrap_or(0)
}

/// Format a timestamp the way the durable log stores it.
#[must_use]
pub fn format_for_log(ts: &Timestamp) -> String {
    ts.format(LOG_FORMAT).to_string()
}

//! Display formatting for numbers and timestamps

use chrono::{DateTime, TimeZone};
use std::fmt::Display;

/// Compact display of a count: `1.5M`, `12.3K`, or the plain value below a thousand.
pub fn format_number(num: f64) -> String {
    if num >= 1_000_000.0 {
        format!("{:.1}M", num / 1_000_000.0)
    } else if num >= 1_000.0 {
        format!("{:.1}K", num / 1_000.0)
    } else {
        num.to_string()
    }
}

/// Timestamp shown next to notifications.
pub fn format_timestamp<Tz>(time: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    time.format("%Y-%m-%d %H:%M:%S").to_string()
}

//! Terminal status lines
//!
//! Command results and notifications share one look: a colored type tag,
//! the icon of the notification type, then the text.

use crate::events::{Event, EventType};

const RESET: &str = "\x1b[0m";

fn color(event_type: EventType) -> &'static str {
    match event_type {
        EventType::Success => "\x1b[1;32m",
        EventType::Error => "\x1b[1;31m",
        EventType::Warning => "\x1b[1;91m",
        EventType::Info => "\x1b[1;36m",
    }
}

/// Formats a status line without color, `"(icon) Type: title  details"`.
pub fn status_line(event_type: EventType, title: &str, details: &str) -> String {
    let mut line = format!("({}) {}: {}", event_type.icon(), event_type, title);
    if !details.is_empty() {
        line.push_str("  ");
        line.push_str(details);
    }
    line
}

pub fn print_status(event_type: EventType, title: &str, details: &str) {
    let line = status_line(event_type, title, details);
    // Only the tag is colored
    let (tag, rest) = line.split_once(':').unwrap_or((line.as_str(), ""));
    println!("{}{}{}:{}", color(event_type), tag, RESET, rest);
}

/// Prints a notification in the same layout as command status lines.
pub fn print_notification(event: &Event) {
    print_status(
        event.event_type,
        &format!("[{}] {}", event.timestamp, event.msg),
        "",
    );
}

#[macro_export]
macro_rules! print_cmd_info {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_status(
            $crate::events::EventType::Info,
            $title,
            &format!($($details)*),
        )
    };
}

#[macro_export]
macro_rules! print_cmd_warn {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_status(
            $crate::events::EventType::Warning,
            $title,
            &format!($($details)*),
        )
    };
}

#[macro_export]
macro_rules! print_cmd_error {
    ($title:expr) => {
        $crate::cli_messages::print_status($crate::events::EventType::Error, $title, "")
    };
    ($title:expr, $details:expr) => {
        $crate::cli_messages::print_status($crate::events::EventType::Error, $title, $details)
    };
}

#[macro_export]
macro_rules! print_cmd_success {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_status(
            $crate::events::EventType::Success,
            $title,
            &format!($($details)*),
        )
    };
}

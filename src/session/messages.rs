//! Session lifecycle lines and notification output

use crate::cli_messages::{print_notification, print_status};
use crate::events::{Event, EventType};

/// Print a notification if its level is displayed
pub fn print_event(event: &Event) {
    if event.should_display() {
        print_notification(event);
    }
}

pub fn print_session_starting(mode: &str, api_url: &str, route: &str) {
    print_status(
        EventType::Info,
        &format!("Starting {} mode", mode),
        &format!("{} on route {}", api_url, route),
    );
}

pub fn print_session_shutdown() {
    print_status(EventType::Info, "Shutting down...", "");
}

pub fn print_session_exit_success() {
    print_status(EventType::Success, "Admin panel client exited", "");
}

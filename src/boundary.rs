//! Process-wide error boundary
//!
//! A panic anywhere in the client (a timer callback or a render)
//! is logged and surfaced as one generic failure notification.

use crate::events::{Event, EventSender};
use log::error;
use std::any::Any;
use std::panic;

pub const GENERIC_FAILURE: &str = "An error occurred in the system";

/// Replaces the panic hook so failures reach the notification stream instead of stderr.
pub fn install(events: EventSender) {
    panic::set_hook(Box::new(move |info| {
        let location = info
            .location()
            .map(|location| format!("{}:{}", location.file(), location.line()));
        report(&events, panic_message(info.payload()), location.as_deref());
    }));
}

fn report(events: &EventSender, message: &str, location: Option<&str>) {
    match location {
        Some(location) => error!("Unhandled failure at {}: {}", location, message),
        None => error!("Unhandled failure: {}", message),
    }
    events.notify_now(Event::boundary(GENERIC_FAILURE.to_string()));
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic"
    }
}

//! Event System
//!
//! Notifications raised by the refresher, search, export and error boundary,
//! and the channel wrapper used to deliver them to the session loop.

use crate::logging::{self, LogLevel};
use crate::utils::format::format_timestamp;
use chrono::Local;
use std::fmt::Display;
use tokio::sync::mpsc;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Source {
    /// Periodic chart refresh.
    Refresher,
    /// CSV/JSON export.
    Export,
    /// Process-wide error boundary.
    Boundary,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum EventType {
    Success,
    Error,
    Warning,
    Info,
}

impl EventType {
    /// Icon shown next to the notification text.
    pub fn icon(&self) -> &'static str {
        match self {
            EventType::Success => "check-circle",
            EventType::Error | EventType::Warning => "exclamation-triangle",
            EventType::Info => "info-circle",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub source: Source,
    pub msg: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub log_level: LogLevel,
}

impl Event {
    pub fn new(source: Source, msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self {
            source,
            msg,
            timestamp: format_timestamp(&Local::now()),
            event_type,
            log_level,
        }
    }

    pub fn refresher(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Source::Refresher, msg, event_type, log_level)
    }

    pub fn export(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Source::Export, msg, event_type, log_level)
    }

    pub fn boundary(msg: String) -> Self {
        Self::new(Source::Boundary, msg, EventType::Error, LogLevel::Error)
    }

    pub fn should_display(&self) -> bool {
        // Always show outcomes the user asked for and anything at info or above
        if self.event_type == EventType::Success || self.log_level >= LogLevel::Info {
            return true;
        }
        logging::enabled(self.log_level)
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] {}", self.event_type, self.timestamp, self.msg)
    }
}

/// Cloneable handle for emitting notifications.
#[derive(Clone, Debug)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    pub async fn send_event(&self, event: Event) {
        let _ = self.sender.send(event).await;
    }

    pub async fn send_refresh_event(
        &self,
        message: String,
        event_type: EventType,
        log_level: LogLevel,
    ) {
        self.send_event(Event::refresher(message, event_type, log_level))
            .await;
    }

    /// Non-blocking send for callers outside an async context. Drops the event if the queue is full.
    pub fn notify_now(&self, event: Event) {
        let _ = self.sender.try_send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icons_by_type() {
        assert_eq!(EventType::Success.icon(), "check-circle");
        assert_eq!(EventType::Error.icon(), "exclamation-triangle");
        assert_eq!(EventType::Warning.icon(), "exclamation-triangle");
        assert_eq!(EventType::Info.icon(), "info-circle");
    }

    #[test]
    fn test_display_format() {
        let mut event = Event::export(
            "Exported data to telegram_bot_data_2024-03-01.csv".to_string(),
            EventType::Success,
            LogLevel::Info,
        );
        event.timestamp = "2024-03-01 10:00:00".to_string();
        assert_eq!(
            event.to_string(),
            "Success [2024-03-01 10:00:00] Exported data to telegram_bot_data_2024-03-01.csv"
        );
        assert!(event.should_display());
    }

    #[test]
    fn test_debug_events_follow_the_logger() {
        let event = Event::refresher(
            "users_by_level rate limited".to_string(),
            EventType::Error,
            LogLevel::Debug,
        );
        assert_eq!(event.should_display(), crate::logging::enabled(LogLevel::Debug));
        assert!(!event.should_display());
    }

    #[tokio::test]
    async fn test_notify_now_delivers_without_await() {
        let (sender, mut receiver) = mpsc::channel(4);
        let events = EventSender::new(sender);
        events.notify_now(Event::boundary("Something went wrong".to_string()));

        let event = receiver.recv().await.unwrap();
        assert_eq!(event.source, Source::Boundary);
        assert_eq!(event.event_type, EventType::Error);
    }
}

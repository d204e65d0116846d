use chrono::{DateTime, Utc};

use crate::Level;

/// A single log record as it travels through the engine.
#[derive(Clone, Debug, PartialEq)]
pub struct LogEvent {
    pub logger_name: String,
    pub level: Level,
    pub message: String,
    pub thread_name: String,
    pub timestamp: DateTime<Utc>,
    /// Rendered error attached to the event, if any.
    pub thrown: Option<String>,
}

impl LogEvent {
    /// Create an event stamped with the current time and thread.
    pub fn new(logger_name: impl Into<String>, level: Level, message: impl Into<String>) -> Self {
        let thread = std::thread::current();
        let thread_name = match thread.name() {
            Some(name) => name.to_string(),
            None => format!("{:?}", thread.id()),
        };
        Self {
            logger_name: logger_name.into(),
            level,
            message: message.into(),
            thread_name,
            timestamp: Utc::now(),
            thrown: None,
        }
    }

    pub fn with_thrown(mut self, thrown: impl Into<String>) -> Self {
        self.thrown = Some(thrown.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

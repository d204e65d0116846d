use std::time::{SystemTime, UNIX_EPOCH};

use lazy_static::lazy_static;

use crate::Level;

lazy_static! {
    static ref START_TIME: i64 = now_millis();
}

/// An event in the legacy shape: timestamps are epoch milliseconds.
#[derive(Clone, Debug, PartialEq)]
pub struct LoggingEvent {
    pub logger_name: String,
    pub level: Level,
    pub message: String,
    pub thread_name: String,
    pub time_stamp: i64,
    pub thrown: Option<String>,
}

impl LoggingEvent {
    pub fn new(logger_name: impl Into<String>, level: Level, message: impl Into<String>) -> Self {
        // Touch the start time so relative times are never negative
        let _ = *START_TIME;
        let thread = std::thread::current();
        Self {
            logger_name: logger_name.into(),
            level,
            message: message.into(),
            thread_name: thread
                .name()
                .map(str::to_string)
                .unwrap_or_else(|| format!("{:?}", thread.id())),
            time_stamp: now_millis(),
            thrown: None,
        }
    }

    /// Milliseconds since the epoch at which this process first asked.
    pub fn start_time() -> i64 {
        *START_TIME
    }

    /// Milliseconds between process start and this event.
    pub fn relative_time(&self) -> i64 {
        (self.time_stamp - Self::start_time()).max(0)
    }
}

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

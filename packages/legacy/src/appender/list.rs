use std::any::Any;
use std::sync::Mutex;

use super::{Appender, AppenderSkeleton};
use crate::LoggingEvent;

/// Keeps everything it receives in memory.
///
/// Without a layout the events themselves are kept; with one, the rendered
/// text is kept instead. Used to observe a configuration from tests.
pub struct ListAppender {
    skeleton: AppenderSkeleton,
    events: Mutex<Vec<LoggingEvent>>,
    messages: Mutex<Vec<String>>,
}

impl ListAppender {
    pub fn new(skeleton: AppenderSkeleton) -> Self {
        Self {
            skeleton,
            events: Mutex::new(Vec::new()),
            messages: Mutex::new(Vec::new()),
        }
    }

    pub fn events(&self) -> Vec<LoggingEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }

    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
        if let Ok(mut messages) = self.messages.lock() {
            messages.clear();
        }
    }
}

impl Appender for ListAppender {
    fn skeleton(&self) -> &AppenderSkeleton {
        &self.skeleton
    }

    fn append(&self, event: &LoggingEvent) {
        match self.layout() {
            Some(layout) => {
                let text = layout.format(event);
                if let Ok(mut messages) = self.messages.lock() {
                    messages.push(text);
                }
            }
            None => {
                if let Ok(mut events) = self.events.lock() {
                    events.push(event.clone());
                }
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

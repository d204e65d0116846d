use std::any::Any;

use super::pattern::{format_millis, to_chrono_format};
use super::{Layout, LINE_SEP};
use crate::LoggingEvent;

/// Time, thread, category and context: `176 [main] INFO org.example - hello`.
///
/// The leading time is milliseconds since start unless a date format is
/// configured.
#[derive(Clone, Debug)]
pub struct TtccLayout {
    thread_printing: bool,
    category_prefixing: bool,
    date_format: Option<String>,
}

impl TtccLayout {
    pub fn new() -> Self {
        Self {
            thread_printing: true,
            category_prefixing: true,
            date_format: None,
        }
    }

    pub fn with_thread_printing(mut self, enabled: bool) -> Self {
        self.thread_printing = enabled;
        self
    }

    pub fn with_category_prefixing(mut self, enabled: bool) -> Self {
        self.category_prefixing = enabled;
        self
    }

    /// `RELATIVE`, `NULL`, `ISO8601`, `ABSOLUTE`, `DATE` or a `SimpleDateFormat` pattern.
    pub fn with_date_format(mut self, format: &str) -> Self {
        self.date_format = match format.trim().to_ascii_uppercase().as_str() {
            "RELATIVE" => None,
            "NULL" => Some(String::new()),
            "ISO8601" => Some("%Y-%m-%d %H:%M:%S,%3f".to_string()),
            "ABSOLUTE" => Some("%H:%M:%S,%3f".to_string()),
            "DATE" => Some("%d %b %Y %H:%M:%S,%3f".to_string()),
            _ => Some(to_chrono_format(format)),
        };
        self
    }
}

impl Default for TtccLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl Layout for TtccLayout {
    fn format(&self, event: &LoggingEvent) -> String {
        let mut out = String::with_capacity(64 + event.message.len());
        match &self.date_format {
            None => {
                out.push_str(&event.relative_time().to_string());
                out.push(' ');
            }
            Some(format) if format.is_empty() => {}
            Some(format) => {
                out.push_str(&format_millis(event.time_stamp, format));
                out.push(' ');
            }
        }
        if self.thread_printing {
            out.push('[');
            out.push_str(&event.thread_name);
            out.push_str("] ");
        }
        out.push_str(event.level.name());
        out.push(' ');
        if self.category_prefixing {
            out.push_str(&event.logger_name);
            out.push(' ');
        }
        out.push_str("- ");
        out.push_str(&event.message);
        out.push_str(LINE_SEP);
        out
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Level;

    #[test]
    fn without_time() {
        let mut event = LoggingEvent::new("org.example", Level::Info, "hello");
        event.thread_name = "main".to_string();
        let layout = TtccLayout::new().with_date_format("NULL");
        assert_eq!(layout.format(&event), "[main] INFO org.example - hello\n");

        let bare = layout.with_thread_printing(false).with_category_prefixing(false);
        assert_eq!(bare.format(&event), "INFO - hello\n");
    }

    #[test]
    fn relative_time_prefix() {
        let event = LoggingEvent::new("x", Level::Debug, "m");
        let rendered = TtccLayout::new().format(&event);
        let first = rendered.split(' ').next().unwrap();
        assert!(first.parse::<i64>().is_ok());
    }
}

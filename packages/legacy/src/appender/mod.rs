//! Legacy appenders.
//!
//! Every built-in appender embeds an [`AppenderSkeleton`] that carries the
//! shared state: name, threshold, layout and open/closed status. The
//! [`Appender`] trait's provided methods read that skeleton, so an
//! implementation only writes `append` and, if it holds resources,
//! `activate_options` and `close`.

use std::any::Any;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::{Error, Layout, Level, LoggingEvent};

mod console;
mod file;
mod list;
mod null;
mod syslog;

pub use console::{ConsoleAppender, Target};
pub use file::{
    parse_file_size, DailyRollingFileAppender, FileAppender, RollingFileAppender,
    DEFAULT_DATE_PATTERN,
};
pub use list::ListAppender;
pub use null::NullAppender;
pub use syslog::{Protocol, SyslogAppender, DEFAULT_SYSLOG_PORT};

const STATE_NEW: u8 = 0;
const STATE_ACTIVE: u8 = 1;
const STATE_CLOSED: u8 = 2;

/// State shared by all built-in appenders.
pub struct AppenderSkeleton {
    name: String,
    threshold: Option<Level>,
    layout: Option<Box<dyn Layout>>,
    state: AtomicU8,
}

impl AppenderSkeleton {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            threshold: None,
            layout: None,
            state: AtomicU8::new(STATE_NEW),
        }
    }

    pub fn with_threshold(mut self, threshold: Option<Level>) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_layout(mut self, layout: Option<Box<dyn Layout>>) -> Self {
        self.layout = layout;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn threshold(&self) -> Option<Level> {
        self.threshold
    }

    pub fn layout(&self) -> Option<&dyn Layout> {
        self.layout.as_deref()
    }

    pub fn is_as_severe_as_threshold(&self, level: Level) -> bool {
        self.threshold
            .map_or(true, |threshold| level.is_greater_or_equal(threshold))
    }

    /// Mark the appender open. Returns false if it already was.
    pub fn activate(&self) -> bool {
        self.state.swap(STATE_ACTIVE, Ordering::SeqCst) != STATE_ACTIVE
    }

    /// Mark the appender closed. Returns false if it already was.
    pub fn close(&self) -> bool {
        self.state.swap(STATE_CLOSED, Ordering::SeqCst) != STATE_CLOSED
    }

    pub fn is_active(&self) -> bool {
        self.state.load(Ordering::SeqCst) == STATE_ACTIVE
    }

    pub fn is_closed(&self) -> bool {
        self.state.load(Ordering::SeqCst) == STATE_CLOSED
    }

    /// Render `event` through the layout, or as a bare message line.
    ///
    /// The event's error text is appended when the layout ignores it.
    pub fn render(&self, event: &LoggingEvent) -> String {
        let mut text = match &self.layout {
            Some(layout) => layout.format(event),
            None => format!("{}\n", event.message),
        };
        let ignores = self.layout.as_ref().map_or(true, |l| l.ignores_throwable());
        if ignores {
            if let Some(thrown) = &event.thrown {
                text.push_str(thrown);
                if !thrown.ends_with('\n') {
                    text.push('\n');
                }
            }
        }
        text
    }
}

/// A legacy appender.
///
/// Callers go through [`do_append`](Appender::do_append), which drops events
/// below the threshold and refuses to write after `close`.
pub trait Appender: Send + Sync {
    fn skeleton(&self) -> &AppenderSkeleton;

    /// Write one event. Only called through `do_append`.
    fn append(&self, event: &LoggingEvent);

    /// Open resources once all options are set.
    fn activate_options(&self) -> Result<(), Error> {
        self.skeleton().activate();
        Ok(())
    }

    /// Release resources. Further events are dropped.
    fn close(&self) {
        self.skeleton().close();
    }

    /// Access to the concrete type, for diagnostics and tests.
    fn as_any(&self) -> &dyn Any;

    fn name(&self) -> &str {
        self.skeleton().name()
    }

    fn threshold(&self) -> Option<Level> {
        self.skeleton().threshold()
    }

    fn layout(&self) -> Option<&dyn Layout> {
        self.skeleton().layout()
    }

    fn is_active(&self) -> bool {
        self.skeleton().is_active()
    }

    fn is_closed(&self) -> bool {
        self.skeleton().is_closed()
    }

    fn do_append(&self, event: &LoggingEvent) {
        if self.is_closed() {
            log::debug!("Attempted to append to closed appender named [{}]", self.name());
            return;
        }
        if !self.skeleton().is_as_severe_as_threshold(event.level) {
            return;
        }
        self.append(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::SimpleLayout;

    #[test]
    fn threshold_gate() {
        let skeleton = AppenderSkeleton::new("a").with_threshold(Some(Level::Warn));
        assert!(skeleton.is_as_severe_as_threshold(Level::Error));
        assert!(!skeleton.is_as_severe_as_threshold(Level::Info));
        assert!(AppenderSkeleton::new("b").is_as_severe_as_threshold(Level::Trace));
    }

    #[test]
    fn lifecycle_transitions() {
        let skeleton = AppenderSkeleton::new("a");
        assert!(!skeleton.is_active());
        assert!(skeleton.activate());
        assert!(!skeleton.activate());
        assert!(skeleton.close());
        assert!(skeleton.is_closed());
        assert!(!skeleton.close());
    }

    #[test]
    fn render_appends_thrown() {
        let skeleton = AppenderSkeleton::new("a").with_layout(Some(Box::new(SimpleLayout)));
        let mut event = LoggingEvent::new("x", Level::Error, "boom");
        event.thrown = Some("cause: disk".to_string());
        assert_eq!(skeleton.render(&event), "ERROR - boom\ncause: disk\n");
    }
}

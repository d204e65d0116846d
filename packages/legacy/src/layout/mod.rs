//! Legacy layouts: render a [`LoggingEvent`] to text.

use std::any::Any;

use crate::LoggingEvent;

mod html;
mod pattern;
mod simple;
mod ttcc;

pub use html::HtmlLayout;
pub use pattern::{to_chrono_format, PatternLayout, DEFAULT_CONVERSION_PATTERN};
pub use simple::SimpleLayout;
pub use ttcc::TtccLayout;

pub const LINE_SEP: &str = "\n";

pub trait Layout: Send + Sync {
    fn format(&self, event: &LoggingEvent) -> String;

    fn content_type(&self) -> &str {
        "text/plain"
    }

    /// Written once when the owning appender opens its output.
    fn header(&self) -> Option<String> {
        None
    }

    /// Written once when the owning appender closes its output.
    fn footer(&self) -> Option<String> {
        None
    }

    /// True when the appender must render the event's error itself.
    fn ignores_throwable(&self) -> bool {
        true
    }

    /// Access to the concrete type, for diagnostics and tests.
    fn as_any(&self) -> &dyn Any;
}

//! The engine's appender contract.

use std::any::Any;
use std::sync::Arc;

use crate::{Error, Filter, FilterResult, LogEvent};

/// A named event sink.
///
/// Appenders are installed once per configuration and then invoked from any
/// number of logging threads, so every method takes `&self`. Implementations
/// own whatever synchronization their output needs.
///
/// # Object Safety
///
/// This trait is object-safe: configurations hold `Arc<dyn Appender>`.
pub trait Appender: Send + Sync {
    fn name(&self) -> &str;

    /// Write one event. Filtering has already happened.
    fn append(&self, event: &LogEvent);

    fn start(&self) -> Result<(), Error>;

    fn stop(&self);

    fn is_started(&self) -> bool;

    /// Filter attached to this appender, if any.
    fn filter(&self) -> Option<&Arc<dyn Filter>> {
        None
    }

    /// True when the attached filter rejects `event`.
    fn is_filtered(&self, event: &LogEvent) -> bool {
        self.filter()
            .is_some_and(|filter| filter.filter(event) == FilterResult::Deny)
    }

    /// Access to the concrete type, for diagnostics and tests.
    fn as_any(&self) -> &dyn Any;
}

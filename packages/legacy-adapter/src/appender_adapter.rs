//! Adapter to install a legacy appender as an engine appender.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use logbridge_core::{Error as CoreError, Filter, LogEvent};
use logbridge_legacy::Appender as LegacyAppender;

use crate::convert::core_event_to_legacy;
use crate::Error;

/// Wraps a legacy appender to implement the engine's `Appender` trait.
///
/// Events are converted to the legacy shape and handed to the legacy
/// `do_append`, so the legacy threshold still applies. `start` maps to
/// `activate_options` and `stop` to `close`. The engine-side filter, if any,
/// is carried here because legacy appenders have no notion of one.
pub struct AppenderAdapter {
    appender: Box<dyn LegacyAppender>,
    filter: Option<Arc<dyn Filter>>,
}

impl AppenderAdapter {
    /// Create a new adapter wrapping the given legacy appender.
    pub fn new(appender: Box<dyn LegacyAppender>, filter: Option<Arc<dyn Filter>>) -> Self {
        Self { appender, filter }
    }

    /// Get a reference to the wrapped appender.
    pub fn appender(&self) -> &dyn LegacyAppender {
        self.appender.as_ref()
    }

    /// The wrapped appender as its concrete type, if it is a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.appender.as_any().downcast_ref::<T>()
    }

    /// Unwrap and return the wrapped appender.
    pub fn into_inner(self) -> Box<dyn LegacyAppender> {
        self.appender
    }
}

impl fmt::Debug for AppenderAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppenderAdapter")
            .field("name", &self.appender.name())
            .field("has_filter", &self.filter.is_some())
            .finish()
    }
}

impl logbridge_core::Appender for AppenderAdapter {
    fn name(&self) -> &str {
        self.appender.name()
    }

    fn append(&self, event: &LogEvent) {
        self.appender.do_append(&core_event_to_legacy(event));
    }

    fn start(&self) -> Result<(), CoreError> {
        log::debug!("Activating legacy appender {}", self.appender.name());
        if let Some(filter) = &self.filter {
            filter.start();
        }
        self.appender
            .activate_options()
            .map_err(Error::Legacy)
            .map_err(CoreError::from)
    }

    fn stop(&self) {
        self.appender.close();
        if let Some(filter) = &self.filter {
            filter.stop();
        }
    }

    fn is_started(&self) -> bool {
        self.appender.is_active()
    }

    fn filter(&self) -> Option<&Arc<dyn Filter>> {
        self.filter.as_ref()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logbridge_core::{Appender as _, FilterResult, Level, ThresholdFilter};
    use logbridge_legacy::appender::{AppenderSkeleton, FileAppender, ListAppender};
    use logbridge_legacy::Level as LegacyLevel;

    fn list(threshold: Option<LegacyLevel>) -> AppenderAdapter {
        AppenderAdapter::new(
            Box::new(ListAppender::new(
                AppenderSkeleton::new("list").with_threshold(threshold),
            )),
            None,
        )
    }

    #[test]
    fn forwards_events_and_lifecycle() {
        let adapter = list(None);
        assert!(!adapter.is_started());
        adapter.start().unwrap();
        assert!(adapter.is_started());

        adapter.append(&LogEvent::new("app", Level::Info, "one"));
        let events = adapter.downcast_ref::<ListAppender>().unwrap().events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].level, LegacyLevel::Info);

        adapter.stop();
        assert!(!adapter.is_started());
        assert!(adapter.appender().is_closed());
        adapter.append(&LogEvent::new("app", Level::Info, "after stop"));
        assert_eq!(adapter.downcast_ref::<ListAppender>().unwrap().events().len(), 1);
    }

    #[test]
    fn legacy_threshold_still_applies() {
        let adapter = list(Some(LegacyLevel::Warn));
        adapter.start().unwrap();
        adapter.append(&LogEvent::new("app", Level::Info, "quiet"));
        adapter.append(&LogEvent::new("app", Level::Error, "loud"));
        let events = adapter.downcast_ref::<ListAppender>().unwrap().events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].message, "loud");
    }

    #[test]
    fn exposes_attached_filter() {
        assert!(list(None).filter().is_none());

        let filter: Arc<dyn Filter> = Arc::new(ThresholdFilter::new(
            Level::Warn,
            FilterResult::Neutral,
            FilterResult::Deny,
        ));
        let adapter = AppenderAdapter::new(
            Box::new(ListAppender::new(AppenderSkeleton::new("list"))),
            Some(filter),
        );
        assert!(adapter.filter().is_some());
        assert!(adapter.is_filtered(&LogEvent::new("app", Level::Debug, "x")));
        assert!(!adapter.is_filtered(&LogEvent::new("app", Level::Error, "x")));
    }

    #[test]
    fn failed_activation_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened as the log file
        let adapter = AppenderAdapter::new(
            Box::new(FileAppender::new(AppenderSkeleton::new("FILE"), dir.path())),
            None,
        );
        match adapter.start() {
            Err(CoreError::Io { name, .. }) => assert_eq!(name, "FILE"),
            other => panic!("expected Io error, got {:?}", other),
        }
        assert!(!adapter.is_started());
    }

    #[test]
    fn debug_names_the_appender() {
        assert!(format!("{:?}", list(None)).contains("list"));
    }
}

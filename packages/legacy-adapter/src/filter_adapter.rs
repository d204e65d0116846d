//! Adapter to run a legacy filter inside an engine filter chain.

use std::any::Any;
use std::sync::Arc;

use logbridge_core::{FilterResult, LogEvent};
use logbridge_legacy::Filter as LegacyFilter;

use crate::convert::{core_event_to_legacy, decision_to_result};
use crate::FilterWrapper;

/// Wraps a legacy filter to implement the engine's `Filter` trait.
///
/// The legacy decision is returned as-is: DENY stays DENY, NEUTRAL stays
/// NEUTRAL and ACCEPT stays ACCEPT.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
///
/// use logbridge_core::{Filter, FilterResult, Level, LogEvent};
/// use logbridge_legacy::filter::DenyAllFilter;
/// use logbridge_legacy_adapter::FilterAdapter;
///
/// let adapter = FilterAdapter::new(Arc::new(DenyAllFilter));
/// let event = LogEvent::new("app", Level::Info, "hello");
/// assert_eq!(adapter.filter(&event), FilterResult::Deny);
/// ```
pub struct FilterAdapter {
    inner: Arc<dyn LegacyFilter>,
}

impl FilterAdapter {
    /// Create a new adapter wrapping the given legacy filter.
    pub fn new(inner: Arc<dyn LegacyFilter>) -> Self {
        Self { inner }
    }

    /// Get a reference to the wrapped filter.
    pub fn inner(&self) -> &Arc<dyn LegacyFilter> {
        &self.inner
    }

    /// The wrapped filter as its concrete type, if it is a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.as_any().downcast_ref::<T>()
    }

    /// The engine filter behind a wrapped [`FilterWrapper`], if that is what
    /// this adapter holds.
    pub fn wrapped_core_filter(&self) -> Option<&Arc<dyn logbridge_core::Filter>> {
        self.downcast_ref::<FilterWrapper>().map(FilterWrapper::inner)
    }
}

impl logbridge_core::Filter for FilterAdapter {
    fn filter(&self, event: &LogEvent) -> FilterResult {
        decision_to_result(self.inner.decide(&core_event_to_legacy(event)))
    }

    fn start(&self) {
        self.inner.activate_options();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

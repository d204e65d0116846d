//! Wrapper exposing an engine filter through the legacy filter contract.

use std::any::Any;
use std::sync::Arc;

use logbridge_core::Filter as CoreFilter;
use logbridge_legacy::{Decision, LoggingEvent};

use crate::convert::{legacy_event_to_core, result_to_decision};

/// Wraps an engine filter to implement the legacy `Filter` trait.
///
/// Used when a legacy filter chain must include an engine built-in, such as
/// the range filter the legacy `LevelRangeFilter` type name resolves to.
pub struct FilterWrapper {
    inner: Arc<dyn CoreFilter>,
}

impl FilterWrapper {
    /// Create a new wrapper around the given engine filter.
    pub fn new(inner: Arc<dyn CoreFilter>) -> Self {
        Self { inner }
    }

    /// Get a reference to the wrapped filter.
    pub fn inner(&self) -> &Arc<dyn CoreFilter> {
        &self.inner
    }
}

impl logbridge_legacy::Filter for FilterWrapper {
    fn decide(&self, event: &LoggingEvent) -> Decision {
        result_to_decision(self.inner.filter(&legacy_event_to_core(event)))
    }

    fn activate_options(&self) {
        self.inner.start();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

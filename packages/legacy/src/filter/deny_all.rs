use std::any::Any;

use crate::{Decision, Filter, LoggingEvent};

/// Drops every event. Usually the last element of a chain.
#[derive(Clone, Debug, Default)]
pub struct DenyAllFilter;

impl Filter for DenyAllFilter {
    fn decide(&self, _event: &LoggingEvent) -> Decision {
        Decision::Deny
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

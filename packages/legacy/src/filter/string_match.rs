use std::any::Any;

use crate::{Decision, Filter, LoggingEvent};

/// Reacts to events whose message contains a substring.
#[derive(Clone, Debug)]
pub struct StringMatchFilter {
    string_to_match: Option<String>,
    accept_on_match: bool,
}

impl StringMatchFilter {
    pub fn new(string_to_match: Option<String>, accept_on_match: bool) -> Self {
        Self {
            string_to_match,
            accept_on_match,
        }
    }

    pub fn string_to_match(&self) -> Option<&str> {
        self.string_to_match.as_deref()
    }
}

impl Filter for StringMatchFilter {
    fn decide(&self, event: &LoggingEvent) -> Decision {
        let Some(needle) = self.string_to_match.as_deref() else {
            return Decision::Neutral;
        };
        if needle.is_empty() || !event.message.contains(needle) {
            return Decision::Neutral;
        }
        if self.accept_on_match {
            Decision::Accept
        } else {
            Decision::Deny
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

use std::any::Any;

use crate::{Decision, Filter, Level, LoggingEvent};

/// Accepts (or denies) events at exactly one level; NEUTRAL otherwise.
#[derive(Clone, Debug)]
pub struct LevelMatchFilter {
    level_to_match: Option<Level>,
    accept_on_match: bool,
}

impl LevelMatchFilter {
    pub fn new(level_to_match: Option<Level>, accept_on_match: bool) -> Self {
        Self {
            level_to_match,
            accept_on_match,
        }
    }

    pub fn level_to_match(&self) -> Option<Level> {
        self.level_to_match
    }

    pub fn accept_on_match(&self) -> bool {
        self.accept_on_match
    }
}

impl Default for LevelMatchFilter {
    fn default() -> Self {
        Self::new(None, true)
    }
}

impl Filter for LevelMatchFilter {
    fn decide(&self, event: &LoggingEvent) -> Decision {
        match self.level_to_match {
            Some(level) if level == event.level => {
                if self.accept_on_match {
                    Decision::Accept
                } else {
                    Decision::Deny
                }
            }
            _ => Decision::Neutral,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

//! Legacy filters.
//!
//! A legacy filter answers with a [`Decision`] carrying the historical
//! integer values: DENY is -1, NEUTRAL is 0 and ACCEPT is 1.

use std::any::Any;
use std::fmt;

use crate::LoggingEvent;

mod deny_all;
mod level_match;
mod string_match;

pub use deny_all::DenyAllFilter;
pub use level_match::LevelMatchFilter;
pub use string_match::StringMatchFilter;

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Decision {
    Deny = -1,
    Neutral = 0,
    Accept = 1,
}

impl Decision {
    pub fn to_int(self) -> i32 {
        self as i32
    }

    pub fn from_int(value: i32) -> Option<Decision> {
        match value {
            -1 => Some(Decision::Deny),
            0 => Some(Decision::Neutral),
            1 => Some(Decision::Accept),
            _ => None,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Deny => write!(f, "DENY"),
            Decision::Neutral => write!(f, "NEUTRAL"),
            Decision::Accept => write!(f, "ACCEPT"),
        }
    }
}

/// A legacy per-event filter.
pub trait Filter: Send + Sync {
    fn decide(&self, event: &LoggingEvent) -> Decision;

    /// Called once after all options have been set.
    fn activate_options(&self) {}

    /// Access to the concrete type, for diagnostics and tests.
    fn as_any(&self) -> &dyn Any;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_integers() {
        assert_eq!(Decision::Deny.to_int(), -1);
        assert_eq!(Decision::from_int(1), Some(Decision::Accept));
        assert_eq!(Decision::from_int(2), None);
    }
}

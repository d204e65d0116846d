//! Engine log levels.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Severity level of an event as seen by the engine.
///
/// Levels carry an integer weight where a *smaller* number is *more severe*:
/// `OFF` (0) < `FATAL` (100) < ... < `TRACE` (600) < `ALL`. A logger or filter
/// configured at some level lets through every event that is at least as
/// severe, i.e. whose weight is less than or equal to its own.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Off,
    Fatal,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
    All,
}

/// A level name that does not match any known level.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown level '{0}'")]
pub struct ParseLevelError(pub String);

impl Level {
    pub const VALUES: [Level; 8] = [
        Level::Off,
        Level::Fatal,
        Level::Error,
        Level::Warn,
        Level::Info,
        Level::Debug,
        Level::Trace,
        Level::All,
    ];

    pub fn int_level(self) -> i32 {
        match self {
            Level::Off => 0,
            Level::Fatal => 100,
            Level::Error => 200,
            Level::Warn => 300,
            Level::Info => 400,
            Level::Debug => 500,
            Level::Trace => 600,
            Level::All => i32::MAX,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Level::Off => "OFF",
            Level::Fatal => "FATAL",
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
            Level::All => "ALL",
        }
    }

    /// True when `self` is at least as severe as `other`.
    ///
    /// `Level::Error.is_more_specific_than(Level::Warn)` is true.
    pub fn is_more_specific_than(self, other: Level) -> bool {
        self.int_level() <= other.int_level()
    }

    /// True when `self` is at most as severe as `other`.
    pub fn is_less_specific_than(self, other: Level) -> bool {
        self.int_level() >= other.int_level()
    }

    /// True when `self` lies between `most_severe` and `least_severe`, inclusive.
    pub fn is_in_range(self, most_severe: Level, least_severe: Level) -> bool {
        self.int_level() >= most_severe.int_level() && self.int_level() <= least_severe.int_level()
    }

    /// Case-insensitive lookup by name.
    pub fn lookup(name: &str) -> Option<Level> {
        let name = name.trim();
        Level::VALUES
            .iter()
            .copied()
            .find(|level| level.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::lookup(s).ok_or_else(|| ParseLevelError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn specificity_follows_weight() {
        assert!(Level::Error.is_more_specific_than(Level::Warn));
        assert!(Level::Warn.is_more_specific_than(Level::Warn));
        assert!(!Level::Debug.is_more_specific_than(Level::Info));
        assert!(Level::Trace.is_less_specific_than(Level::Debug));
    }

    #[test]
    fn range_is_inclusive() {
        assert!(Level::Info.is_in_range(Level::Fatal, Level::Info));
        assert!(Level::Fatal.is_in_range(Level::Fatal, Level::Info));
        assert!(!Level::Debug.is_in_range(Level::Fatal, Level::Info));
        assert!(Level::Trace.is_in_range(Level::Off, Level::All));
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(Level::lookup("debug"), Some(Level::Debug));
        assert_eq!(Level::lookup(" Warn "), Some(Level::Warn));
        assert_eq!(Level::lookup("verbose"), None);
        assert_eq!(
            "nope".parse::<Level>(),
            Err(ParseLevelError("nope".to_string()))
        );
    }
}

use std::cmp::Ordering;
use std::fmt;

/// Legacy priority level.
///
/// Ordering follows the legacy integer weights, where a larger weight is
/// more severe: `ALL < TRACE < DEBUG < INFO < WARN < ERROR < FATAL < OFF`.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
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

    pub fn to_int(self) -> i32 {
        match self {
            Level::Off => i32::MAX,
            Level::Fatal => 50_000,
            Level::Error => 40_000,
            Level::Warn => 30_000,
            Level::Info => 20_000,
            Level::Debug => 10_000,
            Level::Trace => 5_000,
            Level::All => i32::MIN,
        }
    }

    /// Syslog severity code historically paired with this level.
    pub fn syslog_equivalent(self) -> i32 {
        match self {
            Level::Off | Level::Fatal => 0,
            Level::Error => 3,
            Level::Warn => 4,
            Level::Info => 6,
            Level::Debug | Level::Trace | Level::All => 7,
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

    pub fn is_greater_or_equal(self, other: Level) -> bool {
        self.to_int() >= other.to_int()
    }

    /// Case-insensitive lookup, falling back to `default` for unknown names.
    pub fn to_level(name: &str, default: Level) -> Level {
        Level::parse(name).unwrap_or(default)
    }

    pub fn parse(name: &str) -> Option<Level> {
        let name = name.trim();
        Level::VALUES
            .iter()
            .copied()
            .find(|level| level.name().eq_ignore_ascii_case(name))
    }
}

impl PartialOrd for Level {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Level {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_int().cmp(&other.to_int())
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

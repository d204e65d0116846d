use std::fmt;

use serde::Serialize;

use crate::Level;

/// Syslog severity, RFC 5424 section 6.2.1.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// System is unusable.
    Emerg,
    /// Action must be taken immediately.
    Alert,
    /// Critical conditions.
    Critical,
    /// Error conditions.
    Error,
    /// Warning conditions.
    Warning,
    /// Normal but significant condition.
    Notice,
    /// Informational messages.
    Info,
    /// Debug-level messages.
    Debug,
}

impl Severity {
    pub const VALUES: [Severity; 8] = [
        Severity::Emerg,
        Severity::Alert,
        Severity::Critical,
        Severity::Error,
        Severity::Warning,
        Severity::Notice,
        Severity::Info,
        Severity::Debug,
    ];

    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn name(self) -> &'static str {
        match self {
            Severity::Emerg => "EMERG",
            Severity::Alert => "ALERT",
            Severity::Critical => "CRITICAL",
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
            Severity::Notice => "NOTICE",
            Severity::Info => "INFO",
            Severity::Debug => "DEBUG",
        }
    }

    /// Severity used on the wire for an engine level.
    pub fn from_level(level: Level) -> Severity {
        match level {
            Level::Off => Severity::Emerg,
            Level::Fatal => Severity::Alert,
            Level::Error => Severity::Error,
            Level::Warn => Severity::Warning,
            Level::Info => Severity::Info,
            Level::Debug | Level::Trace | Level::All => Severity::Debug,
        }
    }

    pub fn from_code(code: i32) -> Option<Severity> {
        usize::try_from(code)
            .ok()
            .and_then(|i| Severity::VALUES.get(i).copied())
    }

    /// Case-insensitive lookup by name.
    pub fn lookup(name: &str) -> Option<Severity> {
        Severity::VALUES
            .iter()
            .copied()
            .find(|severity| severity.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_mapping() {
        assert_eq!(Severity::from_level(Level::Fatal), Severity::Alert);
        assert_eq!(Severity::from_level(Level::Warn).code(), 4);
        assert_eq!(Severity::from_level(Level::Info).code(), 6);
        assert_eq!(Severity::from_level(Level::Trace), Severity::Debug);
    }

    #[test]
    fn codes_round_trip() {
        for severity in Severity::VALUES {
            assert_eq!(Severity::from_code(severity.code()), Some(severity));
        }
        assert_eq!(Severity::from_code(8), None);
        assert_eq!(Severity::from_code(-1), None);
        assert_eq!(Severity::lookup("warning"), Some(Severity::Warning));
    }
}

//! Error types for the adapter layer.

use std::fmt;

/// Errors that can occur when a legacy component runs behind an engine contract.
#[derive(Debug)]
pub enum Error {
    /// Error from a legacy component.
    Legacy(logbridge_legacy::Error),
    /// Error from the engine.
    Core(logbridge_core::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Legacy(e) => write!(f, "legacy component error: {}", e),
            Error::Core(e) => write!(f, "engine error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Legacy(e) => Some(e),
            Error::Core(e) => Some(e),
        }
    }
}

impl From<logbridge_legacy::Error> for Error {
    fn from(e: logbridge_legacy::Error) -> Self {
        Error::Legacy(e)
    }
}

impl From<logbridge_core::Error> for Error {
    fn from(e: logbridge_core::Error) -> Self {
        Error::Core(e)
    }
}

// Conversions to the engine error type for trait implementations

impl From<Error> for logbridge_core::Error {
    fn from(e: Error) -> Self {
        match e {
            Error::Core(e) => e,
            Error::Legacy(logbridge_legacy::Error::Open {
                appender, source, ..
            }) => logbridge_core::Error::Io {
                name: appender,
                source,
            },
            Error::Legacy(logbridge_legacy::Error::Connect {
                appender, source, ..
            }) => logbridge_core::Error::Io {
                name: appender,
                source,
            },
            Error::Legacy(logbridge_legacy::Error::InvalidOption { appender, message }) => {
                logbridge_core::Error::Start {
                    name: appender,
                    message,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn open_failure_becomes_io() {
        let legacy = logbridge_legacy::Error::Open {
            appender: "FILE".to_string(),
            path: "/nope/app.log".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let core: logbridge_core::Error = Error::from(legacy).into();
        match core {
            logbridge_core::Error::Io { name, .. } => assert_eq!(name, "FILE"),
            other => panic!("expected Io, got {:?}", other),
        }
    }

    #[test]
    fn invalid_option_becomes_start() {
        let legacy = logbridge_legacy::Error::InvalidOption {
            appender: "SYSLOG".to_string(),
            message: "SyslogHost is not set".to_string(),
        };
        let core: logbridge_core::Error = Error::from(legacy).into();
        assert!(core.to_string().contains("SyslogHost"));
    }

    #[test]
    fn source_is_preserved() {
        let e = Error::Core(logbridge_core::Error::Other {
            message: "x".to_string(),
        });
        assert!(e.source().is_some());
        assert!(e.to_string().starts_with("engine error"));
    }
}

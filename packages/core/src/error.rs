//! Error types for the engine layer.

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A component failed to start.
    #[error("failed to start '{name}': {message}")]
    Start { name: String, message: String },

    /// I/O failure inside a component.
    #[error("i/o error in '{name}': {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic error with message.
    #[error("{message}")]
    Other { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn start_error_display() {
        let e = Error::Start {
            name: "CONSOLE".to_string(),
            message: "no layout".to_string(),
        };
        let display = format!("{}", e);
        assert!(display.contains("CONSOLE"));
        assert!(display.contains("no layout"));
    }

    #[test]
    fn io_error_has_source() {
        let e = Error::Io {
            name: "FILE".to_string(),
            source: std::io::Error::other("disk full"),
        };
        assert!(StdError::source(&e).is_some());
        assert!(format!("{}", e).contains("disk full"));
    }
}

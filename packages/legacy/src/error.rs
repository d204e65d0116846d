use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("appender '{appender}' cannot open {}: {source}", path.display())]
    Open {
        appender: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("appender '{appender}' cannot reach {address}: {source}")]
    Connect {
        appender: String,
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("appender '{appender}' has an invalid option: {message}")]
    InvalidOption { appender: String, message: String },
}

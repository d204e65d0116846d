use std::path::PathBuf;

/// A configuration source that cannot be used at all.
///
/// These abort the load; nothing is assembled.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("cannot read configuration {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration source is empty")]
    Empty,

    #[error("malformed properties at line {line}: {message}")]
    Parse { line: usize, message: String },
}

/// A declared component that could not be built from its properties.
#[derive(thiserror::Error, Debug)]
pub enum InstantiationError {
    #[error("'{component}' requires property {property}")]
    MissingProperty { component: String, property: String },

    #[error("'{component}' has invalid {property} '{value}': {message}")]
    InvalidProperty {
        component: String,
        property: String,
        value: String,
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_names_line() {
        let e = ConfigError::Parse {
            line: 7,
            message: "bad escape".to_string(),
        };
        assert_eq!(e.to_string(), "malformed properties at line 7: bad escape");
    }

    #[test]
    fn invalid_property_display() {
        let e = InstantiationError::InvalidProperty {
            component: "R".to_string(),
            property: "MaxFileSize".to_string(),
            value: "huge".to_string(),
            message: "not a size".to_string(),
        };
        let display = e.to_string();
        assert!(display.contains("MaxFileSize"));
        assert!(display.contains("huge"));
    }
}

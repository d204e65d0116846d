use std::fmt;

use serde::Serialize;

/// What went wrong with one part of a configuration.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A type name with no registered builder.
    UnknownType,
    /// A builder rejected the component's properties.
    Instantiation,
    /// A name that refers to nothing that was built.
    UnresolvedReference,
    /// A section missing a required key, such as a filter with no type.
    MalformedSection,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiagnosticKind::UnknownType => "unknown type",
            DiagnosticKind::Instantiation => "instantiation failed",
            DiagnosticKind::UnresolvedReference => "unresolved reference",
            DiagnosticKind::MalformedSection => "malformed section",
        };
        f.write_str(name)
    }
}

/// A non-fatal problem found while loading a configuration.
///
/// The component it names was left out; everything else still loads.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub component: String,
    pub message: String,
}

impl Diagnostic {
    /// Create a diagnostic and log it.
    pub fn new(kind: DiagnosticKind, component: impl Into<String>, message: impl Into<String>) -> Self {
        let diagnostic = Self {
            kind,
            component: component.into(),
            message: message.into(),
        };
        log::warn!("{}", diagnostic);
        diagnostic
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.kind, self.component, self.message)
    }
}

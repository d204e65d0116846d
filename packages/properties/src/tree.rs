//! The translated, not yet instantiated, configuration.

use std::collections::BTreeMap;

use logbridge_core::{Level, ROOT_LOGGER_NAME};
use serde::Serialize;

use crate::Diagnostic;

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Appender,
    Filter,
    Layout,
}

/// One declared component: its type name and the properties scoped to it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ComponentSpec {
    pub kind: ComponentKind,
    pub name: String,
    pub type_name: String,
    /// Assignments in declaration order, values already substituted.
    pub properties: Vec<(String, String)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<Box<ComponentSpec>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<ComponentSpec>,
}

impl ComponentSpec {
    pub fn new(kind: ComponentKind, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            type_name: type_name.into(),
            properties: Vec::new(),
            layout: None,
            filters: Vec::new(),
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.push((name.into(), value.into()));
        self
    }

    /// Property value by case-insensitive name; the last assignment wins.
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .rev()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A logger's declared level, additivity and appender references.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoggerSpec {
    pub name: String,
    /// `None` inherits from the nearest configured ancestor.
    pub level: Option<Level>,
    pub additive: bool,
    pub appender_refs: Vec<String>,
}

impl LoggerSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: None,
            additive: true,
            appender_refs: Vec::new(),
        }
    }

    pub fn root() -> Self {
        Self::new(ROOT_LOGGER_NAME).with_level(Some(Level::Debug))
    }

    pub fn with_level(mut self, level: Option<Level>) -> Self {
        self.level = level;
        self
    }
}

/// Everything a properties source declares, resolved by name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ConfigurationTree {
    pub root: LoggerSpec,
    pub loggers: BTreeMap<String, LoggerSpec>,
    pub appenders: BTreeMap<String, ComponentSpec>,
    pub threshold: Option<Level>,
    pub debug: bool,
}

impl Default for ConfigurationTree {
    fn default() -> Self {
        Self {
            root: LoggerSpec::root(),
            loggers: BTreeMap::new(),
            appenders: BTreeMap::new(),
            threshold: None,
            debug: false,
        }
    }
}

impl ConfigurationTree {
    pub fn appender(&self, name: &str) -> Option<&ComponentSpec> {
        self.appenders.get(name)
    }

    pub fn logger(&self, name: &str) -> Option<&LoggerSpec> {
        self.loggers.get(name)
    }

    /// Root first, then named loggers by name.
    pub fn all_loggers(&self) -> impl Iterator<Item = &LoggerSpec> {
        std::iter::once(&self.root).chain(self.loggers.values())
    }
}

/// Output of the translator: the tree plus what it had to leave out.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Translation {
    pub tree: ConfigurationTree,
    pub diagnostics: Vec<Diagnostic>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn property_lookup_ignores_case() {
        let spec = ComponentSpec::new(ComponentKind::Appender, "A1", "org.apache.log4j.FileAppender")
            .with_property("File", "a.log")
            .with_property("file", "b.log");
        assert_eq!(spec.property("FILE"), Some("b.log"));
        assert_eq!(spec.property("Append"), None);
    }

    #[test]
    fn root_defaults_to_debug() {
        let tree = ConfigurationTree::default();
        assert_eq!(tree.root.level, Some(Level::Debug));
        assert_eq!(tree.all_loggers().count(), 1);
    }

    #[test]
    fn serializes_for_inspection() {
        let mut tree = ConfigurationTree::default();
        tree.appenders.insert(
            "A1".to_string(),
            ComponentSpec::new(ComponentKind::Appender, "A1", "org.apache.log4j.varia.NullAppender"),
        );
        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(json["root"]["level"], "DEBUG");
        assert_eq!(json["appenders"]["A1"]["kind"], "appender");
        assert!(json["appenders"]["A1"].get("layout").is_none());
    }
}

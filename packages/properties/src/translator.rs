//! Turns flat `log4j.*` properties into a [`ConfigurationTree`].
//!
//! Keys are partitioned by prefix:
//!
//! | prefix | meaning |
//! |---|---|
//! | `log4j.rootLogger`, `log4j.rootCategory` | root level and appenders |
//! | `log4j.logger.<name>`, `log4j.category.<name>` | named logger |
//! | `log4j.additivity.<name>` | additivity of a named logger |
//! | `log4j.appender.<name>[.<property>]` | appender declaration and properties |
//! | `log4j.threshold`, `log4j.debug`, `log4j.reset` | globals |
//!
//! Under an appender, `layout` and `layout.*` describe its layout and
//! `filter.<id>` and `filter.<id>.*` its filter chain. Every other key is only
//! available as a `${name}` source.

use std::collections::{BTreeMap, HashSet};

use logbridge_core::Level;

use crate::subst::{substitute, Lookup};
use crate::tree::{ComponentKind, ComponentSpec, ConfigurationTree, LoggerSpec, Translation};
use crate::{ConfigError, Diagnostic, DiagnosticKind, Properties};

const ROOT_LOGGER_KEY: &str = "log4j.rootLogger";
const ROOT_CATEGORY_KEY: &str = "log4j.rootCategory";
const LOGGER_PREFIX: &str = "log4j.logger.";
const CATEGORY_PREFIX: &str = "log4j.category.";
const ADDITIVITY_PREFIX: &str = "log4j.additivity.";
const APPENDER_PREFIX: &str = "log4j.appender.";
const THRESHOLD_KEY: &str = "log4j.threshold";
const DEBUG_KEY: &str = "log4j.debug";
const RESET_KEY: &str = "log4j.reset";

/// Level tokens that mean "inherit from the parent".
const INHERITED: [&str; 2] = ["INHERITED", "NULL"];

/// Translate `properties`, resolving `${name}` from `lookup` first and from
/// the properties themselves second.
///
/// Only an empty source is an error; every other problem becomes a
/// diagnostic and the affected part is left out.
pub fn translate(properties: &Properties, lookup: &dyn Lookup) -> Result<Translation, ConfigError> {
    if properties.is_empty() {
        return Err(ConfigError::Empty);
    }
    Ok(Translator::new(properties, lookup).run())
}

struct Translator<'a> {
    properties: &'a Properties,
    lookup: &'a dyn Lookup,
    tree: ConfigurationTree,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Translator<'a> {
    fn new(properties: &'a Properties, lookup: &'a dyn Lookup) -> Self {
        Self {
            properties,
            lookup,
            tree: ConfigurationTree::default(),
            diagnostics: Vec::new(),
        }
    }

    fn run(mut self) -> Translation {
        self.globals();
        self.root();
        self.loggers();
        self.appenders();
        self.check_references();
        log::debug!(
            "Translated {} appenders and {} loggers with {} diagnostics",
            self.tree.appenders.len(),
            self.tree.loggers.len(),
            self.diagnostics.len()
        );
        Translation {
            tree: self.tree,
            diagnostics: self.diagnostics,
        }
    }

    fn value(&self, raw: &str) -> String {
        let lookup = self.lookup.or(self.properties);
        substitute(raw, &lookup).trim().to_string()
    }

    fn get(&self, key: &str) -> Option<String> {
        self.properties.get(key).map(|raw| self.value(raw))
    }

    fn report(&mut self, kind: DiagnosticKind, component: impl Into<String>, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::new(kind, component, message));
    }

    fn level(&mut self, component: &str, token: &str) -> Option<Level> {
        if token.is_empty() || INHERITED.iter().any(|i| i.eq_ignore_ascii_case(token)) {
            return None;
        }
        match Level::lookup(token) {
            Some(level) => Some(level),
            None => {
                self.report(
                    DiagnosticKind::MalformedSection,
                    component,
                    format!("unknown level '{}', using DEBUG", token),
                );
                Some(Level::Debug)
            }
        }
    }

    fn globals(&mut self) {
        if let Some(value) = self.get(THRESHOLD_KEY) {
            self.tree.threshold = self.level(THRESHOLD_KEY, &value);
        }
        self.tree.debug = self.get(DEBUG_KEY).is_some_and(|v| v.eq_ignore_ascii_case("true"));
        if self.get(RESET_KEY).is_some() {
            log::debug!("Ignoring {}: every load builds a fresh configuration", RESET_KEY);
        }
    }

    /// Parse `LEVEL, appender1, appender2` into `spec`.
    fn logger_value(&mut self, spec: &mut LoggerSpec, value: &str) {
        let mut tokens = value.split(',').map(str::trim);
        let level_token = tokens.next().unwrap_or("");
        let component = if spec.name.is_empty() {
            ROOT_LOGGER_KEY.to_string()
        } else {
            spec.name.clone()
        };
        spec.level = self.level(&component, level_token);
        for appender in tokens.filter(|t| !t.is_empty()) {
            if !spec.appender_refs.iter().any(|r| r == appender) {
                spec.appender_refs.push(appender.to_string());
            }
        }
    }

    fn root(&mut self) {
        let value = self
            .get(ROOT_LOGGER_KEY)
            .or_else(|| self.get(ROOT_CATEGORY_KEY));
        let Some(value) = value else {
            log::debug!("No root logger declared; root stays at DEBUG");
            return;
        };
        let mut root = LoggerSpec::root();
        self.logger_value(&mut root, &value);
        // The root always has a level
        root.level = root.level.or(Some(Level::Debug));
        self.tree.root = root;
    }

    fn loggers(&mut self) {
        let properties = self.properties;
        let mut loggers = BTreeMap::new();
        for (key, raw) in properties.iter() {
            let name = key
                .strip_prefix(LOGGER_PREFIX)
                .or_else(|| key.strip_prefix(CATEGORY_PREFIX));
            let Some(name) = name.filter(|n| !n.is_empty()) else {
                continue;
            };
            let value = self.value(raw);
            let mut spec = LoggerSpec::new(name);
            self.logger_value(&mut spec, &value);
            loggers.insert(name.to_string(), spec);
        }

        for (key, raw) in properties.iter() {
            let Some(name) = key.strip_prefix(ADDITIVITY_PREFIX).filter(|n| !n.is_empty()) else {
                continue;
            };
            let additive = !self.value(raw).eq_ignore_ascii_case("false");
            loggers
                .entry(name.to_string())
                .or_insert_with(|| LoggerSpec::new(name))
                .additive = additive;
        }
        self.tree.loggers = loggers;
    }

    /// Names declared directly under `log4j.appender.`.
    ///
    /// A name may contain dots only if some logger refers to it by that name.
    fn appender_names(&self) -> Vec<String> {
        let referenced: HashSet<&str> = self
            .tree
            .all_loggers()
            .flat_map(|l| l.appender_refs.iter().map(String::as_str))
            .collect();
        self.properties
            .iter()
            .filter_map(|(key, _)| key.strip_prefix(APPENDER_PREFIX))
            .filter(|rest| !rest.is_empty() && (!rest.contains('.') || referenced.contains(rest)))
            .map(str::to_string)
            .collect()
    }

    fn appenders(&mut self) {
        let properties = self.properties;
        let mut names = self.appender_names();
        // Longer names first so `a.b` keeps its own keys when `a` is also declared
        names.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        let mut claimed: HashSet<String> = names
            .iter()
            .map(|name| format!("{}{}", APPENDER_PREFIX, name))
            .collect();

        for name in &names {
            let declaration = format!("{}{}", APPENDER_PREFIX, name);
            let type_name = self.get(&declaration).unwrap_or_default();

            let scope = format!("{}.", declaration);
            let mut scoped = Vec::new();
            for (key, raw) in properties.iter() {
                let Some(property) = key.strip_prefix(&scope) else {
                    continue;
                };
                if claimed.insert(key.to_string()) {
                    scoped.push((property.to_string(), self.value(raw)));
                }
            }

            if type_name.is_empty() {
                self.report(
                    DiagnosticKind::MalformedSection,
                    name.as_str(),
                    format!("{} has no type", declaration),
                );
                continue;
            }
            let spec = self.appender_spec(name, type_name, scoped);
            self.tree.appenders.insert(name.clone(), spec);
        }

        for (key, _) in properties.iter() {
            if key.starts_with(APPENDER_PREFIX) && !claimed.contains(key) {
                self.report(
                    DiagnosticKind::UnresolvedReference,
                    key,
                    "property belongs to no declared appender",
                );
            }
        }
    }

    fn appender_spec(
        &mut self,
        name: &str,
        type_name: String,
        scoped: Vec<(String, String)>,
    ) -> ComponentSpec {
        let mut spec = ComponentSpec::new(ComponentKind::Appender, name, type_name);
        let mut layout_type: Option<String> = None;
        let mut layout_properties = Vec::new();
        let mut filters: BTreeMap<FilterId, (Option<String>, Vec<(String, String)>)> =
            BTreeMap::new();

        for (property, value) in scoped {
            if property == "layout" {
                layout_type = Some(value);
            } else if let Some(layout_property) = property.strip_prefix("layout.") {
                layout_properties.push((layout_property.to_string(), value));
            } else if let Some(rest) = property.strip_prefix("filter.") {
                let (id, filter_property) = match rest.split_once('.') {
                    Some((id, p)) => (id, Some(p)),
                    None => (rest, None),
                };
                let entry = filters.entry(FilterId::new(id)).or_default();
                match filter_property {
                    None => entry.0 = Some(value),
                    Some(p) => entry.1.push((p.to_string(), value)),
                }
            } else if property.to_ascii_lowercase().starts_with("errorhandler") {
                log::debug!("Ignoring error handler setting {} on appender {}", property, name);
            } else {
                spec.properties.push((property, value));
            }
        }

        match layout_type.filter(|t| !t.is_empty()) {
            Some(type_name) => {
                let mut layout =
                    ComponentSpec::new(ComponentKind::Layout, format!("{}.layout", name), type_name);
                layout.properties = layout_properties;
                spec.layout = Some(Box::new(layout));
            }
            None if !layout_properties.is_empty() => self.report(
                DiagnosticKind::MalformedSection,
                format!("{}.layout", name),
                "layout properties without a layout type",
            ),
            None => {}
        }

        for (id, (filter_type, properties)) in filters {
            let filter_name = format!("{}.filter.{}", name, id.raw);
            match filter_type.filter(|t| !t.is_empty()) {
                Some(type_name) => {
                    let mut filter = ComponentSpec::new(ComponentKind::Filter, filter_name, type_name);
                    filter.properties = properties;
                    spec.filters.push(filter);
                }
                None => self.report(
                    DiagnosticKind::MalformedSection,
                    filter_name,
                    "filter section has no type; appender keeps its other filters",
                ),
            }
        }
        spec
    }

    fn check_references(&mut self) {
        let declared: HashSet<String> = self.tree.appenders.keys().cloned().collect();
        let mut missing = Vec::new();

        let loggers = std::iter::once(&mut self.tree.root).chain(self.tree.loggers.values_mut());
        for logger in loggers {
            logger.appender_refs.retain(|name| {
                let found = declared.contains(name);
                if !found {
                    missing.push((logger.name.clone(), name.clone()));
                }
                found
            });
        }

        for (logger, appender) in missing {
            let component = if logger.is_empty() {
                ROOT_LOGGER_KEY.to_string()
            } else {
                logger
            };
            self.report(
                DiagnosticKind::UnresolvedReference,
                component,
                format!("appender '{}' is not declared", appender),
            );
        }
    }
}

/// Filter ordering: numeric ids in numeric order, then the rest by name.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct FilterId {
    non_numeric: bool,
    number: u64,
    raw: String,
}

impl FilterId {
    fn new(raw: &str) -> Self {
        let number = raw.parse::<u64>().ok();
        Self {
            non_numeric: number.is_none(),
            number: number.unwrap_or(0),
            raw: raw.to_string(),
        }
    }
}

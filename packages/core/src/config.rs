//! The installed configuration: appenders by name plus the logger hierarchy.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;

use crate::{Appender, Level, LogEvent};

/// Name under which the root logger is addressed.
pub const ROOT_LOGGER_NAME: &str = "";

/// Level used when not even the root logger declares one.
const DEFAULT_ROOT_LEVEL: Level = Level::Error;

/// Settings for one node in the logger hierarchy.
///
/// An unset `level` is inherited from the nearest ancestor that has one; the
/// lookup happens when events are logged, never ahead of time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoggerConfig {
    pub name: String,
    pub level: Option<Level>,
    pub additive: bool,
    pub appender_refs: Vec<String>,
}

impl LoggerConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: None,
            additive: true,
            appender_refs: Vec::new(),
        }
    }

    pub fn root() -> Self {
        Self::new(ROOT_LOGGER_NAME)
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    pub fn with_additive(mut self, additive: bool) -> Self {
        self.additive = additive;
        self
    }

    /// Add an appender reference; duplicates are ignored.
    pub fn add_appender_ref(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.appender_refs.contains(&name) {
            self.appender_refs.push(name);
        }
    }

    pub fn is_root(&self) -> bool {
        self.name == ROOT_LOGGER_NAME
    }
}

/// An assembled, installable configuration.
///
/// A configuration is built once and never edited after it has been handed
/// to a [`LoggerContext`](crate::LoggerContext); reconfiguration builds a new
/// one. Appenders are registered under unique names: registering a second
/// appender under an existing name replaces the first.
pub struct Configuration {
    name: String,
    root: LoggerConfig,
    loggers: BTreeMap<String, LoggerConfig>,
    appenders: BTreeMap<String, Arc<dyn Appender>>,
    threshold: Option<Level>,
    started: AtomicBool,
}

impl Configuration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            root: LoggerConfig::root(),
            loggers: BTreeMap::new(),
            appenders: BTreeMap::new(),
            threshold: None,
            started: AtomicBool::new(false),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register an appender under its own name, returning the one it replaced.
    pub fn add_appender(&mut self, appender: Arc<dyn Appender>) -> Option<Arc<dyn Appender>> {
        self.appenders.insert(appender.name().to_string(), appender)
    }

    pub fn get_appender(&self, name: &str) -> Option<&Arc<dyn Appender>> {
        self.appenders.get(name)
    }

    pub fn appenders(&self) -> &BTreeMap<String, Arc<dyn Appender>> {
        &self.appenders
    }

    pub fn root(&self) -> &LoggerConfig {
        &self.root
    }

    pub fn set_root(&mut self, mut root: LoggerConfig) {
        root.name = ROOT_LOGGER_NAME.to_string();
        self.root = root;
    }

    /// Add or replace a named logger. A root-named config replaces the root.
    pub fn add_logger(&mut self, logger: LoggerConfig) {
        if logger.is_root() {
            self.set_root(logger);
        } else {
            self.loggers.insert(logger.name.clone(), logger);
        }
    }

    /// The logger declared under exactly `name`.
    pub fn logger(&self, name: &str) -> Option<&LoggerConfig> {
        if name == ROOT_LOGGER_NAME {
            Some(&self.root)
        } else {
            self.loggers.get(name)
        }
    }

    pub fn loggers(&self) -> &BTreeMap<String, LoggerConfig> {
        &self.loggers
    }

    /// The nearest declared logger for `name`, walking up dotted ancestors.
    pub fn logger_config(&self, name: &str) -> &LoggerConfig {
        let mut current = name;
        loop {
            if let Some(config) = self.logger(current) {
                return config;
            }
            match parent_name(current) {
                Some(parent) => current = parent,
                None => return &self.root,
            }
        }
    }

    /// Level in effect for `name`, inherited from ancestors when unset.
    pub fn effective_level(&self, name: &str) -> Level {
        let mut config = self.logger_config(name);
        loop {
            if let Some(level) = config.level {
                return level;
            }
            match self.parent_config(config) {
                Some(parent) => config = parent,
                None => return DEFAULT_ROOT_LEVEL,
            }
        }
    }

    pub fn threshold(&self) -> Option<Level> {
        self.threshold
    }

    /// Configuration-wide minimum severity, checked before any logger.
    pub fn set_threshold(&mut self, threshold: Option<Level>) {
        self.threshold = threshold;
    }

    pub fn is_enabled(&self, logger_name: &str, level: Level) -> bool {
        if let Some(threshold) = self.threshold {
            if !level.is_more_specific_than(threshold) {
                return false;
            }
        }
        level != Level::Off && level.is_more_specific_than(self.effective_level(logger_name))
    }

    /// Dispatch `event` to every appender reachable from its logger.
    ///
    /// Appenders are collected from the nearest declared logger upwards and
    /// the walk stops at the first non-additive logger.
    pub fn log(&self, event: &LogEvent) {
        if !self.is_enabled(&event.logger_name, event.level) {
            return;
        }

        let mut config = self.logger_config(&event.logger_name);
        loop {
            for name in &config.appender_refs {
                match self.appenders.get(name) {
                    Some(appender) if appender.is_started() => {
                        if !appender.is_filtered(event) {
                            appender.append(event);
                        }
                    }
                    Some(_) => log::debug!("Skipping stopped appender {}", name),
                    None => log::debug!("Logger '{}' references unknown appender {}", config.name, name),
                }
            }
            if !config.additive {
                break;
            }
            match self.parent_config(config) {
                Some(parent) => config = parent,
                None => break,
            }
        }
    }

    /// Start every appender. Calling this more than once has no effect.
    pub fn start(&self) {
        if self.started.swap(true, Ordering::SeqCst) {
            return;
        }
        for (name, appender) in &self.appenders {
            if let Err(e) = appender.start() {
                log::warn!("Appender {} failed to start: {}", name, e);
            }
        }
    }

    /// Stop every appender, releasing their handles.
    pub fn stop(&self) {
        if !self.started.swap(false, Ordering::SeqCst) {
            return;
        }
        for appender in self.appenders.values() {
            appender.stop();
        }
    }

    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }

    fn parent_config(&self, config: &LoggerConfig) -> Option<&LoggerConfig> {
        if config.is_root() {
            return None;
        }
        Some(match parent_name(&config.name) {
            Some(parent) => self.logger_config(parent),
            None => &self.root,
        })
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("name", &self.name)
            .field("root", &self.root)
            .field("loggers", &self.loggers)
            .field("appenders", &self.appenders.keys().collect::<Vec<_>>())
            .field("threshold", &self.threshold)
            .finish()
    }
}

fn parent_name(name: &str) -> Option<&str> {
    name.rfind('.').map(|i| &name[..i])
}

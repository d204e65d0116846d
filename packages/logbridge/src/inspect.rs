//! Offline inspection of a properties configuration.
//!
//! Everything here assembles a configuration without starting it, so no
//! file is opened and no socket is connected.

use std::fmt;
use std::path::Path;

use logbridge_core::net::{priority, Facility, Severity};
use logbridge_core::Appender as _;
use logbridge_legacy_adapter::AppenderAdapter;
use logbridge_properties::{
    ComponentRegistry, ConfigError, ConfigurationTree, Diagnostic, Lookup, PropertiesConfiguration,
};
use serde::Serialize;

/// An appender that made it into the assembled configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AppenderSummary {
    pub name: String,
    pub type_name: String,
    pub filtered: bool,
}

/// What a configuration file turns into.
#[derive(Clone, Debug, Serialize)]
pub struct Report {
    pub source: String,
    pub tree: ConfigurationTree,
    pub appenders: Vec<AppenderSummary>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Report {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Translate and assemble `path` without starting anything.
pub fn inspect(
    path: impl AsRef<Path>,
    registry: &ComponentRegistry,
    lookup: &dyn Lookup,
) -> Result<Report, ConfigError> {
    let path = path.as_ref();
    let mut config = PropertiesConfiguration::load(path, lookup, registry)?;
    config.initialize();

    let tree = config.tree().clone();
    let appenders = config
        .configuration()
        .appenders()
        .iter()
        .map(|(name, appender)| AppenderSummary {
            name: name.clone(),
            type_name: tree
                .appender(name)
                .map(|spec| spec.type_name.clone())
                .unwrap_or_default(),
            filtered: appender.filter().is_some(),
        })
        .collect();

    // Per-appender detail for verbose runs
    for (name, appender) in config.configuration().appenders() {
        if let Some(adapter) = appender.as_any().downcast_ref::<AppenderAdapter>() {
            log::debug!("{} -> {:?}", name, adapter);
        }
    }

    Ok(Report {
        source: path.display().to_string(),
        tree,
        appenders,
        diagnostics: config.diagnostics().to_vec(),
    })
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.source)?;
        let root_level = self
            .tree
            .root
            .level
            .map_or_else(|| "inherited".to_string(), |level| level.to_string());
        writeln!(
            f,
            "  root: {} -> [{}]",
            root_level,
            self.tree.root.appender_refs.join(", ")
        )?;
        for logger in self.tree.loggers.values() {
            let level = logger
                .level
                .map_or_else(|| "inherited".to_string(), |level| level.to_string());
            write!(f, "  logger {}: {}", logger.name, level)?;
            if !logger.appender_refs.is_empty() {
                write!(f, " -> [{}]", logger.appender_refs.join(", "))?;
            }
            if !logger.additive {
                write!(f, " (not additive)")?;
            }
            writeln!(f)?;
        }
        for appender in &self.appenders {
            write!(f, "  appender {}: {}", appender.name, appender.type_name)?;
            if appender.filtered {
                write!(f, " (filtered)")?;
            }
            writeln!(f)?;
        }
        if let Some(threshold) = self.tree.threshold {
            writeln!(f, "  threshold: {}", threshold)?;
        }
        if self.diagnostics.is_empty() {
            writeln!(f, "no problems found")
        } else {
            writeln!(f, "{} problem(s):", self.diagnostics.len())?;
            for diagnostic in &self.diagnostics {
                writeln!(f, "  {}", diagnostic)?;
            }
            Ok(())
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum PriorityError {
    #[error("unknown syslog facility '{0}'")]
    UnknownFacility(String),

    #[error("unknown syslog severity '{0}'")]
    UnknownSeverity(String),
}

/// The `<PRI>` value for a facility name and a severity name or code.
///
/// ```rust
/// use logbridge::inspect::syslog_priority;
///
/// assert_eq!(syslog_priority("local0", "info"), Ok(134));
/// assert_eq!(syslog_priority("USER", "3"), Ok(11));
/// ```
pub fn syslog_priority(facility: &str, severity: &str) -> Result<i32, PriorityError> {
    let facility = Facility::lookup(Some(facility), None)
        .ok_or_else(|| PriorityError::UnknownFacility(facility.to_string()))?;
    let parsed = match severity.trim().parse::<i32>() {
        Ok(code) => Severity::from_code(code),
        Err(_) => Severity::lookup(severity),
    };
    let severity = parsed.ok_or_else(|| PriorityError::UnknownSeverity(severity.to_string()))?;
    Ok(priority(facility, severity))
}

//! Builds an engine [`Configuration`] from a translated tree.
//!
//! Assembly runs in two phases. The first builds every appender with its
//! layout and filters, skipping any component that cannot be built. The
//! second links loggers to the appenders that exist, dropping references to
//! the ones that do not. Both phases record a [`Diagnostic`] for everything
//! they leave out.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use logbridge_core::{
    Appender as CoreAppender, CompositeFilter, Configuration, Filter as CoreFilter, LoggerConfig,
};
use logbridge_legacy::Layout;
use logbridge_legacy_adapter::{AppenderAdapter, FilterAdapter};

use crate::registry::{BuildContext, ComponentRegistry};
use crate::subst::Lookup;
use crate::translator::translate;
use crate::tree::{ComponentSpec, ConfigurationTree, LoggerSpec, Translation};
use crate::{ConfigError, Diagnostic, DiagnosticKind, Properties};

/// A configuration loaded from legacy properties.
///
/// # Example
///
/// ```rust
/// use logbridge_properties::{ComponentRegistry, MapLookup, Properties, PropertiesConfiguration};
///
/// let properties = Properties::parse(
///     "log4j.rootLogger=INFO, LIST\n\
///      log4j.appender.LIST=org.apache.log4j.ListAppender\n",
/// )
/// .unwrap();
/// let registry = ComponentRegistry::with_defaults();
/// let mut config =
///     PropertiesConfiguration::from_properties("example", &properties, &MapLookup::new(), &registry)
///         .unwrap();
/// config.initialize();
/// assert!(config.configuration().get_appender("LIST").is_some());
/// assert!(config.diagnostics().is_empty());
/// ```
pub struct PropertiesConfiguration<'r> {
    registry: &'r ComponentRegistry,
    tree: ConfigurationTree,
    diagnostics: Vec<Diagnostic>,
    configuration: Configuration,
    initialized: bool,
}

impl<'r> PropertiesConfiguration<'r> {
    pub fn new(name: impl Into<String>, translation: Translation, registry: &'r ComponentRegistry) -> Self {
        Self {
            registry,
            tree: translation.tree,
            diagnostics: translation.diagnostics,
            configuration: Configuration::new(name),
            initialized: false,
        }
    }

    /// Translate `properties` without assembling yet.
    pub fn from_properties(
        name: impl Into<String>,
        properties: &Properties,
        lookup: &dyn Lookup,
        registry: &'r ComponentRegistry,
    ) -> Result<Self, ConfigError> {
        let translation = translate(properties, lookup)?;
        Ok(Self::new(name, translation, registry))
    }

    /// Read and translate a properties file without assembling yet.
    pub fn load(
        path: impl AsRef<Path>,
        lookup: &dyn Lookup,
        registry: &'r ComponentRegistry,
    ) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let properties = Properties::load(path)?;
        Self::from_properties(path.display().to_string(), &properties, lookup, registry)
    }

    /// Build components and link loggers. Calling it again does nothing.
    pub fn initialize(&mut self) {
        if self.initialized {
            log::debug!("Configuration {} is already initialized", self.configuration.name());
            return;
        }
        self.initialized = true;

        let mut built = HashSet::new();
        for spec in self.tree.appenders.values() {
            if let Some(appender) = build_appender(self.registry, spec, &mut self.diagnostics) {
                built.insert(spec.name.clone());
                self.configuration.add_appender(appender);
            }
        }

        let root = logger_config(&self.tree.root, &built, &mut self.diagnostics);
        self.configuration.set_root(root);
        for spec in self.tree.loggers.values() {
            let logger = logger_config(spec, &built, &mut self.diagnostics);
            self.configuration.add_logger(logger);
        }
        self.configuration.set_threshold(self.tree.threshold);

        let summary = format!(
            "Assembled {} with {} appenders, {} loggers and {} diagnostics",
            self.configuration.name(),
            self.configuration.appenders().len(),
            self.configuration.loggers().len(),
            self.diagnostics.len()
        );
        if self.tree.debug {
            log::info!("{}", summary);
        } else {
            log::debug!("{}", summary);
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn tree(&self) -> &ConfigurationTree {
        &self.tree
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Initialize if needed and hand over the configuration.
    pub fn into_parts(mut self) -> (Configuration, Vec<Diagnostic>) {
        self.initialize();
        (self.configuration, self.diagnostics)
    }
}

fn build_layout(
    registry: &ComponentRegistry,
    spec: &ComponentSpec,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<Box<dyn Layout>> {
    let Some(builder) = registry.layout(&spec.type_name) else {
        diagnostics.push(Diagnostic::new(
            DiagnosticKind::UnknownType,
            spec.name.as_str(),
            format!("no layout type named {}", spec.type_name),
        ));
        return None;
    };
    match builder(&mut BuildContext::new(spec)) {
        Ok(layout) => Some(layout),
        Err(err) => {
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::Instantiation,
                spec.name.as_str(),
                err.to_string(),
            ));
            None
        }
    }
}

fn build_filter(
    registry: &ComponentRegistry,
    spec: &ComponentSpec,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<Arc<dyn CoreFilter>> {
    let Some(builder) = registry.filter(&spec.type_name) else {
        diagnostics.push(Diagnostic::new(
            DiagnosticKind::UnknownType,
            spec.name.as_str(),
            format!("no filter type named {}", spec.type_name),
        ));
        return None;
    };
    match builder(&mut BuildContext::new(spec)) {
        Ok(filter) => Some(Arc::new(FilterAdapter::new(filter))),
        Err(err) => {
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::Instantiation,
                spec.name.as_str(),
                err.to_string(),
            ));
            None
        }
    }
}

/// No filters is no filter; several become one composite in declaration order.
fn combine_filters(mut filters: Vec<Arc<dyn CoreFilter>>) -> Option<Arc<dyn CoreFilter>> {
    match filters.len() {
        0 => None,
        1 => filters.pop(),
        _ => Some(Arc::new(CompositeFilter::new(filters))),
    }
}

fn build_appender(
    registry: &ComponentRegistry,
    spec: &ComponentSpec,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<Arc<dyn CoreAppender>> {
    let Some(builder) = registry.appender(&spec.type_name) else {
        diagnostics.push(Diagnostic::new(
            DiagnosticKind::UnknownType,
            spec.name.as_str(),
            format!("no appender type named {}", spec.type_name),
        ));
        return None;
    };

    let layout = spec
        .layout
        .as_deref()
        .and_then(|layout| build_layout(registry, layout, diagnostics));
    let filters = spec
        .filters
        .iter()
        .filter_map(|filter| build_filter(registry, filter, diagnostics))
        .collect();

    let mut context = BuildContext::new(spec).with_layout(layout);
    match builder(&mut context) {
        Ok(appender) => Some(Arc::new(AppenderAdapter::new(appender, combine_filters(filters)))),
        Err(err) => {
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::Instantiation,
                spec.name.as_str(),
                err.to_string(),
            ));
            None
        }
    }
}

fn logger_config(
    spec: &LoggerSpec,
    built: &HashSet<String>,
    diagnostics: &mut Vec<Diagnostic>,
) -> LoggerConfig {
    let mut logger = LoggerConfig::new(spec.name.as_str()).with_additive(spec.additive);
    logger.level = spec.level;
    for name in &spec.appender_refs {
        if built.contains(name) {
            logger.add_appender_ref(name.as_str());
        } else {
            let component = if spec.name.is_empty() { "root" } else { spec.name.as_str() };
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::UnresolvedReference,
                component,
                format!("appender '{}' was not built", name),
            ));
        }
    }
    logger
}

//! Legacy type name to builder tables.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use logbridge_core::Level as CoreLevel;
use logbridge_legacy::layout::PatternLayout;
use logbridge_legacy::{
    AppenderSkeleton, Appender as LegacyAppender, Filter as LegacyFilter, Layout, Level as LegacyLevel,
};

use crate::tree::ComponentSpec;
use crate::InstantiationError;

pub type AppenderBuilder = Box<
    dyn Fn(&mut BuildContext<'_>) -> Result<Box<dyn LegacyAppender>, InstantiationError> + Send + Sync,
>;
pub type FilterBuilder =
    Box<dyn Fn(&mut BuildContext<'_>) -> Result<Arc<dyn LegacyFilter>, InstantiationError> + Send + Sync>;
pub type LayoutBuilder =
    Box<dyn Fn(&mut BuildContext<'_>) -> Result<Box<dyn Layout>, InstantiationError> + Send + Sync>;

/// Builders for every component type a configuration may name.
///
/// Type names match exactly, as class names did. Property names are matched
/// case-insensitively by [`BuildContext`].
///
/// ```rust
/// use std::sync::Arc;
///
/// use logbridge_legacy::filter::DenyAllFilter;
/// use logbridge_properties::ComponentRegistry;
///
/// let mut registry = ComponentRegistry::with_defaults();
/// registry.register_filter("org.example.Silence", |_ctx| Ok(Arc::new(DenyAllFilter)));
/// assert!(registry.has_filter("org.example.Silence"));
/// assert!(registry.has_appender("org.apache.log4j.ConsoleAppender"));
/// ```
#[derive(Default)]
pub struct ComponentRegistry {
    appenders: HashMap<String, AppenderBuilder>,
    filters: HashMap<String, FilterBuilder>,
    layouts: HashMap<String, LayoutBuilder>,
}

impl ComponentRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in appenders, filters and layouts.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        crate::builtins::register(&mut registry);
        registry
    }

    pub fn register_appender<F>(&mut self, type_name: impl Into<String>, builder: F) -> &mut Self
    where
        F: Fn(&mut BuildContext<'_>) -> Result<Box<dyn LegacyAppender>, InstantiationError>
            + Send
            + Sync
            + 'static,
    {
        self.appenders.insert(type_name.into(), Box::new(builder));
        self
    }

    pub fn register_filter<F>(&mut self, type_name: impl Into<String>, builder: F) -> &mut Self
    where
        F: Fn(&mut BuildContext<'_>) -> Result<Arc<dyn LegacyFilter>, InstantiationError>
            + Send
            + Sync
            + 'static,
    {
        self.filters.insert(type_name.into(), Box::new(builder));
        self
    }

    pub fn register_layout<F>(&mut self, type_name: impl Into<String>, builder: F) -> &mut Self
    where
        F: Fn(&mut BuildContext<'_>) -> Result<Box<dyn Layout>, InstantiationError>
            + Send
            + Sync
            + 'static,
    {
        self.layouts.insert(type_name.into(), Box::new(builder));
        self
    }

    pub fn appender(&self, type_name: &str) -> Option<&AppenderBuilder> {
        self.appenders.get(type_name)
    }

    pub fn filter(&self, type_name: &str) -> Option<&FilterBuilder> {
        self.filters.get(type_name)
    }

    pub fn layout(&self, type_name: &str) -> Option<&LayoutBuilder> {
        self.layouts.get(type_name)
    }

    pub fn has_appender(&self, type_name: &str) -> bool {
        self.appenders.contains_key(type_name)
    }

    pub fn has_filter(&self, type_name: &str) -> bool {
        self.filters.contains_key(type_name)
    }

    pub fn has_layout(&self, type_name: &str) -> bool {
        self.layouts.contains_key(type_name)
    }

    /// Registered appender, filter and layout type names, each sorted.
    pub fn type_names(&self) -> (Vec<&str>, Vec<&str>, Vec<&str>) {
        fn sorted<V>(map: &HashMap<String, V>) -> Vec<&str> {
            let mut names: Vec<&str> = map.keys().map(String::as_str).collect();
            names.sort_unstable();
            names
        }
        (sorted(&self.appenders), sorted(&self.filters), sorted(&self.layouts))
    }
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (appenders, filters, layouts) = self.type_names();
        f.debug_struct("ComponentRegistry")
            .field("appenders", &appenders)
            .field("filters", &filters)
            .field("layouts", &layouts)
            .finish()
    }
}

/// What a builder sees: the component's spec and, for appenders, its
/// already-built layout.
pub struct BuildContext<'a> {
    spec: &'a ComponentSpec,
    layout: Option<Box<dyn Layout>>,
}

impl<'a> BuildContext<'a> {
    pub fn new(spec: &'a ComponentSpec) -> Self {
        Self { spec, layout: None }
    }

    pub fn with_layout(mut self, layout: Option<Box<dyn Layout>>) -> Self {
        self.layout = layout;
        self
    }

    pub fn spec(&self) -> &'a ComponentSpec {
        self.spec
    }

    pub fn name(&self) -> &'a str {
        &self.spec.name
    }

    pub fn type_name(&self) -> &'a str {
        &self.spec.type_name
    }

    /// A non-empty property value, by case-insensitive name.
    pub fn property(&self, name: &str) -> Option<&'a str> {
        self.spec.property(name).filter(|value| !value.is_empty())
    }

    pub fn required(&self, name: &str) -> Result<&'a str, InstantiationError> {
        self.property(name)
            .ok_or_else(|| InstantiationError::MissingProperty {
                component: self.spec.name.clone(),
                property: name.to_string(),
            })
    }

    pub fn invalid(&self, property: &str, value: &str, message: impl Into<String>) -> InstantiationError {
        InstantiationError::InvalidProperty {
            component: self.spec.name.clone(),
            property: property.to_string(),
            value: value.to_string(),
            message: message.into(),
        }
    }

    /// `true` or `false` in any case; absent means `default`.
    pub fn flag(&self, name: &str, default: bool) -> Result<bool, InstantiationError> {
        match self.property(name) {
            None => Ok(default),
            Some(v) if v.trim().eq_ignore_ascii_case("true") => Ok(true),
            Some(v) if v.trim().eq_ignore_ascii_case("false") => Ok(false),
            Some(v) => Err(self.invalid(name, v, "expected true or false")),
        }
    }

    pub fn parse<T>(&self, name: &str) -> Result<Option<T>, InstantiationError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        self.property(name)
            .map(|v| {
                v.trim()
                    .parse::<T>()
                    .map_err(|e| self.invalid(name, v, e.to_string()))
            })
            .transpose()
    }

    pub fn legacy_level(&self, name: &str) -> Result<Option<LegacyLevel>, InstantiationError> {
        self.property(name)
            .map(|v| LegacyLevel::parse(v).ok_or_else(|| self.invalid(name, v, "unknown level")))
            .transpose()
    }

    pub fn level(&self, name: &str) -> Result<Option<CoreLevel>, InstantiationError> {
        self.property(name)
            .map(|v| CoreLevel::lookup(v.trim()).ok_or_else(|| self.invalid(name, v, "unknown level")))
            .transpose()
    }

    pub fn take_layout(&mut self) -> Option<Box<dyn Layout>> {
        self.layout.take()
    }

    /// Name, `Threshold` and layout for an appender.
    ///
    /// An appender that needs a layout and was given none gets `%m%n`.
    pub fn skeleton(&mut self, requires_layout: bool) -> Result<AppenderSkeleton, InstantiationError> {
        let threshold = self.legacy_level("Threshold")?;
        let mut layout = self.take_layout();
        if requires_layout && layout.is_none() {
            log::warn!(
                "No layout set for the appender named [{}]; using {}",
                self.name(),
                logbridge_legacy::layout::DEFAULT_CONVERSION_PATTERN
            );
            layout = Some(Box::new(PatternLayout::default()));
        }
        Ok(AppenderSkeleton::new(self.name())
            .with_threshold(threshold)
            .with_layout(layout))
    }

    /// Log properties that no builder option consumes.
    pub fn warn_unknown(&self, known: &[&str]) {
        for (property, _) in &self.spec.properties {
            if !known.iter().any(|k| k.eq_ignore_ascii_case(property)) {
                log::warn!(
                    "{} [{}] has no property named {}",
                    self.spec.type_name,
                    self.spec.name,
                    property
                );
            }
        }
    }
}

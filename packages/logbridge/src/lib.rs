//! # logbridge
//!
//! Run legacy `log4j.properties` configurations on the logbridge engine.
//!
//! The workspace is layered; this crate re-exports each layer and adds the
//! one-call bootstrap most applications need:
//!
//! - [`engine`]: levels, events, filters, appenders and the logger context
//! - [`legacy`]: the legacy component contracts and built-in components
//! - [`adapter`]: glue running legacy components inside the engine
//! - [`properties`]: parsing, translating and assembling a configuration
//!
//! ## Usage
//!
//! ```rust,no_run
//! use logbridge::{configure, Level, LoggerContext};
//!
//! let context = LoggerContext::new("app");
//! let diagnostics = configure(&context, "log4j.properties").unwrap();
//! for diagnostic in &diagnostics {
//!     eprintln!("{}", diagnostic);
//! }
//! context.log_message("org.example.App", Level::Info, "configured");
//! ```

use std::path::Path;

pub mod inspect;

pub use logbridge_core as engine;
pub use logbridge_legacy as legacy;
pub use logbridge_legacy_adapter as adapter;
pub use logbridge_properties as properties;

pub use logbridge_core::{Configuration, Level, LogEvent, LoggerContext};
pub use logbridge_properties::{
    ComponentRegistry, ConfigError, Diagnostic, DiagnosticKind, EnvLookup, Lookup,
    PropertiesConfiguration,
};

/// Load `path` with the built-in components and install it in `context`.
///
/// Placeholders resolve against the process environment first, then the
/// file's own properties. The previous configuration is stopped once the new
/// one is running.
pub fn configure(context: &LoggerContext, path: impl AsRef<Path>) -> Result<Vec<Diagnostic>, ConfigError> {
    configure_with(context, path, &ComponentRegistry::with_defaults(), &EnvLookup)
}

/// [`configure`] with a caller-supplied registry and lookup.
pub fn configure_with(
    context: &LoggerContext,
    path: impl AsRef<Path>,
    registry: &ComponentRegistry,
    lookup: &dyn Lookup,
) -> Result<Vec<Diagnostic>, ConfigError> {
    let path = path.as_ref();
    let (configuration, diagnostics) =
        PropertiesConfiguration::load(path, lookup, registry)?.into_parts();
    log::info!(
        "Installing {} in context {} ({} diagnostics)",
        path.display(),
        context.name(),
        diagnostics.len()
    );
    context.set_configuration(configuration);
    Ok(diagnostics)
}

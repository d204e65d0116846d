//! Legacy `log4j.properties` configuration for the logbridge engine.
//!
//! Loading a configuration happens in three steps:
//! - [`Properties`] parses the `key=value` source
//! - [`translate`] groups keys into a [`ConfigurationTree`] of loggers and
//!   appender specs, substituting `${name}` placeholders on the way
//! - [`PropertiesConfiguration::initialize`] builds components through a
//!   [`ComponentRegistry`] and links them into an engine `Configuration`
//!
//! Problems with individual components never abort a load. They are
//! collected as [`Diagnostic`]s and the rest of the configuration is kept.
//!
//! # Example
//!
//! ```rust
//! use logbridge_properties::{substitute, MapLookup, Properties};
//!
//! let properties = Properties::parse("log.dir=/var/log\nlog.file=${log.dir}/app.log\n").unwrap();
//! assert_eq!(substitute("${log.file}", &properties), "/var/log/app.log");
//!
//! let mut env = MapLookup::new();
//! env.insert("log.dir", "/tmp");
//! assert_eq!(substitute("${log.dir}", &env), "/tmp");
//! ```

mod assembly;
mod builtins;
mod diagnostic;
mod error;
mod properties;
mod registry;
mod subst;
mod translator;
mod tree;

pub use assembly::PropertiesConfiguration;
pub use builtins::type_names;
pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use error::{ConfigError, InstantiationError};
pub use properties::Properties;
pub use registry::{AppenderBuilder, BuildContext, ComponentRegistry, FilterBuilder, LayoutBuilder};
pub use subst::{substitute, Chain, EnvLookup, Lookup, MapLookup, MAX_SUBSTITUTION_DEPTH};
pub use translator::translate;
pub use tree::{ComponentKind, ComponentSpec, ConfigurationTree, LoggerSpec, Translation};

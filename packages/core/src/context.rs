//! The active logging context and its configuration swap.

use std::sync::{Arc, RwLock};

use crate::{Configuration, Level, LogEvent};

/// Holds the currently installed [`Configuration`].
///
/// Logging threads take a cheap `Arc` snapshot of the configuration, so a
/// reconfiguration never mutates a graph that is in use: the new graph is
/// started, swapped in, and only then is the old one stopped.
pub struct LoggerContext {
    name: String,
    configuration: RwLock<Arc<Configuration>>,
}

impl LoggerContext {
    /// Create a context running an empty configuration.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let configuration = Configuration::new(format!("Default@{}", name));
        Self {
            name,
            configuration: RwLock::new(Arc::new(configuration)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Snapshot of the active configuration.
    pub fn configuration(&self) -> Arc<Configuration> {
        let guard = self
            .configuration
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(&guard)
    }

    /// Install `configuration`, returning the one it replaced (already stopped).
    pub fn set_configuration(&self, configuration: Configuration) -> Arc<Configuration> {
        let configuration = Arc::new(configuration);
        configuration.start();

        let previous = {
            let mut guard = self
                .configuration
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            std::mem::replace(&mut *guard, configuration)
        };
        log::debug!(
            "Context {} switched configuration {} -> {}",
            self.name,
            previous.name(),
            self.configuration().name()
        );
        previous.stop();
        previous
    }

    pub fn is_enabled(&self, logger_name: &str, level: Level) -> bool {
        self.configuration().is_enabled(logger_name, level)
    }

    pub fn log(&self, event: &LogEvent) {
        self.configuration().log(event);
    }

    /// Convenience wrapper building the event in place.
    pub fn log_message(&self, logger_name: &str, level: Level, message: impl Into<String>) {
        let configuration = self.configuration();
        if configuration.is_enabled(logger_name, level) {
            configuration.log(&LogEvent::new(logger_name, level, message));
        }
    }

    /// Stop the active configuration.
    pub fn stop(&self) {
        self.configuration().stop();
    }
}

impl Drop for LoggerContext {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LoggerConfig;

    #[test]
    fn swap_installs_and_stops_previous() {
        let context = LoggerContext::new("test");
        let mut first = Configuration::new("first");
        first.set_root(LoggerConfig::root().with_level(Level::Info));
        let default = context.set_configuration(first);
        assert_eq!(default.name(), "Default@test");

        let installed = context.configuration();
        assert_eq!(installed.name(), "first");
        assert!(installed.is_started());
        assert!(context.is_enabled("x", Level::Info));
        assert!(!context.is_enabled("x", Level::Debug));

        let replaced = context.set_configuration(Configuration::new("second"));
        assert_eq!(replaced.name(), "first");
        assert!(!replaced.is_started());
        assert_eq!(context.configuration().name(), "second");
    }
}

use std::path::{Path, PathBuf};

use logbridge::adapter::AppenderAdapter;
use logbridge::engine::Appender as _;
use logbridge::legacy::appender::ListAppender;
use logbridge::properties::MapLookup;
use logbridge::{configure, configure_with, ComponentRegistry, ConfigError, Level, LoggerContext};

fn write_config(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, text).unwrap();
    path
}

fn list_messages(context: &LoggerContext, name: &str) -> Vec<String> {
    let configuration = context.configuration();
    let adapter = configuration
        .get_appender(name)
        .unwrap()
        .as_any()
        .downcast_ref::<AppenderAdapter>()
        .unwrap();
    adapter
        .downcast_ref::<ListAppender>()
        .unwrap()
        .messages()
}

#[test]
fn test_configure_installs_and_replaces() {
    let dir = tempfile::tempdir().unwrap();
    let first = write_config(
        dir.path(),
        "first.properties",
        "log4j.rootLogger=INFO, LIST\n\
         log4j.appender.LIST=org.apache.log4j.ListAppender\n\
         log4j.appender.LIST.layout=org.apache.log4j.PatternLayout\n\
         log4j.appender.LIST.layout.ConversionPattern=${prefix} %m\n",
    );
    let second = write_config(
        dir.path(),
        "second.properties",
        "log4j.rootLogger=ERROR, LIST\n\
         log4j.appender.LIST=org.apache.log4j.ListAppender\n\
         log4j.appender.LIST.layout=org.apache.log4j.SimpleLayout\n",
    );

    let context = LoggerContext::new("test");
    let registry = ComponentRegistry::with_defaults();
    let mut lookup = MapLookup::new();
    lookup.insert("prefix", "first:");

    let diagnostics = configure_with(&context, &first, &registry, &lookup).unwrap();
    assert!(diagnostics.is_empty());
    context.log_message("app", Level::Info, "one");
    context.log_message("app", Level::Debug, "dropped");
    assert_eq!(list_messages(&context, "LIST"), vec!["first: one"]);

    let diagnostics = configure_with(&context, &second, &registry, &lookup).unwrap();
    assert!(diagnostics.is_empty());
    context.log_message("app", Level::Warn, "below error");
    context.log_message("app", Level::Error, "two");
    assert_eq!(list_messages(&context, "LIST"), vec!["ERROR - two\n"]);
    context.stop();
}

#[test]
fn test_configure_reports_diagnostics_and_keeps_the_rest() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        dir.path(),
        "partial.properties",
        "log4j.rootLogger=DEBUG, LIST, JMS\n\
         log4j.appender.LIST=org.apache.log4j.ListAppender\n\
         log4j.appender.JMS=org.apache.log4j.net.JMSAppender\n\
         log4j.appender.JMS.TopicBindingName=logs\n",
    );
    let context = LoggerContext::new("partial");
    let diagnostics = configure(&context, &path).unwrap();

    assert_eq!(diagnostics.len(), 2);
    let configuration = context.configuration();
    assert!(configuration.get_appender("LIST").unwrap().is_started());
    assert!(configuration.get_appender("JMS").is_none());
    context.stop();
}

#[test]
fn test_configure_rejects_an_empty_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), "empty.properties", "# nothing here\n");
    let context = LoggerContext::new("empty");
    let before = context.configuration();

    let err = configure(&context, &path).unwrap_err();
    assert!(matches!(err, ConfigError::Empty));
    assert_eq!(context.configuration().name(), before.name());
}

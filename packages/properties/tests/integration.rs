use std::any::Any;
use std::io::{BufRead, BufReader};
use std::net::TcpListener;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use logbridge_core::net::Facility;
use logbridge_core::{
    Appender as _, CompositeFilter, Configuration, Filter as _, FilterResult, Level, LevelRangeFilter,
    LogEvent, LoggerContext,
};
use logbridge_legacy::appender::{
    ConsoleAppender, DailyRollingFileAppender, FileAppender, ListAppender, NullAppender,
    RollingFileAppender, SyslogAppender, Target,
};
use logbridge_legacy::layout::{HtmlLayout, PatternLayout, SimpleLayout, TtccLayout};
use logbridge_legacy::{Appender as _, Decision, Filter as LegacyFilter, LoggingEvent};
use logbridge_legacy_adapter::{AppenderAdapter, FilterAdapter, FilterWrapper};
use logbridge_properties::{
    ComponentRegistry, Diagnostic, DiagnosticKind, MapLookup, Properties, PropertiesConfiguration,
};

/// Passes every event on untouched.
struct NeutralFilter;

impl LegacyFilter for NeutralFilter {
    fn decide(&self, _event: &LoggingEvent) -> Decision {
        Decision::Neutral
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn resource(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("resources")
        .join(name)
}

fn load(name: &str, lookup: &MapLookup, registry: &ComponentRegistry) -> (Configuration, Vec<Diagnostic>) {
    PropertiesConfiguration::load(resource(name), lookup, registry)
        .unwrap()
        .into_parts()
}

fn adapter<'a>(config: &'a Configuration, name: &str) -> &'a AppenderAdapter {
    config
        .get_appender(name)
        .unwrap_or_else(|| panic!("appender {} was not built", name))
        .as_any()
        .downcast_ref::<AppenderAdapter>()
        .unwrap()
}

fn test_registry() -> ComponentRegistry {
    let mut registry = ComponentRegistry::with_defaults();
    registry.register_filter("org.example.NeutralFilter", |_| {
        Ok(Arc::new(NeutralFilter) as Arc<dyn LegacyFilter>)
    });
    registry
}

#[test]
fn test_multiple_filters_become_an_ordered_composite() {
    let registry = test_registry();
    let (config, diagnostics) = load("log4j-composite-filter.properties", &MapLookup::new(), &registry);
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);

    let filter = adapter(&config, "LIST").filter().unwrap();
    let composite = filter.as_any().downcast_ref::<CompositeFilter>().unwrap();
    assert_eq!(composite.len(), 2);

    let first = composite.filters()[0]
        .as_any()
        .downcast_ref::<FilterAdapter>()
        .unwrap();
    assert!(first.downcast_ref::<NeutralFilter>().is_some());

    let second = composite.filters()[1]
        .as_any()
        .downcast_ref::<FilterAdapter>()
        .unwrap();
    let wrapped = second.downcast_ref::<FilterWrapper>().unwrap();
    let range = wrapped
        .inner()
        .as_any()
        .downcast_ref::<LevelRangeFilter>()
        .unwrap();
    assert_eq!(range.min_level(), Level::Trace);

    config.start();
    for level in [Level::Debug, Level::Trace] {
        assert_eq!(filter.filter(&LogEvent::new("app", level, "x")), FilterResult::Accept);
        config.log(&LogEvent::new("app", level, format!("{} event", level)));
    }
    let list = adapter(&config, "LIST").downcast_ref::<ListAppender>().unwrap();
    let messages: Vec<String> = list.events().into_iter().map(|e| e.message).collect();
    assert_eq!(messages, vec!["DEBUG event", "TRACE event"]);
    config.stop();
}

#[test]
fn test_unknown_filter_type_keeps_every_appender() {
    let registry = ComponentRegistry::with_defaults();
    let (config, diagnostics) = load("log4j-unknown-filter.properties", &MapLookup::new(), &registry);

    assert!(config.get_appender("LIST").is_some());
    assert!(config.get_appender("CONSOLE").is_some());
    assert!(adapter(&config, "LIST").filter().is_none());
    assert_eq!(config.root().appender_refs, vec!["LIST", "CONSOLE"]);

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::UnknownType);
    assert!(diagnostics[0].message.contains("org.example.DoesNotExist"));
}

#[test]
fn test_appenders_without_filter_keys_have_no_filter() {
    let dir = tempfile::tempdir().unwrap();
    let mut lookup = MapLookup::new();
    lookup.insert("test.dir", dir.path().display().to_string());
    let registry = ComponentRegistry::with_defaults();
    let (config, _) = load("log4j-all-appenders.properties", &lookup, &registry);

    for name in ["CONSOLE", "FILE", "ROLLING", "DAILY", "NULL", "SYSLOG"] {
        assert!(adapter(&config, name).filter().is_none(), "{} has a filter", name);
    }
}

#[test]
fn test_built_appenders_keep_their_declared_types() {
    let dir = tempfile::tempdir().unwrap();
    let mut lookup = MapLookup::new();
    lookup.insert("test.dir", dir.path().display().to_string());
    let registry = ComponentRegistry::with_defaults();
    let (config, diagnostics) = load("log4j-all-appenders.properties", &lookup, &registry);
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);

    let console = adapter(&config, "CONSOLE")
        .downcast_ref::<ConsoleAppender>()
        .unwrap();
    assert_eq!(console.target(), Target::Err);
    let pattern = console.layout().unwrap().as_any().downcast_ref::<PatternLayout>().unwrap();
    assert_eq!(pattern.conversion_pattern(), "%d %-5p [%t] %c - %m%n");

    let file = adapter(&config, "FILE").downcast_ref::<FileAppender>().unwrap();
    assert_eq!(file.path(), dir.path().join("file.log"));
    assert!(!file.is_append());
    assert!(file.layout().unwrap().as_any().is::<TtccLayout>());

    let rolling = adapter(&config, "ROLLING")
        .downcast_ref::<RollingFileAppender>()
        .unwrap();
    assert_eq!(rolling.max_file_size(), 1024 * 1024);
    assert_eq!(rolling.max_backup_index(), 3);
    let html = rolling.file().layout().unwrap().as_any().downcast_ref::<HtmlLayout>().unwrap();
    assert_eq!(html.title(), "Rolling");

    let daily = adapter(&config, "DAILY")
        .downcast_ref::<DailyRollingFileAppender>()
        .unwrap();
    assert_eq!(daily.date_pattern(), "'.'yyyy-MM-dd-HH-mm");
    assert_eq!(daily.file().path(), dir.path().join("daily.log"));
    assert!(daily.file().layout().unwrap().as_any().is::<SimpleLayout>());

    assert!(adapter(&config, "NULL").downcast_ref::<NullAppender>().is_some());

    let syslog = adapter(&config, "SYSLOG").downcast_ref::<SyslogAppender>().unwrap();
    assert_eq!(syslog.facility(), Facility::Local0);
    assert_eq!(syslog.syslog_host(), "localhost");
    assert!(syslog.layout().unwrap().as_any().is::<SimpleLayout>());
}

#[test]
fn test_loading_twice_gives_independent_configurations() {
    let registry = test_registry();
    let (first, _) = load("log4j-composite-filter.properties", &MapLookup::new(), &registry);
    let (second, _) = load("log4j-composite-filter.properties", &MapLookup::new(), &registry);

    assert!(!Arc::ptr_eq(
        first.get_appender("LIST").unwrap(),
        second.get_appender("LIST").unwrap()
    ));

    first.start();
    second.start();
    first.log(&LogEvent::new("app", Level::Info, "only first"));
    assert_eq!(
        adapter(&first, "LIST").downcast_ref::<ListAppender>().unwrap().events().len(),
        1
    );
    assert!(adapter(&second, "LIST")
        .downcast_ref::<ListAppender>()
        .unwrap()
        .events()
        .is_empty());
    first.stop();
    second.stop();
}

#[test]
fn test_file_appender_paths_and_patterns_are_substituted() {
    let dir = tempfile::tempdir().unwrap();
    let mut lookup = MapLookup::new();
    lookup
        .insert("test.dir", dir.path().display().to_string())
        .insert("log.name", "service");
    let registry = ComponentRegistry::with_defaults();
    let (config, diagnostics) = load("log4j-file.properties", &lookup, &registry);
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);

    config.start();
    config.log(&LogEvent::new("org.example.Worker", Level::Debug, "started"));
    config.log(&LogEvent::new("other.Thing", Level::Info, "below root level"));
    config.log(&LogEvent::new("other.Thing", Level::Error, "failed"));
    config.stop();

    let written = std::fs::read_to_string(dir.path().join("service.log")).unwrap();
    assert_eq!(written, "DEBUG Worker - started\nERROR Thing - failed\n");
}

#[test]
fn test_syslog_over_tcp_sends_prioritized_lines() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let receiver = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut lines = BufReader::new(stream).lines();
        let first = lines.next().unwrap().unwrap();
        let second = lines.next().unwrap().unwrap();
        (first, second)
    });

    let text = format!(
        "log4j.rootLogger=DEBUG, SYSLOG\n\
         log4j.appender.SYSLOG=org.apache.log4j.net.SyslogAppender\n\
         log4j.appender.SYSLOG.SyslogHost=127.0.0.1:{}\n\
         log4j.appender.SYSLOG.Protocol=TCP\n\
         log4j.appender.SYSLOG.Facility=local0\n\
         log4j.appender.SYSLOG.FacilityPrinting=true\n\
         log4j.appender.SYSLOG.layout=org.apache.log4j.PatternLayout\n\
         log4j.appender.SYSLOG.layout.ConversionPattern=%m\n",
        port
    );
    let properties = Properties::parse(&text).unwrap();
    let registry = ComponentRegistry::with_defaults();
    let (config, diagnostics) =
        PropertiesConfiguration::from_properties("syslog", &properties, &MapLookup::new(), &registry)
            .unwrap()
            .into_parts();
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);

    config.start();
    config.log(&LogEvent::new("app", Level::Info, "hello"));
    config.log(&LogEvent::new("app", Level::Error, "broken"));

    let (first, second) = receiver.join().unwrap();
    assert_eq!(first, "<134>local0:hello");
    assert_eq!(second, "<131>local0:broken");
    config.stop();
}

#[test]
fn test_syslog_started_before_its_daemon_delivers_once_it_is_up() {
    let port = {
        let placeholder = TcpListener::bind("127.0.0.1:0").unwrap();
        placeholder.local_addr().unwrap().port()
    };
    let text = format!(
        "log4j.rootLogger=INFO, SYSLOG, LIST\n\
         log4j.appender.LIST=org.apache.log4j.ListAppender\n\
         log4j.appender.SYSLOG=org.apache.log4j.net.SyslogAppender\n\
         log4j.appender.SYSLOG.SyslogHost=127.0.0.1:{}\n\
         log4j.appender.SYSLOG.Protocol=TCP\n\
         log4j.appender.SYSLOG.Facility=kernel\n\
         log4j.appender.SYSLOG.layout=org.apache.log4j.PatternLayout\n\
         log4j.appender.SYSLOG.layout.ConversionPattern=%m\n",
        port
    );
    let properties = Properties::parse(&text).unwrap();
    let registry = ComponentRegistry::with_defaults();
    let (config, diagnostics) =
        PropertiesConfiguration::from_properties("late-syslog", &properties, &MapLookup::new(), &registry)
            .unwrap()
            .into_parts();
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);

    config.start();
    assert!(config.get_appender("SYSLOG").unwrap().is_started());

    let listener = TcpListener::bind(("127.0.0.1", port)).unwrap();
    config.log(&LogEvent::new("app", Level::Warn, "daemon is back"));
    let (stream, _) = listener.accept().unwrap();
    let line = BufReader::new(stream).lines().next().unwrap().unwrap();
    assert_eq!(line, "<4>daemon is back");

    let list = adapter(&config, "LIST").downcast_ref::<ListAppender>().unwrap();
    assert_eq!(list.events().len(), 1);
    config.stop();
}

#[test]
fn test_context_swap_closes_the_previous_appenders() {
    let registry = test_registry();
    let context = LoggerContext::new("swap");

    let (first, _) = load("log4j-composite-filter.properties", &MapLookup::new(), &registry);
    context.set_configuration(first);
    context.log(&LogEvent::new("app", Level::Info, "to first"));

    let (second, _) = load("log4j-composite-filter.properties", &MapLookup::new(), &registry);
    let previous = context.set_configuration(second);
    context.log(&LogEvent::new("app", Level::Info, "to second"));

    let old = adapter(&previous, "LIST");
    assert!(!old.is_started());
    let old_events = old.downcast_ref::<ListAppender>().unwrap().events();
    assert_eq!(old_events.len(), 1);
    assert_eq!(old_events[0].message, "to first");

    let current = context.configuration();
    let new_events = adapter(&current, "LIST")
        .downcast_ref::<ListAppender>()
        .unwrap()
        .events();
    assert_eq!(new_events.len(), 1);
    assert_eq!(new_events[0].message, "to second");
    context.stop();
}

#[test]
fn test_diagnostics_serialize_for_reporting() {
    let registry = ComponentRegistry::with_defaults();
    let (_, diagnostics) = load("log4j-unknown-filter.properties", &MapLookup::new(), &registry);
    let json = serde_json::to_value(&diagnostics).unwrap();
    assert_eq!(json[0]["kind"], "unknown_type");
    assert_eq!(json[0]["component"], "LIST.filter.1");
}

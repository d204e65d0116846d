//! The component types a legacy configuration can name out of the box.

use std::sync::Arc;

use logbridge_core::net::Facility;
use logbridge_core::{FilterResult, Level as CoreLevel, LevelRangeFilter};
use logbridge_legacy::appender::{
    parse_file_size, ConsoleAppender, DailyRollingFileAppender, FileAppender, ListAppender,
    NullAppender, Protocol, RollingFileAppender, SyslogAppender, Target,
};
use logbridge_legacy::filter::{DenyAllFilter, LevelMatchFilter, StringMatchFilter};
use logbridge_legacy::layout::{
    HtmlLayout, PatternLayout, SimpleLayout, TtccLayout, DEFAULT_CONVERSION_PATTERN,
};
use logbridge_legacy::{Appender as LegacyAppender, Filter as LegacyFilter, Layout};
use logbridge_legacy_adapter::FilterWrapper;

use crate::registry::{BuildContext, ComponentRegistry};
use crate::InstantiationError;

/// Fully qualified legacy type names of the built-ins.
pub mod type_names {
    pub const CONSOLE_APPENDER: &str = "org.apache.log4j.ConsoleAppender";
    pub const FILE_APPENDER: &str = "org.apache.log4j.FileAppender";
    pub const ROLLING_FILE_APPENDER: &str = "org.apache.log4j.RollingFileAppender";
    pub const DAILY_ROLLING_FILE_APPENDER: &str = "org.apache.log4j.DailyRollingFileAppender";
    pub const NULL_APPENDER: &str = "org.apache.log4j.varia.NullAppender";
    pub const SYSLOG_APPENDER: &str = "org.apache.log4j.net.SyslogAppender";
    pub const LIST_APPENDER: &str = "org.apache.log4j.ListAppender";

    pub const LEVEL_RANGE_FILTER: &str = "org.apache.log4j.varia.LevelRangeFilter";
    pub const LEVEL_MATCH_FILTER: &str = "org.apache.log4j.varia.LevelMatchFilter";
    pub const STRING_MATCH_FILTER: &str = "org.apache.log4j.varia.StringMatchFilter";
    pub const DENY_ALL_FILTER: &str = "org.apache.log4j.varia.DenyAllFilter";

    pub const SIMPLE_LAYOUT: &str = "org.apache.log4j.SimpleLayout";
    pub const PATTERN_LAYOUT: &str = "org.apache.log4j.PatternLayout";
    pub const ENHANCED_PATTERN_LAYOUT: &str = "org.apache.log4j.EnhancedPatternLayout";
    pub const TTCC_LAYOUT: &str = "org.apache.log4j.TTCCLayout";
    pub const HTML_LAYOUT: &str = "org.apache.log4j.HTMLLayout";
}

use type_names::*;

type Built<T> = Result<T, InstantiationError>;

pub(crate) fn register(registry: &mut ComponentRegistry) {
    registry
        .register_appender(CONSOLE_APPENDER, console)
        .register_appender(FILE_APPENDER, |ctx| {
            Ok(Box::new(file(ctx, &["Threshold"])?) as Box<dyn LegacyAppender>)
        })
        .register_appender(ROLLING_FILE_APPENDER, rolling_file)
        .register_appender(DAILY_ROLLING_FILE_APPENDER, daily_rolling_file)
        .register_appender(NULL_APPENDER, null)
        .register_appender(SYSLOG_APPENDER, syslog)
        .register_appender(LIST_APPENDER, list);

    registry
        .register_filter(LEVEL_RANGE_FILTER, level_range)
        .register_filter(LEVEL_MATCH_FILTER, level_match)
        .register_filter(STRING_MATCH_FILTER, string_match)
        .register_filter(DENY_ALL_FILTER, |_| {
            Ok(Arc::new(DenyAllFilter) as Arc<dyn LegacyFilter>)
        });

    registry
        .register_layout(SIMPLE_LAYOUT, |_| {
            Ok(Box::new(SimpleLayout) as Box<dyn Layout>)
        })
        .register_layout(PATTERN_LAYOUT, pattern)
        .register_layout(ENHANCED_PATTERN_LAYOUT, pattern)
        .register_layout(TTCC_LAYOUT, ttcc)
        .register_layout(HTML_LAYOUT, html);
}

fn console(ctx: &mut BuildContext<'_>) -> Built<Box<dyn LegacyAppender>> {
    ctx.warn_unknown(&["Threshold", "Target", "Follow", "ImmediateFlush", "Encoding"]);
    let target = match ctx.property("Target") {
        Some(value) => value
            .parse::<Target>()
            .map_err(|message| ctx.invalid("Target", value, message))?,
        None => Target::Out,
    };
    let follow = ctx.flag("Follow", false)?;
    let skeleton = ctx.skeleton(true)?;
    Ok(Box::new(
        ConsoleAppender::new(skeleton, target).with_follow(follow),
    ))
}

const FILE_OPTIONS: [&str; 6] = [
    "File",
    "Append",
    "BufferedIO",
    "BufferSize",
    "ImmediateFlush",
    "Encoding",
];

fn file(ctx: &mut BuildContext<'_>, extra: &[&str]) -> Built<FileAppender> {
    let known: Vec<&str> = FILE_OPTIONS.iter().chain(extra).copied().collect();
    ctx.warn_unknown(&known);

    let path = ctx.required("File")?.to_string();
    let append = ctx.flag("Append", true)?;
    let buffered_io = ctx.flag("BufferedIO", false)?;
    let immediate_flush = ctx.flag("ImmediateFlush", true)?;
    let buffer_size = ctx.parse::<usize>("BufferSize")?;
    let skeleton = ctx.skeleton(true)?;

    let mut appender = FileAppender::new(skeleton, path)
        .with_append(append)
        .with_buffered_io(buffered_io || !immediate_flush);
    if let Some(size) = buffer_size {
        appender = appender.with_buffer_size(size);
    }
    Ok(appender)
}

fn rolling_file(ctx: &mut BuildContext<'_>) -> Built<Box<dyn LegacyAppender>> {
    let max_file_size = match ctx.property("MaxFileSize") {
        Some(value) => Some(
            parse_file_size(value)
                .ok_or_else(|| ctx.invalid("MaxFileSize", value, "expected a size such as 10MB"))?,
        ),
        None => None,
    };
    let max_backup_index = ctx.parse::<u32>("MaxBackupIndex")?;
    let file = file(ctx, &["Threshold", "MaxFileSize", "MaxBackupIndex"])?;

    let mut appender = RollingFileAppender::new(file);
    if let Some(size) = max_file_size {
        appender = appender.with_max_file_size(size);
    }
    if let Some(index) = max_backup_index {
        appender = appender.with_max_backup_index(index);
    }
    Ok(Box::new(appender))
}

fn daily_rolling_file(ctx: &mut BuildContext<'_>) -> Built<Box<dyn LegacyAppender>> {
    let date_pattern = ctx.property("DatePattern").map(str::to_string);
    let file = file(ctx, &["Threshold", "DatePattern"])?;

    let mut appender = DailyRollingFileAppender::new(file);
    if let Some(pattern) = date_pattern {
        appender = appender.with_date_pattern(pattern);
    }
    Ok(Box::new(appender))
}

fn null(ctx: &mut BuildContext<'_>) -> Built<Box<dyn LegacyAppender>> {
    Ok(Box::new(NullAppender::new(ctx.skeleton(false)?)))
}

fn list(ctx: &mut BuildContext<'_>) -> Built<Box<dyn LegacyAppender>> {
    ctx.warn_unknown(&["Threshold"]);
    Ok(Box::new(ListAppender::new(ctx.skeleton(false)?)))
}

fn syslog(ctx: &mut BuildContext<'_>) -> Built<Box<dyn LegacyAppender>> {
    ctx.warn_unknown(&[
        "Threshold",
        "SyslogHost",
        "Facility",
        "FacilityPrinting",
        "Header",
        "Protocol",
    ]);
    let host = ctx.required("SyslogHost")?.to_string();
    let facility = match ctx.property("Facility") {
        Some(name) => Facility::lookup(Some(name), None)
            .ok_or_else(|| ctx.invalid("Facility", name, "unknown syslog facility"))?,
        None => Facility::User,
    };
    let protocol = ctx.parse::<Protocol>("Protocol")?.unwrap_or_default();
    let facility_printing = ctx.flag("FacilityPrinting", false)?;
    let header = ctx.flag("Header", false)?;
    let skeleton = ctx.skeleton(true)?;
    Ok(Box::new(
        SyslogAppender::new(skeleton, host)
            .with_facility(facility)
            .with_facility_printing(facility_printing)
            .with_header(header)
            .with_protocol(protocol),
    ))
}

/// The legacy range filter runs as the engine's range filter behind a wrapper.
///
/// An unset bound is open: `LevelMin` defaults to ALL and `LevelMax` to OFF.
/// In-range events are accepted when `AcceptOnMatch` is true and passed on
/// otherwise; out-of-range events are denied.
fn level_range(ctx: &mut BuildContext<'_>) -> Built<Arc<dyn LegacyFilter>> {
    ctx.warn_unknown(&["LevelMin", "LevelMax", "AcceptOnMatch"]);
    let min = ctx.level("LevelMin")?.unwrap_or(CoreLevel::All);
    let max = ctx.level("LevelMax")?.unwrap_or(CoreLevel::Off);
    let on_match = if ctx.flag("AcceptOnMatch", false)? {
        FilterResult::Accept
    } else {
        FilterResult::Neutral
    };
    let range = LevelRangeFilter::new(min, max, on_match, FilterResult::Deny);
    Ok(Arc::new(FilterWrapper::new(Arc::new(range))))
}

fn level_match(ctx: &mut BuildContext<'_>) -> Built<Arc<dyn LegacyFilter>> {
    ctx.warn_unknown(&["LevelToMatch", "AcceptOnMatch"]);
    Ok(Arc::new(LevelMatchFilter::new(
        ctx.legacy_level("LevelToMatch")?,
        ctx.flag("AcceptOnMatch", true)?,
    )))
}

fn string_match(ctx: &mut BuildContext<'_>) -> Built<Arc<dyn LegacyFilter>> {
    ctx.warn_unknown(&["StringToMatch", "AcceptOnMatch"]);
    Ok(Arc::new(StringMatchFilter::new(
        ctx.property("StringToMatch").map(str::to_string),
        ctx.flag("AcceptOnMatch", true)?,
    )))
}

fn pattern(ctx: &mut BuildContext<'_>) -> Built<Box<dyn Layout>> {
    ctx.warn_unknown(&["ConversionPattern"]);
    let pattern = ctx
        .property("ConversionPattern")
        .unwrap_or(DEFAULT_CONVERSION_PATTERN);
    Ok(Box::new(PatternLayout::new(pattern)))
}

fn ttcc(ctx: &mut BuildContext<'_>) -> Built<Box<dyn Layout>> {
    ctx.warn_unknown(&[
        "DateFormat",
        "TimeZone",
        "ThreadPrinting",
        "CategoryPrefixing",
        "ContextPrinting",
    ]);
    let mut layout = TtccLayout::new()
        .with_thread_printing(ctx.flag("ThreadPrinting", true)?)
        .with_category_prefixing(ctx.flag("CategoryPrefixing", true)?);
    if let Some(format) = ctx.property("DateFormat") {
        layout = layout.with_date_format(format);
    }
    Ok(Box::new(layout))
}

fn html(ctx: &mut BuildContext<'_>) -> Built<Box<dyn Layout>> {
    ctx.warn_unknown(&["Title", "LocationInfo"]);
    let layout = match ctx.property("Title") {
        Some(title) => HtmlLayout::new(title),
        None => HtmlLayout::default(),
    };
    Ok(Box::new(
        layout.with_location_info(ctx.flag("LocationInfo", false)?),
    ))
}

//! Conversions between legacy and engine value types.
//!
//! Levels map by name. Filter results map one-to-one, so nothing is
//! reinterpreted when a decision crosses the boundary.

use chrono::{TimeZone, Utc};
use logbridge_core::{FilterResult, Level as CoreLevel, LogEvent};
use logbridge_legacy::{Decision, Level as LegacyLevel, LoggingEvent};

pub fn core_level_to_legacy(level: CoreLevel) -> LegacyLevel {
    match level {
        CoreLevel::Off => LegacyLevel::Off,
        CoreLevel::Fatal => LegacyLevel::Fatal,
        CoreLevel::Error => LegacyLevel::Error,
        CoreLevel::Warn => LegacyLevel::Warn,
        CoreLevel::Info => LegacyLevel::Info,
        CoreLevel::Debug => LegacyLevel::Debug,
        CoreLevel::Trace => LegacyLevel::Trace,
        CoreLevel::All => LegacyLevel::All,
    }
}

pub fn legacy_level_to_core(level: LegacyLevel) -> CoreLevel {
    match level {
        LegacyLevel::Off => CoreLevel::Off,
        LegacyLevel::Fatal => CoreLevel::Fatal,
        LegacyLevel::Error => CoreLevel::Error,
        LegacyLevel::Warn => CoreLevel::Warn,
        LegacyLevel::Info => CoreLevel::Info,
        LegacyLevel::Debug => CoreLevel::Debug,
        LegacyLevel::Trace => CoreLevel::Trace,
        LegacyLevel::All => CoreLevel::All,
    }
}

pub fn core_event_to_legacy(event: &LogEvent) -> LoggingEvent {
    LoggingEvent {
        logger_name: event.logger_name.clone(),
        level: core_level_to_legacy(event.level),
        message: event.message.clone(),
        thread_name: event.thread_name.clone(),
        time_stamp: event.timestamp.timestamp_millis(),
        thrown: event.thrown.clone(),
    }
}

pub fn legacy_event_to_core(event: &LoggingEvent) -> LogEvent {
    let timestamp = Utc
        .timestamp_millis_opt(event.time_stamp)
        .single()
        .unwrap_or_else(Utc::now);
    LogEvent {
        logger_name: event.logger_name.clone(),
        level: legacy_level_to_core(event.level),
        message: event.message.clone(),
        thread_name: event.thread_name.clone(),
        timestamp,
        thrown: event.thrown.clone(),
    }
}

pub fn decision_to_result(decision: Decision) -> FilterResult {
    match decision {
        Decision::Deny => FilterResult::Deny,
        Decision::Neutral => FilterResult::Neutral,
        Decision::Accept => FilterResult::Accept,
    }
}

pub fn result_to_decision(result: FilterResult) -> Decision {
    match result {
        FilterResult::Deny => Decision::Deny,
        FilterResult::Neutral => Decision::Neutral,
        FilterResult::Accept => Decision::Accept,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_keep_their_names() {
        for level in CoreLevel::VALUES {
            let legacy = core_level_to_legacy(level);
            assert_eq!(legacy.name(), level.name());
            assert_eq!(legacy_level_to_core(legacy), level);
        }
    }

    #[test]
    fn severity_order_survives() {
        assert!(core_level_to_legacy(CoreLevel::Error) > core_level_to_legacy(CoreLevel::Warn));
        assert!(core_level_to_legacy(CoreLevel::Trace) < core_level_to_legacy(CoreLevel::Debug));
    }

    #[test]
    fn event_fields_carry_over() {
        let event = LogEvent::new("org.example", CoreLevel::Warn, "careful")
            .with_thrown("io: broken pipe")
            .with_timestamp(Utc.timestamp_millis_opt(1_700_000_000_123).unwrap());
        let legacy = core_event_to_legacy(&event);
        assert_eq!(legacy.logger_name, "org.example");
        assert_eq!(legacy.level, LegacyLevel::Warn);
        assert_eq!(legacy.time_stamp, 1_700_000_000_123);
        assert_eq!(legacy.thrown.as_deref(), Some("io: broken pipe"));
        assert_eq!(legacy_event_to_core(&legacy), event);
    }

    #[test]
    fn decisions_map_one_to_one() {
        for result in [FilterResult::Accept, FilterResult::Neutral, FilterResult::Deny] {
            assert_eq!(decision_to_result(result_to_decision(result)), result);
        }
        assert_eq!(decision_to_result(Decision::Neutral), FilterResult::Neutral);
    }
}

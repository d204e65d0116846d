//! Event filters.
//!
//! A filter inspects one event and answers ACCEPT, NEUTRAL or DENY. Appenders
//! carry at most one filter; several filters are combined with
//! [`CompositeFilter`].

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::{Level, LogEvent};

/// Outcome of running a filter against an event.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FilterResult {
    Accept,
    Neutral,
    Deny,
}

impl fmt::Display for FilterResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterResult::Accept => write!(f, "ACCEPT"),
            FilterResult::Neutral => write!(f, "NEUTRAL"),
            FilterResult::Deny => write!(f, "DENY"),
        }
    }
}

/// Per-event decision point in the engine pipeline.
///
/// Filters are shared between threads and evaluated without synchronization,
/// so implementations take `&self` everywhere.
pub trait Filter: Send + Sync {
    fn filter(&self, event: &LogEvent) -> FilterResult;

    fn start(&self) {}

    fn stop(&self) {}

    /// Access to the concrete type, for diagnostics and tests.
    fn as_any(&self) -> &dyn Any;
}

/// Ordered chain of filters.
///
/// Evaluation walks the chain in order: a DENY stops evaluation and rejects
/// the event, ACCEPT and NEUTRAL move on to the next element. An event that
/// reaches the end of the chain is accepted.
#[derive(Clone, Default)]
pub struct CompositeFilter {
    filters: Vec<Arc<dyn Filter>>,
}

impl CompositeFilter {
    pub fn new(filters: Vec<Arc<dyn Filter>>) -> Self {
        Self { filters }
    }

    /// Elements in declaration order.
    pub fn filters(&self) -> &[Arc<dyn Filter>] {
        &self.filters
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Append a filter at the end of the chain.
    pub fn add_filter(mut self, filter: Arc<dyn Filter>) -> Self {
        self.filters.push(filter);
        self
    }
}

impl Filter for CompositeFilter {
    fn filter(&self, event: &LogEvent) -> FilterResult {
        for filter in &self.filters {
            if filter.filter(event) == FilterResult::Deny {
                return FilterResult::Deny;
            }
        }
        FilterResult::Accept
    }

    fn start(&self) {
        for filter in &self.filters {
            filter.start();
        }
    }

    fn stop(&self) {
        for filter in &self.filters {
            filter.stop();
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl fmt::Debug for CompositeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeFilter")
            .field("len", &self.filters.len())
            .finish()
    }
}

/// Matches events whose level lies in `[max_level, min_level]`.
///
/// `min_level` is the least severe level still in range and `max_level` the
/// most severe one, so `min_level = TRACE, max_level = FATAL` covers every
/// ordinary event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelRangeFilter {
    min_level: Level,
    max_level: Level,
    on_match: FilterResult,
    on_mismatch: FilterResult,
}

impl LevelRangeFilter {
    pub fn new(
        min_level: Level,
        max_level: Level,
        on_match: FilterResult,
        on_mismatch: FilterResult,
    ) -> Self {
        Self {
            min_level,
            max_level,
            on_match,
            on_mismatch,
        }
    }

    pub fn min_level(&self) -> Level {
        self.min_level
    }

    pub fn max_level(&self) -> Level {
        self.max_level
    }

    pub fn on_match(&self) -> FilterResult {
        self.on_match
    }

    pub fn on_mismatch(&self) -> FilterResult {
        self.on_mismatch
    }
}

impl Filter for LevelRangeFilter {
    fn filter(&self, event: &LogEvent) -> FilterResult {
        if event.level.is_in_range(self.max_level, self.min_level) {
            self.on_match
        } else {
            self.on_mismatch
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Matches events at least as severe as `level`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThresholdFilter {
    level: Level,
    on_match: FilterResult,
    on_mismatch: FilterResult,
}

impl ThresholdFilter {
    pub fn new(level: Level, on_match: FilterResult, on_mismatch: FilterResult) -> Self {
        Self {
            level,
            on_match,
            on_mismatch,
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }
}

impl Filter for ThresholdFilter {
    fn filter(&self, event: &LogEvent) -> FilterResult {
        if event.level.is_more_specific_than(self.level) {
            self.on_match
        } else {
            self.on_mismatch
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns a fixed result and counts how often it was asked.
    struct Fixed {
        result: FilterResult,
        calls: AtomicUsize,
    }

    impl Fixed {
        fn new(result: FilterResult) -> Arc<Self> {
            Arc::new(Self {
                result,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Filter for Fixed {
        fn filter(&self, _event: &LogEvent) -> FilterResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn event(level: Level) -> LogEvent {
        LogEvent::new("test", level, "message")
    }

    #[test]
    fn composite_short_circuits_on_deny() {
        let first = Fixed::new(FilterResult::Neutral);
        let deny = Fixed::new(FilterResult::Deny);
        let last = Fixed::new(FilterResult::Accept);
        let composite = CompositeFilter::new(vec![first.clone(), deny.clone(), last.clone()]);

        assert_eq!(composite.filter(&event(Level::Info)), FilterResult::Deny);
        assert_eq!(first.calls(), 1);
        assert_eq!(deny.calls(), 1);
        assert_eq!(last.calls(), 0);
    }

    #[test]
    fn composite_accepts_survivors() {
        let composite = CompositeFilter::new(vec![
            Fixed::new(FilterResult::Neutral),
            Fixed::new(FilterResult::Neutral),
        ]);
        assert_eq!(composite.filter(&event(Level::Debug)), FilterResult::Accept);
    }

    #[test]
    fn accept_does_not_hide_a_later_deny() {
        let composite = CompositeFilter::new(vec![
            Fixed::new(FilterResult::Accept),
            Fixed::new(FilterResult::Deny),
        ]);
        assert_eq!(composite.filter(&event(Level::Error)), FilterResult::Deny);
    }

    #[test]
    fn composite_keeps_order() {
        let a = Fixed::new(FilterResult::Neutral);
        let b = Fixed::new(FilterResult::Accept);
        let composite = CompositeFilter::new(vec![a]).add_filter(b);
        let kinds: Vec<FilterResult> = composite
            .filters()
            .iter()
            .map(|f| f.as_any().downcast_ref::<Fixed>().unwrap().result)
            .collect();
        assert_eq!(kinds, vec![FilterResult::Neutral, FilterResult::Accept]);
    }

    #[test]
    fn level_range_bounds() {
        let filter = LevelRangeFilter::new(
            Level::Info,
            Level::Error,
            FilterResult::Accept,
            FilterResult::Deny,
        );
        assert_eq!(filter.filter(&event(Level::Warn)), FilterResult::Accept);
        assert_eq!(filter.filter(&event(Level::Info)), FilterResult::Accept);
        assert_eq!(filter.filter(&event(Level::Error)), FilterResult::Accept);
        assert_eq!(filter.filter(&event(Level::Debug)), FilterResult::Deny);
        assert_eq!(filter.filter(&event(Level::Fatal)), FilterResult::Deny);
    }

    #[test]
    fn threshold_filter() {
        let filter = ThresholdFilter::new(Level::Warn, FilterResult::Neutral, FilterResult::Deny);
        assert_eq!(filter.filter(&event(Level::Error)), FilterResult::Neutral);
        assert_eq!(filter.filter(&event(Level::Info)), FilterResult::Deny);
    }
}

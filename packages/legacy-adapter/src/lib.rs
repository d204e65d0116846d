//! Adapter layer between legacy components and the logbridge engine.
//!
//! This crate provides bidirectional adapters allowing:
//! - Legacy appenders to be installed as engine appenders (`AppenderAdapter`)
//! - Legacy filters to run inside engine filter chains (`FilterAdapter`)
//! - Engine filters to sit in a legacy filter chain (`FilterWrapper`)
//!
//! Adapters hold nothing but the wrapped component, and forward filter
//! results verbatim in both directions.
//!
//! # Usage
//!
//! ```rust
//! use logbridge_core::{Appender as _, Level, LogEvent};
//! use logbridge_legacy::appender::{AppenderSkeleton, ListAppender};
//! use logbridge_legacy_adapter::AppenderAdapter;
//!
//! let adapter = AppenderAdapter::new(
//!     Box::new(ListAppender::new(AppenderSkeleton::new("list"))),
//!     None,
//! );
//! adapter.start().unwrap();
//! adapter.append(&LogEvent::new("app", Level::Info, "hello"));
//!
//! let list = adapter.downcast_ref::<ListAppender>().unwrap();
//! assert_eq!(list.events()[0].message, "hello");
//! ```

mod appender_adapter;
mod convert;
mod error;
mod filter_adapter;
mod filter_wrapper;

pub use appender_adapter::AppenderAdapter;
pub use convert::{
    core_event_to_legacy, core_level_to_legacy, decision_to_result, legacy_event_to_core,
    legacy_level_to_core, result_to_decision,
};
pub use error::Error;
pub use filter_adapter::FilterAdapter;
pub use filter_wrapper::FilterWrapper;

// Re-export key types for convenience
pub use logbridge_core::{
    Appender as CoreAppender, Filter as CoreFilter, FilterResult, Level as CoreLevel, LogEvent,
};
pub use logbridge_legacy::{
    Appender as LegacyAppender, Decision, Filter as LegacyFilter, Level as LegacyLevel,
    LoggingEvent,
};

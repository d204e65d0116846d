//! Core engine layer for logbridge.
//!
//! This crate holds the contracts that every pipeline component speaks:
//! - `LogEvent` and `Level`: what flows through the pipeline
//! - `Filter` / `FilterResult`: per-event ACCEPT / NEUTRAL / DENY decisions
//! - `Appender`: a named, filterable sink with a start/stop lifecycle
//! - `Configuration` / `LoggerContext`: the installed graph and its hot swap
//! - `net`: the syslog facility and priority codec
//!
//! # Example
//!
//! ```rust
//! use logbridge_core::net::{priority, Facility, Severity};
//!
//! let facility = Facility::lookup(Some("local0"), None).unwrap();
//! assert_eq!(priority(facility, Severity::Info), 134);
//! ```

mod appender;
mod config;
mod context;
mod error;
mod event;
pub mod filter;
mod level;
pub mod net;

pub use appender::Appender;
pub use config::{Configuration, LoggerConfig, ROOT_LOGGER_NAME};
pub use context::LoggerContext;
pub use error::Error;
pub use event::LogEvent;
pub use filter::{CompositeFilter, Filter, FilterResult, LevelRangeFilter, ThresholdFilter};
pub use level::{Level, ParseLevelError};

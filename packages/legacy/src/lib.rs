//! Legacy logging contracts.
//!
//! These are the component shapes that legacy configurations name:
//! - `Appender`: a sink with a threshold, an optional layout and an
//!   activate/close lifecycle
//! - `Filter`: a per-event `Decision` (DENY / NEUTRAL / ACCEPT)
//! - `Layout`: renders a `LoggingEvent` to text
//!
//! The built-in implementations live in the `appender`, `filter` and
//! `layout` modules. None of them know about the engine in
//! `logbridge-core`; the adapter crate plugs them in.

pub mod appender;
mod error;
mod event;
pub mod filter;
pub mod layout;
mod level;

pub use appender::{Appender, AppenderSkeleton};
pub use error::Error;
pub use event::LoggingEvent;
pub use filter::{Decision, Filter};
pub use layout::Layout;
pub use level::Level;

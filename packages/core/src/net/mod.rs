//! Syslog wire codec: facilities, severities and the `<PRI>` value.
//!
//! A syslog message starts with `<PRI>` where
//! `PRI = facility.code * 8 + severity.code`.

mod facility;
mod severity;

pub use facility::{Facility, ParseFacilityError};
pub use severity::Severity;

/// Priority value for a facility/severity pair.
///
/// # Example
///
/// ```rust
/// use logbridge_core::net::{priority, Facility, Severity};
///
/// assert_eq!(priority(Facility::Local0, Severity::Info), 134);
/// assert_eq!(priority(Facility::Kern, Severity::Emerg), 0);
/// ```
pub fn priority(facility: Facility, severity: Severity) -> i32 {
    facility.priority_of(severity.code())
}

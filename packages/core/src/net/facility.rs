use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use serde::Serialize;

/// Syslog facility: the subsystem a message originates from.
///
/// The twenty-four facilities carry fixed codes 0 through 23, shared by
/// RFC 3164 and RFC 5424.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Facility {
    /// Kernel messages.
    Kern,
    /// User-level messages.
    User,
    /// Mail system.
    Mail,
    /// System daemons.
    Daemon,
    /// Security/authorization messages.
    Auth,
    /// Messages generated internally by syslogd.
    Syslog,
    /// Line printer subsystem.
    Lpr,
    /// Network news subsystem.
    News,
    /// UUCP subsystem.
    Uucp,
    /// Clock daemon.
    Cron,
    /// Security/authorization messages (private).
    Authpriv,
    /// FTP daemon.
    Ftp,
    /// NTP subsystem.
    Ntp,
    /// Log audit.
    #[serde(rename = "LOG_AUDIT")]
    LogAudit,
    /// Log alert.
    #[serde(rename = "LOG_ALERT")]
    LogAlert,
    /// Clock daemon (note 2).
    Clock,
    Local0,
    Local1,
    Local2,
    Local3,
    Local4,
    Local5,
    Local6,
    Local7,
}

/// Names accepted besides the canonical ones.
const ALIASES: [(&str, Facility); 1] = [("KERNEL", Facility::Kern)];

lazy_static! {
    static ref BY_NAME: HashMap<&'static str, Facility> = Facility::VALUES
        .iter()
        .map(|facility| (facility.name(), *facility))
        .chain(ALIASES)
        .collect();
}

/// A facility name that does not match any of the twenty-four facilities.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown syslog facility '{0}'")]
pub struct ParseFacilityError(pub String);

impl Facility {
    /// All facilities, in code order.
    pub const VALUES: [Facility; 24] = [
        Facility::Kern,
        Facility::User,
        Facility::Mail,
        Facility::Daemon,
        Facility::Auth,
        Facility::Syslog,
        Facility::Lpr,
        Facility::News,
        Facility::Uucp,
        Facility::Cron,
        Facility::Authpriv,
        Facility::Ftp,
        Facility::Ntp,
        Facility::LogAudit,
        Facility::LogAlert,
        Facility::Clock,
        Facility::Local0,
        Facility::Local1,
        Facility::Local2,
        Facility::Local3,
        Facility::Local4,
        Facility::Local5,
        Facility::Local6,
        Facility::Local7,
    ];

    pub fn code(self) -> i32 {
        self as i32
    }

    /// Canonical upper-case name.
    pub fn name(self) -> &'static str {
        match self {
            Facility::Kern => "KERN",
            Facility::User => "USER",
            Facility::Mail => "MAIL",
            Facility::Daemon => "DAEMON",
            Facility::Auth => "AUTH",
            Facility::Syslog => "SYSLOG",
            Facility::Lpr => "LPR",
            Facility::News => "NEWS",
            Facility::Uucp => "UUCP",
            Facility::Cron => "CRON",
            Facility::Authpriv => "AUTHPRIV",
            Facility::Ftp => "FTP",
            Facility::Ntp => "NTP",
            Facility::LogAudit => "LOG_AUDIT",
            Facility::LogAlert => "LOG_ALERT",
            Facility::Clock => "CLOCK",
            Facility::Local0 => "LOCAL0",
            Facility::Local1 => "LOCAL1",
            Facility::Local2 => "LOCAL2",
            Facility::Local3 => "LOCAL3",
            Facility::Local4 => "LOCAL4",
            Facility::Local5 => "LOCAL5",
            Facility::Local6 => "LOCAL6",
            Facility::Local7 => "LOCAL7",
        }
    }

    /// Look a facility up by name, ignoring case. `kernel` is accepted for
    /// [`Facility::Kern`].
    ///
    /// The whole name must match; surrounding whitespace is not stripped.
    /// An absent or unrecognized name yields `default`, which may itself be
    /// `None`.
    pub fn lookup(name: Option<&str>, default: Option<Facility>) -> Option<Facility> {
        name.and_then(|name| BY_NAME.get(name.to_ascii_uppercase().as_str()).copied())
            .or(default)
    }

    /// True if `name` names this facility, ignoring case.
    pub fn is_equal(self, name: &str) -> bool {
        Facility::lookup(Some(name), None) == Some(self)
    }

    /// Priority for an arbitrary severity code.
    ///
    /// The code is not range-checked: values outside 0..=7 are combined
    /// arithmetically all the same, wrapping at the bounds of `i32`.
    pub fn priority_of(self, severity_code: i32) -> i32 {
        self.code().wrapping_mul(8).wrapping_add(severity_code)
    }
}

impl fmt::Display for Facility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Facility {
    type Err = ParseFacilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Facility::lookup(Some(s), None).ok_or_else(|| ParseFacilityError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_declaration_order() {
        for (i, facility) in Facility::VALUES.iter().enumerate() {
            assert_eq!(facility.code(), i as i32);
        }
        assert_eq!(Facility::Local0.code(), 16);
        assert_eq!(Facility::Local7.code(), 23);
    }

    #[test]
    fn lookup_any_casing() {
        for facility in Facility::VALUES {
            let upper = facility.name();
            let lower = upper.to_ascii_lowercase();
            let mixed: String = upper
                .chars()
                .enumerate()
                .map(|(i, c)| if i % 2 == 0 { c.to_ascii_lowercase() } else { c })
                .collect();
            for name in [upper.to_string(), lower, mixed] {
                assert_eq!(Facility::lookup(Some(&name), None), Some(facility));
            }
        }
        for name in ["kernel", "Kernel", "KERNEL", "kErNeL"] {
            assert_eq!(Facility::lookup(Some(name), None), Some(Facility::Kern));
        }
        assert_eq!(Facility::Kern.name(), "KERN");
    }

    #[test]
    fn unknown_or_absent_yields_default() {
        assert_eq!(Facility::lookup(Some("local8"), None), None);
        assert_eq!(
            Facility::lookup(Some("nope"), Some(Facility::User)),
            Some(Facility::User)
        );
        assert_eq!(Facility::lookup(None, Some(Facility::Local3)), Some(Facility::Local3));
        assert_eq!(Facility::lookup(None, None), None);
        assert_eq!(Facility::lookup(Some(""), None), None);
        assert_eq!(Facility::lookup(Some(" local0"), None), None);
        assert_eq!(
            Facility::lookup(Some("local0 "), Some(Facility::User)),
            Some(Facility::User)
        );
    }

    #[test]
    fn priority_passes_codes_through() {
        assert_eq!(Facility::Local0.priority_of(6), 134);
        assert_eq!(Facility::Kern.priority_of(9), 9);
        assert_eq!(Facility::User.priority_of(-1), 7);
    }

    #[test]
    fn priority_wraps_at_the_i32_bounds() {
        assert_eq!(Facility::Local7.priority_of(i32::MAX), i32::MAX.wrapping_add(184));
        assert_eq!(Facility::Kern.priority_of(i32::MAX), i32::MAX);
        assert_eq!(Facility::Kern.priority_of(i32::MIN), i32::MIN);
    }

    #[test]
    fn parse_and_compare() {
        assert_eq!("log_audit".parse::<Facility>(), Ok(Facility::LogAudit));
        assert!("bogus".parse::<Facility>().is_err());
        assert!(Facility::Authpriv.is_equal("AuthPriv"));
        assert!(!Facility::Auth.is_equal("authpriv"));
        assert!(Facility::Kern.is_equal("kernel"));
        assert_eq!(Facility::Local5.to_string(), "LOCAL5");
    }
}

//! `PatternLayout`: printf-like conversion patterns such as `%-5p %c{1} - %m%n`.

use std::any::Any;

use chrono::{Local, TimeZone};

use super::{Layout, LINE_SEP};
use crate::LoggingEvent;

pub const DEFAULT_CONVERSION_PATTERN: &str = "%m%n";

const ISO8601: &str = "%Y-%m-%d %H:%M:%S,%3f";
const ABSOLUTE: &str = "%H:%M:%S,%3f";
const DATE: &str = "%d %b %Y %H:%M:%S,%3f";

#[derive(Clone, Debug, PartialEq)]
enum Piece {
    Literal(String),
    Conversion(Conversion),
}

#[derive(Clone, Debug, PartialEq)]
struct Conversion {
    kind: char,
    left_align: bool,
    min_width: Option<usize>,
    max_width: Option<usize>,
    /// Text between braces; already translated to a chrono format for `%d`.
    option: Option<String>,
}

/// Renders events through a conversion pattern.
///
/// Supported conversions: `%c{n}` logger (last `n` components), `%d{fmt}`
/// date (`ISO8601`, `ABSOLUTE`, `DATE` or a `SimpleDateFormat` pattern),
/// `%m` message, `%n` newline, `%p` level, `%r` milliseconds since start,
/// `%t` thread, `%%` percent. Location conversions (`%C %F %L %l %M`) print
/// `?` and context conversions (`%x %X`) print nothing. Each conversion may
/// carry `-` (left align), a minimum width and `.max` (truncate from the
/// left).
#[derive(Clone, Debug)]
pub struct PatternLayout {
    pattern: String,
    pieces: Vec<Piece>,
}

impl PatternLayout {
    pub fn new(pattern: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            pieces: parse(pattern),
        }
    }

    pub fn conversion_pattern(&self) -> &str {
        &self.pattern
    }
}

impl Default for PatternLayout {
    fn default() -> Self {
        Self::new(DEFAULT_CONVERSION_PATTERN)
    }
}

impl Layout for PatternLayout {
    fn format(&self, event: &LoggingEvent) -> String {
        let mut out = String::with_capacity(self.pattern.len() + event.message.len());
        for piece in &self.pieces {
            match piece {
                Piece::Literal(text) => out.push_str(text),
                Piece::Conversion(conversion) => {
                    let value = convert(conversion, event);
                    push_aligned(&mut out, &value, conversion);
                }
            }
        }
        out
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn parse(pattern: &str) -> Vec<Piece> {
    let mut pieces = Vec::new();
    let mut literal = String::new();
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            literal.push(c);
            continue;
        }
        let mut conversion = Conversion {
            kind: '\0',
            left_align: false,
            min_width: None,
            max_width: None,
            option: None,
        };
        if chars.peek() == Some(&'-') {
            conversion.left_align = true;
            chars.next();
        }
        conversion.min_width = take_number(&mut chars);
        if chars.peek() == Some(&'.') {
            chars.next();
            conversion.max_width = take_number(&mut chars);
        }
        let Some(kind) = chars.next() else {
            literal.push('%');
            break;
        };
        if kind == '%' {
            literal.push('%');
            continue;
        }
        if !"cCdFlLmMnprtxX".contains(kind) {
            log::warn!("Unexpected conversion character '{}' in pattern {}", kind, pattern);
            literal.push('%');
            literal.push(kind);
            continue;
        }
        conversion.kind = kind;
        if chars.peek() == Some(&'{') {
            chars.next();
            let option: String = chars.by_ref().take_while(|&c| c != '}').collect();
            conversion.option = Some(option);
        }
        if kind == 'd' {
            conversion.option = Some(date_format(conversion.option.as_deref()));
        }

        if !literal.is_empty() {
            pieces.push(Piece::Literal(std::mem::take(&mut literal)));
        }
        pieces.push(Piece::Conversion(conversion));
    }

    if !literal.is_empty() {
        pieces.push(Piece::Literal(literal));
    }
    pieces
}

fn take_number(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Option<usize> {
    let mut digits = String::new();
    while let Some(c) = chars.peek().copied().filter(char::is_ascii_digit) {
        digits.push(c);
        chars.next();
    }
    digits.parse().ok()
}

fn date_format(option: Option<&str>) -> String {
    match option.map(str::trim) {
        None | Some("") | Some("ISO8601") => ISO8601.to_string(),
        Some("ABSOLUTE") => ABSOLUTE.to_string(),
        Some("DATE") => DATE.to_string(),
        Some(java) => to_chrono_format(java),
    }
}

fn convert(conversion: &Conversion, event: &LoggingEvent) -> String {
    match conversion.kind {
        'c' => abbreviate(&event.logger_name, conversion.option.as_deref()),
        'd' => format_millis(
            event.time_stamp,
            conversion.option.as_deref().unwrap_or(ISO8601),
        ),
        'm' => event.message.clone(),
        'n' => LINE_SEP.to_string(),
        'p' => event.level.to_string(),
        'r' => event.relative_time().to_string(),
        't' => event.thread_name.clone(),
        'x' | 'X' => String::new(),
        _ => "?".to_string(),
    }
}

/// Keep the last `n` dot-separated components of a logger name.
fn abbreviate(name: &str, precision: Option<&str>) -> String {
    let Some(n) = precision.and_then(|p| p.trim().parse::<usize>().ok()) else {
        return name.to_string();
    };
    if n == 0 {
        return name.to_string();
    }
    let mut start = name.len();
    for _ in 0..n {
        match name[..start].rfind('.') {
            Some(i) => start = i,
            None => return name.to_string(),
        }
    }
    name[start + 1..].to_string()
}

fn push_aligned(out: &mut String, value: &str, conversion: &Conversion) {
    let mut value = value;
    if let Some(max) = conversion.max_width {
        let len = value.chars().count();
        if len > max {
            let skip = value
                .char_indices()
                .nth(len - max)
                .map(|(i, _)| i)
                .unwrap_or(0);
            value = &value[skip..];
        }
    }
    let len = value.chars().count();
    let pad = conversion.min_width.unwrap_or(0).saturating_sub(len);
    if conversion.left_align {
        out.push_str(value);
        out.extend(std::iter::repeat(' ').take(pad));
    } else {
        out.extend(std::iter::repeat(' ').take(pad));
        out.push_str(value);
    }
}

pub(crate) fn format_millis(millis: i64, format: &str) -> String {
    match Local.timestamp_millis_opt(millis).single() {
        Some(time) => time.format(format).to_string(),
        None => String::new(),
    }
}

/// Translate a `SimpleDateFormat` pattern into a chrono format string.
///
/// ```rust
/// use logbridge_legacy::layout::to_chrono_format;
///
/// assert_eq!(to_chrono_format("yyyy-MM-dd HH:mm:ss,SSS"), "%Y-%m-%d %H:%M:%S,%3f");
/// ```
pub fn to_chrono_format(java: &str) -> String {
    let mut out = String::with_capacity(java.len() * 2);
    let chars: Vec<char> = java.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c == '\'' {
            // Quoted literal; '' is an escaped quote
            let mut j = i + 1;
            if chars.get(j) == Some(&'\'') {
                out.push('\'');
                i += 2;
                continue;
            }
            while j < chars.len() && chars[j] != '\'' {
                push_literal(&mut out, chars[j]);
                j += 1;
            }
            i = j + 1;
            continue;
        }
        let mut run = 1;
        while i + run < chars.len() && chars[i + run] == c {
            run += 1;
        }
        let spec = match (c, run) {
            ('y', 2) => Some("%y"),
            ('y', _) => Some("%Y"),
            ('M', 1..=2) => Some("%m"),
            ('M', 3) => Some("%b"),
            ('M', _) => Some("%B"),
            ('d', _) => Some("%d"),
            ('H', _) => Some("%H"),
            ('h', _) => Some("%I"),
            ('m', _) => Some("%M"),
            ('s', _) => Some("%S"),
            ('S', _) => Some("%3f"),
            ('E', 1..=3) => Some("%a"),
            ('E', _) => Some("%A"),
            ('a', _) => Some("%p"),
            ('Z', _) => Some("%z"),
            ('z', _) => Some("%Z"),
            _ => None,
        };
        match spec {
            Some(spec) => out.push_str(spec),
            None => {
                for _ in 0..run {
                    push_literal(&mut out, c);
                }
            }
        }
        i += run;
    }
    out
}

fn push_literal(out: &mut String, c: char) {
    if c == '%' {
        out.push_str("%%");
    } else {
        out.push(c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Level;

    fn event() -> LoggingEvent {
        let mut event = LoggingEvent::new("org.example.Service", Level::Info, "hello");
        event.thread_name = "main".to_string();
        event
    }

    #[test]
    fn common_pattern() {
        let layout = PatternLayout::new("%-5p [%t] %c{1} - %m%n");
        assert_eq!(layout.format(&event()), "INFO  [main] Service - hello\n");
    }

    #[test]
    fn right_align_and_truncate() {
        let layout = PatternLayout::new("[%6p][%.7c]");
        assert_eq!(layout.format(&event()), "[  INFO][Service]");
    }

    #[test]
    fn precision_keeps_trailing_components() {
        assert_eq!(abbreviate("a.b.c", Some("2")), "b.c");
        assert_eq!(abbreviate("a.b.c", Some("5")), "a.b.c");
        assert_eq!(abbreviate("plain", Some("1")), "plain");
    }

    #[test]
    fn literals_and_unknown_conversions() {
        let layout = PatternLayout::new("100%% %q %");
        assert_eq!(layout.format(&event()), "100% %q %");
        assert_eq!(PatternLayout::default().format(&event()), "hello\n");
    }

    #[test]
    fn date_conversion_renders() {
        let layout = PatternLayout::new("%d{yyyy}");
        let rendered = layout.format(&event());
        assert_eq!(rendered.len(), 4);
        assert!(rendered.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn java_date_patterns() {
        assert_eq!(to_chrono_format("dd MMM yy"), "%d %b %y");
        assert_eq!(to_chrono_format("HH:mm 'at' EEE"), "%H:%M at %a");
        assert_eq!(to_chrono_format("''%"), "'%%");
    }
}

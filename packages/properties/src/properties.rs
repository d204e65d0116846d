//! Reader for the `.properties` text format.
//!
//! Supported syntax: `key=value`, `key:value` and `key value` separators,
//! `#` and `!` comment lines, backslash line continuation, and the escapes
//! `\t \n \r \f \uXXXX`. Any other escaped character stands for itself.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::ConfigError;

/// Ordered key/value pairs as read from a properties source.
///
/// Iteration follows first insertion. Setting an existing key replaces its
/// value in place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Properties {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse properties text.
    ///
    /// ```rust
    /// use logbridge_properties::Properties;
    ///
    /// let props = Properties::parse("log4j.rootLogger = INFO, A1\n# comment\n").unwrap();
    /// assert_eq!(props.get("log4j.rootLogger"), Some("INFO, A1"));
    /// ```
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut properties = Properties::new();
        let mut lines = text.lines().enumerate();

        while let Some((index, raw)) = lines.next() {
            let line = index + 1;
            let trimmed = raw.trim_start_matches(is_whitespace);
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                continue;
            }

            let mut logical = trimmed.to_string();
            while ends_with_continuation(&logical) {
                logical.pop();
                match lines.next() {
                    Some((_, next)) => logical.push_str(next.trim_start_matches(is_whitespace)),
                    None => break,
                }
            }

            let (key, value) = split_key_value(&logical);
            properties.set(unescape(key, line)?, unescape(value, line)?);
        }

        Ok(properties)
    }

    /// Read and parse a properties file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded {} bytes of properties from {}", text.len(), path.display());
        Self::parse(&text)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.index
            .get(key)
            .map(|&position| self.entries[position].1.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Insert or replace `key`. Returns the previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.index.get(&key) {
            Some(&position) => Some(std::mem::replace(&mut self.entries[position].1, value)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut properties = Properties::new();
        for (key, value) in iter {
            properties.set(key, value);
        }
        properties
    }
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

fn split_key_value(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '=' || c == ':' || is_whitespace(c) {
            key_end = i;
            break;
        }
    }

    let key = &line[..key_end];
    let mut rest = line[key_end..].trim_start_matches(is_whitespace);
    if let Some(stripped) = rest.strip_prefix(|c: char| c == '=' || c == ':') {
        rest = stripped.trim_start_matches(is_whitespace);
    }
    (key, rest)
}

fn unescape(text: &str, line: usize) -> Result<String, ConfigError> {
    if !text.contains('\\') {
        return Ok(text.to_string());
    }

    let mut out = String::with_capacity(text.len());
    let mut high_surrogate: Option<u16> = None;
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            flush_surrogate(&mut out, &mut high_surrogate);
            out.push(c);
            continue;
        }
        let Some(escaped) = chars.next() else {
            break;
        };
        if escaped != 'u' {
            flush_surrogate(&mut out, &mut high_surrogate);
            out.push(match escaped {
                't' => '\t',
                'n' => '\n',
                'r' => '\r',
                'f' => '\x0c',
                other => other,
            });
            continue;
        }

        let digits: String = chars.by_ref().take(4).collect();
        let unit = match u16::from_str_radix(&digits, 16) {
            Ok(unit) if digits.len() == 4 => unit,
            _ => {
                return Err(ConfigError::Parse {
                    line,
                    message: format!("malformed \\uXXXX encoding '\\u{}'", digits),
                })
            }
        };
        match (high_surrogate.take(), unit) {
            (Some(high), 0xDC00..=0xDFFF) => {
                out.extend(char::decode_utf16([high, unit]).map(|r| r.unwrap_or('\u{FFFD}')));
            }
            (pending, 0xD800..=0xDBFF) => {
                if pending.is_some() {
                    out.push('\u{FFFD}');
                }
                high_surrogate = Some(unit);
            }
            (pending, _) => {
                if pending.is_some() {
                    out.push('\u{FFFD}');
                }
                out.push(char::from_u32(u32::from(unit)).unwrap_or('\u{FFFD}'));
            }
        }
    }
    flush_surrogate(&mut out, &mut high_surrogate);
    Ok(out)
}

fn flush_surrogate(out: &mut String, high_surrogate: &mut Option<u16>) {
    if high_surrogate.take().is_some() {
        out.push('\u{FFFD}');
    }
}

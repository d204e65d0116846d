//! `${name}` placeholder substitution.
//!
//! Substitution is a pure function of the text and a [`Lookup`]; it never
//! touches process state and never fails. Placeholders whose name the
//! lookup does not know are left exactly as written.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::{Captures, Regex, Replacer};

use crate::Properties;

/// How many times a substituted value may itself be substituted.
pub const MAX_SUBSTITUTION_DEPTH: usize = 16;

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"\$\{([^${}]+)\}").unwrap();
}

/// A source of placeholder values.
pub trait Lookup {
    fn lookup(&self, name: &str) -> Option<String>;

    /// Consult `fallback` for names this lookup does not know.
    fn or<L: Lookup>(self, fallback: L) -> Chain<Self, L>
    where
        Self: Sized,
    {
        Chain {
            first: self,
            second: fallback,
        }
    }
}

impl<L: Lookup + ?Sized> Lookup for &L {
    fn lookup(&self, name: &str) -> Option<String> {
        (**self).lookup(name)
    }
}

/// Reads the process environment.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnvLookup;

impl Lookup for EnvLookup {
    fn lookup(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Fixed name/value pairs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MapLookup {
    values: HashMap<String, String>,
}

impl MapLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.insert(name.into(), value.into());
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapLookup {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl Lookup for MapLookup {
    fn lookup(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }
}

impl Lookup for Properties {
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).map(str::to_string)
    }
}

/// Two lookups consulted in order. Built with [`Lookup::or`].
#[derive(Clone, Debug)]
pub struct Chain<A, B> {
    first: A,
    second: B,
}

impl<A: Lookup, B: Lookup> Lookup for Chain<A, B> {
    fn lookup(&self, name: &str) -> Option<String> {
        self.first
            .lookup(name)
            .or_else(|| self.second.lookup(name))
    }
}

struct Resolver<'a> {
    lookup: &'a dyn Lookup,
    depth: usize,
}

impl Replacer for Resolver<'_> {
    fn replace_append(&mut self, captures: &Captures<'_>, destination: &mut String) {
        match self.lookup.lookup(&captures[1]) {
            Some(value) if self.depth < MAX_SUBSTITUTION_DEPTH => {
                destination.push_str(&expand(&value, self.lookup, self.depth + 1));
            }
            Some(value) => destination.push_str(&value),
            None => destination.push_str(&captures[0]),
        }
    }
}

fn expand(text: &str, lookup: &dyn Lookup, depth: usize) -> String {
    if !text.contains("${") {
        return text.to_string();
    }
    PLACEHOLDER
        .replace_all(text, Resolver { lookup, depth })
        .into_owned()
}

/// Replace every `${name}` in `text` with its value from `lookup`.
///
/// ```rust
/// use logbridge_properties::{substitute, MapLookup};
///
/// let lookup: MapLookup = [("dir", "/var/log")].into_iter().collect();
/// assert_eq!(substitute("${dir}/app.log", &lookup), "/var/log/app.log");
/// assert_eq!(substitute("${nope}/app.log", &lookup), "${nope}/app.log");
/// ```
pub fn substitute(text: &str, lookup: &dyn Lookup) -> String {
    expand(text, lookup, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup() -> MapLookup {
        [
            ("home", "/home/app"),
            ("logs", "${home}/logs"),
            ("loop", "${loop}"),
            ("b", "B"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn replaces_known_names() {
        assert_eq!(substitute("${home}", &lookup()), "/home/app");
        assert_eq!(substitute("x ${b} y ${b}", &lookup()), "x B y B");
        assert_eq!(substitute("plain", &lookup()), "plain");
    }

    #[test]
    fn values_are_expanded() {
        assert_eq!(substitute("${logs}/a.log", &lookup()), "/home/app/logs/a.log");
    }

    #[test]
    fn misses_stay_literal() {
        assert_eq!(substitute("${missing}", &lookup()), "${missing}");
        assert_eq!(substitute("${}", &lookup()), "${}");
        assert_eq!(substitute("${unterminated", &lookup()), "${unterminated");
    }

    #[test]
    fn nested_names_are_not_composed() {
        assert_eq!(substitute("${a${b}}", &lookup()), "${aB}");
    }

    #[test]
    fn self_reference_terminates() {
        assert_eq!(substitute("${loop}", &lookup()), "${loop}");
    }

    #[test]
    fn chain_prefers_first() {
        let first: MapLookup = [("k", "first")].into_iter().collect();
        let second: MapLookup = [("k", "second"), ("only", "second")].into_iter().collect();
        let chain = first.or(second);
        assert_eq!(chain.lookup("k").as_deref(), Some("first"));
        assert_eq!(chain.lookup("only").as_deref(), Some("second"));
        assert_eq!(chain.lookup("none"), None);
    }

    #[test]
    fn properties_are_a_lookup() {
        let props: Properties = [("dir", "/tmp")].into_iter().collect();
        assert_eq!(substitute("${dir}/x", &props), "/tmp/x");
    }

    #[test]
    fn environment_lookup() {
        let path = std::env::var("PATH").ok();
        assert_eq!(EnvLookup.lookup("PATH"), path);
        assert_eq!(EnvLookup.lookup("LOGBRIDGE_SURELY_UNSET_VARIABLE"), None);
    }
}

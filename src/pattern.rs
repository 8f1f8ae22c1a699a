//! Compiled patterns.
//!
//! A [`Pattern`] pairs the pattern text and flag string with a compiled
//! `fancy_regex::Regex`. Flags follow the usual single-letter dialect:
//! `g` global search, `i` ignore case, `m` multi-line anchors, `s` dot
//! matches newline, `u` Unicode (always on here).
//!
//! Because the engine is always Unicode-aware, `\d`, `\w` and `\s` match
//! Unicode digits, word characters and spaces whether or not `u` is set
//! (`\d` matches `٣`, U+0663). Dialects that keep these classes ASCII-only
//! without `u` match less; use `char_of_ranges` for an ASCII-only class.

use std::fmt;

use crate::error::{Error, Result};
use crate::parser::Parser;
use crate::root::Flags;
use crate::stringify::EMPTY_PATTERN;

#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    flags: Flags,
    backend: fancy_regex::Regex,
}

impl Pattern {
    /// Compiles `source` with the given flag letters.
    pub fn new(source: &str, flags: &str) -> Result<Self> {
        let flags = Flags::from(flags);
        for flag in flags.iter() {
            match flag {
                'g' | 'i' | 'm' | 's' | 'u' => {}
                'd' | 'v' | 'y' => return Err(Error::UnsupportedFlag(flag)),
                other => return Err(Error::InvalidFlag(other)),
            }
        }

        let source = if source.is_empty() {
            EMPTY_PATTERN
        } else {
            source
        };
        let backend = fancy_regex::RegexBuilder::new(source)
            .case_insensitive(flags.contains('i'))
            .multi_line(flags.contains('m'))
            .dot_matches_new_line(flags.contains('s'))
            .build()?;
        log::debug!("compiled pattern /{source}/{flags}");

        Ok(Self {
            source: source.to_owned(),
            flags,
            backend,
        })
    }

    /// Compiles a slash-delimited literal such as `/a+b/gi`.
    pub fn parse(literal: &str) -> Result<Self> {
        let parsed = Parser::new(literal).parse()?;
        Self::new(&parsed.source, &parsed.flags)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Flag letters in canonical order.
    pub fn flags(&self) -> String {
        self.flags.to_string()
    }

    pub fn has_flag(&self, flag: char) -> bool {
        self.flags.contains(flag)
    }

    pub fn is_global(&self) -> bool {
        self.flags.contains('g')
    }

    pub fn is_match(&self, haystack: &str) -> Result<bool> {
        Ok(self.backend.is_match(haystack)?)
    }

    pub fn find(&self, haystack: &str) -> Result<Option<Match>> {
        let matched = self.backend.find(haystack)?;
        Ok(matched.map(Match::from_backend))
    }

    /// All matches when global, otherwise at most the first one.
    pub fn find_all(&self, haystack: &str) -> Result<Vec<Match>> {
        if !self.is_global() {
            return Ok(self.find(haystack)?.into_iter().collect());
        }
        let mut out = Vec::new();
        for matched in self.backend.find_iter(haystack) {
            out.push(Match::from_backend(matched?));
        }
        Ok(out)
    }

    pub fn captures(&self, haystack: &str) -> Result<Option<Captures>> {
        let captures = self.backend.captures(haystack)?;
        Ok(captures.map(|captures| Captures::from_backend(&self.backend, &captures)))
    }

    /// Replaces matches with `replacement`, taken literally. Replaces every
    /// match when global, otherwise only the first.
    pub fn replace(&self, haystack: &str, replacement: &str) -> Result<String> {
        let mut out = String::with_capacity(haystack.len());
        let mut last = 0;
        for matched in self.find_all(haystack)? {
            out.push_str(&haystack[last..matched.start()]);
            out.push_str(replacement);
            last = matched.end();
        }
        out.push_str(&haystack[last..]);
        Ok(out)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.flags == other.flags
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.source, self.flags)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    start: usize,
    end: usize,
    text: String,
}

impl Match {
    fn from_backend(matched: fancy_regex::Match<'_>) -> Self {
        Self {
            start: matched.start(),
            end: matched.end(),
            text: matched.as_str().to_owned(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }
}

/// Groups of one successful match, by index and by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captures {
    groups: Vec<Option<Match>>,
    names: Vec<Option<String>>,
}

impl Captures {
    fn from_backend(regex: &fancy_regex::Regex, captures: &fancy_regex::Captures<'_>) -> Self {
        let groups = (0..captures.len())
            .map(|idx| captures.get(idx).map(Match::from_backend))
            .collect();
        let names = regex
            .capture_names()
            .map(|name| name.map(str::to_owned))
            .collect();
        Self { groups, names }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Match> {
        self.groups.get(index).and_then(Option::as_ref)
    }

    pub fn name(&self, name: &str) -> Option<&Match> {
        let index = self
            .names
            .iter()
            .position(|candidate| candidate.as_deref() == Some(name))?;
        self.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_source_becomes_empty_group() {
        let pattern = Pattern::new("", "").unwrap();
        assert_eq!(pattern.source(), "(?:)");
        assert!(pattern.is_match("anything").unwrap());
    }

    #[test]
    fn flags_are_validated() {
        assert!(matches!(Pattern::new("a", "gx"), Err(Error::InvalidFlag('x'))));
        assert!(matches!(Pattern::new("a", "y"), Err(Error::UnsupportedFlag('y'))));
        assert_eq!(Pattern::new("a", "mig").unwrap().flags(), "gim");
    }

    #[test]
    fn syntax_errors_propagate() {
        assert!(matches!(Pattern::new("(a", "g"), Err(Error::Regex(_))));
    }

    #[test]
    fn case_insensitive_flag() {
        let pattern = Pattern::new("abc", "i").unwrap();
        assert!(pattern.is_match("xABCx").unwrap());
        assert!(!Pattern::new("abc", "").unwrap().is_match("ABC").unwrap());
    }

    #[test]
    fn multi_line_flag() {
        let text = "one\ntwo";
        assert!(Pattern::new("^two$", "m").unwrap().is_match(text).unwrap());
        assert!(!Pattern::new("^two$", "").unwrap().is_match(text).unwrap());
    }

    #[test]
    fn dot_all_flag() {
        assert!(Pattern::new("a.b", "s").unwrap().is_match("a\nb").unwrap());
        assert!(!Pattern::new("a.b", "").unwrap().is_match("a\nb").unwrap());
    }

    #[test]
    fn shorthand_classes_are_unicode_aware() {
        let digit = Pattern::new(r"^\d$", "").unwrap();
        assert!(digit.is_match("\u{0663}").unwrap());
        let ascii = Pattern::new("^[0-9]$", "").unwrap();
        assert!(!ascii.is_match("\u{0663}").unwrap());
    }

    #[test]
    fn replace_honors_global() {
        let global = Pattern::new("o", "g").unwrap();
        assert_eq!(global.replace("foo boo", "0").unwrap(), "f00 b00");
        let first = Pattern::new("o", "").unwrap();
        assert_eq!(first.replace("foo boo", "0").unwrap(), "f0o boo");
    }

    #[test]
    fn named_captures() {
        let pattern = Pattern::new("(?<year>[0-9]{4})-(?<month>[0-9]{2})", "").unwrap();
        let captures = pattern.captures("on 2024-05").unwrap().unwrap();
        assert_eq!(captures.name("year").unwrap().as_str(), "2024");
        assert_eq!(captures.name("month").unwrap().as_str(), "05");
        assert_eq!(captures.get(0).unwrap().start(), 3);
        assert!(captures.name("day").is_none());
    }

    #[test]
    fn parses_literals() {
        let pattern = Pattern::parse("/^a+$/gi").unwrap();
        assert_eq!(pattern.source(), "^a+$");
        assert_eq!(pattern.flags(), "gi");
        assert_eq!(pattern.to_string(), "/^a+$/gi");
    }
}

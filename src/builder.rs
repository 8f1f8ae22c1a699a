use std::fmt;

use crate::ast::{ConcatKind, Node};
use crate::combinators as ops;
use crate::error::Result;
use crate::pattern::Pattern;
use crate::root::{RootNode, RootOptions};
use crate::stringify::{stringify, Stringified, EMPTY_PATTERN};

/// Anything a builder step accepts as its argument.
#[derive(Debug, Clone)]
pub enum Value {
    /// Literal text, escaped before use.
    Text(String),
    /// Decimal text of a number, used as is.
    ///
    /// The text comes from Rust's `Display`, which never uses exponent
    /// notation: `1e21` becomes `1000000000000000000000` and
    /// `f64::INFINITY` becomes `inf`.
    Number(String),
    /// A compiled pattern, taken apart into anchors, body and flags.
    Pattern(Pattern),
    Builder(ReStructor),
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_owned())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<&String> for Value {
    fn from(text: &String) -> Self {
        Value::Text(text.clone())
    }
}

macro_rules! number_values {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Number(n.to_string())
                }
            }
        )*
    };
}

number_values!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl From<Pattern> for Value {
    fn from(pattern: Pattern) -> Self {
        Value::Pattern(pattern)
    }
}

impl From<&Pattern> for Value {
    fn from(pattern: &Pattern) -> Self {
        Value::Pattern(pattern.clone())
    }
}

impl From<ReStructor> for Value {
    fn from(builder: ReStructor) -> Self {
        Value::Builder(builder)
    }
}

impl From<&ReStructor> for Value {
    fn from(builder: &ReStructor) -> Self {
        Value::Builder(builder.clone())
    }
}

/// Root options for a compiled pattern: a leading `^` and a trailing,
/// unescaped `$` move out of the body into the anchors.
fn pattern_options(pattern: &Pattern) -> RootOptions {
    let mut body = match pattern.source() {
        EMPTY_PATTERN => "",
        source => source,
    };
    let prefix = match body.strip_prefix('^') {
        Some(rest) => {
            body = rest;
            "^"
        }
        None => "",
    };
    let suffix = match body.strip_suffix('$') {
        Some(rest) if !ends_with_escape(rest) => {
            body = rest;
            "$"
        }
        _ => "",
    };
    RootOptions {
        prefix: Some(prefix.to_owned()),
        suffix: Some(suffix.to_owned()),
        flags: Some(pattern.flags()),
        source: Some(body.to_owned()),
        sanitize: Some(false),
        ..RootOptions::default()
    }
}

// An odd run of trailing backslashes escapes whatever follows.
fn ends_with_escape(text: &str) -> bool {
    text.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

/// Builds a pattern by chaining readable steps.
///
/// A builder never changes: every step returns a new one, so a builder
/// can be reused as a building block in as many chains as needed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReStructor {
    root: RootNode,
}

impl ReStructor {
    /// An empty builder with the default `gm` flags.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_root(root: RootNode) -> Self {
        Self { root }
    }

    pub fn from_node(node: Node) -> Self {
        Self::from_root(RootNode::from_node(node))
    }

    pub fn of(value: impl Into<Value>) -> Self {
        let options = match value.into() {
            Value::Builder(builder) => return builder,
            Value::Text(text) => RootOptions {
                source: Some(text),
                sanitize: Some(true),
                ..RootOptions::default()
            },
            Value::Number(text) => RootOptions {
                source: Some(text),
                sanitize: Some(false),
                ..RootOptions::default()
            },
            Value::Pattern(pattern) => pattern_options(&pattern),
        };
        Self::from_root(RootNode::new(options))
    }

    /// Matches any one of `values`.
    pub fn or_all<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::from_node(ops::alt(values.into_iter().map(|v| Self::of(v).root.node().clone())))
    }

    /// Matches all of `values`, one after the other.
    pub fn seq_all<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::from_node(ops::seq(
            values.into_iter().map(|v| Self::of(v).root.node().clone()),
            ConcatKind::Conjunction,
        ))
    }

    pub fn root(&self) -> &RootNode {
        &self.root
    }

    pub fn node(&self) -> &Node {
        self.root.node()
    }

    fn map_node(&self, f: impl FnOnce(Node) -> Node) -> Self {
        Self::from_root(self.root.with_node(f(self.node().clone())))
    }

    fn value_node(value: impl Into<Value>) -> Node {
        Self::of(value).root.node().clone()
    }

    // Rules

    pub fn assert_start_of_line(&self, enable: bool) -> Self {
        Self::from_root(self.root.with_prefix(if enable { "^" } else { "" }))
    }

    pub fn assert_end_of_line(&self, enable: bool) -> Self {
        Self::from_root(self.root.with_suffix(if enable { "$" } else { "" }))
    }

    /// Appends `value`. Drops any end-of-line anchor.
    pub fn then(&self, value: impl Into<Value>) -> Self {
        let next = Self::value_node(value);
        let root = self.root.with_suffix("");
        Self::from_root(root.with_node(ops::and_(self.node().clone(), next)))
    }

    /// Appends an optional `value`. Drops any end-of-line anchor.
    pub fn maybe(&self, value: impl Into<Value>) -> Self {
        let next = Self::value_node(value);
        let root = self.root.with_suffix("");
        Self::from_root(root.with_node(ops::maybe(self.node().clone(), next)))
    }

    pub fn or(&self, value: impl Into<Value>) -> Self {
        let other = Self::value_node(value);
        self.map_node(|node| ops::or_(node, other))
    }

    pub fn anything(&self, lazy: bool) -> Self {
        self.map_node(|node| ops::anything(node, lazy))
    }

    pub fn anything_but(&self, chars: &str, lazy: bool) -> Self {
        self.map_node(|node| ops::anything_but(node, chars, lazy))
    }

    pub fn something(&self) -> Self {
        self.map_node(ops::something)
    }

    pub fn something_but(&self, chars: &str) -> Self {
        self.map_node(|node| ops::something_but(node, chars))
    }

    /// Optionally one character out of `chars`.
    pub fn any_of(&self, chars: &str) -> Self {
        self.map_node(|node| ops::any_of(node, chars))
    }

    /// Shorthand for [`any_of`](Self::any_of).
    pub fn any(&self, chars: &str) -> Self {
        self.any_of(chars)
    }

    pub fn some_of(&self, chars: &str) -> Self {
        self.map_node(|node| ops::some_of(node, chars))
    }

    pub fn one_of(&self, chars: &str) -> Self {
        self.map_node(|node| ops::one_of(node, chars))
    }

    pub fn assert_followed_by(&self, value: impl Into<Value>) -> Self {
        let lookahead = Self::value_node(value);
        self.map_node(|node| ops::followed_by(node, lookahead))
    }

    pub fn followed_by(&self, value: impl Into<Value>) -> Self {
        self.assert_followed_by(value)
    }

    pub fn assert_not_followed_by(&self, value: impl Into<Value>) -> Self {
        let lookahead = Self::value_node(value);
        self.map_node(|node| ops::not_followed_by(node, lookahead))
    }

    pub fn not_followed_by(&self, value: impl Into<Value>) -> Self {
        self.assert_not_followed_by(value)
    }

    pub fn char_of_ranges<S: AsRef<str>>(&self, pairs: &[(S, S)]) -> Self {
        self.map_node(|node| ops::ranges(node, pairs, false))
    }

    pub fn char_not_of_ranges<S: AsRef<str>>(&self, pairs: &[(S, S)]) -> Self {
        self.map_node(|node| ops::ranges(node, pairs, true))
    }

    /// Like [`char_of_ranges`](Self::char_of_ranges) over a flat
    /// `[from, to, from, to, ...]` list.
    pub fn char_of_flat_ranges<S: AsRef<str>>(&self, items: &[S]) -> Result<Self> {
        let pairs = ops::range_pairs(items)?;
        Ok(self.char_of_ranges(&pairs))
    }

    pub fn char_not_of_flat_ranges<S: AsRef<str>>(&self, items: &[S]) -> Result<Self> {
        let pairs = ops::range_pairs(items)?;
        Ok(self.char_not_of_ranges(&pairs))
    }

    // Special characters

    pub fn line_break(&self) -> Self {
        self.then(Self::from_node(ops::linebreak()))
    }

    pub fn br(&self) -> Self {
        self.line_break()
    }

    pub fn tab(&self) -> Self {
        self.then(Self::from_node(ops::tab()))
    }

    pub fn word(&self) -> Self {
        self.then(Self::from_node(ops::word()))
    }

    pub fn digit(&self) -> Self {
        self.then(Self::from_node(ops::digit()))
    }

    pub fn whitespace(&self) -> Self {
        self.then(Self::from_node(ops::whitespace()))
    }

    // Modifiers

    pub fn add_flag(&self, flags: &str) -> Self {
        Self::from_root(self.root.add_flags(flags))
    }

    pub fn remove_flag(&self, flags: &str) -> Self {
        Self::from_root(self.root.remove_flags(flags))
    }

    pub fn has_flag(&self, flag: char) -> bool {
        self.root.has_flag(flag)
    }

    pub fn toggle_flag(&self, flag: char) -> Self {
        self.set_flag(flag, !self.has_flag(flag))
    }

    /// Ignore case (`i`).
    pub fn with_any_case(&self, enable: bool) -> Self {
        self.set_flag('i', enable)
    }

    /// Stop after the first match, i.e. drop `g`.
    pub fn stop_at_first(&self, enable: bool) -> Self {
        self.set_flag('g', !enable)
    }

    pub fn global(&self, enable: bool) -> Self {
        self.set_flag('g', enable)
    }

    /// Let `^` and `$` anchor to the whole text only, i.e. drop `m`.
    pub fn search_one_line(&self, enable: bool) -> Self {
        self.set_flag('m', !enable)
    }

    fn set_flag(&self, flag: char, enable: bool) -> Self {
        let flag = flag.to_string();
        if enable {
            self.add_flag(&flag)
        } else {
            self.remove_flag(&flag)
        }
    }

    // Loops

    /// Repeat between `min` and `max` times. Bounds are reordered and
    /// clamped at zero.
    pub fn repeat(&self, min: Option<i64>, max: Option<i64>) -> Self {
        self.map_node(|node| ops::repeat(node, min, max))
    }

    pub fn repeat_exactly(&self, n: usize) -> Self {
        self.map_node(|node| ops::repeat_exact(node, n))
    }

    pub fn one_or_more(&self) -> Self {
        self.map_node(ops::one_or_more)
    }

    pub fn zero_or_more(&self, lazy: bool) -> Self {
        self.map_node(|node| ops::zero_or_more(node, lazy))
    }

    // Capture groups

    pub fn capture(&self, name: Option<&str>) -> Self {
        self.map_node(|node| ops::group(node, name.map(str::to_owned)))
    }

    pub fn group(&self, name: Option<&str>) -> Self {
        self.capture(name)
    }

    // Output

    pub fn stringify(&self) -> Stringified {
        stringify(&self.root)
    }

    pub fn compile(&self) -> Result<Pattern> {
        let Stringified { source, flags } = self.stringify();
        Pattern::new(&source, &flags)
    }
}

impl fmt::Display for ReStructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Stringified { source, flags } = self.stringify();
        write!(f, "/{source}/{flags}")
    }
}

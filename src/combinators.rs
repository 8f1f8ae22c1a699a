//! Pure functions building new nodes out of existing ones.
//!
//! None of them touch their arguments; each returns a fresh node that may
//! share sub-trees with its inputs.

use crate::ast::{CharPart, ConcatKind, Greed, LookaheadKind, Node, QuantifierKind};
use crate::error::{Error, Result};
use crate::escape::{escape_chars_for_literals, sanitize};

/// Literal text, escaped so that it matches itself.
pub fn literal(text: &str) -> Node {
    Node::exact(sanitize(text))
}

/// Concatenation with `Empty` as identity.
pub fn and_(a: Node, b: Node) -> Node {
    match (a, b) {
        (Node::Empty, b) => b,
        (a, Node::Empty) => a,
        (a, b) => Node::concat(a, b, ConcatKind::Conjunction),
    }
}

/// Alternation. Only two empty sides collapse; `Empty | x` stays an
/// alternative that also matches the empty string.
pub fn or_(a: Node, b: Node) -> Node {
    match (a, b) {
        (Node::Empty, Node::Empty) => Node::Empty,
        (a, b) => Node::concat(a, b, ConcatKind::Disjunction),
    }
}

/// Left fold of `nodes` with `kind`, skipping `Empty` entries.
pub fn seq<I>(nodes: I, kind: ConcatKind) -> Node
where
    I: IntoIterator<Item = Node>,
{
    nodes
        .into_iter()
        .filter(|node| !node.is_empty())
        .fold(Node::Empty, |acc, node| match acc {
            Node::Empty => node,
            acc => Node::concat(acc, node, kind),
        })
}

pub fn alt<I>(nodes: I) -> Node
where
    I: IntoIterator<Item = Node>,
{
    seq(nodes, ConcatKind::Disjunction)
}

pub fn optional(node: Node) -> Node {
    Node::quantifier(node, QuantifierKind::ZeroOrOne)
}

pub fn maybe(a: Node, b: Node) -> Node {
    and_(a, optional(b))
}

fn greed(lazy: bool) -> Greed {
    if lazy {
        Greed::Lazy
    } else {
        Greed::Greedy
    }
}

fn any_char() -> Node {
    Node::exact(".")
}

fn class_of(chars: &str, negative: bool) -> Node {
    Node::chars(vec![CharPart::Chars(escape_chars_for_literals(chars))], negative)
}

pub fn anything(node: Node, lazy: bool) -> Node {
    Node::concat(
        node,
        Node::quantifier(any_char(), QuantifierKind::ZeroOrMore(greed(lazy))),
        ConcatKind::Conjunction,
    )
}

pub fn something(node: Node) -> Node {
    Node::concat(
        node,
        Node::quantifier(any_char(), QuantifierKind::OneOrMore),
        ConcatKind::Conjunction,
    )
}

pub fn anything_but(node: Node, chars: &str, lazy: bool) -> Node {
    Node::concat(
        node,
        Node::quantifier(class_of(chars, true), QuantifierKind::ZeroOrMore(greed(lazy))),
        ConcatKind::Conjunction,
    )
}

pub fn something_but(node: Node, chars: &str) -> Node {
    Node::concat(
        node,
        Node::quantifier(class_of(chars, true), QuantifierKind::OneOrMore),
        ConcatKind::Conjunction,
    )
}

/// An optional single character out of `chars`.
pub fn any_of(node: Node, chars: &str) -> Node {
    Node::concat(
        node,
        Node::quantifier(class_of(chars, false), QuantifierKind::ZeroOrOne),
        ConcatKind::Conjunction,
    )
}

pub fn some_of(node: Node, chars: &str) -> Node {
    Node::concat(
        node,
        Node::quantifier(class_of(chars, false), QuantifierKind::OneOrMore),
        ConcatKind::Conjunction,
    )
}

pub fn one_of(node: Node, chars: &str) -> Node {
    Node::concat(node, class_of(chars, false), ConcatKind::Conjunction)
}

pub fn zero_or_more(node: Node, lazy: bool) -> Node {
    Node::quantifier(node, QuantifierKind::ZeroOrMore(greed(lazy)))
}

pub fn one_or_more(node: Node) -> Node {
    Node::quantifier(node, QuantifierKind::OneOrMore)
}

pub fn followed_by(node: Node, lookahead: Node) -> Node {
    Node::lookahead(node, lookahead, LookaheadKind::Positive)
}

pub fn not_followed_by(node: Node, lookahead: Node) -> Node {
    Node::lookahead(node, lookahead, LookaheadKind::Negative)
}

/// Appends a class made of `(from, to)` ranges to `node`.
pub fn ranges<S>(node: Node, pairs: &[(S, S)], negate: bool) -> Node
where
    S: AsRef<str>,
{
    let parts = pairs
        .iter()
        .map(|(from, to)| {
            CharPart::Range(
                escape_chars_for_literals(from.as_ref()),
                escape_chars_for_literals(to.as_ref()),
            )
        })
        .collect();
    and_(node, Node::chars(parts, negate))
}

/// Pairs up a flat `[from, to, from, to, ...]` list.
pub fn range_pairs<S>(items: &[S]) -> Result<Vec<(String, String)>>
where
    S: AsRef<str>,
{
    if items.len() % 2 != 0 {
        return Err(Error::OddRangeList { len: items.len() });
    }
    Ok(items
        .chunks_exact(2)
        .map(|pair| (pair[0].as_ref().to_owned(), pair[1].as_ref().to_owned()))
        .collect())
}

/// Repeats `node` between `low` and `high` times.
///
/// Out-of-order bounds are swapped and negative ones clamped to zero. A
/// single bound is taken as the lower one, with no upper limit.
pub fn repeat(node: Node, low: Option<i64>, high: Option<i64>) -> Node {
    let clamp = |n: i64| n.max(0) as usize;
    let (min, max) = match (low, high) {
        (Some(low), Some(high)) => (Some(clamp(low.min(high))), Some(clamp(low.max(high)))),
        (Some(bound), None) | (None, Some(bound)) => (Some(clamp(bound)), None),
        (None, None) => (None, None),
    };
    Node::quantifier(node, QuantifierKind::MinMax(min, max))
}

pub fn repeat_exact(node: Node, n: usize) -> Node {
    Node::quantifier(node, QuantifierKind::Exact(n))
}

pub fn group(node: Node, name: Option<String>) -> Node {
    Node::capture_group(node, name)
}

// Predefined atoms.

pub fn tab() -> Node {
    Node::exact(r"\t")
}

pub fn digit() -> Node {
    Node::exact(r"\d")
}

pub fn whitespace() -> Node {
    Node::exact(r"\s")
}

pub fn word() -> Node {
    one_or_more(Node::exact(r"\w"))
}

/// `\r\n`, `\r` or `\n`.
pub fn linebreak() -> Node {
    alt([
        and_(Node::exact(r"\r"), Node::exact(r"\n")),
        Node::exact(r"\r"),
        Node::exact(r"\n"),
    ])
}

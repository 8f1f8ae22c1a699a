use std::sync::Arc;

/// A node of the pattern tree.
///
/// Nodes are immutable. Children sit behind `Arc`, so a sub-tree can be
/// shared between any number of parents without copying it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Node {
    /// The empty pattern. Neutral element of concatenation.
    #[default]
    Empty,
    Match(MatchAtom),
    Concat {
        left: Arc<Node>,
        right: Arc<Node>,
        kind: ConcatKind,
    },
    Quantifier {
        node: Arc<Node>,
        kind: QuantifierKind,
    },
    Lookahead {
        node: Arc<Node>,
        lookahead: Arc<Node>,
        kind: LookaheadKind,
    },
    CaptureGroup {
        node: Arc<Node>,
        name: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchAtom {
    /// Pattern text already in regex syntax.
    Exact(String),
    /// Body of a character class, rendered as `[...]` or `[^...]`.
    Chars { parts: Vec<CharPart>, negative: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CharPart {
    /// A run of characters, already escaped for class context.
    Chars(String),
    /// `from-to`, both ends already escaped for class context.
    Range(String, String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConcatKind {
    Conjunction,
    Disjunction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Greed {
    Greedy,
    Lazy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantifierKind {
    ZeroOrOne,
    OneOrMore,
    ZeroOrMore(Greed),
    MinMax(Option<usize>, Option<usize>),
    Exact(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookaheadKind {
    Positive,
    Negative,
}

impl Node {
    /// Wraps raw pattern text without escaping it.
    pub fn exact(text: impl Into<String>) -> Self {
        Node::Match(MatchAtom::Exact(text.into()))
    }

    pub fn chars(parts: Vec<CharPart>, negative: bool) -> Self {
        Node::Match(MatchAtom::Chars { parts, negative })
    }

    pub fn concat(left: Node, right: Node, kind: ConcatKind) -> Self {
        Node::Concat {
            left: Arc::new(left),
            right: Arc::new(right),
            kind,
        }
    }

    pub fn quantifier(node: Node, kind: QuantifierKind) -> Self {
        Node::Quantifier {
            node: Arc::new(node),
            kind,
        }
    }

    pub fn lookahead(node: Node, lookahead: Node, kind: LookaheadKind) -> Self {
        Node::Lookahead {
            node: Arc::new(node),
            lookahead: Arc::new(lookahead),
            kind,
        }
    }

    pub fn capture_group(node: Node, name: Option<String>) -> Self {
        Node::CaptureGroup {
            node: Arc::new(node),
            name,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Node::Empty)
    }

    pub fn is_disjunction(&self) -> bool {
        matches!(
            self,
            Node::Concat {
                kind: ConcatKind::Disjunction,
                ..
            }
        )
    }
}

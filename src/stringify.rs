use crate::ast::{CharPart, ConcatKind, Greed, LookaheadKind, MatchAtom, Node, QuantifierKind};
use crate::root::RootNode;

/// Pattern text and flags ready to hand to a regex engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stringified {
    pub source: String,
    pub flags: String,
}

/// Token the target dialect uses for an explicitly empty pattern.
pub const EMPTY_PATTERN: &str = "(?:)";

pub fn stringify(root: &RootNode) -> Stringified {
    let mut body = String::new();
    let anchored = !root.prefix().is_empty() || !root.suffix().is_empty();
    // `^a|b$` would anchor each branch on its own side only.
    if anchored && root.node().is_disjunction() {
        render_grouped(root.node(), &mut body);
    } else {
        render(root.node(), &mut body);
    }

    let source = if root.node().is_empty() && !anchored {
        EMPTY_PATTERN.to_owned()
    } else {
        format!("{}{}{}", root.prefix(), body, root.suffix())
    };

    Stringified {
        source,
        flags: root.flags_text(),
    }
}

/// Renders a bare node, without anchors.
pub fn render_node(node: &Node) -> String {
    let mut out = String::new();
    render(node, &mut out);
    out
}

fn render(node: &Node, out: &mut String) {
    match node {
        Node::Empty => {}
        Node::Match(MatchAtom::Exact(text)) => out.push_str(text),
        Node::Match(MatchAtom::Chars { parts, negative }) => {
            out.push('[');
            if *negative {
                out.push('^');
            }
            for part in parts {
                match part {
                    CharPart::Chars(chars) => out.push_str(chars),
                    CharPart::Range(from, to) => {
                        out.push_str(from);
                        out.push('-');
                        out.push_str(to);
                    }
                }
            }
            out.push(']');
        }
        Node::Concat {
            left,
            right,
            kind: ConcatKind::Conjunction,
        } => {
            render_conjunct(left, out);
            render_conjunct(right, out);
        }
        Node::Concat {
            left,
            right,
            kind: ConcatKind::Disjunction,
        } => {
            render(left, out);
            out.push('|');
            render(right, out);
        }
        Node::Quantifier { node, kind } => {
            if is_atom(node) {
                render(node, out);
            } else {
                render_grouped(node, out);
            }
            render_quantifier(*kind, out);
        }
        Node::Lookahead {
            node,
            lookahead,
            kind,
        } => {
            if node.is_disjunction() {
                render_grouped(node, out);
            } else {
                render(node, out);
            }
            out.push_str(match kind {
                LookaheadKind::Positive => "(?=",
                LookaheadKind::Negative => "(?!",
            });
            render(lookahead, out);
            out.push(')');
        }
        Node::CaptureGroup { node, name } => {
            match name {
                Some(name) => {
                    out.push_str("(?<");
                    out.push_str(name);
                    out.push('>');
                }
                None => out.push('('),
            }
            render(node, out);
            out.push(')');
        }
    }
}

// A quantifier always scopes itself, so only an alternation needs
// grouping inside a sequence.
fn render_conjunct(node: &Node, out: &mut String) {
    if node.is_disjunction() {
        render_grouped(node, out);
    } else {
        render(node, out);
    }
}

fn render_grouped(node: &Node, out: &mut String) {
    out.push_str("(?:");
    render(node, out);
    out.push(')');
}

/// Whether a quantifier can follow the rendered node without a group.
fn is_atom(node: &Node) -> bool {
    match node {
        Node::Match(MatchAtom::Exact(text)) => text.chars().count() == 1,
        Node::Match(MatchAtom::Chars { .. }) | Node::CaptureGroup { .. } => true,
        _ => false,
    }
}

fn render_quantifier(kind: QuantifierKind, out: &mut String) {
    match kind {
        QuantifierKind::ZeroOrOne => out.push('?'),
        QuantifierKind::OneOrMore => out.push('+'),
        QuantifierKind::ZeroOrMore(Greed::Greedy) => out.push('*'),
        QuantifierKind::ZeroOrMore(Greed::Lazy) => out.push_str("*?"),
        QuantifierKind::MinMax(min, max) => {
            out.push('{');
            if let Some(min) = min {
                out.push_str(&min.to_string());
            }
            out.push(',');
            if let Some(max) = max {
                out.push_str(&max.to_string());
            }
            out.push('}');
        }
        QuantifierKind::Exact(n) => {
            out.push('{');
            out.push_str(&n.to_string());
            out.push('}');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinators::*;
    use crate::root::RootOptions;
    use pretty_assertions::assert_eq;

    fn hex() -> Node {
        ranges(Node::Empty, &[("0", "9"), ("a", "f")], false)
    }

    #[test]
    fn empty_root_renders_empty_group() {
        let out = stringify(&RootNode::default());
        assert_eq!(out.source, "(?:)");
        assert_eq!(out.flags, "gm");
    }

    #[test]
    fn anchored_empty_root_renders_anchors_only() {
        let root = RootNode::default().with_prefix("^").with_suffix("$");
        assert_eq!(stringify(&root).source, "^$");
    }

    #[test]
    fn char_classes() {
        assert_eq!(render_node(&hex()), "[0-9a-f]");
        assert_eq!(
            render_node(&anything_but(Node::Empty, "a]", false)),
            r"[^a\]]*"
        );
        assert_eq!(render_node(&some_of(Node::exact("x"), "ab")), "x[ab]+");
        assert_eq!(render_node(&any_of(Node::Empty, "ab")), "[ab]?");
        assert_eq!(render_node(&one_of(Node::Empty, "ab")), "[ab]");
    }

    #[test]
    fn quantifier_suffixes() {
        let x = Node::exact("x");
        assert_eq!(render_node(&optional(x.clone())), "x?");
        assert_eq!(render_node(&one_or_more(x.clone())), "x+");
        assert_eq!(render_node(&zero_or_more(x.clone(), false)), "x*");
        assert_eq!(render_node(&zero_or_more(x.clone(), true)), "x*?");
        assert_eq!(render_node(&repeat(x.clone(), Some(2), Some(4))), "x{2,4}");
        assert_eq!(render_node(&repeat(x.clone(), Some(4), Some(2))), "x{2,4}");
        assert_eq!(render_node(&repeat(x.clone(), Some(3), None)), "x{3,}");
        assert_eq!(render_node(&repeat_exact(x, 5)), "x{5}");
    }

    #[test]
    fn quantifiers_group_multi_token_operands() {
        assert_eq!(render_node(&optional(whitespace())), r"(?:\s)?");
        assert_eq!(render_node(&repeat(literal("hello"), Some(1), Some(3))), "(?:hello){1,3}");
        assert_eq!(
            render_node(&one_or_more(and_(Node::exact("a"), Node::exact("b")))),
            "(?:ab)+"
        );
        assert_eq!(
            render_node(&optional(or_(Node::exact("a"), Node::exact("b")))),
            "(?:a|b)?"
        );
        assert_eq!(render_node(&optional(group(literal("ab"), None))), "(ab)?");
        assert_eq!(render_node(&optional(Node::Empty)), "(?:)?");
    }

    #[test]
    fn sequences_group_alternations() {
        let either = or_(Node::exact("a"), Node::exact("b"));
        assert_eq!(render_node(&and_(either.clone(), Node::exact("c"))), "(?:a|b)c");
        assert_eq!(render_node(&and_(Node::exact("c"), either.clone())), "c(?:a|b)");
        assert_eq!(render_node(&or_(either, Node::exact("c"))), "a|b|c");
        assert_eq!(render_node(&linebreak()), r"\r\n|\r|\n");
    }

    #[test]
    fn lookaheads() {
        let x = Node::exact("x");
        assert_eq!(render_node(&followed_by(x.clone(), literal("!"))), "x(?=!)");
        assert_eq!(render_node(&not_followed_by(x, literal("?"))), r"x(?!\?)");
        assert_eq!(
            render_node(&followed_by(or_(Node::exact("a"), Node::exact("b")), Node::exact("c"))),
            "(?:a|b)(?=c)"
        );
    }

    #[test]
    fn capture_groups() {
        assert_eq!(render_node(&group(literal("ab"), None)), "(ab)");
        assert_eq!(render_node(&group(literal("ab"), Some("name".into()))), "(?<name>ab)");
    }

    #[test]
    fn uuid_pattern() {
        let block = and_(repeat_exact(hex(), 4), literal("-"));
        let node = seq(
            [
                repeat_exact(hex(), 8),
                literal("-"),
                repeat_exact(block, 3),
                repeat_exact(hex(), 12),
            ],
            ConcatKind::Conjunction,
        );
        let root = RootNode::from_node(node).add_flags("i").remove_flags("m");
        assert_eq!(
            stringify(&root),
            Stringified {
                source: "[0-9a-f]{8}-(?:[0-9a-f]{4}-){3}[0-9a-f]{12}".into(),
                flags: "gi".into(),
            }
        );
    }

    #[test]
    fn anchors_wrap_the_body() {
        let root = RootNode::new(RootOptions {
            prefix: Some("^".into()),
            suffix: Some("$".into()),
            node: Some(or_(Node::exact("a"), Node::exact("b"))),
            ..RootOptions::default()
        });
        assert_eq!(stringify(&root).source, "^(?:a|b)$");
        assert_eq!(stringify(&root.with_node(literal("a.b"))).source, r"^a\.b$");
    }
}

use std::collections::BTreeSet;
use std::fmt;

use crate::ast::Node;
use crate::escape::sanitize;

pub const DEFAULT_FLAGS: &str = "gm";

/// A set of single-character pattern flags.
///
/// Insertion order never matters; the set renders in ascending order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct Flags(BTreeSet<char>);

impl Flags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, flag: char) -> bool {
        self.0.contains(&flag)
    }

    pub fn union(&self, flags: &str) -> Self {
        let mut set = self.0.clone();
        set.extend(flags.chars());
        Self(set)
    }

    pub fn difference(&self, flags: &str) -> Self {
        Self(self.0.iter().copied().filter(|c| !flags.contains(*c)).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.0.iter().copied()
    }
}

impl From<&str> for Flags {
    fn from(flags: &str) -> Self {
        Self(flags.chars().collect())
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|c| write!(f, "{c}"))
    }
}

/// Settings for a new root node. Unset fields take their defaults.
#[derive(Debug, Clone, Default)]
pub struct RootOptions {
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    /// Defaults to `"gm"`.
    pub flags: Option<String>,
    /// Text turned into an exact match when no `node` is given.
    pub source: Option<String>,
    /// Takes precedence over `source`.
    pub node: Option<Node>,
    /// Escape `source` before use. Defaults to `true`.
    pub sanitize: Option<bool>,
}

/// A node plus its anchors and flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootNode {
    prefix: String,
    node: Node,
    suffix: String,
    flags: Flags,
}

impl Default for RootNode {
    fn default() -> Self {
        Self::new(RootOptions::default())
    }
}

impl RootNode {
    pub fn new(options: RootOptions) -> Self {
        let RootOptions {
            prefix,
            suffix,
            flags,
            source,
            node,
            sanitize: should_sanitize,
        } = options;

        let node = match (node, source) {
            (Some(node), _) => node,
            (None, Some(source)) if should_sanitize.unwrap_or(true) => Node::exact(sanitize(&source)),
            (None, Some(source)) => Node::exact(source),
            (None, None) => Node::Empty,
        };

        Self {
            prefix: prefix.unwrap_or_default(),
            node,
            suffix: suffix.unwrap_or_default(),
            flags: Flags::from(flags.as_deref().unwrap_or(DEFAULT_FLAGS)),
        }
    }

    pub fn from_node(node: Node) -> Self {
        Self::new(RootOptions {
            node: Some(node),
            ..RootOptions::default()
        })
    }

    pub fn node(&self) -> &Node {
        &self.node
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn flags(&self) -> &Flags {
        &self.flags
    }

    pub fn with_node(&self, node: Node) -> Self {
        Self {
            node,
            ..self.clone()
        }
    }

    pub fn with_prefix(&self, prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ..self.clone()
        }
    }

    pub fn with_suffix(&self, suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
            ..self.clone()
        }
    }

    pub fn add_flags(&self, flags: &str) -> Self {
        Self {
            flags: self.flags.union(flags),
            ..self.clone()
        }
    }

    pub fn remove_flags(&self, flags: &str) -> Self {
        Self {
            flags: self.flags.difference(flags),
            ..self.clone()
        }
    }

    pub fn has_flag(&self, flag: char) -> bool {
        self.flags.contains(flag)
    }

    pub fn flags_text(&self) -> String {
        self.flags.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults() {
        let root = RootNode::default();
        assert_eq!(root.prefix(), "");
        assert_eq!(root.suffix(), "");
        assert_eq!(root.node(), &Node::Empty);
        assert_eq!(root.flags_text(), "gm");
    }

    #[test]
    fn source_is_sanitized_unless_disabled() {
        let root = RootNode::new(RootOptions {
            source: Some("a.b".into()),
            ..RootOptions::default()
        });
        assert_eq!(root.node(), &Node::exact(r"a\.b"));

        let root = RootNode::new(RootOptions {
            source: Some("a.b".into()),
            sanitize: Some(false),
            ..RootOptions::default()
        });
        assert_eq!(root.node(), &Node::exact("a.b"));
    }

    #[test]
    fn explicit_node_wins_over_source() {
        let root = RootNode::new(RootOptions {
            source: Some("ignored".into()),
            node: Some(Node::exact("x")),
            flags: Some(String::new()),
            ..RootOptions::default()
        });
        assert_eq!(root.node(), &Node::exact("x"));
        assert!(root.flags().is_empty());
    }

    #[test]
    fn flags_render_in_canonical_order() {
        assert_eq!(Flags::from("mig").to_string(), "gim");
        assert_eq!(Flags::from("gm"), Flags::from("mgm"));
    }

    #[test]
    fn flag_updates_return_new_roots() {
        let root = RootNode::default();
        let with_i = root.add_flags("i");
        assert_eq!(root.flags_text(), "gm");
        assert_eq!(with_i.flags_text(), "gim");
        assert_eq!(with_i.add_flags("i"), with_i);
        assert_eq!(with_i.remove_flags("i"), root);
        assert!(with_i.has_flag('i'));
        assert!(!root.remove_flags("gm").has_flag('g'));
    }

    #[test]
    fn anchors_are_replaced_not_appended() {
        let root = RootNode::default().with_prefix("^").with_suffix("$");
        assert_eq!(root.prefix(), "^");
        assert_eq!(root.with_suffix("").suffix(), "");
    }
}

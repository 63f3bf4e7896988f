//! Hierarchical path identifiers.
//!
//! A [`NodePath`] is an immutable, slash-delimited absolute identifier such
//! as `/World/Sphere1`; the root is `/`. An [`AttrPath`] pairs a node path
//! with an attribute name (`/World/Sphere1.temperature`) and is the finest
//! addressable query target. [`TreePath`] is the closed union of the two,
//! used for dispatch.

use std::sync::Arc;

/// Absolute, slash-delimited path of a tree node.
///
/// Every path except the root has exactly one parent, obtained by dropping
/// the last segment. Segments are identifiers (`[A-Za-z_][A-Za-z0-9_]*`).
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct NodePath(Arc<str>);

impl NodePath {
    /// The absolute root `/`.
    pub fn root() -> NodePath {
        NodePath(Arc::from("/"))
    }

    /// Parses an absolute node path; returns `None` for anything relative,
    /// empty, or containing non-identifier segments.
    pub fn parse(text: &str) -> Option<NodePath> {
        if text == "/" {
            return Some(NodePath::root());
        }
        let rest = text.strip_prefix('/')?;
        if rest.is_empty() || !rest.split('/').all(is_identifier) {
            return None;
        }
        Some(NodePath(Arc::from(text)))
    }

    pub fn is_root(&self) -> bool {
        &*self.0 == "/"
    }

    /// The parent path, or `None` for the root. A top-level node's parent is
    /// the root.
    pub fn parent(&self) -> Option<NodePath> {
        if self.is_root() {
            return None;
        }
        match self.0.rfind('/') {
            Some(0) => Some(NodePath::root()),
            Some(pos) => Some(NodePath(Arc::from(&self.0[..pos]))),
            None => None,
        }
    }

    /// The last path segment; empty for the root.
    pub fn name(&self) -> &str {
        if self.is_root() {
            ""
        } else {
            let pos = self.0.rfind('/').map_or(0, |p| p + 1);
            &self.0[pos..]
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Debug for NodePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NodePath({})", self.0)
    }
}

/// A node path plus an attribute name. Attribute paths never have children.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AttrPath {
    node: NodePath,
    name: Arc<str>,
}

impl AttrPath {
    pub fn new(node: NodePath, name: impl Into<Arc<str>>) -> AttrPath {
        AttrPath {
            node,
            name: name.into(),
        }
    }

    pub fn node(&self) -> &NodePath {
        &self.node
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for AttrPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.node, self.name)
    }
}

impl std::fmt::Debug for AttrPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AttrPath({self})")
    }
}

/// Closed union of the two addressable path kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TreePath {
    Node(NodePath),
    Attribute(AttrPath),
}

impl TreePath {
    pub fn root() -> TreePath {
        TreePath::Node(NodePath::root())
    }

    /// Parses either form: `/World/Sphere1` or `/World/Sphere1.temperature`.
    pub fn parse(text: &str) -> Option<TreePath> {
        match text.find('.') {
            None => NodePath::parse(text).map(TreePath::Node),
            Some(pos) => {
                let (node, name) = (&text[..pos], &text[pos + 1..]);
                if !is_identifier(name) {
                    return None;
                }
                let node = NodePath::parse(node)?;
                Some(TreePath::Attribute(AttrPath::new(node, name)))
            }
        }
    }

    pub fn is_root(&self) -> bool {
        matches!(self, TreePath::Node(node) if node.is_root())
    }
}

impl std::fmt::Display for TreePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TreePath::Node(node) => node.fmt(f),
            TreePath::Attribute(attr) => attr.fmt(f),
        }
    }
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_absolute_paths() {
        let path = NodePath::parse("/World/Sphere1").unwrap();
        assert_eq!(path.as_str(), "/World/Sphere1");
        assert_eq!(path.name(), "Sphere1");
        assert!(!path.is_root());
    }

    #[test]
    fn rejects_relative_and_malformed_paths() {
        for text in [
            "",
            "NotAbsolute",
            "relative/x",
            "/World/",
            "//World",
            "/Wor ld",
            "/World/1Sphere",
            "/World..temp",
        ] {
            assert!(NodePath::parse(text).is_none(), "accepted {text:?}");
        }
    }

    #[test]
    fn parent_chain_terminates_at_root() {
        let path = NodePath::parse("/A/B/C").unwrap();
        let parent = path.parent().unwrap();
        assert_eq!(parent.as_str(), "/A/B");
        let grand = parent.parent().unwrap();
        assert_eq!(grand.as_str(), "/A");
        let root = grand.parent().unwrap();
        assert!(root.is_root());
        assert!(root.parent().is_none());
    }

    #[test]
    fn root_has_empty_name() {
        assert_eq!(NodePath::root().name(), "");
    }

    #[test]
    fn parses_attribute_paths() {
        let path = TreePath::parse("/World/Sphere1.temperature").unwrap();
        match &path {
            TreePath::Attribute(attr) => {
                assert_eq!(attr.node().as_str(), "/World/Sphere1");
                assert_eq!(attr.name(), "temperature");
            }
            other => panic!("unexpected parse: {other:?}"),
        }
        assert_eq!(path.to_string(), "/World/Sphere1.temperature");
    }

    #[test]
    fn rejects_malformed_attribute_paths() {
        assert!(TreePath::parse("/World.").is_none());
        assert!(TreePath::parse("/World.a.b").is_none());
        assert!(TreePath::parse("NotAbsolute.temp").is_none());
    }

    #[test]
    fn root_round_trips() {
        let root = TreePath::parse("/").unwrap();
        assert!(root.is_root());
        assert_eq!(root, TreePath::root());
    }
}

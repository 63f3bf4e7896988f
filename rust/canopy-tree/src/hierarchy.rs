//! Hierarchy synthesis: ancestors and parent/child adjacency derived from
//! the path index.

use std::sync::Arc;

use ahash::{AHashMap, AHashSet};

use crate::{index::PathIndex, path::NodePath};

/// The structurally complete set of tree nodes.
///
/// Holds every indexed leaf path plus all of its transitive ancestors
/// (synthetic ancestors have no source row of their own), and the
/// parent-to-child-name adjacency needed for tree navigation. The absolute
/// root is an implicit boundary: it is a valid adjacency key but is never a
/// member of the path set nor anyone's child.
///
/// A pure function of the index: deriving twice from the same index yields
/// identical contents.
#[derive(Debug, Default)]
pub struct Hierarchy {
    paths: Vec<NodePath>,
    path_set: AHashSet<NodePath>,
    children: AHashMap<NodePath, Vec<Arc<str>>>,
}

impl Hierarchy {
    /// Walks every indexed path rootward, inserting each visited path and a
    /// parent-to-child edge per level.
    ///
    /// The walk stops at the first ancestor already present: that ancestor's
    /// own chain was recorded when it was first reached, which also gives the
    /// exactly-one-edge-per-relationship property without a membership check
    /// on the child lists.
    pub fn derive(index: &PathIndex) -> Hierarchy {
        let mut hierarchy = Hierarchy::default();
        for leaf in index.paths() {
            let mut current = leaf.clone();
            loop {
                if current.is_root() || !hierarchy.path_set.insert(current.clone()) {
                    break;
                }
                hierarchy.paths.push(current.clone());
                let Some(parent) = current.parent() else {
                    break;
                };
                hierarchy
                    .children
                    .entry(parent.clone())
                    .or_default()
                    .push(Arc::from(current.name()));
                current = parent;
            }
        }
        hierarchy
    }

    /// Whether `path` is a known node. The root is excluded; it is not a node
    /// of this source.
    pub fn contains(&self, path: &NodePath) -> bool {
        self.path_set.contains(path)
    }

    /// Immediate child names of `path`, in first-discovery order. The root is
    /// a valid key when the source has any top-level node.
    pub fn children(&self, path: &NodePath) -> Option<&[Arc<str>]> {
        self.children.get(path).map(|c| c.as_slice())
    }

    /// Every known path (leaves and synthetic ancestors), in insertion order.
    pub fn all_paths(&self) -> &[NodePath] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::PathLocation;

    fn path(text: &str) -> NodePath {
        NodePath::parse(text).unwrap()
    }

    fn index_of(paths: &[&str]) -> PathIndex {
        let mut index = PathIndex::default();
        for (row, text) in paths.iter().enumerate() {
            index.insert(path(text), PathLocation { block: 0, row });
        }
        index
    }

    fn child_names(hierarchy: &Hierarchy, parent: &NodePath) -> Vec<String> {
        hierarchy
            .children(parent)
            .unwrap_or_default()
            .iter()
            .map(|c| c.to_string())
            .collect()
    }

    #[test]
    fn synthesizes_ancestors_for_deep_paths() {
        let hierarchy = Hierarchy::derive(&index_of(&["/A/B/C/D"]));
        assert_eq!(hierarchy.len(), 4);
        for text in ["/A", "/A/B", "/A/B/C", "/A/B/C/D"] {
            assert!(hierarchy.contains(&path(text)), "missing {text}");
        }
        assert!(!hierarchy.contains(&NodePath::root()));
        // one child edge per ancestor level
        assert_eq!(child_names(&hierarchy, &NodePath::root()), ["A"]);
        assert_eq!(child_names(&hierarchy, &path("/A")), ["B"]);
        assert_eq!(child_names(&hierarchy, &path("/A/B")), ["C"]);
        assert_eq!(child_names(&hierarchy, &path("/A/B/C")), ["D"]);
        assert!(hierarchy.children(&path("/A/B/C/D")).is_none());
    }

    #[test]
    fn children_are_in_first_discovery_order() {
        let hierarchy = Hierarchy::derive(&index_of(&["/World/Sphere1", "/World/Cube1"]));
        assert_eq!(
            child_names(&hierarchy, &path("/World")),
            ["Sphere1", "Cube1"]
        );
    }

    #[test]
    fn explicit_ancestor_leaves_are_not_double_counted() {
        // "/World" is both a leaf (has its own row) and an ancestor of the
        // sphere; it must get exactly one edge to its parent.
        let hierarchy = Hierarchy::derive(&index_of(&["/World", "/World/Sphere1"]));
        assert_eq!(child_names(&hierarchy, &NodePath::root()), ["World"]);
        assert_eq!(child_names(&hierarchy, &path("/World")), ["Sphere1"]);
        assert_eq!(hierarchy.len(), 2);
    }

    #[test]
    fn derivation_is_idempotent() {
        let index = index_of(&["/World/Sphere1", "/World/Cube1", "/Other/Deep/Leaf"]);
        let a = Hierarchy::derive(&index);
        let b = Hierarchy::derive(&index);
        assert_eq!(a.all_paths(), b.all_paths());
        for p in a.all_paths() {
            assert_eq!(a.children(p), b.children(p));
        }
        assert_eq!(
            a.children(&NodePath::root()),
            b.children(&NodePath::root())
        );
    }

    #[test]
    fn empty_index_yields_empty_hierarchy() {
        let hierarchy = Hierarchy::derive(&PathIndex::default());
        assert!(hierarchy.is_empty());
        assert!(hierarchy.children(&NodePath::root()).is_none());
    }
}

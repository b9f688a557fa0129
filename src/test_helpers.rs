//! Shared test utilities for render tree assertions.
//!
//! Lookups panic with the list of node kinds actually present, so a failing
//! test says what the tree looked like instead of just `None`.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tree = compose(&resolve(&config), ViewportClass::Unknown);
//! assert_eq!(path_kinds(&tree, "figure"), vec!["container", "wrapper", "figure"]);
//! assert_eq!(source_srcsets(&tree), vec!["d.jpg", "m.jpg"]);
//! assert_dual_classes(&tree, "home");
//! ```

use crate::tree::{ImageAttrs, Node, NodeKind, RenderTree};

// =========================================================================
// Lookups — panic with a clear message on miss
// =========================================================================

/// Kind names of all nodes, pre-order.
pub fn kind_names(tree: &RenderTree) -> Vec<&'static str> {
    tree.nodes().iter().map(|n| n.kind.name()).collect()
}

/// First node of the given kind. Panics if not found.
pub fn find_kind<'a>(tree: &'a RenderTree, kind: &str) -> &'a Node {
    tree.find(|n| n.kind.name() == kind).unwrap_or_else(|| {
        let kinds = kind_names(tree);
        panic!("node '{kind}' not found. Present: {kinds:?}")
    })
}

/// Attributes of the (single) image node. Panics if there is none.
pub fn image_attrs(tree: &RenderTree) -> &ImageAttrs {
    match &find_kind(tree, "image").kind {
        NodeKind::Image(attrs) => attrs,
        other => unreachable!("image lookup returned {other:?}"),
    }
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// All nodes of the given kind, pre-order.
pub fn find_all<'a>(tree: &'a RenderTree, kind: &str) -> Vec<&'a Node> {
    tree.nodes()
        .into_iter()
        .filter(|n| n.kind.name() == kind)
        .collect()
}

pub fn count_kind(tree: &RenderTree, kind: &str) -> usize {
    find_all(tree, kind).len()
}

/// `srcset` of every source node, in document order.
pub fn source_srcsets(tree: &RenderTree) -> Vec<&str> {
    find_all(tree, "source")
        .into_iter()
        .filter_map(|n| match &n.kind {
            NodeKind::Source { srcset, .. } => Some(srcset.as_str()),
            _ => None,
        })
        .collect()
}

/// Kind names from the root down to the first node of `kind`. Panics if absent.
pub fn path_kinds(tree: &RenderTree, kind: &str) -> Vec<&'static str> {
    tree.path_to(|n| n.kind.name() == kind)
        .map(|path| path.iter().map(|n| n.kind.name()).collect())
        .unwrap_or_else(|| {
            let kinds = kind_names(tree);
            panic!("no path to '{kind}'. Present: {kinds:?}")
        })
}

// =========================================================================
// Class assertions
// =========================================================================

/// Assert every structural node carries exactly `[base, base--variant]`.
pub fn assert_dual_classes(tree: &RenderTree, variant: &str) {
    let structural: Vec<&Node> = tree
        .nodes()
        .into_iter()
        .filter(|n| n.kind.is_structural())
        .collect();
    assert!(!structural.is_empty(), "tree has no structural nodes");
    for node in structural {
        assert_eq!(
            node.classes.len(),
            2,
            "{} classes: {:?}",
            node.kind.name(),
            node.classes
        );
        let base = &node.classes[0];
        assert_eq!(
            node.classes[1],
            format!("{base}--{variant}"),
            "{} variant class mismatch",
            node.kind.name()
        );
    }
}

//! Theme materialization
//!
//! A theme is a named subtree (e.g. `theme.main`) whose leaves mostly point at
//! primitive tokens. Materializing walks the whole subtree and replaces every
//! reference chain with its terminal value, producing a ready-to-consume
//! artifact with no path left unresolved.

use indexmap::IndexMap;

use super::collect::identifier;
use super::resolve::resolve_value;
use super::tree::{Leaf, Node, TokenTree, TokenType, TokenValue};

/// Fully resolve the subtree rooted at `segments`. `None` when the path is
/// missing from the tree.
pub fn materialize(tree: &TokenTree, segments: &[String]) -> Option<Node> {
    let node = tree.lookup(segments)?;
    Some(materialize_node(tree, node))
}

fn materialize_node(tree: &TokenTree, node: &Node) -> Node {
    match node {
        Node::Leaf(leaf) => Node::Leaf(Leaf {
            value: resolve_value(tree, &leaf.value),
            ty: leaf.ty.clone(),
            comment: leaf.comment.clone(),
        }),
        Node::Group(children) => {
            let mut out = IndexMap::new();
            for (key, child) in children {
                out.insert(key.clone(), materialize_node(tree, child));
            }
            Node::Group(out)
        }
    }
}

/// One resolved leaf of a materialized theme subtree, with its accessor name.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeProperty {
    /// Camel-joined path segments, e.g. `primaryBackgroundDefault`.
    pub name: String,
    pub value: TokenValue,
    pub ty: TokenType,
}

/// Flatten a materialized subtree into accessor properties, one per leaf,
/// in traversal order.
pub fn collect_properties(node: &Node) -> Vec<ThemeProperty> {
    let mut out = Vec::new();
    walk(node, &mut Vec::new(), &mut out);
    out
}

fn walk(node: &Node, segments: &mut Vec<String>, out: &mut Vec<ThemeProperty>) {
    match node {
        Node::Leaf(leaf) => out.push(ThemeProperty {
            name: identifier(segments),
            value: leaf.value.clone(),
            ty: leaf.ty.clone(),
        }),
        Node::Group(children) => {
            for (key, child) in children {
                segments.push(key.clone());
                walk(child, segments, out);
                segments.pop();
            }
        }
    }
}

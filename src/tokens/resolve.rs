//! Reference resolution
//!
//! Resolution is identity for non-references and a root-relative path walk for
//! references, following chains until a terminal value. Failure is data, not
//! an error: an unresolvable or cyclic reference yields its original `{...}`
//! string so a broken token stays visible in generated output.

use std::collections::HashSet;

use log::warn;

use super::tree::{Node, Reference, TokenTree, TokenValue};

/// Resolve a token value against the tree. Non-references come back unchanged.
pub fn resolve_value(tree: &TokenTree, value: &TokenValue) -> TokenValue {
    match value {
        TokenValue::Reference(reference) => {
            let mut visited = HashSet::new();
            follow(tree, reference, &mut visited)
        }
        other => other.clone(),
    }
}

fn follow(tree: &TokenTree, reference: &Reference, visited: &mut HashSet<String>) -> TokenValue {
    if !visited.insert(reference.path()) {
        warn!("cyclic reference through '{}'", reference.raw());
        return TokenValue::Str(reference.raw().to_string());
    }
    match tree.lookup(&reference.segments) {
        Some(Node::Leaf(leaf)) => match &leaf.value {
            TokenValue::Reference(next) => follow(tree, next, visited),
            terminal => terminal.clone(),
        },
        // Missing path or a container target: same non-fatal fallback.
        _ => {
            warn!("unresolved reference '{}'", reference.raw());
            TokenValue::Str(reference.raw().to_string())
        }
    }
}

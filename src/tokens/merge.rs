//! Source document merging and normalization
//!
//! Merging is right-biased at the leaf level: later sources override earlier
//! ones when the colliding node is a leaf, while two containers at the same
//! key merge element-wise. A leaf colliding with a container keeps the leaf
//! (whichever side it is on) and drops the container with a warning.
//!
//! Normalization rewrites every leaf to the canonical `{value, type, comment}`
//! shape, strips reserved-sigil keys, and parses reference syntax once.

use indexmap::IndexMap;
use log::warn;
use serde_json::{Map, Value};

use super::tree::{Leaf, Node, TokenTree, TokenType, TokenValue, SIGIL};

/// True for nodes recognized as leaves: an object carrying `$value` (source
/// sigil shape) or `value` (already-normalized shape).
fn is_leaf_object(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.contains_key("$value") || map.contains_key("value"),
        _ => false,
    }
}

/// Merge raw source documents in declared order into one document.
///
/// Non-object documents contribute nothing (a missing file read as `{}`
/// upstream follows the same path).
pub fn merge_sources(sources: &[Value]) -> Value {
    let mut merged = Map::new();
    for source in sources {
        if let Value::Object(map) = source {
            merge_into(&mut merged, map, &mut Vec::new());
        }
    }
    Value::Object(merged)
}

fn merge_into(target: &mut Map<String, Value>, source: &Map<String, Value>, path: &mut Vec<String>) {
    for (key, incoming) in source {
        if key.starts_with(SIGIL) {
            continue;
        }
        path.push(key.clone());
        let incoming_is_container = incoming.is_object() && !is_leaf_object(incoming);
        match target.get_mut(key) {
            Some(existing) => {
                let existing_is_container = existing.is_object() && !is_leaf_object(existing);
                match (existing_is_container, incoming_is_container) {
                    (true, true) => {
                        if let (Value::Object(existing_map), Value::Object(incoming_map)) =
                            (&mut *existing, incoming)
                        {
                            merge_into(existing_map, incoming_map, path);
                        }
                    }
                    (true, false) => {
                        // Tie-break: leaf wins, container side is discarded.
                        warn!(
                            "merge: leaf at '{}' replaces container from an earlier source",
                            path.join(".")
                        );
                        *existing = incoming.clone();
                    }
                    (false, true) => {
                        warn!(
                            "merge: container at '{}' discarded, earlier leaf kept",
                            path.join(".")
                        );
                    }
                    (false, false) => {
                        *existing = incoming.clone();
                    }
                }
            }
            None => {
                if incoming_is_container {
                    let mut fresh = Map::new();
                    if let Value::Object(incoming_map) = incoming {
                        merge_into(&mut fresh, incoming_map, path);
                    }
                    target.insert(key.clone(), Value::Object(fresh));
                } else {
                    target.insert(key.clone(), incoming.clone());
                }
            }
        }
        path.pop();
    }
}

/// Normalize a merged document into the typed token tree.
pub fn normalize(merged: &Value) -> TokenTree {
    let mut root = IndexMap::new();
    if let Value::Object(map) = merged {
        for (key, child) in map {
            if key.starts_with(SIGIL) {
                continue;
            }
            root.insert(key.clone(), normalize_node(child));
        }
    }
    TokenTree { root }
}

fn normalize_node(value: &Value) -> Node {
    match value {
        Value::Object(map) if is_leaf_object(value) => {
            let raw_value = map.get("$value").or_else(|| map.get("value"));
            let raw_type = map.get("$type").or_else(|| map.get("type"));
            let raw_comment = map.get("$description").or_else(|| map.get("comment"));
            Node::Leaf(Leaf {
                value: raw_value.map(TokenValue::from_json).unwrap_or(TokenValue::Str(String::new())),
                ty: raw_type
                    .and_then(Value::as_str)
                    .map(TokenType::from_name)
                    .unwrap_or(TokenType::Str),
                comment: raw_comment.and_then(Value::as_str).map(str::to_string),
            })
        }
        Value::Object(map) => {
            let mut children = IndexMap::new();
            for (key, child) in map {
                if key.starts_with(SIGIL) {
                    continue;
                }
                children.insert(key.clone(), normalize_node(child));
            }
            Node::Group(children)
        }
        scalar => Node::Leaf(Leaf {
            value: TokenValue::from_json(scalar),
            ty: TokenType::Str,
            comment: None,
        }),
    }
}

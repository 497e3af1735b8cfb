//! Token flattening and identifier derivation
//!
//! Walks the normalized tree category by category, stopping at the first leaf,
//! and assigns every token one canonical cross-platform identifier. The `font`
//! and `typography` trees fan out into finer-grained virtual categories
//! (`fontFamily`, `fontWeight`, `fontSize`, `lineHeight`) so consumers can
//! address those axes independently of the raw tree shape.

use std::collections::HashMap;

use indexmap::IndexMap;
use once_cell::sync::Lazy;

use super::resolve::resolve_value;
use super::tree::{Node, TokenTree, TokenType, TokenValue};
use crate::error::TokenError;

/// One flattened leaf token with its derived identifier and resolved value.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatToken {
    pub category: String,
    /// Dot-joined key sequence from the category root.
    pub path: String,
    pub segments: Vec<String>,
    /// Canonical camel-case identifier, safe in every target platform.
    pub ident: String,
    pub value: TokenValue,
    pub ty: TokenType,
}

/// Category name -> tokens, insertion order = traversal order.
pub type CategoryMap = IndexMap<String, Vec<FlatToken>>;

/// Fixed rewrites for segments that are not valid bare identifiers in every
/// target language (SwiftLint/ktlint reject `2xl`, `_0`, snake_case).
/// Extending this for a new token name is a data change, not a logic change.
static SAFE_SEGMENTS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("0", "zero"),
        ("2xs", "twoXs"),
        ("2xl", "twoXl"),
        ("3xl", "threeXl"),
        ("4xl", "fourXl"),
        ("5xl", "fiveXl"),
        ("level_0", "levelZero"),
        ("level_1", "levelOne"),
        ("level_2", "levelTwo"),
        ("level_3", "levelThree"),
        ("level_4", "levelFour"),
        ("blurNone", "blurNone"),
    ])
});

const DIGIT_WORDS: [&str; 10] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

/// Rewrite one path segment into a platform-safe identifier fragment.
pub fn safe_segment(segment: &str) -> String {
    if let Some(mapped) = SAFE_SEGMENTS.get(segment) {
        return (*mapped).to_string();
    }
    if !segment.is_empty() && segment.chars().all(|c| c.is_ascii_digit()) {
        return if segment.len() == 1 {
            let index = segment.chars().next().unwrap() as usize - '0' as usize;
            DIGIT_WORDS[index].to_string()
        } else {
            format!("value{segment}")
        };
    }
    if segment.starts_with(|c: char| c.is_ascii_digit()) {
        let leading = segment.chars().next().unwrap();
        // 0/1-leading names have no unambiguous spelled form; keep them readable.
        if ('2'..='9').contains(&leading) {
            let word = DIGIT_WORDS[leading as usize - '0' as usize];
            return format!("{word}{}", capitalize(&segment[1..]));
        }
        return format!("value_{segment}");
    }
    segment.to_string()
}

pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Join path segments into the canonical identifier: first segment lower,
/// later segments capitalized, each rewritten platform-safe first.
pub fn identifier(segments: &[String]) -> String {
    segments
        .iter()
        .enumerate()
        .map(|(i, segment)| {
            let safe = safe_segment(segment);
            if i == 0 {
                lower_first(&safe)
            } else {
                capitalize(&safe)
            }
        })
        .collect()
}

/// Flatten every category of the tree, resolving each token value.
///
/// An identifier collision within a category is a build defect and fails the
/// whole run, never a silent overwrite.
pub fn collect_all(tree: &TokenTree) -> Result<Vec<FlatToken>, TokenError> {
    let mut out = Vec::new();
    for (category, node) in &tree.root {
        match category.as_str() {
            "font" => {
                if let Some(children) = node.as_group() {
                    if let Some(family) = children.get("family") {
                        collect_into(tree, family, "fontFamily", &["family".to_string()], &mut out);
                    }
                    if let Some(weight) = children.get("weight") {
                        collect_into(tree, weight, "fontWeight", &["weight".to_string()], &mut out);
                    }
                }
            }
            "typography" => {
                if let Some(children) = node.as_group() {
                    if let Some(size) = children.get("size") {
                        collect_into(tree, size, "fontSize", &["size".to_string()], &mut out);
                    }
                    if let Some(line_height) = children.get("lineHeight") {
                        collect_into(
                            tree,
                            line_height,
                            "lineHeight",
                            &["lineHeight".to_string()],
                            &mut out,
                        );
                    }
                }
            }
            _ => collect_into(tree, node, category, &[], &mut out),
        }
    }
    check_collisions(&out)?;
    Ok(out)
}

fn collect_into(
    tree: &TokenTree,
    node: &Node,
    category: &str,
    segments: &[String],
    out: &mut Vec<FlatToken>,
) {
    match node {
        Node::Leaf(leaf) => {
            out.push(FlatToken {
                category: category.to_string(),
                path: segments.join("."),
                segments: segments.to_vec(),
                ident: identifier(segments),
                value: resolve_value(tree, &leaf.value),
                ty: leaf.ty.clone(),
            });
        }
        Node::Group(children) => {
            for (key, child) in children {
                let mut next = segments.to_vec();
                next.push(key.clone());
                collect_into(tree, child, category, &next, out);
            }
        }
    }
}

fn check_collisions(tokens: &[FlatToken]) -> Result<(), TokenError> {
    let mut seen: HashMap<(&str, &str), &str> = HashMap::new();
    for token in tokens {
        if let Some(first) = seen.insert(
            (token.category.as_str(), token.ident.as_str()),
            token.path.as_str(),
        ) {
            return Err(TokenError::IdentifierCollision {
                category: token.category.clone(),
                identifier: token.ident.clone(),
                first: first.to_string(),
                second: token.path.clone(),
            });
        }
    }
    Ok(())
}

/// Group flattened tokens by category, preserving first-seen order.
pub fn group_by_category(tokens: Vec<FlatToken>) -> CategoryMap {
    let mut map = CategoryMap::new();
    for token in tokens {
        map.entry(token.category.clone()).or_default().push(token);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::merge::normalize;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("0", "zero")]
    #[case("2xs", "twoXs")]
    #[case("2xl", "twoXl")]
    #[case("3xl", "threeXl")]
    #[case("4xl", "fourXl")]
    #[case("5xl", "fiveXl")]
    #[case("level_0", "levelZero")]
    #[case("level_4", "levelFour")]
    #[case("blurNone", "blurNone")]
    fn test_safe_segment_table(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(safe_segment(input), expected);
    }

    #[rstest]
    #[case("7", "seven")]
    #[case("12", "value12")]
    #[case("6xl", "sixXl")]
    #[case("9grid", "nineGrid")]
    #[case("1xl", "value_1xl")]
    #[case("sm", "sm")]
    #[case("paddingHorizontal", "paddingHorizontal")]
    fn test_safe_segment_fallbacks(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(safe_segment(input), expected);
    }

    #[test]
    fn test_identifier_totality_for_numeric_prefixes() {
        for segment in ["0", "2xs", "2xl", "3xl", "4xl", "5xl"] {
            let ident = identifier(&[segment.to_string()]);
            assert!(ident.chars().next().unwrap().is_ascii_alphabetic(), "{ident}");
            assert!(!ident.chars().any(|c| c.is_ascii_digit()), "{ident}");
        }
    }

    #[test]
    fn test_identifier_camel_joins() {
        let segments: Vec<String> = vec!["button".into(), "2xl".into(), "padding".into()];
        assert_eq!(identifier(&segments), "buttonTwoXlPadding");
    }

    fn sample_tree() -> TokenTree {
        normalize(&json!({
            "spacing": {
                "sm": {"$value": "8px", "$type": "dimension"},
                "lg": {"$value": "16px", "$type": "dimension"}
            },
            "color": {
                "primary": {"500": {"$value": "#ED2124", "$type": "color"}},
                "surface": {"$value": "{color.primary.500}", "$type": "color"}
            },
            "font": {
                "family": {"base": {"$value": "Quicksand", "$type": "fontFamily"}},
                "weight": {"bold": {"$value": 700, "$type": "fontWeight"}}
            },
            "typography": {
                "size": {"md": {"$value": "15px", "$type": "dimension"}},
                "lineHeight": {"normal": {"$value": 1.5, "$type": "number"}},
                "text": {"body": {"bold": {
                    "fontFamily": {"$value": "{font.family.base}"},
                    "fontSize": {"$value": "{typography.size.md}"}
                }}}
            }
        }))
    }

    #[test]
    fn test_collect_resolves_values() {
        let tokens = collect_all(&sample_tree()).unwrap();
        let surface = tokens
            .iter()
            .find(|t| t.category == "color" && t.ident == "surface")
            .unwrap();
        assert_eq!(surface.value, TokenValue::Str("#ED2124".into()));
    }

    #[test]
    fn test_collect_fans_out_virtual_categories() {
        let tokens = collect_all(&sample_tree()).unwrap();
        let categories: Vec<&str> = tokens.iter().map(|t| t.category.as_str()).collect();
        assert!(categories.contains(&"fontFamily"));
        assert!(categories.contains(&"fontWeight"));
        assert!(categories.contains(&"fontSize"));
        assert!(categories.contains(&"lineHeight"));
        // The raw trees never leak through as categories of their own
        assert!(!categories.contains(&"font"));
        assert!(!categories.contains(&"typography"));
    }

    #[test]
    fn test_virtual_category_paths_are_root_relative() {
        let tokens = collect_all(&sample_tree()).unwrap();
        let family = tokens.iter().find(|t| t.category == "fontFamily").unwrap();
        assert_eq!(family.path, "family.base");
        assert_eq!(family.ident, "familyBase");
    }

    #[test]
    fn test_collect_stops_at_first_leaf() {
        let tokens = collect_all(&sample_tree()).unwrap();
        let primary = tokens
            .iter()
            .find(|t| t.category == "color" && t.path == "primary.500")
            .unwrap();
        assert_eq!(primary.ident, "primaryValue500");
        assert_eq!(primary.ty, TokenType::Color);
    }

    #[test]
    fn test_collision_fails_loudly() {
        // "0" and "zero" both derive the identifier "zero"
        let tree = normalize(&json!({
            "spacing": {
                "0": {"$value": "0px", "$type": "dimension"},
                "zero": {"$value": "0px", "$type": "dimension"}
            }
        }));
        match collect_all(&tree) {
            Err(TokenError::IdentifierCollision { category, identifier, .. }) => {
                assert_eq!(category, "spacing");
                assert_eq!(identifier, "zero");
            }
            other => panic!("expected collision error, got {other:?}"),
        }
    }

    #[test]
    fn test_group_preserves_order() {
        let tokens = collect_all(&sample_tree()).unwrap();
        let grouped = group_by_category(tokens);
        let spacing = &grouped["spacing"];
        assert_eq!(spacing[0].ident, "sm");
        assert_eq!(spacing[1].ident, "lg");
    }

    #[test]
    fn test_category_isolation() {
        let tokens = collect_all(&sample_tree()).unwrap();
        for token in tokens.iter().filter(|t| t.category == "spacing") {
            assert!(token.ty.is_numeric());
        }
        for token in tokens.iter().filter(|t| t.category == "color") {
            assert_eq!(token.ty, TokenType::Color);
        }
    }
}

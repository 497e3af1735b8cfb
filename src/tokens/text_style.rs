//! Text-style collection
//!
//! A text style is derived, not a source token: under `typography.text`,
//! immediate children are style names ("body"), their children are variant
//! names ("bold"), and each variant node carries the font sub-properties.
//! Every field is pulled through the reference resolver before use.

use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

use super::collect::capitalize;
use super::resolve::resolve_value;
use super::tree::{Node, TokenTree, TokenValue};

/// Composite font record with the six sub-properties.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: String,
    /// Size in px.
    pub size: f64,
    pub weight: f64,
    /// Ratio, not px.
    pub line_height: f64,
    /// Em units; absent is distinct from zero.
    pub letter_spacing: Option<f64>,
    pub underline: bool,
}

/// A named text style: style name + capitalized variant name.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub ident: String,
    pub font: FontSpec,
}

static PX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([-\d.]+)px$").unwrap());
static EM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([-\d.]+)em$").unwrap());

/// Parse a `<number>px` dimension (or bare number) to px. Unparseable strings
/// degrade to 0, with a diagnostic so the zero is never silent.
pub fn parse_dimension_px(value: &TokenValue) -> f64 {
    if let TokenValue::Num(n) = value {
        return *n;
    }
    let s = value.display_string();
    match PX.captures(&s).and_then(|c| c[1].parse().ok()) {
        Some(n) => n,
        None => {
            warn!("unparseable dimension '{s}', using 0");
            0.0
        }
    }
}

/// Parse a `<number>em` letter-spacing. `None` when absent or unparseable.
pub fn parse_letter_spacing_em(value: &TokenValue) -> Option<f64> {
    if let TokenValue::Num(n) = value {
        return Some(*n);
    }
    let s = value.display_string();
    let parsed = EM.captures(&s).and_then(|c| c[1].parse().ok());
    if parsed.is_none() {
        warn!("unparseable letter-spacing '{s}', dropping");
    }
    parsed
}

fn numeric_or(value: &TokenValue, default: f64, what: &str) -> f64 {
    match value.as_f64() {
        Some(n) => n,
        None => {
            warn!("non-numeric {what} '{}', using {default}", value.display_string());
            default
        }
    }
}

fn field<'a>(variant: &'a Node, name: &str) -> Option<&'a TokenValue> {
    variant.as_group()?.get(name)?.as_leaf().map(|leaf| &leaf.value)
}

/// Collect every style × variant under `typography.text` in traversal order.
pub fn collect_text_styles(tree: &TokenTree) -> Vec<TextStyle> {
    let mut out = Vec::new();
    let text = tree
        .root
        .get("typography")
        .and_then(Node::as_group)
        .and_then(|children| children.get("text"))
        .and_then(Node::as_group);
    let Some(styles) = text else {
        return out;
    };
    for (style_name, variants) in styles {
        let Some(variants) = variants.as_group() else {
            continue;
        };
        for (variant_name, variant) in variants {
            // A leaf here would be a stray token, not a variant node.
            if variant.as_group().is_none() {
                continue;
            }
            let resolve = |name: &str| field(variant, name).map(|v| resolve_value(tree, v));

            let family = resolve("fontFamily")
                .map(|v| v.display_string())
                .unwrap_or_default();
            let size = resolve("fontSize")
                .map(|v| parse_dimension_px(&v))
                .unwrap_or(0.0);
            let weight = resolve("fontWeight")
                .map(|v| numeric_or(&v, 400.0, "fontWeight"))
                .unwrap_or(400.0);
            let line_height = resolve("lineHeight")
                .map(|v| numeric_or(&v, 1.5, "lineHeight"))
                .unwrap_or(1.5);
            let letter_spacing = resolve("letterSpacing").and_then(|v| parse_letter_spacing_em(&v));
            let underline = resolve("textDecoration")
                .map(|v| v.as_str() == Some("underline"))
                .unwrap_or(false);

            out.push(TextStyle {
                ident: format!("{style_name}{}", capitalize(variant_name)),
                font: FontSpec {
                    family,
                    size,
                    weight,
                    line_height,
                    letter_spacing,
                    underline,
                },
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::merge::normalize;
    use serde_json::json;

    fn tree() -> TokenTree {
        normalize(&json!({
            "font": {
                "family": {"base": {"$value": "Quicksand", "$type": "fontFamily"}},
                "weight": {"bold": {"$value": 700, "$type": "fontWeight"}}
            },
            "typography": {
                "size": {"md": {"$value": "15px", "$type": "dimension"}},
                "text": {
                    "body": {
                        "bold": {
                            "fontFamily": {"$value": "{font.family.base}"},
                            "fontSize": {"$value": "{typography.size.md}"},
                            "fontWeight": {"$value": "{font.weight.bold}"},
                            "lineHeight": {"$value": 1.5}
                        },
                        "boldUnderline": {
                            "fontFamily": {"$value": "Quicksand"},
                            "fontSize": {"$value": "15px"},
                            "fontWeight": {"$value": 700},
                            "lineHeight": {"$value": 1.5},
                            "letterSpacing": {"$value": "-0.025em"},
                            "textDecoration": {"$value": "underline"}
                        }
                    }
                }
            }
        }))
    }

    #[test]
    fn test_body_bold_scenario() {
        let styles = collect_text_styles(&tree());
        let bold = styles.iter().find(|s| s.ident == "bodyBold").unwrap();
        assert_eq!(
            bold.font,
            FontSpec {
                family: "Quicksand".into(),
                size: 15.0,
                weight: 700.0,
                line_height: 1.5,
                letter_spacing: None,
                underline: false,
            }
        );
    }

    #[test]
    fn test_underline_and_letter_spacing() {
        let styles = collect_text_styles(&tree());
        let style = styles.iter().find(|s| s.ident == "bodyBoldUnderline").unwrap();
        assert!(style.font.underline);
        assert_eq!(style.font.letter_spacing, Some(-0.025));
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let tree = normalize(&json!({
            "typography": {"text": {"caption": {"regular": {
                "fontSize": {"$value": "12px"}
            }}}}
        }));
        let styles = collect_text_styles(&tree);
        let style = &styles[0];
        assert_eq!(style.ident, "captionRegular");
        assert_eq!(style.font.family, "");
        assert_eq!(style.font.size, 12.0);
        assert_eq!(style.font.weight, 400.0);
        assert_eq!(style.font.line_height, 1.5);
        assert_eq!(style.font.letter_spacing, None);
        assert!(!style.font.underline);
    }

    #[test]
    fn test_no_typography_text_subtree() {
        let tree = normalize(&json!({"spacing": {"sm": {"$value": "8px"}}}));
        assert!(collect_text_styles(&tree).is_empty());
    }

    #[test]
    fn test_parse_dimension_px() {
        assert_eq!(parse_dimension_px(&TokenValue::Str("15px".into())), 15.0);
        assert_eq!(parse_dimension_px(&TokenValue::Num(15.0)), 15.0);
        assert_eq!(parse_dimension_px(&TokenValue::Str("-4.5px".into())), -4.5);
        // Unparseable degrades to 0 (with a warning), never a panic
        assert_eq!(parse_dimension_px(&TokenValue::Str("15rem".into())), 0.0);
    }

    #[test]
    fn test_parse_letter_spacing_em() {
        assert_eq!(
            parse_letter_spacing_em(&TokenValue::Str("-0.025em".into())),
            Some(-0.025)
        );
        assert_eq!(parse_letter_spacing_em(&TokenValue::Str("wide".into())), None);
    }

    #[test]
    fn test_non_underline_decoration_is_false() {
        let tree = normalize(&json!({
            "typography": {"text": {"body": {"strike": {
                "fontSize": {"$value": "15px"},
                "textDecoration": {"$value": "line-through"}
            }}}}
        }));
        let styles = collect_text_styles(&tree);
        assert!(!styles[0].font.underline);
    }
}

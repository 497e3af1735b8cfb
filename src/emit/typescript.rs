//! TypeScript emitter
//!
//! One `as const` object per category plus a derived key-union type, and a
//! `tokenText` export carrying the composite font records.

use super::{Emitter, EmitOptions, GeneratedFile};
use crate::tokens::collect::capitalize;
use crate::tokens::tree::num_string;
use crate::tokens::{CategoryMap, FlatToken, TextStyle, TokenType};

pub struct TypeScriptEmitter {
    options: EmitOptions,
}

impl TypeScriptEmitter {
    pub fn new(options: EmitOptions) -> Self {
        TypeScriptEmitter { options }
    }
}

/// Render one token value as a TypeScript literal. Numeric axes emit bare
/// numbers; everything else keeps the JSON form of the resolved value, so an
/// unresolved `{...}` reference stays visible as a string literal.
fn ts_literal(token: &FlatToken) -> String {
    match token.ty {
        TokenType::Number | TokenType::FontWeight => match token.value.as_f64() {
            Some(n) => num_string(n),
            None => json_literal(token),
        },
        _ => json_literal(token),
    }
}

fn json_literal(token: &FlatToken) -> String {
    serde_json::to_string(&token.value.to_json()).unwrap_or_else(|_| "null".to_string())
}

impl Emitter for TypeScriptEmitter {
    fn name(&self) -> &str {
        "typescript"
    }

    fn description(&self) -> &str {
        "TypeScript const objects with derived key-union types"
    }

    fn emit(&self, categories: &CategoryMap, text_styles: &[TextStyle]) -> Vec<GeneratedFile> {
        let mut lines = vec![
            "/** Do not edit directly. Generated from design tokens. */".to_string(),
            String::new(),
        ];
        for (category, tokens) in categories {
            lines.push(format!("export const {category} = {{"));
            for token in tokens {
                lines.push(format!("  {}: {},", token.ident, ts_literal(token)));
            }
            lines.push("} as const;".to_string());
            lines.push(String::new());
            lines.push(format!(
                "export type {}Token = keyof typeof {category};",
                capitalize(category)
            ));
            lines.push(String::new());
        }
        if !text_styles.is_empty() {
            let font_type = format!("{}Font", self.options.prefix);
            lines.push(format!("export interface {font_type} {{"));
            lines.push("  family: string;".to_string());
            lines.push("  size: number;".to_string());
            lines.push("  weight: number;".to_string());
            lines.push("  lineHeight: number;".to_string());
            lines.push("  letterSpacing: number | null;".to_string());
            lines.push("  underline: boolean;".to_string());
            lines.push("}".to_string());
            lines.push(String::new());
            lines.push("export const tokenText = {".to_string());
            for style in text_styles {
                let f = &style.font;
                let letter_spacing = f
                    .letter_spacing
                    .map(num_string)
                    .unwrap_or_else(|| "null".to_string());
                lines.push(format!("  {}: {{", style.ident));
                lines.push(format!("    family: {},", quote(&f.family)));
                lines.push(format!("    size: {},", num_string(f.size)));
                lines.push(format!("    weight: {},", num_string(f.weight)));
                lines.push(format!("    lineHeight: {},", num_string(f.line_height)));
                lines.push(format!("    letterSpacing: {letter_spacing},"));
                lines.push(format!("    underline: {},", f.underline));
                lines.push(format!("  }} as {font_type},"));
            }
            lines.push("} as const;".to_string());
            lines.push(String::new());
            lines.push("export type TokenTextKey = keyof typeof tokenText;".to_string());
            lines.push(String::new());
        }
        vec![GeneratedFile::new("web/tokens.ts", lines.join("\n"))]
    }
}

fn quote(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::{collect_all, collect_text_styles, group_by_category, normalize, TokenTree};
    use serde_json::json;

    fn tree() -> TokenTree {
        normalize(&json!({
            "spacing": {"sm": {"$value": "8px", "$type": "dimension"}},
            "font": {"weight": {"bold": {"$value": 700, "$type": "fontWeight"}}},
            "typography": {"text": {"body": {"bold": {
                "fontFamily": {"$value": "Quicksand"},
                "fontSize": {"$value": "15px"},
                "fontWeight": {"$value": 700},
                "lineHeight": {"$value": 1.5}
            }}}}
        }))
    }

    fn render() -> String {
        let t = tree();
        let categories = group_by_category(collect_all(&t).unwrap());
        let styles = collect_text_styles(&t);
        TypeScriptEmitter::new(EmitOptions::default())
            .emit(&categories, &styles)
            .remove(0)
            .contents
    }

    #[test]
    fn test_const_object_and_key_union() {
        let output = render();
        assert!(output.contains("export const spacing = {"));
        assert!(output.contains("  sm: \"8px\","));
        assert!(output.contains("} as const;"));
        assert!(output.contains("export type SpacingToken = keyof typeof spacing;"));
    }

    #[test]
    fn test_font_weight_is_bare_number() {
        let output = render();
        assert!(output.contains("  bold: 700,"));
    }

    #[test]
    fn test_token_text_block() {
        let output = render();
        assert!(output.contains("export interface DodadaFont {"));
        assert!(output.contains("export const tokenText = {"));
        assert!(output.contains("  bodyBold: {"));
        assert!(output.contains("    family: \"Quicksand\","));
        assert!(output.contains("    letterSpacing: null,"));
        assert!(output.contains("export type TokenTextKey = keyof typeof tokenText;"));
    }

    #[test]
    fn test_round_trip_of_emitted_literals() {
        // Emitted object literal values must parse back to the fed-in values.
        let output = render();
        let line = output.lines().find(|l| l.contains("sm:")).unwrap();
        let literal = line.trim().trim_start_matches("sm:").trim().trim_end_matches(',');
        let parsed: serde_json::Value = serde_json::from_str(literal).unwrap();
        assert_eq!(parsed, json!("8px"));
    }

    #[test]
    fn test_no_text_styles_no_token_text() {
        let t = normalize(&json!({"spacing": {"sm": {"$value": "8px"}}}));
        let categories = group_by_category(collect_all(&t).unwrap());
        let output = TypeScriptEmitter::new(EmitOptions::default())
            .emit(&categories, &[])
            .remove(0)
            .contents;
        assert!(!output.contains("tokenText"));
    }
}

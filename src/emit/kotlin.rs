//! Kotlin (Compose) emitter
//!
//! One file per category: an `enum class` plus typed extension `val`s with
//! explicit `else ->` fallbacks, and a typography file with the composite
//! font data class.

use super::color::Rgba;
use super::{Emitter, EmitOptions, GeneratedFile};
use crate::tokens::collect::capitalize;
use crate::tokens::text_style::parse_dimension_px;
use crate::tokens::tree::num_string;
use crate::tokens::{CategoryMap, FlatToken, TextStyle, TokenType};

pub struct KotlinEmitter {
    options: EmitOptions,
}

impl KotlinEmitter {
    pub fn new(options: EmitOptions) -> Self {
        KotlinEmitter { options }
    }

    fn header(&self) -> Vec<String> {
        vec![
            "// Do not edit directly. Generated from design tokens.".to_string(),
            format!("package {}", self.options.kotlin_package),
            String::new(),
            "import androidx.compose.ui.unit.Dp".to_string(),
            "import androidx.compose.ui.unit.dp".to_string(),
            "import androidx.compose.ui.graphics.Color".to_string(),
            String::new(),
        ]
    }

    fn category_file(&self, category: &str, tokens: &[FlatToken]) -> GeneratedFile {
        let enum_name = format!("{}{}", self.options.prefix, capitalize(category));
        let mut lines = self.header();

        lines.push(format!("enum class {enum_name} {{"));
        for token in tokens {
            lines.push(format!("    {},", entry_name(&token.ident)));
        }
        lines.push("}".to_string());
        lines.push(String::new());

        let numeric: Vec<&FlatToken> = tokens.iter().filter(|t| t.ty.is_numeric()).collect();
        if !numeric.is_empty() {
            lines.push(format!("val {enum_name}.value: Dp"));
            lines.push("    get() = when (this) {".to_string());
            for token in &numeric {
                let n = match token.ty {
                    TokenType::Dimension => parse_dimension_px(&token.value),
                    _ => token.value.as_f64().unwrap_or(0.0),
                };
                lines.push(format!(
                    "        {enum_name}.{} -> {}.dp",
                    entry_name(&token.ident),
                    num_string(n)
                ));
            }
            lines.push("        else -> 0.dp".to_string());
            lines.push("    }".to_string());
            lines.push(String::new());
        }

        let colors: Vec<&FlatToken> = tokens.iter().filter(|t| t.ty == TokenType::Color).collect();
        if !colors.is_empty() {
            lines.push(format!("val {enum_name}.colorValue: Color"));
            lines.push("    get() = when (this) {".to_string());
            for token in &colors {
                lines.push(format!(
                    "        {enum_name}.{} -> {}",
                    entry_name(&token.ident),
                    color_literal(&token.value.display_string())
                ));
            }
            lines.push("        else -> Color.Unspecified".to_string());
            lines.push("    }".to_string());
            lines.push(String::new());
        }

        let families: Vec<&FlatToken> = tokens
            .iter()
            .filter(|t| t.ty == TokenType::FontFamily)
            .collect();
        if !families.is_empty() {
            lines.push(format!("val {enum_name}.fontFamilyValue: String"));
            lines.push("    get() = when (this) {".to_string());
            for token in &families {
                lines.push(format!(
                    "        {enum_name}.{} -> \"{}\"",
                    entry_name(&token.ident),
                    escape(&token.value.display_string())
                ));
            }
            lines.push("        else -> \"\"".to_string());
            lines.push("    }".to_string());
            lines.push(String::new());
        }

        let weights: Vec<&FlatToken> = tokens
            .iter()
            .filter(|t| t.ty == TokenType::FontWeight)
            .collect();
        if !weights.is_empty() {
            lines.push(format!("val {enum_name}.fontWeightValue: Float"));
            lines.push("    get() = when (this) {".to_string());
            for token in &weights {
                lines.push(format!(
                    "        {enum_name}.{} -> {}f",
                    entry_name(&token.ident),
                    num_string(token.value.as_f64().unwrap_or(400.0))
                ));
            }
            lines.push("        else -> 400f".to_string());
            lines.push("    }".to_string());
            lines.push(String::new());
        }

        GeneratedFile::new(format!("android/{enum_name}.kt"), lines.join("\n"))
    }

    fn typography_file(&self, text_styles: &[TextStyle]) -> GeneratedFile {
        let prefix = &self.options.prefix;
        let mut lines = vec![
            "// Do not edit directly. Generated from design tokens.".to_string(),
            format!("package {}", self.options.kotlin_package),
            String::new(),
        ];
        lines.push(format!("data class {prefix}Font("));
        lines.push("    val family: String,".to_string());
        lines.push("    val size: Float,".to_string());
        lines.push("    val weight: Float,".to_string());
        lines.push("    val lineHeight: Float,".to_string());
        lines.push("    val letterSpacing: Float?,".to_string());
        lines.push("    val underline: Boolean".to_string());
        lines.push(")".to_string());
        lines.push(String::new());
        lines.push(format!("enum class {prefix}TypographyToken {{"));
        for style in text_styles {
            lines.push(format!("    {},", entry_name(&style.ident)));
        }
        lines.push("}".to_string());
        lines.push(String::new());
        lines.push(format!("val {prefix}TypographyToken.font: {prefix}Font"));
        lines.push("    get() = when (this) {".to_string());
        for style in text_styles {
            let f = &style.font;
            let letter_spacing = f
                .letter_spacing
                .map(|v| format!("{}f", num_string(v)))
                .unwrap_or_else(|| "null".to_string());
            lines.push(format!(
                "        {prefix}TypographyToken.{} -> {prefix}Font(",
                entry_name(&style.ident)
            ));
            lines.push(format!("            family = \"{}\",", escape(&f.family)));
            lines.push(format!("            size = {}f,", num_string(f.size)));
            lines.push(format!("            weight = {}f,", num_string(f.weight)));
            lines.push(format!("            lineHeight = {}f,", num_string(f.line_height)));
            lines.push(format!("            letterSpacing = {letter_spacing},"));
            lines.push(format!("            underline = {}", f.underline));
            lines.push("        )".to_string());
        }
        lines.push("    }".to_string());
        lines.push(String::new());
        GeneratedFile::new(
            format!("android/{prefix}Typography.kt"),
            lines.join("\n"),
        )
    }
}

/// Kotlin enum entries are UpperCamelCase versions of the token identifier.
fn entry_name(ident: &str) -> String {
    capitalize(ident)
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Render a Compose `Color(...)` literal; unparseable values fall back to
/// `Color.Unspecified` with the raw value kept visible.
fn color_literal(raw: &str) -> String {
    match Rgba::parse(raw) {
        Some(c) => {
            let (r, g, b) = c.bytes();
            if c.a == 1.0 {
                format!("Color(red = {r}/255f, green = {g}/255f, blue = {b}/255f)")
            } else {
                format!(
                    "Color(red = {r}/255f, green = {g}/255f, blue = {b}/255f, alpha = {}f)",
                    num_string(c.a)
                )
            }
        }
        None => format!("Color.Unspecified /* {} */", escape(raw)),
    }
}

impl Emitter for KotlinEmitter {
    fn name(&self) -> &str {
        "kotlin"
    }

    fn description(&self) -> &str {
        "Kotlin enum classes with Compose accessors"
    }

    fn emit(&self, categories: &CategoryMap, text_styles: &[TextStyle]) -> Vec<GeneratedFile> {
        let mut files: Vec<GeneratedFile> = categories
            .iter()
            .map(|(category, tokens)| self.category_file(category, tokens))
            .collect();
        if !text_styles.is_empty() {
            files.push(self.typography_file(text_styles));
        }
        files
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::{collect_all, collect_text_styles, group_by_category, normalize, TokenTree};
    use serde_json::json;

    fn tree() -> TokenTree {
        normalize(&json!({
            "spacing": {
                "sm": {"$value": "8px", "$type": "dimension"},
                "2xl": {"$value": "32px", "$type": "dimension"}
            },
            "color": {"primary": {"$value": "#ED2124", "$type": "color"}},
            "typography": {"text": {"body": {"bold": {
                "fontFamily": {"$value": "Quicksand"},
                "fontSize": {"$value": "15px"},
                "fontWeight": {"$value": 700},
                "lineHeight": {"$value": 1.5}
            }}}}
        }))
    }

    fn emit() -> Vec<GeneratedFile> {
        let t = tree();
        let categories = group_by_category(collect_all(&t).unwrap());
        let styles = collect_text_styles(&t);
        KotlinEmitter::new(EmitOptions::default()).emit(&categories, &styles)
    }

    fn file<'a>(files: &'a [GeneratedFile], name: &str) -> &'a GeneratedFile {
        files.iter().find(|f| f.path.ends_with(name)).unwrap()
    }

    #[test]
    fn test_enum_class_per_category() {
        let files = emit();
        let spacing = file(&files, "DodadaSpacing.kt");
        assert!(spacing.contents.contains("enum class DodadaSpacing {"));
        assert!(spacing.contents.contains("    Sm,"));
        assert!(spacing.contents.contains("    TwoXl,"));
    }

    #[test]
    fn test_dimension_accessor_with_default() {
        let files = emit();
        let spacing = file(&files, "DodadaSpacing.kt");
        assert!(spacing.contents.contains("val DodadaSpacing.value: Dp"));
        assert!(spacing.contents.contains("DodadaSpacing.Sm -> 8.dp"));
        assert!(spacing.contents.contains("else -> 0.dp"));
    }

    #[test]
    fn test_color_accessor() {
        let files = emit();
        let color = file(&files, "DodadaColor.kt");
        assert!(color
            .contents
            .contains("DodadaColor.Primary -> Color(red = 237/255f, green = 33/255f, blue = 36/255f)"));
        assert!(color.contents.contains("else -> Color.Unspecified"));
    }

    #[test]
    fn test_typography_file() {
        let files = emit();
        let typography = file(&files, "DodadaTypography.kt");
        assert!(typography.contents.contains("data class DodadaFont("));
        assert!(typography.contents.contains("enum class DodadaTypographyToken {"));
        assert!(typography.contents.contains("    BodyBold,"));
        assert!(typography.contents.contains("size = 15f,"));
        assert!(typography.contents.contains("letterSpacing = null,"));
    }

    #[test]
    fn test_package_header() {
        let files = emit();
        for f in &files {
            assert!(f.contents.contains("package com.dodada.tokens"), "{:?}", f.path);
        }
    }

    #[test]
    fn test_color_literal_alpha() {
        assert_eq!(
            color_literal("#FF000080"),
            format!(
                "Color(red = 255/255f, green = 0/255f, blue = 0/255f, alpha = {}f)",
                num_string(128.0 / 255.0)
            )
        );
    }

    #[test]
    fn test_color_literal_unparseable_stays_visible() {
        assert!(color_literal("{color.missing}").contains("{color.missing}"));
    }
}

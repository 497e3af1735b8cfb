//! Swift (iOS) emitter
//!
//! One file per category under a per-category subdirectory: a `CaseIterable`
//! enum, typed accessor extensions, a tokens protocol with a default
//! implementation, plus `CGFloat` convenience extensions and the composite
//! typography file. Color tokens are asset-backed (`Color(assetName)`), so
//! they pair with the generated asset catalog.

use super::{Emitter, EmitOptions, GeneratedFile};
use crate::tokens::collect::capitalize;
use crate::tokens::text_style::parse_dimension_px;
use crate::tokens::tree::num_string;
use crate::tokens::{CategoryMap, FlatToken, TextStyle, TokenType};

const HEADER: &str = "// Do not edit directly. Generated from design tokens.";

/// Categories that get a `CGFloat` convenience extension file.
const CGFLOAT_CATEGORIES: [&str; 5] = ["spacing", "radius", "sizing", "layout", "lineHeight"];

pub struct SwiftEmitter {
    options: EmitOptions,
}

impl SwiftEmitter {
    pub fn new(options: EmitOptions) -> Self {
        SwiftEmitter { options }
    }

    fn enum_name(&self, category: &str) -> String {
        let base = capitalize(category);
        match category {
            "color" | "icon" | "sizing" | "spacing" | "radius" | "layout" => {
                format!("{}{base}Token", self.options.prefix)
            }
            _ => format!("{}{base}", self.options.prefix),
        }
    }

    fn category_file(&self, category: &str, tokens: &[FlatToken]) -> GeneratedFile {
        let enum_name = self.enum_name(category);
        let is_color = category == "color";
        let mut lines = vec![HEADER.to_string(), String::new()];
        lines.push(if is_color { "import SwiftUI" } else { "import UIKit" }.to_string());
        lines.push(String::new());

        lines.push(format!("public enum {enum_name}: CaseIterable {{"));
        for token in tokens {
            lines.push(format!("    case {}", token.ident));
        }
        lines.push("}".to_string());
        lines.push(String::new());

        let has_numeric = tokens.iter().any(|t| t.ty.is_numeric());
        let has_colors = tokens.iter().any(|t| t.ty == TokenType::Color);
        let has_families = tokens.iter().any(|t| t.ty == TokenType::FontFamily);
        let has_weights = tokens.iter().any(|t| t.ty == TokenType::FontWeight);
        let has_icons = tokens.iter().any(|t| t.ty == TokenType::Asset);

        if has_numeric {
            lines.push(format!("extension {enum_name} {{"));
            lines.push("    public var value: CGFloat {".to_string());
            lines.push("        switch self {".to_string());
            for token in tokens {
                let n = match token.ty {
                    TokenType::Dimension => parse_dimension_px(&token.value),
                    TokenType::Number => token.value.as_f64().unwrap_or(0.0),
                    _ => 0.0,
                };
                lines.push(format!(
                    "        case .{}: return {}",
                    token.ident,
                    cgfloat_literal(n)
                ));
            }
            lines.push("        }".to_string());
            lines.push("    }".to_string());
            lines.push("}".to_string());
            lines.push(String::new());
        }

        if has_colors && !has_numeric {
            lines.push(format!("extension {enum_name} {{"));
            lines.push("    /// Color name in the generated asset catalog. Usage: Color(assetName)".to_string());
            lines.push("    public var assetName: String {".to_string());
            lines.push("        switch self {".to_string());
            for token in tokens {
                lines.push(format!(
                    "        case .{}: return \"{}\"",
                    token.ident,
                    escape(&token.ident)
                ));
            }
            lines.push("        }".to_string());
            lines.push("    }".to_string());
            lines.push("}".to_string());
            lines.push(String::new());
            lines.push(format!("public extension {enum_name} {{"));
            lines.push("    func toColor() -> Color {".to_string());
            lines.push("        Color(assetName)".to_string());
            lines.push("    }".to_string());
            lines.push("}".to_string());
            lines.push(String::new());
        }

        if has_families && !has_numeric && !has_colors {
            lines.push(format!("extension {enum_name} {{"));
            lines.push("    public var value: String {".to_string());
            lines.push("        switch self {".to_string());
            for token in tokens {
                let value = if token.ty == TokenType::FontFamily {
                    token.value.display_string()
                } else {
                    String::new()
                };
                lines.push(format!(
                    "        case .{}: return \"{}\"",
                    token.ident,
                    escape(&value)
                ));
            }
            lines.push("        }".to_string());
            lines.push("    }".to_string());
            lines.push("}".to_string());
            lines.push(String::new());
        }

        if has_weights && !has_numeric && !has_colors && !has_families {
            lines.push(format!("extension {enum_name} {{"));
            lines.push("    public var value: CGFloat {".to_string());
            lines.push("        switch self {".to_string());
            for token in tokens {
                let n = if token.ty == TokenType::FontWeight {
                    token.value.as_f64().unwrap_or(400.0)
                } else {
                    400.0
                };
                lines.push(format!(
                    "        case .{}: return {}",
                    token.ident,
                    cgfloat_literal(n)
                ));
            }
            lines.push("        }".to_string());
            lines.push("    }".to_string());
            lines.push("}".to_string());
            lines.push(String::new());
        }

        if has_icons {
            lines.push(format!("extension {enum_name} {{"));
            lines.push("    /// Image name in the generated asset catalog. Usage: Image(assetName)".to_string());
            lines.push("    public var assetName: String {".to_string());
            lines.push("        switch self {".to_string());
            for token in tokens {
                lines.push(format!(
                    "        case .{}: return \"{}\"",
                    token.ident,
                    escape(&token.ident)
                ));
            }
            lines.push("        }".to_string());
            lines.push("    }".to_string());
            lines.push("}".to_string());
            lines.push(String::new());
        }

        self.push_protocol(
            &mut lines,
            category,
            &enum_name,
            tokens,
            has_numeric,
            has_colors,
            has_families,
            has_weights,
            has_icons,
        );

        GeneratedFile::new(
            format!("ios/{}/{enum_name}.swift", subdir(category)),
            lines.join("\n"),
        )
    }

    /// Tokens protocol + default implementation struct for one category.
    #[allow(clippy::too_many_arguments)]
    fn push_protocol(
        &self,
        lines: &mut Vec<String>,
        category: &str,
        enum_name: &str,
        tokens: &[FlatToken],
        has_numeric: bool,
        has_colors: bool,
        has_families: bool,
        has_weights: bool,
        has_icons: bool,
    ) {
        let (value_type, accessor, method) = if has_numeric {
            ("CGFloat", Some("value"), "value")
        } else if has_colors {
            ("Color", None, "toColor")
        } else if has_families {
            ("String", Some("value"), "value")
        } else if has_weights {
            ("CGFloat", Some("value"), "value")
        } else if has_icons {
            ("String", Some("assetName"), "assetName")
        } else {
            return;
        };
        if tokens.is_empty() {
            return;
        }

        let base = capitalize(category);
        let protocol_name = format!("{}Theme{base}Tokens", self.options.prefix);
        let impl_name = format!("{protocol_name}Default");

        lines.push(format!("public protocol {protocol_name} {{"));
        for token in tokens {
            lines.push(format!("    static var {}: {value_type} {{ get }}", token.ident));
        }
        lines.push(format!(
            "    func {method}(for token: {enum_name}) -> {value_type}"
        ));
        lines.push("}".to_string());
        lines.push(String::new());
        lines.push(format!("public struct {impl_name}: {protocol_name} {{"));
        match accessor {
            None => {
                for token in tokens {
                    lines.push(format!(
                        "    public static var {}: {value_type} {{ {enum_name}.{}.toColor() }}",
                        token.ident, token.ident
                    ));
                }
                lines.push(format!(
                    "    public func {method}(for token: {enum_name}) -> {value_type} {{"
                ));
                lines.push("        token.toColor()".to_string());
                lines.push("    }".to_string());
            }
            Some(accessor) => {
                for token in tokens {
                    lines.push(format!(
                        "    public static var {}: {value_type} {{ {enum_name}.{}.{accessor} }}",
                        token.ident, token.ident
                    ));
                }
                lines.push(format!(
                    "    public func {method}(for token: {enum_name}) -> {value_type} {{"
                ));
                lines.push("        switch token {".to_string());
                for token in tokens {
                    lines.push(format!(
                        "        case .{}: return Self.{}",
                        token.ident, token.ident
                    ));
                }
                lines.push("        }".to_string());
                lines.push("    }".to_string());
            }
        }
        lines.push("}".to_string());
        lines.push(String::new());
    }

    /// `Color` extension exposing one static var per color token.
    fn color_extension_file(&self, tokens: &[FlatToken]) -> GeneratedFile {
        let enum_name = self.enum_name("color");
        let mut lines = vec![
            HEADER.to_string(),
            String::new(),
            "import SwiftUI".to_string(),
            String::new(),
            "extension Color {".to_string(),
        ];
        for token in tokens {
            lines.push(format!(
                "    public static var {}: Color {{ {enum_name}.{}.toColor() }}",
                token.ident, token.ident
            ));
        }
        lines.push("}".to_string());
        lines.push(String::new());
        GeneratedFile::new(
            format!("ios/Color/{}+Color.swift", self.options.prefix),
            lines.join("\n"),
        )
    }

    /// Per-category `CGFloat` extension with prefixed static vars.
    fn cgfloat_file(&self, category: &str, tokens: &[FlatToken]) -> Option<GeneratedFile> {
        if !tokens.iter().any(|t| t.ty.is_numeric()) {
            return None;
        }
        let enum_name = self.enum_name(category);
        let mut lines = vec![
            HEADER.to_string(),
            String::new(),
            "import CoreGraphics".to_string(),
            String::new(),
            "extension CGFloat {".to_string(),
        ];
        for token in tokens {
            // lineHeight vars keep the bare identifier; others get the category prefix
            let property = if category == "lineHeight" {
                token.ident.clone()
            } else {
                format!("{category}{}", capitalize(&token.ident))
            };
            lines.push(format!(
                "    public static var {property}: CGFloat {{ {enum_name}.{}.value }}",
                token.ident
            ));
        }
        lines.push("}".to_string());
        lines.push(String::new());
        Some(GeneratedFile::new(
            format!("ios/{}/{}+CGFloat.swift", subdir(category), capitalize(category)),
            lines.join("\n"),
        ))
    }

    fn typography_file(&self, text_styles: &[TextStyle]) -> GeneratedFile {
        let prefix = &self.options.prefix;
        let mut lines = vec![
            HEADER.to_string(),
            "import UIKit".to_string(),
            String::new(),
        ];
        lines.push(format!("public struct {prefix}Font {{"));
        lines.push("    public let family: String".to_string());
        lines.push("    public let size: CGFloat".to_string());
        lines.push("    public let weight: CGFloat".to_string());
        lines.push("    public let lineHeight: CGFloat".to_string());
        lines.push("    public let letterSpacing: CGFloat?".to_string());
        lines.push("    public let underline: Bool".to_string());
        lines.push("}".to_string());
        lines.push(String::new());
        lines.push(format!("public enum {prefix}TypographyToken: CaseIterable {{"));
        for style in text_styles {
            lines.push(format!("    case {}", style.ident));
        }
        lines.push("}".to_string());
        lines.push(String::new());
        lines.push(format!("extension {prefix}TypographyToken {{"));
        lines.push(format!("    public var font: {prefix}Font {{"));
        lines.push("        switch self {".to_string());
        for style in text_styles {
            let f = &style.font;
            let letter_spacing = f
                .letter_spacing
                .map(cgfloat_literal)
                .unwrap_or_else(|| "nil".to_string());
            lines.push(format!("        case .{}: return {prefix}Font(", style.ident));
            lines.push(format!("            family: \"{}\",", escape(&f.family)));
            lines.push(format!("            size: {},", cgfloat_literal(f.size)));
            lines.push(format!("            weight: {},", cgfloat_literal(f.weight)));
            lines.push(format!("            lineHeight: {},", cgfloat_literal(f.line_height)));
            lines.push(format!("            letterSpacing: {letter_spacing},"));
            lines.push(format!("            underline: {}", f.underline));
            lines.push("        )".to_string());
        }
        lines.push("        }".to_string());
        lines.push("    }".to_string());
        lines.push("}".to_string());
        lines.push(String::new());
        lines.push(format!("public protocol {prefix}ThemeTypographyTokens {{"));
        for style in text_styles {
            lines.push(format!("    static var {}: {prefix}Font {{ get }}", style.ident));
        }
        lines.push(format!(
            "    func font(for token: {prefix}TypographyToken) -> {prefix}Font"
        ));
        lines.push("}".to_string());
        lines.push(String::new());
        lines.push(format!(
            "public struct {prefix}ThemeTypographyTokensDefault: {prefix}ThemeTypographyTokens {{"
        ));
        for style in text_styles {
            lines.push(format!(
                "    public static var {}: {prefix}Font {{ {prefix}TypographyToken.{}.font }}",
                style.ident, style.ident
            ));
        }
        lines.push(format!(
            "    public func font(for token: {prefix}TypographyToken) -> {prefix}Font {{"
        ));
        lines.push("        switch token {".to_string());
        for style in text_styles {
            lines.push(format!(
                "        case .{}: return Self.{}",
                style.ident, style.ident
            ));
        }
        lines.push("        }".to_string());
        lines.push("    }".to_string());
        lines.push("}".to_string());
        lines.push(String::new());
        GeneratedFile::new(
            format!("ios/Typography/{prefix}Typography.swift"),
            lines.join("\n"),
        )
    }
}

/// iOS subdirectory per category.
fn subdir(category: &str) -> String {
    match category {
        "color" => "Color".to_string(),
        "icon" => "Icons".to_string(),
        "fontFamily" | "fontSize" | "fontWeight" => "Typography".to_string(),
        "lineHeight" => "LineHeight".to_string(),
        other => capitalize(other),
    }
}

/// Valid Swift CGFloat literal; NaN has no literal form.
fn cgfloat_literal(n: f64) -> String {
    if n.is_nan() {
        "CGFloat.nan".to_string()
    } else {
        format!("CGFloat({})", num_string(n))
    }
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

impl Emitter for SwiftEmitter {
    fn name(&self) -> &str {
        "swift"
    }

    fn description(&self) -> &str {
        "Swift enums with typed accessors, protocols and CGFloat extensions"
    }

    fn emit(&self, categories: &CategoryMap, text_styles: &[TextStyle]) -> Vec<GeneratedFile> {
        let mut files = Vec::new();
        for (category, tokens) in categories {
            // Theme subtrees are materialized separately, not enumerated
            if category == "theme" || tokens.is_empty() {
                continue;
            }
            files.push(self.category_file(category, tokens));
            if category == "color" {
                files.push(self.color_extension_file(tokens));
            }
        }
        for category in CGFLOAT_CATEGORIES {
            if let Some(tokens) = categories.get(category) {
                if let Some(file) = self.cgfloat_file(category, tokens) {
                    files.push(file);
                }
            }
        }
        if !text_styles.is_empty() {
            files.push(self.typography_file(text_styles));
        }
        files
    }
}

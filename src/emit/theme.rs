//! Materialized-theme artifacts
//!
//! A resolved theme subtree becomes three artifacts: a JSON document, a
//! TypeScript module, and Swift accessor code for the button component
//! (protocol + default implementation, one property per resolved leaf).

use serde_json::json;

use super::{EmitOptions, GeneratedFile};
use crate::tokens::collect::capitalize;
use crate::tokens::text_style::parse_dimension_px;
use crate::tokens::theme::collect_properties;
use crate::tokens::tree::num_string;
use crate::tokens::{Node, TokenType};

/// Render all artifacts for one materialized theme.
pub fn theme_files(name: &str, resolved: &Node, options: &EmitOptions) -> Vec<GeneratedFile> {
    let mut files = vec![json_file(name, resolved), ts_file(name, resolved)];
    if let Some(button) = resolved.as_group().and_then(|children| children.get("button")) {
        if let Some(file) = button_theme_swift(button, options) {
            files.push(file);
        }
    }
    files
}

fn json_file(name: &str, resolved: &Node) -> GeneratedFile {
    let doc = json!({"theme": {name: resolved.to_json()}});
    GeneratedFile::new(
        format!("theme/theme-{name}.json"),
        serde_json::to_string_pretty(&doc).unwrap_or_default(),
    )
}

fn ts_file(name: &str, resolved: &Node) -> GeneratedFile {
    let const_name = format!("theme{}", capitalize(name));
    let type_name = format!("Theme{}", capitalize(name));
    let body = serde_json::to_string_pretty(&resolved.to_json()).unwrap_or_default();
    let contents = format!(
        "/** Do not edit directly. Generated from design tokens. Resolved '{name}' theme. */\n\n\
         export const {const_name} = {body} as const;\n\n\
         export type {type_name} = typeof {const_name};\n"
    );
    GeneratedFile::new(format!("theme/theme-{name}.ts"), contents)
}

/// Swift protocol + default struct over `theme.<name>.button`.
fn button_theme_swift(button: &Node, options: &EmitOptions) -> Option<GeneratedFile> {
    let properties = collect_properties(button);
    if properties.is_empty() {
        return None;
    }
    let prefix = &options.prefix;
    let mut lines = vec![
        "// Do not edit directly. Generated from design tokens.".to_string(),
        String::new(),
        "import SwiftUI".to_string(),
        String::new(),
        format!("public protocol {prefix}ButtonTheme {{"),
    ];
    for property in &properties {
        let swift_type = if property.ty == TokenType::Color { "Color" } else { "CGFloat" };
        lines.push(format!("    var {}: {swift_type} {{ get }}", property.name));
    }
    lines.push("}".to_string());
    lines.push(String::new());
    lines.push(format!(
        "public struct {prefix}ButtonThemeDefault: {prefix}ButtonTheme {{"
    ));
    for property in &properties {
        let (swift_type, rhs) = match property.ty {
            TokenType::Color => {
                let raw = property.value.display_string();
                let rhs = if raw.eq_ignore_ascii_case("transparent") {
                    "Color.clear".to_string()
                } else {
                    format!("Color(hex: \"{}\")", escape(&raw))
                };
                ("Color", rhs)
            }
            TokenType::Number => (
                "CGFloat",
                format!("CGFloat({})", num_string(property.value.as_f64().unwrap_or(0.0))),
            ),
            _ => (
                "CGFloat",
                format!("CGFloat({})", num_string(parse_dimension_px(&property.value))),
            ),
        };
        lines.push(format!("    public var {}: {swift_type} {{ {rhs} }}", property.name));
    }
    lines.push("}".to_string());
    lines.push(String::new());
    lines.push("extension Color {".to_string());
    lines.push("    /// Color from hex (\"#ED2124\" or \"#ED2124FF\"); \"transparent\" maps to clear.".to_string());
    lines.push("    public init(hex: String) {".to_string());
    lines.push("        if hex.lowercased() == \"transparent\" {".to_string());
    lines.push("            self = .clear".to_string());
    lines.push("            return".to_string());
    lines.push("        }".to_string());
    lines.push("        let hex = hex.trimmingCharacters(in: CharacterSet.alphanumerics.inverted)".to_string());
    lines.push("        var int: UInt64 = 0".to_string());
    lines.push("        Scanner(string: hex).scanHexInt64(&int)".to_string());
    lines.push("        let a, r, g, b: UInt64".to_string());
    lines.push("        switch hex.count {".to_string());
    lines.push("        case 3:".to_string());
    lines.push("            (r, g, b, a) = ((int >> 8) * 17, (int >> 4 & 0xF) * 17, (int & 0xF) * 17, 255)".to_string());
    lines.push("        case 6:".to_string());
    lines.push("            (r, g, b, a) = (int >> 16, int >> 8 & 0xFF, int & 0xFF, 255)".to_string());
    lines.push("        case 8:".to_string());
    lines.push("            (r, g, b, a) = (int >> 24, int >> 16 & 0xFF, int >> 8 & 0xFF, int & 0xFF)".to_string());
    lines.push("        default:".to_string());
    lines.push("            (r, g, b, a) = (0, 0, 0, 255)".to_string());
    lines.push("        }".to_string());
    lines.push("        self.init(".to_string());
    lines.push("            .sRGB,".to_string());
    lines.push("            red: Double(r) / 255,".to_string());
    lines.push("            green: Double(g) / 255,".to_string());
    lines.push("            blue: Double(b) / 255,".to_string());
    lines.push("            opacity: Double(a) / 255".to_string());
    lines.push("        )".to_string());
    lines.push("    }".to_string());
    lines.push("}".to_string());
    lines.push(String::new());
    Some(GeneratedFile::new(
        format!("ios/Component/{prefix}ButtonTheme.swift"),
        lines.join("\n"),
    ))
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::{materialize, normalize};
    use serde_json::json;

    fn resolved_main() -> Node {
        let tree = normalize(&json!({
            "color": {"primary": {"$value": "#ED2124", "$type": "color"}},
            "spacing": {"sm": {"$value": "8px", "$type": "dimension"}},
            "theme": {"main": {"button": {
                "primary": {"background": {"$value": "{color.primary}", "$type": "color"}},
                "padding": {"$value": "{spacing.sm}", "$type": "dimension"},
                "ghost": {"background": {"$value": "transparent", "$type": "color"}}
            }}}
        }));
        let segments: Vec<String> = vec!["theme".into(), "main".into()];
        materialize(&tree, &segments).unwrap()
    }

    #[test]
    fn test_theme_json_artifact() {
        let files = theme_files("main", &resolved_main(), &EmitOptions::default());
        let json_file = files.iter().find(|f| f.path.ends_with("theme-main.json")).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json_file.contents).unwrap();
        assert_eq!(
            parsed["theme"]["main"]["button"]["primary"]["background"]["value"],
            "#ED2124"
        );
    }

    #[test]
    fn test_theme_ts_artifact() {
        let files = theme_files("main", &resolved_main(), &EmitOptions::default());
        let ts = files.iter().find(|f| f.path.ends_with("theme-main.ts")).unwrap();
        assert!(ts.contents.contains("export const themeMain = "));
        assert!(ts.contents.contains(" as const;"));
        assert!(ts.contents.contains("export type ThemeMain = typeof themeMain;"));
    }

    #[test]
    fn test_button_theme_swift() {
        let files = theme_files("main", &resolved_main(), &EmitOptions::default());
        let swift = files
            .iter()
            .find(|f| f.path.ends_with("DodadaButtonTheme.swift"))
            .unwrap();
        assert!(swift.contents.contains("public protocol DodadaButtonTheme {"));
        assert!(swift
            .contents
            .contains("    var primaryBackground: Color { get }"));
        assert!(swift
            .contents
            .contains("    public var primaryBackground: Color { Color(hex: \"#ED2124\") }"));
        assert!(swift.contents.contains("    public var padding: CGFloat { CGFloat(8) }"));
        assert!(swift.contents.contains("    public var ghostBackground: Color { Color.clear }"));
        assert!(swift.contents.contains("public init(hex: String) {"));
    }

    #[test]
    fn test_no_button_subtree_no_swift_file() {
        let tree = normalize(&json!({"theme": {"main": {"card": {"radius": {"$value": "12px"}}}}}));
        let segments: Vec<String> = vec!["theme".into(), "main".into()];
        let resolved = materialize(&tree, &segments).unwrap();
        let files = theme_files("main", &resolved, &EmitOptions::default());
        assert_eq!(files.len(), 2);
    }
}

//! Platform asset-catalog structures
//!
//! iOS catalogs are directories of `Contents.json` files: one colorset per
//! color token and one imageset per icon token, named by token identifier.
//! Android gets a drawable name per icon (`ic_` + snake_case); the actual
//! SVG-to-vector-drawable conversion is an external concern.

use std::path::{Path, PathBuf};

use serde_json::json;

use super::color::Rgba;
use super::GeneratedFile;
use crate::tokens::FlatToken;

fn xcode_info() -> serde_json::Value {
    json!({"author": "xcode", "version": 1})
}

fn pretty(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Three-decimal component string, the form Xcode writes itself.
fn component(v: f64) -> String {
    format!("{v:.3}")
}

/// One `.colorset` per color token under `ios/Colors.xcassets`.
pub fn color_catalog(tokens: &[FlatToken]) -> Vec<GeneratedFile> {
    let mut files = vec![GeneratedFile::new(
        "ios/Colors.xcassets/Contents.json",
        pretty(&json!({"info": xcode_info()})),
    )];
    for token in tokens {
        let rgba = Rgba::parse_or_black(&token.value.display_string());
        let contents = json!({
            "colors": [{
                "color": {
                    "color-space": "srgb",
                    "components": {
                        "alpha": component(rgba.a),
                        "blue": component(rgba.b),
                        "green": component(rgba.g),
                        "red": component(rgba.r),
                    },
                },
                "idiom": "universal",
            }],
            "info": xcode_info(),
        });
        files.push(GeneratedFile::new(
            format!("ios/Colors.xcassets/{}.colorset/Contents.json", token.ident),
            pretty(&contents),
        ));
    }
    files
}

/// One `.imageset` per icon token under `ios/Icons.xcassets`. The referenced
/// file name is the token's (string) value; copying the file itself is the
/// executor's job.
pub fn icon_catalog(tokens: &[FlatToken]) -> Vec<GeneratedFile> {
    let mut files = vec![GeneratedFile::new(
        "ios/Icons.xcassets/Contents.json",
        pretty(&json!({"info": xcode_info()})),
    )];
    for token in tokens {
        let filename = icon_file_name(token);
        let contents = json!({
            "images": [{"filename": filename, "idiom": "universal"}],
            "info": xcode_info(),
        });
        files.push(GeneratedFile::new(
            format!("ios/Icons.xcassets/{}.imageset/Contents.json", token.ident),
            pretty(&contents),
        ));
    }
    files
}

/// Logical source file name for an icon token.
pub fn icon_file_name(token: &FlatToken) -> String {
    match token.value.as_str() {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => "placeholder.svg".to_string(),
    }
}

/// Destination path of an icon inside its imageset.
pub fn imageset_path(token: &FlatToken) -> PathBuf {
    PathBuf::from(format!(
        "ios/Icons.xcassets/{}.imageset/{}",
        token.ident,
        icon_file_name(token)
    ))
}

/// Android drawable resource name: `ic_` + snake_case identifier.
pub fn drawable_name(ident: &str) -> String {
    let mut out = String::from("ic_");
    for (i, c) in ident.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Case-insensitive lookup of an icon file in the configured assets directory.
pub fn find_icon_file(dir: &Path, filename: &str) -> Option<PathBuf> {
    let exact = dir.join(filename);
    if exact.exists() {
        return Some(exact);
    }
    let entries = std::fs::read_dir(dir).ok()?;
    for entry in entries.flatten() {
        if entry.file_name().to_string_lossy().eq_ignore_ascii_case(filename) {
            return Some(entry.path());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::{TokenType, TokenValue};

    fn token(ident: &str, value: &str, ty: TokenType) -> FlatToken {
        FlatToken {
            category: "color".to_string(),
            path: ident.to_string(),
            segments: vec![ident.to_string()],
            ident: ident.to_string(),
            value: TokenValue::Str(value.to_string()),
            ty,
        }
    }

    #[test]
    fn test_color_catalog_structure() {
        let tokens = vec![token("primary", "#ED2124", TokenType::Color)];
        let files = color_catalog(&tokens);
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].path.to_str().unwrap(), "ios/Colors.xcassets/Contents.json");
        assert_eq!(
            files[1].path.to_str().unwrap(),
            "ios/Colors.xcassets/primary.colorset/Contents.json"
        );
        let parsed: serde_json::Value = serde_json::from_str(&files[1].contents).unwrap();
        assert_eq!(parsed["colors"][0]["color"]["components"]["red"], "0.929");
        assert_eq!(parsed["colors"][0]["color"]["components"]["alpha"], "1.000");
        assert_eq!(parsed["colors"][0]["idiom"], "universal");
    }

    #[test]
    fn test_color_catalog_broken_value_falls_back_to_black() {
        let tokens = vec![token("broken", "{color.missing}", TokenType::Color)];
        let files = color_catalog(&tokens);
        let parsed: serde_json::Value = serde_json::from_str(&files[1].contents).unwrap();
        assert_eq!(parsed["colors"][0]["color"]["components"]["red"], "0.000");
        assert_eq!(parsed["colors"][0]["color"]["components"]["alpha"], "1.000");
    }

    #[test]
    fn test_icon_catalog_structure() {
        let tokens = vec![token("arrowLeft", "ArrowLeft.svg", TokenType::Asset)];
        let files = icon_catalog(&tokens);
        let parsed: serde_json::Value = serde_json::from_str(&files[1].contents).unwrap();
        assert_eq!(parsed["images"][0]["filename"], "ArrowLeft.svg");
        assert_eq!(
            imageset_path(&tokens[0]).to_str().unwrap(),
            "ios/Icons.xcassets/arrowLeft.imageset/ArrowLeft.svg"
        );
    }

    #[test]
    fn test_icon_missing_value_gets_placeholder() {
        let tokens = vec![token("empty", "", TokenType::Asset)];
        let files = icon_catalog(&tokens);
        let parsed: serde_json::Value = serde_json::from_str(&files[1].contents).unwrap();
        assert_eq!(parsed["images"][0]["filename"], "placeholder.svg");
    }

    #[test]
    fn test_drawable_name() {
        assert_eq!(drawable_name("arrowLeft"), "ic_arrow_left");
        assert_eq!(drawable_name("close"), "ic_close");
        assert_eq!(drawable_name("ArrowLeft"), "ic_arrow_left");
    }

    #[test]
    fn test_find_icon_file_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ArrowLeft.svg"), "<svg/>").unwrap();
        assert!(find_icon_file(dir.path(), "ArrowLeft.svg").is_some());
        assert!(find_icon_file(dir.path(), "arrowleft.svg").is_some());
        assert!(find_icon_file(dir.path(), "missing.svg").is_none());
    }
}

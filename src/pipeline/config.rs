//! Build configuration
//!
//! A build is an ordered source list plus an output directory and naming
//! knobs. Configs load from JSON or YAML (by extension); every field has a
//! default so a minimal config can be just the sources.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::emit::EmitOptions;
use crate::error::TokenError;

/// Default source list, merged in this exact order (later overrides earlier).
pub const DEFAULT_SOURCES: [&str; 11] = [
    "tokens/core/spacing.json",
    "tokens/core/radius.json",
    "tokens/core/sizing.json",
    "tokens/core/elevation.json",
    "tokens/core/color.json",
    "tokens/core/font.json",
    "tokens/core/icons.json",
    "tokens/semantic/layout.json",
    "tokens/semantic/component.json",
    "tokens/semantic/typography.json",
    "tokens/themes/main.json",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BuildConfig {
    /// Token source files, merged in declared order.
    pub sources: Vec<PathBuf>,
    /// Root for all generated artifacts.
    pub out_dir: PathBuf,
    /// Directory consulted (by name, case-insensitive) for icon files.
    pub icons_dir: Option<PathBuf>,
    /// Platforms to emit; `None` means all registered platforms.
    pub platforms: Option<Vec<String>>,
    /// Theme names materialized from `theme.<name>`.
    pub themes: Vec<String>,
    /// Type-name prefix for generated Swift/Kotlin code.
    pub prefix: String,
    /// Package for generated Kotlin files.
    pub kotlin_package: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig {
            sources: DEFAULT_SOURCES.iter().map(PathBuf::from).collect(),
            out_dir: PathBuf::from("dist"),
            icons_dir: None,
            platforms: None,
            themes: vec!["main".to_string()],
            prefix: "Dodada".to_string(),
            kotlin_package: "com.dodada.tokens".to_string(),
        }
    }
}

impl BuildConfig {
    /// Load a config from a JSON or YAML file, decided by extension.
    pub fn load(path: &Path) -> Result<BuildConfig, TokenError> {
        let raw = std::fs::read_to_string(path).map_err(|source| TokenError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );
        if is_yaml {
            serde_yaml::from_str(&raw).map_err(|e| TokenError::Config {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
        } else {
            serde_json::from_str(&raw).map_err(|e| TokenError::Config {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
        }
    }

    pub fn emit_options(&self) -> EmitOptions {
        EmitOptions {
            prefix: self.prefix.clone(),
            kotlin_package: self.kotlin_package.clone(),
        }
    }
}

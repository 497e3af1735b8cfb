//! Pipeline orchestration
//!
//! The executor owns all file I/O: read sources in declared order, run the
//! pure core (merge → normalize → collect → emit), and write everything under
//! the output directory. A missing source degrades to an empty contribution;
//! malformed JSON and identifier collisions abort the run, since a partial
//! multi-platform artifact set is worse than none.

use std::path::{Path, PathBuf};

use log::{info, warn};
use serde_json::Value;

use crate::emit::assets::{color_catalog, drawable_name, find_icon_file, icon_catalog, imageset_path};
use crate::emit::theme::theme_files;
use crate::emit::{EmitterRegistry, GeneratedFile};
use crate::error::TokenError;
use crate::pipeline::config::BuildConfig;
use crate::tokens::{
    collect_all, collect_text_styles, group_by_category, materialize, merge_sources, normalize,
    TokenType,
};

/// Summary of one pipeline run.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub files: Vec<PathBuf>,
    pub token_count: usize,
    pub text_style_count: usize,
}

pub struct PipelineExecutor {
    registry: EmitterRegistry,
}

impl PipelineExecutor {
    pub fn from_config(config: &BuildConfig) -> Self {
        PipelineExecutor {
            registry: EmitterRegistry::with_options(config.emit_options()),
        }
    }

    pub fn registry(&self) -> &EmitterRegistry {
        &self.registry
    }

    /// Merge and normalize the configured sources without emitting anything.
    pub fn resolve_only(&self, config: &BuildConfig) -> Result<Value, TokenError> {
        let sources = load_sources(&config.sources)?;
        Ok(normalize(&merge_sources(&sources)).to_json())
    }

    /// Run the whole pipeline and write every artifact under `out_dir`.
    pub fn run(&self, config: &BuildConfig) -> Result<BuildReport, TokenError> {
        let sources = load_sources(&config.sources)?;
        let tree = normalize(&merge_sources(&sources));

        let mut report = BuildReport::default();

        // Intermediate artifact, independently useful for inspection/caching
        let resolved = GeneratedFile::new(
            "tokens.resolved.json",
            serde_json::to_string_pretty(&tree.to_json()).unwrap_or_default(),
        );
        write_file(&config.out_dir, &resolved, &mut report)?;

        let tokens = collect_all(&tree)?;
        report.token_count = tokens.len();
        let categories = group_by_category(tokens);
        let text_styles = collect_text_styles(&tree);
        report.text_style_count = text_styles.len();

        let platforms = match &config.platforms {
            Some(list) => list.clone(),
            None => self.registry.list_platforms(),
        };
        for platform in &platforms {
            for file in self.registry.emit(platform, &categories, &text_styles)? {
                write_file(&config.out_dir, &file, &mut report)?;
            }
        }

        let options = config.emit_options();
        for theme_name in &config.themes {
            let segments = vec!["theme".to_string(), theme_name.clone()];
            match materialize(&tree, &segments) {
                Some(resolved_theme) => {
                    for file in theme_files(theme_name, &resolved_theme, &options) {
                        write_file(&config.out_dir, &file, &mut report)?;
                    }
                }
                None => warn!("theme '{theme_name}' not found in token tree, skipping"),
            }
        }

        self.write_asset_catalogs(config, &categories, &mut report)?;

        info!(
            "build complete: {} tokens, {} text styles, {} files",
            report.token_count,
            report.text_style_count,
            report.files.len()
        );
        Ok(report)
    }

    fn write_asset_catalogs(
        &self,
        config: &BuildConfig,
        categories: &crate::tokens::CategoryMap,
        report: &mut BuildReport,
    ) -> Result<(), TokenError> {
        let color_tokens: Vec<_> = categories
            .get("color")
            .map(|tokens| {
                tokens
                    .iter()
                    .filter(|t| t.ty == TokenType::Color)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        if !color_tokens.is_empty() {
            for file in color_catalog(&color_tokens) {
                write_file(&config.out_dir, &file, report)?;
            }
        }

        let icon_tokens: Vec<_> = categories
            .get("icon")
            .map(|tokens| {
                tokens
                    .iter()
                    .filter(|t| matches!(t.ty, TokenType::Asset | TokenType::Str))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        if icon_tokens.is_empty() {
            return Ok(());
        }
        for file in icon_catalog(&icon_tokens) {
            write_file(&config.out_dir, &file, report)?;
        }
        for token in &icon_tokens {
            info!("android drawable: {} -> {}.xml", token.ident, drawable_name(&token.ident));
            let Some(icons_dir) = &config.icons_dir else {
                continue;
            };
            let filename = crate::emit::assets::icon_file_name(token);
            match find_icon_file(icons_dir, &filename) {
                Some(source) => {
                    let destination = config.out_dir.join(imageset_path(token));
                    if let Some(parent) = destination.parent() {
                        std::fs::create_dir_all(parent).map_err(|e| TokenError::Io {
                            path: parent.to_path_buf(),
                            source: e,
                        })?;
                    }
                    std::fs::copy(&source, &destination).map_err(|e| TokenError::Io {
                        path: destination.clone(),
                        source: e,
                    })?;
                    report.files.push(destination);
                }
                None => warn!("icon file '{filename}' not found in {}", icons_dir.display()),
            }
        }
        Ok(())
    }
}

/// Read sources in declared order. A missing file contributes an empty
/// document with a warning; malformed JSON is fatal.
fn load_sources(paths: &[PathBuf]) -> Result<Vec<Value>, TokenError> {
    let mut sources = Vec::with_capacity(paths.len());
    for path in paths {
        if !path.exists() {
            warn!("token file not found, skipping: {}", path.display());
            sources.push(Value::Object(serde_json::Map::new()));
            continue;
        }
        let raw = std::fs::read_to_string(path).map_err(|source| TokenError::Io {
            path: path.clone(),
            source,
        })?;
        let parsed = serde_json::from_str(&raw).map_err(|source| TokenError::Json {
            path: path.clone(),
            source,
        })?;
        sources.push(parsed);
    }
    Ok(sources)
}

fn write_file(out_dir: &Path, file: &GeneratedFile, report: &mut BuildReport) -> Result<(), TokenError> {
    let full = out_dir.join(&file.path);
    if let Some(parent) = full.parent() {
        std::fs::create_dir_all(parent).map_err(|e| TokenError::Io {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    std::fs::write(&full, &file.contents).map_err(|e| TokenError::Io {
        path: full.clone(),
        source: e,
    })?;
    report.files.push(full);
    Ok(())
}

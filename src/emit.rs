//! Per-platform code emitters
//!
//! Each emitter is a pure function from (categorized tokens, text styles) to
//! rendered files; the executor writes them under the output directory.
//! Emitters share no mutable state and can run in any order, so output
//! determinism comes entirely from token insertion order.

pub mod assets;
pub mod color;
pub mod css;
pub mod kotlin;
pub mod swift;
pub mod theme;
pub mod typescript;

use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::TokenError;
use crate::tokens::{CategoryMap, TextStyle};

pub use color::Rgba;
pub use css::CssEmitter;
pub use kotlin::KotlinEmitter;
pub use swift::SwiftEmitter;
pub use typescript::TypeScriptEmitter;

/// Naming knobs shared by the platform emitters.
#[derive(Debug, Clone)]
pub struct EmitOptions {
    /// Type-name prefix for generated Swift/Kotlin code (e.g. "Dodada").
    pub prefix: String,
    /// Package line for generated Kotlin files.
    pub kotlin_package: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        EmitOptions {
            prefix: "Dodada".to_string(),
            kotlin_package: "com.dodada.tokens".to_string(),
        }
    }
}

/// One rendered output file, path relative to the output directory.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub contents: String,
}

impl GeneratedFile {
    pub fn new(path: impl Into<PathBuf>, contents: String) -> Self {
        GeneratedFile {
            path: path.into(),
            contents,
        }
    }
}

/// Trait for platform emitters.
///
/// Implementors render the full artifact set for one target platform.
pub trait Emitter: Send + Sync {
    /// The platform name (e.g. "swift", "css").
    fn name(&self) -> &str;

    /// Optional description of this platform target.
    fn description(&self) -> &str {
        ""
    }

    /// Render all files for this platform.
    fn emit(&self, categories: &CategoryMap, text_styles: &[TextStyle]) -> Vec<GeneratedFile>;
}

/// Registry of platform emitters, retrieved by name.
pub struct EmitterRegistry {
    emitters: HashMap<String, Box<dyn Emitter>>,
}

impl EmitterRegistry {
    pub fn new() -> Self {
        EmitterRegistry {
            emitters: HashMap::new(),
        }
    }

    /// Register an emitter, replacing any existing one with the same name.
    pub fn register<E: Emitter + 'static>(&mut self, emitter: E) {
        self.emitters
            .insert(emitter.name().to_string(), Box::new(emitter));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Emitter> {
        self.emitters.get(name).map(|e| e.as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.emitters.contains_key(name)
    }

    /// Emit for one platform by name.
    pub fn emit(
        &self,
        name: &str,
        categories: &CategoryMap,
        text_styles: &[TextStyle],
    ) -> Result<Vec<GeneratedFile>, TokenError> {
        let emitter = self
            .get(name)
            .ok_or_else(|| TokenError::UnknownPlatform(name.to_string()))?;
        Ok(emitter.emit(categories, text_styles))
    }

    /// List all platform names (sorted).
    pub fn list_platforms(&self) -> Vec<String> {
        let mut names: Vec<_> = self.emitters.keys().cloned().collect();
        names.sort();
        names
    }

    /// Registry with all built-in platforms.
    pub fn with_options(options: EmitOptions) -> Self {
        let mut registry = Self::new();
        registry.register(SwiftEmitter::new(options.clone()));
        registry.register(KotlinEmitter::new(options.clone()));
        registry.register(TypeScriptEmitter::new(options));
        registry.register(CssEmitter);
        registry
    }

    pub fn with_defaults() -> Self {
        Self::with_options(EmitOptions::default())
    }
}

impl Default for EmitterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

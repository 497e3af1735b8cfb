//! CSS custom-property emitter
//!
//! One variable per token: `--<category>-<path-with-dashes>: value;` inside a
//! single `:root` block. Dimensional tokens keep their declared unit suffix.

use super::{Emitter, GeneratedFile};
use crate::tokens::{CategoryMap, TextStyle};

pub struct CssEmitter;

impl Emitter for CssEmitter {
    fn name(&self) -> &str {
        "css"
    }

    fn description(&self) -> &str {
        "CSS custom properties (:root variables)"
    }

    fn emit(&self, categories: &CategoryMap, _text_styles: &[TextStyle]) -> Vec<GeneratedFile> {
        let mut lines = vec![
            "/* Do not edit directly. Generated from design tokens. */".to_string(),
            String::new(),
            ":root {".to_string(),
        ];
        for tokens in categories.values() {
            for token in tokens {
                let name = format!("--{}-{}", token.category, token.path.replace('.', "-"));
                lines.push(format!("  {name}: {};", token.value.display_string()));
            }
        }
        lines.push("}".to_string());
        lines.push(String::new());
        vec![GeneratedFile::new("css/variables.css", lines.join("\n"))]
    }
}

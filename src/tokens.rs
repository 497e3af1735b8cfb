//! Token resolution engine
//!
//! The core of the pipeline: merge source documents into one normalized tree,
//! resolve symbolic references, flatten into categorized tokens and composite
//! text styles, and materialize named themes. Everything here is pure and
//! synchronous; file I/O lives in [`crate::pipeline`].

pub mod collect;
pub mod merge;
pub mod resolve;
pub mod text_style;
pub mod theme;
pub mod tree;

pub use collect::{collect_all, group_by_category, identifier, safe_segment, CategoryMap, FlatToken};
pub use merge::{merge_sources, normalize};
pub use resolve::resolve_value;
pub use text_style::{collect_text_styles, FontSpec, TextStyle};
pub use theme::{collect_properties, materialize, ThemeProperty};
pub use tree::{Leaf, Node, Reference, TokenTree, TokenType, TokenValue};

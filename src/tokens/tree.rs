//! Normalized token tree model
//!
//! Source documents are free-form JSON where a leaf is recognized by the
//! presence of a `$value` field. Normalization decides the shape once: every
//! node becomes either a `Leaf` (canonical `{value, type, comment}`) or a
//! `Group` of named children, so downstream code pattern-matches instead of
//! probing for field presence.

use indexmap::IndexMap;
use serde_json::Value;

/// Reserved prefix for metadata keys in source documents ($schema, $value, ...)
pub const SIGIL: char = '$';

/// A token value reference of the form `{dot.separated.path}`.
///
/// Parsed once at normalization time; the original raw text is kept so an
/// unresolvable reference can be surfaced verbatim in generated output.
#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    pub segments: Vec<String>,
    raw: String,
}

impl Reference {
    /// Parse `{a.b.c}` into a structured reference. Anything else is `None`.
    pub fn parse(s: &str) -> Option<Reference> {
        let inner = s.strip_prefix('{')?.strip_suffix('}')?.trim();
        if inner.is_empty() {
            return None;
        }
        Some(Reference {
            segments: inner.split('.').map(|p| p.to_string()).collect(),
            raw: s.to_string(),
        })
    }

    /// The original `{...}` source text.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Dot-joined path without braces.
    pub fn path(&self) -> String {
        self.segments.join(".")
    }
}

/// A resolved or literal token value.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    Str(String),
    Num(f64),
    Bool(bool),
    Reference(Reference),
}

impl TokenValue {
    /// Convert a raw JSON scalar into a token value, recognizing references.
    pub fn from_json(value: &Value) -> TokenValue {
        match value {
            Value::String(s) => match Reference::parse(s) {
                Some(r) => TokenValue::Reference(r),
                None => TokenValue::Str(s.clone()),
            },
            Value::Number(n) => TokenValue::Num(n.as_f64().unwrap_or(0.0)),
            Value::Bool(b) => TokenValue::Bool(*b),
            other => TokenValue::Str(other.to_string()),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            TokenValue::Str(s) => Value::String(s.clone()),
            TokenValue::Num(n) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            TokenValue::Bool(b) => Value::Bool(*b),
            TokenValue::Reference(r) => Value::String(r.raw().to_string()),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TokenValue::Num(n) => Some(*n),
            TokenValue::Str(s) => s.parse().ok(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TokenValue::Str(s) => Some(s),
            TokenValue::Reference(r) => Some(r.raw()),
            _ => None,
        }
    }

    /// String form used when a value lands in generated output as-is.
    pub fn display_string(&self) -> String {
        match self {
            TokenValue::Str(s) => s.clone(),
            TokenValue::Num(n) => num_string(*n),
            TokenValue::Bool(b) => b.to_string(),
            TokenValue::Reference(r) => r.raw().to_string(),
        }
    }
}

/// Format a number the way it appears in token sources: no trailing `.0`.
pub fn num_string(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// Declared token type; undeclared defaults to `Str`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenType {
    Dimension,
    Number,
    Color,
    FontFamily,
    FontWeight,
    Str,
    Asset,
    Other(String),
}

impl TokenType {
    pub fn from_name(name: &str) -> TokenType {
        match name {
            "dimension" => TokenType::Dimension,
            "number" => TokenType::Number,
            "color" => TokenType::Color,
            "fontFamily" => TokenType::FontFamily,
            "fontWeight" => TokenType::FontWeight,
            "string" => TokenType::Str,
            "asset" => TokenType::Asset,
            other => TokenType::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            TokenType::Dimension => "dimension",
            TokenType::Number => "number",
            TokenType::Color => "color",
            TokenType::FontFamily => "fontFamily",
            TokenType::FontWeight => "fontWeight",
            TokenType::Str => "string",
            TokenType::Asset => "asset",
            TokenType::Other(s) => s,
        }
    }

    /// Numeric axes share one accessor shape in every emitter.
    pub fn is_numeric(&self) -> bool {
        matches!(self, TokenType::Dimension | TokenType::Number)
    }
}

/// Canonical leaf shape after normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    pub value: TokenValue,
    pub ty: TokenType,
    pub comment: Option<String>,
}

/// One node of the normalized tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Leaf(Leaf),
    Group(IndexMap<String, Node>),
}

impl Node {
    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            Node::Leaf(leaf) => Some(leaf),
            Node::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&IndexMap<String, Node>> {
        match self {
            Node::Group(children) => Some(children),
            Node::Leaf(_) => None,
        }
    }

    /// Serialize back to the canonical `{value, type, comment}` JSON shape.
    pub fn to_json(&self) -> Value {
        match self {
            Node::Leaf(leaf) => {
                let mut map = serde_json::Map::new();
                map.insert("value".into(), leaf.value.to_json());
                if leaf.ty != TokenType::Str {
                    map.insert("type".into(), Value::String(leaf.ty.name().to_string()));
                }
                if let Some(comment) = &leaf.comment {
                    map.insert("comment".into(), Value::String(comment.clone()));
                }
                Value::Object(map)
            }
            Node::Group(children) => {
                let mut map = serde_json::Map::new();
                for (key, child) in children {
                    map.insert(key.clone(), child.to_json());
                }
                Value::Object(map)
            }
        }
    }
}

/// The whole normalized tree; reference paths resolve from its root.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TokenTree {
    pub root: IndexMap<String, Node>,
}

impl TokenTree {
    /// Walk a dot path from the root. `None` if any segment is missing or
    /// descends through a leaf.
    pub fn lookup(&self, segments: &[String]) -> Option<&Node> {
        let (first, rest) = segments.split_first()?;
        let mut current = self.root.get(first)?;
        for segment in rest {
            current = current.as_group()?.get(segment)?;
        }
        Some(current)
    }

    pub fn to_json(&self) -> Value {
        let mut map = serde_json::Map::new();
        for (key, node) in &self.root {
            map.insert(key.clone(), node.to_json());
        }
        Value::Object(map)
    }
}

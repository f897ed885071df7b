//! Parse tree and plain value types.

use indexmap::IndexMap;

/// Byte range `[start, end)` within the parsed source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// The source text covered by this span.
    pub fn slice<'a>(&self, src: &'a str) -> &'a str {
        &src[self.start..self.end]
    }
}

/// A parsed value together with its location in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
}

/// Shape of a parsed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    String(String),
    Array(Vec<Node>),
    /// Dictionary entries in source order.
    Dict(Vec<DictEntry>),
}

/// One `key = value;` entry of a dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictEntry {
    pub key: String,
    pub value: Node,
    /// From the first byte of the key through the terminating `;`.
    pub span: Span,
}

impl Node {
    pub fn as_str(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Node]> {
        match &self.kind {
            NodeKind::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&[DictEntry]> {
        match &self.kind {
            NodeKind::Dict(entries) => Some(entries),
            _ => None,
        }
    }

    /// Look up a dictionary entry by key. Returns `None` for non-dictionaries.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_dict()?
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| &entry.value)
    }

    /// Shorthand for `get(key)` followed by `as_str()`.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Node::as_str)
    }

    /// Drop location information.
    pub fn to_value(&self) -> Value {
        match &self.kind {
            NodeKind::String(s) => Value::String(s.clone()),
            NodeKind::Array(items) => Value::Array(items.iter().map(Node::to_value).collect()),
            NodeKind::Dict(entries) => Value::Dict(
                entries
                    .iter()
                    .map(|entry| (entry.key.clone(), entry.value.to_value()))
                    .collect(),
            ),
        }
    }
}

/// A property-list value without source locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    String(String),
    Array(Vec<Value>),
    Dict(IndexMap<String, Value>),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// True when this is the string `needle`, or an array containing it.
    pub fn contains_str(&self, needle: &str) -> bool {
        match self {
            Value::String(s) => s == needle,
            Value::Array(items) => items.iter().any(|item| item.as_str() == Some(needle)),
            Value::Dict(_) => false,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

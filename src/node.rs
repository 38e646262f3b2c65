//! Generic document tree: the schema-independent shape of a parsed config file.
//!
//! A [`Node`] is one of three things: a [`Scalar`], an ordered sequence of
//! nodes, or a [`Mapping`] of string keys to nodes. Mappings keep their keys
//! unique and remember insertion order, which is the order they are emitted
//! in. Scalars keep the TOML type they were parsed with so that a document
//! which is parsed and emitted again comes back with the same types.

use std::fmt;

use indexmap::IndexMap;
use toml::value::Datetime;
use toml::{Table, Value};

/// A node in the generic document tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Scalar(Scalar),
    Sequence(Vec<Node>),
    Mapping(Mapping),
}

/// A leaf value, tagged with its TOML type.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Datetime(Datetime),
}

impl Scalar {
    /// The scalar's text as it would be read by a human: strings unquoted,
    /// numbers and booleans in TOML notation.
    pub fn text(&self) -> String {
        match self {
            Scalar::String(s) => s.clone(),
            Scalar::Integer(i) => i.to_string(),
            Scalar::Float(f) => Value::Float(*f).to_string(),
            Scalar::Boolean(b) => b.to_string(),
            Scalar::Datetime(dt) => dt.to_string(),
        }
    }

    /// Infer a typed scalar from raw user input.
    ///
    /// Tries `true`/`false` (exact, lowercase), then integer, then float
    /// (only when the input contains a dot, so `nan` and `inf` stay strings),
    /// and falls back to a string.
    pub fn infer(raw: &str) -> Scalar {
        match raw {
            "true" => return Scalar::Boolean(true),
            "false" => return Scalar::Boolean(false),
            _ => {}
        }
        if let Ok(i) = raw.parse::<i64>() {
            return Scalar::Integer(i);
        }
        if raw.contains('.')
            && let Ok(f) = raw.parse::<f64>()
        {
            return Scalar::Float(f);
        }
        Scalar::String(raw.to_string())
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

impl Node {
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Node::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Node]> {
        match self {
            Node::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Node::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_mapping_mut(&mut self) -> Option<&mut Mapping> {
        match self {
            Node::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, Node::Mapping(_))
    }

    /// The mapping held by this node. Any other value is replaced by an
    /// empty mapping first.
    pub fn make_mapping(&mut self) -> &mut Mapping {
        match self {
            Node::Mapping(m) => m,
            other => {
                *other = Node::Mapping(Mapping::new());
                other.make_mapping()
            }
        }
    }

    /// Unwrap a mapping root. Any other shape degrades to an empty mapping.
    pub fn into_mapping(self) -> Mapping {
        match self {
            Node::Mapping(m) => m,
            _ => Mapping::new(),
        }
    }

    /// Render the node for display: scalars as their text, composites as
    /// inline TOML.
    pub fn display(&self) -> String {
        match self {
            Node::Scalar(s) => s.text(),
            other => Value::from(other.clone()).to_string(),
        }
    }
}

/// An ordered mapping with unique string keys.
///
/// Overwriting a key keeps its position; new keys are appended; removing a
/// key keeps the relative order of the rest. Equality is order-sensitive.
#[derive(Debug, Clone, Default)]
pub struct Mapping {
    entries: IndexMap<String, Node>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.entries.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Insert or overwrite `key`, returning the previous node if any.
    pub fn insert(&mut self, key: impl Into<String>, node: impl Into<Node>) -> Option<Node> {
        self.entries.insert(key.into(), node.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Node> {
        self.entries.shift_remove(key)
    }

    /// The child mapping at `key`, created if missing. A non-mapping value
    /// already at `key` is replaced by an empty mapping.
    pub fn child_mapping(&mut self, key: &str) -> &mut Mapping {
        let slot = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| Node::Mapping(Mapping::new()));
        slot.make_mapping()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl PartialEq for Mapping {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len() && self.entries.iter().eq(other.entries.iter())
    }
}

impl<K: Into<String>, V: Into<Node>> FromIterator<(K, V)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Mapping::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl IntoIterator for Mapping {
    type Item = (String, Node);
    type IntoIter = indexmap::map::IntoIter<String, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

// --- toml interop ---

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => Node::Scalar(Scalar::String(s)),
            Value::Integer(i) => Node::Scalar(Scalar::Integer(i)),
            Value::Float(f) => Node::Scalar(Scalar::Float(f)),
            Value::Boolean(b) => Node::Scalar(Scalar::Boolean(b)),
            Value::Datetime(dt) => Node::Scalar(Scalar::Datetime(dt)),
            Value::Array(items) => Node::Sequence(items.into_iter().map(Node::from).collect()),
            Value::Table(table) => Node::Mapping(Mapping::from(table)),
        }
    }
}

impl From<Table> for Mapping {
    fn from(table: Table) -> Self {
        table.into_iter().collect()
    }
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::String(s) => Value::String(s),
            Scalar::Integer(i) => Value::Integer(i),
            Scalar::Float(f) => Value::Float(f),
            Scalar::Boolean(b) => Value::Boolean(b),
            Scalar::Datetime(dt) => Value::Datetime(dt),
        }
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        match node {
            Node::Scalar(s) => Value::from(s),
            Node::Sequence(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            Node::Mapping(m) => Value::Table(Table::from(m)),
        }
    }
}

impl From<Mapping> for Table {
    fn from(map: Mapping) -> Self {
        map.into_iter().map(|(k, v)| (k, Value::from(v))).collect()
    }
}

// --- convenience conversions for building nodes in transformers ---

impl From<Scalar> for Node {
    fn from(scalar: Scalar) -> Self {
        Node::Scalar(scalar)
    }
}

impl From<Mapping> for Node {
    fn from(map: Mapping) -> Self {
        Node::Mapping(map)
    }
}

impl From<Vec<Node>> for Node {
    fn from(items: Vec<Node>) -> Self {
        Node::Sequence(items)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::Scalar(Scalar::String(s.to_string()))
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::Scalar(Scalar::String(s))
    }
}

impl From<i64> for Node {
    fn from(i: i64) -> Self {
        Node::Scalar(Scalar::Integer(i))
    }
}

impl From<i32> for Node {
    fn from(i: i32) -> Self {
        Node::Scalar(Scalar::Integer(i64::from(i)))
    }
}

impl From<f64> for Node {
    fn from(f: f64) -> Self {
        Node::Scalar(Scalar::Float(f))
    }
}

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        Node::Scalar(Scalar::Boolean(b))
    }
}

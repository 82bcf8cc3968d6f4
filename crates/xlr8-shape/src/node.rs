//! Owned tree type for callers that do not already have one.

use std::collections::BTreeMap;

use crate::nested::{Nested, View};

/// Leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

/// Unordered collection with duplicates collapsed on insertion.
///
/// Equality is structural, so two distinct `NaN` floats are both kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeSet(Vec<Node>);

impl NodeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `node` unless an equal node is already present.
    pub fn insert(&mut self, node: Node) -> bool {
        if self.0.contains(&node) {
            return false;
        }
        self.0.push(node);
        true
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.0.iter()
    }
}

impl FromIterator<Node> for NodeSet {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        let mut set = NodeSet::new();
        for node in iter {
            set.insert(node);
        }
        set
    }
}

/// A nested value: mapping, sequence, set or scalar.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Mapping(BTreeMap<String, Node>),
    Sequence(Vec<Node>),
    Set(NodeSet),
    Scalar(Scalar),
}

impl Node {
    pub fn null() -> Self {
        Node::Scalar(Scalar::Null)
    }

    pub fn mapping<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Node)>,
    {
        Node::Mapping(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn sequence<I: IntoIterator<Item = Node>>(items: I) -> Self {
        Node::Sequence(items.into_iter().collect())
    }

    pub fn set<I: IntoIterator<Item = Node>>(items: I) -> Self {
        Node::Set(items.into_iter().collect())
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Node::Scalar(_))
    }
}

impl Nested for Node {
    fn view(&self) -> View<'_> {
        match self {
            Node::Mapping(map) => View::Mapping(map.values().map(|v| v as &dyn Nested).collect()),
            Node::Sequence(items) => {
                View::Collection(items.iter().map(|v| v as &dyn Nested).collect())
            }
            Node::Set(set) => View::Collection(set.iter().map(|v| v as &dyn Nested).collect()),
            Node::Scalar(_) => View::Scalar,
        }
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Node::Scalar(Scalar::Bool(value))
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Node::Scalar(Scalar::Int(value))
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Node::Scalar(Scalar::Float(value))
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::Scalar(Scalar::Str(value.to_string()))
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::Scalar(Scalar::Str(value))
    }
}

impl<T: Into<Node>> From<Option<T>> for Node {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_else(Node::null)
    }
}

impl From<serde_json::Value> for Node {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Node::null(),
            serde_json::Value::Bool(b) => b.into(),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => i.into(),
                None => n.as_f64().unwrap_or(f64::NAN).into(),
            },
            serde_json::Value::String(s) => s.into(),
            serde_json::Value::Array(items) => Node::sequence(items.into_iter().map(Node::from)),
            serde_json::Value::Object(map) => Node::Mapping(
                map.into_iter()
                    .map(|(k, v)| (k, Node::from(v)))
                    .collect(),
            ),
        }
    }
}

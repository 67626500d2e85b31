//! Classification of document values into categories and leaf records.

use std::collections::BTreeSet;

use serde_json::{Map, Value};

/// Default sentinel: question records sit at the bottom of the PYQ and
/// interview-question trees.
pub const DEFAULT_SENTINEL_FIELD: &str = "question";

/// Decides which objects are leaf records rather than categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafRule {
    sentinel_fields: BTreeSet<String>,
}

impl LeafRule {
    pub fn new<I, S>(sentinel_fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sentinel_fields: sentinel_fields.into_iter().map(Into::into).collect(),
        }
    }

    pub fn sentinel_fields(&self) -> impl Iterator<Item = &str> {
        self.sentinel_fields.iter().map(String::as_str)
    }

    /// An object holding any sentinel field is leaf data.
    pub fn is_leaf(&self, object: &Map<String, Value>) -> bool {
        self.sentinel_fields.iter().any(|f| object.contains_key(f))
    }
}

impl Default for LeafRule {
    fn default() -> Self {
        Self::new([DEFAULT_SENTINEL_FIELD])
    }
}

/// A document value, tagged by its role in the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DocumentNode<'a> {
    /// A further category level (including an empty one).
    Category(&'a Map<String, Value>),
    /// A content record.
    Leaf(&'a Map<String, Value>),
    /// Anything that is not an object: counters, flags, stray strings.
    Scalar(&'a Value),
}

/// Classify one value.
///
/// A sentinel field wins over shape: an object that holds a sentinel is a
/// leaf even when some of its other fields are objects.
pub fn classify<'a>(value: &'a Value, rule: &LeafRule) -> DocumentNode<'a> {
    match value {
        Value::Object(map) if rule.is_leaf(map) => DocumentNode::Leaf(map),
        Value::Object(map) => DocumentNode::Category(map),
        other => DocumentNode::Scalar(other),
    }
}

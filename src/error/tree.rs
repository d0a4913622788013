//! Nested error trees produced by shape matching.
//!
//! This module provides [`ErrorTree`] and [`ErrorNode`] for the recursive
//! error structure that mirrors the input's shape, and [`MatchError`] for the
//! single fatal precondition a check can hit.

use std::fmt::{self, Display};

use indexmap::IndexMap;
use serde_json::Value;
use thiserror::Error;

use crate::path::FieldPath;

/// The fatal conditions of a shape check.
///
/// Per-field problems are never errors in this sense; they are accumulated
/// into an [`ErrorTree`] and the check always completes. Only a missing
/// top-level input aborts the whole call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    /// The top-level input was null. Callers must supply a defined value
    /// (even `{}`) before checking.
    #[error("input must be a defined value")]
    MissingInput,
}

/// A single entry in an [`ErrorTree`]: either a flat list of messages for
/// one field, or a subtree for a nested object or array.
///
/// The two-variant split is the wire contract: an array-wrapper field whose
/// input is not an array reports `["array expected"]` (messages), while an
/// array with invalid elements reports `{"1": [...]}` (a subtree keyed by
/// stringified index).
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorNode {
    /// Human-readable messages for a single field.
    Messages(Vec<String>),
    /// Errors for a nested object or for array elements, keyed by field
    /// name or stringified index.
    Nested(ErrorTree),
}

impl ErrorNode {
    /// Creates a `Messages` node from anything iterable as strings.
    pub fn messages<I, S>(msgs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ErrorNode::Messages(msgs.into_iter().map(Into::into).collect())
    }

    /// Renders this node as a `serde_json::Value`.
    pub fn to_value(&self) -> Value {
        match self {
            ErrorNode::Messages(msgs) => {
                Value::Array(msgs.iter().map(|m| Value::String(m.clone())).collect())
            }
            ErrorNode::Nested(tree) => tree.to_value(),
        }
    }
}

impl From<Vec<String>> for ErrorNode {
    fn from(msgs: Vec<String>) -> Self {
        ErrorNode::Messages(msgs)
    }
}

impl From<ErrorTree> for ErrorNode {
    fn from(tree: ErrorTree) -> Self {
        ErrorNode::Nested(tree)
    }
}

/// A recursive error structure mirroring the input's shape.
///
/// `ErrorTree` maps field names (or stringified array indices) to either a
/// flat list of messages or a further tree. An empty tree signals that the
/// input satisfied its shape.
///
/// Entries preserve insertion order for deterministic rendering; equality is
/// order-insensitive.
///
/// # Example
///
/// ```rust
/// use shapecheck::{check_shape, LeafRule, Shape};
/// use serde_json::json;
///
/// let shape = Shape::new().field("email", LeafRule::new());
/// let mut input = json!({});
///
/// let errors = check_shape(&mut input, &shape).unwrap();
/// assert_eq!(errors.to_value(), json!({"email": ["This field is required"]}));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ErrorTree {
    entries: IndexMap<String, ErrorNode>,
}

impl ErrorTree {
    /// Creates an empty error tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no errors were recorded. An empty tree means the
    /// input passed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of top-level entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Records an entry under the given key, replacing any existing entry.
    pub fn insert(&mut self, key: impl Into<String>, node: impl Into<ErrorNode>) {
        self.entries.insert(key.into(), node.into());
    }

    /// Returns the entry for a key, if any.
    pub fn get(&self, key: &str) -> Option<&ErrorNode> {
        self.entries.get(key)
    }

    /// Returns true if an entry exists for the key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns an iterator over `(key, node)` entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ErrorNode)> {
        self.entries.iter()
    }

    /// Renders the tree as a `serde_json::Value`.
    ///
    /// This is the wire shape callers serialize directly as an error
    /// payload: a JSON object mapping each field name or index to a string
    /// array or a nested object.
    pub fn to_value(&self) -> Value {
        Value::Object(
            self.entries
                .iter()
                .map(|(k, node)| (k.clone(), node.to_value()))
                .collect(),
        )
    }

    /// Flattens the tree into `(path, message)` pairs, depth-first in entry
    /// order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use shapecheck::{check_shape, LeafRule, Shape};
    /// use serde_json::json;
    ///
    /// let shape = Shape::new()
    ///     .field("profile", Shape::new().field("lastName", LeafRule::new()));
    /// let mut input = json!({"profile": {}});
    ///
    /// let errors = check_shape(&mut input, &shape).unwrap();
    /// let flat = errors.flatten();
    /// assert_eq!(flat[0].0.to_string(), "profile.lastName");
    /// assert_eq!(flat[0].1, "This field is required");
    /// ```
    pub fn flatten(&self) -> Vec<(FieldPath, String)> {
        let mut out = Vec::new();
        self.flatten_into(&FieldPath::root(), &mut out);
        out
    }

    fn flatten_into(&self, base: &FieldPath, out: &mut Vec<(FieldPath, String)>) {
        for (key, node) in &self.entries {
            let path = base.push_key(key);
            match node {
                ErrorNode::Messages(msgs) => {
                    for msg in msgs {
                        out.push((path.clone(), msg.clone()));
                    }
                }
                ErrorNode::Nested(tree) => tree.flatten_into(&path, out),
            }
        }
    }
}

impl Display for ErrorTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "input matches shape");
        }
        let flat = self.flatten();
        writeln!(f, "input does not match shape ({} problem(s)):", flat.len())?;
        for (path, message) in flat {
            writeln!(f, "  {}: {}", path, message)?;
        }
        Ok(())
    }
}

impl From<ErrorTree> for Value {
    fn from(tree: ErrorTree) -> Self {
        tree.to_value()
    }
}

impl<'a> IntoIterator for &'a ErrorTree {
    type Item = (&'a String, &'a ErrorNode);
    type IntoIter = indexmap::map::Iter<'a, String, ErrorNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// ErrorTree travels across threads in server handlers, so keep it Send + Sync.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ErrorTree>();
    assert_sync::<ErrorTree>();
};

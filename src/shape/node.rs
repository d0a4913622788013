//! Shape nodes and structural classification.
//!
//! This module provides the [`ShapeNode`] tagged union the matcher walks,
//! and [`classify`], the one place the untagged declaration syntax is
//! resolved into a [`NodeKind`].

use serde_json::{Map, Value};

use super::leaf::LeafRule;
use super::Shape;

/// Attribute names reserved for leaf rules in the declaration syntax.
///
/// A declaration node all of whose keys appear here is a leaf rule; any
/// other key makes it a nested shape. A real field literally named
/// `optional` or `type` is therefore ambiguous in the declaration syntax —
/// a known property of the format, kept rather than papered over. The
/// builder API sidesteps it entirely by constructing tagged nodes.
pub const RESERVED_ATTRIBUTES: [&str; 8] = [
    "optional",
    "type",
    "extraCheck",
    "errorLabel",
    "defaultValue",
    "$object",
    "$array",
    "allowEmptyString",
];

/// The four kinds of shape node the classifier can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A single field's rule (type, optionality, predicate, default).
    Leaf,
    /// A `$object` wrapper: leaf attributes plus a nested shape the field's
    /// object value must match.
    ObjectWrapper,
    /// A `$array` wrapper: leaf attributes plus a node every element must
    /// match.
    ArrayWrapper,
    /// A plain sub-object with its own declared fields.
    Nested,
}

/// Classifies a declaration node by inspecting its keys.
///
/// Precedence: a `$array` key wins, then `$object`, then all-reserved keys
/// mean a leaf rule, and anything else is a nested shape. An empty node is a
/// leaf (the common `field: {}` declaration for a required string).
///
/// Pure and total: malformed nodes are accepted permissively and classified
/// by whichever kind their keys best match. Classification runs once, when
/// a declaration is parsed, never during matching.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use shapecheck::{classify, NodeKind};
///
/// let node = json!({"$array": {"type": "boolean"}});
/// assert_eq!(classify(node.as_object().unwrap()), NodeKind::ArrayWrapper);
///
/// let node = json!({"firstName": {}, "lastName": {}});
/// assert_eq!(classify(node.as_object().unwrap()), NodeKind::Nested);
/// ```
pub fn classify(node: &Map<String, Value>) -> NodeKind {
    if node.contains_key("$array") {
        NodeKind::ArrayWrapper
    } else if node.contains_key("$object") {
        NodeKind::ObjectWrapper
    } else if node.keys().all(|k| RESERVED_ATTRIBUTES.contains(&k.as_str())) {
        NodeKind::Leaf
    } else {
        NodeKind::Nested
    }
}

/// A node in a shape: the validation rule for one declared field.
///
/// The declaration syntax distinguishes these kinds structurally (see
/// [`classify`]); in code the distinction is explicit, so the matcher never
/// re-inspects keys.
#[derive(Debug, Clone)]
pub enum ShapeNode {
    /// A single field checked by a [`LeafRule`].
    Leaf(LeafRule),
    /// A field whose value must be an object matching `shape`. The rule
    /// controls presence; its declared type is ignored in favor of
    /// `object`.
    Object {
        /// Presence and predicate handling for the wrapper field itself.
        rule: LeafRule,
        /// The shape the field's object value must match.
        shape: Shape,
    },
    /// A field whose value must be an array, each element matching `items`.
    Array {
        /// Presence handling for the wrapper field itself.
        rule: LeafRule,
        /// The node every element is checked against.
        items: Box<ShapeNode>,
    },
    /// A plain sub-object with its own declared fields.
    Nested(Shape),
}

impl ShapeNode {
    /// Creates an object-wrapper node.
    pub fn object(rule: LeafRule, shape: Shape) -> Self {
        ShapeNode::Object { rule, shape }
    }

    /// Creates an array-wrapper node.
    pub fn array(rule: LeafRule, items: impl Into<ShapeNode>) -> Self {
        ShapeNode::Array {
            rule,
            items: Box::new(items.into()),
        }
    }

    /// Returns the kind of this node.
    pub fn kind(&self) -> NodeKind {
        match self {
            ShapeNode::Leaf(_) => NodeKind::Leaf,
            ShapeNode::Object { .. } => NodeKind::ObjectWrapper,
            ShapeNode::Array { .. } => NodeKind::ArrayWrapper,
            ShapeNode::Nested(_) => NodeKind::Nested,
        }
    }
}

impl From<LeafRule> for ShapeNode {
    fn from(rule: LeafRule) -> Self {
        ShapeNode::Leaf(rule)
    }
}

impl From<Shape> for ShapeNode {
    fn from(shape: Shape) -> Self {
        ShapeNode::Nested(shape)
    }
}

//! Shape definitions.
//!
//! A [`Shape`] describes the expected structure of a JSON-like value as a
//! mapping from field name to [`ShapeNode`]. Shapes are built either through
//! the builder API or parsed from a JSON declaration document
//! ([`Shape::from_value`]); either way the matcher receives fully tagged
//! nodes and never re-classifies during descent.
//!
//! # Example
//!
//! ```rust
//! use shapecheck::{check_shape, FieldType, LeafRule, Shape, ShapeNode};
//! use serde_json::json;
//!
//! let shape = Shape::new()
//!     .field("email", LeafRule::new())
//!     .field("profile", Shape::new().field("firstName", LeafRule::new()))
//!     .field(
//!         "titles",
//!         ShapeNode::array(LeafRule::new(), LeafRule::new().typed(FieldType::Boolean)),
//!     );
//!
//! let mut input = json!({"email": "john@doe.com", "profile": {"firstName": "John"}, "titles": []});
//! let errors = check_shape(&mut input, &shape).unwrap();
//! assert!(errors.is_empty());
//! ```

mod decl;
mod leaf;
mod node;

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{ErrorTree, MatchError};

pub use decl::ShapeDeclError;
pub use leaf::{ExtraCheck, FieldType, LeafRule, REQUIRED_MESSAGE};
pub use node::{classify, NodeKind, ShapeNode, RESERVED_ATTRIBUTES};

/// A declarative description of the expected structure of a value.
///
/// A shape maps field names to [`ShapeNode`]s in declaration order. It is
/// the unit of recursion: nested shapes, `$object` wrappers, and `$array`
/// wrappers all carry further shapes or nodes.
#[derive(Debug, Clone, Default)]
pub struct Shape {
    fields: IndexMap<String, ShapeNode>,
}

impl Shape {
    /// Creates an empty shape.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field, replacing any existing declaration for the name.
    ///
    /// Accepts anything convertible into a [`ShapeNode`]: a [`LeafRule`], a
    /// nested [`Shape`], or an explicit node.
    pub fn field(mut self, name: impl Into<String>, node: impl Into<ShapeNode>) -> Self {
        self.fields.insert(name.into(), node.into());
        self
    }

    /// Parses a JSON shape declaration.
    ///
    /// The declaration uses the reserved-attribute syntax: a node with only
    /// reserved keys (`optional`, `type`, `errorLabel`, `defaultValue`,
    /// `allowEmptyString`) is a leaf rule, `$object`/`$array` mark wrappers,
    /// and anything else is a nested shape. Classification happens here,
    /// once; see [`classify`] for the rules and the documented ambiguity.
    ///
    /// # Example
    ///
    /// ```rust
    /// use shapecheck::Shape;
    /// use serde_json::json;
    ///
    /// let shape = Shape::from_value(&json!({
    ///     "email": {},
    ///     "id": {"type": "number"},
    ///     "titles": {"$array": {"type": "boolean"}}
    /// })).unwrap();
    ///
    /// assert_eq!(shape.len(), 3);
    /// ```
    pub fn from_value(decl: &Value) -> Result<Self, ShapeDeclError> {
        decl::parse_shape(decl)
    }

    /// Checks an input value against this shape, reporting stripped keys.
    ///
    /// Equivalent to [`check_shape`](crate::check_shape); see the matcher
    /// documentation for the full contract, including the in-place
    /// sanitization of `input`.
    pub fn check(&self, input: &mut Value) -> Result<ErrorTree, MatchError> {
        crate::matcher::check_shape(input, self)
    }

    /// Checks an input value, controlling whether stripped keys are
    /// reported. Undeclared keys are removed either way.
    pub fn check_with(
        &self,
        input: &mut Value,
        report_extra_keys: bool,
    ) -> Result<ErrorTree, MatchError> {
        crate::matcher::check_shape_with(input, self, report_extra_keys)
    }

    /// Returns the node declared for a field, if any.
    pub fn get(&self, name: &str) -> Option<&ShapeNode> {
        self.fields.get(name)
    }

    /// Returns true if the field is declared.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Returns the number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no fields are declared.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns an iterator over `(name, node)` in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&String, &ShapeNode)> {
        self.fields.iter()
    }
}

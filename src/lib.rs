//! # Shapecheck
//!
//! A recursive structural validator for loosely-typed (JSON-like) data.
//! Given a declarative [`Shape`] and an input value, [`check_shape`] walks
//! both in lockstep and returns an [`ErrorTree`] describing every violation,
//! while sanitizing the input in place: undeclared keys are stripped and
//! declared defaults are injected. It is meant for the boundary of a
//! request-handling layer, rejecting malformed payloads before business
//! logic runs.
//!
//! ## Overview
//!
//! A shape is a mapping from field name to one of four node kinds:
//!
//! - a **leaf rule** ([`LeafRule`]): presence, primitive type, custom
//!   predicate, default value;
//! - a **nested shape** ([`Shape`]): a plain sub-object with its own fields;
//! - an **object wrapper** ([`ShapeNode::Object`]): leaf attributes plus a
//!   shape the field's object value must match;
//! - an **array wrapper** ([`ShapeNode::Array`]): leaf attributes plus a
//!   node every element must match.
//!
//! The error tree mirrors the input: field names (or stringified array
//! indices) map to flat message lists or further trees. An empty tree means
//! acceptance. Every violation is collected in a single pass; nothing about
//! the input short-circuits the walk.
//!
//! ## Example
//!
//! ```rust
//! use shapecheck::{check_shape, checks, FieldType, LeafRule, Shape};
//! use serde_json::json;
//!
//! let shape = Shape::new()
//!     .field("email", LeafRule::new().check(checks::email()))
//!     .field("profile", Shape::new()
//!         .field("firstName", LeafRule::new())
//!         .field("lastName", LeafRule::new()));
//!
//! let mut input = json!({
//!     "email": "john@doe.com",
//!     "profile": {"firstName": "John"},
//!     "debug": true
//! });
//!
//! let errors = check_shape(&mut input, &shape).unwrap();
//! assert_eq!(errors.to_value(), json!({
//!     "debug": ["this key cannot be included"],
//!     "profile": {"lastName": ["This field is required"]}
//! }));
//! // The undeclared key was stripped regardless of reporting.
//! assert!(input.get("debug").is_none());
//! ```
//!
//! ## Declarations as data
//!
//! Shapes can also be parsed from a JSON document in the reserved-attribute
//! syntax via [`Shape::from_value`]; classification of each node happens
//! once, at parse time. Custom predicates are code and attach through
//! [`LeafRule::check`].

pub mod checks;
pub mod error;
pub mod matcher;
pub mod path;
pub mod shape;

pub use error::{ErrorNode, ErrorTree, MatchError};
pub use matcher::{check_shape, check_shape_with, is_shape, is_shape_with, Responder};
pub use path::{FieldPath, PathSegment};
pub use shape::{
    classify, ExtraCheck, FieldType, LeafRule, NodeKind, Shape, ShapeDeclError, ShapeNode,
    RESERVED_ATTRIBUTES,
};

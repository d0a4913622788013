//! Parsing of JSON shape declarations.
//!
//! Shapes can be declared as JSON documents using the reserved-attribute
//! syntax (`optional`, `type`, `$object`, `$array`, ...). This module turns
//! such a document into a tagged [`Shape`], classifying every node exactly
//! once via [`classify`]. `extraCheck` predicates are code, not data, and
//! must be attached through the builder API instead.

use serde_json::{Map, Value};
use thiserror::Error;

use super::leaf::{FieldType, LeafRule};
use super::node::{classify, NodeKind, ShapeNode};
use super::Shape;

/// Errors raised while parsing a JSON shape declaration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeDeclError {
    /// The top-level declaration was not a JSON object.
    #[error("shape declaration must be an object")]
    NotAnObject,
    /// A field's declaration node was not a JSON object.
    #[error("field '{field}': declaration must be an object")]
    FieldNotAnObject {
        /// The offending field.
        field: String,
    },
    /// A reserved attribute carried a value of the wrong type.
    #[error("field '{field}': attribute '{attr}' must be {expected}")]
    InvalidAttribute {
        /// The offending field.
        field: String,
        /// The reserved attribute name.
        attr: &'static str,
        /// What the attribute's value must be.
        expected: &'static str,
    },
    /// The `type` attribute named an unknown primitive type.
    #[error("field '{field}': unknown field type '{name}'")]
    UnknownFieldType {
        /// The offending field.
        field: String,
        /// The unrecognized type name.
        name: String,
    },
    /// `extraCheck` appeared in a JSON declaration.
    #[error("field '{field}': 'extraCheck' cannot be declared in a JSON shape; attach it with LeafRule::check")]
    UnsupportedExtraCheck {
        /// The offending field.
        field: String,
    },
}

/// Parses a JSON shape declaration into a tagged [`Shape`].
pub fn parse_shape(decl: &Value) -> Result<Shape, ShapeDeclError> {
    let map = decl.as_object().ok_or(ShapeDeclError::NotAnObject)?;
    parse_fields(map)
}

fn parse_fields(map: &Map<String, Value>) -> Result<Shape, ShapeDeclError> {
    let mut shape = Shape::new();
    for (name, node) in map {
        let node_map = node
            .as_object()
            .ok_or_else(|| ShapeDeclError::FieldNotAnObject {
                field: name.clone(),
            })?;
        shape = shape.field(name, parse_node(name, node_map)?);
    }
    Ok(shape)
}

fn parse_node(field: &str, map: &Map<String, Value>) -> Result<ShapeNode, ShapeDeclError> {
    match classify(map) {
        NodeKind::ArrayWrapper => {
            let rule = parse_rule(field, map)?;
            let items = attr_object(field, map, "$array")?;
            Ok(ShapeNode::Array {
                rule,
                items: Box::new(parse_node(field, items)?),
            })
        }
        NodeKind::ObjectWrapper => {
            let rule = parse_rule(field, map)?;
            let nested = attr_object(field, map, "$object")?;
            Ok(ShapeNode::Object {
                rule,
                shape: parse_fields(nested)?,
            })
        }
        NodeKind::Leaf => Ok(ShapeNode::Leaf(parse_rule(field, map)?)),
        NodeKind::Nested => Ok(ShapeNode::Nested(parse_fields(map)?)),
    }
}

fn attr_object<'a>(
    field: &str,
    map: &'a Map<String, Value>,
    attr: &'static str,
) -> Result<&'a Map<String, Value>, ShapeDeclError> {
    map.get(attr)
        .and_then(Value::as_object)
        .ok_or_else(|| ShapeDeclError::InvalidAttribute {
            field: field.to_string(),
            attr,
            expected: "an object",
        })
}

fn parse_rule(field: &str, map: &Map<String, Value>) -> Result<LeafRule, ShapeDeclError> {
    let mut rule = LeafRule::new();

    if let Some(value) = map.get("optional") {
        if attr_bool(field, value, "optional")? {
            rule = rule.optional();
        }
    }
    if let Some(value) = map.get("type") {
        let name = value.as_str().ok_or_else(|| ShapeDeclError::InvalidAttribute {
            field: field.to_string(),
            attr: "type",
            expected: "a type name string",
        })?;
        let field_type =
            FieldType::from_name(name).ok_or_else(|| ShapeDeclError::UnknownFieldType {
                field: field.to_string(),
                name: name.to_string(),
            })?;
        rule = rule.typed(field_type);
    }
    if let Some(value) = map.get("errorLabel") {
        let label = value.as_str().ok_or_else(|| ShapeDeclError::InvalidAttribute {
            field: field.to_string(),
            attr: "errorLabel",
            expected: "a string",
        })?;
        rule = rule.error_label(label);
    }
    if let Some(value) = map.get("defaultValue") {
        rule = rule.default_value(value.clone());
    }
    if let Some(value) = map.get("allowEmptyString") {
        if attr_bool(field, value, "allowEmptyString")? {
            rule = rule.allow_empty_string();
        }
    }
    if map.contains_key("extraCheck") {
        return Err(ShapeDeclError::UnsupportedExtraCheck {
            field: field.to_string(),
        });
    }

    Ok(rule)
}

fn attr_bool(field: &str, value: &Value, attr: &'static str) -> Result<bool, ShapeDeclError> {
    value.as_bool().ok_or_else(|| ShapeDeclError::InvalidAttribute {
        field: field.to_string(),
        attr,
        expected: "a boolean",
    })
}

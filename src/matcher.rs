//! The recursive shape matcher.
//!
//! This module walks an input value and a [`Shape`] in lockstep, building an
//! [`ErrorTree`] that mirrors the input's structure and sanitizing the input
//! in place: undeclared keys are removed and leaf defaults are injected.
//!
//! The walk never aborts on a per-field problem; every declared field is
//! checked and every violation recorded. The single fatal condition is a
//! null top-level input ([`MatchError::MissingInput`]).
//!
//! # Sanitization contract
//!
//! The caller owns the input and must treat it as exclusively borrowed for
//! the duration of the call. On return the input has been mutated:
//!
//! - keys not declared in the shape are removed, at every nested-object
//!   level, whether or not they are reported;
//! - absent leaf fields with a `default_value` have the default written in.
//!
//! Re-checking a sanitized input is idempotent: the same tree comes back and
//! no further mutation occurs.

use serde_json::{Map, Value};

use crate::error::{ErrorNode, ErrorTree, MatchError};
use crate::shape::{LeafRule, Shape, ShapeNode};

/// Message recorded for a stripped undeclared key.
const EXTRA_KEY_MESSAGE: &str = "this key cannot be included";

/// Message recorded when an array-wrapper field holds a non-array.
const ARRAY_EXPECTED_MESSAGE: &str = "array expected";

/// The outcome of checking one field (or one array element).
enum FieldOutcome {
    /// The value satisfied its node.
    Clean,
    /// The value violated its node; attach under the field key.
    Errors(ErrorNode),
    /// The value was absent and the rule carries a default; write it into
    /// the parent. Injection counts as presence, so no error accompanies it.
    Inject(Value),
}

/// Checks an input value against a shape, reporting stripped keys.
///
/// Returns the accumulated [`ErrorTree`]; an empty tree means the input
/// passed and has been sanitized in place. Callers typically serialize a
/// non-empty tree directly as a structured error payload.
///
/// # Errors
///
/// Returns [`MatchError::MissingInput`] when `input` is `Null`. Supply a
/// defined value (even `{}`) before checking; this is a precondition, not a
/// per-field problem.
///
/// # Example
///
/// ```rust
/// use shapecheck::{check_shape, FieldType, LeafRule, Shape};
/// use serde_json::json;
///
/// let shape = Shape::new().field("id", LeafRule::new().typed(FieldType::Number));
/// let mut input = json!({"id": 4, "name": "Jane"});
///
/// let errors = check_shape(&mut input, &shape).unwrap();
/// assert_eq!(errors.to_value(), json!({"name": ["this key cannot be included"]}));
/// // The undeclared key was stripped from the input.
/// assert_eq!(input, json!({"id": 4}));
/// ```
pub fn check_shape(input: &mut Value, shape: &Shape) -> Result<ErrorTree, MatchError> {
    check_shape_with(input, shape, true)
}

/// Checks an input value against a shape, controlling whether stripped keys
/// are reported.
///
/// Undeclared keys are removed from the input regardless of
/// `report_extra_keys`; the flag only decides whether each removal is also
/// recorded as `["this key cannot be included"]` under the key.
///
/// # Errors
///
/// Returns [`MatchError::MissingInput`] when `input` is `Null`.
pub fn check_shape_with(
    input: &mut Value,
    shape: &Shape,
    report_extra_keys: bool,
) -> Result<ErrorTree, MatchError> {
    match input {
        Value::Null => Err(MatchError::MissingInput),
        Value::Object(map) => Ok(check_fields(map, shape, report_extra_keys)),
        // A defined non-object input resolves every declared field as
        // absent. There is nothing to strip and nowhere to write defaults,
        // so the scratch map's mutations are discarded.
        _ => Ok(check_fields(&mut Map::new(), shape, report_extra_keys)),
    }
}

/// Checks a shape for pass/fail, discarding the error detail.
///
/// Sanitizes `body` exactly like [`check_shape`].
///
/// # Errors
///
/// Returns [`MatchError::MissingInput`] when `body` is `Null`.
pub fn is_shape(shape: &Shape, body: &mut Value) -> Result<bool, MatchError> {
    Ok(check_shape(body, shape)?.is_empty())
}

/// Checks a shape for pass/fail, handing the error detail to a responder.
///
/// On failure the responder's [`reject`](Responder::reject) is invoked with
/// the tree before `false` is returned; a request-handling adapter would
/// serialize the tree into a 400 response there.
///
/// # Errors
///
/// Returns [`MatchError::MissingInput`] when `body` is `Null`.
///
/// # Example
///
/// ```rust
/// use shapecheck::{is_shape_with, ErrorTree, LeafRule, Responder, Shape};
/// use serde_json::{json, Value};
///
/// struct Capture(Option<Value>);
///
/// impl Responder for Capture {
///     fn reject(&mut self, errors: &ErrorTree) {
///         self.0 = Some(errors.to_value());
///     }
/// }
///
/// let shape = Shape::new().field("email", LeafRule::new());
/// let mut body = json!({});
/// let mut responder = Capture(None);
///
/// let ok = is_shape_with(&shape, &mut body, &mut responder).unwrap();
/// assert!(!ok);
/// assert_eq!(responder.0, Some(json!({"email": ["This field is required"]})));
/// ```
pub fn is_shape_with<R: Responder>(
    shape: &Shape,
    body: &mut Value,
    responder: &mut R,
) -> Result<bool, MatchError> {
    let errors = check_shape(body, shape)?;
    if errors.is_empty() {
        Ok(true)
    } else {
        responder.reject(&errors);
        Ok(false)
    }
}

/// A sink for error trees from [`is_shape_with`].
///
/// Implementations surface the tree to whoever needs it: an HTTP adapter
/// writes it into a response body, a CLI prints it, a test captures it.
pub trait Responder {
    /// Receives the non-empty error tree of a failed check.
    fn reject(&mut self, errors: &ErrorTree);
}

/// One recursion level: strips undeclared keys, then checks every declared
/// field of the shape against the map.
fn check_fields(
    map: &mut Map<String, Value>,
    shape: &Shape,
    report_extra_keys: bool,
) -> ErrorTree {
    let mut tree = ErrorTree::new();

    // Stripping is unconditional; the flag only controls reporting.
    let extra: Vec<String> = map
        .keys()
        .filter(|key| !shape.contains(key))
        .cloned()
        .collect();
    for key in extra {
        map.remove(&key);
        if report_extra_keys {
            tree.insert(key, ErrorNode::messages([EXTRA_KEY_MESSAGE]));
        }
    }

    for (name, node) in shape.fields() {
        match check_node(map.get_mut(name), node, report_extra_keys) {
            FieldOutcome::Clean => {}
            FieldOutcome::Errors(errors) => tree.insert(name.clone(), errors),
            FieldOutcome::Inject(default) => {
                map.insert(name.clone(), default);
            }
        }
    }

    tree
}

/// Checks one resolved value against its node. Shared between object fields
/// and array elements; for elements the "field key" is the stringified
/// index and injection writes into the element slot.
fn check_node(
    value: Option<&mut Value>,
    node: &ShapeNode,
    report_extra_keys: bool,
) -> FieldOutcome {
    match node {
        ShapeNode::Leaf(rule) => check_leaf(value.as_deref(), rule),
        ShapeNode::Nested(shape) => {
            let subtree = match value {
                Some(Value::Object(map)) => check_fields(map, shape, report_extra_keys),
                // Absent or non-object: check against a scratch object so
                // required sub-fields still report, without mutating the
                // parent.
                _ => check_fields(&mut Map::new(), shape, report_extra_keys),
            };
            if subtree.is_empty() {
                FieldOutcome::Clean
            } else {
                FieldOutcome::Errors(ErrorNode::Nested(subtree))
            }
        }
        ShapeNode::Object { rule, shape } => check_object_wrapper(value, rule, shape, report_extra_keys),
        ShapeNode::Array { rule, items } => check_array_wrapper(value, rule, items, report_extra_keys),
    }
}

/// The leaf check: presence, then type, then the custom predicate. Only one
/// layer reports per call.
fn check_leaf(value: Option<&Value>, rule: &LeafRule) -> FieldOutcome {
    let value = match value {
        Some(v) if !is_absent(v, rule) => v,
        _ => return absent_outcome(rule),
    };

    if !rule.field_type().matches(value) {
        return FieldOutcome::Errors(ErrorNode::messages([format!(
            "expected type {}",
            rule.field_type()
        )]));
    }

    if let Some(check) = rule.extra_check() {
        if let Some(messages) = check.run(value) {
            return FieldOutcome::Errors(ErrorNode::Messages(messages));
        }
    }

    FieldOutcome::Clean
}

/// `$object` wrapper: presence per the rule with the declared type forced to
/// `object`, the predicate on the whole object, then recursion into the
/// wrapped shape.
fn check_object_wrapper(
    value: Option<&mut Value>,
    rule: &LeafRule,
    shape: &Shape,
    report_extra_keys: bool,
) -> FieldOutcome {
    let value = match value {
        Some(v) if !is_absent(v, rule) => v,
        _ => return absent_wrapper_outcome(rule),
    };

    if !value.is_object() {
        return FieldOutcome::Errors(ErrorNode::messages(["expected type object"]));
    }

    if let Some(check) = rule.extra_check() {
        if let Some(messages) = check.run(value) {
            return FieldOutcome::Errors(ErrorNode::Messages(messages));
        }
    }

    let subtree = match value {
        Value::Object(map) => check_fields(map, shape, report_extra_keys),
        _ => ErrorTree::new(),
    };
    if subtree.is_empty() {
        FieldOutcome::Clean
    } else {
        FieldOutcome::Errors(ErrorNode::Nested(subtree))
    }
}

/// `$array` wrapper: presence per the rule, then every element checked
/// against the wrapped node, keyed by stringified index.
fn check_array_wrapper(
    value: Option<&mut Value>,
    rule: &LeafRule,
    items: &ShapeNode,
    report_extra_keys: bool,
) -> FieldOutcome {
    let value = match value {
        Some(v) if !is_absent(v, rule) => v,
        _ => return absent_wrapper_outcome(rule),
    };

    let elements = match value {
        Value::Array(elements) => elements,
        _ => return FieldOutcome::Errors(ErrorNode::messages([ARRAY_EXPECTED_MESSAGE])),
    };

    let mut subtree = ErrorTree::new();
    for (index, element) in elements.iter_mut().enumerate() {
        match check_node(Some(element), items, report_extra_keys) {
            FieldOutcome::Clean => {}
            FieldOutcome::Errors(errors) => subtree.insert(index.to_string(), errors),
            FieldOutcome::Inject(default) => *element = default,
        }
    }

    if subtree.is_empty() {
        FieldOutcome::Clean
    } else {
        FieldOutcome::Errors(ErrorNode::Nested(subtree))
    }
}

/// Absence for the leaf check: null, or the empty string unless the rule
/// allows it. A missing key is handled by the caller passing `None`.
/// `false` and `0` are present values.
fn is_absent(value: &Value, rule: &LeafRule) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty() && !rule.empty_string_allowed(),
        _ => false,
    }
}

/// Outcome for an absent leaf field: inject the default if one is declared
/// (suppressing the required-field error), otherwise report unless optional.
fn absent_outcome(rule: &LeafRule) -> FieldOutcome {
    if let Some(default) = rule.default() {
        return FieldOutcome::Inject(default.clone());
    }
    if rule.is_optional() {
        FieldOutcome::Clean
    } else {
        FieldOutcome::Errors(ErrorNode::messages([rule.label()]))
    }
}

/// Outcome for an absent wrapper field: wrappers only take presence and
/// optionality from their rule, never defaults.
fn absent_wrapper_outcome(rule: &LeafRule) -> FieldOutcome {
    if rule.is_optional() {
        FieldOutcome::Clean
    } else {
        FieldOutcome::Errors(ErrorNode::messages([rule.label()]))
    }
}

//! Leaf field rules.
//!
//! This module provides [`LeafRule`] for describing a single field's
//! validation (type, optionality, custom predicate, default value), plus the
//! [`FieldType`] primitive types and the [`ExtraCheck`] predicate wrapper.

use std::fmt::{self, Display};
use std::sync::Arc;

use serde_json::Value;

/// Default message for a missing required field.
pub const REQUIRED_MESSAGE: &str = "This field is required";

/// The primitive types a leaf field can require.
///
/// Defaults to `String`, matching the most common payload field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FieldType {
    /// A JSON string.
    #[default]
    String,
    /// Any JSON number.
    Number,
    /// A JSON boolean.
    Boolean,
    /// A JSON object. Arrays also satisfy this type, the way a dynamic
    /// `typeof` check would report them as objects.
    Object,
}

impl FieldType {
    /// Returns the type's declaration name (`"string"`, `"number"`, ...).
    pub fn name(self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Object => "object",
        }
    }

    /// Parses a declaration name into a type.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(FieldType::String),
            "number" => Some(FieldType::Number),
            "boolean" => Some(FieldType::Boolean),
            "object" => Some(FieldType::Object),
            _ => None,
        }
    }

    /// Returns true if the value satisfies this type.
    pub fn matches(self, value: &Value) -> bool {
        match self {
            FieldType::String => value.is_string(),
            FieldType::Number => value.is_number(),
            FieldType::Boolean => value.is_boolean(),
            FieldType::Object => value.is_object() || value.is_array(),
        }
    }
}

impl Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A caller-supplied predicate run after presence and type checks pass.
///
/// The predicate receives the field's value and returns `Some(messages)` to
/// report a failure or `None` to accept. Predicates must be pure and
/// side-effect free; the [`checks`](crate::checks) module provides adapters
/// for the common ones.
///
/// # Example
///
/// ```rust
/// use shapecheck::ExtraCheck;
/// use serde_json::json;
///
/// let check = ExtraCheck::new(|v| {
///     let s = v.as_str()?;
///     (s.len() > 3).then(|| vec!["at most 3 chars long".to_string()])
/// });
///
/// assert_eq!(check.run(&json!("abc")), None);
/// assert!(check.run(&json!("abcd")).is_some());
/// ```
#[derive(Clone)]
pub struct ExtraCheck(Arc<dyn Fn(&Value) -> Option<Vec<String>> + Send + Sync>);

impl ExtraCheck {
    /// Wraps a predicate function.
    pub fn new(f: impl Fn(&Value) -> Option<Vec<String>> + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Runs the predicate against a value.
    pub fn run(&self, value: &Value) -> Option<Vec<String>> {
        (self.0)(value)
    }
}

impl fmt::Debug for ExtraCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ExtraCheck(..)")
    }
}

/// A rule describing a single field's validation.
///
/// A `LeafRule` checks presence, primitive type, and optionally a custom
/// predicate, in that strict order; only one layer reports per check. A rule
/// may also carry a default value that the matcher writes into the input
/// when the field is absent.
///
/// # Example
///
/// ```rust
/// use shapecheck::{check_shape, FieldType, LeafRule, Shape};
/// use serde_json::json;
///
/// let shape = Shape::new()
///     .field("id", LeafRule::new().typed(FieldType::Number))
///     .field("firstName", LeafRule::new().optional().default_value(json!("Joe")));
///
/// let mut input = json!({"id": 4});
/// let errors = check_shape(&mut input, &shape).unwrap();
/// assert!(errors.is_empty());
/// assert_eq!(input["firstName"], json!("Joe"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct LeafRule {
    optional: bool,
    field_type: FieldType,
    error_label: Option<String>,
    default_value: Option<Value>,
    allow_empty_string: bool,
    extra_check: Option<ExtraCheck>,
}

impl LeafRule {
    /// Creates a rule for a required string field with no extra constraints.
    pub fn new() -> Self {
        // The inherent `default` accessor shadows the trait method here.
        <Self as Default>::default()
    }

    /// Marks the field as optional. Absent values are accepted.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Requires the field's value to have the given primitive type.
    pub fn typed(mut self, field_type: FieldType) -> Self {
        self.field_type = field_type;
        self
    }

    /// Sets the message reported when a required field is absent.
    pub fn error_label(mut self, label: impl Into<String>) -> Self {
        self.error_label = Some(label.into());
        self
    }

    /// Sets a value the matcher writes into the input when the field is
    /// absent. Injection counts as presence: no required-field error is
    /// reported alongside it.
    pub fn default_value(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Accepts the empty string as a present value. Without this, `""` is
    /// treated the same as an absent field.
    pub fn allow_empty_string(mut self) -> Self {
        self.allow_empty_string = true;
        self
    }

    /// Attaches a custom predicate, run only after presence and type checks
    /// pass.
    pub fn check(mut self, check: ExtraCheck) -> Self {
        self.extra_check = Some(check);
        self
    }

    /// Returns true if the field is optional.
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Returns the required primitive type.
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Returns the missing-field message, falling back to
    /// [`REQUIRED_MESSAGE`].
    pub fn label(&self) -> &str {
        self.error_label.as_deref().unwrap_or(REQUIRED_MESSAGE)
    }

    /// Returns the default value, if any.
    pub fn default(&self) -> Option<&Value> {
        self.default_value.as_ref()
    }

    /// Returns true if the empty string counts as present.
    pub fn empty_string_allowed(&self) -> bool {
        self.allow_empty_string
    }

    /// Returns the attached predicate, if any.
    pub fn extra_check(&self) -> Option<&ExtraCheck> {
        self.extra_check.as_ref()
    }
}

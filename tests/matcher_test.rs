//! Integration tests for the top-level check entry points: presence, custom
//! predicates, nested shapes, and the pass/fail helpers.

use serde_json::{json, Value};
use shapecheck::{
    check_shape, is_shape, is_shape_with, ErrorTree, ExtraCheck, LeafRule, MatchError, Responder,
    Shape,
};

#[test]
fn test_null_input_is_fatal() {
    let shape = Shape::new().field("email", LeafRule::new());
    let mut input = Value::Null;

    assert_eq!(
        check_shape(&mut input, &shape),
        Err(MatchError::MissingInput)
    );
}

#[test]
fn test_empty_shape_accepts_empty_object() {
    let shape = Shape::new();
    let mut input = json!({});

    let errors = check_shape(&mut input, &shape).unwrap();
    assert!(errors.is_empty());
}

#[test]
fn test_required_fields_reported_together() {
    let shape = Shape::new()
        .field("firstName", LeafRule::new())
        .field("lastName", LeafRule::new());
    let mut input = json!({"firstName": "john"});

    let errors = check_shape(&mut input, &shape).unwrap();
    assert_eq!(
        errors.to_value(),
        json!({"lastName": ["This field is required"]})
    );
}

#[test]
fn test_optional_field_runs_predicate_when_present() {
    let short = ExtraCheck::new(|v| {
        let s = v.as_str()?;
        (s.len() > 3).then(|| vec!["at least 3 char long".to_string()])
    });
    let shape = Shape::new()
        .field("firstName", LeafRule::new())
        .field("nickName", LeafRule::new().optional().check(short.clone()));

    let mut input = json!({"firstName": "john"});
    let errors = check_shape(&mut input, &shape).unwrap();
    assert!(errors.is_empty());

    let mut input = json!({"firstName": "john", "nickName": "jo"});
    let errors = check_shape(&mut input, &shape).unwrap();
    assert!(errors.is_empty());

    let mut input = json!({"firstName": "john", "nickName": "johnny"});
    let errors = check_shape(&mut input, &shape).unwrap();
    assert_eq!(
        errors.to_value(),
        json!({"nickName": ["at least 3 char long"]})
    );
}

#[test]
fn test_custom_error_label_replaces_default_message() {
    let shape = Shape::new().field("id", LeafRule::new().error_label("id is required"));
    let mut input = json!({});

    let errors = check_shape(&mut input, &shape).unwrap();
    assert_eq!(errors.to_value(), json!({"id": ["id is required"]}));
}

#[test]
fn test_nested_shape_accepts_matching_sub_object() {
    let shape = Shape::new().field("email", LeafRule::new()).field(
        "profile",
        Shape::new()
            .field("firstName", LeafRule::new())
            .field("lastName", LeafRule::new()),
    );
    let mut input = json!({
        "email": "john@doe.com",
        "profile": {"firstName": "John", "lastName": "Doe"}
    });

    let errors = check_shape(&mut input, &shape).unwrap();
    assert!(errors.is_empty());
}

#[test]
fn test_nested_shape_reports_sub_field_errors() {
    let shape = Shape::new().field("email", LeafRule::new()).field(
        "profile",
        Shape::new()
            .field("firstName", LeafRule::new())
            .field("lastName", LeafRule::new()),
    );
    let mut input = json!({
        "email": "john@doe.com",
        "profile": {"firstName": "John"}
    });

    let errors = check_shape(&mut input, &shape).unwrap();
    assert_eq!(
        errors.to_value(),
        json!({"profile": {"lastName": ["This field is required"]}})
    );
}

#[test]
fn test_absent_nested_object_reports_its_required_fields() {
    let shape = Shape::new().field(
        "profile",
        Shape::new().field("firstName", LeafRule::new()),
    );
    let mut input = json!({});

    let errors = check_shape(&mut input, &shape).unwrap();
    assert_eq!(
        errors.to_value(),
        json!({"profile": {"firstName": ["This field is required"]}})
    );
}

#[test]
fn test_deeply_nested_errors_flatten_with_full_paths() {
    let shape = Shape::new().field(
        "a",
        Shape::new().field("b", Shape::new().field("c", LeafRule::new())),
    );
    let mut input = json!({"a": {"b": {}}});

    let errors = check_shape(&mut input, &shape).unwrap();
    assert_eq!(
        errors.to_value(),
        json!({"a": {"b": {"c": ["This field is required"]}}})
    );

    let flat = errors.flatten();
    assert_eq!(flat.len(), 1);
    assert_eq!(flat[0].0.to_string(), "a.b.c");
    assert_eq!(flat[0].1, "This field is required");
}

#[test]
fn test_unicode_field_names_pass_through() {
    let shape = Shape::new()
        .field("prénom", LeafRule::new())
        .field("名前", LeafRule::new());
    let mut input = json!({"prénom": "Jean"});

    let errors = check_shape(&mut input, &shape).unwrap();
    assert_eq!(
        errors.to_value(),
        json!({"名前": ["This field is required"]})
    );
}

#[test]
fn test_is_shape_reports_pass_fail() {
    let shape = Shape::new().field("firstName", LeafRule::new());

    let mut body = json!({"firstName": "john"});
    assert!(is_shape(&shape, &mut body).unwrap());

    let mut body = json!({"firstName": null});
    assert!(!is_shape(&shape, &mut body).unwrap());

    let mut body = Value::Null;
    assert_eq!(is_shape(&shape, &mut body), Err(MatchError::MissingInput));
}

#[test]
fn test_is_shape_with_hands_errors_to_responder() {
    struct Capture(Option<Value>);
    impl Responder for Capture {
        fn reject(&mut self, errors: &ErrorTree) {
            self.0 = Some(errors.to_value());
        }
    }

    let shape = Shape::new().field("email", LeafRule::new());

    let mut body = json!({});
    let mut responder = Capture(None);
    assert!(!is_shape_with(&shape, &mut body, &mut responder).unwrap());
    assert_eq!(
        responder.0,
        Some(json!({"email": ["This field is required"]}))
    );
}

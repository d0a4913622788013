//! Integration tests for object-wrapper shapes.

use serde_json::json;
use shapecheck::{check_shape, ExtraCheck, FieldType, LeafRule, Shape, ShapeNode};

fn my_obj_shape(rule: LeafRule) -> Shape {
    Shape::new()
        .field("firstName", LeafRule::new())
        .field(
            "myObj",
            ShapeNode::object(
                rule,
                Shape::new().field("id", LeafRule::new().typed(FieldType::Number)),
            ),
        )
}

#[test]
fn test_required_object_wrapper_accepts_valid_input() {
    let shape = my_obj_shape(LeafRule::new());
    let mut input = json!({"firstName": "john", "myObj": {"id": 3}});

    let errors = check_shape(&mut input, &shape).unwrap();
    assert!(errors.is_empty());
}

#[test]
fn test_object_wrapper_reports_wrapped_field_errors() {
    let shape = my_obj_shape(LeafRule::new());
    let mut input = json!({"firstName": "john", "myObj": {"id": "s"}});

    let errors = check_shape(&mut input, &shape).unwrap();
    assert_eq!(
        errors.to_value(),
        json!({"myObj": {"id": ["expected type number"]}})
    );
}

#[test]
fn test_optional_object_wrapper_may_be_absent() {
    let shape = my_obj_shape(LeafRule::new().optional());
    let mut input = json!({"firstName": "john"});

    let errors = check_shape(&mut input, &shape).unwrap();
    assert!(errors.is_empty());
}

#[test]
fn test_required_object_wrapper_reports_absence() {
    let shape = my_obj_shape(LeafRule::new());
    let mut input = json!({"firstName": "john"});

    let errors = check_shape(&mut input, &shape).unwrap();
    assert_eq!(
        errors.to_value(),
        json!({"myObj": ["This field is required"]})
    );
}

#[test]
fn test_object_wrapper_rejects_non_object_values() {
    // The declared type is ignored: a wrapper always expects an object.
    let shape = my_obj_shape(LeafRule::new().typed(FieldType::String));
    let mut input = json!({"firstName": "john", "myObj": "not an object"});

    let errors = check_shape(&mut input, &shape).unwrap();
    assert_eq!(
        errors.to_value(),
        json!({"myObj": ["expected type object"]})
    );
}

#[test]
fn test_object_wrapper_runs_extra_check_before_recursing() {
    let at_most_one_key = ExtraCheck::new(|v| {
        let obj = v.as_object()?;
        (obj.len() > 1).then(|| vec!["at most one key allowed".to_string()])
    });
    let shape = Shape::new().field(
        "myObj",
        ShapeNode::object(
            LeafRule::new().check(at_most_one_key),
            Shape::new()
                .field("id", LeafRule::new().typed(FieldType::Number))
                .field("name", LeafRule::new().optional()),
        ),
    );

    let mut input = json!({"myObj": {"id": "bad", "name": "x"}});
    let errors = check_shape(&mut input, &shape).unwrap();
    // The predicate reports and recursion is skipped.
    assert_eq!(
        errors.to_value(),
        json!({"myObj": ["at most one key allowed"]})
    );
}

#[test]
fn test_object_wrapper_strips_undeclared_keys_inside() {
    let shape = my_obj_shape(LeafRule::new());
    let mut input = json!({"firstName": "john", "myObj": {"id": 3, "rogue": 1}});

    let errors = check_shape(&mut input, &shape).unwrap();
    assert_eq!(
        errors.to_value(),
        json!({"myObj": {"rogue": ["this key cannot be included"]}})
    );
    assert_eq!(input["myObj"], json!({"id": 3}));
}

#[test]
fn test_object_wrappers_nest_inside_arrays() {
    let shape = Shape::new().field(
        "entries",
        ShapeNode::array(
            LeafRule::new(),
            ShapeNode::object(
                LeafRule::new(),
                Shape::new().field("id", LeafRule::new().typed(FieldType::Number)),
            ),
        ),
    );

    let mut input = json!({"entries": [{"id": 1}, "oops"]});
    let errors = check_shape(&mut input, &shape).unwrap();
    assert_eq!(
        errors.to_value(),
        json!({"entries": {"1": ["expected type object"]}})
    );
}

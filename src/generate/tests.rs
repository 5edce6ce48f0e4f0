//! Tests for the generate module

use super::*;
use crate::schema::{validate, Document, JsonType, SchemaObject};
use proptest::prelude::*;
use serde_json::json;

const DOC: &str = r#"
openapi: 3.0.3
info: {title: t, version: '1'}
paths:
  /user:
    post:
      operationId: post-user
      requestBody:
        content:
          application/json:
            schema:
              type: object
              required: [email, password]
              additionalProperties: false
              properties:
                email: {type: string, format: email}
                password: {type: string, minLength: 8, maxLength: 72}
      responses:
        '201': {description: Created}
  /websites/{hostname}:
    get:
      operationId: get-websites-id
      parameters:
        - name: hostname
          in: path
          schema: {type: string, format: hostname}
        - name: summary
          in: query
          required: true
          schema: {type: string, enum: [daily, weekly]}
      responses:
        '200': {description: OK}
"#;

fn operation(id: &str) -> crate::schema::Operation {
    Document::parse(DOC).unwrap().operation(id).unwrap()
}

#[test]
fn test_positive_body_conforms() {
    let op = operation("post-user");
    let mut gen = Generator::new(Some(7));
    for _ in 0..50 {
        let case = gen.generate(&op, Mode::Positive);
        assert_eq!(case.mode, Mode::Positive);
        let body = case.body.expect("operation declares a body");
        let violations = validate(&body, op.request_body.as_ref().unwrap());
        assert!(violations.is_empty(), "positive body violated schema: {violations:?}");
    }
}

#[test]
fn test_negative_body_violates() {
    let op = operation("post-user");
    let mut gen = Generator::new(Some(7));
    for _ in 0..50 {
        let case = gen.generate(&op, Mode::Negative);
        assert_eq!(case.mode, Mode::Negative);
        let body = case.body.expect("operation declares a body");
        let violations = validate(&body, op.request_body.as_ref().unwrap());
        assert!(!violations.is_empty(), "negative body conformed: {body}");
    }
}

#[test]
fn test_path_parameters_substituted() {
    let op = operation("get-websites-id");
    let mut gen = Generator::new(Some(1));
    let case = gen.generate(&op, Mode::Positive);
    assert!(!case.path.contains('{'), "unsubstituted template: {}", case.path);
    assert!(case.path.starts_with("/websites/"));
}

#[test]
fn test_required_query_parameter_present() {
    let op = operation("get-websites-id");
    let mut gen = Generator::new(Some(1));
    for _ in 0..20 {
        let case = gen.generate(&op, Mode::Positive);
        let summary = case.query.iter().find(|(name, _)| name == "summary");
        let (_, value) = summary.expect("required query param generated");
        assert!(value == "daily" || value == "weekly");
    }
}

#[test]
fn test_negative_without_body_mutates_query() {
    let op = operation("get-websites-id");
    let mut gen = Generator::new(Some(3));
    let case = gen.generate(&op, Mode::Negative);
    assert_eq!(case.mode, Mode::Negative);
    let (_, value) = case
        .query
        .iter()
        .find(|(name, _)| name == "summary")
        .expect("mutated query param present");
    assert_eq!(value, "__not_a_member__");
}

#[test]
fn test_unviolable_operation_falls_back_to_positive() {
    let doc = Document::parse(
        r"
openapi: 3.0.3
info: {title: t, version: '1'}
paths:
  /user:
    get:
      operationId: get-user
      responses:
        '200': {description: OK}
",
    )
    .unwrap();
    let op = doc.operation("get-user").unwrap();
    let mut gen = Generator::new(Some(1));
    let case = gen.generate(&op, Mode::Negative);
    assert_eq!(case.mode, Mode::Positive);
    assert!(case.body.is_none());
}

#[test]
fn test_same_seed_same_cases() {
    let op = operation("post-user");
    let mut a = Generator::new(Some(99));
    let mut b = Generator::new(Some(99));
    for _ in 0..10 {
        let ca = a.generate(&op, Mode::Positive);
        let cb = b.generate(&op, Mode::Positive);
        assert_eq!(ca.body, cb.body);
        assert_eq!(ca.path, cb.path);
    }
}

#[test]
fn test_positive_string_matches_pattern() {
    let schema = SchemaObject {
        schema_type: Some(JsonType::String),
        pattern: Some("^[0-9]{4}$".to_string()),
        ..SchemaObject::default()
    };
    let mut gen = Generator::new(Some(5));
    for _ in 0..50 {
        let value = gen.positive_value(&schema);
        let violations = validate(&value, &schema);
        assert!(violations.is_empty(), "pattern violated by {value}: {violations:?}");
    }
}

#[test]
fn test_positive_pattern_prefers_example() {
    let schema = SchemaObject {
        schema_type: Some(JsonType::String),
        pattern: Some("^[a-f0-9]{8}$".to_string()),
        example: Some(json!("deadbeef")),
        ..SchemaObject::default()
    };
    let mut gen = Generator::new(Some(5));
    assert_eq!(gen.positive_value(&schema), json!("deadbeef"));
}

#[test]
fn test_positive_format_respects_length_bounds() {
    // A generated email is always longer than 10 chars, so the bounds
    // must win over the format.
    let schema = SchemaObject {
        schema_type: Some(JsonType::String),
        format: Some("email".to_string()),
        max_length: Some(10),
        ..SchemaObject::default()
    };
    let mut gen = Generator::new(Some(5));
    for _ in 0..50 {
        let value = gen.positive_value(&schema);
        let violations = validate(&value, &schema);
        assert!(violations.is_empty(), "bounds violated by {value}: {violations:?}");
    }
}

#[test]
fn test_positive_format_kept_when_bounds_allow() {
    let schema = SchemaObject {
        schema_type: Some(JsonType::String),
        format: Some("email".to_string()),
        min_length: Some(5),
        max_length: Some(64),
        ..SchemaObject::default()
    };
    let mut gen = Generator::new(Some(5));
    for _ in 0..20 {
        let value = gen.positive_value(&schema);
        let s = value.as_str().unwrap();
        assert!(s.contains("@example.com"), "format dropped for {s}");
        assert!(validate(&value, &schema).is_empty());
    }
}

#[test]
fn test_case_summary_mentions_mode_and_path() {
    let op = operation("post-user");
    let mut gen = Generator::new(Some(4));
    let case = gen.generate(&op, Mode::Positive);
    let summary = case.summary();
    assert!(summary.contains("positive"));
    assert!(summary.contains("/user"));
}

// ============================================================================
// Property tests: generated values against arbitrary scalar schemas
// ============================================================================

fn scalar_schema() -> impl Strategy<Value = SchemaObject> {
    prop_oneof![
        // Bounded strings
        (0usize..8, 8usize..32).prop_map(|(min, max)| SchemaObject {
            schema_type: Some(JsonType::String),
            min_length: Some(min),
            max_length: Some(max),
            ..SchemaObject::default()
        }),
        // Bounded integers
        (-100i64..0, 0i64..100).prop_map(|(min, max)| SchemaObject {
            schema_type: Some(JsonType::Integer),
            minimum: Some(min as f64),
            maximum: Some(max as f64),
            ..SchemaObject::default()
        }),
        // Enums
        prop::collection::vec("[a-z]{1,6}", 1..5).prop_map(|values| SchemaObject {
            schema_type: Some(JsonType::String),
            enum_values: Some(values.into_iter().map(|v| json!(v)).collect()),
            ..SchemaObject::default()
        }),
        // Patterns (anchored and not)
        (1usize..6, any::<bool>()).prop_map(|(reps, anchored)| SchemaObject {
            schema_type: Some(JsonType::String),
            pattern: Some(if anchored {
                format!("^[0-9a-f]{{{reps}}}$")
            } else {
                format!("[0-9a-f]{{{reps}}}")
            }),
            ..SchemaObject::default()
        }),
        // Formats combined with length bounds tight enough to conflict
        (prop_oneof![Just("email"), Just("hostname"), Just("uri")], 4usize..12)
            .prop_map(|(format, max)| SchemaObject {
                schema_type: Some(JsonType::String),
                format: Some(format.to_string()),
                min_length: Some(1),
                max_length: Some(max),
                ..SchemaObject::default()
            }),
        Just(SchemaObject::of_type(JsonType::Boolean)),
    ]
}

proptest! {
    #[test]
    fn prop_positive_value_always_validates(schema in scalar_schema(), seed in any::<u64>()) {
        let mut gen = Generator::new(Some(seed));
        let value = gen.positive_value(&schema);
        prop_assert!(validate(&value, &schema).is_empty());
    }

    #[test]
    fn prop_object_with_required_fields_validates(seed in any::<u64>()) {
        let schema: SchemaObject = serde_yaml::from_str(r"
type: object
required: [a, b]
properties:
  a: {type: string, minLength: 1}
  b: {type: integer, minimum: 0, maximum: 10}
  c: {type: boolean}
").unwrap();
        let mut gen = Generator::new(Some(seed));
        let value = gen.positive_value(&schema);
        prop_assert!(validate(&value, &schema).is_empty());
    }
}

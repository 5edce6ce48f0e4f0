//! Structural validation of JSON values against schema objects

use super::types::{JsonType, SchemaObject};
use serde_json::Value;

/// One schema conformance violation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON pointer-ish path to the offending value ("$", "$.email", "$[2]")
    pub path: String,
    /// What went wrong
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Validate a value against a schema, collecting every violation found
pub fn validate(value: &Value, schema: &SchemaObject) -> Vec<Violation> {
    let mut violations = Vec::new();
    check(value, schema, "$", &mut violations);
    violations
}

fn check(value: &Value, schema: &SchemaObject, path: &str, out: &mut Vec<Violation>) {
    if value.is_null() && schema.nullable {
        return;
    }

    if let Some(expected) = schema.schema_type {
        if !expected.matches(value) {
            out.push(Violation {
                path: path.to_string(),
                message: format!("expected {expected}, got {}", type_name(value)),
            });
            // Further checks assume the declared type.
            return;
        }
    }

    if let Some(allowed) = &schema.enum_values {
        if !allowed.contains(value) {
            out.push(Violation {
                path: path.to_string(),
                message: format!("value {value} not in enum"),
            });
        }
    }

    match value {
        Value::String(s) => check_string(s, schema, path, out),
        Value::Number(_) => check_number(value, schema, path, out),
        Value::Object(map) => check_object(map, schema, path, out),
        Value::Array(items) => {
            if let Some(item_schema) = &schema.items {
                for (i, item) in items.iter().enumerate() {
                    check(item, item_schema, &format!("{path}[{i}]"), out);
                }
            }
        }
        _ => {}
    }
}

fn check_string(s: &str, schema: &SchemaObject, path: &str, out: &mut Vec<Violation>) {
    let len = s.chars().count();
    if let Some(min) = schema.min_length {
        if len < min {
            out.push(Violation {
                path: path.to_string(),
                message: format!("string length {len} below minLength {min}"),
            });
        }
    }
    if let Some(max) = schema.max_length {
        if len > max {
            out.push(Violation {
                path: path.to_string(),
                message: format!("string length {len} above maxLength {max}"),
            });
        }
    }
    if let Some(pattern) = &schema.pattern {
        // An unparseable pattern is a document defect, not a value defect.
        if let Ok(re) = regex::Regex::new(pattern) {
            if !re.is_match(s) {
                out.push(Violation {
                    path: path.to_string(),
                    message: format!("string does not match pattern {pattern}"),
                });
            }
        }
    }
}

fn check_number(value: &Value, schema: &SchemaObject, path: &str, out: &mut Vec<Violation>) {
    let Some(n) = value.as_f64() else { return };
    if let Some(min) = schema.minimum {
        if n < min {
            out.push(Violation {
                path: path.to_string(),
                message: format!("value {n} below minimum {min}"),
            });
        }
    }
    if let Some(max) = schema.maximum {
        if n > max {
            out.push(Violation {
                path: path.to_string(),
                message: format!("value {n} above maximum {max}"),
            });
        }
    }
}

fn check_object(
    map: &serde_json::Map<String, Value>,
    schema: &SchemaObject,
    path: &str,
    out: &mut Vec<Violation>,
) {
    for required in &schema.required {
        if !map.contains_key(required) {
            out.push(Violation {
                path: path.to_string(),
                message: format!("missing required property '{required}'"),
            });
        }
    }

    if let Some(props) = &schema.properties {
        for (name, value) in map {
            if let Some(prop_schema) = props.get(name) {
                check(value, prop_schema, &format!("{path}.{name}"), out);
            } else if schema.additional_properties == Some(false) {
                out.push(Violation {
                    path: format!("{path}.{name}"),
                    message: "undeclared property".to_string(),
                });
            }
        }
    }
}

fn type_name(value: &Value) -> JsonType {
    match value {
        Value::Null => JsonType::Null,
        Value::Bool(_) => JsonType::Boolean,
        Value::Number(n) if n.is_f64() => JsonType::Number,
        Value::Number(_) => JsonType::Integer,
        Value::String(_) => JsonType::String,
        Value::Array(_) => JsonType::Array,
        Value::Object(_) => JsonType::Object,
    }
}

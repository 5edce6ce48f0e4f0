//! Schema-driven value and case synthesis

use super::case::{Case, Mode};
use crate::schema::{JsonType, Operation, ParameterLocation, SchemaObject};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use tracing::debug;

/// Generates request cases from operation schemas
pub struct Generator {
    rng: StdRng,
    seed: u64,
}

impl Generator {
    /// Create a generator. A fixed seed reproduces a previous run;
    /// otherwise one is drawn from entropy and logged.
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(rand::random);
        debug!(seed, "case generator seeded");
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this generator runs with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate one case for an operation.
    ///
    /// A negative request needs something to violate; when the operation
    /// is fully unconstrained the case falls back to positive and is
    /// labeled as such.
    pub fn generate(&mut self, operation: &Operation, mode: Mode) -> Case {
        let mut case = self.positive_case(operation);
        if mode == Mode::Negative && self.mutate(&mut case, operation) {
            case.mode = Mode::Negative;
        }
        case
    }

    fn positive_case(&mut self, operation: &Operation) -> Case {
        let mut path = operation.path.clone();
        for param in operation.parameters_in(ParameterLocation::Path) {
            let value = self.positive_value(&param.schema);
            path = path.replace(&format!("{{{}}}", param.name), &scalar_string(&value));
        }

        let mut query = Vec::new();
        for param in operation.parameters_in(ParameterLocation::Query) {
            if param.required || self.rng.gen_bool(0.5) {
                let value = self.positive_value(&param.schema);
                query.push((param.name.clone(), scalar_string(&value)));
            }
        }

        let body = operation
            .request_body
            .as_ref()
            .map(|schema| self.positive_value(schema));

        Case {
            operation_id: operation.operation_id.clone(),
            method: operation.method.clone(),
            path,
            headers: HashMap::new(),
            query,
            body,
            mode: Mode::Positive,
        }
    }

    // ========================================================================
    // Positive values
    // ========================================================================

    /// Produce a value satisfying the schema
    pub fn positive_value(&mut self, schema: &SchemaObject) -> Value {
        if let Some(example) = &schema.example {
            if self.rng.gen_bool(0.3) {
                return example.clone();
            }
        }
        if let Some(allowed) = &schema.enum_values {
            if let Some(choice) = allowed.choose(&mut self.rng) {
                return choice.clone();
            }
        }

        match schema.schema_type {
            Some(JsonType::String) => Value::String(self.string_value(schema)),
            Some(JsonType::Integer) => json!(self.integer_value(schema)),
            Some(JsonType::Number) => self.number_value(schema),
            Some(JsonType::Boolean) => json!(self.rng.gen_bool(0.5)),
            Some(JsonType::Null) => Value::Null,
            Some(JsonType::Object) => self.object_value(schema),
            Some(JsonType::Array) => self.array_value(schema),
            // Unconstrained: any scalar will do.
            None => Value::String(self.random_string(1, 12)),
        }
    }

    fn string_value(&mut self, schema: &SchemaObject) -> String {
        if let Some(pattern) = &schema.pattern {
            if let Some(Value::String(example)) = &schema.example {
                return example.clone();
            }
            if let Some(generated) = self.pattern_string(pattern) {
                return generated;
            }
            // Unparseable pattern: the validator skips it too, so a plain
            // string below stays conforming.
        }

        if let Some(formatted) = self.formatted_string(schema.format.as_deref()) {
            // A format string only conforms if it also fits the declared
            // length bounds; otherwise the bounds win and the format is
            // abandoned (the validator does not check formats).
            let len = formatted.chars().count();
            let fits_min = len >= schema.min_length.unwrap_or(0);
            let fits_max = schema.max_length.is_none_or(|max| len <= max);
            if fits_min && fits_max {
                return formatted;
            }
        }

        let min = schema.min_length.unwrap_or(1);
        let max = schema.max_length.unwrap_or(min + 16).max(min);
        self.random_string(min, max)
    }

    /// A string matching the pattern, when the regex is generatable
    fn pattern_string(&mut self, pattern: &str) -> Option<String> {
        // Anchors are implicit when generating a full match; the
        // generator rejects them, so strip before compiling.
        let unanchored = pattern.trim_start_matches('^').trim_end_matches('$');
        let dist = rand_regex::Regex::compile(unanchored, 8).ok()?;
        Some(self.rng.sample(&dist))
    }

    fn formatted_string(&mut self, format: Option<&str>) -> Option<String> {
        let n: u32 = self.rng.gen_range(0..100_000);
        match format {
            Some("email") => Some(format!("user{n}@example.com")),
            Some("hostname") => Some(format!("host{n}.example.com")),
            Some("uri" | "url") => Some(format!("https://example.com/p/{n}")),
            Some("date-time") => Some(chrono::Utc::now().to_rfc3339()),
            Some("date") => Some(chrono::Utc::now().format("%Y-%m-%d").to_string()),
            _ => None,
        }
    }

    fn random_string(&mut self, min: usize, max: usize) -> String {
        let len = self.rng.gen_range(min..=max);
        (0..len)
            .map(|_| char::from(self.rng.sample(rand::distributions::Alphanumeric)))
            .collect()
    }

    fn integer_value(&mut self, schema: &SchemaObject) -> i64 {
        let min = schema.minimum.map_or(0, |m| m.ceil() as i64);
        let max = schema.maximum.map_or(min + 1000, |m| m.floor() as i64).max(min);
        self.rng.gen_range(min..=max)
    }

    fn number_value(&mut self, schema: &SchemaObject) -> Value {
        let min = schema.minimum.unwrap_or(0.0);
        let max = schema.maximum.unwrap_or(min + 1000.0).max(min);
        json!(self.rng.gen_range(min..=max))
    }

    fn object_value(&mut self, schema: &SchemaObject) -> Value {
        let mut map = Map::new();
        if let Some(props) = &schema.properties {
            for (name, prop) in props {
                let required = schema.required.iter().any(|r| r == name);
                if required || self.rng.gen_bool(0.5) {
                    map.insert(name.clone(), self.positive_value(prop));
                }
            }
        }
        Value::Object(map)
    }

    fn array_value(&mut self, schema: &SchemaObject) -> Value {
        match &schema.items {
            Some(items) => {
                let len = self.rng.gen_range(0..=3);
                Value::Array((0..len).map(|_| self.positive_value(items)).collect())
            }
            None => Value::Array(Vec::new()),
        }
    }

    // ========================================================================
    // Negative mutations
    // ========================================================================

    /// Apply one schema violation to the case. Returns false when the
    /// operation admits none (no body schema and no violable parameter).
    fn mutate(&mut self, case: &mut Case, operation: &Operation) -> bool {
        if let (Some(schema), Some(body)) = (&operation.request_body, &case.body) {
            if let Some(mutated) = self.mutate_value(body, schema) {
                case.body = Some(mutated);
                return true;
            }
        }
        // No body to break; try a query parameter instead.
        for param in operation.parameters_in(ParameterLocation::Query) {
            if param.schema.enum_values.is_some() || param.schema.max_length.is_some() {
                let bad = self.violating_scalar(&param.schema);
                case.query.retain(|(name, _)| name != &param.name);
                case.query.push((param.name.clone(), bad));
                return true;
            }
        }
        false
    }

    /// Produce a copy of `value` violating `schema`, if the schema
    /// constrains anything
    fn mutate_value(&mut self, value: &Value, schema: &SchemaObject) -> Option<Value> {
        let mut mutations: Vec<Mutation> = Vec::new();
        if let Value::Object(_) = value {
            if !schema.required.is_empty() {
                mutations.push(Mutation::DropRequired);
            }
            if schema.additional_properties == Some(false) {
                mutations.push(Mutation::InjectUndeclared);
            }
            if schema
                .properties
                .as_ref()
                .is_some_and(|p| p.values().any(|s| s.schema_type.is_some()))
            {
                mutations.push(Mutation::WrongPropertyType);
            }
        }
        if schema.schema_type.is_some() {
            mutations.push(Mutation::WrongType);
        }
        if schema.enum_values.is_some() {
            mutations.push(Mutation::UnknownEnum);
        }
        if schema.max_length.is_some() {
            mutations.push(Mutation::Overlong);
        }
        if schema.maximum.is_some() {
            mutations.push(Mutation::OutOfRange);
        }

        let mutation = mutations.choose(&mut self.rng)?;
        Some(self.apply_mutation(*mutation, value, schema))
    }

    fn apply_mutation(&mut self, mutation: Mutation, value: &Value, schema: &SchemaObject) -> Value {
        match mutation {
            Mutation::DropRequired => {
                let mut map = value.as_object().cloned().unwrap_or_default();
                if let Some(field) = schema.required.as_slice().choose(&mut self.rng) {
                    map.remove(field);
                }
                Value::Object(map)
            }
            Mutation::InjectUndeclared => {
                let mut map = value.as_object().cloned().unwrap_or_default();
                map.insert(
                    format!("undeclared_{}", self.rng.gen_range(0..1000)),
                    json!(true),
                );
                Value::Object(map)
            }
            Mutation::WrongPropertyType => {
                let mut map = value.as_object().cloned().unwrap_or_default();
                let typed: Vec<String> = schema
                    .properties
                    .iter()
                    .flatten()
                    .filter(|(_, s)| s.schema_type.is_some())
                    .map(|(name, _)| name.clone())
                    .collect();
                if let Some(name) = typed.choose(&mut self.rng) {
                    let prop = &schema.properties.as_ref().unwrap()[name];
                    map.insert(name.clone(), wrong_typed_value(prop));
                }
                Value::Object(map)
            }
            Mutation::WrongType => wrong_typed_value(schema),
            Mutation::UnknownEnum => json!("__not_a_member__"),
            Mutation::Overlong => {
                let max = schema.max_length.unwrap_or(0);
                Value::String("x".repeat(max + 1))
            }
            Mutation::OutOfRange => {
                let max = schema.maximum.unwrap_or(0.0);
                match schema.schema_type {
                    Some(JsonType::Integer) => json!(max.floor() as i64 + 1),
                    _ => json!(max + 1.0),
                }
            }
        }
    }

    fn violating_scalar(&mut self, schema: &SchemaObject) -> String {
        if schema.enum_values.is_some() {
            return "__not_a_member__".to_string();
        }
        let max = schema.max_length.unwrap_or(8);
        "x".repeat(max + 1)
    }
}

#[derive(Debug, Clone, Copy)]
enum Mutation {
    DropRequired,
    InjectUndeclared,
    WrongPropertyType,
    WrongType,
    UnknownEnum,
    Overlong,
    OutOfRange,
}

/// A value of a type other than the declared one
fn wrong_typed_value(schema: &SchemaObject) -> Value {
    match schema.schema_type {
        Some(JsonType::String) => json!(12345),
        Some(JsonType::Object) => json!("not an object"),
        Some(JsonType::Array) => json!("not an array"),
        Some(JsonType::Boolean) => json!("not a bool"),
        _ => json!("not a number"),
    }
}

/// Render a scalar for use in a path segment or query pair
fn scalar_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

//! JSON Schema inference from example values
//!
//! `SchemaBuilder` merges example JSON instances into one permissive schema,
//! in the style of genson: it records types and structure, never value
//! constraints.

use crate::config::ClassifierConfig;
use serde_json::{json, Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// JSON Schema primitive type names, ordered as they are emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum JsonType {
    Array,
    Boolean,
    Integer,
    Null,
    Number,
    Object,
    String,
}

impl JsonType {
    fn as_str(&self) -> &'static str {
        match self {
            JsonType::Array => "array",
            JsonType::Boolean => "boolean",
            JsonType::Integer => "integer",
            JsonType::Null => "null",
            JsonType::Number => "number",
            JsonType::Object => "object",
            JsonType::String => "string",
        }
    }
}

/// Accumulated shape of every instance merged at one position
#[derive(Debug, Clone, Default, PartialEq)]
struct Shape {
    types: BTreeSet<JsonType>,
    properties: BTreeMap<String, Shape>,
    /// Keys present in every object instance; `None` until the first object
    required: Option<BTreeSet<String>>,
    /// Merged shape of all array items; `None` while only empty arrays were seen
    items: Option<Box<Shape>>,
}

impl Shape {
    fn merge(&mut self, value: &Value) {
        match value {
            Value::Null => {
                self.types.insert(JsonType::Null);
            }
            Value::Bool(_) => {
                self.types.insert(JsonType::Boolean);
            }
            Value::Number(n) => {
                let kind = if n.is_i64() || n.is_u64() {
                    JsonType::Integer
                } else {
                    JsonType::Number
                };
                self.types.insert(kind);
            }
            Value::String(_) => {
                self.types.insert(JsonType::String);
            }
            Value::Array(items) => {
                self.types.insert(JsonType::Array);
                for item in items {
                    self.items.get_or_insert_with(Box::default).merge(item);
                }
            }
            Value::Object(map) => {
                self.types.insert(JsonType::Object);
                for (key, child) in map {
                    self.properties.entry(key.clone()).or_default().merge(child);
                }
                let keys: BTreeSet<String> = map.keys().cloned().collect();
                self.required = Some(match self.required.take() {
                    Some(required) => required.intersection(&keys).cloned().collect(),
                    None => keys,
                });
            }
        }
    }

    fn to_value(&self) -> Value {
        let mut schema = Map::new();

        let mut types = self.types.clone();
        // integer is a subset of number
        if types.contains(&JsonType::Number) {
            types.remove(&JsonType::Integer);
        }
        match types.len() {
            0 => {}
            1 => {
                if let Some(only) = types.iter().next() {
                    schema.insert("type".to_string(), json!(only.as_str()));
                }
            }
            _ => {
                let names: Vec<&str> = types.iter().map(JsonType::as_str).collect();
                schema.insert("type".to_string(), json!(names));
            }
        }

        if types.contains(&JsonType::Object) {
            let properties: Map<String, Value> = self
                .properties
                .iter()
                .map(|(key, shape)| (key.clone(), shape.to_value()))
                .collect();
            schema.insert("properties".to_string(), Value::Object(properties));

            if let Some(required) = self.required.as_ref().filter(|r| !r.is_empty()) {
                schema.insert("required".to_string(), json!(required));
            }
        }

        if let Some(items) = &self.items {
            schema.insert("items".to_string(), items.to_value());
        }

        Value::Object(schema)
    }
}

/// Incremental schema builder
///
/// Call [`seed`](SchemaBuilder::seed) once, then
/// [`add_example`](SchemaBuilder::add_example) per example object, then
/// [`to_schema`](SchemaBuilder::to_schema).
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    root: Shape,
}

impl SchemaBuilder {
    /// Create an empty builder (its schema is `{}` until seeded)
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an empty object
    ///
    /// The seed counts as an instance without keys, so the root schema never
    /// lists `required` properties.
    pub fn seed(&mut self) -> &mut Self {
        self.root.merge(&Value::Object(Map::new()));
        self
    }

    /// Merge one example instance
    pub fn add_example(&mut self, example: &Value) -> &mut Self {
        self.root.merge(example);
        self
    }

    /// Current schema
    pub fn to_schema(&self) -> Value {
        self.root.to_value()
    }
}

/// Output schema for a configuration
///
/// A `struct` entry contributes `{name: example}` only when its taxonomy flag
/// is truthy as well.
pub fn generate_schema(config: &ClassifierConfig) -> Value {
    let mut builder = SchemaBuilder::new();
    builder.seed();

    for (name, example) in &config.examples {
        if config.is_enabled(name) {
            let mut wrapped = Map::new();
            wrapped.insert(name.clone(), example.clone());
            builder.add_example(&Value::Object(wrapped));
        } else {
            debug!(taxonomy = %name, "Skipping schema example: taxonomy flag not set");
        }
    }

    builder.to_schema()
}

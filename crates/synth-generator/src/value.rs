//! Generated values and rows.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Number, Value as JsonValue};
use std::collections::BTreeMap;
use uuid::Uuid;

/// A value produced by a generator, before any output encoding.
///
/// Objects keep their keys ordered so encoded output is stable byte for byte.
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratedValue {
    Null,
    Bool(bool),
    Int64(i64),
    Float64(f64),
    String(String),
    Uuid(Uuid),
    Timestamp(DateTime<Utc>),
    Array(Vec<GeneratedValue>),
    Object(BTreeMap<String, GeneratedValue>),
}

impl GeneratedValue {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int64(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float64(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[GeneratedValue]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, GeneratedValue>> {
        match self {
            Self::Object(fields) => Some(fields),
            _ => None,
        }
    }

    /// Encode as JSON. Non-finite floats become `null`.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Null => JsonValue::Null,
            Self::Bool(b) => JsonValue::Bool(*b),
            Self::Int64(i) => JsonValue::Number((*i).into()),
            Self::Float64(f) => Number::from_f64(*f)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            Self::String(s) => JsonValue::String(s.clone()),
            Self::Uuid(u) => JsonValue::String(u.to_string()),
            Self::Timestamp(dt) => {
                JsonValue::String(dt.to_rfc3339_opts(SecondsFormat::Secs, true))
            }
            Self::Array(items) => JsonValue::Array(items.iter().map(Self::to_json).collect()),
            Self::Object(fields) => JsonValue::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

/// One generated record of a table.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedRow {
    /// Table the row belongs to
    pub table: String,
    /// Position of the row within the table
    pub index: u64,
    /// Primary key
    pub id: GeneratedValue,
    /// Field values by name
    pub fields: BTreeMap<String, GeneratedValue>,
}

impl GeneratedRow {
    pub fn new(
        table: String,
        index: u64,
        id: GeneratedValue,
        fields: BTreeMap<String, GeneratedValue>,
    ) -> Self {
        Self {
            table,
            index,
            id,
            fields,
        }
    }

    /// Get a field value by name.
    pub fn get_field(&self, name: &str) -> Option<&GeneratedValue> {
        self.fields.get(name)
    }

    /// Encode as a JSON object holding `id` and every field, keys in name order.
    pub fn to_json(&self) -> JsonValue {
        let mut object = Map::new();
        object.insert("id".to_string(), self.id.to_json());
        for (name, value) in &self.fields {
            object.insert(name.clone(), value.to_json());
        }
        JsonValue::Object(object)
    }
}

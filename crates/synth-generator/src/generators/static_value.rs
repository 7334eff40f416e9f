//! Static value generator and YAML to GeneratedValue conversion.

use serde_yaml::Value as YamlValue;
use std::collections::BTreeMap;

use crate::value::GeneratedValue;

/// Convert a YAML value to a GeneratedValue.
pub fn yaml_to_generated_value(yaml: &YamlValue) -> GeneratedValue {
    match yaml {
        YamlValue::Null => GeneratedValue::Null,
        YamlValue::Bool(b) => GeneratedValue::Bool(*b),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                GeneratedValue::Int64(i)
            } else if let Some(f) = n.as_f64() {
                GeneratedValue::Float64(f)
            } else {
                GeneratedValue::String(n.to_string())
            }
        }
        YamlValue::String(s) => GeneratedValue::String(s.clone()),
        YamlValue::Sequence(arr) => {
            GeneratedValue::Array(arr.iter().map(yaml_to_generated_value).collect())
        }
        YamlValue::Mapping(map) => {
            let values: BTreeMap<String, GeneratedValue> = map
                .iter()
                .map(|(k, v)| (mapping_key(k), yaml_to_generated_value(v)))
                .collect();
            GeneratedValue::Object(values)
        }
        YamlValue::Tagged(tagged) => yaml_to_generated_value(&tagged.value),
    }
}

/// Object key for a YAML mapping key. Scalars keep their plain text form
/// (`1`, `true`); anything else is written out as flow-style YAML.
fn mapping_key(key: &YamlValue) -> String {
    match key {
        YamlValue::String(s) => s.clone(),
        YamlValue::Null => "null".to_string(),
        YamlValue::Bool(b) => b.to_string(),
        YamlValue::Number(n) => n.to_string(),
        YamlValue::Tagged(tagged) => mapping_key(&tagged.value),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

//! Individual value generators for different data types.
//!
//! Flat generators draw from the stream of the node they are given. Nested
//! generators (`object`, `repeat`) descend into child nodes so every
//! sub-value has its own stream.

pub mod array;
pub mod numeric;
pub mod pattern;
pub mod static_value;
pub mod timestamp;
pub mod uuid;

use nested_random::Node;
use rand::Rng;
use std::collections::BTreeMap;

use crate::schema::{FieldSchema, GeneratorConfig};
use crate::value::GeneratedValue;

/// Generate a value at `node` based on the generator configuration.
///
/// `index` is the row index, used by `sequential` and `{index}` patterns.
pub fn generate_value(config: &GeneratorConfig, node: &Node, index: u64) -> GeneratedValue {
    match config {
        GeneratorConfig::UuidV4 => uuid::generate_uuid_v4(&mut node.stream()),

        GeneratorConfig::Sequential { start } => numeric::generate_sequential(*start, index),

        GeneratorConfig::Pattern { pattern } => {
            pattern::generate_pattern(pattern, &mut node.stream(), index)
        }

        GeneratorConfig::IntRange { min, max } => {
            numeric::generate_int_range(&mut node.stream(), *min, *max)
        }

        GeneratorConfig::FloatRange { min, max } => {
            numeric::generate_float_range(&mut node.stream(), *min, *max)
        }

        GeneratorConfig::TimestampRange { start, end } => {
            timestamp::generate_timestamp_range(&mut node.stream(), start, end)
        }

        GeneratorConfig::WeightedBool { true_weight } => {
            // Weights are checked on schema load; NaN falls back to false.
            let p = if true_weight.is_nan() {
                0.0
            } else {
                true_weight.clamp(0.0, 1.0)
            };
            GeneratedValue::Bool(node.stream().gen_bool(p))
        }

        GeneratorConfig::OneOf { values } => {
            if values.is_empty() {
                GeneratedValue::Null
            } else {
                let idx = node.stream().gen_range(0..values.len());
                static_value::yaml_to_generated_value(&values[idx])
            }
        }

        GeneratorConfig::SampleArray {
            pool,
            min_length,
            max_length,
        } => array::generate_sample_array(&mut node.stream(), pool, *min_length, *max_length),

        GeneratorConfig::Repeat {
            min_count,
            max_count,
            element,
        } => array::generate_repeat(node, *min_count, *max_count, element, index),

        GeneratorConfig::Object { fields } => {
            GeneratedValue::Object(generate_fields(fields, node, index))
        }

        GeneratorConfig::Static { value } => static_value::yaml_to_generated_value(value),

        GeneratorConfig::Null => GeneratedValue::Null,
    }
}

/// Generate every field of a record, each at `record/<field name>`.
pub fn generate_fields(
    fields: &[FieldSchema],
    record: &Node,
    index: u64,
) -> BTreeMap<String, GeneratedValue> {
    fields
        .iter()
        .map(|field| {
            let value = generate_value(&field.generator, &record.get(&field.name), index);
            (field.name.clone(), value)
        })
        .collect()
}

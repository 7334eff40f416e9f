//! Array value generators.

use nested_random::Node;
use rand::Rng;

use super::generate_value;
use crate::schema::GeneratorConfig;
use crate::value::GeneratedValue;

/// Key under a repeat field whose stream decides the element count.
pub const COUNT_KEY: &str = "count";

/// Key under a repeat field whose indexed children hold the elements.
pub const ITEMS_KEY: &str = "items";

/// Generate an array by sampling from a pool of values (with repeats).
pub fn generate_sample_array<R: Rng>(
    rng: &mut R,
    pool: &[String],
    min_length: usize,
    max_length: usize,
) -> GeneratedValue {
    if pool.is_empty() || max_length == 0 {
        return GeneratedValue::Array(vec![]);
    }

    let length = rng.gen_range(min_length.min(max_length)..=max_length);

    let items: Vec<GeneratedValue> = (0..length)
        .map(|_| GeneratedValue::String(pool[rng.gen_range(0..pool.len())].clone()))
        .collect();

    GeneratedValue::Array(items)
}

/// Generate between `min_count` and `max_count` elements under `node`.
///
/// The count comes from `node/count`; element `k` is generated at
/// `node/items/k`, so each element owns its stream and the elements already
/// produced do not change when the count does.
pub fn generate_repeat(
    node: &Node,
    min_count: usize,
    max_count: usize,
    element: &GeneratorConfig,
    index: u64,
) -> GeneratedValue {
    let count = node
        .get(COUNT_KEY)
        .stream()
        .gen_range(min_count.min(max_count)..=max_count);

    let items = node.get(ITEMS_KEY);
    let values: Vec<GeneratedValue> = items
        .children()
        .take(count)
        .map(|item| generate_value(element, &item, index))
        .collect();

    GeneratedValue::Array(values)
}

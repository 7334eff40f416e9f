//! Numeric value generators.

use rand::Rng;

use crate::value::GeneratedValue;

/// Generate a random integer in the given range (inclusive).
///
/// Bounds given in the wrong order are swapped.
pub fn generate_int_range<R: Rng>(rng: &mut R, min: i64, max: i64) -> GeneratedValue {
    let (low, high) = if min <= max { (min, max) } else { (max, min) };
    GeneratedValue::Int64(rng.gen_range(low..=high))
}

/// Generate a random float in the given range (inclusive).
///
/// Bounds given in the wrong order are swapped. A NaN bound yields NaN, and so
/// does an infinite bound unless both bounds are the same value.
pub fn generate_float_range<R: Rng>(rng: &mut R, min: f64, max: f64) -> GeneratedValue {
    if min.is_nan() || max.is_nan() {
        return GeneratedValue::Float64(f64::NAN);
    }
    let (low, high) = if min <= max { (min, max) } else { (max, min) };
    if low == high {
        return GeneratedValue::Float64(low);
    }
    if !low.is_finite() || !high.is_finite() {
        return GeneratedValue::Float64(f64::NAN);
    }
    if !(high - low).is_finite() {
        // Span overflows f64: interpolate instead of subtracting.
        let t: f64 = rng.gen();
        let value = low * (1.0 - t) + high * t;
        return GeneratedValue::Float64(value.clamp(low, high));
    }
    GeneratedValue::Float64(rng.gen_range(low..=high))
}

/// Generate a sequential integer offset from `start` by the row index.
pub fn generate_sequential(start: i64, index: u64) -> GeneratedValue {
    GeneratedValue::Int64(start.wrapping_add(index as i64))
}

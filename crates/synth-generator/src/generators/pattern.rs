//! Pattern-based string generator.
//!
//! Supports placeholders:
//! - `{index}` - row index
//! - `{uuid}` - random UUID drawn from the field's stream
//! - `{rand:N}` - random N-digit number

use rand::Rng;

use super::uuid::random_uuid;
use crate::value::GeneratedValue;

/// Generate a string based on a pattern with placeholders.
pub fn generate_pattern<R: Rng>(pattern: &str, rng: &mut R, index: u64) -> GeneratedValue {
    let mut result = pattern.replace("{index}", &index.to_string());

    while result.contains("{uuid}") {
        result = result.replacen("{uuid}", &random_uuid(rng).to_string(), 1);
    }

    // Placeholders are resolved left to right; an unrecognised one stops the scan
    let mut cursor = 0;
    while let Some(offset) = result[cursor..].find("{rand:") {
        let start = cursor + offset;
        let Some(len) = result[start..].find('}') else {
            break;
        };
        let end = start + len;
        let Ok(digits) = result[start + 6..end].parse::<usize>() else {
            cursor = end + 1;
            continue;
        };
        let random_num = generate_random_digits(rng, digits);
        result = format!("{}{}{}", &result[..start], random_num, &result[end + 1..]);
        cursor = start + random_num.len();
    }

    GeneratedValue::String(result)
}

/// Generate a random number with exactly N digits.
fn generate_random_digits<R: Rng>(rng: &mut R, digits: usize) -> String {
    if digits == 0 {
        return String::new();
    }

    let mut result = String::with_capacity(digits);

    // First digit should be 1-9 to avoid leading zeros
    result.push(char::from(b'0' + rng.gen_range(1..10u8)));

    for _ in 1..digits {
        result.push(char::from(b'0' + rng.gen_range(0..10u8)));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use nested_random::Node;

    #[test]
    fn test_generate_pattern_index() {
        let mut rng = Node::new(42).stream();
        let value = generate_pattern("user_{index}@example.com", &mut rng, 123);

        assert_eq!(
            value,
            GeneratedValue::String("user_123@example.com".to_string())
        );
    }

    #[test]
    fn test_generate_pattern_uuid() {
        let mut rng = Node::new(42).stream();
        let value = generate_pattern("id-{uuid}", &mut rng, 0);

        let s = value.as_str().expect("Expected String value");
        assert!(s.starts_with("id-"));
        assert_eq!(s.len(), 3 + 36); // "id-" + UUID

        // Drawn from the stream, so reproducible
        let again = generate_pattern("id-{uuid}", &mut Node::new(42).stream(), 0);
        assert_eq!(value, again);
    }

    #[test]
    fn test_generate_pattern_random_digits() {
        let mut rng = Node::new(42).stream();
        let value = generate_pattern("code-{rand:6}", &mut rng, 0);

        let s = value.as_str().expect("Expected String value");
        assert!(s.starts_with("code-"));
        assert_eq!(s.len(), 5 + 6);
        let random_part = &s[5..];
        assert!(random_part.chars().all(|c| c.is_ascii_digit()));
        assert_ne!(random_part.as_bytes()[0], b'0');
    }

    #[test]
    fn test_generate_pattern_multiple_placeholders() {
        let mut rng = Node::new(42).stream();
        let value = generate_pattern("user_{index}_code_{rand:4}_{rand:2}", &mut rng, 42);

        let s = value.as_str().expect("Expected String value");
        assert!(s.starts_with("user_42_code_"));
        // "user_42_code_" (13) + 4 digits + "_" + 2 digits
        assert_eq!(s.len(), 13 + 4 + 1 + 2);
    }

    #[test]
    fn test_generate_pattern_invalid_placeholder_is_kept() {
        let mut rng = Node::new(42).stream();
        let value = generate_pattern("{rand:x}-{rand:3}", &mut rng, 0);

        let s = value.as_str().expect("Expected String value");
        assert!(s.starts_with("{rand:x}-"));
        assert_eq!(s.len(), 9 + 3);
    }
}

//! Timestamp value generators.

use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;

use crate::value::GeneratedValue;

/// Generate a random timestamp in the given range, at whole seconds.
///
/// Bounds are parsed with [`parse_timestamp`]; schemas are validated on load
/// so an unparseable bound only reaches here through hand-built configs, in
/// which case the value is `Null`.
pub fn generate_timestamp_range<R: Rng>(rng: &mut R, start: &str, end: &str) -> GeneratedValue {
    let (Some(start), Some(end)) = (parse_timestamp(start), parse_timestamp(end)) else {
        return GeneratedValue::Null;
    };

    let start_ts = start.timestamp();
    let end_ts = end.timestamp();
    if start_ts >= end_ts {
        return GeneratedValue::Timestamp(start);
    }

    let random_ts = rng.gen_range(start_ts..=end_ts);
    let dt = DateTime::from_timestamp(random_ts, 0).unwrap_or(start);
    GeneratedValue::Timestamp(dt)
}

/// Parse an RFC 3339 timestamp or a `YYYY-MM-DD` date (midnight UTC).
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()?
        .and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc())
}

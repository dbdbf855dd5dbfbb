use crate::record::{Record, get_str};
use serde_json::Value;

/// Replace an empty or missing slug with the value of `fallback_key`.
///
/// Runs before fingerprinting; the fingerprinter itself never guesses.
#[must_use]
pub fn fill_slug(mut record: Record, slug_key: &str, fallback_key: &str) -> Record {
    let empty = get_str(&record, slug_key).is_none_or(str::is_empty);

    if empty && let Some(fallback) = get_str(&record, fallback_key).map(ToString::to_string) {
        record.insert(slug_key.to_string(), Value::String(fallback));
    }

    record
}

///
/// TESTS
///

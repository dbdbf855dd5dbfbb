//! Module: record
//! Responsibility: the store-facing record shape and JSON access helpers.
//! Boundary: every serializer reads and writes bodies through these helpers.

use crate::error::SerializerError;
use serde_json::{Map, Value};

///
/// Record
///
/// Resource field bag handed to the object store. Ownership moves to the
/// caller once normalization returns.
///

pub type Record = Map<String, Value>;

/// Resolve a dotted path (`"Node.Node"`) against nested objects.
#[must_use]
pub fn get_path<'a>(record: &'a Record, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = record.get(segments.next()?)?;

    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }

    Some(current)
}

/// Resolve a dotted path to a string value.
#[must_use]
pub fn get_path_str<'a>(record: &'a Record, path: &str) -> Option<&'a str> {
    get_path(record, path).and_then(Value::as_str)
}

/// Borrow a top-level string field.
#[must_use]
pub fn get_str<'a>(record: &'a Record, key: &str) -> Option<&'a str> {
    record.get(key).and_then(Value::as_str)
}

/// True when `key` is missing or explicitly `null`.
#[must_use]
pub fn is_absent(record: &Record, key: &str) -> bool {
    record.get(key).is_none_or(Value::is_null)
}

/// Require a JSON object body.
pub fn expect_object(value: Value, resource: &str) -> Result<Record, SerializerError> {
    match value {
        Value::Object(record) => Ok(record),
        other => Err(SerializerError::malformed(format!(
            "{resource}: expected object body, found {}",
            json_kind(&other)
        ))),
    }
}

/// Require a JSON array body.
pub fn expect_array(value: Value, resource: &str) -> Result<Vec<Value>, SerializerError> {
    match value {
        Value::Array(items) => Ok(items),
        other => Err(SerializerError::malformed(format!(
            "{resource}: expected list body, found {}",
            json_kind(&other)
        ))),
    }
}

/// Require a JSON array of objects.
pub fn expect_records(value: Value, resource: &str) -> Result<Vec<Record>, SerializerError> {
    expect_array(value, resource)?
        .into_iter()
        .map(|item| expect_object(item, resource))
        .collect()
}

/// Require a one-or-more element list and take its first object.
pub fn expect_first(value: Value, resource: &str) -> Result<Record, SerializerError> {
    let first = expect_array(value, resource)?
        .into_iter()
        .next()
        .ok_or_else(|| SerializerError::not_found(resource, "response list is empty"))?;

    expect_object(first, resource)
}

pub(crate) const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

///
/// TESTS
///

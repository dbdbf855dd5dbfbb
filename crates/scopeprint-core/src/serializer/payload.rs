//! Module: serializer::payload
//! Responsibility: normalized results handed to the object store.
//! Boundary: the store owns these once returned.

use crate::{meta::ResponseMeta, record::Record};
use serde::Serialize;
use serde_json::Value;

///
/// QueryPayload
///
/// Normalized list response: fingerprinted records plus response meta.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QueryPayload {
    pub records: Vec<Record>,
    pub meta: ResponseMeta,
}

impl QueryPayload {
    #[must_use]
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Find a record by its primary key value.
    #[must_use]
    pub fn get(&self, primary_key: &str, value: &str) -> Option<&Record> {
        self.records
            .iter()
            .find(|record| record.get(primary_key).and_then(Value::as_str) == Some(value))
    }
}

///
/// RecordPayload
///
/// Normalized single-record response.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RecordPayload {
    pub record: Record,
    pub meta: ResponseMeta,
}

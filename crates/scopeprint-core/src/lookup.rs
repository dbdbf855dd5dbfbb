//! Module: lookup
//! Responsibility: read-only access to records the caller's store already holds.
//! Boundary: the only way normalization consults prior state; it never keeps
//! an index of its own.

use crate::record::{Record, get_str};
use std::collections::BTreeMap;

///
/// RecordLookup
///
/// Find a previously stored record by a secondary string field.
///

pub trait RecordLookup {
    fn find_by(&self, field: &str, value: &str) -> Option<&Record>;
}

///
/// NoLookup
/// Lookup with nothing stored.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct NoLookup;

impl RecordLookup for NoLookup {
    fn find_by(&self, _: &str, _: &str) -> Option<&Record> {
        None
    }
}

impl RecordLookup for [Record] {
    fn find_by(&self, field: &str, value: &str) -> Option<&Record> {
        self.iter()
            .find(|record| get_str(record, field) == Some(value))
    }
}

impl RecordLookup for Vec<Record> {
    fn find_by(&self, field: &str, value: &str) -> Option<&Record> {
        self.as_slice().find_by(field, value)
    }
}

impl<K: Ord> RecordLookup for BTreeMap<K, Record> {
    fn find_by(&self, field: &str, value: &str) -> Option<&Record> {
        self.values()
            .find(|record| get_str(record, field) == Some(value))
    }
}

///
/// TESTS
///

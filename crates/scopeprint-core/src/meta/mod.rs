//! Module: meta
//! Responsibility: lift response-level metadata out of HTTP headers.
//! Does not own: record identity or any per-record field except `SyncTime`.
//!
//! Invariants:
//! - Header names are compared case-insensitively.
//! - Absent headers leave the corresponding field absent, never null.
//! - Headers never become record fields; they travel beside the body.

pub mod headers;


use crate::{clock::Clock, record::Record};
use headers::{
    HEADER_CACHE_CONTROL, HEADER_DATACENTER, HEADER_INDEX, HEADER_NAMESPACE, HEADER_PARTITION,
    HEADER_RANGE, HEADER_REFRESH, HeaderMap,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

///
/// ResponseMeta
///
/// Metadata about one response, not about any one record.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dc: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub nspace: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_control: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,

    /// Refresh interval in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<u64>,

    /// Synchronization timestamp (ms since epoch); list responses only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<i64>,

    /// Distinct `MAJOR.MINOR` versions; node listings only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub versions: Option<Vec<String>>,
}

/// Read the known headers into a fresh `ResponseMeta`.
#[must_use]
pub fn extract_meta(headers: &HeaderMap) -> ResponseMeta {
    let owned = |name: &str| headers.get(name).map(ToString::to_string);

    ResponseMeta {
        cursor: owned(HEADER_INDEX),
        dc: owned(HEADER_DATACENTER),
        nspace: owned(HEADER_NAMESPACE),
        partition: owned(HEADER_PARTITION),
        cache_control: owned(HEADER_CACHE_CONTROL),
        range: owned(HEADER_RANGE),
        interval: headers.get(HEADER_REFRESH).and_then(parse_refresh_millis),
        date: None,
        versions: None,
    }
}

/// Extract meta for a list response, taking the sync timestamp now.
#[must_use]
pub fn extract_query_meta(headers: &HeaderMap, clock: &dyn Clock) -> ResponseMeta {
    ResponseMeta {
        date: Some(clock.now_millis()),
        ..extract_meta(headers)
    }
}

/// Stamp every record of a list snapshot with its sync timestamp.
pub fn stamp_sync_time(records: &mut [Record], key: &str, date: i64) {
    for record in records {
        record.insert(key.to_string(), Value::from(date));
    }
}

// `refresh` carries whole seconds; fractional seconds are truncated to ms
fn parse_refresh_millis(raw: &str) -> Option<u64> {
    let seconds: f64 = raw.trim().parse().ok()?;
    if !seconds.is_finite() || seconds < 0.0 {
        return None;
    }

    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let millis = (seconds * 1_000.0) as u64;

    Some(millis)
}

use crate::record::{Record, get_str};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Bytes left unescaped in a component: `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

///
/// UriEncoder
///
/// Escapes one URI component. Injected into the serializers that build
/// composite string identities so callers can swap the escaping rules.
///

pub trait UriEncoder {
    fn encode_component(&self, raw: &str) -> String;
}

///
/// ComponentEncoder
///
/// Percent-encodes UTF-8 bytes outside the `COMPONENT` unreserved set.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct ComponentEncoder;

impl UriEncoder for ComponentEncoder {
    fn encode_component(&self, raw: &str) -> String {
        utf8_percent_encode(raw, COMPONENT).to_string()
    }
}

const INTENTION_ID_FIELDS: [&str; 6] = [
    "SourcePartition",
    "SourceNS",
    "SourceName",
    "DestinationPartition",
    "DestinationNS",
    "DestinationName",
];

/// Build the source/destination identity of an intention.
///
/// Each part is escaped so a `:` inside a name cannot shift the boundaries.
/// Missing parts encode as empty.
#[must_use]
pub fn intention_id(record: &Record, encoder: &dyn UriEncoder) -> String {
    INTENTION_ID_FIELDS
        .iter()
        .map(|key| encoder.encode_component(get_str(record, key).unwrap_or_default()))
        .collect::<Vec<_>>()
        .join(":")
}

///
/// TESTS
///

use crate::record::Record;
use serde_json::Value;

/// Split a bare `host:port` leader string into `{Address, Port}`.
///
/// Only the final colon separates the port, so bracketed IPv6 literals
/// (`[::1]:8500`) keep their inner colons. A bracketed literal without a
/// port (`[::1]`) or an input without any colon becomes `{Address}` with no
/// `Port`.
#[must_use]
pub fn split_address(raw: &str) -> Record {
    let mut record = Record::new();

    let split = raw
        .rsplit_once(':')
        .filter(|(host, _)| !host.starts_with('[') || host.ends_with(']'));

    match split {
        Some((address, port)) => {
            record.insert("Address".to_string(), Value::from(address));
            record.insert("Port".to_string(), Value::from(port));
        }
        None => {
            record.insert("Address".to_string(), Value::from(raw));
        }
    }

    record
}

///
/// TESTS
///

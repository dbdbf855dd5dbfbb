use crate::error::SerializerError;
use http::header::{HeaderName, HeaderValue};

///
/// Header names
/// Lower-cased wire names consumed by the extractor.
///

pub const HEADER_INDEX: &str = "x-consul-index";
pub const HEADER_DATACENTER: &str = "x-consul-datacenter";
pub const HEADER_NAMESPACE: &str = "x-consul-namespace";
pub const HEADER_PARTITION: &str = "x-consul-partition";
pub const HEADER_DEFAULT_ACL_POLICY: &str = "x-consul-default-acl-policy";
pub const HEADER_CACHE_CONTROL: &str = "cache-control";
pub const HEADER_RANGE: &str = "x-range";
pub const HEADER_REFRESH: &str = "refresh";

///
/// HeaderMap
///
/// Response headers as delivered by an `http` transport. Names compare
/// case-insensitively; values that are not visible ASCII read as absent.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct HeaderMap(http::HeaderMap);

impl HeaderMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one header. A later duplicate replaces an earlier one.
    pub fn insert(&mut self, name: &str, value: &str) -> Result<(), SerializerError> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|err| SerializerError::malformed(format!("header name `{name}`: {err}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|err| SerializerError::malformed(format!("header `{name}` value: {err}")))?;
        self.0.insert(name, value);

        Ok(())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name)?.to_str().ok()
    }
}

impl From<http::HeaderMap> for HeaderMap {
    fn from(headers: http::HeaderMap) -> Self {
        Self(headers)
    }
}

/// Pairs that are not valid HTTP headers are dropped; no transport could
/// have delivered them.
impl<K, V> FromIterator<(K, V)> for HeaderMap
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Self::new();
        for (name, value) in iter {
            let _ = headers.insert(name.as_ref(), value.as_ref());
        }

        headers
    }
}

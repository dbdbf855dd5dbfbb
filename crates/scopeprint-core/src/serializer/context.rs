use crate::{
    config::SerializerConfig,
    error::{ErrorClass, ErrorOrigin, SerializerError},
    meta::headers::HeaderMap,
    obs::EventSink,
};
use serde_json::Value;
use std::collections::BTreeMap;

///
/// QueryContext
///
/// Scope and parameters of the request a response answers.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct QueryContext {
    pub dc: Option<String>,
    pub ns: Option<String>,
    pub partition: Option<String>,

    /// Resource id from the request path (service name, intention id...).
    pub id: Option<String>,

    params: BTreeMap<String, String>,
}

impl QueryContext {
    #[must_use]
    pub fn new(dc: impl Into<String>) -> Self {
        Self {
            dc: Some(dc.into()),
            ..Self::default()
        }
    }

    /// Context with only the tenancy coordinates set.
    #[must_use]
    pub(crate) const fn scoped(
        dc: Option<String>,
        ns: Option<String>,
        partition: Option<String>,
    ) -> Self {
        Self {
            dc,
            ns,
            partition,
            id: None,
            params: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_namespace(mut self, ns: impl Into<String>) -> Self {
        self.ns = Some(ns.into());
        self
    }

    #[must_use]
    pub fn with_partition(mut self, partition: impl Into<String>) -> Self {
        self.partition = Some(partition.into());
        self
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Borrow a required request parameter.
    pub fn require_param(&self, name: &str) -> Result<&str, SerializerError> {
        self.param(name).ok_or_else(|| missing_input(name))
    }

    /// Borrow the required request id.
    pub fn require_id(&self) -> Result<&str, SerializerError> {
        self.id.as_deref().ok_or_else(|| missing_input("id"))
    }
}

fn missing_input(name: &str) -> SerializerError {
    SerializerError::new(
        ErrorClass::ContractViolation,
        ErrorOrigin::Serializer,
        format!("request is missing required `{name}`"),
    )
}

///
/// RawResponse
///
/// One `(headers, body)` pair delivered by the transport.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawResponse {
    pub headers: HeaderMap,
    pub body: Value,
}

impl RawResponse {
    #[must_use]
    pub const fn new(headers: HeaderMap, body: Value) -> Self {
        Self { headers, body }
    }

    #[must_use]
    pub fn from_body(body: Value) -> Self {
        Self {
            headers: HeaderMap::new(),
            body,
        }
    }

    /// True when the transport acknowledged a write with a bare `true`.
    #[must_use]
    pub const fn is_acknowledgement(&self) -> bool {
        matches!(self.body, Value::Bool(true))
    }
}

///
/// ResponseContext
///
/// Everything a shape hook may consult besides the body itself.
///

#[derive(Clone, Copy)]
pub struct ResponseContext<'a> {
    pub query: &'a QueryContext,
    pub headers: &'a HeaderMap,
    pub config: &'a SerializerConfig,
    pub sink: &'a dyn EventSink,
}

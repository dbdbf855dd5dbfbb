//! Module: serializer
//! Responsibility: per-resource composition of meta extraction, shape
//! normalization and fingerprinting for each response kind.
//! Does not own: transport, the store, or any state between responses.
//!
//! Invariants:
//! - Every pipeline is a pure function of its inputs plus injected
//!   collaborators (clock, sink, lookup, encoder).
//! - Headers are read once into `ResponseMeta` and never reach records.
//! - Delete responses project to the identity field only.

mod context;
mod payload;
mod pipeline;
pub mod resource;


pub use context::{QueryContext, RawResponse, ResponseContext};
pub use payload::{QueryPayload, RecordPayload};
pub use pipeline::Normalizer;

use crate::{
    error::SerializerError,
    meta::ResponseMeta,
    record::{Record, expect_object, expect_records},
};
use serde_json::Value;
use std::fmt;

///
/// ResourceKind
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[remain::sorted]
pub enum ResourceKind {
    AuthMethod,
    BindingRule,
    Coordinate,
    Datacenter,
    DiscoveryChain,
    Intention,
    Kv,
    Namespace,
    Node,
    Partition,
    Policy,
    Proxy,
    Role,
    Service,
    ServiceInstance,
    Session,
    Token,
    Topology,
}

impl ResourceKind {
    #[must_use]
    pub const fn model_name(self) -> &'static str {
        match self {
            Self::AuthMethod => "auth-method",
            Self::BindingRule => "binding-rule",
            Self::Coordinate => "coordinate",
            Self::Datacenter => "dc",
            Self::DiscoveryChain => "discovery-chain",
            Self::Intention => "intention",
            Self::Kv => "kv",
            Self::Namespace => "nspace",
            Self::Node => "node",
            Self::Partition => "partition",
            Self::Policy => "policy",
            Self::Proxy => "proxy",
            Self::Role => "role",
            Self::Service => "service",
            Self::ServiceInstance => "service-instance",
            Self::Session => "session",
            Self::Token => "token",
            Self::Topology => "topology",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.model_name())
    }
}

///
/// Identity
///
/// How a resource's records are keyed in the store.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Identity {
    /// Fingerprint scope plus the value(s) at `slug_key` into the configured
    /// primary key.
    Fingerprint { slug_key: &'static str },

    /// The record already carries a globally unique key in `primary_key`.
    Natural { primary_key: &'static str },
}

///
/// ResourceSerializer
///
/// Resource-specific hooks. Every hook has a default matching the plain
/// REST shape, so most resources only declare their kind and identity.
///

pub trait ResourceSerializer {
    fn kind(&self) -> ResourceKind;

    fn identity(&self) -> Identity;

    /// Reshape a list body into records.
    fn shape_query(
        &self,
        _ctx: &ResponseContext<'_>,
        body: Value,
    ) -> Result<Vec<Record>, SerializerError> {
        expect_records(body, self.kind().model_name())
    }

    /// Reshape a single-record body.
    fn shape_record(
        &self,
        _ctx: &ResponseContext<'_>,
        body: Value,
    ) -> Result<Record, SerializerError> {
        expect_object(body, self.kind().model_name())
    }

    /// Reshape a create response body (already substituted when acknowledged).
    fn shape_create(
        &self,
        _ctx: &ResponseContext<'_>,
        body: Record,
    ) -> Result<Record, SerializerError> {
        Ok(body)
    }

    /// Reshape an update response body (already substituted when acknowledged).
    fn shape_update(
        &self,
        _ctx: &ResponseContext<'_>,
        _submitted: &Record,
        body: Record,
    ) -> Result<Record, SerializerError> {
        Ok(body)
    }

    /// Add resource-specific list metadata.
    fn query_meta(&self, _records: &[Record], _meta: &mut ResponseMeta) {}

    /// Reduce a store record to the request body the API accepts.
    fn serialize(&self, record: Record) -> Record {
        record
    }
}

//! Module: serializer::resource
//! Responsibility: one `ResourceSerializer` per API resource.
//! Does not own: pipeline ordering (see `Normalizer`).

mod acl;
mod catalog;
mod intention;
mod kv;
mod service;
mod tenancy;

pub use acl::{
    AuthMethodSerializer, BindingRuleSerializer, PolicySerializer, RoleSerializer,
    TokenSerializer,
};
pub use catalog::{CoordinateSerializer, DatacenterSerializer, NodeSerializer};
pub use intention::IntentionSerializer;
pub use kv::{KvSerializer, SessionSerializer};
pub use service::{
    DiscoveryChainSerializer, ProxySerializer, ServiceInstanceSerializer, ServiceSerializer,
    TopologySerializer,
};
pub use tenancy::{NamespaceSerializer, PartitionSerializer};

use crate::record::Record;
use serde_json::Value;

///
/// plain_resource
///
/// Declares a serializer that only differs from the REST default by its
/// kind and slug key.
///

macro_rules! plain_resource {
    ($(#[$meta:meta])* $name:ident, $kind:ident, $slug:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default)]
        pub struct $name;

        impl $crate::serializer::ResourceSerializer for $name {
            fn kind(&self) -> $crate::serializer::ResourceKind {
                $crate::serializer::ResourceKind::$kind
            }

            fn identity(&self) -> $crate::serializer::Identity {
                $crate::serializer::Identity::Fingerprint { slug_key: $slug }
            }
        }
    };
}

pub(crate) use plain_resource;

// copy `value` into `key` unless the record already has a usable value there
fn set_default(record: &mut Record, key: &str, value: Option<&str>) {
    if let Some(value) = value
        && record.get(key).is_none_or(Value::is_null)
    {
        record.insert(key.to_string(), Value::from(value));
    }
}

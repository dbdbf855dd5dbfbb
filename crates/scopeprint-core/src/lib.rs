//! Core engine for scopeprint: response normalization for a multi-tenant
//! service-catalog API, plus the composite fingerprints that key every
//! record in the client-side store.
//!
//! A transport hands over `(headers, body)`; a `Normalizer` runs it through
//! the matching `ResourceSerializer` and returns store-ready records with
//! their `ResponseMeta` kept alongside.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod clock;
pub mod config;
pub mod error;
pub mod fingerprint;
pub mod lookup;
pub mod meta;
pub mod normalize;
pub mod obs;
pub mod record;
pub mod serializer;
pub mod versions;

///
/// Prelude
///
/// Prelude contains the types a caller needs to drive one normalization.
/// Normalizer helpers and the individual resource serializers stay behind
/// their modules.
///

pub mod prelude {
    pub use crate::{
        clock::{Clock, FixedClock, SystemClock},
        config::{FieldKeys, SerializerConfig},
        error::{ErrorClass, ErrorOrigin, SerializerError},
        fingerprint::{Fingerprint, Scope, ScopeKey},
        lookup::{NoLookup, RecordLookup},
        meta::{ResponseMeta, headers::HeaderMap},
        obs::{EventCounters, EventSink, NoopSink},
        record::Record,
        serializer::{
            Identity, Normalizer, QueryContext, QueryPayload, RawResponse, RecordPayload,
            ResourceKind, ResourceSerializer,
        },
    };
}

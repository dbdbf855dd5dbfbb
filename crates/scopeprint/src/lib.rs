//! ## Crate layout
//! - `core`: the normalization engine (fingerprints, header meta, resource
//!   serializers, normalizers and the event sink).
//! - `error`: the public error type callers match on.
//!
//! The `prelude` module carries everything needed to normalize one response;
//! `resource` lists the per-resource serializers.

pub use scopeprint_core as core;
pub use scopeprint_core::serializer::resource;

pub mod error;

pub use error::{Error, ErrorKind, ErrorOrigin};

use scopeprint_core::config::SerializerConfig;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Load serializer settings from a TOML document.
pub fn load_config(input: &str) -> Result<SerializerConfig, Error> {
    Ok(SerializerConfig::from_toml_str(input)?)
}

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        core::{
            clock::{Clock, FixedClock, SystemClock},
            config::{FieldKeys, SerializerConfig},
            fingerprint::{Fingerprint, Scope, ScopeKey},
            lookup::{NoLookup, RecordLookup},
            meta::{ResponseMeta, headers::HeaderMap},
            normalize::{ComponentEncoder, UriEncoder},
            obs::{EventCounters, EventSink, NoopSink},
            record::Record,
            serializer::{
                Normalizer, QueryContext, QueryPayload, RawResponse, RecordPayload, ResourceKind,
                ResourceSerializer,
            },
        },
        error::{Error, ErrorKind, ErrorOrigin},
    };
    pub use serde_json::{Value, json};
}

//! Observability: normalization events and the sink abstraction.
//!
//! Nothing here is global; callers own their sink and pass it in.

pub(crate) mod sink;

// re-exports
pub use sink::{
    EventCounters, EventOps, EventReport, EventSink, NoopSink, NormalizeEvent, RequestKind,
    ResourceCounters,
};

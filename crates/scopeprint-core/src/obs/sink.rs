//! Event sink boundary.
//!
//! Serializer pipelines MUST NOT record counters directly.
//! All instrumentation flows through `NormalizeEvent` and `EventSink`,
//! and the sink is always handed in by the caller.

use serde::{Deserialize, Serialize};
use std::{cell::RefCell, collections::BTreeMap};

///
/// RequestKind
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum RequestKind {
    Query,
    QueryRecord,
    QueryLeader,
    Create,
    Update,
    Delete,
}

///
/// NormalizeEvent
///

#[derive(Clone, Copy, Debug)]
pub enum NormalizeEvent {
    Start {
        kind: RequestKind,
        resource: &'static str,
    },
    Finish {
        kind: RequestKind,
        resource: &'static str,
        records: u64,
    },
    NotFound {
        kind: RequestKind,
        resource: &'static str,
    },
    LegacyIdentityReconciled {
        resource: &'static str,
    },
}

///
/// EventSink
///

pub trait EventSink {
    fn record(&self, event: NormalizeEvent);
}

///
/// NoopSink
///

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn record(&self, _: NormalizeEvent) {}
}

///
/// EventReport
/// Point-in-time copy of the counters held by an `EventCounters` sink.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EventReport {
    pub ops: EventOps,
    pub resources: BTreeMap<String, ResourceCounters>,
}

///
/// EventOps
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EventOps {
    // Entrypoints
    pub query_calls: u64,
    pub query_record_calls: u64,
    pub query_leader_calls: u64,
    pub create_calls: u64,
    pub update_calls: u64,
    pub delete_calls: u64,

    // Outcomes
    pub records_normalized: u64,
    pub not_found: u64,
    pub legacy_reconciled: u64,
}

///
/// ResourceCounters
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ResourceCounters {
    pub calls: u64,
    pub records_normalized: u64,
    pub not_found: u64,
}

///
/// EventCounters
/// Caller-owned counting sink.
///

#[derive(Debug, Default)]
pub struct EventCounters {
    state: RefCell<EventReport>,
}

impl EventCounters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn report(&self) -> EventReport {
        self.state.borrow().clone()
    }

    pub fn reset(&self) {
        *self.state.borrow_mut() = EventReport::default();
    }
}

impl EventSink for EventCounters {
    fn record(&self, event: NormalizeEvent) {
        let mut state = self.state.borrow_mut();

        match event {
            NormalizeEvent::Start { kind, resource } => {
                let ops = &mut state.ops;
                let counter = match kind {
                    RequestKind::Query => &mut ops.query_calls,
                    RequestKind::QueryRecord => &mut ops.query_record_calls,
                    RequestKind::QueryLeader => &mut ops.query_leader_calls,
                    RequestKind::Create => &mut ops.create_calls,
                    RequestKind::Update => &mut ops.update_calls,
                    RequestKind::Delete => &mut ops.delete_calls,
                };
                *counter = counter.saturating_add(1);

                let entry = state.resources.entry(resource.to_string()).or_default();
                entry.calls = entry.calls.saturating_add(1);
            }

            NormalizeEvent::Finish {
                resource, records, ..
            } => {
                state.ops.records_normalized = state.ops.records_normalized.saturating_add(records);

                let entry = state.resources.entry(resource.to_string()).or_default();
                entry.records_normalized = entry.records_normalized.saturating_add(records);
            }

            NormalizeEvent::NotFound { resource, .. } => {
                state.ops.not_found = state.ops.not_found.saturating_add(1);

                let entry = state.resources.entry(resource.to_string()).or_default();
                entry.not_found = entry.not_found.saturating_add(1);
            }

            NormalizeEvent::LegacyIdentityReconciled { .. } => {
                state.ops.legacy_reconciled = state.ops.legacy_reconciled.saturating_add(1);
            }
        }
    }
}

///
/// TESTS
///

//! Module: serializer::pipeline
//! Responsibility: the five response pipelines (list query, record query,
//! create, update, delete) plus the node leader lookup.
//! Does not own: resource-specific reshaping; that lives behind
//! `ResourceSerializer` hooks.

use crate::{
    clock::{Clock, SystemClock},
    config::SerializerConfig,
    error::SerializerError,
    fingerprint::{Scope, fingerprint},
    meta::{ResponseMeta, extract_meta, extract_query_meta, headers::HeaderMap, stamp_sync_time},
    normalize::split_address,
    obs::{EventSink, NoopSink, NormalizeEvent, RequestKind},
    record::{Record, expect_object, get_str, json_kind},
    serializer::{
        Identity, QueryContext, QueryPayload, RawResponse, RecordPayload, ResourceKind,
        ResourceSerializer, ResponseContext,
    },
};
use serde_json::Value;

///
/// Normalizer
///
/// Runs a `ResourceSerializer` over transport responses. Holds only
/// borrowed collaborators; every call is independent of the previous one.
///

#[derive(Clone, Copy)]
pub struct Normalizer<'a> {
    config: &'a SerializerConfig,
    clock: &'a dyn Clock,
    sink: &'a dyn EventSink,
}

impl<'a> Normalizer<'a> {
    #[must_use]
    pub fn new(config: &'a SerializerConfig) -> Self {
        Self {
            config,
            clock: &SystemClock,
            sink: &NoopSink,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: &'a dyn Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_sink(mut self, sink: &'a dyn EventSink) -> Self {
        self.sink = sink;
        self
    }

    #[must_use]
    pub const fn config(&self) -> &'a SerializerConfig {
        self.config
    }

    fn debug_log(&self, s: impl AsRef<str>) {
        if self.config.debug {
            println!("[debug] {}", s.as_ref());
        }
    }

    ///
    /// LIST QUERY
    ///

    /// Normalize a list response into fingerprinted, sync-stamped records.
    pub fn query(
        &self,
        resource: &dyn ResourceSerializer,
        query: &QueryContext,
        response: RawResponse,
    ) -> Result<QueryPayload, SerializerError> {
        let kind = RequestKind::Query;
        self.start(kind, resource.kind());

        let RawResponse { headers, body } = response;
        let mut meta = extract_query_meta(&headers, self.clock);
        let ctx = self.context(query, &headers);

        let records = self.observe(kind, resource.kind(), resource.shape_query(&ctx, body))?;
        let scope = response_scope(query, &meta);
        let mut records = records
            .into_iter()
            .map(|record| self.identify(resource, scope.clone(), record))
            .collect::<Result<Vec<_>, _>>()?;

        resource.query_meta(&records, &mut meta);
        if let Some(date) = meta.date {
            stamp_sync_time(&mut records, &self.config.keys.sync_time, date);
        }

        self.finish(kind, resource.kind(), records.len());

        Ok(QueryPayload { records, meta })
    }

    ///
    /// RECORD QUERY
    ///

    /// Normalize a single-record response.
    pub fn query_record(
        &self,
        resource: &dyn ResourceSerializer,
        query: &QueryContext,
        response: RawResponse,
    ) -> Result<RecordPayload, SerializerError> {
        let kind = RequestKind::QueryRecord;
        self.start(kind, resource.kind());

        let RawResponse { headers, body } = response;
        let meta = extract_meta(&headers);
        let ctx = self.context(query, &headers);

        let record = self.observe(kind, resource.kind(), resource.shape_record(&ctx, body))?;
        let record = self.identify(resource, response_scope(query, &meta), record)?;

        self.finish(kind, resource.kind(), 1);

        Ok(RecordPayload { record, meta })
    }

    ///
    /// LEADER
    ///

    /// Normalize a bare `"host:port"` leader response. No fingerprint: the
    /// leader is looked up by address, not stored by identity.
    pub fn query_leader(
        &self,
        query: &QueryContext,
        response: RawResponse,
    ) -> Result<RecordPayload, SerializerError> {
        let kind = RequestKind::QueryLeader;
        self.start(kind, ResourceKind::Node);

        let RawResponse { headers, body } = response;
        let meta = extract_meta(&headers);

        let Value::String(raw) = body else {
            return Err(SerializerError::malformed(format!(
                "node: expected leader address string, found {}",
                json_kind(&body)
            )));
        };
        let mut record = split_address(&raw);
        if let Some(dc) = meta.dc.as_deref().or(query.dc.as_deref()) {
            record.insert(self.config.keys.datacenter.clone(), Value::from(dc));
        }

        self.finish(kind, ResourceKind::Node, 1);

        Ok(RecordPayload { record, meta })
    }

    ///
    /// CREATE
    ///

    /// Normalize a create response. A bare `true` acknowledgement means the
    /// submitted payload is the record.
    pub fn create(
        &self,
        resource: &dyn ResourceSerializer,
        submitted: &Record,
        response: RawResponse,
    ) -> Result<RecordPayload, SerializerError> {
        let kind = RequestKind::Create;
        self.start(kind, resource.kind());

        let (headers, body) = self.acknowledged(resource, submitted, response)?;
        let meta = extract_meta(&headers);
        let query = self.submitted_query(submitted);
        let ctx = self.context(&query, &headers);

        let record = self.observe(kind, resource.kind(), resource.shape_create(&ctx, body))?;
        let record = self.identify(resource, self.submitted_scope(submitted), record)?;

        self.finish(kind, resource.kind(), 1);

        Ok(RecordPayload { record, meta })
    }

    ///
    /// UPDATE
    ///

    /// Normalize an update response; same acknowledgement rule as create.
    pub fn update(
        &self,
        resource: &dyn ResourceSerializer,
        submitted: &Record,
        response: RawResponse,
    ) -> Result<RecordPayload, SerializerError> {
        let kind = RequestKind::Update;
        self.start(kind, resource.kind());

        let (headers, body) = self.acknowledged(resource, submitted, response)?;
        let meta = extract_meta(&headers);
        let query = self.submitted_query(submitted);
        let ctx = self.context(&query, &headers);

        let record = self.observe(
            kind,
            resource.kind(),
            resource.shape_update(&ctx, submitted, body),
        )?;
        let record = self.identify(resource, self.submitted_scope(submitted), record)?;

        self.finish(kind, resource.kind(), 1);

        Ok(RecordPayload { record, meta })
    }

    ///
    /// DELETE
    ///

    /// Project a deleted record to `{primaryKey: identity}`.
    ///
    /// The identity is recomputed from the submitted record's slug and scope
    /// so a stale or foreign primary key on the submitted payload cannot leak.
    /// The response body is ignored.
    pub fn delete(
        &self,
        resource: &dyn ResourceSerializer,
        submitted: &Record,
        _response: RawResponse,
    ) -> Result<Record, SerializerError> {
        let kind = RequestKind::Delete;
        self.start(kind, resource.kind());

        let (primary_key, identity) = match resource.identity() {
            Identity::Fingerprint { slug_key } => {
                let primary_key = self.config.keys.primary.clone();
                let fingerprint = fingerprint(
                    self.config,
                    &primary_key,
                    slug_key,
                    self.submitted_scope(submitted),
                )
                .compute(submitted)?;

                (primary_key, Value::from(fingerprint))
            }
            Identity::Natural { primary_key } => {
                let value = submitted.get(primary_key).cloned().ok_or_else(|| {
                    SerializerError::fingerprint_contract(format!(
                        "{}: deleted record is missing `{primary_key}`",
                        resource.kind()
                    ))
                })?;

                (primary_key.to_string(), value)
            }
        };

        let mut projection = Record::new();
        projection.insert(primary_key, identity);

        self.finish(kind, resource.kind(), 1);

        Ok(projection)
    }

    ///
    /// OUTBOUND
    ///

    /// Reduce a store record to the request body for a create or update.
    #[must_use]
    pub fn serialize(&self, resource: &dyn ResourceSerializer, record: Record) -> Record {
        resource.serialize(record)
    }

    //
    // Internals
    //

    const fn context<'c>(
        &'c self,
        query: &'c QueryContext,
        headers: &'c HeaderMap,
    ) -> ResponseContext<'c> {
        ResponseContext {
            query,
            headers,
            config: self.config,
            sink: self.sink,
        }
    }

    fn identify(
        &self,
        resource: &dyn ResourceSerializer,
        scope: Scope,
        record: Record,
    ) -> Result<Record, SerializerError> {
        match resource.identity() {
            Identity::Fingerprint { slug_key } => {
                fingerprint(self.config, &self.config.keys.primary, slug_key, scope).apply(record)
            }
            Identity::Natural { .. } => Ok(record),
        }
    }

    // substitute the submitted payload for a bare `true` acknowledgement
    fn acknowledged(
        &self,
        resource: &dyn ResourceSerializer,
        submitted: &Record,
        response: RawResponse,
    ) -> Result<(HeaderMap, Record), SerializerError> {
        if response.is_acknowledgement() {
            self.debug_log(format!(
                "{}: write acknowledged, using submitted payload",
                resource.kind()
            ));

            return Ok((response.headers, submitted.clone()));
        }

        let body = expect_object(response.body, resource.kind().model_name())?;

        Ok((response.headers, body))
    }

    fn submitted_scope(&self, submitted: &Record) -> Scope {
        let keys = &self.config.keys;
        let field = |key: &str| get_str(submitted, key).map(ToString::to_string);

        Scope {
            datacenter: field(&keys.datacenter),
            namespace: field(&keys.namespace),
            partition: field(&keys.partition),
        }
    }

    fn submitted_query(&self, submitted: &Record) -> QueryContext {
        let scope = self.submitted_scope(submitted);

        QueryContext::scoped(scope.datacenter, scope.namespace, scope.partition)
    }

    fn start(&self, kind: RequestKind, resource: ResourceKind) {
        self.debug_log(format!("{resource}: normalize {kind:?}"));
        self.sink.record(NormalizeEvent::Start {
            kind,
            resource: resource.model_name(),
        });
    }

    fn finish(&self, kind: RequestKind, resource: ResourceKind, records: usize) {
        self.sink.record(NormalizeEvent::Finish {
            kind,
            resource: resource.model_name(),
            records: u64::try_from(records).unwrap_or(u64::MAX),
        });
    }

    fn observe<T>(
        &self,
        kind: RequestKind,
        resource: ResourceKind,
        result: Result<T, SerializerError>,
    ) -> Result<T, SerializerError> {
        if let Err(err) = &result {
            self.debug_log(format!("{resource}: {}", err.display_with_class()));
            if err.is_not_found() {
                self.sink.record(NormalizeEvent::NotFound {
                    kind,
                    resource: resource.model_name(),
                });
            }
        }

        result
    }
}

// response headers name the effective tenancy; the request fills the gaps
fn response_scope(query: &QueryContext, meta: &ResponseMeta) -> Scope {
    Scope {
        datacenter: query.dc.clone(),
        namespace: meta.nspace.clone().or_else(|| query.ns.clone()),
        partition: meta.partition.clone().or_else(|| query.partition.clone()),
    }
}

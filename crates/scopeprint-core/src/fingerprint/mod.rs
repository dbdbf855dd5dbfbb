//! Module: fingerprint
//! Responsibility: composite record identity derived from tenancy scope and slug.
//! Does not own: slug fallbacks (normalizers run those first) or header parsing.
//! Boundary: every identity the store sees is produced here.
//!
//! Invariants:
//! - Equal `(scope, slug...)` inputs always produce an equal fingerprint.
//! - Distinct `(scope, slug...)` inputs never collide: the fingerprint is the
//!   JSON array encoding of the ordered tuple, which is injective.
//! - A scope with neither namespace nor partition produces the pre-tenancy
//!   `[datacenter, slug...]` form, so identities minted before multi-tenancy
//!   stay stable.
//! - After `apply`, the record's scope fields are exactly the scope that was
//!   hashed into its primary key.


use crate::{
    config::SerializerConfig,
    error::SerializerError,
    record::{Record, get_path_str, get_str},
};
use derive_more::{Deref, Display};
use serde::{Deserialize, Serialize};
use serde_json::Value;

///
/// Scope
///
/// Tenancy coordinates supplied by the enclosing response context.
/// Any of them may be missing here; the datacenter must be recoverable
/// (from here or from the record) by the time a fingerprint is computed.
///

#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Scope {
    pub datacenter: Option<String>,
    pub namespace: Option<String>,
    pub partition: Option<String>,
}

impl Scope {
    #[must_use]
    pub fn new(datacenter: impl Into<String>) -> Self {
        Self {
            datacenter: Some(datacenter.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    #[must_use]
    pub fn with_partition(mut self, partition: impl Into<String>) -> Self {
        self.partition = Some(partition.into());
        self
    }
}

///
/// ScopeKey
///
/// Fully resolved tenancy coordinates a slug is unique under.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ScopeKey {
    pub datacenter: String,
    pub namespace: Option<String>,
    pub partition: Option<String>,
}

impl ScopeKey {
    #[must_use]
    pub fn new(datacenter: impl Into<String>) -> Self {
        Self {
            datacenter: datacenter.into(),
            namespace: None,
            partition: None,
        }
    }

    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    #[must_use]
    pub fn with_partition(mut self, partition: impl Into<String>) -> Self {
        self.partition = Some(partition.into());
        self
    }

    /// True when the scope predates namespaces and partitions.
    #[must_use]
    pub const fn is_legacy(&self) -> bool {
        self.namespace.is_none() && self.partition.is_none()
    }
}

///
/// Fingerprint
///

#[derive(
    Clone, Debug, Deref, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Compute the fingerprint for one scope and slug tuple.
    #[must_use]
    pub fn compute(scope: &ScopeKey, slugs: &[&str]) -> Self {
        let text = |s: &str| Value::String(s.to_string());
        let optional = |s: &Option<String>| s.as_deref().map_or(Value::Null, text);

        let mut parts = Vec::with_capacity(slugs.len() + 3);
        if !scope.is_legacy() {
            parts.push(optional(&scope.partition));
            parts.push(optional(&scope.namespace));
        }
        parts.push(text(&scope.datacenter));
        parts.extend(slugs.iter().copied().map(text));

        Self(Value::Array(parts).to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<Fingerprint> for Value {
    fn from(fingerprint: Fingerprint) -> Self {
        Self::String(fingerprint.0)
    }
}

///
/// SlugKey
///
/// One or more comma-separated field paths whose values form the slug.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SlugKey {
    parts: Vec<String>,
}

impl SlugKey {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let parts = raw
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(ToString::to_string)
            .collect();

        Self { parts }
    }

    #[must_use]
    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// Read every slug part from `record`; each must be a non-empty string.
    pub fn values<'r>(&self, record: &'r Record) -> Result<Vec<&'r str>, SerializerError> {
        if self.parts.is_empty() {
            return Err(SerializerError::fingerprint_contract(
                "unable to create fingerprint, slug key is empty",
            ));
        }

        self.parts
            .iter()
            .map(|part| match get_path_str(record, part) {
                Some(slug) if !slug.is_empty() => Ok(slug),
                _ => Err(SerializerError::fingerprint_contract(format!(
                    "unable to create fingerprint, missing slug in `{part}`"
                ))),
            })
            .collect()
    }
}

///
/// Fingerprinter
///
/// Bound `(primary key, slug key, scope)` ready to stamp records.
///

#[derive(Clone, Debug)]
pub struct Fingerprinter<'a> {
    config: &'a SerializerConfig,
    primary_key: &'a str,
    slug_key: SlugKey,
    scope: Scope,
}

/// Bind a fingerprinter for one response context.
#[must_use]
pub fn fingerprint<'a>(
    config: &'a SerializerConfig,
    primary_key: &'a str,
    slug_key: &str,
    scope: Scope,
) -> Fingerprinter<'a> {
    Fingerprinter {
        config,
        primary_key,
        slug_key: SlugKey::parse(slug_key),
        scope,
    }
}

impl Fingerprinter<'_> {
    /// Resolve the effective scope for `record` without modifying it.
    pub fn resolve_scope(&self, record: &Record) -> Result<ScopeKey, SerializerError> {
        let keys = &self.config.keys;

        let datacenter = self
            .scope
            .datacenter
            .as_deref()
            .or_else(|| get_str(record, &keys.datacenter))
            .filter(|dc| !dc.is_empty())
            .ok_or_else(|| {
                SerializerError::fingerprint_contract(format!(
                    "unable to create fingerprint, missing datacenter (looked in scope and `{}`)",
                    keys.datacenter
                ))
            })?;

        // the record's own tenancy wins over the response-level scope
        let namespace = get_str(record, &keys.namespace)
            .or_else(|| {
                self.scope
                    .namespace
                    .as_deref()
                    .map(|ns| self.config.resolve_wildcard(ns))
            })
            .map(ToString::to_string);
        let partition = get_str(record, &keys.partition)
            .or_else(|| {
                self.scope
                    .partition
                    .as_deref()
                    .map(|ap| self.config.resolve_wildcard(ap))
            })
            .map(ToString::to_string);

        Ok(ScopeKey {
            datacenter: datacenter.to_string(),
            namespace,
            partition,
        })
    }

    /// Compute the fingerprint `record` would receive.
    pub fn compute(&self, record: &Record) -> Result<Fingerprint, SerializerError> {
        let scope = self.resolve_scope(record)?;
        let slugs = self.slug_key.values(record)?;

        Ok(Fingerprint::compute(&scope, &slugs))
    }

    /// Stamp identity and scope fields onto `record`.
    ///
    /// Scope fields are overwritten with the resolved scope: the request
    /// datacenter wins over the record's own `Datacenter`, the record's own
    /// tenancy wins over the request's. An existing string primary key is
    /// kept, so re-stamping is idempotent.
    pub fn apply(&self, mut record: Record) -> Result<Record, SerializerError> {
        let keys = &self.config.keys;
        let scope = self.resolve_scope(&record)?;
        let fingerprint = {
            let slugs = self.slug_key.values(&record)?;
            Fingerprint::compute(&scope, &slugs)
        };

        // stamped scope always equals the hashed scope, so the identity can be
        // recomputed from the record alone
        if let Some(namespace) = scope.namespace {
            record.insert(keys.namespace.clone(), Value::String(namespace));
        }
        if let Some(partition) = scope.partition {
            record.insert(keys.partition.clone(), Value::String(partition));
        }
        record.insert(keys.datacenter.clone(), Value::String(scope.datacenter));

        if get_str(&record, self.primary_key).is_none() {
            record.insert(self.primary_key.to_string(), fingerprint.into());
        }

        Ok(record)
    }
}

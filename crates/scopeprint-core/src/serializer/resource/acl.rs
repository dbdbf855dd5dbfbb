//! ACL resources: tokens, policies, roles, auth methods and binding rules.

use super::plain_resource;
use crate::{
    error::SerializerError,
    lookup::RecordLookup,
    normalize::{
        Links, PolicyLinks, RoleLinks, normalize_links, reconcile_legacy_token, serialize_links,
    },
    obs::NormalizeEvent,
    record::{Record, expect_object, expect_records},
    serializer::{Identity, ResourceKind, ResourceSerializer, ResponseContext},
};
use serde_json::Value;

const TOKEN_LINKS: [&dyn Links; 2] = [&PolicyLinks, &RoleLinks];
const ROLE_LINKS: [&dyn Links; 1] = [&PolicyLinks];

///
/// TokenSerializer
///
/// Tokens link both policies and roles. Updates against older servers come
/// back keyed by the legacy secret `ID`; `lookup` resolves that secret to
/// the stored token so the record keeps its `AccessorID`.
///

#[derive(Clone, Copy)]
pub struct TokenSerializer<'a> {
    lookup: &'a dyn RecordLookup,
}

impl<'a> TokenSerializer<'a> {
    #[must_use]
    pub const fn new(lookup: &'a dyn RecordLookup) -> Self {
        Self { lookup }
    }
}

impl ResourceSerializer for TokenSerializer<'_> {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Token
    }

    fn identity(&self) -> Identity {
        Identity::Fingerprint {
            slug_key: "AccessorID",
        }
    }

    fn shape_query(
        &self,
        _ctx: &ResponseContext<'_>,
        body: Value,
    ) -> Result<Vec<Record>, SerializerError> {
        Ok(expect_records(body, self.kind().model_name())?
            .into_iter()
            .map(|token| normalize_links(token, &TOKEN_LINKS))
            .collect())
    }

    fn shape_record(
        &self,
        _ctx: &ResponseContext<'_>,
        body: Value,
    ) -> Result<Record, SerializerError> {
        let token = expect_object(body, self.kind().model_name())?;

        Ok(normalize_links(token, &TOKEN_LINKS))
    }

    fn shape_create(
        &self,
        _ctx: &ResponseContext<'_>,
        body: Record,
    ) -> Result<Record, SerializerError> {
        Ok(normalize_links(body, &TOKEN_LINKS))
    }

    fn shape_update(
        &self,
        ctx: &ResponseContext<'_>,
        _submitted: &Record,
        body: Record,
    ) -> Result<Record, SerializerError> {
        let reconciled = reconcile_legacy_token(body, self.lookup);
        if reconciled.recovered {
            ctx.sink.record(NormalizeEvent::LegacyIdentityReconciled {
                resource: self.kind().model_name(),
            });
        }

        Ok(normalize_links(reconciled.record, &TOKEN_LINKS))
    }

    fn serialize(&self, record: Record) -> Record {
        let mut record = serialize_links(record, &TOKEN_LINKS);

        // tokens still carrying legacy rules are written through the legacy API
        if record.contains_key("Rules") {
            let secret = record.get("SecretID").cloned().unwrap_or(Value::Null);
            let description = record.get("Description").cloned().unwrap_or(Value::Null);
            record.insert("ID".to_string(), secret);
            record.insert("Name".to_string(), description);
        }

        record
    }
}

plain_resource!(
    /// ACL policies.
    PolicySerializer,
    Policy,
    "ID"
);

///
/// RoleSerializer
///

#[derive(Clone, Copy, Debug, Default)]
pub struct RoleSerializer;

impl ResourceSerializer for RoleSerializer {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Role
    }

    fn identity(&self) -> Identity {
        Identity::Fingerprint { slug_key: "ID" }
    }

    fn shape_query(
        &self,
        _ctx: &ResponseContext<'_>,
        body: Value,
    ) -> Result<Vec<Record>, SerializerError> {
        Ok(expect_records(body, self.kind().model_name())?
            .into_iter()
            .map(|role| normalize_links(role, &ROLE_LINKS))
            .collect())
    }

    fn shape_record(
        &self,
        _ctx: &ResponseContext<'_>,
        body: Value,
    ) -> Result<Record, SerializerError> {
        let role = expect_object(body, self.kind().model_name())?;

        Ok(normalize_links(role, &ROLE_LINKS))
    }

    fn shape_create(
        &self,
        _ctx: &ResponseContext<'_>,
        body: Record,
    ) -> Result<Record, SerializerError> {
        Ok(normalize_links(body, &ROLE_LINKS))
    }

    fn shape_update(
        &self,
        _ctx: &ResponseContext<'_>,
        _submitted: &Record,
        body: Record,
    ) -> Result<Record, SerializerError> {
        Ok(normalize_links(body, &ROLE_LINKS))
    }

    fn serialize(&self, record: Record) -> Record {
        serialize_links(record, &ROLE_LINKS)
    }
}

plain_resource!(
    /// ACL auth methods, unique by name.
    AuthMethodSerializer,
    AuthMethod,
    "Name"
);

plain_resource!(BindingRuleSerializer, BindingRule, "ID");

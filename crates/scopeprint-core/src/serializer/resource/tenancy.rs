//! Tenancy resources: namespaces and admin partitions.

use super::plain_resource;
use crate::{
    error::SerializerError,
    normalize::{TEMPLATE_KEY, TEMPLATE_POLICY},
    record::{Record, expect_object, expect_records},
    serializer::{Identity, ResourceKind, ResourceSerializer, ResponseContext},
};
use serde_json::{Map, Value};

///
/// NamespaceSerializer
///
/// Namespaces carry ACL defaults that the store always expects as lists.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct NamespaceSerializer;

impl ResourceSerializer for NamespaceSerializer {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Namespace
    }

    fn identity(&self) -> Identity {
        Identity::Fingerprint { slug_key: "Name" }
    }

    fn shape_query(
        &self,
        _ctx: &ResponseContext<'_>,
        body: Value,
    ) -> Result<Vec<Record>, SerializerError> {
        Ok(expect_records(body, self.kind().model_name())?
            .into_iter()
            .map(acl_defaults)
            .collect())
    }

    fn shape_record(
        &self,
        _ctx: &ResponseContext<'_>,
        body: Value,
    ) -> Result<Record, SerializerError> {
        let record = expect_object(body, self.kind().model_name())?;

        Ok(acl_defaults(record))
    }

    fn shape_create(
        &self,
        _ctx: &ResponseContext<'_>,
        body: Record,
    ) -> Result<Record, SerializerError> {
        Ok(acl_defaults(body))
    }

    fn shape_update(
        &self,
        _ctx: &ResponseContext<'_>,
        _submitted: &Record,
        body: Record,
    ) -> Result<Record, SerializerError> {
        Ok(acl_defaults(body))
    }
}

// ACLs.PolicyDefaults / ACLs.RoleDefaults always present; policies templated
fn acl_defaults(mut record: Record) -> Record {
    let mut acls = match record.remove("ACLs") {
        Some(Value::Object(acls)) => acls,
        _ => Map::new(),
    };

    let policies = list(acls.remove("PolicyDefaults"))
        .into_iter()
        .map(|policy| match policy {
            Value::Object(mut policy) => {
                policy
                    .entry(TEMPLATE_KEY)
                    .or_insert_with(|| Value::from(TEMPLATE_POLICY));
                Value::Object(policy)
            }
            other => other,
        })
        .collect();
    let roles = list(acls.remove("RoleDefaults"));

    acls.insert("PolicyDefaults".to_string(), Value::Array(policies));
    acls.insert("RoleDefaults".to_string(), Value::Array(roles));
    record.insert("ACLs".to_string(), Value::Object(acls));

    record
}

fn list(value: Option<Value>) -> Vec<Value> {
    match value {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    }
}

plain_resource!(
    /// Admin partitions, unique by name.
    PartitionSerializer,
    Partition,
    "Name"
);

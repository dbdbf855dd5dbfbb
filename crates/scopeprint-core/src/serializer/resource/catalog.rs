//! Catalog resources: nodes, coordinates and datacenters.

use super::{plain_resource, set_default};
use crate::{
    error::SerializerError,
    meta::{ResponseMeta, headers::HEADER_DEFAULT_ACL_POLICY},
    normalize::fill_slug,
    record::{Record, expect_array, expect_object, expect_records, json_kind},
    serializer::{Identity, ResourceKind, ResourceSerializer, ResponseContext},
    versions::node_versions,
};
use serde_json::Value;

///
/// NodeSerializer
///
/// Nodes are keyed by `ID`; agents without one fall back to their `Node` name.
/// Listings also report the distinct agent versions seen.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct NodeSerializer;

impl NodeSerializer {
    const SLUG: &'static str = "ID";
    const SLUG_FALLBACK: &'static str = "Node";
}

impl ResourceSerializer for NodeSerializer {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Node
    }

    fn identity(&self) -> Identity {
        Identity::Fingerprint {
            slug_key: Self::SLUG,
        }
    }

    fn shape_query(
        &self,
        _ctx: &ResponseContext<'_>,
        body: Value,
    ) -> Result<Vec<Record>, SerializerError> {
        Ok(expect_records(body, self.kind().model_name())?
            .into_iter()
            .map(|node| fill_slug(node, Self::SLUG, Self::SLUG_FALLBACK))
            .collect())
    }

    fn shape_record(
        &self,
        _ctx: &ResponseContext<'_>,
        body: Value,
    ) -> Result<Record, SerializerError> {
        let node = expect_object(body, self.kind().model_name())?;

        Ok(fill_slug(node, Self::SLUG, Self::SLUG_FALLBACK))
    }

    fn query_meta(&self, records: &[Record], meta: &mut ResponseMeta) {
        meta.versions = Some(node_versions(records));
    }
}

plain_resource!(
    /// Network coordinates, one per node.
    CoordinateSerializer,
    Coordinate,
    "Node"
);

///
/// DatacenterSerializer
///
/// Datacenter names are globally unique, so they key themselves.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct DatacenterSerializer;

impl DatacenterSerializer {
    const PRIMARY_KEY: &'static str = "Name";
}

impl ResourceSerializer for DatacenterSerializer {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Datacenter
    }

    fn identity(&self) -> Identity {
        Identity::Natural {
            primary_key: Self::PRIMARY_KEY,
        }
    }

    fn shape_query(
        &self,
        _ctx: &ResponseContext<'_>,
        body: Value,
    ) -> Result<Vec<Record>, SerializerError> {
        expect_array(body, self.kind().model_name())?
            .into_iter()
            .map(|item| match item {
                Value::String(name) => {
                    let mut record = Record::new();
                    record.insert(Self::PRIMARY_KEY.to_string(), Value::String(name));
                    Ok(record)
                }
                other => Err(SerializerError::malformed(format!(
                    "{}: expected datacenter name, found {}",
                    self.kind(),
                    json_kind(&other)
                ))),
            })
            .collect()
    }

    fn shape_record(
        &self,
        ctx: &ResponseContext<'_>,
        body: Value,
    ) -> Result<Record, SerializerError> {
        let mut record = match body {
            Value::Null => Record::new(),
            body => expect_object(body, self.kind().model_name())?,
        };

        let name = ctx.query.dc.as_deref().ok_or_else(|| {
            SerializerError::fingerprint_contract(format!(
                "{}: request is missing a datacenter",
                self.kind()
            ))
        })?;
        record.insert(Self::PRIMARY_KEY.to_string(), Value::from(name));
        set_default(
            &mut record,
            "DefaultACLPolicy",
            ctx.headers.get(HEADER_DEFAULT_ACL_POLICY),
        );

        Ok(record)
    }
}

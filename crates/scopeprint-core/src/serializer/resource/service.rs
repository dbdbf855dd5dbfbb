//! Service catalog resources.

use super::{plain_resource, set_default};
use crate::{
    error::SerializerError,
    normalize::{merge_proxies, select_instance},
    record::{Record, expect_object, expect_records, get_path_str},
    serializer::{Identity, ResourceKind, ResourceSerializer, ResponseContext},
};
use serde_json::Value;

///
/// ServiceSerializer
///
/// Service listings mix primaries and their sidecar proxies; each primary
/// learns its proxy from the listing itself.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct ServiceSerializer;

impl ResourceSerializer for ServiceSerializer {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Service
    }

    fn identity(&self) -> Identity {
        Identity::Fingerprint { slug_key: "Name" }
    }

    fn shape_query(
        &self,
        ctx: &ResponseContext<'_>,
        body: Value,
    ) -> Result<Vec<Record>, SerializerError> {
        let records = expect_records(body, self.kind().model_name())?;

        Ok(merge_proxies(records, &ctx.config.proxy_kind))
    }

    /// The record body is the list of instances backing the service; the
    /// service itself is named by the request.
    fn shape_record(
        &self,
        ctx: &ResponseContext<'_>,
        body: Value,
    ) -> Result<Record, SerializerError> {
        let name = ctx.query.require_id()?;
        let nodes = expect_records(body, self.kind().model_name())?;
        let keys = &ctx.config.keys;

        let mut record = Record::new();
        record.insert("Name".to_string(), Value::from(name));
        if let Some(first) = nodes.first() {
            let service_field = |field: &str| get_path_str(first, &format!("Service.{field}"));
            set_default(&mut record, &keys.namespace, service_field("Namespace"));
            set_default(&mut record, &keys.partition, service_field("Partition"));
        }
        record.insert(
            "Nodes".to_string(),
            Value::Array(nodes.into_iter().map(Value::Object).collect()),
        );

        Ok(record)
    }
}

///
/// ServiceInstanceSerializer
///
/// One service registration on one node.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct ServiceInstanceSerializer;

impl ServiceInstanceSerializer {
    pub const PARAM_NODE: &'static str = "node";
    pub const PARAM_SERVICE_ID: &'static str = "serviceId";
}

impl ResourceSerializer for ServiceInstanceSerializer {
    fn kind(&self) -> ResourceKind {
        ResourceKind::ServiceInstance
    }

    fn identity(&self) -> Identity {
        Identity::Fingerprint {
            slug_key: "Node.Node,Service.ID",
        }
    }

    fn shape_record(
        &self,
        ctx: &ResponseContext<'_>,
        body: Value,
    ) -> Result<Record, SerializerError> {
        let resource = self.kind().model_name();
        let records = expect_records(body, resource)?;
        if records.is_empty() {
            return Err(SerializerError::not_found(
                resource,
                "service has no registered instances",
            ));
        }

        let node = ctx.query.require_param(Self::PARAM_NODE)?;
        let service_id = ctx.query.require_param(Self::PARAM_SERVICE_ID)?;
        let mut record = select_instance(records, resource, node, service_id)?;

        // tenancy lives on the nested registration
        let keys = &ctx.config.keys;
        let namespace = get_path_str(&record, "Service.Namespace").map(ToString::to_string);
        let partition = get_path_str(&record, "Service.Partition").map(ToString::to_string);
        set_default(&mut record, &keys.namespace, namespace.as_deref());
        set_default(&mut record, &keys.partition, partition.as_deref());

        Ok(record)
    }
}

plain_resource!(
    /// Sidecar proxy registrations, one per node and target service.
    ProxySerializer,
    Proxy,
    "Node,ServiceID"
);

///
/// TopologySerializer
///

#[derive(Clone, Copy, Debug, Default)]
pub struct TopologySerializer;

impl ResourceSerializer for TopologySerializer {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Topology
    }

    fn identity(&self) -> Identity {
        Identity::Fingerprint {
            slug_key: "ServiceName",
        }
    }

    fn shape_record(
        &self,
        ctx: &ResponseContext<'_>,
        body: Value,
    ) -> Result<Record, SerializerError> {
        let mut record = expect_object(body, self.kind().model_name())?;
        let name = ctx.query.require_id()?;
        record.insert("ServiceName".to_string(), Value::from(name));

        Ok(record)
    }
}

///
/// DiscoveryChainSerializer
///

#[derive(Clone, Copy, Debug, Default)]
pub struct DiscoveryChainSerializer;

impl ResourceSerializer for DiscoveryChainSerializer {
    fn kind(&self) -> ResourceKind {
        ResourceKind::DiscoveryChain
    }

    fn identity(&self) -> Identity {
        Identity::Fingerprint {
            slug_key: "ServiceName",
        }
    }

    fn shape_record(
        &self,
        _ctx: &ResponseContext<'_>,
        body: Value,
    ) -> Result<Record, SerializerError> {
        let mut record = expect_object(body, self.kind().model_name())?;
        let name = get_path_str(&record, "Chain.ServiceName").map(ToString::to_string);
        set_default(&mut record, "ServiceName", name.as_deref());

        Ok(record)
    }
}

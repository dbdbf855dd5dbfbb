//! Policy and role link handling shared by the ACL resources.
//!
//! Tokens carry both policies and roles, roles carry policies. Each concern
//! is one `Links` value; a resource composes the ones it needs.

use crate::record::{Record, get_str};
use serde_json::{Map, Value};

pub const TEMPLATE_KEY: &str = "template";
pub const TEMPLATE_POLICY: &str = "";
pub const TEMPLATE_SERVICE_IDENTITY: &str = "service-identity";
pub const TEMPLATE_NODE_IDENTITY: &str = "node-identity";

///
/// Links
///

pub trait Links {
    /// Reshape inbound link fields into their store form.
    fn normalize(&self, record: Record) -> Record;

    /// Reduce store-form link fields to what the API accepts.
    fn serialize(&self, record: Record) -> Record;
}

/// Run `record` through every link set, in order.
#[must_use]
pub fn normalize_links(record: Record, links: &[&dyn Links]) -> Record {
    links.iter().fold(record, |record, links| links.normalize(record))
}

/// Serialize `record` through every link set, in order.
#[must_use]
pub fn serialize_links(record: Record, links: &[&dyn Links]) -> Record {
    links.iter().fold(record, |record, links| links.serialize(record))
}

///
/// PolicyLinks
///
/// `Policies`, `ServiceIdentities` and `NodeIdentities` fold into one
/// templated `Policies` list in the store.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct PolicyLinks;

impl Links for PolicyLinks {
    fn normalize(&self, mut record: Record) -> Record {
        let mut policies: Vec<Value> = objects(&record, "Policies")
            .map(|policy| {
                let mut policy = policy.clone();
                policy
                    .entry(TEMPLATE_KEY)
                    .or_insert_with(|| Value::from(TEMPLATE_POLICY));
                Value::Object(policy)
            })
            .collect();

        policies.extend(objects(&record, "ServiceIdentities").map(|identity| {
            let mut policy = Map::new();
            policy.insert(TEMPLATE_KEY.into(), Value::from(TEMPLATE_SERVICE_IDENTITY));
            policy.insert("Name".into(), field(identity, "ServiceName"));
            if let Some(dcs) = identity.get("Datacenters") {
                policy.insert("Datacenters".into(), dcs.clone());
            }
            Value::Object(policy)
        }));

        policies.extend(objects(&record, "NodeIdentities").map(|identity| {
            let mut policy = Map::new();
            policy.insert(TEMPLATE_KEY.into(), Value::from(TEMPLATE_NODE_IDENTITY));
            policy.insert("Name".into(), field(identity, "NodeName"));
            policy.insert("Datacenter".into(), field(identity, "Datacenter"));
            Value::Object(policy)
        }));

        record.insert("Policies".into(), Value::Array(policies));
        record
    }

    fn serialize(&self, mut record: Record) -> Record {
        let templated = |template: &str| {
            objects(&record, "Policies")
                .filter(|policy| get_str(policy, TEMPLATE_KEY).unwrap_or(TEMPLATE_POLICY) == template)
                .cloned()
                .collect::<Vec<_>>()
        };

        let services: Vec<Value> = templated(TEMPLATE_SERVICE_IDENTITY)
            .iter()
            .map(|policy| {
                let mut identity = Map::new();
                identity.insert("ServiceName".into(), field(policy, "Name"));
                if let Some(dcs) = policy.get("Datacenters").filter(|dcs| !dcs.is_null()) {
                    identity.insert("Datacenters".into(), dcs.clone());
                }
                Value::Object(identity)
            })
            .collect();

        let nodes: Vec<Value> = templated(TEMPLATE_NODE_IDENTITY)
            .iter()
            .map(|policy| {
                let mut identity = Map::new();
                identity.insert("NodeName".into(), field(policy, "Name"));
                identity.insert("Datacenter".into(), field(policy, "Datacenter"));
                Value::Object(identity)
            })
            .collect();

        let policies: Vec<Value> = templated(TEMPLATE_POLICY).iter().map(id_and_name).collect();

        record.insert("ServiceIdentities".into(), Value::Array(services));
        record.insert("NodeIdentities".into(), Value::Array(nodes));
        record.insert("Policies".into(), Value::Array(policies));
        record
    }
}

///
/// RoleLinks
///

#[derive(Clone, Copy, Debug, Default)]
pub struct RoleLinks;

impl Links for RoleLinks {
    fn normalize(&self, mut record: Record) -> Record {
        let roles: Vec<Value> = objects(&record, "Roles").cloned().map(Value::Object).collect();
        record.insert("Roles".into(), Value::Array(roles));
        record
    }

    fn serialize(&self, mut record: Record) -> Record {
        let roles: Vec<Value> = objects(&record, "Roles").map(id_and_name).collect();
        record.insert("Roles".into(), Value::Array(roles));
        record
    }
}

// object entries of an array field; null or missing reads as empty
fn objects<'a>(record: &'a Record, key: &str) -> impl Iterator<Item = &'a Record> {
    record
        .get(key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_object)
}

fn field(record: &Record, key: &str) -> Value {
    record.get(key).cloned().unwrap_or(Value::Null)
}

fn id_and_name(record: &Record) -> Value {
    let mut out = Map::new();
    out.insert("ID".into(), field(record, "ID"));
    out.insert("Name".into(), field(record, "Name"));
    Value::Object(out)
}

///
/// TESTS
///

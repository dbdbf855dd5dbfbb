use scopeprint::{
    load_config,
    prelude::*,
    resource::{NodeSerializer, PolicySerializer, ServiceInstanceSerializer, SessionSerializer},
};

fn record(value: Value) -> Record {
    match value {
        Value::Object(record) => record,
        other => panic!("fixture is not an object: {other}"),
    }
}

#[test]
fn config_renames_identity_fields() {
    let config = load_config(
        r#"
        [keys]
        primary = "id"
        sync_time = "syncedAt"
        "#,
    )
    .expect("config loads");
    let clock = FixedClock(5);
    let normalizer = Normalizer::new(&config).with_clock(&clock);

    let payload = normalizer
        .query(
            &PolicySerializer,
            &QueryContext::new("dc1"),
            RawResponse::from_body(json!([{"ID": "p1"}])),
        )
        .expect("listing normalizes");

    let policy = &payload.records[0];
    assert_eq!(policy["id"], json!(r#"["dc1","p1"]"#));
    assert_eq!(policy["syncedAt"], json!(5));
    assert!(!policy.contains_key("uid"));
}

#[test]
fn bad_config_maps_to_config_kind() {
    let err = load_config("unknown = 1").expect_err("unknown key");

    assert_eq!(err.kind, ErrorKind::Config);
    assert_eq!(err.origin, ErrorOrigin::Config);
}

#[test]
fn empty_config_value_is_rejected() {
    let err = load_config("wildcard_default = \"\"").expect_err("empty wildcard");

    assert_eq!(err.kind, ErrorKind::Config);
}

#[test]
fn not_found_keeps_its_descriptor() {
    let config = SerializerConfig::default();
    let err: Error = Normalizer::new(&config)
        .query_record(
            &SessionSerializer,
            &QueryContext::new("dc1"),
            RawResponse::from_body(json!([])),
        )
        .map_err(Error::from)
        .expect_err("empty session list");

    assert!(err.is_not_found());
    let ErrorKind::NotFound(descriptor) = &err.kind else {
        panic!("expected not found, got {:?}", err.kind);
    };
    assert_eq!(descriptor.status, "404");
    assert_eq!(descriptor.title, "Not found");
    assert_eq!(descriptor.resource, "session");
}

#[test]
fn missing_request_parameter_is_a_contract_error() {
    let config = SerializerConfig::default();
    let err: Error = Normalizer::new(&config)
        .query_record(
            &ServiceInstanceSerializer,
            &QueryContext::new("dc1"),
            RawResponse::from_body(json!([{"Node": {"Node": "n1"}, "Service": {"ID": "web"}}])),
        )
        .map_err(Error::from)
        .expect_err("no node parameter");

    assert_eq!(err.kind, ErrorKind::Contract);
    assert_eq!(err.origin, ErrorOrigin::Serializer);
}

#[test]
fn listed_identity_is_reused_on_delete() {
    let config = SerializerConfig::default();
    let mut headers = HeaderMap::new();
    headers
        .insert("X-CONSUL-PARTITION", "eu")
        .expect("valid header");

    let normalizer = Normalizer::new(&config);

    let payload = normalizer
        .query(
            &NodeSerializer,
            &QueryContext::new("dc1"),
            RawResponse::new(headers, json!([{"ID": "n-1", "Node": "node-1"}])),
        )
        .expect("listing normalizes");
    let listed = payload.records[0].clone();

    let deleted = normalizer
        .delete(&NodeSerializer, &listed, RawResponse::default())
        .expect("delete projection");

    assert_eq!(deleted.len(), 1);
    assert_eq!(deleted["uid"], listed["uid"]);
    assert_eq!(listed["uid"], json!(r#"["eu",null,"dc1","n-1"]"#));
}

#[test]
fn malformed_body_maps_to_malformed_kind() {
    let config = SerializerConfig::default();
    let err: Error = Normalizer::new(&config)
        .query(
            &PolicySerializer,
            &QueryContext::new("dc1"),
            RawResponse::from_body(json!("not a list")),
        )
        .map_err(Error::from)
        .expect_err("string body");

    assert_eq!(err.kind, ErrorKind::Malformed);
    assert_eq!(err.origin, ErrorOrigin::Normalize);
    assert!(!err.message.is_empty());
}

#[test]
fn errors_serialize_for_callers() {
    let err = Error::new(ErrorKind::Malformed, ErrorOrigin::Normalize, "bad body");
    let value = serde_json::to_value(&err).expect("error serializes");

    assert_eq!(
        value,
        json!({"kind": "Malformed", "origin": "Normalize", "message": "bad body"})
    );
    assert_eq!(record(value.clone()).len(), 3);
    assert_eq!(err.to_string(), "bad body");
}

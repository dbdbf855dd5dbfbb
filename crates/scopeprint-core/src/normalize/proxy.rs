use crate::record::{Record, get_str};
use serde_json::Value;
use std::collections::BTreeMap;

/// Attach every sidecar proxy onto the services it proxies.
///
/// Services and proxies arrive in one list. Non-proxy records are indexed by
/// `Name`; each proxy is copied onto `Proxy` of every service named in its
/// `ProxyFor`. Names with no matching service are ignored. The list keeps
/// every record, proxies included, in its original order.
#[must_use]
pub fn merge_proxies(mut records: Vec<Record>, proxy_kind: &str) -> Vec<Record> {
    let is_proxy = |record: &Record| get_str(record, "Kind") == Some(proxy_kind);

    let services: BTreeMap<String, usize> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| !is_proxy(record))
        .filter_map(|(pos, record)| get_str(record, "Name").map(|name| (name.to_string(), pos)))
        .collect();

    let mut attachments = Vec::new();
    for proxy in records.iter().filter(|record| is_proxy(record)) {
        let Some(targets) = proxy.get("ProxyFor").and_then(Value::as_array) else {
            continue;
        };

        for target in targets.iter().filter_map(Value::as_str) {
            if let Some(&pos) = services.get(target) {
                attachments.push((pos, proxy.clone()));
            }
        }
    }

    for (pos, proxy) in attachments {
        records[pos].insert("Proxy".to_string(), Value::Object(proxy));
    }

    records
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::expect_records;
    use serde_json::json;

    fn records(value: Value) -> Vec<Record> {
        expect_records(value, "service").expect("records")
    }

    #[test]
    fn proxy_attaches_only_to_named_service() {
        let proxy = json!({"Name": "web-sidecar-proxy", "Kind": "connect-proxy", "ProxyFor": ["web"]});
        let out = merge_proxies(
            records(json!([{"Name": "web"}, {"Name": "db"}, proxy.clone()])),
            "connect-proxy",
        );

        assert_eq!(out.len(), 3);
        assert_eq!(out[0]["Proxy"], proxy);
        assert!(!out[1].contains_key("Proxy"));
        assert!(!out[2].contains_key("Proxy"));
    }

    #[test]
    fn one_proxy_can_serve_many_services() {
        let out = merge_proxies(
            records(json!([
                {"Name": "shared", "Kind": "connect-proxy", "ProxyFor": ["api", "web"]},
                {"Name": "web"},
                {"Name": "api"},
            ])),
            "connect-proxy",
        );

        assert_eq!(out[1]["Proxy"]["Name"], json!("shared"));
        assert_eq!(out[2]["Proxy"]["Name"], json!("shared"));
    }

    #[test]
    fn unknown_targets_and_missing_proxy_for_are_ignored() {
        let input = records(json!([
            {"Name": "web"},
            {"Name": "p1", "Kind": "connect-proxy", "ProxyFor": ["ghost"]},
            {"Name": "p2", "Kind": "connect-proxy"},
            {"Name": "p3", "Kind": "connect-proxy", "ProxyFor": null},
        ]));
        let out = merge_proxies(input.clone(), "connect-proxy");

        assert_eq!(out, input);
    }

    #[test]
    fn proxies_never_attach_to_other_proxies() {
        let out = merge_proxies(
            records(json!([
                {"Name": "web", "Kind": "connect-proxy", "ProxyFor": []},
                {"Name": "p", "Kind": "connect-proxy", "ProxyFor": ["web"]},
            ])),
            "connect-proxy",
        );

        assert!(out.iter().all(|record| !record.contains_key("Proxy")));
    }
}

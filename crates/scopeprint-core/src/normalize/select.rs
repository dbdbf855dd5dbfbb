use crate::{
    error::SerializerError,
    record::{Record, get_path_str},
};

/// Take the first record satisfying `predicate`; no match is a hard not-found.
pub fn select_first(
    records: Vec<Record>,
    resource: &str,
    predicate: impl Fn(&Record) -> bool,
) -> Result<Record, SerializerError> {
    records
        .into_iter()
        .find(|record| predicate(record))
        .ok_or_else(|| SerializerError::not_found(resource, "no record matched the request"))
}

/// Resolve one service instance by `(Node.Node, Service.ID)`.
pub fn select_instance(
    records: Vec<Record>,
    resource: &str,
    node: &str,
    service_id: &str,
) -> Result<Record, SerializerError> {
    select_first(records, resource, |record| {
        get_path_str(record, "Node.Node") == Some(node)
            && get_path_str(record, "Service.ID") == Some(service_id)
    })
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::expect_records;
    use serde_json::json;

    fn instances() -> Vec<Record> {
        expect_records(
            json!([
                {"Node": {"Node": "n1"}, "Service": {"ID": "s1"}},
                {"Node": {"Node": "n2"}, "Service": {"ID": "s2"}},
                {"Node": {"Node": "n2"}, "Service": {"ID": "s3"}},
            ]),
            "service-instance",
        )
        .expect("records")
    }

    #[test]
    fn selects_the_matching_instance() {
        let found = select_instance(instances(), "service-instance", "n2", "s2").expect("match");

        assert_eq!(get_path_str(&found, "Node.Node"), Some("n2"));
        assert_eq!(get_path_str(&found, "Service.ID"), Some("s2"));
    }

    #[test]
    fn both_fields_must_match() {
        let err = select_instance(instances(), "service-instance", "n1", "s2").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn empty_list_is_not_found() {
        let err = select_instance(Vec::new(), "service-instance", "n1", "s1").unwrap_err();

        let descriptor = err.not_found_descriptor().expect("descriptor");
        assert_eq!(descriptor.status, "404");
        assert_eq!(descriptor.resource, "service-instance");
    }
}

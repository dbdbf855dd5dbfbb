use crate::{
    lookup::RecordLookup,
    record::{Record, get_str, is_absent},
};
use serde_json::Value;

///
/// Reconciled
/// Outcome of a legacy identity reconciliation.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Reconciled {
    pub record: Record,

    /// True when the modern identity was recovered from a stored record.
    pub recovered: bool,
}

/// Map a legacy token update response onto the modern identity.
///
/// Older servers answer token updates with only the legacy `ID` (the secret).
/// The stored token holding that secret supplies `AccessorID`, so the record
/// keeps its identity instead of being minted a new one. Unknown secrets are
/// left as-is. A null `Policies` reads as empty.
#[must_use]
pub fn reconcile_legacy_token(mut body: Record, lookup: &dyn RecordLookup) -> Reconciled {
    if is_absent(&body, "Policies") {
        body.insert("Policies".to_string(), Value::Array(Vec::new()));
    }

    let Some(secret) = get_str(&body, "ID").map(ToString::to_string) else {
        return Reconciled {
            record: body,
            recovered: false,
        };
    };

    let accessor = lookup
        .find_by("SecretID", &secret)
        .and_then(|known| get_str(known, "AccessorID"))
        .map(ToString::to_string);

    let Some(accessor) = accessor else {
        return Reconciled {
            record: body,
            recovered: false,
        };
    };

    body.insert("SecretID".to_string(), Value::String(secret));
    body.insert("AccessorID".to_string(), Value::String(accessor));

    Reconciled {
        record: body,
        recovered: true,
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        lookup::NoLookup,
        record::{expect_object, expect_records},
    };
    use serde_json::json;

    fn stored() -> Vec<Record> {
        expect_records(
            json!([
                {"AccessorID": "acc-1", "SecretID": "sec-1"},
                {"AccessorID": "acc-2", "SecretID": "sec-2"},
            ]),
            "token",
        )
        .expect("records")
    }

    #[test]
    fn legacy_id_recovers_accessor_from_store() {
        let body = expect_object(json!({"ID": "sec-2", "Name": "old"}), "token").expect("object");
        let out = reconcile_legacy_token(body, &stored());

        assert!(out.recovered);
        assert_eq!(out.record["AccessorID"], json!("acc-2"));
        assert_eq!(out.record["SecretID"], json!("sec-2"));
        assert_eq!(out.record["Policies"], json!([]));
    }

    #[test]
    fn unknown_secret_is_left_alone() {
        let body = expect_object(json!({"ID": "sec-9"}), "token").expect("object");
        let out = reconcile_legacy_token(body, &stored());

        assert!(!out.recovered);
        assert!(!out.record.contains_key("AccessorID"));
    }

    #[test]
    fn modern_body_passes_through() {
        let body = expect_object(
            json!({"AccessorID": "acc-1", "SecretID": "sec-1", "Policies": [{"ID": "p"}]}),
            "token",
        )
        .expect("object");
        let out = reconcile_legacy_token(body.clone(), &NoLookup);

        assert!(!out.recovered);
        assert_eq!(out.record, body);
    }
}

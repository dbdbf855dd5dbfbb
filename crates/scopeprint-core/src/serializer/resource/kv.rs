use crate::{
    error::SerializerError,
    record::{Record, expect_array, expect_first, json_kind},
    serializer::{Identity, ResourceKind, ResourceSerializer, ResponseContext},
};
use serde_json::Value;

///
/// KvSerializer
///
/// Key listings are bare key strings; a single key answers with a
/// one-element list.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct KvSerializer;

impl ResourceSerializer for KvSerializer {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Kv
    }

    fn identity(&self) -> Identity {
        Identity::Fingerprint { slug_key: "Key" }
    }

    fn shape_query(
        &self,
        _ctx: &ResponseContext<'_>,
        body: Value,
    ) -> Result<Vec<Record>, SerializerError> {
        expect_array(body, self.kind().model_name())?
            .into_iter()
            .map(|item| match item {
                Value::String(key) => {
                    let mut record = Record::new();
                    record.insert("Key".to_string(), Value::String(key));
                    Ok(record)
                }
                other => Err(SerializerError::malformed(format!(
                    "{}: expected key string, found {}",
                    self.kind(),
                    json_kind(&other)
                ))),
            })
            .collect()
    }

    fn shape_record(
        &self,
        _ctx: &ResponseContext<'_>,
        body: Value,
    ) -> Result<Record, SerializerError> {
        expect_first(body, self.kind().model_name())
    }
}

///
/// SessionSerializer
///

#[derive(Clone, Copy, Debug, Default)]
pub struct SessionSerializer;

impl ResourceSerializer for SessionSerializer {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Session
    }

    fn identity(&self) -> Identity {
        Identity::Fingerprint { slug_key: "ID" }
    }

    fn shape_record(
        &self,
        _ctx: &ResponseContext<'_>,
        body: Value,
    ) -> Result<Record, SerializerError> {
        expect_first(body, self.kind().model_name())
    }
}

use crate::{
    error::SerializerError,
    normalize::{UriEncoder, intention_id},
    record::{Record, expect_object, expect_records},
    serializer::{Identity, ResourceKind, ResourceSerializer, ResponseContext},
};
use serde_json::Value;

///
/// IntentionSerializer
///
/// Intentions are identified by their escaped source/destination tuple. The
/// server's own `ID` survives as `LegacyID`.
///

#[derive(Clone, Copy)]
pub struct IntentionSerializer<'a> {
    encoder: &'a dyn UriEncoder,
}

impl<'a> IntentionSerializer<'a> {
    #[must_use]
    pub const fn new(encoder: &'a dyn UriEncoder) -> Self {
        Self { encoder }
    }
}

impl ResourceSerializer for IntentionSerializer<'_> {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Intention
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
            .map(|mut intention| {
                let id = intention_id(&intention, self.encoder);
                intention.insert("ID".to_string(), Value::String(id));
                intention
            })
            .collect())
    }

    fn shape_record(
        &self,
        ctx: &ResponseContext<'_>,
        body: Value,
    ) -> Result<Record, SerializerError> {
        let record = expect_object(body, self.kind().model_name())?;
        let id = ctx.query.require_id()?;

        Ok(with_legacy_id(record, Value::from(id)))
    }

    fn shape_update(
        &self,
        _ctx: &ResponseContext<'_>,
        submitted: &Record,
        body: Record,
    ) -> Result<Record, SerializerError> {
        let id = submitted.get("ID").cloned().unwrap_or(Value::Null);

        Ok(with_legacy_id(body, id))
    }
}

fn with_legacy_id(mut record: Record, id: Value) -> Record {
    let legacy = record.remove("ID").unwrap_or(Value::Null);
    record.insert("LegacyID".to_string(), legacy);
    record.insert("ID".to_string(), id);

    record
}

//! Module: config
//! Responsibility: record field naming and normalization switches.
//! Does not own: header names (fixed wire contract, see `meta::headers`).

use crate::error::SerializerError;
use serde::{Deserialize, Serialize};

///
/// FieldKeys
///
/// Record field names the serializers write identity and scope into.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldKeys {
    pub primary: String,
    pub datacenter: String,
    pub namespace: String,
    pub partition: String,
    pub sync_time: String,
}

impl Default for FieldKeys {
    fn default() -> Self {
        Self {
            primary: "uid".to_string(),
            datacenter: "Datacenter".to_string(),
            namespace: "Namespace".to_string(),
            partition: "Partition".to_string(),
            sync_time: "SyncTime".to_string(),
        }
    }
}

///
/// SerializerConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SerializerConfig {
    pub keys: FieldKeys,

    /// Tenancy value stamped onto records listed under the `*` wildcard.
    pub wildcard_default: String,

    /// `Kind` marker identifying sidecar proxy records in service listings.
    pub proxy_kind: String,

    pub debug: bool,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self {
            keys: FieldKeys::default(),
            wildcard_default: "default".to_string(),
            proxy_kind: "connect-proxy".to_string(),
            debug: false,
        }
    }
}

impl SerializerConfig {
    /// Parse a TOML document; missing tables and keys fall back to defaults.
    pub fn from_toml_str(input: &str) -> Result<Self, SerializerError> {
        let config: Self = toml::from_str(input)
            .map_err(|err| SerializerError::config(format!("invalid serializer config: {err}")))?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), SerializerError> {
        let keys = [
            ("keys.primary", &self.keys.primary),
            ("keys.datacenter", &self.keys.datacenter),
            ("keys.namespace", &self.keys.namespace),
            ("keys.partition", &self.keys.partition),
            ("keys.sync_time", &self.keys.sync_time),
            ("wildcard_default", &self.wildcard_default),
            ("proxy_kind", &self.proxy_kind),
        ];

        for (name, value) in keys {
            if value.is_empty() {
                return Err(SerializerError::config(format!("{name} must not be empty")));
            }
        }

        Ok(())
    }

    /// Map a wildcard tenancy value onto the configured default.
    #[must_use]
    pub fn resolve_wildcard<'a>(&'a self, value: &'a str) -> &'a str {
        if value == "*" {
            &self.wildcard_default
        } else {
            value
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorClass, ErrorOrigin};

    #[test]
    fn empty_document_yields_defaults() {
        let config = SerializerConfig::from_toml_str("").expect("config");
        assert_eq!(config, SerializerConfig::default());
        assert_eq!(config.keys.primary, "uid");
    }

    #[test]
    fn partial_keys_table_keeps_other_defaults() {
        let config = SerializerConfig::from_toml_str(
            r#"
            debug = true

            [keys]
            primary = "id"
            "#,
        )
        .expect("config");

        assert!(config.debug);
        assert_eq!(config.keys.primary, "id");
        assert_eq!(config.keys.datacenter, "Datacenter");
        assert_eq!(config.wildcard_default, "default");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = SerializerConfig::from_toml_str("colour = \"blue\"").unwrap_err();
        assert_eq!(err.origin, ErrorOrigin::Config);
        assert_eq!(err.class, ErrorClass::ContractViolation);
    }

    #[test]
    fn empty_key_names_are_rejected() {
        let err = SerializerConfig::from_toml_str("[keys]\nprimary = \"\"").unwrap_err();
        assert!(err.message.contains("keys.primary"));
    }

    #[test]
    fn wildcard_resolves_to_default() {
        let config = SerializerConfig::default();
        assert_eq!(config.resolve_wildcard("*"), "default");
        assert_eq!(config.resolve_wildcard("team-a"), "team-a");
    }
}

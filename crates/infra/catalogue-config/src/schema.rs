//! JSON Schema for `catalogue.json`, generated with schemars.

use crate::types::CatalogueSettings;
use schemars::{Schema, generate::SchemaSettings};

/// Generate the JSON Schema for [`CatalogueSettings`].
pub fn schema() -> Schema {
    SchemaSettings::default()
        .into_generator()
        .into_root_schema_for::<CatalogueSettings>()
}

/// Generate the JSON Schema as a pretty-printed JSON string.
pub fn schema_json_pretty() -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(&schema())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> jsonschema::Validator {
        jsonschema::validator_for(&serde_json::to_value(schema()).unwrap()).unwrap()
    }

    #[test]
    fn schema_never_mentions_token() {
        let json = schema_json_pretty().unwrap();
        assert!(!json.contains("\"token\""));
    }

    #[test]
    fn default_config_validates() {
        let config_json = serde_json::to_value(CatalogueSettings::default()).unwrap();
        assert!(validator().validate(&config_json).is_ok());
    }

    #[test]
    fn partial_config_validates() {
        let config_json = serde_json::json!({
            "auth": {"store": "file"},
            "search": {"doc_only": "uncapped"}
        });
        assert!(validator().validate(&config_json).is_ok());
    }

    #[test]
    fn unknown_store_kind_is_rejected() {
        let config_json = serde_json::json!({"auth": {"store": "vault"}});
        assert!(validator().validate(&config_json).is_err());
    }
}

//! JSON Schema for options documents.
//!
//! The flattened override lists appear as top-level properties, matching
//! what [`DeleteOptions::from_json_str`](crate::DeleteOptions::from_json_str)
//! accepts.

use crate::options::OptionsConfig;
use schemars::{Schema, generate::SchemaSettings};

/// Schema of an [`OptionsConfig`] document.
pub fn schema() -> Schema {
    SchemaSettings::default()
        .into_generator()
        .into_root_schema_for::<OptionsConfig>()
}

/// [`schema`] rendered as indented JSON.
pub fn schema_json_pretty() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&schema())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validator() -> jsonschema::Validator {
        let rendered = schema_json_pretty().unwrap();
        let schema: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        jsonschema::validator_for(&schema).unwrap()
    }

    #[test]
    fn test_override_lists_are_top_level_properties() {
        let schema = serde_json::to_value(schema()).unwrap();
        let props = &schema["properties"];
        for field in ["loose", "recursive", "arrays", "maps", "sets", "weakMaps", "weakSets"] {
            assert!(props.get(field).is_some(), "{field} not in schema");
        }
    }

    #[test]
    fn test_accepted_documents_match_the_schema() {
        let validator = validator();
        assert!(validator.is_valid(&json!({})));
        assert!(validator.is_valid(&json!({"recursive": true, "weakMaps": ["Cache"]})));
        let written = serde_json::to_value(OptionsConfig::default()).unwrap();
        assert!(validator.is_valid(&written));
    }

    #[test]
    fn test_mistyped_documents_do_not_match() {
        let validator = validator();
        assert!(!validator.is_valid(&json!({"recursive": "yes"})));
        assert!(!validator.is_valid(&json!({"sets": "Tags"})));
    }
}

//! Configuration management for the rename-keys node
//!
//! Handles parsing the node configuration from an untyped document handed
//! over by a host, and loading it from YAML or JSON files.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Error reading the configuration file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Error parsing a YAML configuration file
    #[error("Failed to parse YAML config: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Error mapping a document onto the configuration shape
    #[error("Failed to parse JSON config: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Configuration document has the wrong overall shape
    #[error("Invalid configuration: {0}")]
    ShapeError(String),
}

/// Rename-keys node configuration
///
/// Field names follow the camelCase layout used by rule-chain documents:
///
/// ```yaml
/// renameKeysMapping:
///   temp: temperature
/// fromMetadata: false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameKeysConfig {
    /// Old key -> new key
    #[serde(default = "default_rename_keys_mapping")]
    pub rename_keys_mapping: HashMap<String, String>,

    /// Rename metadata entries instead of payload fields
    #[serde(default)]
    pub from_metadata: bool,
}

fn default_rename_keys_mapping() -> HashMap<String, String> {
    HashMap::from([("temp".to_string(), "temperature".to_string())])
}

impl Default for RenameKeysConfig {
    fn default() -> Self {
        Self {
            rename_keys_mapping: default_rename_keys_mapping(),
            from_metadata: false,
        }
    }
}

impl RenameKeysConfig {
    /// Create a configuration from an explicit mapping
    pub fn new<I, K, V>(mapping: I, from_metadata: bool) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            rename_keys_mapping: mapping
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            from_metadata,
        }
    }

    /// Parse the configuration from an untyped document
    ///
    /// Absent fields take their defaults and a `null` document yields the
    /// default configuration. Anything that is not an object, or whose fields
    /// have the wrong types, is rejected.
    ///
    /// # Errors
    /// Returns `ConfigError::ShapeError` for a non-object root and
    /// `ConfigError::JsonError` for mistyped fields
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(_) => Ok(serde_json::from_value(value)?),
            other => Err(ConfigError::ShapeError(format!(
                "expected an object, found {}",
                json_type_name(&other)
            ))),
        }
    }

    /// Convert the configuration back into its untyped document form
    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "renameKeysMapping": self.rename_keys_mapping,
            "fromMetadata": self.from_metadata,
        })
    }

    /// Load configuration from a YAML or JSON file
    ///
    /// Files ending in `.json` are read as JSON, everything else as YAML
    /// (YAML being a superset of JSON for these documents).
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    ///
    /// # Note
    /// - If the file doesn't exist, returns `ConfigError::ReadError`
    /// - Use `RenameKeysConfig::load_or_default()` to fall back to defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let document: Value = if is_json {
            serde_json::from_str(&contents)?
        } else {
            serde_yaml::from_str(&contents)?
        };

        Self::from_value(document)
    }

    /// Load configuration from a file, falling back to defaults if not found
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::warn!(
                path = %path.display(),
                "Config file not found, using defaults"
            );
            return Ok(Self::default());
        }

        Self::load(path)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = RenameKeysConfig::default();
        assert_eq!(
            config.rename_keys_mapping,
            HashMap::from([("temp".to_string(), "temperature".to_string())])
        );
        assert!(!config.from_metadata);
    }

    #[test]
    fn test_from_value_full() {
        let config = RenameKeysConfig::from_value(json!({
            "renameKeysMapping": {"TestKey_1": "Attribute_1", "TestKey_2": "Attribute_2"},
            "fromMetadata": true
        }))
        .unwrap();

        assert_eq!(config.rename_keys_mapping.len(), 2);
        assert_eq!(config.rename_keys_mapping["TestKey_1"], "Attribute_1");
        assert!(config.from_metadata);
    }

    #[test]
    fn test_from_value_applies_defaults() {
        let config = RenameKeysConfig::from_value(json!({"fromMetadata": true})).unwrap();
        assert_eq!(config.rename_keys_mapping["temp"], "temperature");
        assert!(config.from_metadata);

        let config = RenameKeysConfig::from_value(json!({})).unwrap();
        assert_eq!(config, RenameKeysConfig::default());

        let config = RenameKeysConfig::from_value(Value::Null).unwrap();
        assert_eq!(config, RenameKeysConfig::default());
    }

    #[test]
    fn test_from_value_empty_mapping_is_legal() {
        let config = RenameKeysConfig::from_value(json!({"renameKeysMapping": {}})).unwrap();
        assert!(config.rename_keys_mapping.is_empty());
    }

    #[test]
    fn test_from_value_ignores_unknown_fields() {
        let config = RenameKeysConfig::from_value(json!({"description": "x"})).unwrap();
        assert_eq!(config, RenameKeysConfig::default());
    }

    #[test]
    fn test_from_value_wrong_types() {
        let err = RenameKeysConfig::from_value(json!({"fromMetadata": "yes"})).unwrap_err();
        assert!(matches!(err, ConfigError::JsonError(_)));

        let err =
            RenameKeysConfig::from_value(json!({"renameKeysMapping": ["temp"]})).unwrap_err();
        assert!(matches!(err, ConfigError::JsonError(_)));

        let err =
            RenameKeysConfig::from_value(json!({"renameKeysMapping": {"temp": 1}})).unwrap_err();
        assert!(matches!(err, ConfigError::JsonError(_)));
    }

    #[test]
    fn test_from_value_non_object_root() {
        let err = RenameKeysConfig::from_value(json!([{"temp": "t"}, true])).unwrap_err();
        assert!(matches!(err, ConfigError::ShapeError(_)));
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn test_to_value_round_trips() {
        let config = RenameKeysConfig::new([("a", "b")], true);
        let parsed = RenameKeysConfig::from_value(config.to_value()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_load_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "renameKeysMapping:\n  hum: humidity\nfromMetadata: true").unwrap();

        let config = RenameKeysConfig::load(file.path()).unwrap();
        assert_eq!(config.rename_keys_mapping["hum"], "humidity");
        assert!(config.from_metadata);
    }

    #[test]
    fn test_load_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"renameKeysMapping": {{"hum": "humidity"}}}}"#).unwrap();

        let config = RenameKeysConfig::load(file.path()).unwrap();
        assert_eq!(config.rename_keys_mapping["hum"], "humidity");
        assert!(!config.from_metadata);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = RenameKeysConfig::load_or_default("/nonexistent/rename-keys.yaml").unwrap();
        assert_eq!(config, RenameKeysConfig::default());
    }

    #[test]
    fn test_load_missing_file_fails() {
        let err = RenameKeysConfig::load("/nonexistent/rename-keys.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::ReadError(_)));
    }
}

//! OpenAPI document loading.
//!
//! Only `components.schemas` is read. Documents are expected to be fully
//! materialized: a schema that still carries `$ref` is rejected by the
//! lowering engine.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use oas2tf_core::Schema;

/// The parts of an OpenAPI document the generator reads.
#[derive(Debug, Default, Deserialize)]
pub struct Document {
    /// Reusable components.
    #[serde(default)]
    pub components: Option<Components>,
}

/// Components section containing reusable schemas.
#[derive(Debug, Default, Deserialize)]
pub struct Components {
    /// Named schemas in document order.
    #[serde(default)]
    pub schemas: IndexMap<String, Schema>,
}

impl Document {
    /// Read a document, choosing YAML or JSON by file extension.
    pub fn load(path: &Path) -> Result<Self, String> {
        let contents = fs::read_to_string(path)
            .map_err(|err| format!("Failed to read {}: {err}", path.display()))?;

        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

        if is_yaml {
            Self::from_yaml(&contents)
        } else {
            Self::from_json(&contents)
        }
        .map_err(|err| format!("{}: {err}", path.display()))
    }

    /// Parse a JSON document.
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Failed to parse OpenAPI document: {e}"))
    }

    /// Parse a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        serde_yaml::from_str(yaml).map_err(|e| format!("Failed to parse OpenAPI document: {e}"))
    }

    /// Component schemas in document order.
    pub fn schemas(&self) -> Option<&IndexMap<String, Schema>> {
        self.components.as_ref().map(|c| &c.schemas)
    }

    /// Look up a component schema by name.
    pub fn schema(&self, name: &str) -> Result<&Schema, String> {
        self.schemas()
            .and_then(|schemas| schemas.get(name))
            .ok_or_else(|| format!("Schema '{name}' not found in components.schemas"))
    }
}

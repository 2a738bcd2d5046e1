//! OpenAPI schema structs for serde deserialization.
//!
//! This is the in-memory document model the lowering engine reads. Only the
//! keywords that influence attribute shape are modelled; everything else in a
//! schema object is ignored on deserialization. References are expected to be
//! resolved before a tree reaches this crate, `$ref` is kept only so that a
//! leftover pointer can be reported instead of silently lowered.

use indexmap::IndexMap;
use serde::Deserialize;

/// JSON Schema definition used in OpenAPI.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// The type of the schema (string, number, integer, boolean, object, array).
    #[serde(rename = "type")]
    pub schema_type: Option<SchemaType>,

    /// Format hint (e.g., int64, double, password).
    pub format: Option<String>,

    /// Human readable description, copied verbatim onto attributes.
    pub description: Option<String>,

    /// Properties for object types, in declaration order.
    pub properties: Option<IndexMap<String, Schema>>,

    /// Required property names for object types.
    pub required: Option<Vec<String>>,

    /// Additional properties for object types (map types).
    pub additional_properties: Option<AdditionalProperties>,

    /// Item schema for array types.
    pub items: Option<Box<Schema>>,

    /// Set semantics for array types.
    pub unique_items: Option<bool>,

    /// Value is assigned by the server and never sent by clients.
    pub read_only: Option<bool>,

    /// Value is sent by clients and never returned by the server.
    pub write_only: Option<bool>,

    /// Default value for the schema.
    pub default: Option<serde_json::Value>,

    /// Unresolved reference to another schema.
    #[serde(rename = "$ref")]
    pub ref_path: Option<String>,
}

/// Schema type can be a single type or an array of types (for nullable).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SchemaType {
    /// `"type": "string"`
    Single(String),
    /// `"type": ["string", "null"]`
    Multiple(Vec<String>),
}

/// Additional properties can be a boolean or a schema.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    /// `additionalProperties: true | false`
    Bool(bool),
    /// `additionalProperties: { ... }`
    Schema(Box<Schema>),
}

impl SchemaType {
    /// All declared tags, in declaration order.
    pub fn tags(&self) -> Vec<&str> {
        match self {
            SchemaType::Single(t) => vec![t.as_str()],
            SchemaType::Multiple(types) => types.iter().map(String::as_str).collect(),
        }
    }
}

impl Schema {
    /// Schema with a single declared type tag.
    pub fn typed(tag: &str) -> Self {
        Self {
            schema_type: Some(SchemaType::Single(tag.to_string())),
            ..Self::default()
        }
    }

    /// Set the format hint.
    pub fn with_format(mut self, format: &str) -> Self {
        self.format = Some(format.to_string());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Append a property, keeping declaration order.
    pub fn with_property(mut self, name: &str, schema: Schema) -> Self {
        self.properties
            .get_or_insert_with(IndexMap::new)
            .insert(name.to_string(), schema);
        self
    }

    /// Replace the required name list.
    pub fn with_required(mut self, names: &[&str]) -> Self {
        self.required = Some(names.iter().map(|n| (*n).to_string()).collect());
        self
    }

    /// Set an additional-properties schema.
    pub fn with_additional_properties(mut self, schema: Schema) -> Self {
        self.additional_properties = Some(AdditionalProperties::Schema(Box::new(schema)));
        self
    }

    /// Set the items schema.
    pub fn with_items(mut self, schema: Schema) -> Self {
        self.items = Some(Box::new(schema));
        self
    }
}

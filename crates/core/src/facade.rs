//! Read-only view over a [`Schema`] with normalized accessors.
//!
//! The raw model allows several spellings for the same shape (type lists with
//! `null`, `additionalProperties: false`, empty `properties`). The facade folds
//! them into one answer per question so the classifier and the lowering engine
//! never look at raw keywords. Failures are plain messages; the caller adds
//! the attribute path.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::schema::{AdditionalProperties, Schema};

/// Non-null JSON Schema type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// `string`
    String,
    /// `integer`
    Integer,
    /// `number`
    Number,
    /// `boolean`
    Boolean,
    /// `array`
    Array,
    /// `object`
    Object,
}

impl TypeTag {
    /// Parse a declared tag (`null` is handled by the caller).
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "string" => Some(TypeTag::String),
            "integer" => Some(TypeTag::Integer),
            "number" => Some(TypeTag::Number),
            "boolean" => Some(TypeTag::Boolean),
            "array" => Some(TypeTag::Array),
            "object" => Some(TypeTag::Object),
            _ => None,
        }
    }

    /// Tag as written in the document.
    pub fn as_str(self) -> &'static str {
        match self {
            TypeTag::String => "string",
            TypeTag::Integer => "integer",
            TypeTag::Number => "number",
            TypeTag::Boolean => "boolean",
            TypeTag::Array => "array",
            TypeTag::Object => "object",
        }
    }
}

/// Borrowed view of one schema node.
#[derive(Debug, Clone, Copy)]
pub struct SchemaNode<'a> {
    schema: &'a Schema,
}

impl<'a> SchemaNode<'a> {
    /// Wrap a schema node.
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    /// The wrapped schema.
    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    /// Unresolved `$ref` target, if the node is still a pointer.
    pub fn reference(&self) -> Option<&'a str> {
        self.schema.ref_path.as_deref()
    }

    /// Fail when the node is still a `$ref` pointer.
    pub fn ensure_resolved(&self) -> Result<(), String> {
        match self.reference() {
            Some(reference) => Err(format!(
                "unresolved reference '{reference}'; references must be resolved before lowering"
            )),
            None => Ok(()),
        }
    }

    /// Declared tags with `null` removed, in declaration order.
    pub fn type_tags(&self) -> Vec<&'a str> {
        self.schema
            .schema_type
            .as_ref()
            .map(|t| t.tags().into_iter().filter(|t| *t != "null").collect())
            .unwrap_or_default()
    }

    /// The single non-null declared type, if any.
    ///
    /// Nullability does not change the attribute shape, so `["string", "null"]`
    /// is a string. Unknown tags and several distinct non-null tags are errors.
    pub fn declared_type(&self) -> Result<Option<TypeTag>, String> {
        let mut found: Option<TypeTag> = None;
        for raw in self.type_tags() {
            let Some(tag) = TypeTag::from_tag(raw) else {
                return Err(format!("unknown type '{raw}'"));
            };
            if let Some(existing) = found
                && existing != tag
            {
                return Err(format!(
                    "conflicting types '{}' and '{}'",
                    existing.as_str(),
                    tag.as_str()
                ));
            }
            found = Some(tag);
        }
        Ok(found)
    }

    /// Format hint, empty when absent.
    pub fn format(&self) -> &'a str {
        self.schema.format.as_deref().unwrap_or("")
    }

    /// Description, if any.
    pub fn description(&self) -> Option<&'a str> {
        self.schema.description.as_deref()
    }

    /// Declared properties; `None` when absent or empty.
    pub fn properties(&self) -> Option<&'a IndexMap<String, Schema>> {
        self.schema.properties.as_ref().filter(|p| !p.is_empty())
    }

    /// Whether the node declares at least one property.
    pub fn has_properties(&self) -> bool {
        self.properties().is_some()
    }

    /// Declared properties as child nodes, in declaration order.
    pub fn property_nodes(&self) -> Vec<(&'a str, SchemaNode<'a>)> {
        self.properties()
            .map(|props| {
                props
                    .iter()
                    .map(|(name, schema)| (name.as_str(), SchemaNode::new(schema)))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Object with its own properties, decided from this node alone.
    ///
    /// Does not look at children, so it is safe on arbitrarily deep chains.
    /// Malformed or unresolved nodes answer `false` and are reported when
    /// they are classified themselves.
    pub fn is_object_with_properties(&self) -> bool {
        self.reference().is_none()
            && matches!(self.declared_type(), Ok(Some(TypeTag::Object) | None))
            && self.has_properties()
    }

    /// Map value schema.
    ///
    /// Absent when missing or `false`. `true` carries no value type and an
    /// additional-properties schema on a non-object node is malformed.
    pub fn additional_properties(&self) -> Result<Option<SchemaNode<'a>>, String> {
        match &self.schema.additional_properties {
            None | Some(AdditionalProperties::Bool(false)) => Ok(None),
            Some(AdditionalProperties::Bool(true)) => Err(
                "additionalProperties: true does not describe a value type".to_string(),
            ),
            Some(AdditionalProperties::Schema(value)) => match self.declared_type()? {
                Some(TypeTag::Object) | None => Ok(Some(SchemaNode::new(value))),
                Some(other) => Err(format!(
                    "additionalProperties declared on a '{}' schema",
                    other.as_str()
                )),
            },
        }
    }

    /// Items schema; absent on object-typed nodes.
    pub fn items(&self) -> Option<SchemaNode<'a>> {
        if matches!(self.declared_type(), Ok(Some(TypeTag::Object))) {
            return None;
        }
        self.schema.items.as_deref().map(SchemaNode::new)
    }

    /// Names listed in `required`.
    pub fn required_names(&self) -> HashSet<&'a str> {
        self.schema
            .required
            .iter()
            .flatten()
            .map(String::as_str)
            .collect()
    }

    /// `uniqueItems: true`.
    pub fn unique_items(&self) -> bool {
        self.schema.unique_items == Some(true)
    }

    /// `readOnly: true`.
    pub fn read_only(&self) -> bool {
        self.schema.read_only == Some(true)
    }

    /// `writeOnly: true`.
    pub fn write_only(&self) -> bool {
        self.schema.write_only == Some(true)
    }

    /// `default` value, if any.
    pub fn default_value(&self) -> Option<&'a serde_json::Value> {
        self.schema.default.as_ref()
    }
}

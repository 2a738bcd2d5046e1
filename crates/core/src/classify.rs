//! Attribute kind classification.
//!
//! Consumes the full type tag set of a node and decides the one attribute
//! shape it lowers to. Rules, first match wins:
//!
//! 1. scalar type (or no type) without structural keywords → leaf by (type, format)
//! 2. array with items → list/set, nested when the item is an object with properties
//! 3. object with additionalProperties and no properties → map, nested when the value is an object with properties
//! 4. object with properties → single nested object (additionalProperties ignored)
//! 5. anything else is unsupported

use tracing::debug;

use crate::error::{LowerError, Result};
use crate::facade::{SchemaNode, TypeTag};
use crate::path::AttributePath;

/// Leaf attribute kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    /// `boolean`
    Bool,
    /// `number` with `double` or `float` format
    Float64,
    /// `integer`
    Int64,
    /// `number` without a float format
    Number,
    /// `string`; `sensitive` when the format is `password`
    String {
        /// Format is `password`.
        sensitive: bool,
    },
}

/// Ordered or unique collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    /// `array`
    List,
    /// `array` with `uniqueItems: true`
    Set,
}

/// Attribute shape of one node. Structural kinds keep the child node they
/// are built from.
#[derive(Debug, Clone, Copy)]
pub enum AttributeKind<'a> {
    /// Leaf attribute.
    Scalar(ScalarKind),
    /// List or set of a plain element type.
    Collection {
        /// List or set.
        kind: CollectionKind,
        /// Items node.
        items: SchemaNode<'a>,
    },
    /// List or set of nested objects.
    NestedCollection {
        /// List or set.
        kind: CollectionKind,
        /// Items node (an object with properties).
        items: SchemaNode<'a>,
    },
    /// Map of a plain element type.
    Map {
        /// additionalProperties node.
        value: SchemaNode<'a>,
    },
    /// Map of nested objects.
    MapNested {
        /// additionalProperties node (an object with properties).
        value: SchemaNode<'a>,
    },
    /// Single nested object built from the node's own properties.
    SingleNested,
}

/// Classify `node`, reporting failures against `path`.
///
/// Only `node` itself is inspected; item and value nodes are classified when
/// the lowering pass reaches them, under its depth ceiling.
pub fn classify<'a>(node: SchemaNode<'a>, path: &AttributePath) -> Result<AttributeKind<'a>> {
    node.ensure_resolved()
        .map_err(|message| LowerError::schema(path, message))?;
    let declared = node
        .declared_type()
        .map_err(|message| LowerError::schema(path, message))?;

    match declared {
        Some(TypeTag::Array) => classify_array(node, path),
        Some(TypeTag::Object) => classify_object(node, path),
        Some(tag) => {
            if node.has_properties() || node.schema().items.is_some() {
                return Err(unsupported(node, path));
            }
            // rejects additionalProperties on a scalar
            node.additional_properties()
                .map_err(|message| LowerError::schema(path, message))?;
            Ok(AttributeKind::Scalar(scalar_for_tag(tag, node.format(), path)))
        }
        None => {
            if node.items().is_some() {
                classify_array(node, path)
            } else if node.has_properties() || node.schema().additional_properties.is_some() {
                classify_object(node, path)
            } else {
                scalar_from_format(node.format())
                    .map(AttributeKind::Scalar)
                    .ok_or_else(|| unsupported(node, path))
            }
        }
    }
}

fn classify_array<'a>(node: SchemaNode<'a>, path: &AttributePath) -> Result<AttributeKind<'a>> {
    let Some(items) = node.items() else {
        return Err(LowerError::schema(path, "array schema has no items"));
    };
    let kind = if node.unique_items() {
        CollectionKind::Set
    } else {
        CollectionKind::List
    };
    if items.is_object_with_properties() {
        Ok(AttributeKind::NestedCollection { kind, items })
    } else {
        Ok(AttributeKind::Collection { kind, items })
    }
}

fn classify_object<'a>(node: SchemaNode<'a>, path: &AttributePath) -> Result<AttributeKind<'a>> {
    let additional = node
        .additional_properties()
        .map_err(|message| LowerError::schema(path, message))?;

    if node.has_properties() {
        if additional.is_some() {
            debug!(
                path = %path,
                "Schema declares both properties and additionalProperties; additionalProperties ignored."
            );
        }
        return Ok(AttributeKind::SingleNested);
    }

    match additional {
        Some(value) if value.is_object_with_properties() => {
            Ok(AttributeKind::MapNested { value })
        }
        Some(value) => Ok(AttributeKind::Map { value }),
        None => Err(unsupported(node, path)),
    }
}

fn scalar_for_tag(tag: TypeTag, format: &str, path: &AttributePath) -> ScalarKind {
    match tag {
        TypeTag::Integer => ScalarKind::Int64,
        TypeTag::Number => match format {
            "double" => ScalarKind::Float64,
            "float" => {
                debug!(path = %path, "32-bit float format widened to float64.");
                ScalarKind::Float64
            }
            _ => ScalarKind::Number,
        },
        TypeTag::Boolean => ScalarKind::Bool,
        TypeTag::String | TypeTag::Array | TypeTag::Object => ScalarKind::String {
            sensitive: format == "password",
        },
    }
}

/// Leaf kind of an untyped node, inferred from its format alone.
fn scalar_from_format(format: &str) -> Option<ScalarKind> {
    match format {
        "" => None,
        "int32" | "int64" => Some(ScalarKind::Int64),
        "float" | "double" => Some(ScalarKind::Float64),
        other => Some(ScalarKind::String {
            sensitive: other == "password",
        }),
    }
}

/// [`LowerError::UnsupportedSchema`] naming the node's type tags and format.
pub(crate) fn unsupported(node: SchemaNode<'_>, path: &AttributePath) -> LowerError {
    let tags = node.type_tags();
    let format = node.format();
    LowerError::UnsupportedSchema {
        path: path.clone(),
        types: if tags.is_empty() {
            "<none>".to_string()
        } else {
            tags.join(", ")
        },
        format: if format.is_empty() {
            "<none>".to_string()
        } else {
            format.to_string()
        },
    }
}

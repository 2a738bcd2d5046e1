//! Attribute IR consumed by the provider code renderer.
//!
//! An [`Attribute`] is one node of the generated provider schema. Its
//! [`AttributeValue`] is an enum, so exactly one shape is populated per
//! attribute. Nested shapes keep their children in source declaration order.
//!
//! The IR serializes to the JSON layout the rendering stage reads:
//! `{"name": "id", "string": {"computed_optional_required": "required"}}`.

use serde::Serialize;

use crate::computability::ComputedOptionalRequired;

/// Which provider schema the attributes are produced for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    /// Managed resource: leaves may carry static defaults.
    Resource,
    /// Data source: read-only view, no defaults, no write-only properties.
    DataSource,
}

impl Target {
    /// Human readable name used in log output.
    pub fn as_str(self) -> &'static str {
        match self {
            Target::Resource => "resource",
            Target::DataSource => "data source",
        }
    }
}

/// One attribute of a provider schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attribute {
    /// Attribute name, unique among its siblings.
    pub name: String,
    /// The populated attribute shape.
    #[serde(flatten)]
    pub value: AttributeValue,
}

/// Attribute shapes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeValue {
    /// Boolean leaf.
    Bool(BoolAttribute),
    /// 64-bit float leaf.
    Float64(Float64Attribute),
    /// 64-bit integer leaf.
    Int64(Int64Attribute),
    /// Arbitrary precision number leaf.
    Number(NumberAttribute),
    /// String leaf.
    String(StringAttribute),
    /// List of an element type.
    List(CollectionAttribute),
    /// Map of an element type.
    Map(CollectionAttribute),
    /// Set of an element type.
    Set(CollectionAttribute),
    /// List of nested objects.
    ListNested(NestedCollectionAttribute),
    /// Map of nested objects.
    MapNested(NestedCollectionAttribute),
    /// Set of nested objects.
    SetNested(NestedCollectionAttribute),
    /// Single nested object.
    SingleNested(SingleNestedAttribute),
}

/// Static default value of a leaf attribute.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaticDefault<T> {
    /// The default value.
    #[serde(rename = "static")]
    pub value: T,
}

/// Scalar leaf with a typed default.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScalarAttribute<T> {
    /// Required / optional / computed status.
    pub computed_optional_required: ComputedOptionalRequired,
    /// Static default (resources only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<StaticDefault<T>>,
    /// Description copied from the schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Boolean leaf.
pub type BoolAttribute = ScalarAttribute<bool>;
/// 64-bit float leaf.
pub type Float64Attribute = ScalarAttribute<f64>;
/// 64-bit integer leaf.
pub type Int64Attribute = ScalarAttribute<i64>;
/// Arbitrary precision number leaf.
pub type NumberAttribute = ScalarAttribute<f64>;

/// String leaf.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StringAttribute {
    /// Required / optional / computed status.
    pub computed_optional_required: ComputedOptionalRequired,
    /// Static default (resources only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<StaticDefault<String>>,
    /// Description copied from the schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Value must be hidden from plan output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sensitive: Option<bool>,
}

/// List, set or map of a plain element type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionAttribute {
    /// Required / optional / computed status.
    pub computed_optional_required: ComputedOptionalRequired,
    /// Type of each element (map values for maps).
    pub element_type: ElementType,
    /// Description copied from the schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// List, set or map whose elements are nested objects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NestedCollectionAttribute {
    /// Shape of each element.
    pub nested_object: NestedAttributeObject,
    /// Required / optional / computed status.
    pub computed_optional_required: ComputedOptionalRequired,
    /// Description copied from the schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Attributes of one element of a nested collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NestedAttributeObject {
    /// Element attributes, in declaration order.
    pub attributes: Vec<Attribute>,
}

/// Single nested object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SingleNestedAttribute {
    /// Child attributes, in declaration order.
    pub attributes: Vec<Attribute>,
    /// Required / optional / computed status.
    pub computed_optional_required: ComputedOptionalRequired,
    /// Description copied from the schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Element type of a plain collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    /// Boolean elements.
    Bool,
    /// 64-bit float elements.
    Float64,
    /// 64-bit integer elements.
    Int64,
    /// Arbitrary precision number elements.
    Number,
    /// String elements.
    String,
    /// Nested list.
    List(Box<ElementType>),
    /// Nested map.
    Map(Box<ElementType>),
    /// Nested set.
    Set(Box<ElementType>),
    /// Object with typed fields (only reachable inside another element type).
    Object(Vec<ObjectAttributeType>),
}

/// One field of an [`ElementType::Object`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectAttributeType {
    /// Field name.
    pub name: String,
    /// Field type.
    pub element_type: ElementType,
}

impl Attribute {
    /// Required / optional / computed status of this attribute.
    pub fn computability(&self) -> ComputedOptionalRequired {
        match &self.value {
            AttributeValue::Bool(a) => a.computed_optional_required,
            AttributeValue::Float64(a) | AttributeValue::Number(a) => a.computed_optional_required,
            AttributeValue::Int64(a) => a.computed_optional_required,
            AttributeValue::String(a) => a.computed_optional_required,
            AttributeValue::List(a) | AttributeValue::Map(a) | AttributeValue::Set(a) => {
                a.computed_optional_required
            }
            AttributeValue::ListNested(a)
            | AttributeValue::MapNested(a)
            | AttributeValue::SetNested(a) => a.computed_optional_required,
            AttributeValue::SingleNested(a) => a.computed_optional_required,
        }
    }

    /// Description, if the schema had one.
    pub fn description(&self) -> Option<&str> {
        let description = match &self.value {
            AttributeValue::Bool(a) => &a.description,
            AttributeValue::Float64(a) | AttributeValue::Number(a) => &a.description,
            AttributeValue::Int64(a) => &a.description,
            AttributeValue::String(a) => &a.description,
            AttributeValue::List(a) | AttributeValue::Map(a) | AttributeValue::Set(a) => {
                &a.description
            }
            AttributeValue::ListNested(a)
            | AttributeValue::MapNested(a)
            | AttributeValue::SetNested(a) => &a.description,
            AttributeValue::SingleNested(a) => &a.description,
        };
        description.as_deref()
    }

    /// Whether the attribute is a sensitive string leaf.
    pub fn is_sensitive(&self) -> bool {
        matches!(
            &self.value,
            AttributeValue::String(StringAttribute {
                sensitive: Some(true),
                ..
            })
        )
    }

    /// Child attributes of nested shapes (empty for leaves and plain collections).
    pub fn children(&self) -> &[Attribute] {
        match &self.value {
            AttributeValue::ListNested(a)
            | AttributeValue::MapNested(a)
            | AttributeValue::SetNested(a) => &a.nested_object.attributes,
            AttributeValue::SingleNested(a) => &a.attributes,
            _ => &[],
        }
    }

    /// Short name of the populated shape, e.g. `map_nested`.
    pub fn kind_name(&self) -> &'static str {
        match &self.value {
            AttributeValue::Bool(_) => "bool",
            AttributeValue::Float64(_) => "float64",
            AttributeValue::Int64(_) => "int64",
            AttributeValue::Number(_) => "number",
            AttributeValue::String(_) => "string",
            AttributeValue::List(_) => "list",
            AttributeValue::Map(_) => "map",
            AttributeValue::Set(_) => "set",
            AttributeValue::ListNested(_) => "list_nested",
            AttributeValue::MapNested(_) => "map_nested",
            AttributeValue::SetNested(_) => "set_nested",
            AttributeValue::SingleNested(_) => "single_nested",
        }
    }
}

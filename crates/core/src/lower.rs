//! Recursive lowering of schema nodes into provider attributes.
//!
//! One traversal serves both targets. [`Lowerer`] walks `properties` in
//! declaration order, resolves each child's status, classifies it and builds
//! the matching [`AttributeValue`]. Children of nested shapes are lowered by
//! the same walk one level deeper.

use std::collections::HashMap;

use tracing::{debug, trace, warn};

use crate::classify::{AttributeKind, CollectionKind, ScalarKind, classify, unsupported};
use crate::computability::{ChildSignals, ComputedOptionalRequired};
use crate::error::{LowerError, Result};
use crate::facade::SchemaNode;
use crate::ir::{
    Attribute, AttributeValue, CollectionAttribute, ElementType, NestedAttributeObject,
    NestedCollectionAttribute, ObjectAttributeType, ScalarAttribute, SingleNestedAttribute,
    StaticDefault, StringAttribute, Target,
};
use crate::path::AttributePath;
use crate::policy::{ErrorMode, Policy};
use crate::schema::Schema;
use crate::utils::terraform_identifier;

/// Lower the properties of `schema` into resource attributes.
pub fn build_resource_attributes(schema: &Schema, policy: &Policy) -> Result<Vec<Attribute>> {
    Lowerer::new(policy, Target::Resource).attributes(SchemaNode::new(schema))
}

/// Lower the properties of `schema` into data source attributes.
pub fn build_data_source_attributes(schema: &Schema, policy: &Policy) -> Result<Vec<Attribute>> {
    Lowerer::new(policy, Target::DataSource).attributes(SchemaNode::new(schema))
}

/// Lower `schema` into one single nested resource attribute named `name`.
pub fn build_single_nested_resource(
    name: &str,
    schema: &Schema,
    status: ComputedOptionalRequired,
    policy: &Policy,
) -> Result<Attribute> {
    Lowerer::new(policy, Target::Resource).single_nested(name, SchemaNode::new(schema), status)
}

/// Lower `schema` into one single nested data source attribute named `name`.
pub fn build_single_nested_data_source(
    name: &str,
    schema: &Schema,
    status: ComputedOptionalRequired,
    policy: &Policy,
) -> Result<Attribute> {
    Lowerer::new(policy, Target::DataSource).single_nested(name, SchemaNode::new(schema), status)
}

/// Reusable lowering pass for one target under one policy.
#[derive(Debug, Clone, Copy)]
pub struct Lowerer<'p> {
    policy: &'p Policy,
    target: Target,
}

/// Failures gathered while lowering one set of siblings.
struct Failures {
    mode: ErrorMode,
    errors: Vec<LowerError>,
}

impl Failures {
    fn new(mode: ErrorMode) -> Self {
        Self {
            mode,
            errors: Vec::new(),
        }
    }

    /// Fail fast returns the error; collect mode keeps it and continues.
    fn record(&mut self, err: LowerError) -> Result<()> {
        match self.mode {
            ErrorMode::FailFast => Err(err),
            ErrorMode::Collect => {
                self.errors.extend(err.into_errors());
                Ok(())
            }
        }
    }

    fn finish<T>(mut self, value: T) -> Result<T> {
        match self.errors.len() {
            0 => Ok(value),
            1 => Err(self.errors.remove(0)),
            _ => Err(LowerError::Multiple(self.errors)),
        }
    }
}

impl<'p> Lowerer<'p> {
    /// Lowering pass for `target`.
    pub fn new(policy: &'p Policy, target: Target) -> Self {
        Self { policy, target }
    }

    /// Lower the properties of a root object node.
    ///
    /// The root must be an object with properties.
    pub fn attributes(&self, node: SchemaNode<'_>) -> Result<Vec<Attribute>> {
        let root = AttributePath::root();
        self.expect_object(node, &root)?;
        debug!(target_kind = self.target.as_str(), "Lowering root schema.");
        self.properties(node, &root, 1, false)
    }

    /// Lower a root object node into one single nested attribute.
    pub fn single_nested(
        &self,
        name: &str,
        node: SchemaNode<'_>,
        status: ComputedOptionalRequired,
    ) -> Result<Attribute> {
        let path = AttributePath::root().child(name);
        self.expect_object(node, &path)?;
        let attributes = self.properties(node, &path, 2, is_fully_computed(status))?;
        Ok(Attribute {
            name: name.to_string(),
            value: AttributeValue::SingleNested(SingleNestedAttribute {
                attributes,
                computed_optional_required: status,
                description: node.description().map(str::to_string),
            }),
        })
    }

    fn expect_object(&self, node: SchemaNode<'_>, path: &AttributePath) -> Result<()> {
        match classify(node, path)? {
            AttributeKind::SingleNested => Ok(()),
            _ => Err(unsupported(node, path)),
        }
    }

    /// Lower every property of `node`. `depth` is the nesting level of the
    /// children produced here (root properties are level 1).
    fn properties(
        &self,
        node: SchemaNode<'_>,
        path: &AttributePath,
        depth: usize,
        parent_is_computed: bool,
    ) -> Result<Vec<Attribute>> {
        let required = node.required_names();
        let mut failures = Failures::new(self.policy.error_mode);
        let mut attributes = Vec::new();
        let mut seen: HashMap<String, &str> = HashMap::new();

        for (original, child) in node.property_nodes() {
            if self.skips(original, child, path) {
                continue;
            }

            let name = match attribute_name(original, path) {
                Ok(name) => name,
                Err(err) => {
                    failures.record(err)?;
                    continue;
                }
            };
            if let Some(first) = seen.get(name.as_str()) {
                failures.record(LowerError::NameCollision {
                    path: path.clone(),
                    name: name.clone(),
                    first: first.to_string(),
                    second: original.to_string(),
                })?;
                continue;
            }
            seen.insert(name.clone(), original);

            let child_path = path.child(&name);
            let status = self.policy.resolve(ChildSignals {
                required_names: &required,
                child_name: original,
                path: &child_path,
                read_only: child.read_only(),
                parent_is_computed,
            });

            match self.attribute(&name, child, &child_path, depth, status) {
                Ok(attribute) => attributes.push(attribute),
                Err(err) => failures.record(err)?,
            }
        }

        failures.finish(attributes)
    }

    fn attribute(
        &self,
        name: &str,
        node: SchemaNode<'_>,
        path: &AttributePath,
        depth: usize,
        status: ComputedOptionalRequired,
    ) -> Result<Attribute> {
        self.check_depth(path, depth)?;
        let kind = classify(node, path)?;
        let description = node.description().map(str::to_string);
        let computed = is_fully_computed(status);
        trace!(path = %path, ?status, "Lowering attribute.");

        let value = match kind {
            AttributeKind::Scalar(scalar) => self.scalar(scalar, node, path, status),
            AttributeKind::Collection { kind, items } => {
                let attribute = CollectionAttribute {
                    computed_optional_required: status,
                    element_type: self.element_type(items, path, depth + 1)?,
                    description,
                };
                match kind {
                    CollectionKind::List => AttributeValue::List(attribute),
                    CollectionKind::Set => AttributeValue::Set(attribute),
                }
            }
            AttributeKind::NestedCollection { kind, items } => {
                let attribute = NestedCollectionAttribute {
                    nested_object: NestedAttributeObject {
                        attributes: self.properties(items, path, depth + 1, computed)?,
                    },
                    computed_optional_required: status,
                    description,
                };
                match kind {
                    CollectionKind::List => AttributeValue::ListNested(attribute),
                    CollectionKind::Set => AttributeValue::SetNested(attribute),
                }
            }
            AttributeKind::Map { value } => AttributeValue::Map(CollectionAttribute {
                computed_optional_required: status,
                element_type: self.element_type(value, path, depth + 1)?,
                description,
            }),
            AttributeKind::MapNested { value } => {
                AttributeValue::MapNested(NestedCollectionAttribute {
                    nested_object: NestedAttributeObject {
                        attributes: self.properties(value, path, depth + 1, computed)?,
                    },
                    computed_optional_required: status,
                    description,
                })
            }
            AttributeKind::SingleNested => AttributeValue::SingleNested(SingleNestedAttribute {
                attributes: self.properties(node, path, depth + 1, computed)?,
                computed_optional_required: status,
                description,
            }),
        };

        if self.policy.override_for(path).and_then(|o| o.sensitive) == Some(true)
            && !matches!(value, AttributeValue::String(_))
        {
            warn!(path = %path, "Sensitive override ignored on a non-string attribute.");
        }

        Ok(Attribute {
            name: name.to_string(),
            value,
        })
    }

    fn scalar(
        &self,
        kind: ScalarKind,
        node: SchemaNode<'_>,
        path: &AttributePath,
        status: ComputedOptionalRequired,
    ) -> AttributeValue {
        let description = node.description().map(str::to_string);
        let default = match self.target {
            Target::Resource => node.default_value(),
            Target::DataSource => None,
        };

        match kind {
            ScalarKind::Bool => AttributeValue::Bool(ScalarAttribute {
                computed_optional_required: status,
                default: static_default(default, path, serde_json::Value::as_bool),
                description,
            }),
            ScalarKind::Int64 => AttributeValue::Int64(ScalarAttribute {
                computed_optional_required: status,
                default: static_default(default, path, serde_json::Value::as_i64),
                description,
            }),
            ScalarKind::Float64 => AttributeValue::Float64(ScalarAttribute {
                computed_optional_required: status,
                default: static_default(default, path, serde_json::Value::as_f64),
                description,
            }),
            ScalarKind::Number => AttributeValue::Number(ScalarAttribute {
                computed_optional_required: status,
                default: static_default(default, path, serde_json::Value::as_f64),
                description,
            }),
            ScalarKind::String { sensitive } => {
                let forced = self.policy.override_for(path).and_then(|o| o.sensitive) == Some(true);
                AttributeValue::String(StringAttribute {
                    computed_optional_required: status,
                    default: static_default(default, path, |v| v.as_str().map(str::to_string)),
                    description,
                    sensitive: (sensitive || forced).then_some(true),
                })
            }
        }
    }

    /// Element type of a plain collection's items or a map's values.
    fn element_type(
        &self,
        node: SchemaNode<'_>,
        path: &AttributePath,
        depth: usize,
    ) -> Result<ElementType> {
        self.check_depth(path, depth)?;
        let element = match classify(node, path)? {
            AttributeKind::Scalar(ScalarKind::Bool) => ElementType::Bool,
            AttributeKind::Scalar(ScalarKind::Int64) => ElementType::Int64,
            AttributeKind::Scalar(ScalarKind::Float64) => ElementType::Float64,
            AttributeKind::Scalar(ScalarKind::Number) => ElementType::Number,
            AttributeKind::Scalar(ScalarKind::String { .. }) => ElementType::String,
            AttributeKind::Collection { kind, items }
            | AttributeKind::NestedCollection { kind, items } => {
                let inner = Box::new(self.element_type(items, path, depth + 1)?);
                match kind {
                    CollectionKind::List => ElementType::List(inner),
                    CollectionKind::Set => ElementType::Set(inner),
                }
            }
            AttributeKind::Map { value } | AttributeKind::MapNested { value } => {
                ElementType::Map(Box::new(self.element_type(value, path, depth + 1)?))
            }
            AttributeKind::SingleNested => {
                let mut fields = Vec::new();
                let mut seen: HashMap<String, &str> = HashMap::new();
                for (original, child) in node.property_nodes() {
                    if self.skips(original, child, path) {
                        continue;
                    }
                    let name = attribute_name(original, path)?;
                    if let Some(first) = seen.get(name.as_str()) {
                        return Err(LowerError::NameCollision {
                            path: path.clone(),
                            name,
                            first: first.to_string(),
                            second: original.to_string(),
                        });
                    }
                    seen.insert(name.clone(), original);
                    let field_path = path.child(&name);
                    fields.push(ObjectAttributeType {
                        element_type: self.element_type(child, &field_path, depth + 1)?,
                        name,
                    });
                }
                ElementType::Object(fields)
            }
        };
        Ok(element)
    }

    /// Data sources never expose write-only properties.
    fn skips(&self, original: &str, child: SchemaNode<'_>, path: &AttributePath) -> bool {
        let skip = self.target == Target::DataSource && child.write_only();
        if skip {
            debug!(path = %path, property = original, "Skipping write-only property for data source.");
        }
        skip
    }

    fn check_depth(&self, path: &AttributePath, depth: usize) -> Result<()> {
        if depth > self.policy.max_depth {
            return Err(LowerError::RecursionLimit {
                path: path.clone(),
                limit: self.policy.max_depth,
            });
        }
        Ok(())
    }
}

fn attribute_name(original: &str, path: &AttributePath) -> Result<String> {
    if !original.is_ascii() {
        debug!(path = %path, property = original, "Non-ASCII characters dropped from property name.");
    }
    terraform_identifier(original).ok_or_else(|| {
        LowerError::schema(
            path,
            format!("property '{original}' has no identifier characters"),
        )
    })
}

/// Only a fully computed parent forces its children to computed.
fn is_fully_computed(status: ComputedOptionalRequired) -> bool {
    status == ComputedOptionalRequired::Computed
}

fn static_default<T>(
    value: Option<&serde_json::Value>,
    path: &AttributePath,
    convert: impl Fn(&serde_json::Value) -> Option<T>,
) -> Option<StaticDefault<T>> {
    let value = value?;
    match convert(value) {
        Some(value) => Some(StaticDefault { value }),
        None => {
            debug!(path = %path, default = %value, "Default does not match attribute type, dropped.");
            None
        }
    }
}

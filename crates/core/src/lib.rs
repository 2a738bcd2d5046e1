//! Lowering of OpenAPI schema trees into provider attribute IR.
//!
//! The entry points take an already resolved [`Schema`] (no `$ref` left) and a
//! [`Policy`], and return attributes in property declaration order:
//!
//! - [`build_resource_attributes`] / [`build_data_source_attributes`]
//! - [`build_single_nested_resource`] / [`build_single_nested_data_source`]
//!
//! Pipeline per node: [`facade`] normalizes raw keywords, [`classify`] picks the
//! attribute shape, [`computability`] resolves the status and [`lower`] builds
//! the [`ir`] value, recursing into children.

pub mod classify;
pub mod computability;
pub mod error;
pub mod facade;
pub mod ir;
pub mod lower;
pub mod path;
pub mod policy;
pub mod schema;
pub mod utils;

pub use computability::ComputedOptionalRequired;
pub use error::{LowerError, Result};
pub use facade::SchemaNode;
pub use ir::{Attribute, AttributeValue, ElementType, Target};
pub use lower::{
    Lowerer, build_data_source_attributes, build_resource_attributes,
    build_single_nested_data_source, build_single_nested_resource,
};
pub use path::AttributePath;
pub use policy::{AttributeOverride, ErrorMode, Policy};
pub use schema::Schema;

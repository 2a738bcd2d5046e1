//! Errors raised while lowering a schema tree.
//!
//! Every variant carries the dotted [`AttributePath`] of the attribute that
//! failed, so a caller can point at the exact property in the document.

use thiserror::Error;

use crate::path::AttributePath;

/// Lowering failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LowerError {
    /// The node shape matches no classification rule.
    #[error("{path}: unsupported schema (type: {types}, format: {format})")]
    UnsupportedSchema {
        /// Attribute that failed.
        path: AttributePath,
        /// Declared type tags, comma separated (`<none>` when absent).
        types: String,
        /// Declared format (`<none>` when absent).
        format: String,
    },

    /// The node is malformed for the shape it declares.
    #[error("{path}: invalid schema: {message}")]
    Schema {
        /// Attribute that failed.
        path: AttributePath,
        /// What is wrong with the node.
        message: String,
    },

    /// Nesting exceeds the configured ceiling.
    #[error("{path}: nesting exceeds the maximum depth of {limit}")]
    RecursionLimit {
        /// Attribute at which the ceiling was hit.
        path: AttributePath,
        /// Configured ceiling.
        limit: usize,
    },

    /// Two sibling properties normalize to the same attribute name.
    #[error("{path}: properties '{first}' and '{second}' both map to attribute '{name}'")]
    NameCollision {
        /// Object holding the colliding properties.
        path: AttributePath,
        /// Normalized attribute name.
        name: String,
        /// First property as declared in the schema.
        first: String,
        /// Second property as declared in the schema.
        second: String,
    },

    /// Several independent failures collected in [`ErrorMode::Collect`](crate::ErrorMode::Collect).
    #[error("{} schema errors:\n{}", .0.len(), join_errors(.0))]
    Multiple(Vec<LowerError>),
}

impl LowerError {
    /// Build a [`LowerError::Schema`].
    pub fn schema(path: &AttributePath, message: impl Into<String>) -> Self {
        LowerError::Schema {
            path: path.clone(),
            message: message.into(),
        }
    }

    /// Path of the failing attribute (`None` for [`LowerError::Multiple`]).
    pub fn path(&self) -> Option<&AttributePath> {
        match self {
            LowerError::UnsupportedSchema { path, .. }
            | LowerError::Schema { path, .. }
            | LowerError::RecursionLimit { path, .. }
            | LowerError::NameCollision { path, .. } => Some(path),
            LowerError::Multiple(_) => None,
        }
    }

    /// Flatten into the individual failures.
    pub fn into_errors(self) -> Vec<LowerError> {
        match self {
            LowerError::Multiple(errors) => errors
                .into_iter()
                .flat_map(LowerError::into_errors)
                .collect(),
            other => vec![other],
        }
    }
}

fn join_errors(errors: &[LowerError]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {e}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Result alias for lowering operations.
pub type Result<T, E = LowerError> = std::result::Result<T, E>;

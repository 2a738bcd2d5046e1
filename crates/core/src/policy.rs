//! Lowering policy: computability default, recursion ceiling, error mode and
//! per-attribute overrides.
//!
//! OpenAPI has no notion of "computed", so the status of a non-required
//! property is a product decision. The policy is one explicit value threaded
//! through every recursive call; nothing here is global.

use std::collections::HashMap;

use serde::Deserialize;

use crate::computability::ComputedOptionalRequired;
use crate::path::AttributePath;

/// Default recursion ceiling.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// How failures in sibling properties are reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorMode {
    /// Stop at the first failure.
    #[default]
    FailFast,
    /// Keep lowering unrelated siblings and report every failure together.
    Collect,
}

/// Forced settings for one attribute, keyed by dotted path in [`Policy::overrides`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AttributeOverride {
    /// Forced status. Ignored when the property is listed as required.
    pub computability: Option<ComputedOptionalRequired>,
    /// Mark a string leaf as sensitive.
    pub sensitive: Option<bool>,
}

/// Settings shared by every step of one lowering run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Policy {
    /// Status of properties that are neither required nor otherwise signalled.
    pub default_computability: ComputedOptionalRequired,
    /// Deepest nesting level accepted before failing with a recursion error.
    pub max_depth: usize,
    /// Fail fast or collect sibling failures.
    pub error_mode: ErrorMode,
    /// Per-attribute overrides keyed by dotted attribute path.
    pub overrides: HashMap<String, AttributeOverride>,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            default_computability: ComputedOptionalRequired::ComputedOptional,
            max_depth: DEFAULT_MAX_DEPTH,
            error_mode: ErrorMode::FailFast,
            overrides: HashMap::new(),
        }
    }
}

impl Policy {
    /// Override registered for `path`, if any.
    pub fn override_for(&self, path: &AttributePath) -> Option<&AttributeOverride> {
        if self.overrides.is_empty() {
            return None;
        }
        self.overrides.get(&path.dotted())
    }

    /// Register an override for a dotted path.
    pub fn with_override(mut self, dotted_path: &str, value: AttributeOverride) -> Self {
        self.overrides.insert(dotted_path.to_string(), value);
        self
    }

    /// Set the recursion ceiling.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the error mode.
    pub fn with_error_mode(mut self, error_mode: ErrorMode) -> Self {
        self.error_mode = error_mode;
        self
    }
}

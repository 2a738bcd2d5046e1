//! Required / optional / computed resolution for child properties.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::path::AttributePath;
use crate::policy::Policy;

/// Status controlling how the generated provider treats an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComputedOptionalRequired {
    /// Must be set by the practitioner.
    Required,
    /// May be set by the practitioner, never set by the provider.
    Optional,
    /// Set by the provider only.
    Computed,
    /// May be set by the practitioner, otherwise set by the provider.
    ComputedOptional,
}

/// Signals about one child property that feed [`Policy::resolve`].
#[derive(Debug, Clone, Copy)]
pub struct ChildSignals<'a> {
    /// Parent's `required` names.
    pub required_names: &'a HashSet<&'a str>,
    /// Property name as declared in the parent's `properties`.
    pub child_name: &'a str,
    /// Attribute path of the child, used for override lookup.
    pub path: &'a AttributePath,
    /// Child schema is `readOnly`.
    pub read_only: bool,
    /// Parent attribute is fully computed.
    pub parent_is_computed: bool,
}

impl Policy {
    /// Resolve the status of a child property.
    ///
    /// Precedence: required names, then a forced override, then `readOnly`,
    /// then a computed parent, then [`Policy::default_computability`].
    pub fn resolve(&self, signals: ChildSignals<'_>) -> ComputedOptionalRequired {
        if signals.required_names.contains(signals.child_name) {
            return ComputedOptionalRequired::Required;
        }

        if let Some(forced) = self
            .override_for(signals.path)
            .and_then(|o| o.computability)
        {
            return forced;
        }

        if signals.read_only || signals.parent_is_computed {
            return ComputedOptionalRequired::Computed;
        }

        self.default_computability
    }
}

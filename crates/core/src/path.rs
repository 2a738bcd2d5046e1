//! Dotted attribute paths used for error reporting and override lookup.

use std::fmt;

/// Path from the root object to an attribute, e.g. `nested_map_prop.nested_obj_prop`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct AttributePath {
    segments: Vec<String>,
}

impl AttributePath {
    /// The root object (no segments).
    pub fn root() -> Self {
        Self::default()
    }

    /// A new path with `segment` appended.
    pub fn child(&self, segment: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.to_string());
        Self { segments }
    }

    /// Whether this is the root object.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Dotted form used as the key of the override map.
    pub fn dotted(&self) -> String {
        self.segments.join(".")
    }
}

impl fmt::Display for AttributePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str("<root>")
        } else {
            f.write_str(&self.dotted())
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for AttributePath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().map(|s| s.as_ref().to_string()).collect(),
        }
    }
}

//! `oas2tf.toml` configuration.
//!
//! ```toml
//! [lowering]
//! default_computability = "computed_optional"
//! max_depth = 16
//! error_mode = "collect"
//!
//! [lowering.overrides."spec.token"]
//! sensitive = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use oas2tf_core::Policy;

/// Config filename looked up in the working directory.
pub const CONFIG_FILENAME: &str = "oas2tf.toml";

/// Config file structure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Lowering policy.
    pub lowering: Policy,
}

impl Config {
    /// Parse config from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|err| format!("Failed to parse config: {err}"))
    }

    /// Load config from `path`, or from [`CONFIG_FILENAME`] in the working
    /// directory when no path is given. A missing default file yields defaults;
    /// a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, String> {
        let (path, explicit) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(CONFIG_FILENAME), false),
        };

        if !explicit && !path.exists() {
            debug!("No {CONFIG_FILENAME} found, using default policy.");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .map_err(|err| format!("Failed to read config file {}: {err}", path.display()))?;
        let config = Self::from_toml(&contents)
            .map_err(|err| format!("{}: {err}", path.display()))?;
        debug!(path = %path.display(), "Loaded config.");
        Ok(config)
    }
}

//! Optional TOML configuration.
//!
//! ```toml
//! profile = "ruleset"
//! root = "."
//! patterns = ["rules/**/*.yml"]
//!
//! [exit_codes]
//! parse_failure = 3
//! schema_failure = 4
//! ```
//!
//! Every key is optional; unset keys fall back to the selected profile.

use crate::error::ConfigError;
use crate::profile::Profile;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidatorConfig {
    /// Built-in profile name (`ruleset` or `versioned`).
    pub profile: Option<String>,
    /// Discovery root. Relative paths are resolved against the config file's directory.
    pub root: Option<PathBuf>,
    /// Replaces the profile's default discovery globs.
    pub patterns: Option<Vec<String>>,
    pub exit_codes: ExitCodeOverrides,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExitCodeOverrides {
    pub nothing_found: Option<u8>,
    pub parse_failure: Option<u8>,
    pub schema_failure: Option<u8>,
}

impl ValidatorConfig {
    /// Load a configuration file from disk.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml(path, &text)?;

        if let Some(root) = &config.root
            && root.is_relative()
            && let Some(dir) = path.parent()
        {
            config.root = Some(dir.join(root));
        }

        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Parse configuration text. `path` is only used in error messages.
    pub fn from_toml(path: &Path, text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Syntax {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Build the effective profile. `selected` (from the command line) wins
    /// over the file's `profile` key; the default is `ruleset`.
    pub fn profile(&self, selected: Option<&str>) -> Result<Profile, ConfigError> {
        let name = selected
            .or(self.profile.as_deref())
            .unwrap_or(crate::profile::RULESET);
        let mut profile =
            Profile::by_name(name).ok_or_else(|| ConfigError::UnknownProfile(name.to_string()))?;

        if let Some(patterns) = &self.patterns {
            profile.patterns = patterns.clone();
        }
        let codes = &self.exit_codes;
        if let Some(code) = codes.nothing_found {
            profile.exit_codes.nothing_found = code;
        }
        if let Some(code) = codes.parse_failure {
            profile.exit_codes.parse_failure = code;
        }
        if let Some(code) = codes.schema_failure {
            profile.exit_codes.schema_failure = code;
        }

        Ok(profile)
    }
}

//! Named validation profiles.
//!
//! A profile bundles the schema applied to each document, the default
//! discovery globs, and the exit codes reported for each failure class.

use serde::{Deserialize, Serialize};

/// Which set of field requirements is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Schema {
    /// Any supported container shape; per-rule `id`, label and `conditions`.
    PermissiveRuleset,
    /// A `{name, version, rules}` wrapper with string `id`/`condition`/`action` rules.
    StrictVersioned,
}

/// Process exit codes for each terminal state. Success is always 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExitCodes {
    pub nothing_found: u8,
    pub parse_failure: u8,
    pub schema_failure: u8,
}

impl Default for ExitCodes {
    fn default() -> Self {
        Self {
            nothing_found: 0,
            parse_failure: 3,
            schema_failure: 4,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub schema: Schema,
    /// Default globs, relative to the discovery root.
    pub patterns: Vec<String>,
    pub exit_codes: ExitCodes,
}

pub const RULESET: &str = "ruleset";
pub const VERSIONED: &str = "versioned";

impl Profile {
    /// Rule files under `agents/**/rules/DoctorGPhD/`, checked rule by rule.
    pub fn ruleset() -> Self {
        Self {
            name: RULESET.to_string(),
            schema: Schema::PermissiveRuleset,
            patterns: vec![
                "agents/**/rules/DoctorGPhD/*.yml".to_string(),
                "agents/**/rules/DoctorGPhD/*.yaml".to_string(),
                "agents/**/rules/DoctorGPhD/*.json".to_string(),
            ],
            exit_codes: ExitCodes::default(),
        }
    }

    /// The single versioned ruleset at `agents/DCA/rulesets/DoctorGPhD.*`.
    pub fn versioned() -> Self {
        Self {
            name: VERSIONED.to_string(),
            schema: Schema::StrictVersioned,
            patterns: vec![
                "agents/DCA/rulesets/DoctorGPhD.yml".to_string(),
                "agents/DCA/rulesets/DoctorGPhD.yaml".to_string(),
                "agents/DCA/rulesets/DoctorGPhD.json".to_string(),
            ],
            exit_codes: ExitCodes {
                nothing_found: 0,
                parse_failure: 2,
                schema_failure: 3,
            },
        }
    }

    /// Look up a built-in profile by name.
    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            RULESET => Some(Self::ruleset()),
            VERSIONED => Some(Self::versioned()),
            _ => None,
        }
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::ruleset()
    }
}

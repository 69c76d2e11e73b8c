//! The aggregate result of one validation run.

use crate::error::{Diagnostic, ParseError, ValidationError};
use crate::profile::ExitCodes;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Terminal state of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// No candidate files were found.
    NothingToValidate,
    /// At least one file could not be read or parsed.
    ParseFailure,
    /// Every file parsed, but at least one schema or duplicate-id error exists.
    SchemaFailure,
    /// Every file parsed and every rule is valid.
    Valid,
}

impl Outcome {
    pub fn is_success(self) -> bool {
        matches!(self, Outcome::NothingToValidate | Outcome::Valid)
    }

    /// Exit code for this outcome. Success is always 0 except where
    /// `codes.nothing_found` says otherwise.
    pub fn exit_code(self, codes: &ExitCodes) -> u8 {
        match self {
            Outcome::NothingToValidate => codes.nothing_found,
            Outcome::ParseFailure => codes.parse_failure,
            Outcome::SchemaFailure => codes.schema_failure,
            Outcome::Valid => 0,
        }
    }
}

/// `name`/`version` of a versioned ruleset document and how many rules it holds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesetSummary {
    pub file: PathBuf,
    pub name: String,
    pub version: String,
    pub rules: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub profile: String,
    /// Every file processed, in processing (sorted) order.
    pub files: Vec<PathBuf>,
    /// Candidate rule records checked, valid or not.
    pub rule_count: usize,
    /// Distinct non-empty string ids seen across the corpus.
    pub distinct_ids: usize,
    pub parse_errors: Vec<ParseError>,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<Diagnostic>,
    pub rulesets: Vec<RulesetSummary>,
}

impl ValidationReport {
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn outcome(&self) -> Outcome {
        if self.files.is_empty() {
            Outcome::NothingToValidate
        } else if !self.parse_errors.is_empty() {
            Outcome::ParseFailure
        } else if !self.errors.is_empty() {
            Outcome::SchemaFailure
        } else {
            Outcome::Valid
        }
    }

    pub fn exit_code(&self, codes: &ExitCodes) -> u8 {
        self.outcome().exit_code(codes)
    }
}

/// Human-readable summary, as printed by the command line tool.
impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.files.is_empty() {
            return writeln!(
                f,
                "No rule files found for profile '{}' (nothing to validate).",
                self.profile
            );
        }

        writeln!(f, "Found {} file(s):", self.files.len())?;
        for file in &self.files {
            writeln!(f, "  - {}", file.display())?;
        }

        if !self.parse_errors.is_empty() {
            writeln!(f, "\nParse errors:")?;
            for e in &self.parse_errors {
                writeln!(f, " - {}", e)?;
            }
        }

        if !self.errors.is_empty() {
            writeln!(f, "\nValidation errors:")?;
            for e in &self.errors {
                writeln!(f, " - {}", e)?;
            }
        }

        if !self.warnings.is_empty() {
            writeln!(f, "\nWarnings:")?;
            for w in &self.warnings {
                writeln!(f, " - {}", w)?;
            }
        }

        match self.outcome() {
            Outcome::ParseFailure => writeln!(f, "\nFix parse errors and try again."),
            Outcome::SchemaFailure => writeln!(
                f,
                "\nRuleset failed validation ({} error(s)). See messages above.",
                self.errors.len()
            ),
            _ => {
                for rs in &self.rulesets {
                    writeln!(
                        f,
                        "Ruleset '{}' v{} with {} rule(s)",
                        rs.name, rs.version, rs.rules
                    )?;
                }
                writeln!(
                    f,
                    "Validated {} file(s). {} rule id(s) found. OK.",
                    self.files.len(),
                    self.distinct_ids
                )
            }
        }
    }
}

//! Offline validator for YAML/JSON rule files.
//!
//! Rule files come in several layouts: a single rule, a list of rules, a map
//! of rule id to rule, or a ruleset wrapper holding a `rules` list. This
//! crate finds them, normalizes every layout into flat rule records, checks
//! each record against a validation [`Profile`], and reports duplicate ids
//! across the whole corpus:
//!
//! ```text
//! discover(source, inputs) → files → Validator::check_file* → ValidationReport
//!                                          parse → candidate_rules → check_document
//! ```
//!
//! Errors are collected, never raised: one malformed file does not hide
//! problems in its siblings. Only discovery failures (bad glob, unreadable
//! directory) abort a run.
//!
//! # Quick Start
//!
//! ```rust
//! use rulecheck::{MemoryFiles, Outcome, Profile};
//!
//! let files = MemoryFiles::new().with(
//!     "agents/x/rules/DoctorGPhD/base.yml",
//!     "rules:\n  - id: R-1\n    name: First\n    conditions: []\n",
//! );
//!
//! let report = rulecheck::validate_paths(&files, &[], &Profile::ruleset()).unwrap();
//! assert_eq!(report.outcome(), Outcome::Valid);
//! assert_eq!(report.distinct_ids, 1);
//! ```

pub mod aggregate;
pub mod config;
pub mod discover;
pub mod error;
pub mod normalize;
pub mod parse;
pub mod primitives;
pub mod profile;
pub mod report;
pub mod serialize;
pub mod source;
pub mod validate;

pub use error::*;

// Re-export entry points at the crate root for convenience.
pub use aggregate::Validator;
pub use config::ValidatorConfig;
pub use discover::discover;
pub use normalize::{Layout, RuleCandidate, candidate_rules, layout};
pub use profile::{ExitCodes, Profile, Schema};
pub use report::{Outcome, ValidationReport};
pub use serialize::to_json;
pub use source::{FileSource, MemoryFiles, OsFiles};

/// Convenience entry point composing discover → parse → validate → report.
///
/// `inputs` are explicit files or globs; when empty, the profile's default
/// patterns are used.
///
/// # Errors
///
/// Returns [`DiscoveryError`] when a pattern is invalid or the file system
/// cannot be walked. Parse and schema problems are reported in the
/// returned [`ValidationReport`] instead.
pub fn validate_paths(
    source: &dyn FileSource,
    inputs: &[String],
    profile: &Profile,
) -> Result<ValidationReport, DiscoveryError> {
    let files = discover(source, inputs, &profile.patterns)?;

    let mut validator = Validator::new(profile);
    for file in &files {
        validator.check_file(source, file);
    }
    Ok(validator.finish())
}

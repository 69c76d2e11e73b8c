//! Corpus-wide aggregation: duplicate-id tracking and report assembly.

use crate::error::{
    Diagnostic, DuplicateIdError, ParseError, ParseErrorKind, SchemaError, ValidationError,
};
use crate::normalize::{Layout, layout};
use crate::parse::{decode, parse_source};
use crate::primitives::FieldError;
use crate::profile::{Profile, Schema};
use crate::report::{RulesetSummary, ValidationReport};
use crate::source::FileSource;
use crate::validate::{CheckedRule, check_document};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Accumulates results for one run. Files should be fed in sorted order so
/// that "first seen" for duplicate ids is deterministic.
pub struct Validator {
    schema: Schema,
    seen: HashMap<String, PathBuf>,
    report: ValidationReport,
}

impl Validator {
    pub fn new(profile: &Profile) -> Self {
        Self {
            schema: profile.schema,
            seen: HashMap::new(),
            report: ValidationReport {
                profile: profile.name.clone(),
                ..ValidationReport::default()
            },
        }
    }

    /// Read `file` from `source` and check it. Read and decoding failures are
    /// recorded as parse errors.
    pub fn check_file(&mut self, source: &dyn FileSource, file: &Path) {
        let text = match source.read(file) {
            Ok(bytes) => decode(file, bytes),
            Err(e) => Err(ParseError {
                file: file.to_path_buf(),
                kind: ParseErrorKind::Read,
                message: format!("failed to read file: {}", e),
                line: None,
                column: None,
            }),
        };

        match text {
            Ok(text) => self.check_source(file, &text),
            Err(e) => {
                tracing::debug!(file = %file.display(), error = %e, "unreadable file");
                self.report.files.push(file.to_path_buf());
                self.report.parse_errors.push(e);
            }
        }
    }

    /// Parse and check the text of one file.
    pub fn check_source(&mut self, file: &Path, text: &str) {
        self.report.files.push(file.to_path_buf());

        let docs = match parse_source(file, text) {
            Ok(docs) => docs,
            Err(e) => {
                tracing::debug!(file = %file.display(), error = %e, "parse failed");
                self.report.parse_errors.push(e);
                return;
            }
        };

        tracing::debug!(file = %file.display(), documents = docs.len(), "parsed");
        let multi = docs.len() > 1;
        for (i, doc) in docs.iter().enumerate() {
            let root = if multi {
                format!("documents[{}]", i)
            } else {
                String::new()
            };
            self.check_document(file, &root, doc);
        }
    }

    fn check_document(&mut self, file: &Path, root: &str, doc: &Value) {
        let check = check_document(self.schema, doc);

        for e in check.errors {
            self.push_schema_error(file, None, root, e);
        }

        if self.schema == Schema::PermissiveRuleset
            && !doc.is_null()
            && layout(doc) == Layout::Unrecognized
        {
            tracing::warn!(
                file = %file.display(),
                "document matches no known rule layout; no rules checked"
            );
            self.report.warnings.push(Diagnostic {
                code: "no-rules".to_string(),
                file: file.to_path_buf(),
                path: (!root.is_empty()).then(|| root.to_string()),
                message: "document matches no known rule layout; no rules checked".to_string(),
            });
        }

        if let Some(header) = check.header {
            self.report.rulesets.push(RulesetSummary {
                file: file.to_path_buf(),
                name: header.name,
                version: header.version,
                rules: check.rules.len(),
            });
        }

        self.report.rule_count += check.rules.len();
        for rule in check.rules {
            self.record_rule(file, root, rule);
        }
    }

    fn record_rule(&mut self, file: &Path, root: &str, rule: CheckedRule) {
        let rule_path = join_path(root, &rule.path);

        if let Some(id) = &rule.id {
            match self.seen.get(id) {
                Some(first) => {
                    self.report
                        .errors
                        .push(ValidationError::DuplicateId(DuplicateIdError {
                            id: id.clone(),
                            first_file: first.clone(),
                            second_file: file.to_path_buf(),
                            path: display_path(&rule_path),
                        }));
                }
                None => {
                    self.seen.insert(id.clone(), file.to_path_buf());
                }
            }
        }

        for e in rule.errors {
            self.push_schema_error(file, rule.id.clone(), &rule_path, e);
        }
    }

    fn push_schema_error(
        &mut self,
        file: &Path,
        rule_id: Option<String>,
        base: &str,
        error: FieldError,
    ) {
        let path = join_path(base, &error.field);
        self.report
            .errors
            .push(ValidationError::Schema(SchemaError {
                file: file.to_path_buf(),
                rule_id,
                path: display_path(&path),
                message: error.message,
            }));
    }

    /// Consume the validator and return the completed report.
    pub fn finish(mut self) -> ValidationReport {
        self.report.distinct_ids = self.seen.len();
        tracing::info!(
            files = self.report.files.len(),
            rules = self.report.rule_count,
            distinct_ids = self.report.distinct_ids,
            parse_errors = self.report.parse_errors.len(),
            errors = self.report.errors.len(),
            "validation finished"
        );
        self.report
    }
}

/// Append a child segment to a document path. `$` and the empty string both
/// mean the document root.
fn join_path(parent: &str, child: &str) -> String {
    let parent = if parent == "$" { "" } else { parent };
    let child = if child == "$" { "" } else { child };
    if parent.is_empty() {
        child.to_string()
    } else if child.is_empty() {
        parent.to_string()
    } else if child.starts_with('[') {
        format!("{}{}", parent, child)
    } else {
        format!("{}.{}", parent, child)
    }
}

fn display_path(path: &str) -> String {
    if path.is_empty() {
        "$".to_string()
    } else {
        path.to_string()
    }
}

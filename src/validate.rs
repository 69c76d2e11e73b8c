//! Schema checks for rule records and ruleset documents.
//!
//! Returns **all** problems found, never just the first. Validation does not
//! modify the document, so checking the same record twice gives the same
//! result.

use crate::normalize::candidate_rules;
use crate::primitives::*;
use crate::profile::Schema;
use serde_json::{Map, Value};

/// Keys accepted as a rule's human label, in priority order.
const LABEL_KEYS: [&str; 3] = ["name", "title", "description"];

/// Fields every strict-profile rule must carry as non-empty strings.
const STRICT_RULE_FIELDS: [&str; 3] = ["id", "condition", "action"];

/// One rule after checking, with its location and id when it has a usable one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckedRule {
    pub path: String,
    pub id: Option<String>,
    pub errors: Vec<FieldError>,
}

/// `name` and `version` of a well-formed versioned ruleset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RulesetHeader {
    pub name: String,
    pub version: String,
}

/// Result of checking one document under one schema.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocumentCheck {
    pub rules: Vec<CheckedRule>,
    /// Problems with the document itself; `field` holds the document path.
    pub errors: Vec<FieldError>,
    pub header: Option<RulesetHeader>,
}

/// Check one parsed document under `schema`.
pub fn check_document(schema: Schema, doc: &Value) -> DocumentCheck {
    match schema {
        Schema::PermissiveRuleset => check_permissive_document(doc),
        Schema::StrictVersioned => check_versioned_document(doc),
    }
}

// ─── Permissive ruleset ─────────────────────────────────────────────────────

fn check_permissive_document(doc: &Value) -> DocumentCheck {
    let rules = candidate_rules(doc)
        .into_iter()
        .map(|candidate| CheckedRule {
            id: rule_id(candidate.rule),
            errors: check_rule(candidate.rule),
            path: candidate.path,
        })
        .collect();

    DocumentCheck {
        rules,
        ..DocumentCheck::default()
    }
}

/// Check one rule record against the permissive schema.
///
/// `id` must be a string of `A-Z a-z 0-9 _ -`; one of `name`, `title` or
/// `description` must be a non-blank string; `conditions` (or `condition`)
/// must be a list or mapping; `actions`, when present, must be a list or
/// mapping.
pub fn check_rule(rule: &Map<String, Value>) -> Vec<FieldError> {
    let mut errors = Vec::new();
    check_rule_id(rule, &mut errors);
    check_label(rule, &mut errors);
    required_list_or_mapping(rule, &["conditions", "condition"], &mut errors);
    optional_list_or_mapping(rule, "actions", &mut errors);
    errors
}

fn check_rule_id(rule: &Map<String, Value>, errors: &mut Vec<FieldError>) {
    if let Some(id) = required_string(rule, "id", errors)
        && !is_valid_rule_id(id)
    {
        errors.push(FieldError::new(
            "id",
            format!("invalid 'id' value: '{}' (allowed: A-Z a-z 0-9 _ -)", id),
        ));
    }
}

fn check_label(rule: &Map<String, Value>, errors: &mut Vec<FieldError>) {
    let label = LABEL_KEYS
        .iter()
        .find_map(|k| rule.get(*k).filter(|v| is_truthy(v)).map(|v| (*k, v)));

    match label {
        None => errors.push(FieldError::new(
            "name",
            "missing or empty 'name'/'title'/'description' (string required)",
        )),
        Some((key, Value::String(s))) => {
            if s.trim().is_empty() {
                errors.push(FieldError::new(
                    key,
                    format!("field '{}' must not be empty", key),
                ));
            }
        }
        Some((key, other)) => errors.push(FieldError::new(
            key,
            format!("field '{}' must be a string, got {}", key, type_name(other)),
        )),
    }
}

/// The rule's id as text, used for duplicate tracking.
///
/// Non-empty strings are taken as-is. Truthy numbers and `true` are rendered
/// so that a repeated `id: 5` is still caught, even though it also fails the
/// string check.
pub fn rule_id(rule: &Map<String, Value>) -> Option<String> {
    match rule.get("id") {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(v @ (Value::Number(_) | Value::Bool(_))) if is_truthy(v) => Some(v.to_string()),
        _ => None,
    }
}

// ─── Strict versioned ruleset ───────────────────────────────────────────────

fn check_versioned_document(doc: &Value) -> DocumentCheck {
    let mut check = DocumentCheck::default();

    let Value::Object(root) = doc else {
        check.errors.push(FieldError::new(
            "$",
            format!("root element must be a mapping, got {}", type_name(doc)),
        ));
        return check;
    };

    let name = required_non_blank_string(root, "name", &mut check.errors);
    let version = check_version(root, &mut check.errors);

    match present(root, "rules") {
        None => check
            .errors
            .push(FieldError::new("rules", "missing required field 'rules'")),
        Some(Value::Array(items)) => {
            check.rules = items
                .iter()
                .enumerate()
                .map(|(i, item)| check_versioned_rule(i, item))
                .collect();
        }
        Some(other) => check.errors.push(FieldError::new(
            "rules",
            format!("field 'rules' must be a list, got {}", type_name(other)),
        )),
    }

    if let (Some(name), Some(version)) = (name, version) {
        check.header = Some(RulesetHeader {
            name: name.to_string(),
            version: version.to_string(),
        });
    }

    check
}

fn check_version<'a>(root: &'a Map<String, Value>, errors: &mut Vec<FieldError>) -> Option<&'a str> {
    let version = required_string(root, "version", errors)?;
    if !is_valid_semver(version) {
        errors.push(FieldError::new(
            "version",
            format!(
                "field 'version' must follow semver format (e.g. '1.0.0'), got '{}'",
                version
            ),
        ));
        return None;
    }
    Some(version)
}

fn check_versioned_rule(index: usize, item: &Value) -> CheckedRule {
    let path = format!("rules[{}]", index);

    let Value::Object(rule) = item else {
        return CheckedRule {
            path,
            id: None,
            errors: vec![FieldError::new(
                "",
                format!("rule must be a mapping, got {}", type_name(item)),
            )],
        };
    };

    let mut errors = Vec::new();
    for field in STRICT_RULE_FIELDS {
        required_non_blank_string(rule, field, &mut errors);
    }

    CheckedRule {
        path,
        id: rule_id(rule),
        errors,
    }
}

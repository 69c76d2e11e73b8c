//! Field-check primitives shared by every validation profile.
//!
//! Each check appends to an error list instead of returning early, so a
//! record reports every problem in one pass.

use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

// ─── Cached regexes ─────────────────────────────────────────────────────────

static RULE_ID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

static SEMVER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\d+\.\d+\.\d+(?:-[0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*)?(?:\+[0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*)?$",
    )
    .unwrap()
});

/// One problem with one field of a record, before it is tied to a file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Human name of a value's shape, used in messages.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}

/// Loose truthiness: null, false, zero and empty strings/collections are false.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Value of `key` unless it is absent or explicitly null.
pub fn present<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|v| !v.is_null())
}

/// First of `keys` that is present and not null, with the key that matched.
pub fn first_present<'a, 'k>(
    map: &'a Map<String, Value>,
    keys: &[&'k str],
) -> Option<(&'k str, &'a Value)> {
    keys.iter()
        .find_map(|k| present(map, k).map(|v| (*k, v)))
}

/// Requires `key` to hold a string. Returns it on success.
pub fn required_string<'a>(
    map: &'a Map<String, Value>,
    key: &str,
    errors: &mut Vec<FieldError>,
) -> Option<&'a str> {
    match present(map, key) {
        None => {
            errors.push(FieldError::new(
                key,
                format!("missing required field '{}'", key),
            ));
            None
        }
        Some(Value::String(s)) => Some(s.as_str()),
        Some(other) => {
            errors.push(FieldError::new(
                key,
                format!("field '{}' must be a string, got {}", key, type_name(other)),
            ));
            None
        }
    }
}

/// Requires `key` to hold a string with at least one non-whitespace character.
pub fn required_non_blank_string<'a>(
    map: &'a Map<String, Value>,
    key: &str,
    errors: &mut Vec<FieldError>,
) -> Option<&'a str> {
    let s = required_string(map, key, errors)?;
    if s.trim().is_empty() {
        errors.push(FieldError::new(
            key,
            format!("field '{}' must not be empty", key),
        ));
        return None;
    }
    Some(s)
}

/// Requires the first present key among `keys` to hold a list or mapping.
/// Absence of all keys is reported under the first key.
pub fn required_list_or_mapping(
    map: &Map<String, Value>,
    keys: &[&str],
    errors: &mut Vec<FieldError>,
) {
    match first_present(map, keys) {
        None => {
            let key = keys.first().copied().unwrap_or_default();
            errors.push(FieldError::new(
                key,
                format!("missing required field '{}' (list or mapping expected)", key),
            ));
        }
        Some((key, value)) => check_list_or_mapping(key, value, "", errors),
    }
}

/// When `key` is present and not null, requires it to hold a list or mapping.
pub fn optional_list_or_mapping(map: &Map<String, Value>, key: &str, errors: &mut Vec<FieldError>) {
    if let Some(value) = present(map, key) {
        check_list_or_mapping(key, value, " when present", errors);
    }
}

fn check_list_or_mapping(key: &str, value: &Value, qualifier: &str, errors: &mut Vec<FieldError>) {
    if !matches!(value, Value::Array(_) | Value::Object(_)) {
        errors.push(FieldError::new(
            key,
            format!(
                "field '{}' must be a list or mapping{}, got {}",
                key,
                qualifier,
                type_name(value)
            ),
        ));
    }
}

/// True when `id` uses only `A-Z a-z 0-9 _ -` and is not empty.
pub fn is_valid_rule_id(id: &str) -> bool {
    RULE_ID_RE.is_match(id)
}

/// True for `major.minor.patch` with optional `-prerelease` and `+build` parts.
pub fn is_valid_semver(version: &str) -> bool {
    SEMVER_RE.is_match(version)
}

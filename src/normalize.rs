//! Container-shape detection: turn a parsed document of unknown layout into
//! a flat list of candidate rule records.

use serde_json::{Map, Value};

/// A mapping that will be validated as one rule, with its location in the
/// document.
#[derive(Clone, Debug, PartialEq)]
pub struct RuleCandidate<'a> {
    pub path: String,
    pub rule: &'a Map<String, Value>,
}

/// Which container layout a document uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
    /// A mapping with `rules` or `ruleset.rules`.
    Wrapper,
    /// A bare sequence of rules.
    Sequence,
    /// A single rule mapping (has `id` or `name`).
    SingleRule,
    /// A mapping of rule id to rule mapping.
    RuleMap,
    /// None of the above, including null documents.
    Unrecognized,
}

/// Classify a document. Layouts are tried in declaration order.
pub fn layout(doc: &Value) -> Layout {
    match doc {
        Value::Object(map) if is_ruleset_wrapper(map) => Layout::Wrapper,
        Value::Array(_) => Layout::Sequence,
        Value::Object(map) if map.contains_key("id") || map.contains_key("name") => {
            Layout::SingleRule
        }
        Value::Object(map) if map.values().any(Value::is_object) => Layout::RuleMap,
        _ => Layout::Unrecognized,
    }
}

/// Extract candidate rules from one document.
///
/// The document's [`Layout`] decides where rules are taken from. A wrapper
/// whose container is not a sequence, and an unrecognized document, yield
/// no candidates. Non-mapping elements of a rule sequence are skipped.
pub fn candidate_rules(doc: &Value) -> Vec<RuleCandidate<'_>> {
    match (layout(doc), doc) {
        (Layout::Wrapper, Value::Object(map)) => match wrapper_container(map) {
            Some((prefix, items)) => mappings_in(prefix, items),
            None => Vec::new(),
        },
        (Layout::Sequence, Value::Array(items)) => mappings_in("", items),
        (Layout::SingleRule, Value::Object(map)) => vec![RuleCandidate {
            path: "$".to_string(),
            rule: map,
        }],
        (Layout::RuleMap, Value::Object(map)) => map
            .iter()
            .filter_map(|(key, value)| match value {
                Value::Object(rule) => Some(RuleCandidate {
                    path: key.clone(),
                    rule,
                }),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn is_ruleset_wrapper(map: &Map<String, Value>) -> bool {
    map.contains_key("rules")
        || matches!(map.get("ruleset"), Some(Value::Object(inner)) if inner.contains_key("rules"))
}

/// Pick the rule sequence of a wrapper. A non-empty top-level `rules` wins,
/// then `ruleset.rules`, then an empty top-level `rules`.
fn wrapper_container(map: &Map<String, Value>) -> Option<(&'static str, &Vec<Value>)> {
    let top = match map.get("rules") {
        Some(Value::Array(items)) => Some(items),
        _ => None,
    };
    let nested = match map.get("ruleset") {
        Some(Value::Object(inner)) => match inner.get("rules") {
            Some(Value::Array(items)) => Some(items),
            _ => None,
        },
        _ => None,
    };

    match (top, nested) {
        (Some(items), _) if !items.is_empty() => Some(("rules", items)),
        (_, Some(items)) => Some(("ruleset.rules", items)),
        (Some(items), None) => Some(("rules", items)),
        (None, None) => None,
    }
}

fn mappings_in<'a>(prefix: &str, items: &'a [Value]) -> Vec<RuleCandidate<'a>> {
    items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| match item {
            Value::Object(rule) => Some(RuleCandidate {
                path: format!("{}[{}]", prefix, i),
                rule,
            }),
            _ => None,
        })
        .collect()
}

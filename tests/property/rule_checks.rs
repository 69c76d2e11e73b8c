use proptest::prelude::*;
use rulecheck::primitives::{is_valid_rule_id, is_valid_semver};
use rulecheck::validate::check_rule;
use serde_json::{Map, Value, json};

fn rule_with_id(id: &str) -> Map<String, Value> {
    match json!({"id": id, "name": "label", "conditions": []}) {
        Value::Object(map) => map,
        _ => unreachable!(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    // Ids from the allowed alphabet never produce an error.
    #[test]
    fn allowed_ids_pass(id in "[A-Za-z0-9_-]{1,32}") {
        prop_assert!(check_rule(&rule_with_id(&id)).is_empty());
    }

    // Any id outside the alphabet produces exactly one `id` error.
    #[test]
    fn disallowed_ids_fail_once(id in "[A-Za-z0-9]{0,5}[ .:/!@#]{1,3}[A-Za-z0-9]{0,5}") {
        let errors = check_rule(&rule_with_id(&id));
        prop_assert_eq!(errors.len(), 1);
        prop_assert_eq!(errors[0].field.as_str(), "id");
        prop_assert!(!is_valid_rule_id(&id));
    }

    // A rule that passes keeps passing: checking neither mutates nor drifts.
    #[test]
    fn check_is_idempotent(
        id in "[A-Za-z0-9_ -]{0,10}",
        name in proptest::option::of("[a-z ]{0,8}"),
        conditions in prop_oneof![Just(json!([])), Just(json!({})), Just(json!("x")), Just(Value::Null)],
    ) {
        let mut rule = rule_with_id(&id);
        match name {
            Some(n) => { rule.insert("name".to_string(), json!(n)); }
            None => { rule.remove("name"); }
        }
        rule.insert("conditions".to_string(), conditions);

        let snapshot = rule.clone();
        let first = check_rule(&rule);
        let second = check_rule(&rule);
        prop_assert_eq!(first, second);
        prop_assert_eq!(rule, snapshot);
    }

    // Three numeric components always form a valid version.
    #[test]
    fn numeric_triples_are_semver(a in 0u32..1000, b in 0u32..1000, c in 0u32..1000) {
        let plain = format!("{a}.{b}.{c}");
        let pre = format!("{a}.{b}.{c}-rc.1");
        let build = format!("{a}.{b}.{c}+sha.abc");
        prop_assert!(is_valid_semver(&plain));
        prop_assert!(is_valid_semver(&pre));
        prop_assert!(is_valid_semver(&build));
    }

    // Missing a component is never a valid version.
    #[test]
    fn pairs_are_not_semver(a in 0u32..1000, b in 0u32..1000) {
        let version = format!("{a}.{b}");
        prop_assert!(!is_valid_semver(&version));
    }
}

use proptest::prelude::*;
use rulecheck::{MemoryFiles, Outcome, Profile, ValidationError, validate_paths};
use std::collections::BTreeSet;

/// Strategy for a set of distinct rule ids.
fn arb_ids() -> impl Strategy<Value = BTreeSet<String>> {
    prop::collection::btree_set("[A-Za-z0-9_-]{1,12}", 1..20)
}

/// Render rules as a YAML wrapper document.
fn wrapper_yaml(ids: &[String]) -> String {
    let mut out = String::from("rules:\n");
    for id in ids {
        out.push_str(&format!("  - id: \"{id}\"\n    name: \"rule {id}\"\n    conditions: []\n"));
    }
    out
}

/// Distribute ids round-robin over `file_count` files.
fn corpus(ids: &[String], file_count: usize) -> MemoryFiles {
    let mut files = MemoryFiles::new();
    for f in 0..file_count {
        let chunk: Vec<String> = ids.iter().skip(f).step_by(file_count).cloned().collect();
        files.insert(format!("rules/f{f:02}.yml"), wrapper_yaml(&chunk));
    }
    files
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // Unique, well-formed rules always validate and every id is counted.
    #[test]
    fn unique_valid_rules_pass(ids in arb_ids(), file_count in 1usize..5) {
        let ids: Vec<String> = ids.into_iter().collect();
        let files = corpus(&ids, file_count);
        let report = validate_paths(&files, &["rules/*.yml".to_string()], &Profile::ruleset()).unwrap();

        prop_assert_eq!(report.outcome(), Outcome::Valid, "errors: {:?}", report.errors);
        prop_assert_eq!(report.distinct_ids, ids.len());
        prop_assert_eq!(report.rule_count, ids.len());
        prop_assert_eq!(report.file_count(), file_count);
    }

    // Repeating one id in a second file yields exactly one duplicate error,
    // attributed to the earlier file in sorted order.
    #[test]
    fn repeated_id_is_one_duplicate(ids in arb_ids(), pick in any::<prop::sample::Index>()) {
        let ids: Vec<String> = ids.into_iter().collect();
        let repeated = ids[pick.index(ids.len())].clone();

        let mut files = corpus(&ids, 1);
        files.insert("rules/zz.yml", wrapper_yaml(std::slice::from_ref(&repeated)));
        let report = validate_paths(&files, &["rules/*.yml".to_string()], &Profile::ruleset()).unwrap();

        let dups: Vec<_> = report.errors.iter().filter_map(|e| match e {
            ValidationError::DuplicateId(d) => Some(d),
            _ => None,
        }).collect();
        prop_assert_eq!(dups.len(), 1);
        prop_assert_eq!(&dups[0].id, &repeated);
        prop_assert_eq!(dups[0].first_file.to_str(), Some("rules/f00.yml"));
        prop_assert_eq!(dups[0].second_file.to_str(), Some("rules/zz.yml"));
        prop_assert_eq!(report.outcome(), Outcome::SchemaFailure);
        prop_assert_eq!(report.distinct_ids, ids.len());
    }

    // Validating the same corpus twice gives the same report.
    #[test]
    fn validation_is_deterministic(ids in arb_ids(), file_count in 1usize..4) {
        let ids: Vec<String> = ids.into_iter().collect();
        let files = corpus(&ids, file_count);
        let inputs = ["rules/*.yml".to_string()];
        let first = validate_paths(&files, &inputs, &Profile::ruleset()).unwrap();
        let second = validate_paths(&files, &inputs, &Profile::ruleset()).unwrap();
        prop_assert_eq!(first, second);
    }
}

#![no_main]

use libfuzzer_sys::fuzz_target;
use rulecheck::{Profile, Validator};
use std::path::Path;

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);
    for profile in [Profile::ruleset(), Profile::versioned()] {
        let mut validator = Validator::new(&profile);
        validator.check_source(Path::new("fuzz.yml"), &s);
        validator.check_source(Path::new("fuzz.json"), &s);
        let report = validator.finish();
        let _ = report.to_string();
        let _ = rulecheck::to_json(&report);
    }
});

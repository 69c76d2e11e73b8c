//! [`ValidationReport`] → JSON serialization.

use crate::report::ValidationReport;
use serde_json::Value;

/// Serialize a report to pretty-printed JSON.
///
/// The computed `outcome` is emitted first, followed by the report fields
/// in declaration order.
pub fn to_json(report: &ValidationReport) -> Result<String, serde_json::Error> {
    let mut out = serde_json::Map::new();
    out.insert("outcome".to_string(), serde_json::to_value(report.outcome())?);

    // preserve_order keeps the struct's field order in the map
    if let Value::Object(fields) = serde_json::to_value(report)? {
        out.extend(fields);
    }

    serde_json::to_string_pretty(&Value::Object(out))
}

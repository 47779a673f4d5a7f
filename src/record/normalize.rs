use serde_json::Value;

use crate::error::ReportError;
use crate::record::record_model::{TestRecord, TestStatus};

// ============================================================================
// Record normalizer — validates raw runner output into canonical records
// ============================================================================

/// Normalize raw runner output into canonical `TestRecord`s.
///
/// Accepts either a top-level array of record objects or an object wrapping
/// the array in a `tests` field (both shapes appear in collector output).
/// Required fields: `suite`, `testName`, `status`. A status outside the
/// recognized set is rejected; a missing `durationMs` defaults to 0.
/// Input order is preserved exactly.
pub fn normalize_records(raw: &Value) -> Result<Vec<TestRecord>, ReportError> {
    let entries = match raw {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => match map.get("tests").and_then(Value::as_array) {
            Some(items) => items.as_slice(),
            None => {
                return Err(ReportError::DataShape {
                    context: "record-normalizer".to_string(),
                    detail: "expected an array of records or an object with a 'tests' array"
                        .to_string(),
                });
            }
        },
        _ => {
            return Err(ReportError::DataShape {
                context: "record-normalizer".to_string(),
                detail: format!("expected an array of records, got {}", value_kind(raw)),
            });
        }
    };

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| normalize_one(entry, index))
        .collect()
}

/// Validate and shape a single raw record.
fn normalize_one(entry: &Value, index: usize) -> Result<TestRecord, ReportError> {
    if !entry.is_object() {
        return Err(ReportError::DataShape {
            context: format!("record {}", index),
            detail: format!("expected an object, got {}", value_kind(entry)),
        });
    }

    let suite = required_string(entry, "suite", index)?;
    let test_name = required_string(entry, "testName", index)?;
    let status_text = required_string(entry, "status", index)?;

    let status = TestStatus::parse(&status_text).ok_or_else(|| ReportError::DataShape {
        context: format!("record {}", index),
        detail: format!("unknown status '{}'", status_text),
    })?;

    let duration_ms = match entry.get("durationMs") {
        None | Some(Value::Null) => 0,
        Some(v) => v.as_f64().map(|n| n.max(0.0) as u64).ok_or_else(|| {
            ReportError::DataShape {
                context: format!("record {}", index),
                detail: format!("durationMs is not a number: {}", v),
            }
        })?,
    };

    let error_message = entry
        .get("errorMessage")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string());

    Ok(TestRecord {
        suite,
        test_name,
        status,
        duration_ms,
        error_message,
    })
}

/// Extract a required non-empty string field.
fn required_string(entry: &Value, field: &str, index: usize) -> Result<String, ReportError> {
    entry
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.to_string())
        .ok_or_else(|| ReportError::DataShape {
            context: format!("record {}", index),
            detail: format!("missing required field '{}'", field),
        })
}

fn value_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

use serde_json::Value;

use crate::error::ReportError;
use crate::record::normalize::normalize_records;
use crate::record::record_model::TestRecord;

// ============================================================================
// Record file loader
// ============================================================================

/// Load and normalize test records from a JSON results file.
pub fn load_records(path: &str) -> Result<Vec<TestRecord>, ReportError> {
    let content = std::fs::read_to_string(path).map_err(|source| ReportError::Io {
        context: format!("reading results file '{}'", path),
        source,
    })?;

    let raw: Value = serde_json::from_str(&content).map_err(|source| ReportError::Json {
        context: format!("parsing results file '{}'", path),
        source,
    })?;

    normalize_records(&raw)
}

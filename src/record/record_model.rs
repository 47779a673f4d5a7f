use serde::{Deserialize, Serialize};

// ============================================================================
// Canonical test-run record — the only input shape the core operates on
// ============================================================================

/// Outcome of a single test. Closed set; anything else in the raw input is
/// rejected during normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Passed,
    Failed,
    Pending,
}

impl TestStatus {
    pub const ALL: [TestStatus; 3] = [TestStatus::Passed, TestStatus::Failed, TestStatus::Pending];

    /// The status text as it appears in report cells and raw records.
    pub fn as_str(&self) -> &'static str {
        match self {
            TestStatus::Passed => "passed",
            TestStatus::Failed => "failed",
            TestStatus::Pending => "pending",
        }
    }

    /// Parse a status string; `None` for anything outside the closed set.
    pub fn parse(s: &str) -> Option<TestStatus> {
        match s {
            "passed" => Some(TestStatus::Passed),
            "failed" => Some(TestStatus::Failed),
            "pending" => Some(TestStatus::Pending),
            _ => None,
        }
    }
}

/// One normalized test-run record. Immutable once loaded; the daily payload
/// builder emits exactly one body row per record, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRecord {
    /// Suite (spec file / describe block) the test belongs to. Adjacent body
    /// rows sharing a suite are eligible for merging.
    pub suite: String,

    /// Name of the individual test
    pub test_name: String,

    /// Outcome of the run
    pub status: TestStatus,

    /// Execution duration in milliseconds; 0 when the runner did not report one
    #[serde(default)]
    pub duration_ms: u64,

    /// Failure message, if the runner captured one
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error_message: Option<String>,
}

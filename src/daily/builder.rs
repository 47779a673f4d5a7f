use chrono::{DateTime, NaiveDate, Utc};

use crate::daily::payload_model::{Cell, ReportPayload, Row, SummaryField, DAILY_LAYOUT};
use crate::error::ReportError;
use crate::record::record_model::{TestRecord, TestStatus};
use crate::sheets::tabs::daily_tab_title;

// ============================================================================
// Daily payload builder — records in, header/body/footer rows out
// ============================================================================

pub const DAILY_REPORT_TITLE: &str = "Daily test report";

pub const DAILY_CAPTIONS: [&str; 5] = ["Suite", "Test", "Status", "Duration (ms)", "Error"];

/// Build the daily report payload from normalized records.
///
/// Emits exactly one body row per record, in input order — the merge
/// calculator relies on that adjacency contract. Header summary cells are
/// left as placeholders for the formula synthesizer. `generated_at` is an
/// input so identical arguments always produce an identical payload.
///
/// An empty record set is a build error: there is no body to report.
pub fn build_daily_payload(
    records: &[TestRecord],
    report_date: NaiveDate,
    generated_at: DateTime<Utc>,
) -> Result<ReportPayload, ReportError> {
    if records.is_empty() {
        return Err(ReportError::Build {
            context: "daily-builder".to_string(),
            detail: "no test records to report".to_string(),
        });
    }

    let header_payload = vec![
        vec![
            Cell::text(DAILY_REPORT_TITLE),
            Cell::text(daily_tab_title(report_date)),
            Cell::Placeholder(SummaryField::StatusCount {
                label: "Passed".to_string(),
                status: TestStatus::Passed,
            }),
            Cell::Placeholder(SummaryField::StatusCount {
                label: "Failed".to_string(),
                status: TestStatus::Failed,
            }),
            Cell::Placeholder(SummaryField::StatusCount {
                label: "Pending".to_string(),
                status: TestStatus::Pending,
            }),
        ],
        DAILY_CAPTIONS.iter().copied().map(Cell::text).collect(),
    ];

    let body_payload = records.iter().map(record_row).collect();

    let footer_payload = vec![vec![Cell::text(format!(
        "Generated {}",
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ))]];

    Ok(ReportPayload {
        header_payload,
        body_payload,
        footer_payload,
        layout: DAILY_LAYOUT,
    })
}

/// One body row per record. Pending tests carry their own status text and an
/// empty error cell, so they render distinctly from passed and failed rows.
fn record_row(record: &TestRecord) -> Row {
    vec![
        Cell::text(record.suite.as_str()),
        Cell::text(record.test_name.as_str()),
        Cell::text(record.status.as_str()),
        Cell::Number(record.duration_ms as f64),
        Cell::text(record.error_message.as_deref().unwrap_or("")),
    ]
}

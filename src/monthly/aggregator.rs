use chrono::{DateTime, NaiveDate, Utc};

use crate::daily::payload_model::{
    Cell, PayloadLayout, ReportPayload, SummaryField, DAILY_LAYOUT, MONTHLY_LAYOUT,
};
use crate::error::ReportError;
use crate::record::record_model::TestStatus;
use crate::sheets::client::SheetsApi;
use crate::sheets::tabs::{daily_tab_title, month_days, monthly_tab_title};

// ============================================================================
// Monthly aggregator — fold daily tabs into one summary payload
// ============================================================================

pub const MONTHLY_REPORT_TITLE: &str = "Monthly test summary";

pub const MONTHLY_CAPTIONS: [&str; 6] =
    ["Date", "Passed", "Failed", "Pending", "Pass rate", "Outcome"];

/// One calendar day's aggregate, read back from its daily tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayTotals {
    pub date: NaiveDate,
    pub passed: usize,
    pub failed: usize,
    pub pending: usize,
}

impl DayTotals {
    pub fn total(&self) -> usize {
        self.passed + self.failed + self.pending
    }

    /// `passed / (passed + failed + pending)`; 0 when no tests ran.
    pub fn pass_rate(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.passed as f64 / self.total() as f64
        }
    }

    /// Day-level outcome: failed if any test failed, else passed. Drives the
    /// summary's conditional formatting the same way per-test status does.
    pub fn outcome(&self) -> TestStatus {
        if self.failed > 0 {
            TestStatus::Failed
        } else {
            TestStatus::Passed
        }
    }
}

/// Read every daily tab in `month_start`'s month, in chronological order.
///
/// Days without a tab are skipped entirely, not zero-filled: the summary
/// reports only days that actually ran tests.
pub fn collect_month_totals(
    client: &dyn SheetsApi,
    month_start: NaiveDate,
) -> Result<Vec<DayTotals>, ReportError> {
    let mut days = Vec::new();
    for date in month_days(month_start) {
        let title = daily_tab_title(date);
        let Some(rows) = client.read_rows(&title)? else {
            continue;
        };
        days.push(day_totals_from_rows(date, &title, &rows)?);
    }
    Ok(days)
}

/// Count statuses from one daily tab's read-back rows. The fixed daily
/// header/footer shape is stripped; the status column is counted per row.
fn day_totals_from_rows(
    date: NaiveDate,
    title: &str,
    rows: &[Vec<String>],
) -> Result<DayTotals, ReportError> {
    let layout = DAILY_LAYOUT;
    let body = body_slice(rows, &layout);

    let mut totals = DayTotals {
        date,
        passed: 0,
        failed: 0,
        pending: 0,
    };
    for (i, row) in body.iter().enumerate() {
        let text = row
            .get(layout.status_column)
            .map(String::as_str)
            .unwrap_or("");
        match TestStatus::parse(text) {
            Some(TestStatus::Passed) => totals.passed += 1,
            Some(TestStatus::Failed) => totals.failed += 1,
            Some(TestStatus::Pending) => totals.pending += 1,
            None => {
                return Err(ReportError::DataShape {
                    context: format!("tab '{}'", title),
                    detail: format!(
                        "row {}: unrecognized status '{}'",
                        i + layout.header_rows + 1,
                        text
                    ),
                });
            }
        }
    }
    Ok(totals)
}

fn body_slice<'a>(rows: &'a [Vec<String>], layout: &PayloadLayout) -> &'a [Vec<String>] {
    let start = layout.header_rows.min(rows.len());
    let end = rows.len().saturating_sub(layout.footer_rows).max(start);
    &rows[start..end]
}

// ============================================================================
// Monthly payload builder — same row conventions as the daily builder
// ============================================================================

/// Build the monthly summary payload: one body row per present day, in the
/// order collected (chronological). Feeds the same formula, merge, format,
/// and style generators as the daily payload.
pub fn build_monthly_payload(
    days: &[DayTotals],
    month_start: NaiveDate,
    generated_at: DateTime<Utc>,
) -> Result<ReportPayload, ReportError> {
    if days.is_empty() {
        return Err(ReportError::Build {
            context: "monthly-builder".to_string(),
            detail: format!(
                "no daily tabs found for {}",
                monthly_tab_title(month_start)
            ),
        });
    }

    let header_payload = vec![
        vec![
            Cell::text(MONTHLY_REPORT_TITLE),
            Cell::text(monthly_tab_title(month_start)),
            Cell::Placeholder(SummaryField::ColumnSum {
                label: "Passed".to_string(),
                column: 1,
            }),
            Cell::Placeholder(SummaryField::ColumnSum {
                label: "Failed".to_string(),
                column: 2,
            }),
            Cell::Placeholder(SummaryField::ColumnSum {
                label: "Pending".to_string(),
                column: 3,
            }),
            Cell::Placeholder(SummaryField::ColumnAverage {
                label: "Avg pass rate".to_string(),
                column: 4,
            }),
        ],
        MONTHLY_CAPTIONS.iter().copied().map(Cell::text).collect(),
    ];

    let body_payload = days.iter().map(day_row).collect();

    let footer_payload = vec![vec![Cell::text(format!(
        "Generated {}",
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ))]];

    Ok(ReportPayload {
        header_payload,
        body_payload,
        footer_payload,
        layout: MONTHLY_LAYOUT,
    })
}

fn day_row(day: &DayTotals) -> Vec<Cell> {
    vec![
        Cell::text(daily_tab_title(day.date)),
        Cell::Number(day.passed as f64),
        Cell::Number(day.failed as f64),
        Cell::Number(day.pending as f64),
        Cell::Number(day.pass_rate()),
        Cell::text(day.outcome().as_str()),
    ]
}

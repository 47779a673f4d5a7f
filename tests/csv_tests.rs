use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use shadow_report::daily::builder::build_daily_payload;
use shadow_report::daily::formulas::resolve_header_literals;
use shadow_report::record::record_model::{TestRecord, TestStatus};
use shadow_report::report::csv::payload_to_csv;

// ============================================================================
// Helper builders
// ============================================================================

fn record(suite: &str, name: &str, status: TestStatus, error: Option<&str>) -> TestRecord {
    TestRecord {
        suite: suite.to_string(),
        test_name: name.to_string(),
        status,
        duration_ms: 120,
        error_message: error.map(|e| e.to_string()),
    }
}

fn csv_for(records: &[TestRecord]) -> String {
    let payload = resolve_header_literals(
        build_daily_payload(
            records,
            NaiveDate::from_ymd_opt(2026, 8, 6).unwrap(),
            Utc.with_ymd_and_hms(2026, 8, 6, 18, 30, 0).unwrap(),
        )
        .unwrap(),
    )
    .unwrap();
    payload_to_csv(&payload).unwrap()
}

fn generated_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 6, 18, 30, 0).unwrap()
}

// ============================================================================
// 1. One CSV record per payload row
// ============================================================================

#[test]
fn csv_row_count() {
    let records = vec![
        record("a", "t1", TestStatus::Passed, None),
        record("a", "t2", TestStatus::Failed, Some("nope")),
    ];
    let csv = csv_for(&records);
    // 2 header + 2 body + 1 footer
    assert_eq!(csv.lines().count(), 5);
}

// ============================================================================
// 2. Header summaries are literals, not formulas
// ============================================================================

#[test]
fn csv_header_literals() {
    let records = vec![
        record("a", "t1", TestStatus::Passed, None),
        record("a", "t2", TestStatus::Failed, Some("nope")),
        record("b", "t3", TestStatus::Passed, None),
    ];
    let csv = csv_for(&records);
    let header = csv.lines().next().unwrap();

    assert!(header.contains("Passed: 2"));
    assert!(header.contains("Failed: 1"));
    assert!(!header.contains("COUNTIF"));
    assert!(!header.contains('='));
}

// ============================================================================
// 3. Fields containing commas are quoted
// ============================================================================

#[test]
fn csv_quotes_embedded_commas() {
    let records = vec![record(
        "suite",
        "handles a, b, and c",
        TestStatus::Failed,
        Some("expected 1, got 2"),
    )];
    let csv = csv_for(&records);
    let body_line = csv.lines().nth(2).unwrap();

    assert!(body_line.contains("\"handles a, b, and c\""));
    assert!(body_line.contains("\"expected 1, got 2\""));
}

// ============================================================================
// 4. Short footer rows are padded to the full column count
// ============================================================================

#[test]
fn csv_pads_short_rows() {
    let records = vec![record("a", "t1", TestStatus::Passed, None)];
    let csv = csv_for(&records);
    let footer_line = csv.lines().last().unwrap();

    // footer has one cell; four empty columns follow
    assert_eq!(footer_line.matches(',').count(), 4);
    assert!(footer_line.starts_with("Generated "));
}

// ============================================================================
// 5. Body order matches input order
// ============================================================================

#[test]
fn csv_preserves_body_order() {
    let records = vec![
        record("z", "last-suite first", TestStatus::Passed, None),
        record("a", "alpha-suite second", TestStatus::Passed, None),
    ];
    let csv = csv_for(&records);
    let lines: Vec<&str> = csv.lines().collect();

    assert!(lines[2].contains("last-suite first"));
    assert!(lines[3].contains("alpha-suite second"));
}

// ============================================================================
// 6. Monthly payloads render through the same exporter
// ============================================================================

#[test]
fn csv_of_monthly_payload() {
    use shadow_report::monthly::aggregator::{build_monthly_payload, DayTotals};

    let days = vec![DayTotals {
        date: NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
        passed: 4,
        failed: 0,
        pending: 0,
    }];
    let payload = resolve_header_literals(
        build_monthly_payload(
            &days,
            NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
            generated_at(),
        )
        .unwrap(),
    )
    .unwrap();

    let csv = payload_to_csv(&payload).unwrap();
    assert!(csv.contains("Monthly test summary"));
    assert!(csv.contains("Jul 1, 2026"));
    assert!(csv.contains("Passed: 4"));
}

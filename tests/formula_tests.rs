use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use shadow_report::daily::builder::build_daily_payload;
use shadow_report::daily::formulas::{
    column_letter, resolve_header_formulas, resolve_header_literals,
};
use shadow_report::daily::payload_model::Cell;
use shadow_report::monthly::aggregator::{build_monthly_payload, DayTotals};
use shadow_report::record::record_model::{TestRecord, TestStatus};

// ============================================================================
// Helper builders
// ============================================================================

fn record(suite: &str, name: &str, status: TestStatus) -> TestRecord {
    TestRecord {
        suite: suite.to_string(),
        test_name: name.to_string(),
        status,
        duration_ms: 100,
        error_message: None,
    }
}

fn report_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 6).unwrap()
}

fn generated_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 6, 18, 30, 0).unwrap()
}

fn three_record_payload() -> shadow_report::daily::payload_model::ReportPayload {
    let records = vec![
        record("A", "t1", TestStatus::Passed),
        record("A", "t2", TestStatus::Failed),
        record("B", "t3", TestStatus::Pending),
    ];
    build_daily_payload(&records, report_date(), generated_at()).unwrap()
}

// ============================================================================
// 1. Column letters
// ============================================================================

#[test]
fn column_letters() {
    assert_eq!(column_letter(0), "A");
    assert_eq!(column_letter(2), "C");
    assert_eq!(column_letter(25), "Z");
    assert_eq!(column_letter(26), "AA");
    assert_eq!(column_letter(27), "AB");
    assert_eq!(column_letter(51), "AZ");
    assert_eq!(column_letter(52), "BA");
}

// ============================================================================
// 2. All placeholders resolved
// ============================================================================

#[test]
fn resolution_leaves_no_placeholders() {
    let payload = resolve_header_formulas(three_record_payload()).unwrap();
    for row in &payload.header_payload {
        assert!(row.iter().all(|cell| !cell.is_placeholder()));
    }
}

// ============================================================================
// 3. Daily status-count formulas use the absolute body range
// ============================================================================

#[test]
fn daily_status_count_formulas() {
    // header length 2 => body rows 3..=5
    let payload = resolve_header_formulas(three_record_payload()).unwrap();
    let title_row = &payload.header_payload[0];

    assert_eq!(
        title_row[2],
        Cell::Formula("=\"Passed: \"&COUNTIF($C$3:$C$5,\"passed\")".to_string())
    );
    assert_eq!(
        title_row[3],
        Cell::Formula("=\"Failed: \"&COUNTIF($C$3:$C$5,\"failed\")".to_string())
    );
    assert_eq!(
        title_row[4],
        Cell::Formula("=\"Pending: \"&COUNTIF($C$3:$C$5,\"pending\")".to_string())
    );
}

// ============================================================================
// 4. Formula range grows with the body
// ============================================================================

#[test]
fn formula_range_tracks_body_size() {
    let records: Vec<TestRecord> = (0..10)
        .map(|i| record("s", &format!("t{}", i), TestStatus::Passed))
        .collect();
    let payload = resolve_header_formulas(
        build_daily_payload(&records, report_date(), generated_at()).unwrap(),
    )
    .unwrap();

    // body rows 3..=12
    match &payload.header_payload[0][2] {
        Cell::Formula(f) => assert!(f.contains("$C$3:$C$12"), "formula was {}", f),
        other => panic!("expected formula, got {:?}", other),
    }
}

// ============================================================================
// 5. Body and footer are untouched by resolution
// ============================================================================

#[test]
fn resolution_only_touches_header() {
    let before = three_record_payload();
    let after = resolve_header_formulas(before.clone()).unwrap();
    assert_eq!(before.body_payload, after.body_payload);
    assert_eq!(before.footer_payload, after.footer_payload);
}

// ============================================================================
// 6. Literal resolution computes the same summaries for CSV
// ============================================================================

#[test]
fn literal_resolution_counts() {
    let payload = resolve_header_literals(three_record_payload()).unwrap();
    let title_row = &payload.header_payload[0];

    assert_eq!(title_row[2], Cell::Text("Passed: 1".to_string()));
    assert_eq!(title_row[3], Cell::Text("Failed: 1".to_string()));
    assert_eq!(title_row[4], Cell::Text("Pending: 1".to_string()));
}

// ============================================================================
// 7. Monthly sum and average formulas
// ============================================================================

#[test]
fn monthly_formulas() {
    let days = vec![
        DayTotals {
            date: NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
            passed: 8,
            failed: 2,
            pending: 0,
        },
        DayTotals {
            date: NaiveDate::from_ymd_opt(2026, 7, 2).unwrap(),
            passed: 10,
            failed: 0,
            pending: 1,
        },
    ];
    let month_start = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
    let payload = resolve_header_formulas(
        build_monthly_payload(&days, month_start, generated_at()).unwrap(),
    )
    .unwrap();

    let title_row = &payload.header_payload[0];
    // two body rows => rows 3..=4
    assert_eq!(
        title_row[2],
        Cell::Formula("=\"Passed: \"&SUM($B$3:$B$4)".to_string())
    );
    assert_eq!(
        title_row[3],
        Cell::Formula("=\"Failed: \"&SUM($C$3:$C$4)".to_string())
    );
    assert_eq!(
        title_row[5],
        Cell::Formula("=\"Avg pass rate: \"&TEXT(AVERAGE($E$3:$E$4),\"0.0%\")".to_string())
    );
}

// ============================================================================
// 8. Monthly literal average
// ============================================================================

#[test]
fn monthly_literal_average() {
    let days = vec![
        DayTotals {
            date: NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
            passed: 3,
            failed: 1,
            pending: 0,
        },
        DayTotals {
            date: NaiveDate::from_ymd_opt(2026, 7, 2).unwrap(),
            passed: 1,
            failed: 1,
            pending: 2,
        },
    ];
    let month_start = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
    let payload = resolve_header_literals(
        build_monthly_payload(&days, month_start, generated_at()).unwrap(),
    )
    .unwrap();

    // pass rates 0.75 and 0.25, average 50%
    assert_eq!(
        payload.header_payload[0][5],
        Cell::Text("Avg pass rate: 50.0%".to_string())
    );
    assert_eq!(
        payload.header_payload[0][2],
        Cell::Text("Passed: 4".to_string())
    );
}

// ============================================================================
// 9. Resolution is idempotent once resolved
// ============================================================================

#[test]
fn resolution_idempotent() {
    let once = resolve_header_formulas(three_record_payload()).unwrap();
    let twice = resolve_header_formulas(once.clone()).unwrap();
    assert_eq!(once, twice);
}

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use shadow_report::daily::builder::build_daily_payload;
use shadow_report::daily::merges::{merge_regions, MergeRegion};
use shadow_report::record::record_model::{TestRecord, TestStatus};
use shadow_report::sheets::requests::Request;

// ============================================================================
// Helper builders
// ============================================================================

const TAB_ID: i64 = 7;

fn record(suite: &str, name: &str) -> TestRecord {
    TestRecord {
        suite: suite.to_string(),
        test_name: name.to_string(),
        status: TestStatus::Passed,
        duration_ms: 5,
        error_message: None,
    }
}

fn payload_for(suites: &[&str]) -> shadow_report::daily::payload_model::ReportPayload {
    let records: Vec<TestRecord> = suites
        .iter()
        .enumerate()
        .map(|(i, suite)| record(suite, &format!("t{}", i)))
        .collect();
    build_daily_payload(
        &records,
        NaiveDate::from_ymd_opt(2026, 8, 6).unwrap(),
        generated_at(),
    )
    .unwrap()
}

fn generated_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 6, 18, 30, 0).unwrap()
}

// ============================================================================
// 1. Worked example: two A rows merge, single B row does not
// ============================================================================

#[test]
fn example_merge_regions() {
    let payload = payload_for(&["A", "A", "B"]);
    let offset = payload.header_row_index() - 1;
    assert_eq!(offset, 2);

    let regions = merge_regions(&payload, offset, TAB_ID).unwrap();
    assert_eq!(
        regions,
        vec![MergeRegion {
            sheet_id: TAB_ID,
            start_row: 2,
            end_row: 3,
            start_column: 0,
            end_column: 0,
        }]
    );
}

// ============================================================================
// 2. No repeated group keys, no regions
// ============================================================================

#[test]
fn unique_suites_no_regions() {
    let payload = payload_for(&["A", "B", "C"]);
    let regions = merge_regions(&payload, 2, TAB_ID).unwrap();
    assert!(regions.is_empty());
}

// ============================================================================
// 3. One suite across the whole body, one region
// ============================================================================

#[test]
fn single_suite_single_region() {
    let payload = payload_for(&["A", "A", "A", "A"]);
    let regions = merge_regions(&payload, 2, TAB_ID).unwrap();
    assert_eq!(regions.len(), 1);
    assert_eq!(regions[0].start_row, 2);
    assert_eq!(regions[0].end_row, 5);
}

// ============================================================================
// 4. Multiple runs: disjoint and ordered by start row
// ============================================================================

#[test]
fn multiple_runs_disjoint_ordered() {
    let payload = payload_for(&["A", "A", "B", "C", "C", "C"]);
    let regions = merge_regions(&payload, 2, TAB_ID).unwrap();

    assert_eq!(regions.len(), 2);
    assert_eq!((regions[0].start_row, regions[0].end_row), (2, 3));
    assert_eq!((regions[1].start_row, regions[1].end_row), (5, 7));

    for pair in regions.windows(2) {
        assert!(pair[0].end_row < pair[1].start_row);
    }
}

// ============================================================================
// 5. Non-adjacent repeats never merge
// ============================================================================

#[test]
fn non_adjacent_repeats_not_merged() {
    let payload = payload_for(&["A", "B", "A"]);
    let regions = merge_regions(&payload, 2, TAB_ID).unwrap();
    assert!(regions.is_empty());
}

// ============================================================================
// 6. Regions cover only the group column
// ============================================================================

#[test]
fn regions_limited_to_group_column() {
    let payload = payload_for(&["A", "A"]);
    let regions = merge_regions(&payload, 2, TAB_ID).unwrap();
    assert_eq!(regions[0].start_column, 0);
    assert_eq!(regions[0].end_column, 0);
}

// ============================================================================
// 7. Offset translates builder-local rows to tab rows
// ============================================================================

#[test]
fn offset_translation() {
    let payload = payload_for(&["A", "A"]);
    let regions = merge_regions(&payload, 10, TAB_ID).unwrap();
    assert_eq!(regions[0].start_row, 10);
    assert_eq!(regions[0].end_row, 11);
}

// ============================================================================
// 8. Regions lie within the body rows
// ============================================================================

#[test]
fn regions_within_body_bounds() {
    let payload = payload_for(&["A", "A", "B", "B", "C"]);
    let offset = payload.header_row_index() - 1;
    let regions = merge_regions(&payload, offset, TAB_ID).unwrap();

    let body_end = offset + payload.body_row_count();
    for region in &regions {
        assert!(region.start_row >= offset);
        assert!(region.end_row < body_end);
        assert!(region.start_row <= region.end_row);
    }
}

// ============================================================================
// 9. Request conversion uses half-open indices
// ============================================================================

#[test]
fn region_to_request() {
    let region = MergeRegion {
        sheet_id: TAB_ID,
        start_row: 2,
        end_row: 3,
        start_column: 0,
        end_column: 0,
    };

    match region.to_request() {
        Request::MergeCells(merge) => {
            assert_eq!(merge.range.sheet_id, TAB_ID);
            assert_eq!(merge.range.start_row_index, 2);
            assert_eq!(merge.range.end_row_index, 4);
            assert_eq!(merge.range.start_column_index, 0);
            assert_eq!(merge.range.end_column_index, 1);
            assert_eq!(merge.merge_type, "MERGE_ALL");
        }
        other => panic!("expected MergeCells, got {:?}", other),
    }
}

// ============================================================================
// 10. Request serialization carries the wire tag
// ============================================================================

#[test]
fn merge_request_wire_shape() {
    let payload = payload_for(&["A", "A"]);
    let regions = merge_regions(&payload, 2, TAB_ID).unwrap();
    let value = serde_json::to_value(regions[0].to_request()).unwrap();

    assert!(value.get("mergeCells").is_some());
    assert_eq!(
        value.pointer("/mergeCells/range/startRowIndex"),
        Some(&serde_json::json!(2))
    );
    assert_eq!(
        value.pointer("/mergeCells/mergeType"),
        Some(&serde_json::json!("MERGE_ALL"))
    );
}

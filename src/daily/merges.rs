use crate::daily::payload_model::ReportPayload;
use crate::error::ReportError;
use crate::sheets::requests::{GridRange, MergeCellsRequest, Request};

// ============================================================================
// Merge region calculator — contiguous group-key runs become merged cells
// ============================================================================

/// An instruction to merge a vertical run of cells. All indices are 0-based
/// and inclusive, translated to tab-absolute rows by the caller's offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeRegion {
    pub sheet_id: i64,
    pub start_row: usize,
    pub end_row: usize,
    pub start_column: usize,
    pub end_column: usize,
}

impl MergeRegion {
    /// The batch-update request for this region. The API uses half-open
    /// indices, so the inclusive ends are bumped by one.
    pub fn to_request(&self) -> Request {
        Request::MergeCells(MergeCellsRequest {
            range: GridRange {
                sheet_id: self.sheet_id,
                start_row_index: self.start_row,
                end_row_index: self.end_row + 1,
                start_column_index: self.start_column,
                end_column_index: self.end_column + 1,
            },
            merge_type: "MERGE_ALL",
        })
    }
}

/// Scan body rows in order and emit one merge region per run of two or more
/// adjacent rows sharing the layout's group-column value.
///
/// `row_offset` translates builder-local body indices to tab-absolute rows
/// (`header_row_index - 1`). Regions cover only the group column — merging
/// the full row would obscure per-test detail columns. The result is
/// disjoint, ordered by `start_row`, and bounded by the body rows.
pub fn merge_regions(
    payload: &ReportPayload,
    row_offset: usize,
    sheet_id: i64,
) -> Result<Vec<MergeRegion>, ReportError> {
    let group_column = payload.layout.group_column;
    let body = &payload.body_payload;

    let mut regions = Vec::new();
    let mut run_start = 0usize;
    let mut run_key: Option<String> = None;

    for (i, row) in body.iter().enumerate() {
        let key = row
            .get(group_column)
            .map(|cell| cell.rendered())
            .ok_or_else(|| ReportError::Range {
                component: "merge-calculator".to_string(),
                detail: format!("body row {} has no group column {}", i, group_column),
            })?;

        match &run_key {
            Some(current) if *current == key => {}
            _ => {
                close_run(&mut regions, run_start, i, row_offset, group_column, sheet_id);
                run_start = i;
                run_key = Some(key);
            }
        }
    }
    close_run(
        &mut regions,
        run_start,
        body.len(),
        row_offset,
        group_column,
        sheet_id,
    );

    // A region outside the body rows is a calculator bug, not a clamp case.
    let body_end = row_offset + body.len();
    for region in &regions {
        if region.start_row < row_offset || region.end_row >= body_end {
            return Err(ReportError::Range {
                component: "merge-calculator".to_string(),
                detail: format!(
                    "region rows {}..={} outside body rows {}..{}",
                    region.start_row, region.end_row, row_offset, body_end
                ),
            });
        }
    }

    Ok(regions)
}

/// Close the run `[run_start, end)`; single-row runs are not merged.
fn close_run(
    regions: &mut Vec<MergeRegion>,
    run_start: usize,
    end: usize,
    row_offset: usize,
    group_column: usize,
    sheet_id: i64,
) {
    if end - run_start >= 2 {
        regions.push(MergeRegion {
            sheet_id,
            start_row: row_offset + run_start,
            end_row: row_offset + end - 1,
            start_column: group_column,
            end_column: group_column,
        });
    }
}

use crate::daily::merges::merge_regions;
use crate::daily::payload_model::{ReportPayload, Row};
use crate::error::ReportError;
use crate::record::record_model::TestStatus;
use crate::sheets::requests::Request;
use crate::styles::conditional::conditional_format_requests;
use crate::styles::grid::{
    color_style_requests, column_width_requests, frozen_header_request, row_height_requests,
    text_alignment_requests, text_style_requests, wrap_strategy_requests,
};

// ============================================================================
// Compute phase — one ordered fragment list per report
// ============================================================================

/// One submission-ready fragment: either a structural value write or a batch
/// of cosmetic update requests.
#[derive(Debug, Clone, PartialEq)]
pub enum SheetOp {
    WriteRows { tab_title: String, rows: Vec<Row> },
    Batch { label: &'static str, requests: Vec<Request> },
}

/// Derive the complete ordered operation list for one report payload.
///
/// Pure: no network, no mutation of the payload. Structural value writes
/// (header, body, footer) come first so cosmetic operations never reference
/// rows that have not been written; merges go last, after every cell-level
/// format. Empty batches are dropped rather than submitted.
pub fn report_ops(
    payload: &ReportPayload,
    tab_title: &str,
    sheet_id: i64,
) -> Result<Vec<SheetOp>, ReportError> {
    for row in &payload.header_payload {
        if row.iter().any(|cell| cell.is_placeholder()) {
            return Err(ReportError::Build {
                context: "report-ops".to_string(),
                detail: "header placeholders not resolved to formulas".to_string(),
            });
        }
    }

    let mut ops = vec![
        SheetOp::WriteRows {
            tab_title: tab_title.to_string(),
            rows: payload.header_payload.clone(),
        },
        SheetOp::WriteRows {
            tab_title: tab_title.to_string(),
            rows: payload.body_payload.clone(),
        },
        SheetOp::WriteRows {
            tab_title: tab_title.to_string(),
            rows: payload.footer_payload.clone(),
        },
    ];

    let mut push_batch = |label: &'static str, requests: Vec<Request>| {
        if !requests.is_empty() {
            ops.push(SheetOp::Batch { label, requests });
        }
    };

    let mut conditional = conditional_format_requests(sheet_id, payload, TestStatus::Failed)?;
    conditional.extend(conditional_format_requests(
        sheet_id,
        payload,
        TestStatus::Passed,
    )?);
    push_batch("conditional-format", conditional);

    push_batch("freeze-header", vec![frozen_header_request(sheet_id, payload)]);
    push_batch("color-styles", color_style_requests(sheet_id, payload)?);
    push_batch("row-heights", row_height_requests(sheet_id, payload)?);
    push_batch("text-styles", text_style_requests(sheet_id, payload)?);
    push_batch("text-wrap", wrap_strategy_requests(sheet_id, payload)?);
    push_batch("text-alignment", text_alignment_requests(sheet_id, payload)?);
    push_batch("column-widths", column_width_requests(sheet_id, payload)?);

    let regions = merge_regions(payload, payload.header_row_index() - 1, sheet_id)?;
    push_batch(
        "row-merges",
        regions.iter().map(|region| region.to_request()).collect(),
    );

    Ok(ops)
}

use crate::daily::formulas::column_letter;
use crate::daily::payload_model::ReportPayload;
use crate::error::ReportError;
use crate::record::record_model::TestStatus;
use crate::sheets::requests::{
    AddConditionalFormatRuleRequest, BooleanCondition, BooleanRule, CellFormat, Color,
    ConditionValue, ConditionalFormatRule, GridRange, Request,
};

// ============================================================================
// Conditional format generator — highlight rows by status
// ============================================================================

const FAILED_FILL: Color = Color::rgb(0.957, 0.78, 0.765);
const PASSED_FILL: Color = Color::rgb(0.851, 0.918, 0.827);
const PENDING_FILL: Color = Color::rgb(0.988, 0.91, 0.698);

fn status_fill(status: TestStatus) -> Color {
    match status {
        TestStatus::Failed => FAILED_FILL,
        TestStatus::Passed => PASSED_FILL,
        TestStatus::Pending => PENDING_FILL,
    }
}

/// Emit one highlight rule per body row whose status matches `target`.
///
/// Each rule covers that row's full data width and keys on the status column
/// with an absolute-column custom formula, so the fill applies to the whole
/// row. Rows matching another status produce nothing in this pass; invoking
/// the generator once per status and concatenating the results yields the
/// same rule set as a single combined pass — there is no shared accumulator.
pub fn conditional_format_requests(
    sheet_id: i64,
    payload: &ReportPayload,
    target: TestStatus,
) -> Result<Vec<Request>, ReportError> {
    let offset = payload.header_row_index() - 1;
    let status_column = payload.layout.status_column;
    let status_letter = column_letter(status_column);
    let width = payload.layout.column_count;

    let mut requests = Vec::new();
    for (i, row) in payload.body_payload.iter().enumerate() {
        let status_text = row
            .get(status_column)
            .map(|cell| cell.rendered())
            .unwrap_or_default();
        if status_text != target.as_str() {
            continue;
        }

        let sheet_row = offset + i;
        if sheet_row >= payload.total_rows() {
            return Err(ReportError::Range {
                component: "conditional-format".to_string(),
                detail: format!(
                    "rule row {} outside body rows {}..{}",
                    sheet_row,
                    offset,
                    payload.total_rows()
                ),
            });
        }

        let formula = format!(
            "=${}{}=\"{}\"",
            status_letter,
            sheet_row + 1,
            target.as_str()
        );
        requests.push(Request::AddConditionalFormatRule(
            AddConditionalFormatRuleRequest {
                rule: ConditionalFormatRule {
                    ranges: vec![GridRange {
                        sheet_id,
                        start_row_index: sheet_row,
                        end_row_index: sheet_row + 1,
                        start_column_index: 0,
                        end_column_index: width,
                    }],
                    boolean_rule: BooleanRule {
                        condition: BooleanCondition {
                            condition_type: "CUSTOM_FORMULA",
                            values: vec![ConditionValue {
                                user_entered_value: formula,
                            }],
                        },
                        format: CellFormat {
                            background_color: Some(status_fill(target)),
                            ..CellFormat::default()
                        },
                    },
                },
                index: None,
            },
        ));
    }

    Ok(requests)
}

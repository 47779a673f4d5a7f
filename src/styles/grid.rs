use crate::daily::payload_model::ReportPayload;
use crate::error::ReportError;
use crate::sheets::requests::{
    CellData, CellFormat, Color, DimensionProperties, DimensionRange, GridProperties, GridRange,
    RepeatCellRequest, Request, SheetProperties, TextFormat, UpdateDimensionPropertiesRequest,
    UpdateSheetPropertiesRequest,
};

// ============================================================================
// Style payload generators — independent pure derivations from one payload
// ============================================================================
//
// Each generator takes (sheet id, payload) and produces its own request set
// scoped to the rows/columns the payload occupies. None depends on another's
// output, so any subset may be generated in any order and concatenated.

const HEADER_BAND: Color = Color::rgb(0.937, 0.937, 0.937);
const FOOTER_TEXT: Color = Color::rgb(0.6, 0.6, 0.6);
const ROW_HEIGHT_PX: i64 = 21;

/// Pin the header rows while the body scrolls.
pub fn frozen_header_request(sheet_id: i64, payload: &ReportPayload) -> Request {
    Request::UpdateSheetProperties(UpdateSheetPropertiesRequest {
        properties: SheetProperties {
            sheet_id,
            grid_properties: GridProperties {
                frozen_row_count: payload.header_payload.len(),
            },
        },
        fields: "gridProperties.frozenRowCount",
    })
}

/// Background band behind the header rows.
pub fn color_style_requests(
    sheet_id: i64,
    payload: &ReportPayload,
) -> Result<Vec<Request>, ReportError> {
    let requests = vec![repeat_format(
        header_range(sheet_id, payload),
        CellFormat {
            background_color: Some(HEADER_BAND),
            ..CellFormat::default()
        },
        "userEnteredFormat.backgroundColor",
    )];
    bounded("color-styles", payload, &requests)?;
    Ok(requests)
}

/// Uniform pixel height over every payload row, footer included.
pub fn row_height_requests(
    sheet_id: i64,
    payload: &ReportPayload,
) -> Result<Vec<Request>, ReportError> {
    Ok(vec![Request::UpdateDimensionProperties(
        UpdateDimensionPropertiesRequest {
            range: DimensionRange {
                sheet_id,
                dimension: "ROWS",
                start_index: 0,
                end_index: payload.row_extent(),
            },
            properties: DimensionProperties {
                pixel_size: ROW_HEIGHT_PX,
            },
            fields: "pixelSize",
        },
    )])
}

/// Bold header text; muted italic footer.
pub fn text_style_requests(
    sheet_id: i64,
    payload: &ReportPayload,
) -> Result<Vec<Request>, ReportError> {
    let requests = vec![
        repeat_format(
            header_range(sheet_id, payload),
            CellFormat {
                text_format: Some(TextFormat {
                    bold: Some(true),
                    ..TextFormat::default()
                }),
                ..CellFormat::default()
            },
            "userEnteredFormat.textFormat.bold",
        ),
        repeat_format(
            footer_range(sheet_id, payload),
            CellFormat {
                text_format: Some(TextFormat {
                    italic: Some(true),
                    foreground_color: Some(FOOTER_TEXT),
                    ..TextFormat::default()
                }),
                ..CellFormat::default()
            },
            "userEnteredFormat.textFormat.italic,userEnteredFormat.textFormat.foregroundColor",
        ),
    ];
    bounded("text-styles", payload, &requests)?;
    Ok(requests)
}

/// Clip overflowing text everywhere the payload writes.
pub fn wrap_strategy_requests(
    sheet_id: i64,
    payload: &ReportPayload,
) -> Result<Vec<Request>, ReportError> {
    let requests = vec![repeat_format(
        full_range(sheet_id, payload),
        CellFormat {
            wrap_strategy: Some("CLIP"),
            ..CellFormat::default()
        },
        "userEnteredFormat.wrapStrategy",
    )];
    bounded("text-wrap", payload, &requests)?;
    Ok(requests)
}

/// Left-align everything, then center the status column over the body.
pub fn text_alignment_requests(
    sheet_id: i64,
    payload: &ReportPayload,
) -> Result<Vec<Request>, ReportError> {
    let offset = payload.header_row_index() - 1;
    let status_column = payload.layout.status_column;
    let requests = vec![
        repeat_format(
            full_range(sheet_id, payload),
            CellFormat {
                horizontal_alignment: Some("LEFT"),
                ..CellFormat::default()
            },
            "userEnteredFormat.horizontalAlignment",
        ),
        repeat_format(
            GridRange {
                sheet_id,
                start_row_index: offset,
                end_row_index: payload.total_rows(),
                start_column_index: status_column,
                end_column_index: status_column + 1,
            },
            CellFormat {
                horizontal_alignment: Some("CENTER"),
                ..CellFormat::default()
            },
            "userEnteredFormat.horizontalAlignment",
        ),
    ];
    bounded("text-alignment", payload, &requests)?;
    Ok(requests)
}

/// Per-column pixel widths from the payload layout.
pub fn column_width_requests(
    sheet_id: i64,
    payload: &ReportPayload,
) -> Result<Vec<Request>, ReportError> {
    let widths = payload.layout.column_widths;
    if widths.len() != payload.layout.column_count {
        return Err(ReportError::Range {
            component: "column-widths".to_string(),
            detail: format!(
                "layout declares {} columns but {} widths",
                payload.layout.column_count,
                widths.len()
            ),
        });
    }

    Ok(widths
        .iter()
        .enumerate()
        .map(|(column, width)| {
            Request::UpdateDimensionProperties(UpdateDimensionPropertiesRequest {
                range: DimensionRange {
                    sheet_id,
                    dimension: "COLUMNS",
                    start_index: column,
                    end_index: column + 1,
                },
                properties: DimensionProperties { pixel_size: *width },
                fields: "pixelSize",
            })
        })
        .collect())
}

// ============================================================================
// Range helpers
// ============================================================================

fn repeat_format(range: GridRange, format: CellFormat, fields: &'static str) -> Request {
    Request::RepeatCell(RepeatCellRequest {
        range,
        cell: CellData {
            user_entered_format: format,
        },
        fields,
    })
}

fn header_range(sheet_id: i64, payload: &ReportPayload) -> GridRange {
    GridRange {
        sheet_id,
        start_row_index: 0,
        end_row_index: payload.header_payload.len(),
        start_column_index: 0,
        end_column_index: payload.layout.column_count,
    }
}

fn footer_range(sheet_id: i64, payload: &ReportPayload) -> GridRange {
    GridRange {
        sheet_id,
        start_row_index: payload.total_rows(),
        end_row_index: payload.row_extent(),
        start_column_index: 0,
        end_column_index: payload.layout.column_count,
    }
}

fn full_range(sheet_id: i64, payload: &ReportPayload) -> GridRange {
    GridRange {
        sheet_id,
        start_row_index: 0,
        end_row_index: payload.row_extent(),
        start_column_index: 0,
        end_column_index: payload.layout.column_count,
    }
}

/// Every cell range a style emits must stay inside the payload's rectangle.
/// A violation is a generator bug and aborts the run.
fn bounded(
    component: &str,
    payload: &ReportPayload,
    requests: &[Request],
) -> Result<(), ReportError> {
    let row_extent = payload.row_extent();
    let column_count = payload.layout.column_count;
    for request in requests {
        for range in request.ranges() {
            let row_ok = range.start_row_index < range.end_row_index
                && range.end_row_index <= row_extent;
            let column_ok = range.start_column_index < range.end_column_index
                && range.end_column_index <= column_count;
            if !row_ok || !column_ok {
                return Err(ReportError::Range {
                    component: component.to_string(),
                    detail: format!(
                        "range rows {}..{} cols {}..{} outside payload rows 0..{} cols 0..{}",
                        range.start_row_index,
                        range.end_row_index,
                        range.start_column_index,
                        range.end_column_index,
                        row_extent,
                        column_count
                    ),
                });
            }
        }
    }
    Ok(())
}

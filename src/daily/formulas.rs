use crate::daily::payload_model::{Cell, PayloadLayout, ReportPayload, SummaryField};
use crate::error::ReportError;

// ============================================================================
// Header formula synthesizer — resolves placeholders to absolute-range formulas
// ============================================================================

/// Spreadsheet column letter for a 0-based column index (0 -> A, 26 -> AA).
pub fn column_letter(index: usize) -> String {
    let mut n = index + 1;
    let mut out = String::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        out.insert(0, (b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    out
}

/// Replace every header placeholder with a summary formula string.
///
/// Emitted formulas use absolute references over exactly the body row range
/// `[header_row_index, total_rows]` (1-based); the header is written before
/// the body, so relative references would be wrong. A range or column
/// outside the payload is a fatal range error, never clamped.
pub fn resolve_header_formulas(mut payload: ReportPayload) -> Result<ReportPayload, ReportError> {
    let first = payload.header_row_index();
    let last = payload.total_rows();
    if last < first {
        return Err(ReportError::Range {
            component: "header-formulas".to_string(),
            detail: format!("body range {}..{} is empty", first, last),
        });
    }

    let layout = payload.layout;
    for row in &mut payload.header_payload {
        for cell in row.iter_mut() {
            if let Cell::Placeholder(field) = cell {
                let formula = synthesize_formula(field, &layout, first, last)?;
                *cell = Cell::Formula(formula);
            }
        }
    }
    Ok(payload)
}

/// Build one summary formula over the absolute body range.
fn synthesize_formula(
    field: &SummaryField,
    layout: &PayloadLayout,
    first: usize,
    last: usize,
) -> Result<String, ReportError> {
    match field {
        SummaryField::StatusCount { label, status } => {
            let col = checked_column(layout.status_column, layout)?;
            Ok(format!(
                "=\"{}: \"&COUNTIF(${}${}:${}${},\"{}\")",
                label,
                col,
                first,
                col,
                last,
                status.as_str()
            ))
        }
        SummaryField::ColumnSum { label, column } => {
            let col = checked_column(*column, layout)?;
            Ok(format!(
                "=\"{}: \"&SUM(${}${}:${}${})",
                label, col, first, col, last
            ))
        }
        SummaryField::ColumnAverage { label, column } => {
            let col = checked_column(*column, layout)?;
            Ok(format!(
                "=\"{}: \"&TEXT(AVERAGE(${}${}:${}${}),\"0.0%\")",
                label, col, first, col, last
            ))
        }
    }
}

fn checked_column(column: usize, layout: &PayloadLayout) -> Result<String, ReportError> {
    if column >= layout.column_count {
        return Err(ReportError::Range {
            component: "header-formulas".to_string(),
            detail: format!(
                "summary column {} outside layout of {} columns",
                column, layout.column_count
            ),
        });
    }
    Ok(column_letter(column))
}

// ============================================================================
// Literal resolution — same summaries computed directly, for CSV output
// ============================================================================

/// Replace header placeholders with literal text computed from the body.
/// CSV output cannot evaluate formulas, so the summaries are folded here.
pub fn resolve_header_literals(mut payload: ReportPayload) -> Result<ReportPayload, ReportError> {
    let layout = payload.layout;
    let body = std::mem::take(&mut payload.body_payload);

    for row in &mut payload.header_payload {
        for cell in row.iter_mut() {
            if let Cell::Placeholder(field) = cell {
                let literal = compute_literal(field, &layout, &body)?;
                *cell = Cell::Text(literal);
            }
        }
    }

    payload.body_payload = body;
    Ok(payload)
}

fn compute_literal(
    field: &SummaryField,
    layout: &PayloadLayout,
    body: &[Vec<Cell>],
) -> Result<String, ReportError> {
    match field {
        SummaryField::StatusCount { label, status } => {
            let column = layout.status_column;
            check_column_bound(column, layout)?;
            let count = body
                .iter()
                .filter(|row| {
                    row.get(column)
                        .map(|c| c.rendered() == status.as_str())
                        .unwrap_or(false)
                })
                .count();
            Ok(format!("{}: {}", label, count))
        }
        SummaryField::ColumnSum { label, column } => {
            check_column_bound(*column, layout)?;
            let sum: f64 = numeric_column(body, *column).sum();
            Ok(format!("{}: {}", label, sum))
        }
        SummaryField::ColumnAverage { label, column } => {
            check_column_bound(*column, layout)?;
            let values: Vec<f64> = numeric_column(body, *column).collect();
            let avg = if values.is_empty() {
                0.0
            } else {
                values.iter().sum::<f64>() / values.len() as f64
            };
            Ok(format!("{}: {:.1}%", label, avg * 100.0))
        }
    }
}

fn check_column_bound(column: usize, layout: &PayloadLayout) -> Result<(), ReportError> {
    if column >= layout.column_count {
        return Err(ReportError::Range {
            component: "header-literals".to_string(),
            detail: format!(
                "summary column {} outside layout of {} columns",
                column, layout.column_count
            ),
        });
    }
    Ok(())
}

fn numeric_column(body: &[Vec<Cell>], column: usize) -> impl Iterator<Item = f64> + '_ {
    body.iter().filter_map(move |row| match row.get(column) {
        Some(Cell::Number(n)) => Some(*n),
        _ => None,
    })
}

use crate::daily::payload_model::ReportPayload;
use crate::error::ReportError;

// ============================================================================
// CSV export — plain-file rendition of a report payload
// ============================================================================

/// Render a payload to CSV text, header/body/footer in sheet order.
///
/// The caller resolves header placeholders to literals first; a CSV file
/// cannot evaluate spreadsheet formulas. Short rows are padded to the
/// layout's column count so every CSV record has the same width.
pub fn payload_to_csv(payload: &ReportPayload) -> Result<String, ReportError> {
    let columns = payload.layout.column_count;
    let mut buffer = Vec::new();

    {
        let mut writer = csv::Writer::from_writer(&mut buffer);
        for row in payload.all_rows() {
            let record: Vec<String> = (0..columns)
                .map(|column| row.get(column).map(|cell| cell.rendered()).unwrap_or_default())
                .collect();
            writer
                .write_record(&record)
                .map_err(|source| ReportError::Csv {
                    context: "csv-export".to_string(),
                    source,
                })?;
        }
        writer.flush().map_err(|source| ReportError::Io {
            context: "csv-export".to_string(),
            source,
        })?;
    }

    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Write a payload to a CSV file.
pub fn write_csv_report(path: &std::path::Path, payload: &ReportPayload) -> Result<(), ReportError> {
    let content = payload_to_csv(payload)?;
    std::fs::write(path, content).map_err(|source| ReportError::Io {
        context: format!("writing CSV report '{}'", path.display()),
        source,
    })
}

use std::fmt;

#[derive(Debug)]
pub enum ReportError {
    /// Input records (or read-back tab rows) are malformed: a required field
    /// is missing or a status value is outside the recognized set
    DataShape { context: String, detail: String },

    /// A payload invariant was violated while building (e.g. empty input)
    Build { context: String, detail: String },

    /// A computed formula/merge/style range falls outside the payload bounds.
    /// Always a generator bug; never clamped
    Range { component: String, detail: String },

    /// The spreadsheet API reported a failure
    Api { context: String, detail: String },

    /// HTTP transport failure talking to the spreadsheet API
    Http { context: String, source: reqwest::Error },

    /// Filesystem failure (record file, CSV output)
    Io { context: String, source: std::io::Error },

    /// JSON parsing failed (record file or API response)
    Json { context: String, source: serde_json::Error },

    /// CSV encoding failed
    Csv { context: String, source: csv::Error },

    /// CLI or configuration validation failure
    Config(String),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::DataShape { context, detail } => {
                write!(f, "Malformed input ({}): {}", context, detail)
            }
            ReportError::Build { context, detail } => {
                write!(f, "Cannot build payload ({}): {}", context, detail)
            }
            ReportError::Range { component, detail } => {
                write!(f, "Range out of payload bounds ({}): {}", component, detail)
            }
            ReportError::Api { context, detail } => {
                write!(f, "Spreadsheet API error ({}): {}", context, detail)
            }
            ReportError::Http { context, source } => {
                write!(f, "HTTP error ({}): {}", context, source)
            }
            ReportError::Io { context, source } => {
                write!(f, "I/O error ({}): {}", context, source)
            }
            ReportError::Json { context, source } => {
                write!(f, "JSON parse error ({}): {}", context, source)
            }
            ReportError::Csv { context, source } => {
                write!(f, "CSV error ({}): {}", context, source)
            }
            ReportError::Config(msg) => {
                write!(f, "Configuration error: {}", msg)
            }
        }
    }
}

impl std::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReportError::Http { source, .. } => Some(source),
            ReportError::Io { source, .. } => Some(source),
            ReportError::Json { source, .. } => Some(source),
            ReportError::Csv { source, .. } => Some(source),
            _ => None,
        }
    }
}

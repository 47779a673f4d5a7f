use crate::record::record_model::TestStatus;

// ============================================================================
// Report payload model — ordered header/body/footer cell matrix
// ============================================================================

/// Which summary a header placeholder cell resolves to. The builder plants
/// placeholders; the formula synthesizer replaces each with a formula string
/// (or a literal for CSV output) over the body row range.
#[derive(Debug, Clone, PartialEq)]
pub enum SummaryField {
    /// Count of body rows whose status column equals `status`
    StatusCount { label: String, status: TestStatus },
    /// Sum of a numeric body column
    ColumnSum { label: String, column: usize },
    /// Average of a numeric body column, rendered as a percentage
    ColumnAverage { label: String, column: usize },
}

/// One spreadsheet cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    /// A formula string starting with '='
    Formula(String),
    /// A header summary slot not yet resolved to a formula or literal
    Placeholder(SummaryField),
}

impl Cell {
    pub fn text(s: impl Into<String>) -> Cell {
        Cell::Text(s.into())
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Cell::Placeholder(_))
    }

    /// Plain-text rendering, used for group keys and CSV output.
    pub fn rendered(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => format!("{}", n),
            Cell::Formula(s) => s.clone(),
            Cell::Placeholder(field) => match field {
                SummaryField::StatusCount { label, .. }
                | SummaryField::ColumnSum { label, .. }
                | SummaryField::ColumnAverage { label, .. } => label.clone(),
            },
        }
    }

    /// The user-entered value sent to the sheet writer. Formula strings are
    /// passed through so the sheet evaluates them.
    pub fn to_user_value(&self) -> serde_json::Value {
        match self {
            Cell::Text(s) => serde_json::Value::String(s.clone()),
            Cell::Number(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or_else(|| serde_json::Value::String(format!("{}", n))),
            Cell::Formula(s) => serde_json::Value::String(s.clone()),
            Cell::Placeholder(_) => serde_json::Value::String(self.rendered()),
        }
    }
}

/// An ordered row of cells. Row order maps 1:1 to sheet row order and column
/// order within a row maps 1:1 to sheet column order; merge and formula
/// correctness depend on exact adjacency, so this is always an ordered list.
pub type Row = Vec<Cell>;

// ============================================================================
// Payload layouts — per-report-kind column conventions
// ============================================================================

/// Column conventions for one report kind. Generators read these instead of
/// hard-coding column positions, which lets the merge/format/style logic run
/// unchanged against daily and monthly payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadLayout {
    /// Column whose repeated values group adjacent rows for merging
    pub group_column: usize,
    /// Column holding the status text conditional formatting keys on
    pub status_column: usize,
    pub column_count: usize,
    /// Pixel width per column
    pub column_widths: &'static [i64],
    /// Fixed header/footer shape emitted by the builder
    pub header_rows: usize,
    pub footer_rows: usize,
}

/// Daily report: Suite | Test | Status | Duration (ms) | Error
pub const DAILY_LAYOUT: PayloadLayout = PayloadLayout {
    group_column: 0,
    status_column: 2,
    column_count: 5,
    column_widths: &[180, 320, 90, 110, 360],
    header_rows: 2,
    footer_rows: 1,
};

/// Monthly summary: Date | Passed | Failed | Pending | Pass rate | Outcome
pub const MONTHLY_LAYOUT: PayloadLayout = PayloadLayout {
    group_column: 0,
    status_column: 5,
    column_count: 6,
    column_widths: &[110, 80, 80, 80, 100, 90],
    header_rows: 2,
    footer_rows: 1,
};

// ============================================================================
// Report payload — immutable snapshot all generators derive from
// ============================================================================

/// One report's worth of rows, built once per run and immutable afterwards.
/// Every downstream generator (formulas, merges, conditional formats, styles)
/// reads the same snapshot; none mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportPayload {
    pub header_payload: Vec<Row>,
    pub body_payload: Vec<Row>,
    pub footer_payload: Vec<Row>,
    pub layout: PayloadLayout,
}

impl ReportPayload {
    /// 1-based sheet row of the first body row.
    pub fn header_row_index(&self) -> usize {
        self.header_payload.len() + 1
    }

    pub fn body_row_count(&self) -> usize {
        self.body_payload.len()
    }

    /// 1-based sheet row of the last body row.
    pub fn total_rows(&self) -> usize {
        self.header_row_index() + self.body_payload.len() - 1
    }

    /// 0-based exclusive end of the rows the payload occupies, footer included.
    pub fn row_extent(&self) -> usize {
        self.total_rows() + self.footer_payload.len()
    }

    /// Header, body, and footer rows in sheet order.
    pub fn all_rows(&self) -> impl Iterator<Item = &Row> {
        self.header_payload
            .iter()
            .chain(self.body_payload.iter())
            .chain(self.footer_payload.iter())
    }
}

use serde::Serialize;

// ============================================================================
// Batch-update request model — serde mirror of the spreadsheet API shapes
// ============================================================================
//
// Every request addresses a tab by numeric `sheetId`, never by title, so a
// reused title cannot make an update ambiguous. Wire names are camelCase;
// row/column indices are 0-based and half-open.

/// A rectangle of cells on one tab.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridRange {
    pub sheet_id: i64,
    pub start_row_index: usize,
    pub end_row_index: usize,
    pub start_column_index: usize,
    pub end_column_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl Color {
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Color {
        Color { red, green, blue }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TextFormat {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground_color: Option<Color>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CellFormat {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_format: Option<TextFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal_alignment: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrap_strategy: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellData {
    pub user_entered_format: CellFormat,
}

/// Apply one format to every cell in a range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepeatCellRequest {
    pub range: GridRange,
    pub cell: CellData,
    /// Field mask naming exactly the format properties being set
    pub fields: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeCellsRequest {
    pub range: GridRange,
    pub merge_type: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionValue {
    pub user_entered_value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BooleanCondition {
    #[serde(rename = "type")]
    pub condition_type: &'static str,
    pub values: Vec<ConditionValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BooleanRule {
    pub condition: BooleanCondition,
    pub format: CellFormat,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalFormatRule {
    pub ranges: Vec<GridRange>,
    pub boolean_rule: BooleanRule,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddConditionalFormatRuleRequest {
    pub rule: ConditionalFormatRule,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionRange {
    pub sheet_id: i64,
    /// "ROWS" or "COLUMNS"
    pub dimension: &'static str,
    pub start_index: usize,
    pub end_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionProperties {
    pub pixel_size: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDimensionPropertiesRequest {
    pub range: DimensionRange,
    pub properties: DimensionProperties,
    pub fields: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridProperties {
    pub frozen_row_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetProperties {
    pub sheet_id: i64,
    pub grid_properties: GridProperties,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSheetPropertiesRequest {
    pub properties: SheetProperties,
    pub fields: &'static str,
}

/// One update operation. Externally tagged, so each serializes to the wire
/// shape the API expects, e.g. `{"mergeCells": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Request {
    MergeCells(MergeCellsRequest),
    RepeatCell(RepeatCellRequest),
    AddConditionalFormatRule(AddConditionalFormatRuleRequest),
    UpdateDimensionProperties(UpdateDimensionPropertiesRequest),
    UpdateSheetProperties(UpdateSheetPropertiesRequest),
}

impl Request {
    /// The grid ranges this request touches, for bounds validation.
    pub fn ranges(&self) -> Vec<GridRange> {
        match self {
            Request::MergeCells(r) => vec![r.range],
            Request::RepeatCell(r) => vec![r.range],
            Request::AddConditionalFormatRule(r) => r.rule.ranges.clone(),
            Request::UpdateDimensionProperties(_) | Request::UpdateSheetProperties(_) => Vec::new(),
        }
    }
}

/// An ordered collection of update operations submitted together.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchUpdateBody {
    pub requests: Vec<Request>,
}

use super::CellValue;

/// One data row; position-significant, `None` = no value.
pub type RawRow = Vec<Option<CellValue>>;

#[derive(Debug, Default, Clone)]
pub struct RawTable {
    /// Column names, from the first row of the sheet.
    /// Empty header cells become empty strings.
    pub headers: Vec<String>,
    /// Every row after the header row, each at most `headers.len()` wide.
    pub rows: Vec<RawRow>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<RawRow>) -> Self {
        RawTable { headers, rows }
    }

    /// The cell at `(row, col)`, treating short rows as padded with no value.
    pub fn cell(row: &RawRow, col: usize) -> Option<&CellValue> {
        row.get(col).and_then(Option::as_ref)
    }
}

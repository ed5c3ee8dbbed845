// src/load/mod.rs
pub mod raw_table;
pub mod value;

pub use raw_table::{RawRow, RawTable};
pub use value::CellValue;

use anyhow::{anyhow, Context, Result};
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::Path;
use tracing::{debug, info, warn};

/// Open the workbook at `path` and read its first sheet into a `RawTable`.
///
/// - The first row of the sheet's used range supplies the headers.
/// - Only sheet columns `0..max_columns` are read; wider sheets are truncated
///   with a warning.
/// - Column positions are absolute: a sheet whose used range starts at
///   column C still reports column A as index 0 (empty).
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_workbook<P: AsRef<Path>>(path: P, max_columns: usize) -> Result<RawTable> {
    let path = path.as_ref();
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Failed to open workbook: {}", path.display()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| anyhow!("Workbook {} has no sheets", path.display()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| anyhow!("Workbook {} has no sheets", path.display()))?
        .with_context(|| format!("Failed to read sheet `{}` in {}", sheet_name, path.display()))?;

    info!(sheet = %sheet_name, "reading first sheet");
    table_from_range(&range, max_columns)
}

/// Convert a calamine range into headers plus data rows.
pub fn table_from_range(range: &Range<Data>, max_columns: usize) -> Result<RawTable> {
    let (start_row, start_col) = range
        .start()
        .ok_or_else(|| anyhow!("sheet is empty: no header row"))?;
    let (_, end_col) = range.end().unwrap_or((start_row, start_col));

    let sheet_width = end_col as usize + 1;
    if sheet_width > max_columns {
        warn!(
            sheet_width,
            max_columns, "sheet is wider than the column limit; extra columns are ignored"
        );
    }
    let width = sheet_width.min(max_columns);
    let offset = start_col as usize;

    let mut rows = range.rows().map(|cells| {
        let mut row: RawRow = vec![None; width];
        for (j, data) in cells.iter().enumerate() {
            let col = offset + j;
            if col >= width {
                break;
            }
            row[col] = CellValue::from_data(data);
        }
        row
    });

    let headers: Vec<String> = rows
        .next()
        .ok_or_else(|| anyhow!("sheet is empty: no header row"))?
        .into_iter()
        .map(|cell| cell.map(|v| v.to_string().trim().to_string()).unwrap_or_default())
        .collect();

    for (idx, name) in headers.iter().enumerate() {
        if name.is_empty() {
            warn!(column = idx, "header cell is empty");
        }
    }

    let rows: Vec<RawRow> = rows.collect();
    debug!(columns = headers.len(), rows = rows.len(), "loaded sheet");
    Ok(RawTable::new(headers, rows))
}

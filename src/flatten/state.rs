// src/flatten/state.rs
use super::{FieldKey, HighestCounts, LabelScheme, Record};
use crate::{
    error::FlattenError,
    load::{CellValue, RawRow, RawTable},
};
use std::collections::BTreeMap;
use tracing::{trace, warn};

/// The record currently being filled.
#[derive(Debug, Clone)]
pub struct OpenRecord {
    pub id: CellValue,
    /// Groups seen so far under this ID; the current group is `group_count - 1`.
    pub group_count: usize,
    /// Rows seen since the last group marker, including the marker row.
    pub seq: u32,
    pub fields: BTreeMap<FieldKey, CellValue>,
}

impl OpenRecord {
    fn new(id: CellValue) -> Self {
        OpenRecord {
            id,
            group_count: 0,
            seq: 0,
            fields: BTreeMap::new(),
        }
    }

    fn seal(self) -> Record {
        Record {
            id: self.id,
            fields: self.fields,
        }
    }
}

/// Accumulator threaded through `step`.
#[derive(Debug, Clone)]
pub struct FlattenState {
    pub width: usize,
    pub scheme: LabelScheme,
    pub open: Option<OpenRecord>,
    pub highest: HighestCounts,
    pub rows_seen: usize,
    /// Data rows that appeared before the first ID marker.
    pub rows_skipped: usize,
}

impl FlattenState {
    /// Fresh state for a table with `width` header columns.
    pub fn new(width: usize, scheme: LabelScheme) -> Result<Self, FlattenError> {
        if width < 2 {
            return Err(FlattenError::TooFewColumns { found: width });
        }
        Ok(FlattenState {
            width,
            scheme,
            open: None,
            highest: HighestCounts::default(),
            rows_seen: 0,
            rows_skipped: 0,
        })
    }
}

/// Feed one data row into the state.
///
/// Returns the new state, plus the previous ID's record when this row opens a new ID.
pub fn step(
    mut state: FlattenState,
    row: &RawRow,
) -> Result<(FlattenState, Option<Record>), FlattenError> {
    state.rows_seen += 1;
    let row_no = state.rows_seen;
    let mut sealed = None;

    // 1) ID marker: seal the previous record and start over
    if let Some(id) = RawTable::cell(row, 0) {
        sealed = state.open.take().map(OpenRecord::seal);
        trace!(row = row_no, id = %id, "new ID");
        state.open = Some(OpenRecord::new(id.clone()));
    }

    let width = state.width;
    let scheme = state.scheme;
    let Some(open) = state.open.as_mut() else {
        warn!(row = row_no, "row before the first ID marker; skipped");
        state.rows_skipped += 1;
        return Ok((state, sealed));
    };

    // 2) group marker
    let starts_group = RawTable::cell(row, 1).is_some();
    if starts_group {
        open.group_count += 1;
        open.seq = 0;
    }

    // 3) every row counts within its group
    open.seq += 1;

    // 4) resolve the label
    if open.group_count == 0 {
        return Err(FlattenError::RowOutsideGroup {
            row: row_no,
            id: open.id.to_string(),
        });
    }
    let label = scheme
        .label(open.group_count - 1)
        .ok_or_else(|| FlattenError::LabelOverflow {
            row: row_no,
            id: open.id.to_string(),
            groups: open.group_count,
            limit: scheme.limit().unwrap_or(usize::MAX),
        })?;

    // 5) store the row's values
    let seq = open.seq;
    for col in 1..width {
        let key = if col == 1 && starts_group {
            FieldKey::group_name(col, label)
        } else {
            FieldKey::member(col, label, seq)
        };
        if let Some(value) = RawTable::cell(row, col) {
            open.fields.insert(key, value.clone());
        }
    }
    state.highest.observe(label, seq);

    Ok((state, sealed))
}

/// Seal whatever record is still open and hand back the final counts.
pub fn finish(state: FlattenState) -> (Option<Record>, HighestCounts) {
    (state.open.map(OpenRecord::seal), state.highest)
}

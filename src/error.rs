// src/error.rs
use thiserror::Error;

/// Structural failures raised while flattening the row hierarchy.
///
/// `row` is always the 1-based data row number (the header row excluded),
/// so it can be matched against the sheet by adding one.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FlattenError {
    #[error("expected at least 2 header columns (ID + group), found {found}")]
    TooFewColumns { found: usize },

    #[error("data row {row}: ID `{id}` has a member row before any group marker")]
    RowOutsideGroup { row: usize, id: String },

    #[error(
        "data row {row}: ID `{id}` opens group #{groups}, more than the {limit} labels available \
         (try --labels extended)"
    )]
    LabelOverflow {
        row: usize,
        id: String,
        groups: usize,
        limit: usize,
    },
}

// src/schema/mod.rs
pub mod materialize;

pub use materialize::{materialize, materialize_row};

use crate::flatten::{FieldKey, GroupLabel, HighestCounts};

/// One output column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    /// The record's ID, named after `headers[0]`.
    Id,
    /// A record field, named by its key.
    Field(FieldKey),
}

/// Deterministic column ordering, derived once every record is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSchema {
    pub columns: Vec<Column>,
}

impl OutputSchema {
    /// ID, then per label in ascending order: the group-name column followed by
    /// `highest[label]` blocks of the member columns (`headers[2..]`).
    pub fn derive(highest: &HighestCounts, header_count: usize) -> Self {
        let mut columns = vec![Column::Id];
        for (label, count) in highest.iter() {
            columns.extend(Self::group_columns(label, count, header_count));
        }
        OutputSchema { columns }
    }

    fn group_columns(
        label: GroupLabel,
        count: u32,
        header_count: usize,
    ) -> impl Iterator<Item = Column> {
        let name = std::iter::once(Column::Field(FieldKey::group_name(1, label)));
        let members = (1..=count).flat_map(move |seq| {
            (2..header_count).map(move |col| Column::Field(FieldKey::member(col, label, seq)))
        });
        name.chain(members)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column names as written to the header row.
    pub fn header_names(&self, headers: &[String]) -> Vec<String> {
        self.columns
            .iter()
            .map(|c| match c {
                Column::Id => headers.first().cloned().unwrap_or_default(),
                Column::Field(key) => key.name(headers),
            })
            .collect()
    }
}

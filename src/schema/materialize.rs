// src/schema/materialize.rs
use super::{Column, OutputSchema};
use crate::flatten::Record;
use tracing::debug;

/// Align one record to `schema`: one cell per column, empty string where the
/// record has no value. Fields with no column in the schema are dropped.
pub fn materialize_row(schema: &OutputSchema, record: &Record) -> Vec<String> {
    let mut matched = 0usize;
    let row: Vec<String> = schema
        .columns
        .iter()
        .map(|column| match column {
            Column::Id => record.id.to_string(),
            Column::Field(key) => match record.get(key) {
                Some(value) => {
                    matched += 1;
                    value.to_string()
                }
                None => String::new(),
            },
        })
        .collect();

    let dropped = record.fields.len() - matched;
    if dropped > 0 {
        debug!(id = %record.id, dropped, "fields outside the output schema");
    }
    row
}

/// Dense rows for every record, in record order.
pub fn materialize<'a>(
    schema: &'a OutputSchema,
    records: &'a [Record],
) -> impl Iterator<Item = Vec<String>> + 'a {
    records.iter().map(move |r| materialize_row(schema, r))
}

// src/pipeline.rs
use crate::{
    config::Config,
    flatten::{flatten, Flattened, HighestCounts, LabelScheme},
    load::{self, RawTable},
    schema::{materialize, OutputSchema},
    write,
};
use anyhow::{Context, Result};
use serde::Serialize;
use std::{io::Write, path::PathBuf};
use tracing::info;

/// What one run produced.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    pub ids: usize,
    pub columns: usize,
    pub rows_skipped: usize,
    pub highest: HighestCounts,
}

/// Flatten `table` and build its schema and header row.
///
/// Both stages need the complete input: the schema width is only known once
/// every ID has been seen.
pub fn prepare(table: &RawTable, scheme: LabelScheme) -> Result<(Flattened, OutputSchema, Vec<String>)> {
    let flattened = flatten(table, scheme).context("flattening rows")?;
    let schema = OutputSchema::derive(&flattened.highest, table.headers.len());
    let header = schema.header_names(&table.headers);
    Ok((flattened, schema, header))
}

/// Flatten `table` and write the delimited result to any writer.
pub fn convert<W: Write>(
    table: &RawTable,
    scheme: LabelScheme,
    out: W,
    delimiter: u8,
) -> Result<Flattened> {
    let (flattened, schema, header) = prepare(table, scheme)?;
    write::write_rows(out, &header, materialize(&schema, &flattened.records), delimiter)?;
    Ok(flattened)
}

/// Load → flatten → materialize → write, once.
#[tracing::instrument(level = "info", skip(cfg), fields(input = %cfg.input.display()))]
pub fn run(cfg: &Config) -> Result<RunSummary> {
    let table = load::load_workbook(&cfg.input, cfg.max_columns)?;
    info!(
        headers = table.headers.len(),
        rows = table.rows.len(),
        "loaded input"
    );

    let (flattened, schema, header) = prepare(&table, cfg.labels)?;
    write::write_delimited(
        &cfg.output,
        &header,
        materialize(&schema, &flattened.records),
        cfg.delimiter,
    )?;

    let summary = RunSummary {
        input: cfg.input.clone(),
        output: cfg.output.clone(),
        ids: flattened.records.len(),
        columns: schema.len(),
        rows_skipped: flattened.rows_skipped,
        highest: flattened.highest,
    };

    if let Some(path) = &cfg.summary {
        write::write_json(path, &summary)?;
        info!(path = %path.display(), "wrote run summary");
    }
    Ok(summary)
}

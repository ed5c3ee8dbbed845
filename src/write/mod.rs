// src/write/mod.rs
use anyhow::{Context, Result};
use csv::WriterBuilder;
use serde::Serialize;
use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};
use tracing::info;

/// Write a header row followed by `rows` as delimited text to any writer.
/// Returns the number of data rows written.
pub fn write_rows<W, I>(out: W, header: &[String], rows: I, delimiter: u8) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = Vec<String>>,
{
    let mut writer = WriterBuilder::new().delimiter(delimiter).from_writer(out);
    writer
        .write_record(header)
        .context("writing header row")?;

    let mut written = 0;
    for row in rows {
        writer
            .write_record(&row)
            .with_context(|| format!("writing data row {}", written + 1))?;
        written += 1;
    }
    writer.flush().context("flushing delimited output")?;
    Ok(written)
}

/// Write delimited output to `path` atomically: to `.<name>.tmp`, then rename.
#[tracing::instrument(level = "info", skip(path, header, rows), fields(path = %path.as_ref().display()))]
pub fn write_delimited<P, I>(path: P, header: &[String], rows: I, delimiter: u8) -> Result<usize>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = Vec<String>>,
{
    let path = path.as_ref();
    let tmp_path = tmp_sibling(path);

    let file = fs::File::create(&tmp_path)
        .with_context(|| format!("creating {}", tmp_path.display()))?;
    let written = match write_rows(io::BufWriter::new(file), header, rows, delimiter) {
        Ok(n) => n,
        Err(e) => {
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }
    };

    fs::rename(&tmp_path, path)
        .with_context(|| format!("renaming {} -> {}", tmp_path.display(), path.display()))?;

    info!(rows = written, columns = header.len(), "wrote delimited output");
    Ok(written)
}

/// Pretty-print `value` as JSON to `path`, with a trailing newline.
pub fn write_json<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> Result<()> {
    let path = path.as_ref();
    let mut file =
        fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(&mut file, value)
        .with_context(|| format!("serializing JSON to {}", path.display()))?;
    file.write_all(b"\n")?;
    Ok(())
}

fn tmp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    path.with_file_name(format!(".{}.tmp", name))
}

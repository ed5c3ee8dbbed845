// src/config.rs
use crate::flatten::LabelScheme;
use anyhow::{bail, Result};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Flatten lemma-grouped spreadsheet entries into one CSV row per ID"
)]
pub struct Args {
    /// Input workbook (first sheet is read)
    #[arg(short, long, default_value = "data/AWS.xlsx")]
    pub input: PathBuf,

    /// Output delimited file
    #[arg(short, long, default_value = "aws_converted.csv")]
    pub output: PathBuf,

    /// Number of sheet columns to read, counting the ID and group columns
    #[arg(long, default_value_t = 10)]
    pub max_columns: usize,

    /// Group labelling: `strict` fails past 26 groups per ID, `extended` continues with AA, AB, ..
    #[arg(long, value_enum, default_value_t = LabelScheme::Strict)]
    pub labels: LabelScheme,

    /// Output field delimiter
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,

    /// Also write the run summary as JSON to this path
    #[arg(long)]
    pub summary: Option<PathBuf>,
}

/// Validated run settings.
#[derive(Debug, Clone)]
pub struct Config {
    pub input: PathBuf,
    pub output: PathBuf,
    pub max_columns: usize,
    pub labels: LabelScheme,
    pub delimiter: u8,
    pub summary: Option<PathBuf>,
}

impl Config {
    pub fn from_args(args: Args) -> Result<Self> {
        if args.max_columns < 2 {
            bail!(
                "--max-columns must be at least 2 (ID + group), got {}",
                args.max_columns
            );
        }
        if !args.delimiter.is_ascii() || args.delimiter == '"' || args.delimiter == '\n' {
            bail!("--delimiter must be a single ASCII character other than quote or newline");
        }

        Ok(Config {
            input: args.input,
            output: args.output,
            max_columns: args.max_columns,
            labels: args.labels,
            delimiter: args.delimiter as u8,
            summary: args.summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Result<Config> {
        let args = Args::try_parse_from(std::iter::once("lemmaflat").chain(argv.iter().copied()))?;
        Config::from_args(args)
    }

    #[test]
    fn defaults() -> Result<()> {
        let cfg = parse(&[])?;
        assert_eq!(cfg.input, PathBuf::from("data/AWS.xlsx"));
        assert_eq!(cfg.output, PathBuf::from("aws_converted.csv"));
        assert_eq!(cfg.max_columns, 10);
        assert_eq!(cfg.labels, LabelScheme::Strict);
        assert_eq!(cfg.delimiter, b',');
        assert!(cfg.summary.is_none());
        Ok(())
    }

    #[test]
    fn overrides() -> Result<()> {
        let cfg = parse(&[
            "-i",
            "in.xlsx",
            "--output",
            "out.tsv",
            "--max-columns",
            "4",
            "--labels",
            "extended",
            "--delimiter",
            "\t",
        ])?;
        assert_eq!(cfg.input, PathBuf::from("in.xlsx"));
        assert_eq!(cfg.output, PathBuf::from("out.tsv"));
        assert_eq!(cfg.max_columns, 4);
        assert_eq!(cfg.labels, LabelScheme::Extended);
        assert_eq!(cfg.delimiter, b'\t');
        Ok(())
    }

    #[test]
    fn rejects_bad_bounds() {
        assert!(parse(&["--max-columns", "1"]).is_err());
        assert!(parse(&["--delimiter", "é"]).is_err());
    }
}

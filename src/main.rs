use anyhow::Result;
use clap::Parser;
use lemmaflat::{pipeline, Args, Config};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,lemmaflat=info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    // ─── 2) resolve config ───────────────────────────────────────────
    let cfg = Config::from_args(Args::parse())?;
    info!(
        input = %cfg.input.display(),
        output = %cfg.output.display(),
        max_columns = cfg.max_columns,
        labels = ?cfg.labels,
        "startup"
    );

    // ─── 3) load → flatten → write ───────────────────────────────────
    let summary = pipeline::run(&cfg)?;

    // ─── 4) report ───────────────────────────────────────────────────
    if summary.rows_skipped > 0 {
        info!(rows = summary.rows_skipped, "rows before the first ID were skipped");
    }
    info!(highest = %summary.highest, "highest sequence per group");
    println!("highest counts: {}", summary.highest);
    info!(
        ids = summary.ids,
        columns = summary.columns,
        output = %summary.output.display(),
        "all done"
    );
    Ok(())
}

// src/main.rs
use anyhow::Result;
use billparse::{
    config::BillConfig,
    document::discover_documents,
    pipeline::run_batch,
    series::{export_all, render_preview, PreviewOptions, WriteOptions},
};
use clap::Parser;
use std::{path::PathBuf, time::Instant};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "billparse")]
#[command(about = "Turn half-hourly energy bill text into timezone-correct CSV series")]
struct Args {
    /// Directory holding extracted bill text (*.txt, pages separated by form feeds)
    #[arg(default_value = ".")]
    input_dir: PathBuf,

    /// Where to write the CSV files (default: the input directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// YAML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// IANA timezone of the meter, overrides the config file
    #[arg(long)]
    timezone: Option<String>,

    /// Rates below this many pence/unit count as the cheap tariff
    #[arg(long)]
    rate_threshold: Option<f64>,

    /// Also parse the first page of each document
    #[arg(long)]
    keep_first_page: bool,

    /// Rows of the full series to print after writing
    #[arg(long, default_value_t = 5)]
    preview_rows: usize,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // ─── 1) init logging ─────────────────────────────────────────────
    let default_level = if args.verbose { "debug" } else { "info" };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_target(false)
        .init();

    // ─── 2) settings; timezone and tariff must be valid up front ─────
    let mut cfg = BillConfig::load(args.config.as_deref())?;
    if let Some(tz) = args.timezone {
        cfg.timezone = tz;
    }
    if let Some(threshold) = args.rate_threshold {
        cfg.rate_threshold = threshold;
    }
    let tz = cfg.timezone()?;
    let rule = cfg.tariff_rule()?;
    info!(timezone = %tz, rate_threshold = rule.rate_threshold, "startup");

    // ─── 3) discover and process documents ───────────────────────────
    let docs = discover_documents(&args.input_dir)?;
    info!("{} documents to process", docs.len());
    let start = Instant::now();
    let series = run_batch(&docs, tz, args.keep_first_page);
    let filtered = series.filtered(&rule);
    if series.is_empty() {
        info!("no half-hourly rows found");
    }
    info!(
        rows = series.len(),
        filtered = filtered.len(),
        elapsed = ?start.elapsed(),
        "series assembled"
    );

    // ─── 4) write both artifacts; one failing does not stop the other ─
    let out_dir = args.output_dir.unwrap_or(args.input_dir);
    let opts = WriteOptions::default();
    let failures = export_all(
        &out_dir,
        &[(cfg.all_output.as_str(), &series), (cfg.filtered_output.as_str(), &filtered)],
        &opts,
    );

    // ─── 5) console preview ──────────────────────────────────────────
    println!("\nConsolidated series (first rows):");
    print!(
        "{}",
        render_preview(&series, &PreviewOptions { max_rows: Some(args.preview_rows) })
    );
    println!(
        "\nFiltered series (rate < {}p outside off-peak):",
        rule.rate_threshold
    );
    print!("{}", render_preview(&filtered, &PreviewOptions::default()));

    if failures > 0 {
        anyhow::bail!("{} of 2 exports failed", failures);
    }
    Ok(())
}

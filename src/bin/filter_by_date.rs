use anyhow::{Context, Result};
use billparse::range::{filter_by_date, parse_utc_offset, write_range_rows, DateRange};
use clap::Parser;
use std::{
    fs::File,
    io::{self, BufReader, BufWriter},
    path::PathBuf,
};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Cut a date range out of all_energy_data.csv as a tab-separated table.
#[derive(Parser, Debug)]
#[command(name = "filter_by_date")]
struct Args {
    /// First date to keep, DD-MM-YYYY
    start_date: String,

    /// Last date to keep (inclusive), DD-MM-YYYY
    end_date: String,

    /// Full series written by billparse
    #[arg(short, long, default_value = "all_energy_data.csv")]
    input: PathBuf,

    #[arg(short, long, default_value = "filtered_by_date.csv")]
    output: PathBuf,

    /// UTC offset stamped on every row, regardless of DST
    #[arg(long, default_value = "+01:00", allow_hyphen_values = true)]
    offset: String,
}

fn main() -> Result<()> {
    fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let args = Args::parse();
    let range = DateRange::parse(&args.start_date, &args.end_date)?;
    let offset = parse_utc_offset(&args.offset)?;

    let input = File::open(&args.input)
        .with_context(|| format!("opening {}", args.input.display()))?;
    let rows = filter_by_date(BufReader::new(input), &range, &offset)?;

    let output = File::create(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    write_range_rows(BufWriter::new(output), &rows)
        .with_context(|| format!("writing {}", args.output.display()))?;

    info!(
        from = %range.first,
        to = %range.last,
        rows = rows.len(),
        path = %args.output.display(),
        "filtered by date"
    );

    println!("\nFirst 10 rows:");
    write_range_rows(io::stdout().lock(), &rows[..rows.len().min(10)])?;
    Ok(())
}

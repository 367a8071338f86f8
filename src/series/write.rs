// src/series/write.rs
use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat};
use chrono_tz::Tz;
use csv::WriterBuilder;
use std::{fs::File, io::Write, path::Path};
use tracing::{debug, error, info};

use super::{Series, COLUMNS};

/// Formatting for a written table, passed explicitly per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    pub delimiter: u8,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

/// `2024-10-27T01:00:00+01:00`; UTC is written as `+00:00`.
pub fn format_instant(dt: &DateTime<Tz>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// Header plus one line per record. An empty series still writes the header.
pub fn write_series<W: Write>(out: W, series: &Series, opts: &WriteOptions) -> Result<()> {
    let mut wtr = WriterBuilder::new()
        .delimiter(opts.delimiter)
        .from_writer(out);

    wtr.write_record(COLUMNS).context("writing header")?;
    for r in series.records() {
        wtr.write_record([
            format_instant(&r.start),
            format_instant(&r.end),
            r.date.format("%Y-%m-%d").to_string(),
            r.period.clone(),
            r.rate.to_string(),
            r.consumption.to_string(),
            r.cost.to_string(),
        ])
        .with_context(|| format!("writing row {} {}", r.date, r.period))?;
    }
    wtr.flush().context("flushing csv writer")?;
    Ok(())
}

pub fn write_series_to_path(path: &Path, series: &Series, opts: &WriteOptions) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    write_series(file, series, opts).with_context(|| format!("writing {}", path.display()))?;
    debug!(path = %path.display(), rows = series.len(), "wrote series");
    Ok(())
}

/// Write each `(file name, series)` under `out_dir`. A failed write is logged
/// and the rest are still attempted; returns how many failed.
pub fn export_all(out_dir: &Path, artifacts: &[(&str, &Series)], opts: &WriteOptions) -> usize {
    let mut failures = 0;
    for (name, series) in artifacts {
        let path = out_dir.join(name);
        match write_series_to_path(&path, series, opts) {
            Ok(()) => info!(path = %path.display(), rows = series.len(), "exported"),
            Err(err) => {
                error!(path = %path.display(), "export failed: {:#}", err);
                failures += 1;
            }
        }
    }
    failures
}

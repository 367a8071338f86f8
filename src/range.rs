// src/range.rs
//! Re-filter a written series by calendar date, with fixed-offset timestamps.

use anyhow::{anyhow, bail, Context, Result};
use chrono::{FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use csv::{ReaderBuilder, WriterBuilder};
use serde::Deserialize;
use std::io::{Read, Write};

use crate::normalize::Period;

pub const RANGE_COLUMNS: [&str; 3] = ["Consumption (kwh)", "Start", "End"];

/// Inclusive calendar-date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

impl DateRange {
    /// Both bounds as `DD-MM-YYYY`.
    pub fn parse(first: &str, last: &str) -> Result<Self> {
        let parse = |s: &str| {
            NaiveDate::parse_from_str(s.trim(), "%d-%m-%Y")
                .with_context(|| format!("invalid date {:?}, expected DD-MM-YYYY", s))
        };
        let range = Self {
            first: parse(first)?,
            last: parse(last)?,
        };
        if range.first > range.last {
            bail!("range start {} is after range end {}", range.first, range.last);
        }
        Ok(range)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.first <= date && date <= self.last
    }
}

/// `"+01:00"`, `"-05:30"`, `"+0000"`.
pub fn parse_utc_offset(s: &str) -> Result<FixedOffset> {
    s.trim()
        .parse::<FixedOffset>()
        .map_err(|e| anyhow!("offset {:?} must look like +HH:MM: {}", s, e))
}

/// The columns of the full series this tool needs; others are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct SeriesRow {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Period")]
    pub period: String,
    #[serde(rename = "Consumption")]
    pub consumption: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RangeRow {
    pub consumption: f64,
    pub start: String,
    pub end: String,
}

fn stamp(offset: &FixedOffset, local: NaiveDateTime) -> Result<String> {
    offset
        .from_local_datetime(&local)
        .single()
        .map(|dt| dt.format("%Y-%m-%dT%H:%M:%S%:z").to_string())
        .ok_or_else(|| anyhow!("cannot place {} at {}", local, offset))
}

/// Start/end as fixed-offset strings. Not DST-aware: the same offset is used
/// all year.
pub fn fixed_offset_span(row: &SeriesRow, offset: &FixedOffset) -> Result<RangeRow> {
    let period = Period::parse(&row.period)?;
    let end_date = if period.crosses_midnight() {
        row.date
            .succ_opt()
            .ok_or_else(|| anyhow!("no day after {}", row.date))?
    } else {
        row.date
    };
    Ok(RangeRow {
        consumption: row.consumption,
        start: stamp(offset, row.date.and_time(period.start))?,
        end: stamp(offset, end_date.and_time(period.end))?,
    })
}

/// Rows of a full-series CSV inside `range`, sorted by `Start` text.
pub fn filter_by_date<R: Read>(
    input: R,
    range: &DateRange,
    offset: &FixedOffset,
) -> Result<Vec<RangeRow>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(input);
    let mut rows = Vec::new();
    for (idx, result) in rdr.deserialize::<SeriesRow>().enumerate() {
        let row = result.with_context(|| format!("reading series record {}", idx))?;
        if range.contains(row.date) {
            rows.push(
                fixed_offset_span(&row, offset)
                    .with_context(|| format!("series record {}", idx))?,
            );
        }
    }
    rows.sort_by(|a, b| a.start.cmp(&b.start));
    Ok(rows)
}

/// Tab-delimited table with a header row.
pub fn write_range_rows<W: Write>(out: W, rows: &[RangeRow]) -> Result<()> {
    let mut wtr = WriterBuilder::new().delimiter(b'\t').from_writer(out);
    wtr.write_record(RANGE_COLUMNS)?;
    for r in rows {
        wtr.write_record([r.consumption.to_string(), r.start.clone(), r.end.clone()])?;
    }
    wtr.flush()?;
    Ok(())
}

// src/normalize/mod.rs
//! Turns `(date, period)` rows into absolute, timezone-aware instants.

pub mod fold;
pub mod period;
pub mod resolve;

use anyhow::{anyhow, Result};
use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use tracing::debug;

use crate::extract::RowTuple;
pub use fold::{FoldFlags, FoldWindow, Occurrence};
pub use period::{split_period, Period};
pub use resolve::resolve_local;

/// A bill row anchored to absolute start/end instants.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    pub date: NaiveDate,
    pub period: String,
    pub rate: f64,
    pub consumption: f64,
    pub cost: f64,
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

/// Start/end instants for one period on `date`.
pub fn period_instants(
    tz: &Tz,
    date: NaiveDate,
    period: &Period,
    flags: FoldFlags,
) -> Result<(DateTime<Tz>, DateTime<Tz>)> {
    let end_date = if period.crosses_midnight() {
        date.succ_opt()
            .ok_or_else(|| anyhow!("no day after {}", date))?
    } else {
        date
    };

    let start = resolve_local(tz, date.and_time(period.start), flags.start);
    let end = resolve_local(tz, end_date.and_time(period.end), flags.end);
    Ok((start, end))
}

/// Stateful normalizer for a single document's rows, fed in source order.
#[derive(Debug, Clone)]
pub struct Normalizer {
    tz: Tz,
    window: FoldWindow,
}

impl Normalizer {
    pub fn new(tz: Tz) -> Self {
        Self {
            tz,
            window: FoldWindow::new(),
        }
    }

    /// Normalize the next row. Every row, good or bad, advances the fold window.
    pub fn push(&mut self, row: RowTuple) -> Result<NormalizedRecord> {
        let (start_text, end_text) = split_period(&row.period).unwrap_or((row.period.trim(), ""));
        let flags = self.window.observe(start_text, end_text);

        let period = Period::parse(&row.period)?;
        let (start, end) = period_instants(&self.tz, row.date, &period, flags)?;

        Ok(NormalizedRecord {
            date: row.date,
            period: row.period,
            rate: row.rate,
            consumption: row.consumption,
            cost: row.cost,
            start,
            end,
        })
    }
}

/// Normalize one document's rows, dropping those whose period does not parse.
pub fn normalize_rows(tz: Tz, rows: impl IntoIterator<Item = RowTuple>) -> Vec<NormalizedRecord> {
    let mut normalizer = Normalizer::new(tz);
    rows.into_iter()
        .filter_map(|row| {
            let date = row.date;
            match normalizer.push(row) {
                Ok(record) => Some(record),
                Err(err) => {
                    debug!(%date, error = %err, "skipping row");
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Europe::London;

    fn row(date: NaiveDate, period: &str) -> RowTuple {
        RowTuple {
            date,
            period: period.to_string(),
            rate: 6.67,
            consumption: 0.5,
            cost: 3.335,
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Every half-hour of `date` as bill text, with the repeated hour on fall-back days.
    fn day_periods(repeat_hour: Option<u32>) -> Vec<String> {
        let mut periods = Vec::new();
        for slot in 0..48u32 {
            let (h, m) = (slot / 2, (slot % 2) * 30);
            let (eh, em) = if m == 0 { (h, 30) } else { ((h + 1) % 24, 0) };
            let p = format!("{:02}:{:02}-{:02}:{:02}", h, m, eh, em);
            periods.push(p.clone());
            if Some(h) == repeat_hour && m == 30 {
                periods.push(format!("{:02}:00-{:02}:30", h, h));
                periods.push(p);
            }
        }
        periods
    }

    #[test]
    fn test_ordinary_day_is_thirty_minute_steps() {
        let date = ymd(2024, 12, 4);
        let records = normalize_rows(
            London,
            day_periods(None).iter().map(|p| row(date, p)),
        );

        assert_eq!(records.len(), 48);
        for r in &records {
            assert_eq!((r.end - r.start).num_minutes(), 30, "{}", r.period);
        }
        let last = records.last().unwrap();
        assert_eq!(last.period, "23:30-00:00");
        assert_eq!(last.end.to_rfc3339(), "2024-12-05T00:00:00+00:00");
    }

    #[test]
    fn test_fall_back_repeated_hour_resolves_in_order() {
        let date = ymd(2024, 10, 27);
        let records = normalize_rows(
            London,
            day_periods(Some(1)).iter().map(|p| row(date, p)),
        );
        assert_eq!(records.len(), 50);

        let repeated: Vec<_> = records.iter().filter(|r| r.period == "01:00-01:30").collect();
        assert_eq!(repeated.len(), 2);
        assert_eq!(repeated[0].start.to_rfc3339(), "2024-10-27T01:00:00+01:00");
        assert_eq!(repeated[1].start.to_rfc3339(), "2024-10-27T01:00:00+00:00");
        assert_eq!((repeated[1].start - repeated[0].start).num_seconds(), 3600);
        assert_eq!((repeated[1].end - repeated[1].start).num_minutes(), 30);

        // Every start is a distinct instant, in source order.
        for pair in records.windows(2) {
            assert!(pair[0].start < pair[1].start, "{} !< {}", pair[0].start, pair[1].start);
        }
    }

    #[test]
    fn test_rederiving_is_idempotent_without_dst() -> Result<()> {
        let date = ymd(2025, 6, 14);
        let records = normalize_rows(
            London,
            day_periods(None).iter().map(|p| row(date, p)),
        );

        for r in &records {
            let period = Period::parse(&r.period)?;
            let (start, end) = period_instants(&London, r.date, &period, FoldFlags::default())?;
            assert_eq!(start, r.start);
            assert_eq!(end, r.end);
        }
        Ok(())
    }

    #[test]
    fn test_bad_period_is_skipped_but_still_counts_in_window() {
        let date = ymd(2024, 10, 27);
        let rows = vec![
            row(date, "01:00-01:30"),
            row(date, "99:99-01:30"),
            row(date, "01:00-01:30"),
        ];
        let records = normalize_rows(London, rows);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].start.to_rfc3339(), "2024-10-27T01:00:00+01:00");
        assert_eq!(records[1].start.to_rfc3339(), "2024-10-27T01:00:00+00:00");
    }

    #[test]
    fn test_spring_forward_gap_rows_do_not_fail() {
        let date = ymd(2024, 3, 31);
        let rows = vec![
            row(date, "00:30-01:00"),
            row(date, "01:00-01:30"),
            row(date, "02:00-02:30"),
        ];
        let records = normalize_rows(London, rows);

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].end.to_rfc3339(), "2024-03-31T02:00:00+01:00");
        assert_eq!((records[0].end - records[0].start).num_minutes(), 30);
    }
}

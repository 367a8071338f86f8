// src/extract/rows.rs
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use super::blocks::RawBlock;

/// `"00:00-00:30   6.67   7.36   49.042"`: period, rate, consumption, cost.
static ROW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{2}:\d{2}\s*-\s*\d{2}:\d{2})\s+([\d.]+)\s+([\d.]+)\s+([\d.]+)")
        .expect("row regex is valid")
});

/// One half-hour line of a bill, before any timezone handling.
#[derive(Debug, Clone, PartialEq)]
pub struct RowTuple {
    pub date: NaiveDate,
    /// Period text with whitespace runs collapsed to a single space.
    pub period: String,
    /// Pence per unit.
    pub rate: f64,
    pub consumption: f64,
    pub cost: f64,
}

/// Collapse every whitespace run (newlines included) to one space and trim.
pub fn normalize_period_text(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extract every complete row from a block. Partial rows are skipped.
pub fn tokenize_rows(block: &RawBlock<'_>) -> Vec<RowTuple> {
    ROW.captures_iter(block.text)
        .filter_map(|caps| {
            let parsed = (
                caps[2].parse::<f64>(),
                caps[3].parse::<f64>(),
                caps[4].parse::<f64>(),
            );
            match parsed {
                (Ok(rate), Ok(consumption), Ok(cost)) => Some(RowTuple {
                    date: block.date,
                    period: normalize_period_text(&caps[1]),
                    rate,
                    consumption,
                    cost,
                }),
                _ => {
                    trace!(date = %block.date, row = &caps[0], "skipping row with bad numbers");
                    None
                }
            }
        })
        .collect()
}

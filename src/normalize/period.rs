// src/normalize/period.rs
use anyhow::{anyhow, Context, Result};
use chrono::{NaiveTime, Timelike};

/// Start and end wall-clock times of an `HH:MM-HH:MM` period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// Split period text at the hyphen into trimmed start/end tokens.
pub fn split_period(text: &str) -> Option<(&str, &str)> {
    text.split_once('-')
        .map(|(start, end)| (start.trim(), end.trim()))
}

impl Period {
    pub fn parse(text: &str) -> Result<Self> {
        let (start, end) =
            split_period(text).ok_or_else(|| anyhow!("period {:?} has no '-' separator", text))?;
        Ok(Self {
            start: parse_wall_time(start).with_context(|| format!("period {:?}", text))?,
            end: parse_wall_time(end).with_context(|| format!("period {:?}", text))?,
        })
    }

    /// `23:30-00:00` ends on the following calendar day.
    pub fn crosses_midnight(&self) -> bool {
        self.end.hour() < self.start.hour()
    }
}

pub fn parse_wall_time(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M")
        .with_context(|| format!("invalid wall-clock time {:?}", s))
}

// src/tariff.rs
use anyhow::Result;
use chrono::{NaiveTime, Timelike};

use crate::normalize::{period::parse_wall_time, split_period, NormalizedRecord};

/// Rates below this (pence/unit) are the cheap tariff. A threshold rather
/// than an exact rate so tariff changes within a bill still match.
pub const DEFAULT_RATE_THRESHOLD: f64 = 8.0;

fn minute_of_day(t: NaiveTime) -> u32 {
    t.hour() * 60 + t.minute()
}

/// Nightly off-peak window as `[start, end)` minutes of day, wrapping midnight
/// when `start > end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffPeakWindow {
    start: u32,
    end: u32,
}

impl Default for OffPeakWindow {
    /// 23:30 to 05:30.
    fn default() -> Self {
        Self {
            start: 23 * 60 + 30,
            end: 5 * 60 + 30,
        }
    }
}

impl OffPeakWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            start: minute_of_day(start),
            end: minute_of_day(end),
        }
    }

    /// Parse `"HH:MM"` bounds.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Ok(Self::new(parse_wall_time(start)?, parse_wall_time(end)?))
    }

    pub fn contains(&self, t: NaiveTime) -> bool {
        let m = minute_of_day(t);
        if self.start <= self.end {
            self.start <= m && m < self.end
        } else {
            m >= self.start || m < self.end
        }
    }

    /// Whether the period starts inside the window; None if the start time
    /// does not parse.
    pub fn classify(&self, period: &str) -> Option<bool> {
        let (start, _) = split_period(period)?;
        parse_wall_time(start).ok().map(|t| self.contains(t))
    }
}

/// True iff the period starts in the default 23:30–05:30 window.
pub fn is_off_peak(period: &str) -> bool {
    OffPeakWindow::default().classify(period).unwrap_or(false)
}

/// Cheap-rate consumption outside the nightly window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TariffRule {
    pub window: OffPeakWindow,
    pub rate_threshold: f64,
}

impl Default for TariffRule {
    fn default() -> Self {
        Self {
            window: OffPeakWindow::default(),
            rate_threshold: DEFAULT_RATE_THRESHOLD,
        }
    }
}

impl TariffRule {
    pub fn includes_row(&self, rate: f64, period: &str) -> bool {
        rate < self.rate_threshold && self.window.classify(period) == Some(false)
    }

    pub fn includes(&self, record: &NormalizedRecord) -> bool {
        self.includes_row(record.rate, &record.period)
    }
}

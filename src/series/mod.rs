// src/series/mod.rs
pub mod preview;
pub mod write;

use crate::normalize::NormalizedRecord;
use crate::tariff::TariffRule;

pub use preview::{render_preview, PreviewOptions};
pub use write::{export_all, format_instant, write_series, write_series_to_path, WriteOptions};

/// Output column order of both artifacts.
pub const COLUMNS: [&str; 7] = ["Start", "End", "Date", "Period", "Rate", "Consumption", "Cost"];

/// Records from every document, ordered by start instant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    records: Vec<NormalizedRecord>,
}

impl Series {
    /// Concatenate per-document batches in the order given, then stable-sort by
    /// `start` so equal instants keep their insertion order.
    pub fn assemble<I>(batches: I) -> Self
    where
        I: IntoIterator<Item = Vec<NormalizedRecord>>,
    {
        let mut records: Vec<NormalizedRecord> = batches.into_iter().flatten().collect();
        records.sort_by(|a, b| a.start.cmp(&b.start));
        Self { records }
    }

    /// The subset selected by `rule`, still in start order.
    pub fn filtered(&self, rule: &TariffRule) -> Self {
        Self {
            records: self
                .records
                .iter()
                .filter(|r| rule.includes(r))
                .cloned()
                .collect(),
        }
    }

    pub fn records(&self) -> &[NormalizedRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

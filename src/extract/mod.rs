// src/extract/mod.rs
//! Regex extraction of per-date blocks and half-hour rows from bill text.

pub mod blocks;
pub mod rows;

pub use blocks::{extract_blocks, parse_marker_date, RawBlock};
pub use rows::{normalize_period_text, tokenize_rows, RowTuple};

/// Blocks then rows, in document order.
pub fn extract_rows(text: &str, source: &str) -> Vec<RowTuple> {
    extract_blocks(text, source)
        .iter()
        .flat_map(tokenize_rows)
        .collect()
}

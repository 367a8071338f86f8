// src/pipeline.rs
use anyhow::Result;
use chrono_tz::Tz;
use rayon::prelude::*;
use std::time::Instant;
use tracing::{error, info, instrument};

use crate::{
    document::{body_text, DocumentSource},
    extract::extract_rows,
    normalize::{normalize_rows, NormalizedRecord},
    series::Series,
};

/// Blocks, rows and timestamps for one document's body text.
pub fn process_text(text: &str, tz: Tz, source: &str) -> Vec<NormalizedRecord> {
    normalize_rows(tz, extract_rows(text, source))
}

#[instrument(level = "info", skip_all, fields(source = %doc.name()))]
pub fn process_document(
    doc: &dyn DocumentSource,
    tz: Tz,
    keep_first_page: bool,
) -> Result<Vec<NormalizedRecord>> {
    let start = Instant::now();
    let pages = doc.pages()?;
    let text = body_text(&pages, keep_first_page);
    let records = process_text(&text, tz, &doc.name());
    info!(pages = pages.len(), rows = records.len(), elapsed = ?start.elapsed(), "processed");
    Ok(records)
}

/// Process every document independently and merge into one sorted series.
/// A document that cannot be read is logged and left out.
pub fn run_batch<D>(docs: &[D], tz: Tz, keep_first_page: bool) -> Series
where
    D: DocumentSource,
{
    let batches: Vec<Vec<NormalizedRecord>> = docs
        .par_iter()
        .map(|doc| {
            process_document(doc, tz, keep_first_page).unwrap_or_else(|err| {
                error!(source = %doc.name(), "skipping document: {:#}", err);
                Vec::new()
            })
        })
        .collect();
    Series::assemble(batches)
}

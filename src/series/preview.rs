// src/series/preview.rs
use super::{format_instant, Series, COLUMNS};

/// How much of a series to show on the console.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreviewOptions {
    /// None shows every row.
    pub max_rows: Option<usize>,
}

fn format_line(cells: &[&str], widths: &[usize]) -> String {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| format!("{:<w$}", cell, w = *w))
        .collect::<Vec<_>>()
        .join(" ");
    format!("{}\n", line.trim_end())
}

/// Render a left-aligned text table of the first rows of `series`.
pub fn render_preview(series: &Series, opts: &PreviewOptions) -> String {
    let shown = opts.max_rows.unwrap_or(usize::MAX).min(series.len());
    let rows: Vec<[String; 7]> = series.records()[..shown]
        .iter()
        .map(|r| {
            [
                format_instant(&r.start),
                format_instant(&r.end),
                r.date.to_string(),
                r.period.clone(),
                r.rate.to_string(),
                r.consumption.to_string(),
                r.cost.to_string(),
            ]
        })
        .collect();

    let mut widths = COLUMNS.map(str::len);
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.len());
        }
    }

    let mut out = format_line(&COLUMNS, &widths);
    for row in &rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        out.push_str(&format_line(&cells, &widths));
    }
    if shown < series.len() {
        out.push_str(&format!("... {} more rows\n", series.len() - shown));
    }
    out
}

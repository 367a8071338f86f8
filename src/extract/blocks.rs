// src/extract/blocks.rs
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{trace, warn};

/// "4th December 2024", "21st  March\n2025", ...
static DATE_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d{1,2}(?:st|nd|rd|th)\s+\w+\s+\d{4}").expect("date marker regex is valid")
});

static ORDINAL_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,2})(?:st|nd|rd|th)").expect("ordinal regex is valid"));

/// The text between one date marker and the next, tagged with the marker's date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawBlock<'a> {
    pub date: NaiveDate,
    pub text: &'a str,
}

/// Parses a marker such as `"4th December 2024"` into a calendar date.
/// Returns None for unknown month names or impossible days.
pub fn parse_marker_date(marker: &str) -> Option<NaiveDate> {
    let stripped = ORDINAL_SUFFIX.replace_all(marker, "$1");
    let cleaned = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    NaiveDate::parse_from_str(&cleaned, "%d %B %Y").ok()
}

/// Split document text into per-date blocks.
///
/// Each block runs from the end of its marker to the start of the next marker
/// (or the end of `text`). A marker whose date does not parse is logged and its
/// block dropped; the preceding block still stops at that marker.
pub fn extract_blocks<'a>(text: &'a str, source: &str) -> Vec<RawBlock<'a>> {
    let markers: Vec<_> = DATE_MARKER.find_iter(text).collect();
    let mut blocks = Vec::with_capacity(markers.len());

    for (idx, marker) in markers.iter().enumerate() {
        let Some(date) = parse_marker_date(marker.as_str()) else {
            warn!(
                source,
                marker = marker.as_str(),
                "unparseable date marker, dropping block"
            );
            continue;
        };

        let end = markers
            .get(idx + 1)
            .map_or(text.len(), |next| next.start());
        trace!(source, %date, len = end - marker.end(), "date block");
        blocks.push(RawBlock {
            date,
            text: &text[marker.end()..end],
        });
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_marker_date_strips_ordinals() {
        let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
        assert_eq!(parse_marker_date("4th December 2024"), Some(d(2024, 12, 4)));
        assert_eq!(parse_marker_date("1st March 2025"), Some(d(2025, 3, 1)));
        assert_eq!(parse_marker_date("22nd June 2025"), Some(d(2025, 6, 22)));
        assert_eq!(parse_marker_date("23rd  October\n2024"), Some(d(2024, 10, 23)));
    }

    #[test]
    fn test_parse_marker_date_rejects_bad_dates() {
        assert_eq!(parse_marker_date("31st February 2024"), None);
        assert_eq!(parse_marker_date("4th Decembre 2024"), None);
        assert_eq!(parse_marker_date("12th floor 2024"), None);
    }

    #[test]
    fn test_blocks_span_between_markers() {
        let text = "header\n4th December 2024\nAAA\n5th December 2024\nBBB\nCCC";
        let blocks = extract_blocks(text, "test");

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].date, NaiveDate::from_ymd_opt(2024, 12, 4).unwrap());
        assert_eq!(blocks[0].text, "\nAAA\n");
        assert_eq!(blocks[1].date, NaiveDate::from_ymd_opt(2024, 12, 5).unwrap());
        assert_eq!(blocks[1].text, "\nBBB\nCCC");
    }

    #[test]
    fn test_bad_marker_drops_only_its_block() {
        let text = "4th December 2024 AAA 31st February 2024 BBB 6th December 2024 CCC";
        let blocks = extract_blocks(text, "test");

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].text, " AAA ");
        assert_eq!(blocks[1].date, NaiveDate::from_ymd_opt(2024, 12, 6).unwrap());
        assert_eq!(blocks[1].text, " CCC");
    }

    #[test]
    fn test_no_markers_no_blocks() {
        assert!(extract_blocks("00:00-00:30 6.67 7.36 49.042", "test").is_empty());
    }
}

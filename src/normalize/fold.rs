// src/normalize/fold.rs
use std::collections::VecDeque;

/// Which of two instants an ambiguous wall-clock time refers to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Occurrence {
    /// Before the clocks went back (also used for unambiguous times).
    #[default]
    Earlier,
    /// After the clocks went back.
    Later,
}

impl Occurrence {
    fn repeated(is_repeat: bool) -> Self {
        if is_repeat {
            Occurrence::Later
        } else {
            Occurrence::Earlier
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FoldFlags {
    pub start: Occurrence,
    pub end: Occurrence,
}

/// The start/end text of the last two rows seen, oldest first.
///
/// Rows are half-hourly and arrive in elapsed-time order, so during a
/// fall-back hour a wall-clock value repeats exactly two rows after its first
/// appearance. Matching the row two back marks the second occurrence.
#[derive(Debug, Clone, Default)]
pub struct FoldWindow {
    rows: VecDeque<(String, String)>,
}

impl FoldWindow {
    const SIZE: usize = 2;

    pub fn new() -> Self {
        Self::default()
    }

    /// Flag the current row against the row two back, then slide it in.
    pub fn observe(&mut self, start: &str, end: &str) -> FoldFlags {
        let flags = match self.rows.front() {
            Some((prev_start, prev_end)) if self.rows.len() == Self::SIZE => FoldFlags {
                start: Occurrence::repeated(prev_start == start),
                end: Occurrence::repeated(prev_end == end),
            },
            _ => FoldFlags::default(),
        };

        if self.rows.len() == Self::SIZE {
            self.rows.pop_front();
        }
        self.rows.push_back((start.to_owned(), end.to_owned()));
        flags
    }
}

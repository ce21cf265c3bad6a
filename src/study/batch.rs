//! Progressive pagination over a verse range. Pure: no I/O, no state.

use serde::Serialize;

/// Counts reported with every page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VerseStats {
    pub processed: u32,
    pub total: u32,
    pub remaining: u32,
}

/// Bounds and progress of one page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageBounds {
    pub start_verse: u32,
    pub end_verse: u32,
    /// False when the page holds no verse (start past the range end).
    pub is_empty: bool,
    pub has_more: bool,
    /// `None` only for an empty page.
    pub next_start: Option<u32>,
    /// Percentage with one decimal, in `[0, 100]`.
    pub total_progress_pct: f64,
    pub stats: VerseStats,
}

impl PageBounds {
    /// Verse numbers on this page, in order.
    pub fn verses(&self) -> impl Iterator<Item = u32> {
        let (start, end) = if self.is_empty {
            (1, 0)
        } else {
            (self.start_verse, self.end_verse)
        };
        start..=end
    }

    pub fn len(&self) -> usize {
        if self.is_empty {
            0
        } else {
            (self.end_verse - self.start_verse + 1) as usize
        }
    }

    /// `"s-e"`, or `None` for an empty page.
    pub fn range_label(&self) -> Option<String> {
        (!self.is_empty).then(|| format!("{}-{}", self.start_verse, self.end_verse))
    }
}

/// Compute one page of `[range_start, range_end]` starting at `start_verse`.
///
/// `start_verse` below the range is raised to `range_start`; `batch_size`
/// below 1 counts as 1. Calling twice with the same inputs yields the same
/// page.
pub fn page(range_start: u32, range_end: u32, start_verse: u32, batch_size: u32) -> PageBounds {
    let batch_size = batch_size.max(1);
    let range_end = range_end.max(range_start);
    let total = range_end - range_start + 1;
    let start = start_verse.max(range_start);

    if start > range_end {
        return PageBounds {
            start_verse: start,
            end_verse: range_end,
            is_empty: true,
            has_more: false,
            next_start: None,
            total_progress_pct: 100.0,
            stats: VerseStats {
                processed: total,
                total,
                remaining: 0,
            },
        };
    }

    let end = start.saturating_add(batch_size - 1).min(range_end);
    let has_more = end < range_end;
    let processed = end - range_start + 1;
    let ratio = (processed as f64 / total as f64).min(1.0);

    PageBounds {
        start_verse: start,
        end_verse: end,
        is_empty: false,
        has_more,
        next_start: Some(if has_more { end + 1 } else { range_end }),
        total_progress_pct: round1(ratio * 100.0),
        stats: VerseStats {
            processed,
            total,
            remaining: total - processed,
        },
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

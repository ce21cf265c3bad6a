//! Character budget allocation and fitting.
//!
//! All lengths are counted in Unicode scalar values (`chars()`), never bytes.

use serde::Serialize;

/// Default lower clamp for a per-verse budget.
pub const DEFAULT_FLOOR: usize = 60;
/// Default upper clamp for a per-verse budget.
pub const DEFAULT_CEILING: usize = 600;

/// Fraction of the budget below which filler clauses are appended.
const FILL_RATIO: f64 = 0.9;

const ELLIPSIS: char = '…';

/// Per-verse budget derived from a caller's total target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BudgetSpec {
    pub target_total_chars: usize,
    pub verse_count: usize,
    pub per_verse_chars: usize,
}

/// Splits a total character target across verses and fits texts into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetAllocator {
    floor: usize,
    ceiling: usize,
}

impl Default for BudgetAllocator {
    fn default() -> Self {
        Self::new(DEFAULT_FLOOR, DEFAULT_CEILING)
    }
}

impl BudgetAllocator {
    /// `ceiling` is raised to `floor` when configured below it.
    pub fn new(floor: usize, ceiling: usize) -> Self {
        Self {
            floor,
            ceiling: ceiling.max(floor),
        }
    }

    pub fn floor(&self) -> usize {
        self.floor
    }

    pub fn ceiling(&self) -> usize {
        self.ceiling
    }

    /// Per-verse budget for `verse_count` verses sharing `target_total_chars`.
    ///
    /// Small totals get a larger multiplier so short requests still read
    /// well; the result is clamped into `[floor, ceiling]`.
    pub fn allocate(&self, target_total_chars: usize, verse_count: usize) -> usize {
        let base = target_total_chars as f64 / verse_count.max(1) as f64;
        let multiplier = if target_total_chars <= 600 {
            1.4
        } else if target_total_chars <= 1600 {
            1.2
        } else {
            1.1
        };
        let scaled = (base * multiplier).round() as usize;
        scaled.clamp(self.floor, self.ceiling)
    }

    pub fn budget(&self, target_total_chars: usize, verse_count: usize) -> BudgetSpec {
        BudgetSpec {
            target_total_chars,
            verse_count,
            per_verse_chars: self.allocate(target_total_chars, verse_count),
        }
    }

    /// Bring `text` within `budget` characters.
    ///
    /// Too long: cut at the last paragraph or sentence boundary that keeps
    /// at least half the budget and the floor, else at the last word
    /// boundary, then append `…`. Too short (under 90 %): append `filler`
    /// clauses, in order, that still fit.
    pub fn fit(&self, text: &str, budget: usize, filler: &[String]) -> String {
        if budget == 0 {
            return String::new();
        }
        let text = text.trim();
        let len = text.chars().count();

        if len > budget {
            return self.truncate(text, budget);
        }

        let threshold = (budget as f64 * FILL_RATIO).ceil() as usize;
        if len >= threshold || filler.is_empty() {
            return text.to_string();
        }

        let mut out = text.to_string();
        let mut out_len = len;
        for clause in filler {
            if out_len >= threshold {
                break;
            }
            let clause = clause.trim();
            if clause.is_empty() {
                continue;
            }
            let sep = if out.is_empty() { 0 } else { 1 };
            let added = sep + clause.chars().count();
            if out_len + added > budget {
                continue;
            }
            if sep == 1 {
                out.push('\n');
            }
            out.push_str(clause);
            out_len += added;
        }
        out
    }

    fn truncate(&self, text: &str, budget: usize) -> String {
        let chars: Vec<char> = text.chars().collect();
        // One char is reserved for the ellipsis.
        let window = budget - 1;
        let min_keep = (budget / 2).max(self.floor);

        let cut = last_sentence_boundary(&chars, window)
            .filter(|&end| end >= min_keep)
            .or_else(|| last_word_boundary(&chars, window))
            .unwrap_or(window);

        let mut kept: String = chars[..cut].iter().collect();
        let trimmed_len = kept.trim_end_matches(|c: char| c.is_whitespace() || c == ',' || c == ';' || c == ':').len();
        kept.truncate(trimmed_len);
        kept.push(ELLIPSIS);
        kept
    }
}

/// End index (exclusive) of the last paragraph or sentence that fits in
/// `chars[..window]`.
fn last_sentence_boundary(chars: &[char], window: usize) -> Option<usize> {
    let limit = window.min(chars.len());
    (1..=limit).rev().find(|&end| {
        let prev = chars[end - 1];
        let next = chars.get(end).copied();
        let paragraph = prev == '\n' && next == Some('\n');
        let sentence = matches!(prev, '.' | '!' | '?') && next.map_or(true, char::is_whitespace);
        paragraph || sentence
    })
}

/// End index (exclusive) of the last whole word in `chars[..window]`.
fn last_word_boundary(chars: &[char], window: usize) -> Option<usize> {
    let limit = window.min(chars.len());
    if chars.get(limit).map_or(true, |c| c.is_whitespace()) && limit > 0 {
        return Some(limit);
    }
    (1..limit).rev().find(|&end| chars[end].is_whitespace())
}

use std::collections::BTreeSet;

use crate::model::Selection;

/// Distinct rows seen during a session plus the practice counter.
///
/// `practice_count` only moves when a row is seen for the first time, so it
/// always equals `seen().len()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverageState {
    practice_count: u32,
    seen: BTreeSet<usize>,
}

impl CoverageState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn practice_count(&self) -> u32 {
        self.practice_count
    }

    #[must_use]
    pub fn seen(&self) -> &BTreeSet<usize> {
        &self.seen
    }

    #[must_use]
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }

    #[must_use]
    pub fn has_seen(&self, index: usize) -> bool {
        self.seen.contains(&index)
    }

    /// Mark `index` as seen. Returns `true` if it was new.
    ///
    /// Repeating an index is a no-op.
    pub fn record(&mut self, index: usize) -> bool {
        if !self.seen.insert(index) {
            return false;
        }
        self.practice_count = self.practice_count.saturating_add(1);
        true
    }

    /// Apply a selection: a visible selection marks its row as seen, a
    /// hidden one changes nothing. Returns `true` if the row was new.
    pub fn update(&mut self, selection: &Selection) -> bool {
        if !selection.is_visible() {
            return false;
        }
        self.record(selection.index())
    }

    /// Fraction of `row_count` rows seen so far, `0.0` for an empty table.
    #[must_use]
    pub fn coverage(&self, row_count: usize) -> f64 {
        if row_count == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let ratio = self.seen.len() as f64 / row_count as f64;
        ratio.min(1.0)
    }
}

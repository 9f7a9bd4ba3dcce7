//! View window (brush) over the displayed series.
//!
//! The brush is an inclusive index range over the *downsampled* series
//! currently on screen, letting the user zoom into a sub-range without
//! reprocessing raw data. Bounds are clamped on every read rather than
//! stored clamped: the governing series can shrink under the selection
//! (mode or dataset switch), and a stale cached clamp would then point
//! past the end.

use crate::series::Sample;

/// A proposed selection from the range widget. Bounds are signed and
/// unvalidated; malformed interactive input is corrected by clamping,
/// never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrushRange {
    pub start_index: i64,
    pub end_index: i64,
}

impl BrushRange {
    /// Build a range only when both bounds are present; a partial
    /// proposal means "no selection" (full view).
    pub fn from_parts(start: Option<i64>, end: Option<i64>) -> Option<Self> {
        match (start, end) {
            (Some(start_index), Some(end_index)) => Some(Self {
                start_index,
                end_index,
            }),
            _ => None,
        }
    }
}

/// Brush selection state for one chart.
///
/// The selection is only meaningful relative to one specific
/// materialized sequence, so [`BrushState::retarget`] discards it
/// whenever the identity of the governing series changes.
#[derive(Debug, Default)]
pub struct BrushState {
    range: Option<BrushRange>,
    /// Identity tag of the series the current selection was made on
    series_tag: Option<u64>,
}

impl BrushState {
    /// Replace the current selection
    pub fn set_range(&mut self, range: Option<BrushRange>) {
        self.range = range;
    }

    /// Drop the selection, restoring the full view
    pub fn reset(&mut self) {
        self.range = None;
    }

    pub fn has_selection(&self) -> bool {
        self.range.is_some()
    }

    /// Point the brush at a (possibly new) governing series. A tag
    /// change means the dataset, display mode, or layout changed, and
    /// any existing index selection is meaningless over the new series.
    pub fn retarget(&mut self, tag: u64) {
        if self.series_tag != Some(tag) {
            self.range = None;
            self.series_tag = Some(tag);
        }
    }

    /// Clamped inclusive bounds over a series of length `len`.
    ///
    /// Start is clamped to `[0, len-1]`; end is clamped to
    /// `[start, len-1]`, so end can never precede the clamped start.
    /// Without a selection the bounds cover the whole series.
    /// Recomputed on every call, never cached.
    pub fn clamped_bounds(&self, len: usize) -> (usize, usize) {
        if len == 0 {
            return (0, 0);
        }
        let last = (len - 1) as i64;
        let (raw_start, raw_end) = match self.range {
            Some(range) => (range.start_index, range.end_index),
            None => (0, last),
        };
        let start = raw_start.clamp(0, last);
        let end = raw_end.clamp(start, last);
        (start as usize, end as usize)
    }

    /// The currently visible sub-sequence of the displayed series.
    /// Without a selection the full series is returned unchanged.
    pub fn visible_slice<'a>(&self, samples: &'a [Sample]) -> &'a [Sample] {
        if samples.is_empty() || self.range.is_none() {
            return samples;
        }
        let (start, end) = self.clamped_bounds(samples.len());
        &samples[start..=end]
    }
}

//! Page slicing over the sorted matched set

use std::ops::Range;

/// Page window for a matched set of known size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// 1-based page index
    pub number: usize,
    /// Records per page, at least 1
    pub size: usize,
}

impl Page {
    /// Creates a window; `number` and `size` below 1 are clamped to 1
    pub fn new(number: usize, size: usize) -> Self {
        Self {
            number: number.max(1),
            size: size.max(1),
        }
    }

    /// Zero-based offsets `[(number-1)*size, number*size)` clipped to `total`.
    ///
    /// A page past the end yields an empty range.
    pub fn range(&self, total: usize) -> Range<usize> {
        let start = (self.number - 1).saturating_mul(self.size).min(total);
        let end = start.saturating_add(self.size).min(total);
        start..end
    }

    /// Number of pages needed for `total` records, 0 when `total` is 0
    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.size)
    }
}

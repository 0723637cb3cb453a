//! # Page Lookup
//!
//! Read-only searches over a published, newest-first page table.

use std::cmp::Reverse;

use super::errors::PagerError;
use super::page::PageDescriptor;
use super::value_objects::{AdHocRange, BlockHeight, HistorySummary};

/// Borrowed view over a page table and the summary it was built from.
pub struct PageLookup<'a, L> {
    pages: &'a [PageDescriptor<L>],
    summary: &'a HistorySummary,
}

impl<'a, L> PageLookup<'a, L> {
    pub fn new(pages: &'a [PageDescriptor<L>], summary: &'a HistorySummary) -> Self {
        Self { pages, summary }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Page at `page_id`, or `PageOutOfRange`.
    pub fn page(&self, page_id: usize) -> Result<&'a PageDescriptor<L>, PagerError> {
        self.pages.get(page_id).ok_or(PagerError::PageOutOfRange {
            page_id,
            page_count: self.pages.len(),
        })
    }

    /// Lowest height of the page at `page_id`.
    pub fn page_bottom(&self, page_id: usize) -> Result<BlockHeight, PagerError> {
        self.page(page_id).map(PageDescriptor::lower_bound)
    }

    /// Id of the page containing `height`.
    ///
    /// Heights above the newest page map to page 0, heights below the oldest
    /// page map to the last id. A height between two pages resolves to the
    /// closer one, the newer page on a tie. `None` when there are no pages.
    pub fn page_id_for_height(&self, height: BlockHeight) -> Option<usize> {
        let last = self.pages.len().checked_sub(1)?;

        // First page whose lower bound is at or below `height`.
        let idx = self.pages.partition_point(|p| p.lower_bound() > height);
        if idx > last {
            return Some(last);
        }
        if height <= self.pages[idx].upper_bound() || idx == 0 {
            return Some(idx);
        }

        let newer = &self.pages[idx - 1];
        let up = newer.lower_bound() - height;
        let down = height - self.pages[idx].upper_bound();
        Some(if up <= down { idx - 1 } else { idx })
    }

    /// Page boundary (a lower or upper bound) nearest to `height`.
    ///
    /// Ties resolve to the higher, more recent boundary.
    pub fn block_in_vicinity(&self, height: BlockHeight) -> Option<BlockHeight> {
        let idx = self.page_id_for_height(height)?;
        let from = idx.saturating_sub(1);
        let to = (idx + 1).min(self.pages.len() - 1);

        self.pages[from..=to]
            .iter()
            .flat_map(|p| [p.upper_bound(), p.lower_bound()])
            .min_by_key(|&boundary| (boundary.abs_diff(height), Reverse(boundary)))
    }

    /// Window starting at `height` spanning roughly `count` transactions.
    ///
    /// Accumulates summary entries at or above `height` until `count` is
    /// reached, the same way pages are closed. The window stops short of a
    /// height whose count would overflow its total. `None` if no history
    /// lies at or above `height`.
    pub fn range_for_height_and_count(
        &self,
        height: BlockHeight,
        count: u32,
    ) -> Option<AdHocRange> {
        let mut range: Option<AdHocRange> = None;

        for (&top, &tx_count) in self.summary.range(height..) {
            let window = range.get_or_insert(AdHocRange {
                lower_bound: height,
                upper_bound: top,
                tx_count: 0,
            });
            let Some(total) = window.tx_count.checked_add(tx_count) else {
                break;
            };
            window.upper_bound = top;
            window.tx_count = total;
            if total >= count {
                break;
            }
        }

        range
    }
}

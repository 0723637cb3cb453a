//! # Inbound Ports (Driving Ports)
//!
//! Read-only query API exposed to presentation layers.

use std::sync::Arc;

use crate::domain::{AdHocRange, BlockHeight, HistorySummary, LedgerMap, PagerError};

/// Queries against the currently published page table.
///
/// Every call works on one consistent snapshot; none of them blocks on a
/// concurrent `map_history` or `reset`.
pub trait HistoryPagingApi<L> {
    /// Whether a page table has been published since construction or reset.
    fn is_initialized(&self) -> bool;

    /// Summary the current page table was built from.
    fn summary(&self) -> Arc<HistorySummary>;

    /// Number of pages in the current table (0 before initialization).
    fn page_count(&self) -> usize;

    /// Lowest height of a page.
    ///
    /// ## Returns
    ///
    /// - `Ok(height)`: the page's lower bound
    /// - `Err(PageOutOfRange)`: stale or invalid page id
    fn page_bottom(&self, page_id: usize) -> Result<BlockHeight, PagerError>;

    /// Page containing `height`, clamped to the history's ends.
    fn page_id_for_height(&self, height: BlockHeight) -> Option<usize>;

    /// Page boundary nearest to `height`.
    fn block_in_vicinity(&self, height: BlockHeight) -> Option<BlockHeight>;

    /// Ad-hoc window from `height` spanning about `count` transactions.
    fn range_for_height_and_count(&self, height: BlockHeight, count: u32) -> Option<AdHocRange>;

    /// Currently cached rows of a page without building anything.
    fn cached_ledgers(&self, page_id: usize) -> Result<Arc<LedgerMap<L>>, PagerError>;
}

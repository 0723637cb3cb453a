//! # Read-Only Queries
//!
//! Implements the HistoryPagingApi trait against the published snapshot.

use std::sync::Arc;

use super::HistoryPager;
use crate::domain::{AdHocRange, BlockHeight, HistorySummary, LedgerMap, PagerError};
use crate::ports::inbound::HistoryPagingApi;

impl<L> HistoryPagingApi<L> for HistoryPager<L> {
    fn is_initialized(&self) -> bool {
        self.table.load().initialized
    }

    fn summary(&self) -> Arc<HistorySummary> {
        Arc::clone(&self.table.load().summary)
    }

    fn page_count(&self) -> usize {
        self.table.load().pages.len()
    }

    fn page_bottom(&self, page_id: usize) -> Result<BlockHeight, PagerError> {
        self.table.load().lookup().page_bottom(page_id)
    }

    fn page_id_for_height(&self, height: BlockHeight) -> Option<usize> {
        self.table.load().lookup().page_id_for_height(height)
    }

    fn block_in_vicinity(&self, height: BlockHeight) -> Option<BlockHeight> {
        self.table.load().lookup().block_in_vicinity(height)
    }

    fn range_for_height_and_count(&self, height: BlockHeight, count: u32) -> Option<AdHocRange> {
        self.table
            .load()
            .lookup()
            .range_for_height_and_count(height, count)
    }

    fn cached_ledgers(&self, page_id: usize) -> Result<Arc<LedgerMap<L>>, PagerError> {
        let table = self.table.load();
        let page = table.lookup().page(page_id)?;
        Ok(page.rows())
    }
}

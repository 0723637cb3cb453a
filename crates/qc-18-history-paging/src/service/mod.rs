//! # History Pager Service
//!
//! The controller that owns the published page table and drives lazy page
//! builds.
//!
//! ## Architecture
//!
//! This service:
//! 1. Publishes page tables built by the partitioner (`map_history`)
//! 2. Builds and caches ledger rows per page on demand (`get_page_ledger_map`)
//! 3. Implements `HistoryPagingApi` for read-only queries
//!
//! ## Snapshot-Swap Publication
//!
//! The summary, the pages and the initialized flag live in one immutable
//! [`PageTable`] behind an `ArcSwap`. Readers load the current table once
//! and work on that snapshot for the whole call, so a concurrent
//! `map_history` or `reset` never blocks them and never shows them a torn
//! table. Only mutators take `publish_lock`.

mod pager;
mod queries;
mod stats;

pub use stats::PagerStats;

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use std::sync::Arc;

use crate::domain::{
    HistorySummary, LedgerMap, PageDescriptor, PageLookup, PagerConfig, PagerError, TxioMap,
};
use stats::PagerCounters;

/// One published state of the pager.
#[derive(Debug)]
pub(crate) struct PageTable<L> {
    pub(crate) initialized: bool,
    pub(crate) summary: Arc<HistorySummary>,
    /// Newest page first.
    pub(crate) pages: Vec<PageDescriptor<L>>,
}

impl<L> PageTable<L> {
    fn uninitialized() -> Self {
        Self {
            initialized: false,
            summary: Arc::new(HistorySummary::new()),
            pages: Vec::new(),
        }
    }

    pub(crate) fn lookup(&self) -> PageLookup<'_, L> {
        PageLookup::new(&self.pages, &self.summary)
    }
}

/// Outcome of a page read that may rebuild the page.
#[derive(Debug)]
pub enum PageLoad<L, T> {
    /// Rows were already cached for the requested version.
    CacheHit(Arc<LedgerMap<L>>),
    /// Rows were built by this call. `txio` holds the raw records fetched
    /// for the page so the caller does not have to fetch them again.
    Rebuilt {
        rows: Arc<LedgerMap<L>>,
        txio: TxioMap<T>,
    },
    /// Another caller is building (or has just built) this page at the
    /// same version. Nothing was produced; re-read the cache.
    AlreadyCurrent,
}

impl<L, T> PageLoad<L, T> {
    /// Rows produced or found by this call, if any.
    pub fn rows(&self) -> Option<&Arc<LedgerMap<L>>> {
        match self {
            Self::CacheHit(rows) | Self::Rebuilt { rows, .. } => Some(rows),
            Self::AlreadyCurrent => None,
        }
    }

    pub fn is_already_current(&self) -> bool {
        matches!(self, Self::AlreadyCurrent)
    }
}

/// Pages a wallet's transaction history and caches each page's ledger rows.
///
/// Generic over the ledger entry type `L`.
pub struct HistoryPager<L> {
    config: PagerConfig,
    table: ArcSwap<PageTable<L>>,
    /// Serializes `map_history` and `reset`. Readers never take it.
    publish_lock: Mutex<()>,
    counters: PagerCounters,
}

impl<L> HistoryPager<L> {
    /// Create an uninitialized pager with the default page size.
    pub fn new() -> Self {
        Self::from_valid_config(PagerConfig::default())
    }

    /// Create an uninitialized pager with a custom configuration.
    pub fn with_config(config: PagerConfig) -> Result<Self, PagerError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: PagerConfig) -> Self {
        Self {
            config,
            table: ArcSwap::from_pointee(PageTable::uninitialized()),
            publish_lock: Mutex::new(()),
            counters: PagerCounters::default(),
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &PagerConfig {
        &self.config
    }

    /// Get pager statistics.
    pub fn stats(&self) -> PagerStats {
        let table = self.table.load();
        let mut stats = PagerStats {
            page_count: table.pages.len(),
            summary_heights: table.summary.len(),
            total_transactions: table.pages.iter().map(|p| p.tx_count() as u64).sum(),
            ..PagerStats::default()
        };
        self.counters.fill(&mut stats);
        stats
    }
}

impl<L> Default for HistoryPager<L> {
    fn default() -> Self {
        Self::new()
    }
}

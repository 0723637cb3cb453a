//! # Pager Statistics
//!
//! Lock-free counters updated on the hot path and a plain snapshot type for
//! monitoring.

use std::sync::atomic::{AtomicU64, Ordering};

/// Statistics about the history pager.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PagerStats {
    /// Pages in the currently published table.
    pub page_count: usize,
    /// Distinct heights in the current summary.
    pub summary_heights: usize,
    /// Transactions covered by the current table.
    pub total_transactions: u64,
    /// Page tables published by `map_history`.
    pub history_maps: u64,
    /// Page reads answered from cache.
    pub cache_hits: u64,
    /// Pages rebuilt through the fetch/build callbacks.
    pub rebuilds: u64,
    /// Rebuild requests answered with "already current".
    pub already_current: u64,
    /// Summary, TxIO or ledger callbacks that failed.
    pub callback_failures: u64,
}

#[derive(Debug, Default)]
pub(crate) struct PagerCounters {
    history_maps: AtomicU64,
    cache_hits: AtomicU64,
    rebuilds: AtomicU64,
    already_current: AtomicU64,
    callback_failures: AtomicU64,
}

impl PagerCounters {
    pub(crate) fn record_history_map(&self) {
        self.history_maps.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_rebuild(&self) {
        self.rebuilds.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_already_current(&self) {
        self.already_current.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_callback_failure(&self) {
        self.callback_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Fill the counter fields of `stats`.
    pub(crate) fn fill(&self, stats: &mut PagerStats) {
        stats.history_maps = self.history_maps.load(Ordering::Relaxed);
        stats.cache_hits = self.cache_hits.load(Ordering::Relaxed);
        stats.rebuilds = self.rebuilds.load(Ordering::Relaxed);
        stats.already_current = self.already_current.load(Ordering::Relaxed);
        stats.callback_failures = self.callback_failures.load(Ordering::Relaxed);
    }
}

//! # Concurrency Tests for History Paging (qc-18)
//!
//! Readers race `map_history`/`reset` and each other.
//!
//! ## Test Categories
//!
//! 1. **Snapshot Reads** - readers never see a torn or partial page table
//! 2. **Single Rebuild** - one build per (page, version) under contention
//! 3. **Reader Survival** - a read holding the old table outlives a reset

use qc_18_history_paging::{
    BlockHeight, HistoryPager, HistoryPagingApi, HistorySource, HistorySummary, LedgerBuilder,
    LedgerMap, PageLoad, PagerConfig, PagerError, TxioMap,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Barrier, Mutex};
use std::thread;

// =============================================================================
// TEST HELPERS
// =============================================================================

/// Summary with `heights` heights of 3 transactions each, starting at 1000.
fn summary(heights: u32) -> HistorySummary {
    (0..heights).map(|i| (1000 + i, 3)).collect()
}

fn pager() -> HistoryPager<u32> {
    HistoryPager::with_config(PagerConfig::new().with_page_size(10)).unwrap()
}

/// In-memory chain index counting TxIO fetches.
struct MemoryIndex {
    summary: Mutex<HistorySummary>,
    fetches: AtomicUsize,
}

impl MemoryIndex {
    fn new(summary: HistorySummary) -> Self {
        Self {
            summary: Mutex::new(summary),
            fetches: AtomicUsize::new(0),
        }
    }
}

impl HistorySource<BlockHeight> for MemoryIndex {
    type Error = String;

    fn fetch_summary(&self) -> Result<HistorySummary, String> {
        Ok(self.summary.lock().map_err(|e| e.to_string())?.clone())
    }

    fn fetch_txio(
        &self,
        lower_bound: BlockHeight,
        upper_bound: BlockHeight,
    ) -> Result<TxioMap<BlockHeight>, String> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        // Give competing readers time to pile up on the same page.
        thread::sleep(std::time::Duration::from_millis(20));
        Ok((lower_bound..=upper_bound)
            .map(|h| {
                let mut hash = [0u8; 32];
                hash[..4].copy_from_slice(&h.to_be_bytes());
                (hash, h)
            })
            .collect())
    }
}

struct HeightLedger;

impl LedgerBuilder<BlockHeight, u32> for HeightLedger {
    type Error = String;

    fn build_ledgers(
        &self,
        txio: &TxioMap<BlockHeight>,
        _lower_bound: BlockHeight,
        _upper_bound: BlockHeight,
    ) -> Result<LedgerMap<u32>, String> {
        Ok(txio.iter().map(|(k, h)| (*k, *h)).collect())
    }
}

// =============================================================================
// SNAPSHOT READS
// =============================================================================

#[test]
fn test_readers_see_consistent_tables_during_remaps() {
    let pager = pager();
    pager.map_history(|| Ok::<_, ()>(summary(10))).unwrap();

    thread::scope(|scope| {
        scope.spawn(|| {
            for round in 0..200u32 {
                let heights = if round % 2 == 0 { 40 } else { 10 };
                pager.map_history(|| Ok::<_, ()>(summary(heights))).unwrap();
                if round % 50 == 0 {
                    pager.reset();
                }
            }
        });

        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..500 {
                    let summary = pager.summary();
                    let count = pager.page_count();
                    // 10 heights → 3 pages, 40 heights → 10 pages, reset → 0.
                    assert!(matches!(count, 0 | 3 | 10), "torn page count {count}");
                    assert!(summary.is_empty() || summary.len() == 10 || summary.len() == 40);

                    if let Some(id) = pager.page_id_for_height(1005) {
                        // The table may have been swapped since `page_id_for_height`.
                        let _ = pager.page_bottom(id);
                    }
                }
            });
        }
    });

    assert!(pager.is_initialized());
}

// =============================================================================
// SINGLE REBUILD
// =============================================================================

#[test]
fn test_contending_readers_build_page_once() {
    let index = MemoryIndex::new(summary(30));
    let pager = pager();
    assert!(pager.refresh(&index).unwrap());

    let readers = 8;
    let barrier = Barrier::new(readers);
    let rebuilt = AtomicUsize::new(0);
    let already = AtomicUsize::new(0);

    thread::scope(|scope| {
        for _ in 0..readers {
            scope.spawn(|| {
                barrier.wait();
                match pager.load_page(&index, &HeightLedger, 0, 42).unwrap() {
                    PageLoad::Rebuilt { .. } => rebuilt.fetch_add(1, Ordering::SeqCst),
                    PageLoad::AlreadyCurrent => already.fetch_add(1, Ordering::SeqCst),
                    PageLoad::CacheHit(_) => 0,
                };
            });
        }
    });

    assert_eq!(rebuilt.load(Ordering::SeqCst), 1);
    assert_eq!(index.fetches.load(Ordering::SeqCst), 1);
    assert_eq!(
        pager.stats().already_current,
        already.load(Ordering::SeqCst) as u64
    );

    // Everyone re-reading now hits the cache.
    let again = pager.load_page(&index, &HeightLedger, 0, 42).unwrap();
    assert!(matches!(again, PageLoad::CacheHit(_)));
    assert_eq!(pager.cached_ledgers(0).unwrap().len(), again.rows().unwrap().len());
}

// =============================================================================
// READER SURVIVAL
// =============================================================================

#[test]
fn test_build_in_flight_survives_reset() {
    let pager = pager();
    pager.map_history(|| Ok::<_, ()>(summary(30))).unwrap();
    let started = Barrier::new(2);
    let reset_done = Barrier::new(2);

    thread::scope(|scope| {
        let reader = scope.spawn(|| {
            pager.get_page_ledger_map(
                |lower, upper| {
                    started.wait();
                    reset_done.wait();
                    Ok::<_, ()>((lower..=upper).map(|h| ([h as u8; 32], h)).collect())
                },
                |txio: &TxioMap<u32>, _, _| Ok(txio.iter().map(|(k, h)| (*k, *h)).collect()),
                0,
                1,
            )
        });

        started.wait();
        pager.reset();
        reset_done.wait();

        let load = reader.join().unwrap().unwrap();
        assert!(matches!(load, PageLoad::Rebuilt { .. }));
    });

    assert!(!pager.is_initialized());
    assert!(matches!(
        pager.cached_ledgers(0),
        Err(PagerError::PageOutOfRange { page_id: 0, page_count: 0 })
    ));
}

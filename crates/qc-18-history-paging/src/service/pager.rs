//! # Page Table Lifecycle and Lazy Page Builds

use std::sync::Arc;

use super::{HistoryPager, PageLoad, PageTable};
use crate::domain::{
    build_pages, BlockHeight, CacheVersion, HistorySummary, LedgerMap, PagerError, TxioMap,
};
use crate::ports::outbound::{HistorySource, LedgerBuilder};

impl<L> HistoryPager<L> {
    /// Fetch a fresh summary and republish the page table if it changed.
    ///
    /// Returns `Ok(true)` when a new table was published, `Ok(false)` when
    /// the pager was already initialized with an identical summary. A
    /// failing `fetch_summary` leaves the published table untouched.
    ///
    /// The summary is fetched without holding the publish lock, so a slow
    /// chain index never blocks `reset`. Compare and publish are serialized
    /// with other mutators; readers are never blocked.
    pub fn map_history<F, E>(&self, fetch_summary: F) -> Result<bool, PagerError<E>>
    where
        F: FnOnce() -> Result<HistorySummary, E>,
    {
        let summary = fetch_summary().map_err(|err| {
            self.counters.record_callback_failure();
            tracing::warn!("[qc-18] History summary fetch failed, keeping current page table");
            PagerError::Source(err)
        })?;

        let _publish = self.publish_lock.lock();

        let unchanged = {
            let current = self.table.load();
            current.initialized && *current.summary == summary
        };
        if unchanged {
            tracing::debug!(
                "[qc-18] History unchanged ({} heights), page table kept",
                summary.len()
            );
            return Ok(false);
        }

        let pages = build_pages(&summary, self.config.page_size);
        tracing::info!(
            "[qc-18] 📖 Mapped history: {} heights into {} pages (page size {})",
            summary.len(),
            pages.len(),
            self.config.page_size
        );

        self.table.store(Arc::new(PageTable {
            initialized: true,
            summary: Arc::new(summary),
            pages,
        }));
        self.counters.record_history_map();
        Ok(true)
    }

    /// Drop the published page table and return to the uninitialized state.
    ///
    /// Readers holding the previous table keep using it until they finish.
    pub fn reset(&self) {
        let _publish = self.publish_lock.lock();
        self.table.store(Arc::new(PageTable::uninitialized()));
        tracing::info!("[qc-18] Page table reset");
    }

    /// Rows of `page_id` for `version`, building them if needed.
    ///
    /// ## Protocol
    ///
    /// 1. Resolve the page in the current table (`PageOutOfRange` if stale)
    /// 2. Cached rows already at `version` → `CacheHit`, no callback runs
    /// 3. Same or newer version being built or already published elsewhere
    ///    → `AlreadyCurrent`
    /// 4. Otherwise `fetch_txio` then `build_ledgers` over the page's range,
    ///    publish the rows at `version` → `Rebuilt`
    ///
    /// A callback failure is returned as `PagerError::Source` and leaves the
    /// page's previous rows in place. A panicking callback releases the
    /// page's claim while unwinding, so the version can be retried.
    pub fn get_page_ledger_map<T, E, F, B>(
        &self,
        fetch_txio: F,
        build_ledgers: B,
        page_id: usize,
        version: CacheVersion,
    ) -> Result<PageLoad<L, T>, PagerError<E>>
    where
        F: FnOnce(BlockHeight, BlockHeight) -> Result<TxioMap<T>, E>,
        B: FnOnce(&TxioMap<T>, BlockHeight, BlockHeight) -> Result<LedgerMap<L>, E>,
    {
        let table = self.table.load_full();
        let page = table.lookup().page(page_id).map_err(|err| err.widen())?;

        if let Some(rows) = page.cached_for(version) {
            self.counters.record_cache_hit();
            return Ok(PageLoad::CacheHit(rows));
        }

        let Some(claim) = page.claim_rebuild(version) else {
            self.counters.record_already_current();
            tracing::debug!(
                "[qc-18] Page {} already current at version {}",
                page_id,
                version
            );
            return Ok(PageLoad::AlreadyCurrent);
        };

        let (lower, upper) = (page.lower_bound(), page.upper_bound());
        tracing::debug!(
            "[qc-18] Building page {} [{}..={}] at version {}",
            page_id,
            lower,
            upper,
            version
        );

        let built = fetch_txio(lower, upper)
            .and_then(|txio| build_ledgers(&txio, lower, upper).map(|rows| (txio, rows)));

        let (txio, rows) = match built {
            Ok(built) => built,
            Err(err) => {
                drop(claim);
                self.counters.record_callback_failure();
                tracing::warn!(
                    "[qc-18] Page {} build failed at version {}, cache left as is",
                    page_id,
                    version
                );
                return Err(PagerError::Source(err));
            }
        };

        let rows = Arc::new(rows);
        if !claim.publish(Arc::clone(&rows)) {
            tracing::debug!(
                "[qc-18] Page {} build at version {} superseded, not cached",
                page_id,
                version
            );
        }
        self.counters.record_rebuild();

        Ok(PageLoad::Rebuilt { rows, txio })
    }

    /// `map_history` driven by a [`HistorySource`].
    pub fn refresh<T, S>(&self, source: &S) -> Result<bool, PagerError<S::Error>>
    where
        S: HistorySource<T>,
    {
        self.map_history(|| source.fetch_summary())
    }

    /// `get_page_ledger_map` driven by a [`HistorySource`] and a [`LedgerBuilder`].
    pub fn load_page<T, S, B>(
        &self,
        source: &S,
        builder: &B,
        page_id: usize,
        version: CacheVersion,
    ) -> Result<PageLoad<L, T>, PagerError<S::Error>>
    where
        S: HistorySource<T>,
        B: LedgerBuilder<T, L, Error = S::Error>,
    {
        self.get_page_ledger_map(
            |lower, upper| source.fetch_txio(lower, upper),
            |txio, lower, upper| builder.build_ledgers(txio, lower, upper),
            page_id,
            version,
        )
    }
}

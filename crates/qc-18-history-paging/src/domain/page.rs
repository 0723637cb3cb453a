//! # Page Descriptor
//!
//! One page of history: an inclusive block-height range, the number of
//! transactions it holds, and the lazily built ledger rows for it.
//!
//! ## Cache Cell
//!
//! The rows and the version they were built for live together in one
//! `ArcSwap` cell, so a reader always sees a (version, rows) pair that was
//! published together. A small per-page claim slot records which version is
//! currently being rebuilt; it is the only lock a page has, and it is held
//! only while checking or updating the slot, never across a callback.
//! Versions only move forward: a page never caches or builds a version older
//! than one it has already published or claimed.

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use std::cmp::Ordering;
use std::sync::Arc;

use super::value_objects::{BlockHeight, CacheVersion, LedgerMap};

/// Rows published for a page together with the version they answer.
#[derive(Debug)]
struct CachedRows<L> {
    /// `None` until the first successful build.
    version: Option<CacheVersion>,
    rows: Arc<LedgerMap<L>>,
}

impl<L> CachedRows<L> {
    fn never_built() -> Self {
        Self {
            version: None,
            rows: Arc::new(LedgerMap::new()),
        }
    }
}

/// A page of transaction history.
///
/// Bounds and count are fixed once the page is published; only the cache
/// cell changes afterwards.
#[derive(Debug)]
pub struct PageDescriptor<L> {
    lower_bound: BlockHeight,
    upper_bound: BlockHeight,
    tx_count: u32,
    cache: ArcSwap<CachedRows<L>>,
    /// Version currently being rebuilt, if any.
    rebuild_claim: Mutex<Option<CacheVersion>>,
}

impl<L> PageDescriptor<L> {
    /// Create a page with a fresh "never built" cache.
    pub fn new(tx_count: u32, lower_bound: BlockHeight, upper_bound: BlockHeight) -> Self {
        debug_assert!(lower_bound <= upper_bound);
        Self {
            lower_bound,
            upper_bound,
            tx_count,
            cache: ArcSwap::from_pointee(CachedRows::never_built()),
            rebuild_claim: Mutex::new(None),
        }
    }

    /// Lowest height covered (inclusive).
    pub fn lower_bound(&self) -> BlockHeight {
        self.lower_bound
    }

    /// Highest height covered (inclusive).
    pub fn upper_bound(&self) -> BlockHeight {
        self.upper_bound
    }

    /// Transactions summed across the covered heights.
    pub fn tx_count(&self) -> u32 {
        self.tx_count
    }

    pub fn contains(&self, height: BlockHeight) -> bool {
        self.lower_bound <= height && height <= self.upper_bound
    }

    /// Version of the currently cached rows, `None` if never built.
    pub fn cache_version(&self) -> Option<CacheVersion> {
        self.cache.load().version
    }

    /// Snapshot of the currently cached rows. May be stale or empty.
    pub fn rows(&self) -> Arc<LedgerMap<L>> {
        Arc::clone(&self.cache.load().rows)
    }

    /// History ordering: pages with a higher lower bound come first.
    pub fn newest_first(a: &Self, b: &Self) -> Ordering {
        b.lower_bound.cmp(&a.lower_bound)
    }

    /// Rows cached for exactly `version`, if any.
    pub(crate) fn cached_for(&self, version: CacheVersion) -> Option<Arc<LedgerMap<L>>> {
        let cached = self.cache.load();
        (cached.version == Some(version)).then(|| Arc::clone(&cached.rows))
    }

    /// Claim the right to rebuild this page at `version`.
    ///
    /// Versions only move forward. Returns `None` when `version` is not
    /// newer than both the published rows and any pending claim: the same
    /// version is already built or in flight, or the request is stale. The
    /// caller should re-read the cache.
    ///
    /// The returned guard releases the claim on drop unless the rows were
    /// published, so a panicking build never leaves the page claimed.
    pub(crate) fn claim_rebuild(&self, version: CacheVersion) -> Option<RebuildClaim<'_, L>> {
        let mut claim = self.rebuild_claim.lock();
        let published = self.cache.load().version;
        let pending = *claim;
        if published.is_some_and(|v| v >= version) || pending.is_some_and(|v| v >= version) {
            return None;
        }
        *claim = Some(version);
        Some(RebuildClaim {
            page: self,
            version,
            settled: false,
        })
    }

    /// Publish rows built under a claim for `version`.
    ///
    /// Rejected (returns `false`) when a newer claim superseded this one or
    /// newer rows are already cached.
    fn publish_rows(&self, version: CacheVersion, rows: Arc<LedgerMap<L>>) -> bool {
        let mut claim = self.rebuild_claim.lock();
        if *claim != Some(version) {
            return false;
        }
        *claim = None;
        if self.cache.load().version.is_some_and(|v| v >= version) {
            return false;
        }
        self.cache.store(Arc::new(CachedRows {
            version: Some(version),
            rows,
        }));
        true
    }

    /// Drop a claim, leaving the cache untouched.
    fn release_claim(&self, version: CacheVersion) {
        let mut claim = self.rebuild_claim.lock();
        if *claim == Some(version) {
            *claim = None;
        }
    }

    /// Fold trailing heights into this page.
    pub(crate) fn extend_to(&mut self, upper_bound: BlockHeight) {
        self.upper_bound = self.upper_bound.max(upper_bound);
    }
}

/// A pending rebuild of one page at one version.
///
/// Dropping the guard without publishing releases the claim.
pub(crate) struct RebuildClaim<'a, L> {
    page: &'a PageDescriptor<L>,
    version: CacheVersion,
    settled: bool,
}

impl<L> RebuildClaim<'_, L> {
    /// Publish the built rows. `false` if a newer version got there first.
    pub(crate) fn publish(mut self, rows: Arc<LedgerMap<L>>) -> bool {
        self.settled = true;
        self.page.publish_rows(self.version, rows)
    }
}

impl<L> Drop for RebuildClaim<'_, L> {
    fn drop(&mut self) {
        if !self.settled {
            self.page.release_claim(self.version);
        }
    }
}

//! # Value Objects
//!
//! Primitive aliases and configuration for the History Paging subsystem.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::errors::PagerError;

/// Block height as reported by the chain index.
pub type BlockHeight = u32;

/// Caller-supplied stamp deciding whether a page's cached rows are current.
pub type CacheVersion = u32;

/// Transaction identifier (32-byte hash).
pub type TxHash = [u8; 32];

/// Height → number of relevant transactions at that height.
///
/// Heights missing from the summary carry zero transactions.
pub type HistorySummary = BTreeMap<BlockHeight, u32>;

/// Raw transaction I/O records for a height range, keyed by transaction.
pub type TxioMap<T> = BTreeMap<TxHash, T>;

/// Display-ready ledger rows for a page, keyed by transaction.
pub type LedgerMap<L> = BTreeMap<TxHash, L>;

/// Target transaction count per page (default: 100).
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Configuration for the history pager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagerConfig {
    /// Transactions per page before a page is closed.
    ///
    /// Must be non-zero. The last (newest) page may hold fewer.
    pub page_size: u32,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PagerConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target page size.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Reject configurations the partitioner cannot honor.
    pub fn validate(&self) -> Result<(), PagerError> {
        if self.page_size == 0 {
            return Err(PagerError::InvalidConfig {
                reason: "page_size must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// An ad-hoc window of history sized by transaction count rather than by
/// the fixed page size. Never stored in the page table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdHocRange {
    /// Lowest height of the window (the requested start height).
    pub lower_bound: BlockHeight,
    /// Highest height of the window. Serves as the range id.
    pub upper_bound: BlockHeight,
    /// Transactions accumulated across the window.
    pub tx_count: u32,
}

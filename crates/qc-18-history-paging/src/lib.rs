//! # History Paging Subsystem (qc-18)
//!
//! The History Paging subsystem splits a wallet's (or address's) full
//! transaction history into pages of roughly fixed transaction count,
//! aligned on block-height ranges, and caches the ledger view of each page
//! so presentation layers can ask for "page N" or "the page containing
//! height H" without recomputing the whole history.
//!
//! ## Responsibilities
//!
//! - Partition a height → transaction-count summary into newest-first pages
//! - Map heights to page ids, snap heights onto page boundaries, size
//!   ad-hoc windows by transaction count
//! - Build each page's ledger rows lazily, keyed by a caller-supplied
//!   cache version, with at most one rebuild per (page, version)
//!
//! ## Data Flow
//!
//! ```text
//! Chain Index ──fetch_summary──→ [map_history] ──build_pages──→ PageTable (ArcSwap)
//!                                                                   │
//! Wallet View ──get_page_ledger_map(page, version)──────────────────┤
//!                                                                   ↓
//!                         cache hit? ──yes──→ rows
//!                              │ no
//!                              ↓
//!           fetch_txio(range) → build_ledgers(txio) → rows cached at version
//! ```
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement | Location |
//! |-----------|-------------|----------|
//! | Full coverage | Pages are contiguous and span every summary height | partitioner.rs |
//! | History order | Pages sorted by descending lower bound | partitioner.rs |
//! | Consistent snapshots | Whole table swapped atomically, never edited | service/pager.rs |
//! | Single rebuild | Per-page claim slot per (page, version) | page.rs |
//! | No partial overwrite | Failed builds release the claim, keep old rows | service/pager.rs |
//!
//! ## Hexagonal Architecture
//!
//! - **Domain Layer** (`domain/`): Partitioning and lookup, no I/O
//! - **Ports Layer** (`ports/`): Inbound query API, outbound chain-index SPIs
//! - **Service Layer** (`service/`): The `HistoryPager` controller

pub mod domain;
pub mod ports;
pub mod service;

// Re-export main types for convenience
pub use domain::{
    add_page, build_pages, sort_pages, AdHocRange, BlockHeight, CacheVersion, HistorySummary,
    LedgerMap, PageDescriptor, PageLookup, PagerConfig, PagerError, TxHash, TxioMap,
    DEFAULT_PAGE_SIZE,
};

pub use ports::{HistoryPagingApi, HistorySource, LedgerBuilder};

pub use service::{HistoryPager, PageLoad, PagerStats};

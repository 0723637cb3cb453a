//! # Outbound Ports (Driven Ports)
//!
//! SPIs the History Paging subsystem needs from its neighbours: the chain
//! index (summaries and raw TxIO records) and the ledger builder.

use crate::domain::{BlockHeight, HistorySummary, LedgerMap, TxioMap};

/// Abstract interface to the chain index for one wallet or address.
pub trait HistorySource<T>: Send + Sync {
    type Error;

    /// Complete, current height → transaction-count snapshot (not a delta).
    fn fetch_summary(&self) -> Result<HistorySummary, Self::Error>;

    /// Raw TxIO records for the inclusive range `[lower_bound, upper_bound]`.
    fn fetch_txio(
        &self,
        lower_bound: BlockHeight,
        upper_bound: BlockHeight,
    ) -> Result<TxioMap<T>, Self::Error>;
}

/// Abstract interface for turning raw TxIO records into ledger rows.
///
/// Expected to be a pure transform.
pub trait LedgerBuilder<T, L>: Send + Sync {
    type Error;

    fn build_ledgers(
        &self,
        txio: &TxioMap<T>,
        lower_bound: BlockHeight,
        upper_bound: BlockHeight,
    ) -> Result<LedgerMap<L>, Self::Error>;
}

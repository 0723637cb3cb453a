//! # Domain Errors
//!
//! Error types for the History Paging subsystem.
//!
//! A page that is already current is not an error; see
//! [`PageLoad::AlreadyCurrent`](crate::service::PageLoad::AlreadyCurrent).

use std::convert::Infallible;
use thiserror::Error;

/// Errors that can occur during paging operations.
///
/// `E` is the error type of the externally supplied fetch/build callbacks.
/// Operations that invoke no callback use the default `Infallible`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PagerError<E = Infallible> {
    /// Page id is not valid for the currently published page table.
    ///
    /// Callers use this to detect a stale page id after a rebuild.
    #[error("Page id {page_id} out of range (page count: {page_count})")]
    PageOutOfRange { page_id: usize, page_count: usize },

    /// Configuration rejected at construction time.
    #[error("Invalid pager configuration: {reason}")]
    InvalidConfig { reason: String },

    /// A summary, TxIO or ledger callback failed. Carried unmodified.
    #[error("History source failed: {0}")]
    Source(E),
}

impl PagerError {
    /// Widen a callback-free error into one carrying callback failures.
    pub fn widen<E>(self) -> PagerError<E> {
        match self {
            Self::PageOutOfRange {
                page_id,
                page_count,
            } => PagerError::PageOutOfRange {
                page_id,
                page_count,
            },
            Self::InvalidConfig { reason } => PagerError::InvalidConfig { reason },
            Self::Source(never) => match never {},
        }
    }
}

impl<E> PagerError<E> {
    /// True when the error came from a callback rather than from the pager.
    pub fn is_source(&self) -> bool {
        matches!(self, Self::Source(_))
    }
}

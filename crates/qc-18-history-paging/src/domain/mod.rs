//! # Domain Layer
//!
//! Pure paging logic for the History Paging subsystem.
//!
//! - `value_objects`: heights, versions, summaries, configuration
//! - `page`: a page's bounds and its versioned row cache
//! - `partitioner`: summary → newest-first page table
//! - `lookup`: height/page searches over a published page table
//!
//! This module performs NO I/O. Summaries, TxIO records and ledger rows
//! come in through the ports in the `ports` module.

pub mod errors;
pub mod lookup;
pub mod page;
pub mod partitioner;
pub mod value_objects;

pub use errors::*;
pub use lookup::*;
pub use page::*;
pub use partitioner::*;
pub use value_objects::*;

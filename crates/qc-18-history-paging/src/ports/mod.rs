//! # Ports Layer
//!
//! Hexagonal architecture ports for the History Paging subsystem.
//!
//! - **Driving Ports (Inbound)**: read-only query API used by wallet views
//! - **Driven Ports (Outbound)**: chain index and ledger construction

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;

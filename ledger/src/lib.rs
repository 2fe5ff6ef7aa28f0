//! The QSurv ledger engine — sole authority over survey escrow and user
//! staking state.
//!
//! Every operation is a single read-modify-write cycle over the full ledger
//! blob, serialized by a process-wide lock. The storage backend is injected
//! (see `qsurv-store`); nothing in this crate knows about files.

pub mod engine;
pub mod error;

pub use engine::{LedgerEngine, LedgerSummary, PayoutReceipt};
pub use error::LedgerError;

//! Fundamental types for the QSurv ledger.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: wallet addresses, survey ids, QU amounts, transaction records,
//! staking tiers, and the tunable business parameters.

pub mod address;
pub mod amount;
pub mod hash;
pub mod params;
pub mod survey;
pub mod tier;
pub mod transaction;

pub use address::WalletAddress;
pub use amount::QuAmount;
pub use hash::TxHash;
pub use params::LedgerParams;
pub use survey::SurveyId;
pub use tier::StakingTier;
pub use transaction::{Transaction, TxKind};

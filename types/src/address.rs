//! Wallet address type.
//!
//! The ledger treats addresses as uninterpreted keys: whatever string the
//! wallet provider hands over is accepted verbatim. Two sentinel system
//! accounts exist alongside real wallets — the escrow contract and the
//! platform treasury.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque wallet address.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WalletAddress(String);

impl WalletAddress {
    /// Sentinel account holding locked survey escrow.
    pub const CONTRACT: &'static str = "QSURV_CONTRACT_ADDRESS";

    /// Sentinel account holding platform fees, debited for staking bonuses
    /// and referral rewards.
    pub const TREASURY: &'static str = "QSURV_TREASURY";

    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The escrow contract's system account.
    pub fn contract() -> Self {
        Self(Self::CONTRACT.to_string())
    }

    /// The platform treasury's system account.
    pub fn treasury() -> Self {
        Self(Self::TREASURY.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is one of the sentinel system accounts.
    pub fn is_system_account(&self) -> bool {
        self.0 == Self::CONTRACT || self.0 == Self::TREASURY
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for WalletAddress {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for WalletAddress {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

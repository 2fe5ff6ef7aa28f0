//! The persisted ledger state — the unit of persistence for every backend.
//!
//! Field names are serde-renamed to exactly the layout the platform has
//! always written, so existing `ledger.json` files keep parsing:
//!
//! ```json
//! {
//!   "surveys": { "<surveyId>": { "balance": 0, "isActive": true, "transactions": [] } },
//!   "users": { "<address>": { "stakingBalance": 0, "tier": "None" } },
//!   "treasuryBalance": 0
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use qsurv_types::{QuAmount, StakingTier, SurveyId, Transaction, WalletAddress};

/// Escrow account for one survey.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyAccount {
    /// Locked escrow, never negative.
    pub balance: QuAmount,
    /// False once the survey is closed; payouts are rejected from then on.
    pub is_active: bool,
    /// Append-only history, insertion order = chronological order.
    pub transactions: Vec<Transaction>,
}

impl SurveyAccount {
    /// A fresh account as created on first fund-lock: empty and active.
    pub fn new() -> Self {
        Self {
            balance: QuAmount::ZERO,
            is_active: true,
            transactions: Vec::new(),
        }
    }

    /// The zeroed, inactive placeholder returned for unknown surveys.
    pub fn placeholder() -> Self {
        Self {
            balance: QuAmount::ZERO,
            is_active: false,
            transactions: Vec::new(),
        }
    }
}

impl Default for SurveyAccount {
    fn default() -> Self {
        Self::placeholder()
    }
}

/// Staking account for one wallet address, created lazily on first stake.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub staking_balance: QuAmount,
    /// Always recomputed from `staking_balance`, never set directly.
    pub tier: StakingTier,
}

/// The aggregate root: every survey account, every user account, and the
/// treasury balance. Read and written as one blob per operation.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerState {
    #[serde(default)]
    pub surveys: BTreeMap<SurveyId, SurveyAccount>,

    // `users` and `treasuryBalance` were added after the first ledger files
    // shipped; default them when parsing older blobs.
    #[serde(default)]
    pub users: BTreeMap<WalletAddress, UserAccount>,

    #[serde(default)]
    pub treasury_balance: QuAmount,
}

impl LedgerState {
    /// The staking account for `address`, or the zeroed default for unknown
    /// addresses. Does not create a record.
    pub fn user(&self, address: &WalletAddress) -> UserAccount {
        self.users.get(address).cloned().unwrap_or_default()
    }

    /// Total number of transactions across all surveys.
    pub fn transaction_count(&self) -> u64 {
        self.surveys.values().map(|s| s.transactions.len() as u64).sum()
    }
}

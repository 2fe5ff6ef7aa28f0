//! Transaction records appended to a survey's history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{QuAmount, TxHash, WalletAddress};

/// The kind of a ledger transaction.
///
/// `Stake`/`Unstake` are accepted when parsing older ledger files but are
/// never emitted: staking state lives in the user record, and a survey's
/// history only carries escrow-related entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TxKind {
    Fund,
    Payout,
    Stake,
    Unstake,
    Bonus,
}

impl TxKind {
    /// Whether transactions of this kind count toward a user's earnings.
    pub fn counts_as_earnings(&self) -> bool {
        matches!(self, Self::Payout | Self::Bonus)
    }
}

impl std::fmt::Display for TxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Fund => "FUND",
            Self::Payout => "PAYOUT",
            Self::Stake => "STAKE",
            Self::Unstake => "UNSTAKE",
            Self::Bonus => "BONUS",
        };
        f.write_str(s)
    }
}

/// An immutable record in a survey's append-only history.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Transaction {
    pub hash: TxHash,
    #[serde(rename = "type")]
    pub kind: TxKind,
    pub amount: QuAmount,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<WalletAddress>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<WalletAddress>,
}

impl Transaction {
    /// Whether this transaction is an earning credited to `address`.
    pub fn is_earning_for(&self, address: &WalletAddress) -> bool {
        self.kind.counts_as_earnings() && self.to.as_ref() == Some(address)
    }
}

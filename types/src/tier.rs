//! Staking tiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A user's staking tier, always a pure function of their staked balance
/// (see [`crate::LedgerParams::tier_for`]) — never set directly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StakingTier {
    #[default]
    None,
    Participant,
    Analyst,
    Oracle,
}

impl StakingTier {
    /// Whether payouts to this tier earn a staking bonus.
    pub fn earns_bonus(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for StakingTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "None",
            Self::Participant => "Participant",
            Self::Analyst => "Analyst",
            Self::Oracle => "Oracle",
        };
        write!(f, "{name}")
    }
}

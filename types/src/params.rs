//! Ledger business parameters — staking thresholds and payout split rates.
//!
//! Rates are integer basis points, matching the on-chain contract's integer
//! percent math. Every field can be overridden from the node's TOML config.

use serde::{Deserialize, Serialize};

use crate::{QuAmount, StakingTier};

/// Tunable business rules applied by the ledger engine.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LedgerParams {
    /// Minimum staked QU for the Participant tier.
    pub participant_threshold: QuAmount,

    /// Minimum staked QU for the Analyst tier.
    pub analyst_threshold: QuAmount,

    /// Minimum staked QU for the Oracle tier.
    pub oracle_threshold: QuAmount,

    /// Platform fee withheld from each gross payout, credited to the
    /// treasury (basis points).
    pub platform_fee_bps: u32,

    /// Staking bonus on each payout for Participant-tier respondents
    /// (basis points of the gross payout).
    pub participant_bonus_bps: u32,

    /// Staking bonus for Analyst-tier respondents (basis points).
    pub analyst_bonus_bps: u32,

    /// Staking bonus for Oracle-tier respondents (basis points).
    pub oracle_bonus_bps: u32,

    /// Referral reward paid from the treasury when a payout carries a
    /// referrer (basis points of the gross payout).
    pub referral_reward_bps: u32,
}

impl LedgerParams {
    /// QSurv platform defaults.
    pub fn qsurv_defaults() -> Self {
        Self {
            participant_threshold: QuAmount::new(1_000_000),
            analyst_threshold: QuAmount::new(10_000_000),
            oracle_threshold: QuAmount::new(100_000_000),
            platform_fee_bps: 500,      // 5%
            participant_bonus_bps: 500, // 5%
            analyst_bonus_bps: 1000,    // 10%
            oracle_bonus_bps: 2500,     // 25%
            referral_reward_bps: 2500,  // 25%
        }
    }

    /// The tier earned by a given staked balance.
    pub fn tier_for(&self, staked: QuAmount) -> StakingTier {
        if staked >= self.oracle_threshold {
            StakingTier::Oracle
        } else if staked >= self.analyst_threshold {
            StakingTier::Analyst
        } else if staked >= self.participant_threshold {
            StakingTier::Participant
        } else {
            StakingTier::None
        }
    }

    /// The bonus rate for a tier (basis points).
    pub fn bonus_bps(&self, tier: StakingTier) -> u32 {
        match tier {
            StakingTier::None => 0,
            StakingTier::Participant => self.participant_bonus_bps,
            StakingTier::Analyst => self.analyst_bonus_bps,
            StakingTier::Oracle => self.oracle_bonus_bps,
        }
    }

    /// Platform fee withheld from a gross payout.
    pub fn platform_fee(&self, gross: QuAmount) -> QuAmount {
        gross.apply_bps(self.platform_fee_bps)
    }

    /// Staking bonus owed on a gross payout to a respondent of `tier`.
    pub fn staking_bonus(&self, gross: QuAmount, tier: StakingTier) -> QuAmount {
        gross.apply_bps(self.bonus_bps(tier))
    }

    /// Referral reward owed on a gross payout.
    pub fn referral_reward(&self, gross: QuAmount) -> QuAmount {
        gross.apply_bps(self.referral_reward_bps)
    }
}

/// Default is the QSurv platform configuration.
impl Default for LedgerParams {
    fn default() -> Self {
        Self::qsurv_defaults()
    }
}

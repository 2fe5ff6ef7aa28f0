//! Core ledger engine.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use rand::RngCore;

use qsurv_store::{LedgerStore, SurveyAccount, UserAccount};
use qsurv_types::{
    LedgerParams, QuAmount, StakingTier, SurveyId, Transaction, TxHash, TxKind, WalletAddress,
};

use crate::error::LedgerError;

/// Outcome of a successful payout.
#[derive(Clone, Debug)]
pub struct PayoutReceipt {
    /// Hash of the PAYOUT transaction.
    pub tx_hash: TxHash,
    /// Staking bonus actually paid from the treasury (zero when skipped).
    pub bonus: QuAmount,
    /// Referral reward actually paid from the treasury (zero when no
    /// referrer was given or the treasury could not cover it).
    pub referral: QuAmount,
}

/// Summary statistics for the whole ledger.
#[derive(Clone, Debug)]
pub struct LedgerSummary {
    pub surveys: u64,
    pub users: u64,
    pub transactions: u64,
    pub total_escrow: QuAmount,
    pub treasury_balance: QuAmount,
}

/// The ledger engine — escrow accounts, payouts with fee/bonus/referral
/// splits, staking tiers, and the treasury.
///
/// Each mutating operation loads the full ledger from the injected store,
/// mutates it in memory, and writes it back. The internal lock serializes
/// those cycles so two callers cannot interleave a read-modify-write and
/// silently drop one writer's update.
pub struct LedgerEngine {
    store: Arc<dyn LedgerStore>,
    params: LedgerParams,
    write_lock: Mutex<()>,
}

impl LedgerEngine {
    pub fn new(store: Arc<dyn LedgerStore>, params: LedgerParams) -> Self {
        Self {
            store,
            params,
            write_lock: Mutex::new(()),
        }
    }

    pub fn params(&self) -> &LedgerParams {
        &self.params
    }

    // The guard holds no data, so a poisoned lock cannot corrupt anything.
    fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Lock `amount` QU of escrow for a survey, creating its account on
    /// first use. Appends a FUND transaction and returns its hash.
    pub fn lock_funds(
        &self,
        survey_id: &SurveyId,
        amount: QuAmount,
        creator: &WalletAddress,
    ) -> Result<TxHash, LedgerError> {
        let _guard = self.lock();
        let mut ledger = self.store.load()?;

        let survey = ledger
            .surveys
            .entry(survey_id.clone())
            .or_insert_with(SurveyAccount::new);
        survey.balance = survey
            .balance
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        let tx_hash = generate_tx_hash();
        survey.transactions.push(Transaction {
            hash: tx_hash.clone(),
            kind: TxKind::Fund,
            amount,
            timestamp: Utc::now(),
            from: Some(creator.clone()),
            to: Some(WalletAddress::contract()),
        });

        self.store.save(&ledger)?;
        tracing::info!(survey = %survey_id, %amount, creator = %creator, "escrow funded");
        Ok(tx_hash)
    }

    /// Pay `amount` QU of a survey's escrow to a respondent.
    ///
    /// The platform fee (5% of the gross) is withheld into the treasury, a
    /// staking bonus is then paid from the treasury according to the
    /// respondent's tier, and a referral reward is paid when a referrer is
    /// given. Bonus and referral are skipped silently when the treasury
    /// cannot cover them; escrow shortfall is a hard error.
    pub fn payout(
        &self,
        survey_id: &SurveyId,
        amount: QuAmount,
        respondent: &WalletAddress,
        referrer: Option<&WalletAddress>,
    ) -> Result<PayoutReceipt, LedgerError> {
        let _guard = self.lock();
        let mut ledger = self.store.load()?;
        let tier = ledger.user(respondent).tier;

        let survey = ledger
            .surveys
            .get_mut(survey_id)
            .ok_or_else(|| LedgerError::SurveyNotFound(survey_id.clone()))?;
        if !survey.is_active {
            return Err(LedgerError::SurveyInactive(survey_id.clone()));
        }
        if survey.balance < amount {
            return Err(LedgerError::InsufficientBalance {
                needed: amount,
                available: survey.balance,
            });
        }

        // Base payout: escrow decreases by the gross amount.
        let tx_hash = generate_tx_hash();
        survey.balance = survey.balance - amount;
        survey.transactions.push(Transaction {
            hash: tx_hash.clone(),
            kind: TxKind::Payout,
            amount,
            timestamp: Utc::now(),
            from: Some(WalletAddress::contract()),
            to: Some(respondent.clone()),
        });

        // Platform's cut of the gross reward, withheld into the treasury.
        let fee = self.params.platform_fee(amount);
        ledger.treasury_balance = ledger
            .treasury_balance
            .checked_add(fee)
            .ok_or(LedgerError::Overflow)?;

        // Staking bonus, paid from the treasury when it can cover it.
        // Recorded in the survey's history so earnings scans find it.
        let bonus_owed = self.params.staking_bonus(amount, tier);
        let bonus = if !bonus_owed.is_zero() && ledger.treasury_balance >= bonus_owed {
            ledger.treasury_balance = ledger.treasury_balance - bonus_owed;
            survey.transactions.push(Transaction {
                hash: generate_tx_hash(),
                kind: TxKind::Bonus,
                amount: bonus_owed,
                timestamp: Utc::now(),
                from: Some(WalletAddress::treasury()),
                to: Some(respondent.clone()),
            });
            bonus_owed
        } else {
            QuAmount::ZERO
        };

        // Referral reward, under the same silent-skip policy.
        let mut referral = QuAmount::ZERO;
        if let Some(referrer) = referrer {
            let reward = self.params.referral_reward(amount);
            if !reward.is_zero() && ledger.treasury_balance >= reward {
                ledger.treasury_balance = ledger.treasury_balance - reward;
                survey.transactions.push(Transaction {
                    hash: generate_tx_hash(),
                    kind: TxKind::Bonus,
                    amount: reward,
                    timestamp: Utc::now(),
                    from: Some(WalletAddress::treasury()),
                    to: Some(referrer.clone()),
                });
                referral = reward;
            }
        }

        self.store.save(&ledger)?;
        tracing::info!(
            survey = %survey_id,
            %amount,
            respondent = %respondent,
            %bonus,
            %referral,
            "payout executed"
        );
        Ok(PayoutReceipt {
            tx_hash,
            bonus,
            referral,
        })
    }

    /// Stake `amount` QU for an address, creating its account on first use.
    /// Returns the tier earned by the new total.
    pub fn stake_funds(
        &self,
        address: &WalletAddress,
        amount: QuAmount,
    ) -> Result<StakingTier, LedgerError> {
        let _guard = self.lock();
        let mut ledger = self.store.load()?;

        let user = ledger.users.entry(address.clone()).or_default();
        user.staking_balance = user
            .staking_balance
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        user.tier = self.params.tier_for(user.staking_balance);
        let new_tier = user.tier;

        self.store.save(&ledger)?;
        tracing::info!(address = %address, %amount, tier = %new_tier, "stake added");
        Ok(new_tier)
    }

    /// Withdraw part of a stake. Fails hard when the address has less
    /// staked than requested; the tier is recomputed from the remainder.
    pub fn unstake_funds(
        &self,
        address: &WalletAddress,
        amount: QuAmount,
    ) -> Result<StakingTier, LedgerError> {
        let _guard = self.lock();
        let mut ledger = self.store.load()?;

        let user = ledger
            .users
            .get_mut(address)
            .ok_or(LedgerError::InsufficientStake {
                needed: amount,
                available: QuAmount::ZERO,
            })?;
        if user.staking_balance < amount {
            return Err(LedgerError::InsufficientStake {
                needed: amount,
                available: user.staking_balance,
            });
        }
        user.staking_balance = user.staking_balance - amount;
        user.tier = self.params.tier_for(user.staking_balance);
        let new_tier = user.tier;

        self.store.save(&ledger)?;
        tracing::info!(address = %address, %amount, tier = %new_tier, "stake withdrawn");
        Ok(new_tier)
    }

    /// Close a survey: payouts are rejected from then on. Idempotent for
    /// already-closed surveys; unknown surveys are an error.
    pub fn close_survey(&self, survey_id: &SurveyId) -> Result<(), LedgerError> {
        let _guard = self.lock();
        let mut ledger = self.store.load()?;

        let survey = ledger
            .surveys
            .get_mut(survey_id)
            .ok_or_else(|| LedgerError::SurveyNotFound(survey_id.clone()))?;
        if survey.is_active {
            survey.is_active = false;
            self.store.save(&ledger)?;
            tracing::info!(survey = %survey_id, "survey closed");
        }
        Ok(())
    }

    /// The staking account for an address, or the zeroed default for
    /// unknown addresses. Read-only: does not create a record.
    pub fn user_staking(&self, address: &WalletAddress) -> Result<UserAccount, LedgerError> {
        let ledger = self.store.load()?;
        Ok(ledger.user(address))
    }

    /// Total earnings of an address: the sum of every PAYOUT and BONUS
    /// transaction credited to it, across all surveys.
    pub fn user_earnings(&self, address: &WalletAddress) -> Result<QuAmount, LedgerError> {
        let ledger = self.store.load()?;
        let mut total = QuAmount::ZERO;
        for survey in ledger.surveys.values() {
            for tx in &survey.transactions {
                if tx.is_earning_for(address) {
                    total = total.checked_add(tx.amount).ok_or(LedgerError::Overflow)?;
                }
            }
        }
        Ok(total)
    }

    /// The escrow account for a survey, or the zeroed/inactive placeholder
    /// for surveys that have never received funds.
    pub fn contract_state(&self, survey_id: &SurveyId) -> Result<SurveyAccount, LedgerError> {
        let ledger = self.store.load()?;
        Ok(ledger
            .surveys
            .get(survey_id)
            .cloned()
            .unwrap_or_else(SurveyAccount::placeholder))
    }

    /// Ledger summary statistics.
    pub fn summary(&self) -> Result<LedgerSummary, LedgerError> {
        let ledger = self.store.load()?;
        let mut total_escrow = QuAmount::ZERO;
        for survey in ledger.surveys.values() {
            total_escrow = total_escrow
                .checked_add(survey.balance)
                .ok_or(LedgerError::Overflow)?;
        }
        Ok(LedgerSummary {
            surveys: ledger.surveys.len() as u64,
            users: ledger.users.len() as u64,
            transactions: ledger.transaction_count(),
            total_escrow,
            treasury_balance: ledger.treasury_balance,
        })
    }
}

/// A fresh simulated transaction id: 30 random bytes, hex-encoded.
fn generate_tx_hash() -> TxHash {
    let mut bytes = [0u8; 30];
    rand::rng().fill_bytes(&mut bytes);
    TxHash::from_bytes(&bytes)
}

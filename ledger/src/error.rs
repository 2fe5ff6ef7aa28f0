use thiserror::Error;

use qsurv_store::StoreError;
use qsurv_types::{QuAmount, SurveyId};

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("survey not found in ledger: {0}")]
    SurveyNotFound(SurveyId),

    #[error("survey is not active: {0}")]
    SurveyInactive(SurveyId),

    #[error("insufficient contract balance: need {needed}, have {available}")]
    InsufficientBalance { needed: QuAmount, available: QuAmount },

    #[error("insufficient staking balance: need {needed}, have {available}")]
    InsufficientStake { needed: QuAmount, available: QuAmount },

    #[error("amount overflow")]
    Overflow,

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

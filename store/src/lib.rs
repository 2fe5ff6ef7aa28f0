//! Abstract storage for the QSurv ledger.
//!
//! Every backend (JSON file, in-memory for testing) implements [`LedgerStore`].
//! The rest of the codebase depends only on the trait: the engine performs a
//! full `load` → mutate → `save` cycle per operation, so a backend's only job
//! is to read and write the whole [`LedgerState`] blob reliably.

pub mod error;
pub mod memory;
pub mod state;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use state::{LedgerState, SurveyAccount, UserAccount};

/// Trait for ledger persistence backends.
pub trait LedgerStore: Send + Sync {
    /// Read the full ledger snapshot. A backend with no state yet returns
    /// the empty ledger (accounts are created lazily on first use).
    fn load(&self) -> Result<LedgerState, StoreError>;

    /// Durably replace the full ledger snapshot. Must never leave a
    /// partially written blob behind on failure.
    fn save(&self, state: &LedgerState) -> Result<(), StoreError>;
}

//! In-memory backend for tests.

use std::sync::RwLock;

use crate::{LedgerState, LedgerStore, StoreError};

/// A `LedgerStore` holding the blob in memory. Used by unit tests and by
/// callers that want a throwaway ledger.
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<LedgerState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LedgerStore for MemoryStore {
    fn load(&self) -> Result<LedgerState, StoreError> {
        let state = self
            .state
            .read()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(state.clone())
    }

    fn save(&self, state: &LedgerState) -> Result<(), StoreError> {
        let mut guard = self
            .state
            .write()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        *guard = state.clone();
        Ok(())
    }
}

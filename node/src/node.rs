//! The node: a configured ledger engine over the file-backed store.

use std::sync::Arc;

use qsurv_ledger::LedgerEngine;
use qsurv_store::LedgerStore;
use qsurv_store_json::JsonFileStore;

use crate::{NodeConfig, NodeError};

/// A running QSurv ledger node.
pub struct LedgerNode {
    config: NodeConfig,
    engine: LedgerEngine,
}

impl LedgerNode {
    /// Open the ledger at the configured path, creating the data directory
    /// if needed. An unreadable or corrupt blob fails here rather than on
    /// the first operation.
    pub fn open(config: NodeConfig) -> Result<Self, NodeError> {
        if let Some(dir) = config.ledger_path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)?;
            }
        }

        let store = Arc::new(JsonFileStore::new(&config.ledger_path));
        let state = store.load()?;
        tracing::info!(
            path = %config.ledger_path.display(),
            surveys = state.surveys.len(),
            users = state.users.len(),
            "ledger opened"
        );

        let engine = LedgerEngine::new(store, config.params.clone());
        Ok(Self { config, engine })
    }

    pub fn engine(&self) -> &LedgerEngine {
        &self.engine
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }
}

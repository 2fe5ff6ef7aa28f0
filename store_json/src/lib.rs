//! JSON file storage backend for the QSurv ledger.
//!
//! Implements [`LedgerStore`] over a single pretty-printed JSON blob, the
//! layout the platform has always used for `ledger.json`. A missing file
//! loads as the empty ledger (accounts are created lazily); a file that
//! exists but fails to parse is a hard [`StoreError::Corruption`] — the
//! engine must not silently start over from an empty book.
//!
//! Saves are crash-safe: the new blob is written to a temp file in the same
//! directory, fsynced, then renamed over the target, so a failed write can
//! never leave a truncated ledger behind.

use std::io::Write;
use std::path::{Path, PathBuf};

use qsurv_store::{LedgerState, LedgerStore, StoreError};

/// File-backed `LedgerStore`.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store over the given ledger path. The file (and its parent
    /// directory) need not exist yet; it is created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The ledger file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }
}

impl LedgerStore for JsonFileStore {
    fn load(&self) -> Result<LedgerState, StoreError> {
        if !self.path.exists() {
            return Ok(LedgerState::default());
        }
        let data = std::fs::read_to_string(&self.path)?;
        serde_json::from_str(&data).map_err(|e| {
            StoreError::Corruption(format!("{}: {e}", self.path.display()))
        })
    }

    fn save(&self, state: &LedgerState) -> Result<(), StoreError> {
        let blob = serde_json::to_string_pretty(state)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let mut tmp = tempfile::NamedTempFile::new_in(self.parent_dir())?;
        tmp.write_all(blob.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;

        tracing::trace!(path = %self.path.display(), bytes = blob.len(), "ledger blob saved");
        Ok(())
    }
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("ledger blob is corrupted: {0}")]
    Corruption(String),

    #[error("storage backend error: {0}")]
    Backend(String),
}

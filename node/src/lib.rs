//! QSurv node wiring.
//!
//! Pulls the pieces together for a running deployment: TOML configuration,
//! structured-logging setup, and a [`LedgerNode`] that opens the file-backed
//! store and hands out the engine.

pub mod config;
pub mod error;
pub mod logging;
pub mod node;

pub use config::NodeConfig;
pub use error::NodeError;
pub use logging::{init_logging, LogFormat};
pub use node::LedgerNode;

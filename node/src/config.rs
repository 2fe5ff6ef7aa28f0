//! Node configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use qsurv_types::LedgerParams;

use crate::NodeError;

/// Configuration for a QSurv ledger node.
///
/// Can be loaded from a TOML file via [`NodeConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Path of the ledger blob.
    #[serde(default = "default_ledger_path")]
    pub ledger_path: PathBuf,

    /// Business parameters: tier thresholds and fee/bonus/referral rates.
    #[serde(default)]
    pub params: LedgerParams,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_ledger_path() -> PathBuf {
    PathBuf::from("./qsurv_data/ledger.json")
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl NodeConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, NodeError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| NodeError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, NodeError> {
        toml::from_str(s).map_err(|e| NodeError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("NodeConfig is always serializable to TOML")
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            ledger_path: default_ledger_path(),
            params: LedgerParams::default(),
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qsurv_types::QuAmount;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = NodeConfig::default();
        let toml_str = config.to_toml_string();
        let parsed = NodeConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed.ledger_path, config.ledger_path);
        assert_eq!(parsed.log_level, config.log_level);
        assert_eq!(
            parsed.params.oracle_threshold,
            config.params.oracle_threshold
        );
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = NodeConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.ledger_path, PathBuf::from("./qsurv_data/ledger.json"));
        assert_eq!(config.log_format, "human");
        assert_eq!(config.params.platform_fee_bps, 500);
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            ledger_path = "/var/lib/qsurv/ledger.json"
            log_level = "debug"
        "#;
        let config = NodeConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.ledger_path, PathBuf::from("/var/lib/qsurv/ledger.json"));
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_format, "human"); // default
    }

    #[test]
    fn params_can_be_tuned_from_toml() {
        let toml = r#"
            [params]
            participant_threshold = 1000000
            analyst_threshold = 10000000
            oracle_threshold = 100000000
            platform_fee_bps = 250
            participant_bonus_bps = 500
            analyst_bonus_bps = 1000
            oracle_bonus_bps = 2500
            referral_reward_bps = 1000
        "#;
        let config = NodeConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.params.platform_fee_bps, 250);
        assert_eq!(config.params.referral_reward_bps, 1000);
        assert_eq!(config.params.oracle_threshold, QuAmount::new(100_000_000));
    }

    #[test]
    fn missing_file_returns_config_error() {
        let result = NodeConfig::from_toml_file("/nonexistent/qsurv.toml");
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, NodeError::Config(_)));
    }

    #[test]
    fn loads_from_a_path_buf_without_string_conversion() {
        let dir = tempfile::tempdir().unwrap();
        let path: PathBuf = dir.path().join("qsurv.toml");
        std::fs::write(&path, "log_level = \"warn\"").unwrap();

        let config = NodeConfig::from_toml_file(&path).expect("should load");
        assert_eq!(config.log_level, "warn");
    }
}

//! Simulated transaction hash.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque transaction id standing in for an on-chain hash.
///
/// Sixty lowercase hex characters (30 random bytes), matching the width the
/// platform has always emitted.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxHash(String);

impl TxHash {
    /// Length in hex characters.
    pub const LEN: usize = 60;

    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Build a hash from raw entropy bytes.
    pub fn from_bytes(bytes: &[u8; 30]) -> Self {
        Self(hex::encode(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this hash has the canonical width and alphabet.
    pub fn is_well_formed(&self) -> bool {
        self.0.len() == Self::LEN
            && self.0.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
    }
}

impl fmt::Debug for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxHash({})", &self.0[..self.0.len().min(8)])
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Inline hex encoding to avoid adding the `hex` crate as a dependency of types.
mod hex {
    pub fn encode(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

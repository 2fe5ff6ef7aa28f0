//! QU amount type.
//!
//! Amounts are whole QU stored as `u64` — the simulation never deals in
//! fractional units, and every rate is applied with integer basis-point math.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// An amount of QU, the platform's reward unit.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct QuAmount(u64);

impl QuAmount {
    pub const ZERO: Self = Self(0);

    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Apply a basis-point rate (1 bps = 0.01%), rounding down.
    ///
    /// The intermediate product is computed in `u128`, so this cannot
    /// overflow for any `u64` amount.
    pub fn apply_bps(self, rate_bps: u32) -> Self {
        Self((self.0 as u128 * rate_bps as u128 / 10_000) as u64)
    }
}

impl Add for QuAmount {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for QuAmount {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl fmt::Display for QuAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} QU", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bps_matches_contract_percent_math() {
        // 5% of 600 QU = 30 QU, 10% = 60 QU, 25% = 150 QU
        let gross = QuAmount::new(600);
        assert_eq!(gross.apply_bps(500), QuAmount::new(30));
        assert_eq!(gross.apply_bps(1000), QuAmount::new(60));
        assert_eq!(gross.apply_bps(2500), QuAmount::new(150));
    }

    #[test]
    fn bps_rounds_down() {
        assert_eq!(QuAmount::new(1).apply_bps(500), QuAmount::ZERO);
        assert_eq!(QuAmount::new(19).apply_bps(500), QuAmount::ZERO);
        assert_eq!(QuAmount::new(20).apply_bps(500), QuAmount::new(1));
    }

    #[test]
    fn bps_does_not_overflow_on_max_amount() {
        let max = QuAmount::new(u64::MAX);
        assert_eq!(max.apply_bps(10_000), max);
    }

    #[test]
    fn serializes_as_bare_number() {
        let json = serde_json::to_string(&QuAmount::new(1000)).unwrap();
        assert_eq!(json, "1000");
    }
}

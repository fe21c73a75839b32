//! Fixed-point statutory rates

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Rupiah;

/// Number of basis points in one whole (100%)
pub const BASIS_POINTS_PER_UNIT: i64 = 10_000;

/// A statutory rate expressed in basis points (1 bp = 0.01%)
///
/// Every published BPJS rate is a whole number of basis points, so applying a
/// rate to a Rupiah amount stays in integer arithmetic and reproduces the
/// published figures exactly (e.g. 0.24% of 5,000,000 is 12,000).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BasisPoints(pub u32);

impl BasisPoints {
    pub const ZERO: BasisPoints = BasisPoints(0);

    pub const fn new(bp: u32) -> Self {
        BasisPoints(bp)
    }

    /// Apply the rate to an amount, rounding half up to the nearest Rupiah.
    /// Negative amounts are treated as zero.
    pub fn of(self, amount: Rupiah) -> Rupiah {
        let amount = amount.max(0) as i128;
        let scaled = amount * self.0 as i128 + (BASIS_POINTS_PER_UNIT / 2) as i128;
        (scaled / BASIS_POINTS_PER_UNIT as i128) as Rupiah
    }

    /// Rate as a decimal fraction (0.0024 for 24 bp)
    pub fn as_fraction(self) -> f64 {
        self.0 as f64 / BASIS_POINTS_PER_UNIT as f64
    }

    /// Rate as a percentage (0.24 for 24 bp)
    pub fn as_percent(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl std::ops::Add for BasisPoints {
    type Output = BasisPoints;

    fn add(self, rhs: BasisPoints) -> BasisPoints {
        BasisPoints(self.0 + rhs.0)
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.as_percent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_rate() {
        assert_eq!(BasisPoints(24).of(5_000_000), 12_000);
        assert_eq!(BasisPoints(370).of(5_000_000), 185_000);
        assert_eq!(BasisPoints(21).of(100_000_000), 210_000);
    }

    #[test]
    fn test_rounds_half_up() {
        // 0.3% of 1,500 = 4.5
        assert_eq!(BasisPoints(30).of(1_500), 5);
        // 0.3% of 1,400 = 4.2
        assert_eq!(BasisPoints(30).of(1_400), 4);
    }

    #[test]
    fn test_negative_amount_is_zero() {
        assert_eq!(BasisPoints(200).of(-1_000_000), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(BasisPoints(24).to_string(), "0.24%");
        assert_eq!(BasisPoints(570).to_string(), "5.70%");
        assert_eq!(BasisPoints(370) + BasisPoints(200), BasisPoints(570));
    }
}

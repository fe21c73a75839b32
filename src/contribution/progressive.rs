//! Marginal-rate bracket calculation for construction contracts
//!
//! Each tier taxes only the slice of the contract value between the previous
//! tier's bound and its own, never the whole value.

use serde::{Deserialize, Serialize};

use super::types::TierBreakdown;
use crate::rates::ProgressiveTier;
use crate::Rupiah;

/// Totals and per-tier detail from a progressive schedule
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressiveOutcome {
    pub work_accident_total: Rupiah,
    pub death_total: Rupiah,
    /// Tiers with a non-zero portion, in ascending order
    pub breakdown: Vec<TierBreakdown>,
}

impl ProgressiveOutcome {
    pub fn total(&self) -> Rupiah {
        self.work_accident_total + self.death_total
    }
}

/// Apply ascending marginal tiers to `value`.
///
/// Tiers must be sorted by upper bound with only the last one unbounded; the
/// rate table validates this on load. A value of zero (or less) produces an
/// empty breakdown.
pub fn apply_progressive_tiers(value: Rupiah, tiers: &[ProgressiveTier]) -> ProgressiveOutcome {
    let value = value.max(0);
    let mut outcome = ProgressiveOutcome::default();
    let mut lower_bound = 0;

    for (tier_index, tier) in tiers.iter().enumerate() {
        if value <= lower_bound {
            break;
        }

        let ceiling = tier.upper_bound.map_or(value, |bound| value.min(bound));
        let portion = (ceiling - lower_bound).max(0);

        if portion > 0 {
            let work_accident_amount = tier.work_accident_rate.of(portion);
            let death_amount = tier.death_rate.of(portion);
            outcome.work_accident_total += work_accident_amount;
            outcome.death_total += death_amount;
            outcome.breakdown.push(TierBreakdown {
                tier_index,
                lower_bound,
                upper_bound: tier.upper_bound,
                portion,
                work_accident_amount,
                death_amount,
            });
        }

        match tier.upper_bound {
            Some(bound) => {
                debug_assert!(bound >= lower_bound, "progressive tiers must be ascending");
                lower_bound = bound;
            }
            None => break,
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::{BasisPoints, RateTable};

    fn tiers() -> Vec<ProgressiveTier> {
        RateTable::statutory().construction_tiers().to_vec()
    }

    #[test]
    fn test_zero_value_is_empty() {
        let outcome = apply_progressive_tiers(0, &tiers());
        assert!(outcome.breakdown.is_empty());
        assert_eq!(outcome.work_accident_total, 0);
        assert_eq!(outcome.death_total, 0);
    }

    #[test]
    fn test_first_tier_only() {
        let outcome = apply_progressive_tiers(100_000_000, &tiers());
        assert_eq!(outcome.breakdown.len(), 1);
        assert_eq!(outcome.work_accident_total, 210_000);
        assert_eq!(outcome.death_total, 30_000);
    }

    #[test]
    fn test_600_million_contract() {
        let outcome = apply_progressive_tiers(600_000_000, &tiers());
        let jkk: Vec<Rupiah> = outcome.breakdown.iter().map(|t| t.work_accident_amount).collect();
        assert_eq!(jkk, vec![210_000, 680_000, 130_000]);
        assert_eq!(outcome.work_accident_total, 1_020_000);
        // 100M x 0.03% + 400M x 0.02% + 100M x 0.02%
        assert_eq!(outcome.death_total, 30_000 + 80_000 + 20_000);
    }

    #[test]
    fn test_unbounded_top_tier() {
        let outcome = apply_progressive_tiers(7_000_000_000, &tiers());
        assert_eq!(outcome.breakdown.len(), 5);
        let top = outcome.breakdown.last().unwrap();
        assert_eq!(top.lower_bound, 5_000_000_000);
        assert_eq!(top.upper_bound, None);
        assert_eq!(top.portion, 2_000_000_000);
        assert_eq!(top.work_accident_amount, 1_800_000);
    }

    #[test]
    fn test_portions_sum_to_value() {
        for value in [1, 99_999_999, 100_000_001, 750_000_000, 1_000_000_000, 4_999_999_999, 12_345_678_901] {
            let outcome = apply_progressive_tiers(value, &tiers());
            let sum: Rupiah = outcome.breakdown.iter().map(|t| t.portion).sum();
            assert_eq!(sum, value, "portions for {}", value);
            assert!(outcome.breakdown.iter().all(|t| t.portion > 0));
        }
    }

    #[test]
    fn test_marginal_not_whole_value() {
        // A flat application of the second-tier rate would give 0.17% of 200M
        let outcome = apply_progressive_tiers(200_000_000, &tiers());
        assert_eq!(outcome.work_accident_total, 210_000 + 170_000);
        assert_ne!(outcome.work_accident_total, BasisPoints(17).of(200_000_000));
    }

    /// Slice of `value` inside each tier, from the table bounds alone
    fn closed_form_slices(value: Rupiah) -> Vec<Rupiah> {
        let mut lower = 0;
        tiers()
            .iter()
            .map(|tier| {
                let upper = tier.upper_bound.unwrap_or(Rupiah::MAX);
                let slice = value.clamp(lower, upper) - lower;
                lower = upper;
                slice
            })
            .collect()
    }

    #[test]
    fn test_totals_match_blended_rate() {
        let values = [
            1, 50_000_000, 100_000_000, 100_000_300, 300_000_000, 500_000_000, 800_000_000, 1_000_000_000,
            2_000_000_000, 3_000_000_000, 5_000_000_000, 7_000_000_000, 123_456_789_012,
        ];
        for value in values {
            let slices = closed_form_slices(value);
            assert_eq!(slices.iter().sum::<Rupiah>(), value);
            assert!(slices.iter().all(|&slice| slice >= 0));

            // Weighted-average rate x value, in exact basis-point units
            let work_accident_exact: i128 = slices
                .iter()
                .zip(tiers())
                .map(|(&slice, tier)| slice as i128 * tier.work_accident_rate.0 as i128)
                .sum();
            let death_exact: i128 = slices
                .iter()
                .zip(tiers())
                .map(|(&slice, tier)| slice as i128 * tier.death_rate.0 as i128)
                .sum();

            let outcome = apply_progressive_tiers(value, &tiers());
            // Each tier rounds once, by at most half a Rupiah
            let tolerance = 5_000 * outcome.breakdown.len() as i128;
            assert!((outcome.work_accident_total as i128 * 10_000 - work_accident_exact).abs() <= tolerance, "JKK {}", value);
            assert!((outcome.death_total as i128 * 10_000 - death_exact).abs() <= tolerance, "JKM {}", value);

            let portions: Vec<Rupiah> = outcome.breakdown.iter().map(|t| t.portion).collect();
            let nonzero: Vec<Rupiah> = slices.into_iter().filter(|&slice| slice > 0).collect();
            assert_eq!(portions, nonzero, "portions {}", value);
        }
    }

    #[test]
    fn test_published_bracket_totals() {
        // (contract value, JKK total, JKM total)
        let cases: [(Rupiah, Rupiah, Rupiah); 10] = [
            (50_000_000, 105_000, 15_000),
            (100_000_000, 210_000, 30_000),
            (100_000_300, 210_001, 30_000),
            (300_000_000, 550_000, 70_000),
            (500_000_000, 890_000, 110_000),
            (800_000_000, 1_280_000, 170_000),
            (1_000_000_000, 1_540_000, 210_000),
            (3_000_000_000, 3_740_000, 410_000),
            (5_000_000_000, 5_940_000, 610_000),
            (7_000_000_000, 7_740_000, 810_000),
        ];
        for (value, work_accident, death) in cases {
            let outcome = apply_progressive_tiers(value, &tiers());
            assert_eq!(outcome.work_accident_total, work_accident, "JKK {}", value);
            assert_eq!(outcome.death_total, death, "JKM {}", value);
        }
    }
}

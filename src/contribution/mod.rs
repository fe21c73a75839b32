//! Monthly contribution calculation for every participant segment

mod types;
mod progressive;
mod segments;

pub use types::{
    Component, ContributionSplit, Formula, LineItem, MigrantCosts, MonthlyContributionResult,
    TierBreakdown,
};
pub use progressive::{apply_progressive_tiers, ProgressiveOutcome};

use crate::participant::{ParticipantInputs, WageInputs};
use crate::rates::RateTable;

/// Compute the monthly contribution breakdown for sanitized inputs.
///
/// # Panics
/// Panics when a salaried risk class or migrant package index is outside the
/// rate table.
pub fn calculate_monthly(inputs: &ParticipantInputs, rates: &RateTable) -> MonthlyContributionResult {
    match inputs.wage {
        WageInputs::Salaried { base_salary, fixed_allowance, risk_class, pension_cap_override } => {
            let cap = pension_cap_override.unwrap_or(rates.salaried().pension_wage_cap);
            segments::salaried(base_salary, fixed_allowance, risk_class, cap, rates)
        }
        WageInputs::Independent { reported_income, old_age_savings } => {
            segments::independent(reported_income, old_age_savings, rates)
        }
        WageInputs::Construction { contract_value, .. } => segments::construction(contract_value, rates),
        WageInputs::Migrant { package_index, reported_income, old_age_savings } => {
            segments::migrant(package_index, reported_income, old_age_savings, inputs.tenure_months, rates)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::participant::Segment;

    #[test]
    fn test_dispatch_by_segment() {
        let rates = RateTable::statutory();
        let cases = [
            ParticipantInputs::salaried(4_000_000, 1_000_000, 0),
            ParticipantInputs::independent(1_000_000, true),
            ParticipantInputs::construction(600_000_000, 3_000_000),
            ParticipantInputs::migrant(1, 3_000_000, false),
        ];
        for inputs in &cases {
            assert_eq!(calculate_monthly(inputs, &rates).segment, inputs.segment());
        }
    }

    #[test]
    fn test_pension_cap_override_applies() {
        let rates = RateTable::statutory();
        let inputs = ParticipantInputs::salaried(8_000_000, 0, 0).with_pension_cap_override(6_000_000);
        let result = calculate_monthly(&inputs, &rates);
        assert_eq!(result.pension_monthly, Some(180_000));
        assert_eq!(result.segment, Segment::SalariedEmployee);
    }

    #[test]
    #[should_panic(expected = "risk class index")]
    fn test_invalid_risk_class_panics() {
        let rates = RateTable::statutory();
        calculate_monthly(&ParticipantInputs::salaried(1_000_000, 0, 7), &rates);
    }
}

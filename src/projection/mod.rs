//! Compounded savings projections for old-age savings and pension accounts

mod compound;

pub use compound::{CompoundProjector, ProjectedBalance};

use serde::{Deserialize, Serialize};

use crate::contribution::MonthlyContributionResult;

/// Projected balances for one participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projections {
    /// Old-age savings (JHT); zero-valued when the participant does not contribute
    pub old_age_savings: ProjectedBalance,
    /// Pension (JP), salaried participants only
    pub pension: Option<ProjectedBalance>,
}

impl Projections {
    /// Project every contribution stream in `monthly` over the tenure
    pub fn from_monthly(
        monthly: &MonthlyContributionResult,
        tenure_months: i64,
        annual_yield_percent: f64,
    ) -> Self {
        let projector = CompoundProjector::from_annual_percent(annual_yield_percent);
        Self {
            old_age_savings: projector.project(monthly.old_age_savings_monthly, tenure_months),
            pension: monthly
                .pension_monthly
                .map(|amount| projector.project(amount, tenure_months)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contribution::calculate_monthly;
    use crate::participant::ParticipantInputs;
    use crate::rates::RateTable;

    #[test]
    fn test_pension_only_for_salaried() {
        let rates = RateTable::statutory();

        let salaried = calculate_monthly(&ParticipantInputs::salaried(4_000_000, 1_000_000, 0), &rates);
        let projections = Projections::from_monthly(&salaried, 60, 5.5);
        assert_eq!(projections.old_age_savings.principal, 285_000 * 60);
        assert_eq!(projections.pension.map(|p| p.principal), Some(150_000 * 60));

        let independent = calculate_monthly(&ParticipantInputs::independent(1_000_000, false), &rates);
        let projections = Projections::from_monthly(&independent, 60, 5.5);
        assert_eq!(projections.old_age_savings.future_value, 0);
        assert!(projections.pension.is_none());
    }
}

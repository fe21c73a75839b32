//! Benefit payouts for every risk scenario
//!
//! All six scenarios are computed eagerly from one contribution result and
//! one set of projected balances. Eligibility failures produce zero-valued
//! results carrying a reason code, never an error.

use log::debug;

use super::types::{
    ContributionOnlyView, IllnessBenefit, JobLossBenefit, JobLossIneligibility, MedicalCoverage,
    NaturalDeathBenefit, RetirementBenefit, RetirementNote, ScholarshipBenefit, ScholarshipStatus,
    Scenarios, Successor, WorkDeathBenefit,
};
use crate::contribution::MonthlyContributionResult;
use crate::participant::{Dependents, ParticipantInputs, Segment};
use crate::projection::{ProjectedBalance, Projections};
use crate::rates::{RateTable, BASIS_POINTS_PER_UNIT};
use crate::Rupiah;

/// Children eligible to inherit a periodic pension
const PENSION_MAX_CHILDREN: u8 = 2;
/// Age at which a child's pension succession ends
const PENSION_CHILD_AGE_LIMIT: u8 = 23;

/// Stateless calculator for scenario payouts
pub struct BenefitEvaluator<'a> {
    rates: &'a RateTable,
}

impl<'a> BenefitEvaluator<'a> {
    pub fn new(rates: &'a RateTable) -> Self {
        Self { rates }
    }

    /// Evaluate all six scenarios for sanitized inputs
    pub fn evaluate(
        &self,
        inputs: &ParticipantInputs,
        monthly: &MonthlyContributionResult,
        projections: &Projections,
    ) -> Scenarios {
        let segment = inputs.segment();
        let old_age_savings = inputs
            .participates_in_old_age_savings()
            .then_some(projections.old_age_savings);
        let pension = projections.pension;

        let scenarios = Scenarios {
            segment,
            natural_death: self.natural_death(inputs, old_age_savings, pension),
            work_death: self.work_death(inputs, old_age_savings, pension),
            illness: self.illness(inputs.benefit_base_wage()),
            job_loss: self.job_loss(inputs, old_age_savings),
            retirement: self.retirement(inputs, old_age_savings, pension),
            contribution_only: self.contribution_only(monthly, inputs.tenure_months),
        };

        debug!(
            "{} scenarios: natural death {}, work death {}, job loss {} (eligible: {}), retirement {:?}",
            segment,
            scenarios.natural_death.total,
            scenarios.work_death.total,
            scenarios.job_loss.total,
            scenarios.job_loss.eligible,
            scenarios.retirement.note
        );

        scenarios
    }

    /// Scholarship amount by dependent count: half the maximum for one child,
    /// the full maximum for two
    pub fn scholarship_amount(&self, dependents: Dependents) -> Rupiah {
        let maximum = self.rates.benefits().scholarship_maximum;
        match dependents {
            Dependents::None => 0,
            Dependents::One => maximum / 2,
            Dependents::Two => maximum,
        }
    }

    fn scholarship(&self, dependents: Dependents, tenure_gate_met: bool) -> ScholarshipBenefit {
        let (amount, status) = if dependents == Dependents::None {
            (0, ScholarshipStatus::NoDependents)
        } else if !tenure_gate_met {
            (0, ScholarshipStatus::TenureBelowMinimum)
        } else {
            (self.scholarship_amount(dependents), ScholarshipStatus::Granted)
        };

        ScholarshipBenefit {
            dependents: dependents.count(),
            amount,
            status,
            annual_limits: self.rates.benefits().scholarship_levels.clone(),
        }
    }

    fn natural_death(
        &self,
        inputs: &ParticipantInputs,
        old_age_savings: Option<ProjectedBalance>,
        pension: Option<ProjectedBalance>,
    ) -> NaturalDeathBenefit {
        let b = self.rates.benefits();
        let lump_sum = b.death_lump_sum();
        let tenure_gate_met = inputs.tenure_months >= b.scholarship_min_tenure_months as i64;
        let scholarship = self.scholarship(inputs.dependents, tenure_gate_met);

        let total = lump_sum + scholarship.amount + balance_total(old_age_savings) + balance_total(pension);

        NaturalDeathBenefit {
            death_compensation: b.death_compensation,
            periodic_compensation: b.death_periodic_compensation,
            funeral_allowance: b.death_funeral_allowance,
            lump_sum,
            scholarship,
            old_age_savings,
            pension,
            total,
        }
    }

    fn work_death(
        &self,
        inputs: &ParticipantInputs,
        old_age_savings: Option<ProjectedBalance>,
        pension: Option<ProjectedBalance>,
    ) -> WorkDeathBenefit {
        let b = self.rates.benefits();
        let wage = inputs.benefit_base_wage();
        let death_compensation = wage.saturating_mul(b.work_death_wage_multiple as Rupiah);
        let work_accident_total =
            death_compensation + b.work_death_periodic_compensation + b.work_death_funeral_allowance;

        // Work-accident scholarship has no minimum tenure
        let scholarship = self.scholarship(inputs.dependents, true);

        let total = work_accident_total
            + scholarship.amount
            + balance_total(old_age_savings)
            + balance_total(pension);

        WorkDeathBenefit {
            benefit_base_wage: wage,
            wage_multiple: b.work_death_wage_multiple,
            death_compensation,
            periodic_compensation: b.work_death_periodic_compensation,
            funeral_allowance: b.work_death_funeral_allowance,
            work_accident_total,
            scholarship,
            old_age_savings,
            pension,
            total,
        }
    }

    fn illness(&self, wage: Rupiah) -> IllnessBenefit {
        let b = self.rates.benefits();
        IllnessBenefit {
            medical_coverage: MedicalCoverage::Unlimited,
            wage_replacement_monthly: wage,
            full_wage_months: b.illness_full_wage_months,
            subsequent_wage_rate: b.illness_subsequent_wage_rate,
            subsequent_wage_monthly: b.illness_subsequent_wage_rate.of(wage),
            transport_ceiling: b.transport.land,
            transport_ceilings: b.transport,
        }
    }

    fn job_loss(&self, inputs: &ParticipantInputs, old_age_savings: Option<ProjectedBalance>) -> JobLossBenefit {
        let b = self.rates.benefits();
        let wage_base = inputs.benefit_base_wage().min(b.job_loss_wage_cap);

        let ineligibility = if inputs.segment() != Segment::SalariedEmployee {
            Some(JobLossIneligibility::WrongSegment)
        } else if inputs.tenure_months < b.job_loss_min_tenure_months as i64 {
            Some(JobLossIneligibility::InsufficientTenure)
        } else {
            None
        };

        let cash_benefit = match ineligibility {
            None => b.job_loss_replacement_rate.of(wage_base) * b.job_loss_benefit_months as Rupiah,
            Some(_) => 0,
        };

        JobLossBenefit {
            eligible: ineligibility.is_none(),
            ineligibility,
            wage_base,
            replacement_rate: b.job_loss_replacement_rate,
            benefit_months: b.job_loss_benefit_months,
            cash_benefit,
            old_age_savings,
            total: cash_benefit + balance_total(old_age_savings),
        }
    }

    fn retirement(
        &self,
        inputs: &ParticipantInputs,
        old_age_savings: Option<ProjectedBalance>,
        pension: Option<ProjectedBalance>,
    ) -> RetirementBenefit {
        let b = self.rates.benefits();
        let tenure_years = inputs.tenure_months as f64 / 12.0;

        let Some(cap) = inputs.pension_wage_cap(self.rates) else {
            return RetirementBenefit {
                old_age_savings,
                note: RetirementNote::NoPensionProgram,
                tenure_years,
                pension_wage_base: 0,
                pension_monthly: 0,
                pension_lump_sum: 0,
                survivor_succession: Vec::new(),
            };
        };

        let pension_wage_base = inputs.benefit_base_wage().min(cap);

        if inputs.tenure_months >= b.pension_min_tenure_months as i64 {
            // accrual × tenure-years × capped wage, kept in integer arithmetic
            let numerator = pension_wage_base as i128 * b.pension_accrual_rate.0 as i128 * inputs.tenure_months as i128;
            let denominator = BASIS_POINTS_PER_UNIT as i128 * 12;
            let pension_monthly = ((numerator + denominator / 2) / denominator) as Rupiah;

            RetirementBenefit {
                old_age_savings,
                note: RetirementNote::PeriodicPension,
                tenure_years,
                pension_wage_base,
                pension_monthly,
                pension_lump_sum: 0,
                survivor_succession: vec![
                    Successor::Participant,
                    Successor::Spouse,
                    Successor::Children {
                        max_children: PENSION_MAX_CHILDREN,
                        age_limit: PENSION_CHILD_AGE_LIMIT,
                    },
                ],
            }
        } else {
            RetirementBenefit {
                old_age_savings,
                note: RetirementNote::PensionLumpSum,
                tenure_years,
                pension_wage_base,
                pension_monthly: 0,
                pension_lump_sum: balance_total(pension),
                survivor_succession: Vec::new(),
            }
        }
    }

    fn contribution_only(&self, monthly: &MonthlyContributionResult, tenure_months: i64) -> ContributionOnlyView {
        let months = tenure_months.max(0);
        let accumulated_worker = monthly.worker_pay * months;
        let accumulated_payer = monthly.payer_pay.map(|amount| amount * months);

        let accumulated_total = match monthly.migrant_costs {
            Some(costs) => costs.accumulated_total,
            None => accumulated_worker + accumulated_payer.unwrap_or(0),
        };

        ContributionOnlyView {
            monthly: monthly.clone(),
            tenure_months: months,
            accumulated_worker,
            accumulated_payer,
            accumulated_total,
        }
    }
}

fn balance_total(balance: Option<ProjectedBalance>) -> Rupiah {
    balance.map_or(0, |b| b.future_value)
}

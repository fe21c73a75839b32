//! Benefit payouts under the six risk scenarios

mod types;
mod evaluator;

pub use types::{
    ContributionOnlyView, IllnessBenefit, JobLossBenefit, JobLossIneligibility, MedicalCoverage,
    NaturalDeathBenefit, RetirementBenefit, RetirementNote, ScenarioKind, ScenarioResult, Scenarios,
    ScholarshipBenefit, ScholarshipStatus, Successor, WorkDeathBenefit,
};
pub use evaluator::BenefitEvaluator;

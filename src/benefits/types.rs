//! Risk scenario result types

use serde::{Deserialize, Serialize};

use crate::contribution::MonthlyContributionResult;
use crate::participant::Segment;
use crate::projection::ProjectedBalance;
use crate::rates::{BasisPoints, ScholarshipLevel, TransportCeilings};
use crate::Rupiah;

/// The six hypothetical risk views a participant can inspect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScenarioKind {
    NaturalDeath,
    WorkDeath,
    Illness,
    JobLoss,
    Retirement,
    ContributionOnly,
}

impl ScenarioKind {
    pub const ALL: [ScenarioKind; 6] = [
        ScenarioKind::NaturalDeath,
        ScenarioKind::WorkDeath,
        ScenarioKind::Illness,
        ScenarioKind::JobLoss,
        ScenarioKind::Retirement,
        ScenarioKind::ContributionOnly,
    ];
}

/// Why a scholarship amount is what it is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScholarshipStatus {
    Granted,
    NoDependents,
    /// Natural-death scholarship requires a minimum contribution period
    TenureBelowMinimum,
}

/// Education benefit for school-age dependents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScholarshipBenefit {
    pub dependents: u8,
    pub amount: Rupiah,
    pub status: ScholarshipStatus,
    /// Annual ceiling per education level; payment is staged by level
    pub annual_limits: Vec<ScholarshipLevel>,
}

/// Death outside work (JKM)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NaturalDeathBenefit {
    pub death_compensation: Rupiah,
    /// Periodic compensation, paid at once
    pub periodic_compensation: Rupiah,
    pub funeral_allowance: Rupiah,
    /// Sum of the three fixed amounts above
    pub lump_sum: Rupiah,
    pub scholarship: ScholarshipBenefit,
    /// Present only when the participant accrues old-age savings
    pub old_age_savings: Option<ProjectedBalance>,
    /// Pension balance paid as lump sum, salaried only
    pub pension: Option<ProjectedBalance>,
    pub total: Rupiah,
}

/// Death from a work accident (JKK)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkDeathBenefit {
    pub benefit_base_wage: Rupiah,
    pub wage_multiple: u32,
    /// `wage_multiple × benefit_base_wage`
    pub death_compensation: Rupiah,
    pub periodic_compensation: Rupiah,
    pub funeral_allowance: Rupiah,
    /// Compensation + periodic + funeral
    pub work_accident_total: Rupiah,
    pub scholarship: ScholarshipBenefit,
    pub old_age_savings: Option<ProjectedBalance>,
    pub pension: Option<ProjectedBalance>,
    pub total: Rupiah,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MedicalCoverage {
    /// Treatment covered as medically required, without a ceiling
    Unlimited,
}

/// Illness or injury from a work accident (informational)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IllnessBenefit {
    pub medical_coverage: MedicalCoverage,
    /// Temporary inability-to-work benefit (STMB) during the full-wage period
    pub wage_replacement_monthly: Rupiah,
    pub full_wage_months: u32,
    /// Rate applied after the full-wage period, until recovery, disability or death
    pub subsequent_wage_rate: BasisPoints,
    pub subsequent_wage_monthly: Rupiah,
    /// Headline transport reimbursement ceiling (land transport)
    pub transport_ceiling: Rupiah,
    pub transport_ceilings: TransportCeilings,
}

/// Why a participant cannot claim the job-loss cash benefit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobLossIneligibility {
    /// Only salaried employees are covered by JKP
    WrongSegment,
    /// Contribution period shorter than the minimum
    InsufficientTenure,
}

/// Job loss (JKP) plus old-age savings withdrawal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobLossBenefit {
    pub eligible: bool,
    pub ineligibility: Option<JobLossIneligibility>,
    /// `min(benefit wage, JKP wage cap)`
    pub wage_base: Rupiah,
    pub replacement_rate: BasisPoints,
    pub benefit_months: u32,
    pub cash_benefit: Rupiah,
    pub old_age_savings: Option<ProjectedBalance>,
    pub total: Rupiah,
}

/// How the pension is paid out at retirement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetirementNote {
    /// Minimum tenure met: monthly pension for life
    PeriodicPension,
    /// Below minimum tenure: pension balance paid at once
    PensionLumpSum,
    /// Segment has no pension program; old-age savings only
    NoPensionProgram,
}

/// Who receives the monthly pension, in succession order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Successor {
    /// Paid to the retiree until death
    Participant,
    /// Then to the legal spouse until death or remarriage
    Spouse,
    /// Then to children until the age limit, employment or marriage
    Children { max_children: u8, age_limit: u8 },
}

/// Old-age savings and pension at retirement or resignation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetirementBenefit {
    pub old_age_savings: Option<ProjectedBalance>,
    pub note: RetirementNote,
    pub tenure_years: f64,
    /// `min(benefit wage, pension cap)`; zero outside the salaried segment
    pub pension_wage_base: Rupiah,
    pub pension_monthly: Rupiah,
    pub pension_lump_sum: Rupiah,
    /// Populated for the periodic pension only
    pub survivor_succession: Vec<Successor>,
}

/// Pass-through of the contributions with totals over the tenure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionOnlyView {
    pub monthly: MonthlyContributionResult,
    pub tenure_months: i64,
    pub accumulated_worker: Rupiah,
    pub accumulated_payer: Option<Rupiah>,
    /// Migrant participants report their package-inclusive accumulated cost
    pub accumulated_total: Rupiah,
}

/// One scenario, tagged by kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "scenario", content = "result")]
pub enum ScenarioResult {
    NaturalDeath(NaturalDeathBenefit),
    WorkDeath(WorkDeathBenefit),
    Illness(IllnessBenefit),
    JobLoss(JobLossBenefit),
    Retirement(RetirementBenefit),
    ContributionOnly(ContributionOnlyView),
}

impl ScenarioResult {
    pub fn kind(&self) -> ScenarioKind {
        match self {
            ScenarioResult::NaturalDeath(_) => ScenarioKind::NaturalDeath,
            ScenarioResult::WorkDeath(_) => ScenarioKind::WorkDeath,
            ScenarioResult::Illness(_) => ScenarioKind::Illness,
            ScenarioResult::JobLoss(_) => ScenarioKind::JobLoss,
            ScenarioResult::Retirement(_) => ScenarioKind::Retirement,
            ScenarioResult::ContributionOnly(_) => ScenarioKind::ContributionOnly,
        }
    }
}

/// All six scenarios from one calculation pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenarios {
    pub segment: Segment,
    pub natural_death: NaturalDeathBenefit,
    pub work_death: WorkDeathBenefit,
    pub illness: IllnessBenefit,
    pub job_loss: JobLossBenefit,
    pub retirement: RetirementBenefit,
    pub contribution_only: ContributionOnlyView,
}

impl Scenarios {
    /// The scenario a presentation layer has selected
    pub fn select(&self, kind: ScenarioKind) -> ScenarioResult {
        match kind {
            ScenarioKind::NaturalDeath => ScenarioResult::NaturalDeath(self.natural_death.clone()),
            ScenarioKind::WorkDeath => ScenarioResult::WorkDeath(self.work_death.clone()),
            ScenarioKind::Illness => ScenarioResult::Illness(self.illness),
            ScenarioKind::JobLoss => ScenarioResult::JobLoss(self.job_loss),
            ScenarioKind::Retirement => ScenarioResult::Retirement(self.retirement.clone()),
            ScenarioKind::ContributionOnly => ScenarioResult::ContributionOnly(self.contribution_only.clone()),
        }
    }

    pub fn all(&self) -> Vec<ScenarioResult> {
        ScenarioKind::ALL.iter().map(|&kind| self.select(kind)).collect()
    }
}

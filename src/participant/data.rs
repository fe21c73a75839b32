//! Participant segments and simulation inputs

use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::loader::ParticipantLoadError;
use crate::rates::RateTable;
use crate::simulation::SimulationConfig;
use crate::Rupiah;

/// Default tenure used by the constructors (5 years)
pub const DEFAULT_TENURE_MONTHS: i64 = 60;

/// Default projected annual yield on savings balances
pub const DEFAULT_ANNUAL_YIELD_PERCENT: f64 = 5.5;

/// Participant segment, which selects the contribution formula and benefit eligibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Segment {
    /// Penerima Upah (PU)
    SalariedEmployee,
    /// Bukan Penerima Upah (BPU)
    IndependentWorker,
    /// Jasa Konstruksi (JAKON)
    ConstructionContract,
    /// Pekerja Migran Indonesia (PMI)
    MigrantWorker,
}

impl Segment {
    pub const ALL: [Segment; 4] = [
        Segment::SalariedEmployee,
        Segment::IndependentWorker,
        Segment::ConstructionContract,
        Segment::MigrantWorker,
    ];

    /// Short program code used by BPJS
    pub fn code(&self) -> &'static str {
        match self {
            Segment::SalariedEmployee => "PU",
            Segment::IndependentWorker => "BPU",
            Segment::ConstructionContract => "JAKON",
            Segment::MigrantWorker => "PMI",
        }
    }

    /// Only salaried employees contribute to and draw from the pension program
    pub fn has_pension(&self) -> bool {
        matches!(self, Segment::SalariedEmployee)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Segment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PU" | "SALARIED" | "SALARIEDEMPLOYEE" => Ok(Segment::SalariedEmployee),
            "BPU" | "INDEPENDENT" | "INDEPENDENTWORKER" => Ok(Segment::IndependentWorker),
            "JAKON" | "CONSTRUCTION" | "CONSTRUCTIONCONTRACT" => Ok(Segment::ConstructionContract),
            "PMI" | "MIGRANT" | "MIGRANTWORKER" => Ok(Segment::MigrantWorker),
            other => Err(format!("Unknown segment: {}", other)),
        }
    }
}

/// Segment-specific wage inputs and elections
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "segment")]
pub enum WageInputs {
    Salaried {
        base_salary: Rupiah,
        fixed_allowance: Rupiah,
        /// Index into the rate table's work-risk classes (0..5)
        risk_class: usize,
        /// Replaces the published pension wage cap when set
        pension_cap_override: Option<Rupiah>,
    },
    Independent {
        reported_income: Rupiah,
        old_age_savings: bool,
    },
    Construction {
        contract_value: Rupiah,
        /// Average worker wage, used for benefits only
        average_wage: Rupiah,
    },
    Migrant {
        package_index: usize,
        reported_income: Rupiah,
        old_age_savings: bool,
    },
}

/// Number of school-age dependents eligible for the scholarship benefit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Dependents {
    #[default]
    None,
    One,
    Two,
}

impl Dependents {
    /// Convert a raw count; the program covers at most two children
    pub fn from_count(count: u32) -> Self {
        match count {
            0 => Dependents::None,
            1 => Dependents::One,
            2 => Dependents::Two,
            n => {
                warn!("{} dependents requested, scholarship covers at most 2", n);
                Dependents::Two
            }
        }
    }

    pub fn count(&self) -> u8 {
        match self {
            Dependents::None => 0,
            Dependents::One => 1,
            Dependents::Two => 2,
        }
    }
}

/// Complete, immutable input surface for one recalculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantInputs {
    pub wage: WageInputs,
    /// Months of contribution (0..=600)
    pub tenure_months: i64,
    /// Projected annual yield on savings balances, in percent (0..=10)
    pub annual_yield_percent: f64,
    pub dependents: Dependents,
}

impl ParticipantInputs {
    fn with_wage(wage: WageInputs) -> Self {
        Self {
            wage,
            tenure_months: DEFAULT_TENURE_MONTHS,
            annual_yield_percent: DEFAULT_ANNUAL_YIELD_PERCENT,
            dependents: Dependents::None,
        }
    }

    /// Salaried employee using the published pension wage cap
    pub fn salaried(base_salary: Rupiah, fixed_allowance: Rupiah, risk_class: usize) -> Self {
        Self::with_wage(WageInputs::Salaried {
            base_salary,
            fixed_allowance,
            risk_class,
            pension_cap_override: None,
        })
    }

    pub fn independent(reported_income: Rupiah, old_age_savings: bool) -> Self {
        Self::with_wage(WageInputs::Independent { reported_income, old_age_savings })
    }

    pub fn construction(contract_value: Rupiah, average_wage: Rupiah) -> Self {
        Self::with_wage(WageInputs::Construction { contract_value, average_wage })
    }

    pub fn migrant(package_index: usize, reported_income: Rupiah, old_age_savings: bool) -> Self {
        Self::with_wage(WageInputs::Migrant { package_index, reported_income, old_age_savings })
    }

    pub fn with_tenure_months(mut self, months: i64) -> Self {
        self.tenure_months = months;
        self
    }

    pub fn with_annual_yield_percent(mut self, percent: f64) -> Self {
        self.annual_yield_percent = percent;
        self
    }

    pub fn with_dependents(mut self, count: u32) -> Self {
        self.dependents = Dependents::from_count(count);
        self
    }

    /// Override the pension wage cap (salaried only; ignored for other segments)
    pub fn with_pension_cap_override(mut self, cap: Rupiah) -> Self {
        if let WageInputs::Salaried { pension_cap_override, .. } = &mut self.wage {
            *pension_cap_override = Some(cap);
        }
        self
    }

    pub fn segment(&self) -> Segment {
        match self.wage {
            WageInputs::Salaried { .. } => Segment::SalariedEmployee,
            WageInputs::Independent { .. } => Segment::IndependentWorker,
            WageInputs::Construction { .. } => Segment::ConstructionContract,
            WageInputs::Migrant { .. } => Segment::MigrantWorker,
        }
    }

    /// Wage used for benefit payouts. Differs from the contribution base for
    /// construction, where contributions follow the contract value.
    pub fn benefit_base_wage(&self) -> Rupiah {
        match self.wage {
            WageInputs::Salaried { base_salary, fixed_allowance, .. } => base_salary.saturating_add(fixed_allowance),
            WageInputs::Independent { reported_income, .. } => reported_income,
            WageInputs::Construction { average_wage, .. } => average_wage,
            WageInputs::Migrant { reported_income, .. } => reported_income,
        }
    }

    /// Whether an old-age savings (JHT) account accrues for this participant
    pub fn participates_in_old_age_savings(&self) -> bool {
        match self.wage {
            WageInputs::Salaried { .. } => true,
            WageInputs::Independent { old_age_savings, .. } => old_age_savings,
            WageInputs::Construction { .. } => false,
            WageInputs::Migrant { old_age_savings, .. } => old_age_savings,
        }
    }

    /// Effective pension wage cap; `None` outside the salaried segment
    pub fn pension_wage_cap(&self, rates: &RateTable) -> Option<Rupiah> {
        let cap_override = match self.wage {
            WageInputs::Salaried { pension_cap_override, .. } => pension_cap_override,
            _ => None,
        };
        self.segment()
            .has_pension()
            .then(|| cap_override.unwrap_or(rates.salaried().pension_wage_cap))
    }

    /// Confirm the risk class or package index resolves in `rates`.
    ///
    /// The engine panics on an unresolvable index; callers taking indices
    /// from user input check here first.
    pub fn check_indices(&self, rates: &RateTable) -> Result<(), ParticipantLoadError> {
        match self.wage {
            WageInputs::Salaried { risk_class, .. } if risk_class >= rates.risk_classes().len() => {
                Err(ParticipantLoadError::InvalidIndex {
                    field: "risk_class",
                    index: risk_class,
                    available: rates.risk_classes().len(),
                })
            }
            WageInputs::Migrant { package_index, .. } if package_index >= rates.migrant().packages.len() => {
                Err(ParticipantLoadError::InvalidIndex {
                    field: "package_index",
                    index: package_index,
                    available: rates.migrant().packages.len(),
                })
            }
            _ => Ok(()),
        }
    }

    /// Clamp out-of-range numeric inputs rather than reject them.
    ///
    /// Negative money and tenure become zero. Money, tenure and yield are
    /// bounded by the config, and a non-finite yield becomes zero. Index fields are left
    /// alone: an invalid risk class or package is a caller bug, not user input.
    pub fn sanitized(&self, config: &SimulationConfig) -> Self {
        let wage = match &self.wage {
            WageInputs::Salaried { base_salary, fixed_allowance, risk_class, pension_cap_override } => {
                WageInputs::Salaried {
                    base_salary: money("base_salary", *base_salary, config),
                    fixed_allowance: money("fixed_allowance", *fixed_allowance, config),
                    risk_class: *risk_class,
                    pension_cap_override: pension_cap_override.map(|cap| money("pension_cap_override", cap, config)),
                }
            }
            WageInputs::Independent { reported_income, old_age_savings } => WageInputs::Independent {
                reported_income: money("reported_income", *reported_income, config),
                old_age_savings: *old_age_savings,
            },
            WageInputs::Construction { contract_value, average_wage } => WageInputs::Construction {
                contract_value: money("contract_value", *contract_value, config),
                average_wage: money("average_wage", *average_wage, config),
            },
            WageInputs::Migrant { package_index, reported_income, old_age_savings } => WageInputs::Migrant {
                package_index: *package_index,
                reported_income: money("reported_income", *reported_income, config),
                old_age_savings: *old_age_savings,
            },
        };

        let tenure_months = if self.tenure_months > config.max_tenure_months {
            warn!(
                "tenure_months {} above maximum, clamping to {}",
                self.tenure_months, config.max_tenure_months
            );
            config.max_tenure_months
        } else {
            non_negative("tenure_months", self.tenure_months)
        };

        let annual_yield_percent = if !self.annual_yield_percent.is_finite() || self.annual_yield_percent < 0.0 {
            warn!("annual_yield_percent {} invalid, treating as zero", self.annual_yield_percent);
            0.0
        } else if self.annual_yield_percent > config.max_annual_yield_percent {
            warn!(
                "annual_yield_percent {} above maximum, clamping to {}",
                self.annual_yield_percent, config.max_annual_yield_percent
            );
            config.max_annual_yield_percent
        } else {
            self.annual_yield_percent
        };

        Self {
            wage,
            tenure_months,
            annual_yield_percent,
            dependents: self.dependents,
        }
    }
}

fn money(field: &str, value: Rupiah, config: &SimulationConfig) -> Rupiah {
    let value = non_negative(field, value);
    if value > config.max_money {
        warn!("{} {} above maximum, clamping to {}", field, value, config.max_money);
        config.max_money
    } else {
        value
    }
}

fn non_negative(field: &str, value: i64) -> i64 {
    if value < 0 {
        warn!("{} is negative ({}), treating as zero", field, value);
        0
    } else {
        value
    }
}

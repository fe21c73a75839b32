//! Statutory rate table: work-risk classes, wage caps, migrant packages,
//! construction tiers and benefit constants
//!
//! The table is pure data. A regulatory change is an edit to
//! [`RateTable::statutory`] or to the CSV files under `data/rates/`, never a
//! change to a calculation code path.

mod basis_points;
mod error;
pub mod loader;

pub use basis_points::{BasisPoints, BASIS_POINTS_PER_UNIT};
pub use error::RateTableError;
pub use loader::{LoadedRates, DEFAULT_RATES_PATH};

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::Rupiah;

/// Number of work-risk classes defined by PP 44/2015 Lampiran I
pub const RISK_CLASS_COUNT: usize = 5;

/// Work-accident (JKK) risk class for salaried participants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskClass {
    pub label: String,
    pub rate: BasisPoints,
    pub description: String,
}

/// A rate split between the paying employer and the worker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedRate {
    pub payer: BasisPoints,
    pub worker: BasisPoints,
}

impl SharedRate {
    pub fn total(&self) -> BasisPoints {
        self.payer + self.worker
    }
}

/// Contribution rates for salaried employees (Penerima Upah)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalariedRates {
    /// Death (JKM) rate, payer only
    pub death: BasisPoints,
    /// Old-age savings (JHT)
    pub old_age_savings: SharedRate,
    /// Pension (JP), applied to the capped wage
    pub pension: SharedRate,
    /// Default pension wage cap when no override is given
    pub pension_wage_cap: Rupiah,
}

/// Contribution rates for independent workers (Bukan Penerima Upah)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndependentRates {
    pub work_accident: BasisPoints,
    /// Minimum monthly work-accident contribution
    pub work_accident_floor: Rupiah,
    /// Flat monthly death contribution
    pub death_flat_fee: Rupiah,
    /// Voluntary old-age savings rate
    pub old_age_savings: BasisPoints,
}

/// Prepaid protection package for migrant workers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrantPackage {
    pub label: String,
    pub price: Rupiah,
    pub covered_months: u32,
}

/// Migrant worker (Pekerja Migran Indonesia) fees
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrantRates {
    pub pre_placement_fee: Rupiah,
    pub extension_fee_per_month: Rupiah,
    pub old_age_savings: BasisPoints,
    pub packages: Vec<MigrantPackage>,
}

/// One bracket of the construction (Jasa Konstruksi) progressive schedule
///
/// `upper_bound` of `None` marks the unbounded top tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressiveTier {
    pub upper_bound: Option<Rupiah>,
    pub work_accident_rate: BasisPoints,
    pub death_rate: BasisPoints,
}

/// Annual scholarship limit for one education level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScholarshipLevel {
    pub level: String,
    pub annual_limit: Rupiah,
}

/// Transportation reimbursement ceilings for work accidents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportCeilings {
    pub land: Rupiah,
    pub sea: Rupiah,
    pub air: Rupiah,
}

/// Benefit constants shared by every risk scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenefitRates {
    // Natural death (JKM)
    pub death_compensation: Rupiah,
    pub death_periodic_compensation: Rupiah,
    pub death_funeral_allowance: Rupiah,

    // Death at work (JKK)
    pub work_death_wage_multiple: u32,
    pub work_death_periodic_compensation: Rupiah,
    pub work_death_funeral_allowance: Rupiah,

    // Scholarship
    pub scholarship_maximum: Rupiah,
    pub scholarship_min_tenure_months: u32,
    pub scholarship_levels: Vec<ScholarshipLevel>,

    // Illness / work accident
    pub illness_full_wage_months: u32,
    pub illness_subsequent_wage_rate: BasisPoints,
    pub transport: TransportCeilings,

    // Job loss (JKP)
    pub job_loss_wage_cap: Rupiah,
    pub job_loss_replacement_rate: BasisPoints,
    pub job_loss_benefit_months: u32,
    pub job_loss_min_tenure_months: u32,

    // Pension (JP)
    pub pension_min_tenure_months: u32,
    /// Accrual per contribution year, applied to the capped wage
    pub pension_accrual_rate: BasisPoints,
}

impl BenefitRates {
    /// Lump sum paid on natural death (compensation + periodic + funeral)
    pub fn death_lump_sum(&self) -> Rupiah {
        self.death_compensation + self.death_periodic_compensation + self.death_funeral_allowance
    }
}

/// Immutable registry of every statutory value the engine reads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTable {
    risk_classes: Vec<RiskClass>,
    salaried: SalariedRates,
    independent: IndependentRates,
    migrant: MigrantRates,
    construction_tiers: Vec<ProgressiveTier>,
    benefits: BenefitRates,
}

impl RateTable {
    /// 2025/2026 regulation values (PP 44/2015 and amendments)
    pub fn statutory() -> Self {
        Self {
            risk_classes: vec![
                RiskClass {
                    label: "Sangat Rendah".to_string(),
                    rate: BasisPoints(24),
                    description: "Indoor work with minimal physical risk: banking, insurance, garment, administration".to_string(),
                },
                RiskClass {
                    label: "Rendah".to_string(),
                    rate: BasisPoints(54),
                    description: "Light field or factory work: agriculture, livestock, inland fishery, retail, food and beverage".to_string(),
                },
                RiskClass {
                    label: "Sedang".to_string(),
                    rate: BasisPoints(89),
                    description: "Mid-scale processing and plantations: rubber, sugar, coffee, textiles, metal goods, printing".to_string(),
                },
                RiskClass {
                    label: "Tinggi".to_string(),
                    rate: BasisPoints(127),
                    description: "Heavy physical work and transport: building construction, land/sea/air transport, base metals, chemicals".to_string(),
                },
                RiskClass {
                    label: "Sangat Tinggi".to_string(),
                    rate: BasisPoints(174),
                    description: "Extreme hazard: oil, gas, coal and ore mining, forest logging, quarrying".to_string(),
                },
            ],
            salaried: SalariedRates {
                death: BasisPoints(30),
                old_age_savings: SharedRate { payer: BasisPoints(370), worker: BasisPoints(200) },
                pension: SharedRate { payer: BasisPoints(200), worker: BasisPoints(100) },
                pension_wage_cap: 10_547_400,
            },
            independent: IndependentRates {
                work_accident: BasisPoints(100),
                work_accident_floor: 10_000,
                death_flat_fee: 6_800,
                old_age_savings: BasisPoints(200),
            },
            migrant: MigrantRates {
                pre_placement_fee: 37_500,
                extension_fee_per_month: 13_500,
                old_age_savings: BasisPoints(200),
                packages: vec![
                    MigrantPackage { label: "Paket 24 Bulan".to_string(), price: 332_500, covered_months: 24 },
                    MigrantPackage { label: "Paket 12 Bulan".to_string(), price: 189_000, covered_months: 12 },
                    MigrantPackage { label: "Paket 6 Bulan".to_string(), price: 108_000, covered_months: 6 },
                ],
            },
            construction_tiers: vec![
                ProgressiveTier { upper_bound: Some(100_000_000), work_accident_rate: BasisPoints(21), death_rate: BasisPoints(3) },
                ProgressiveTier { upper_bound: Some(500_000_000), work_accident_rate: BasisPoints(17), death_rate: BasisPoints(2) },
                ProgressiveTier { upper_bound: Some(1_000_000_000), work_accident_rate: BasisPoints(13), death_rate: BasisPoints(2) },
                ProgressiveTier { upper_bound: Some(5_000_000_000), work_accident_rate: BasisPoints(11), death_rate: BasisPoints(1) },
                ProgressiveTier { upper_bound: None, work_accident_rate: BasisPoints(9), death_rate: BasisPoints(1) },
            ],
            benefits: BenefitRates {
                death_compensation: 20_000_000,
                death_periodic_compensation: 12_000_000,
                death_funeral_allowance: 10_000_000,
                work_death_wage_multiple: 48,
                work_death_periodic_compensation: 12_000_000,
                work_death_funeral_allowance: 10_000_000,
                scholarship_maximum: 174_000_000,
                scholarship_min_tenure_months: 36,
                scholarship_levels: vec![
                    ScholarshipLevel { level: "TK/SD".to_string(), annual_limit: 1_500_000 },
                    ScholarshipLevel { level: "SMP".to_string(), annual_limit: 2_000_000 },
                    ScholarshipLevel { level: "SMA".to_string(), annual_limit: 3_000_000 },
                    ScholarshipLevel { level: "S1".to_string(), annual_limit: 12_000_000 },
                ],
                illness_full_wage_months: 12,
                illness_subsequent_wage_rate: BasisPoints(5_000),
                transport: TransportCeilings { land: 5_000_000, sea: 2_000_000, air: 10_000_000 },
                job_loss_wage_cap: 5_000_000,
                job_loss_replacement_rate: BasisPoints(6_000),
                job_loss_benefit_months: 6,
                job_loss_min_tenure_months: 12,
                pension_min_tenure_months: 180,
                pension_accrual_rate: BasisPoints(100),
            },
        }
    }

    /// Load and validate a rate table from CSV files in the default location (data/rates/)
    pub fn from_csv() -> Result<Self, RateTableError> {
        Self::from_csv_path(Path::new(DEFAULT_RATES_PATH))
    }

    /// Load and validate a rate table from CSV files in a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self, RateTableError> {
        let loaded = LoadedRates::load_from(path)?;
        Self::from_loaded(loaded)
    }

    /// Build a table from loaded CSV data, rejecting tables the engine cannot evaluate
    pub fn from_loaded(loaded: LoadedRates) -> Result<Self, RateTableError> {
        let table = Self {
            risk_classes: loaded.risk_classes,
            salaried: loaded.salaried,
            independent: loaded.independent,
            migrant: loaded.migrant,
            construction_tiers: loaded.construction_tiers,
            benefits: loaded.benefits,
        };
        table.validate()?;
        Ok(table)
    }

    fn validate(&self) -> Result<(), RateTableError> {
        if self.risk_classes.len() != RISK_CLASS_COUNT {
            return Err(RateTableError::Invalid(format!(
                "expected {} risk classes, found {}",
                RISK_CLASS_COUNT,
                self.risk_classes.len()
            )));
        }

        if self.migrant.packages.is_empty() {
            return Err(RateTableError::Invalid("no migrant packages defined".to_string()));
        }

        let Some((last, bounded)) = self.construction_tiers.split_last() else {
            return Err(RateTableError::Invalid("no construction tiers defined".to_string()));
        };
        if last.upper_bound.is_some() {
            return Err(RateTableError::Invalid("last construction tier must be unbounded".to_string()));
        }
        let mut previous = 0;
        for tier in bounded {
            match tier.upper_bound {
                Some(bound) if bound > previous => previous = bound,
                Some(bound) => {
                    return Err(RateTableError::Invalid(format!(
                        "construction tier bound {} is not above previous bound {}",
                        bound, previous
                    )))
                }
                None => {
                    return Err(RateTableError::Invalid(
                        "only the last construction tier may be unbounded".to_string(),
                    ))
                }
            }
        }

        Ok(())
    }

    /// Work-risk class by index.
    ///
    /// # Panics
    /// Panics when `index` is outside `0..5`; callers must pass a valid class.
    pub fn risk_class(&self, index: usize) -> &RiskClass {
        match self.risk_classes.get(index) {
            Some(class) => class,
            None => panic!(
                "risk class index {} out of range (0..{})",
                index,
                self.risk_classes.len()
            ),
        }
    }

    pub fn risk_classes(&self) -> &[RiskClass] {
        &self.risk_classes
    }

    /// Migrant package by index.
    ///
    /// # Panics
    /// Panics when `index` does not name a configured package.
    pub fn migrant_package(&self, index: usize) -> &MigrantPackage {
        match self.migrant.packages.get(index) {
            Some(package) => package,
            None => panic!(
                "migrant package index {} out of range (0..{})",
                index,
                self.migrant.packages.len()
            ),
        }
    }

    pub fn salaried(&self) -> &SalariedRates {
        &self.salaried
    }

    pub fn independent(&self) -> &IndependentRates {
        &self.independent
    }

    pub fn migrant(&self) -> &MigrantRates {
        &self.migrant
    }

    pub fn construction_tiers(&self) -> &[ProgressiveTier] {
        &self.construction_tiers
    }

    pub fn benefits(&self) -> &BenefitRates {
        &self.benefits
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::statutory()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statutory_table_is_valid() {
        let table = RateTable::statutory();
        assert!(table.validate().is_ok());
        assert_eq!(table.risk_classes().len(), RISK_CLASS_COUNT);
        assert_eq!(table.construction_tiers().len(), 5);
    }

    #[test]
    fn test_risk_class_lookup() {
        let table = RateTable::statutory();
        assert_eq!(table.risk_class(0).label, "Sangat Rendah");
        assert_eq!(table.risk_class(0).rate, BasisPoints(24));
        assert_eq!(table.risk_class(4).rate, BasisPoints(174));
    }

    #[test]
    #[should_panic(expected = "risk class index 5 out of range")]
    fn test_risk_class_out_of_range_panics() {
        RateTable::statutory().risk_class(5);
    }

    #[test]
    #[should_panic(expected = "migrant package index 3 out of range")]
    fn test_migrant_package_out_of_range_panics() {
        RateTable::statutory().migrant_package(3);
    }

    #[test]
    fn test_death_lump_sum() {
        let table = RateTable::statutory();
        assert_eq!(table.benefits().death_lump_sum(), 42_000_000);
    }

    #[test]
    fn test_rejects_bounded_top_tier() {
        let mut table = RateTable::statutory();
        table.construction_tiers.pop();
        assert!(matches!(table.validate(), Err(RateTableError::Invalid(_))));
    }

    #[test]
    fn test_rejects_descending_tiers() {
        let mut table = RateTable::statutory();
        table.construction_tiers.swap(0, 1);
        assert!(table.validate().is_err());
    }
}

//! CSV-based rate table loader
//!
//! Loads statutory rates from CSV files in data/rates/

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use csv::StringRecord;
use log::info;

use super::{
    BasisPoints, BenefitRates, IndependentRates, MigrantPackage, MigrantRates, ProgressiveTier,
    RateTableError, RiskClass, SalariedRates, ScholarshipLevel, SharedRate, TransportCeilings,
};
use crate::Rupiah;

/// Default path to rate table directory
pub const DEFAULT_RATES_PATH: &str = "data/rates";

const RISK_CLASSES_FILE: &str = "risk_classes.csv";
const CONSTRUCTION_TIERS_FILE: &str = "construction_tiers.csv";
const MIGRANT_PACKAGES_FILE: &str = "migrant_packages.csv";
const SCHOLARSHIP_LEVELS_FILE: &str = "scholarship_levels.csv";
const STATUTORY_VALUES_FILE: &str = "statutory_values.csv";

fn open(path: &Path, file: &str) -> Result<csv::Reader<std::fs::File>, RateTableError> {
    let full = path.join(file);
    csv::Reader::from_path(&full).map_err(|source| RateTableError::Csv { path: full, source })
}

fn records(
    path: &Path,
    file: &'static str,
) -> Result<Vec<StringRecord>, RateTableError> {
    let mut reader = open(path, file)?;
    reader
        .records()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| RateTableError::Csv { path: path.join(file), source })
}

fn parse_field<T: FromStr>(
    record: &StringRecord,
    index: usize,
    file: &'static str,
    field: &'static str,
) -> Result<T, RateTableError> {
    let raw = record.get(index).unwrap_or("").trim();
    raw.parse().map_err(|_| RateTableError::Parse {
        file,
        line: record.position().map(|p| p.line()).unwrap_or(0),
        field,
        value: raw.to_string(),
    })
}

fn text_field(record: &StringRecord, index: usize) -> String {
    record.get(index).unwrap_or("").trim().to_string()
}

/// Load work-risk classes
/// Columns: label, rate_bp, description
pub fn load_risk_classes(path: &Path) -> Result<Vec<RiskClass>, RateTableError> {
    records(path, RISK_CLASSES_FILE)?
        .iter()
        .map(|record| {
            Ok(RiskClass {
                label: text_field(record, 0),
                rate: BasisPoints(parse_field(record, 1, RISK_CLASSES_FILE, "rate_bp")?),
                description: text_field(record, 2),
            })
        })
        .collect()
}

/// Load construction progressive tiers in file order
/// Columns: upper_bound (empty = unbounded), work_accident_bp, death_bp
pub fn load_construction_tiers(path: &Path) -> Result<Vec<ProgressiveTier>, RateTableError> {
    records(path, CONSTRUCTION_TIERS_FILE)?
        .iter()
        .map(|record| {
            let upper_bound = if text_field(record, 0).is_empty() {
                None
            } else {
                Some(parse_field(record, 0, CONSTRUCTION_TIERS_FILE, "upper_bound")?)
            };
            Ok(ProgressiveTier {
                upper_bound,
                work_accident_rate: BasisPoints(parse_field(record, 1, CONSTRUCTION_TIERS_FILE, "work_accident_bp")?),
                death_rate: BasisPoints(parse_field(record, 2, CONSTRUCTION_TIERS_FILE, "death_bp")?),
            })
        })
        .collect()
}

/// Load migrant worker packages
/// Columns: label, price, covered_months
pub fn load_migrant_packages(path: &Path) -> Result<Vec<MigrantPackage>, RateTableError> {
    records(path, MIGRANT_PACKAGES_FILE)?
        .iter()
        .map(|record| {
            Ok(MigrantPackage {
                label: text_field(record, 0),
                price: parse_field(record, 1, MIGRANT_PACKAGES_FILE, "price")?,
                covered_months: parse_field(record, 2, MIGRANT_PACKAGES_FILE, "covered_months")?,
            })
        })
        .collect()
}

/// Load per-level scholarship limits
/// Columns: level, annual_limit
pub fn load_scholarship_levels(path: &Path) -> Result<Vec<ScholarshipLevel>, RateTableError> {
    records(path, SCHOLARSHIP_LEVELS_FILE)?
        .iter()
        .map(|record| {
            Ok(ScholarshipLevel {
                level: text_field(record, 0),
                annual_limit: parse_field(record, 1, SCHOLARSHIP_LEVELS_FILE, "annual_limit")?,
            })
        })
        .collect()
}

/// Load keyed scalar values (caps, fees, flat rates)
/// Columns: key, value
pub fn load_statutory_values(path: &Path) -> Result<StatutoryValues, RateTableError> {
    let mut values = HashMap::new();
    for record in records(path, STATUTORY_VALUES_FILE)? {
        let value: i64 = parse_field(&record, 1, STATUTORY_VALUES_FILE, "value")?;
        values.insert(text_field(&record, 0), value);
    }
    Ok(StatutoryValues { values })
}

/// Keyed scalar values from statutory_values.csv
#[derive(Debug, Clone, Default)]
pub struct StatutoryValues {
    values: HashMap<String, i64>,
}

impl StatutoryValues {
    fn amount(&self, key: &'static str) -> Result<Rupiah, RateTableError> {
        self.values.get(key).copied().ok_or(RateTableError::Missing(key))
    }

    fn rate(&self, key: &'static str) -> Result<BasisPoints, RateTableError> {
        let raw = self.amount(key)?;
        u32::try_from(raw)
            .map(BasisPoints)
            .map_err(|_| RateTableError::Invalid(format!("{} must be a non-negative basis point value, got {}", key, raw)))
    }

    fn months(&self, key: &'static str) -> Result<u32, RateTableError> {
        let raw = self.amount(key)?;
        u32::try_from(raw)
            .map_err(|_| RateTableError::Invalid(format!("{} must be a non-negative month count, got {}", key, raw)))
    }
}

/// All rate data loaded from a directory, before validation
#[derive(Debug, Clone)]
pub struct LoadedRates {
    pub risk_classes: Vec<RiskClass>,
    pub salaried: SalariedRates,
    pub independent: IndependentRates,
    pub migrant: MigrantRates,
    pub construction_tiers: Vec<ProgressiveTier>,
    pub benefits: BenefitRates,
}

impl LoadedRates {
    /// Load all rate data from the default path
    pub fn load_default() -> Result<Self, RateTableError> {
        Self::load_from(Path::new(DEFAULT_RATES_PATH))
    }

    /// Load all rate data from a specific path
    pub fn load_from(path: &Path) -> Result<Self, RateTableError> {
        let values = load_statutory_values(path)?;

        let loaded = Self {
            risk_classes: load_risk_classes(path)?,
            salaried: SalariedRates {
                death: values.rate("salaried_death_bp")?,
                old_age_savings: SharedRate {
                    payer: values.rate("salaried_jht_payer_bp")?,
                    worker: values.rate("salaried_jht_worker_bp")?,
                },
                pension: SharedRate {
                    payer: values.rate("salaried_jp_payer_bp")?,
                    worker: values.rate("salaried_jp_worker_bp")?,
                },
                pension_wage_cap: values.amount("pension_wage_cap")?,
            },
            independent: IndependentRates {
                work_accident: values.rate("independent_jkk_bp")?,
                work_accident_floor: values.amount("independent_jkk_floor")?,
                death_flat_fee: values.amount("independent_jkm_flat_fee")?,
                old_age_savings: values.rate("independent_jht_bp")?,
            },
            migrant: MigrantRates {
                pre_placement_fee: values.amount("migrant_pre_placement_fee")?,
                extension_fee_per_month: values.amount("migrant_extension_fee")?,
                old_age_savings: values.rate("migrant_jht_bp")?,
                packages: load_migrant_packages(path)?,
            },
            construction_tiers: load_construction_tiers(path)?,
            benefits: BenefitRates {
                death_compensation: values.amount("death_compensation")?,
                death_periodic_compensation: values.amount("death_periodic_compensation")?,
                death_funeral_allowance: values.amount("death_funeral_allowance")?,
                work_death_wage_multiple: values.months("work_death_wage_multiple")?,
                work_death_periodic_compensation: values.amount("work_death_periodic_compensation")?,
                work_death_funeral_allowance: values.amount("work_death_funeral_allowance")?,
                scholarship_maximum: values.amount("scholarship_maximum")?,
                scholarship_min_tenure_months: values.months("scholarship_min_tenure_months")?,
                scholarship_levels: load_scholarship_levels(path)?,
                illness_full_wage_months: values.months("illness_full_wage_months")?,
                illness_subsequent_wage_rate: values.rate("illness_subsequent_wage_bp")?,
                transport: TransportCeilings {
                    land: values.amount("transport_land")?,
                    sea: values.amount("transport_sea")?,
                    air: values.amount("transport_air")?,
                },
                job_loss_wage_cap: values.amount("job_loss_wage_cap")?,
                job_loss_replacement_rate: values.rate("job_loss_replacement_bp")?,
                job_loss_benefit_months: values.months("job_loss_benefit_months")?,
                job_loss_min_tenure_months: values.months("job_loss_min_tenure_months")?,
                pension_min_tenure_months: values.months("pension_min_tenure_months")?,
                pension_accrual_rate: values.rate("pension_accrual_bp")?,
            },
        };

        info!(
            "Loaded rate table from {}: {} risk classes, {} construction tiers, {} migrant packages",
            path.display(),
            loaded.risk_classes.len(),
            loaded.construction_tiers.len(),
            loaded.migrant.packages.len()
        );

        Ok(loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::RateTable;

    #[test]
    fn test_load_default_rates() {
        let result = LoadedRates::load_default();
        assert!(result.is_ok(), "Failed to load rates: {:?}", result.err());

        let loaded = result.unwrap();
        assert_eq!(loaded.risk_classes.len(), 5);
        assert_eq!(loaded.risk_classes[0].rate, BasisPoints(24));
        assert_eq!(loaded.construction_tiers.last().unwrap().upper_bound, None);
        assert_eq!(loaded.migrant.packages[1].price, 189_000);
        assert_eq!(loaded.benefits.scholarship_levels.len(), 4);
    }

    #[test]
    fn test_csv_matches_statutory_table() {
        let from_csv = RateTable::from_csv().expect("Failed to load rates");
        assert_eq!(from_csv, RateTable::statutory());
    }

    #[test]
    fn test_missing_directory_is_csv_error() {
        let result = LoadedRates::load_from(Path::new("data/does-not-exist"));
        assert!(matches!(result, Err(RateTableError::Csv { .. })));
    }

    #[test]
    fn test_missing_key_is_reported() {
        let values = StatutoryValues::default();
        assert!(matches!(
            values.amount("pension_wage_cap"),
            Err(RateTableError::Missing("pension_wage_cap"))
        ));
    }
}

//! Load participants from a batch CSV file
//!
//! Columns not relevant to a row's segment may be left empty. Empty money
//! fields are read as zero; empty tenure and yield take the usual defaults.

use csv::Reader;
use log::info;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use super::{
    Dependents, ParticipantInputs, Segment, WageInputs, DEFAULT_ANNUAL_YIELD_PERCENT, DEFAULT_TENURE_MONTHS,
};
use crate::Rupiah;

/// Failure to load or accept participant inputs
#[derive(Error, Debug)]
pub enum ParticipantLoadError {
    #[error("failed to read participant CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("participant {participant_id}: {message}")]
    UnknownSegment { participant_id: String, message: String },

    /// A risk class or migrant package index the rate table cannot resolve
    #[error("{field} {index} out of range (0..{available})")]
    InvalidIndex { field: &'static str, index: usize, available: usize },
}

/// A participant loaded from a batch file
#[derive(Debug, Clone, PartialEq)]
pub struct ParticipantRecord {
    pub participant_id: String,
    pub inputs: ParticipantInputs,
}

/// Raw CSV row matching participants.csv columns
#[derive(Debug, Deserialize)]
struct CsvRow {
    participant_id: String,
    segment: String,
    base_salary: Option<Rupiah>,
    fixed_allowance: Option<Rupiah>,
    risk_class: Option<usize>,
    pension_cap: Option<Rupiah>,
    reported_income: Option<Rupiah>,
    contract_value: Option<Rupiah>,
    average_wage: Option<Rupiah>,
    package_index: Option<usize>,
    old_age_savings: Option<bool>,
    tenure_months: Option<i64>,
    annual_yield_percent: Option<f64>,
    dependents: Option<u32>,
}

impl CsvRow {
    fn to_record(self) -> Result<ParticipantRecord, ParticipantLoadError> {
        let segment: Segment = self.segment.parse().map_err(|message| ParticipantLoadError::UnknownSegment {
            participant_id: self.participant_id.clone(),
            message,
        })?;

        let wage = match segment {
            Segment::SalariedEmployee => WageInputs::Salaried {
                base_salary: self.base_salary.unwrap_or(0),
                fixed_allowance: self.fixed_allowance.unwrap_or(0),
                risk_class: self.risk_class.unwrap_or(0),
                pension_cap_override: self.pension_cap,
            },
            Segment::IndependentWorker => WageInputs::Independent {
                reported_income: self.reported_income.unwrap_or(0),
                old_age_savings: self.old_age_savings.unwrap_or(false),
            },
            Segment::ConstructionContract => WageInputs::Construction {
                contract_value: self.contract_value.unwrap_or(0),
                average_wage: self.average_wage.unwrap_or(0),
            },
            Segment::MigrantWorker => WageInputs::Migrant {
                package_index: self.package_index.unwrap_or(0),
                reported_income: self.reported_income.unwrap_or(0),
                old_age_savings: self.old_age_savings.unwrap_or(false),
            },
        };

        Ok(ParticipantRecord {
            participant_id: self.participant_id,
            inputs: ParticipantInputs {
                wage,
                tenure_months: self.tenure_months.unwrap_or(DEFAULT_TENURE_MONTHS),
                annual_yield_percent: self.annual_yield_percent.unwrap_or(DEFAULT_ANNUAL_YIELD_PERCENT),
                dependents: Dependents::from_count(self.dependents.unwrap_or(0)),
            },
        })
    }
}

/// Load all participants from a CSV file
pub fn load_participants<P: AsRef<Path>>(path: P) -> Result<Vec<ParticipantRecord>, ParticipantLoadError> {
    let path = path.as_ref();
    let records = read_rows(Reader::from_path(path)?)?;
    info!("Loaded {} participants from {}", records.len(), path.display());
    Ok(records)
}

/// Load participants from any reader (e.g., string buffer, stdin)
pub fn load_participants_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<ParticipantRecord>, ParticipantLoadError> {
    read_rows(Reader::from_reader(reader))
}

fn read_rows<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<ParticipantRecord>, ParticipantLoadError> {
    let mut records = Vec::new();
    for result in reader.deserialize() {
        let row: CsvRow = result?;
        records.push(row.to_record()?);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "participant_id,segment,base_salary,fixed_allowance,risk_class,pension_cap,reported_income,contract_value,average_wage,package_index,old_age_savings,tenure_months,annual_yield_percent,dependents\n";

    #[test]
    fn test_load_mixed_segments() {
        let data = format!(
            "{}{}{}{}",
            HEADER,
            "p1,PU,4000000,1000000,0,,,,,,,60,5.5,2\n",
            "p2,BPU,,,,,1000000,,,,true,24,5.5,0\n",
            "p3,JAKON,,,,,,600000000,3000000,,,12,0,1\n",
        );
        let records = load_participants_from_reader(data.as_bytes()).expect("Failed to load participants");
        assert_eq!(records.len(), 3);

        assert_eq!(records[0].participant_id, "p1");
        assert_eq!(records[0].inputs.segment(), Segment::SalariedEmployee);
        assert_eq!(records[0].inputs.benefit_base_wage(), 5_000_000);
        assert_eq!(records[0].inputs.dependents, Dependents::Two);

        assert!(records[1].inputs.participates_in_old_age_savings());
        assert_eq!(records[1].inputs.tenure_months, 24);

        assert_eq!(
            records[2].inputs.wage,
            WageInputs::Construction { contract_value: 600_000_000, average_wage: 3_000_000 }
        );
    }

    #[test]
    fn test_empty_tenure_and_yield_use_defaults() {
        let data = format!("{}{}", HEADER, "p4,PMI,,,,,2000000,,,2,false,,,\n");
        let records = load_participants_from_reader(data.as_bytes()).unwrap();
        assert_eq!(records[0].inputs.tenure_months, DEFAULT_TENURE_MONTHS);
        assert_eq!(records[0].inputs.annual_yield_percent, DEFAULT_ANNUAL_YIELD_PERCENT);
        assert!(!records[0].inputs.participates_in_old_age_savings());
    }

    #[test]
    fn test_unknown_segment_is_rejected() {
        let data = format!("{}{}", HEADER, "p9,XYZ,,,,,,,,,,,,\n");
        let result = load_participants_from_reader(data.as_bytes());
        assert!(matches!(result, Err(ParticipantLoadError::UnknownSegment { .. })));
    }

    #[test]
    fn test_load_sample_file() {
        let records = load_participants("data/participants_sample.csv").expect("Failed to load sample");
        assert!(!records.is_empty());
        for segment in Segment::ALL {
            assert!(records.iter().any(|r| r.inputs.segment() == segment));
        }
    }
}

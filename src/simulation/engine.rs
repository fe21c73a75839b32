//! Simulation orchestrator for single and batch recalculations
//!
//! Holds the rate table once, then recomputes every derived figure from a
//! fresh set of inputs on each call. Nothing is cached between calls, so the
//! same inputs always produce the same result.

use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::benefits::{BenefitEvaluator, Scenarios};
use crate::contribution::{calculate_monthly, MonthlyContributionResult};
use crate::participant::ParticipantInputs;
use crate::projection::Projections;
use crate::rates::{RateTable, RateTableError};
use crate::Rupiah;

/// Default money bound (100 trillion Rupiah). Keeps the wage multiples and
/// 50-year compounded balances well inside `i64`.
pub const MAX_MONEY: Rupiah = 100_000_000_000_000;

/// Bounds applied when sanitizing participant inputs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Longest contribution period accepted (50 years)
    pub max_tenure_months: i64,
    /// Highest projected annual yield accepted, in percent
    pub max_annual_yield_percent: f64,
    /// Largest wage, income, contract value or cap accepted, in Rupiah
    pub max_money: Rupiah,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_tenure_months: 600,
            max_annual_yield_percent: 10.0,
            max_money: MAX_MONEY,
        }
    }
}

/// Everything derived from one set of inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Inputs after clamping, as actually used
    pub inputs: ParticipantInputs,
    pub monthly: MonthlyContributionResult,
    pub projections: Projections,
    pub scenarios: Scenarios,
}

/// Pre-loaded orchestrator for repeated recalculations
///
/// # Example
/// ```ignore
/// let orchestrator = SimulationOrchestrator::new();
/// let inputs = ParticipantInputs::salaried(4_000_000, 1_000_000, 0);
/// let result = orchestrator.run(&inputs);
/// println!("{}", result.monthly.total_monthly());
/// ```
#[derive(Debug, Clone)]
pub struct SimulationOrchestrator {
    rates: RateTable,
    config: SimulationConfig,
}

impl SimulationOrchestrator {
    /// Orchestrator using the built-in statutory rate table
    pub fn new() -> Self {
        Self::with_rates(RateTable::statutory())
    }

    pub fn with_rates(rates: RateTable) -> Self {
        Self {
            rates,
            config: SimulationConfig::default(),
        }
    }

    /// Load the rate table from a CSV directory
    pub fn from_csv_path(path: &std::path::Path) -> Result<Self, RateTableError> {
        Ok(Self::with_rates(RateTable::from_csv_path(path)?))
    }

    pub fn with_config(mut self, config: SimulationConfig) -> Self {
        self.config = config;
        self
    }

    /// Recompute contributions, projections and all six scenarios.
    ///
    /// # Panics
    /// Panics when a risk class or migrant package index is outside the rate table.
    pub fn run(&self, inputs: &ParticipantInputs) -> SimulationResult {
        let inputs = inputs.sanitized(&self.config);

        let monthly = calculate_monthly(&inputs, &self.rates);
        debug!(
            "{} monthly: worker {}, payer {:?}, JHT {}",
            inputs.segment(),
            monthly.worker_pay,
            monthly.payer_pay,
            monthly.old_age_savings_monthly
        );

        let projections = Projections::from_monthly(&monthly, inputs.tenure_months, inputs.annual_yield_percent);
        let scenarios = BenefitEvaluator::new(&self.rates).evaluate(&inputs, &monthly, &projections);

        SimulationResult {
            inputs,
            monthly,
            projections,
            scenarios,
        }
    }

    /// Run many participants in parallel; output order matches input order
    pub fn run_batch(&self, participants: &[ParticipantInputs]) -> Vec<SimulationResult> {
        participants.par_iter().map(|inputs| self.run(inputs)).collect()
    }

    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }
}

impl Default for SimulationOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benefits::ScenarioKind;

    #[test]
    fn test_run_is_deterministic() {
        let orchestrator = SimulationOrchestrator::new();
        let inputs = ParticipantInputs::salaried(4_000_000, 1_000_000, 1)
            .with_tenure_months(120)
            .with_dependents(1);
        assert_eq!(orchestrator.run(&inputs), orchestrator.run(&inputs));
    }

    #[test]
    fn test_run_sanitizes_inputs() {
        let orchestrator = SimulationOrchestrator::new();
        let inputs = ParticipantInputs::independent(-1_000_000, true)
            .with_tenure_months(900)
            .with_annual_yield_percent(f64::NAN);
        let result = orchestrator.run(&inputs);

        assert_eq!(result.inputs.tenure_months, 600);
        assert_eq!(result.inputs.annual_yield_percent, 0.0);
        assert_eq!(result.inputs.benefit_base_wage(), 0);
        // Floor still applies on zero income
        assert_eq!(result.monthly.worker_pay, 10_000 + 6_800);
        assert_eq!(result.projections.old_age_savings.interest, 0);
    }

    #[test]
    fn test_custom_config_bounds() {
        let orchestrator = SimulationOrchestrator::new().with_config(SimulationConfig {
            max_tenure_months: 120,
            max_annual_yield_percent: 4.0,
            ..SimulationConfig::default()
        });
        let result = orchestrator.run(&ParticipantInputs::salaried(5_000_000, 0, 0).with_tenure_months(240).with_annual_yield_percent(8.0));
        assert_eq!(result.inputs.tenure_months, 120);
        assert_eq!(result.inputs.annual_yield_percent, 4.0);
    }

    #[test]
    fn test_huge_wages_clamped_without_overflow() {
        let orchestrator = SimulationOrchestrator::new();

        let construction = orchestrator.run(&ParticipantInputs::construction(0, i64::MAX / 10).with_dependents(2));
        assert_eq!(construction.inputs.benefit_base_wage(), MAX_MONEY);
        assert_eq!(construction.scenarios.work_death.death_compensation, 48 * MAX_MONEY);

        let salaried = orchestrator.run(
            &ParticipantInputs::salaried(i64::MAX / 2 + 1, i64::MAX / 2 + 1, 4)
                .with_pension_cap_override(i64::MAX)
                .with_tenure_months(600)
                .with_annual_yield_percent(10.0),
        );
        assert_eq!(salaried.inputs.benefit_base_wage(), 2 * MAX_MONEY);
        assert_eq!(salaried.inputs.pension_wage_cap(orchestrator.rates()), Some(MAX_MONEY));
        assert!(salaried.projections.old_age_savings.future_value > salaried.projections.old_age_savings.principal);
        assert!(salaried.scenarios.natural_death.total > 0);
        assert!(salaried.scenarios.retirement.pension_monthly > 0);

        let migrant = orchestrator.run(&ParticipantInputs::migrant(0, i64::MAX, true).with_tenure_months(600));
        assert_eq!(migrant.inputs.benefit_base_wage(), MAX_MONEY);
        assert!(migrant.scenarios.contribution_only.accumulated_total > 0);
    }

    #[test]
    fn test_run_batch_preserves_order() {
        let orchestrator = SimulationOrchestrator::new();
        let participants: Vec<_> = (1..=20)
            .map(|i| ParticipantInputs::salaried(i * 1_000_000, 0, 0).with_tenure_months(i * 12))
            .collect();

        let batch = orchestrator.run_batch(&participants);
        assert_eq!(batch.len(), participants.len());
        for (inputs, result) in participants.iter().zip(&batch) {
            assert_eq!(result, &orchestrator.run(inputs));
        }
    }

    #[test]
    fn test_scenarios_all_kinds() {
        let result = SimulationOrchestrator::default().run(&ParticipantInputs::migrant(2, 2_500_000, true));
        let all = result.scenarios.all();
        assert_eq!(all.len(), 6);
        for (scenario, kind) in all.iter().zip(ScenarioKind::ALL) {
            assert_eq!(scenario.kind(), kind);
        }
    }
}

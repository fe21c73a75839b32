//! BPJS Simulator - contribution and benefit engine for BPJS Ketenagakerjaan
//!
//! This library provides:
//! - Statutory rate tables (built-in 2025 regulation or loaded from CSV)
//! - Monthly contribution splits for salaried, independent, construction and migrant participants
//! - Compounded old-age-savings and pension balance projections
//! - Benefit payouts under six risk scenarios
//! - A single orchestrator that recomputes everything from immutable inputs

pub mod rates;
pub mod participant;
pub mod contribution;
pub mod projection;
pub mod benefits;
pub mod simulation;

/// Monetary amount in whole Rupiah (no fractional sub-units)
pub type Rupiah = i64;

// Re-export commonly used types
pub use rates::{RateTable, BasisPoints, RateTableError};
pub use participant::{ParticipantInputs, Segment, WageInputs, Dependents};
pub use contribution::{MonthlyContributionResult, calculate_monthly};
pub use projection::{CompoundProjector, ProjectedBalance, Projections};
pub use benefits::{BenefitEvaluator, ScenarioKind, ScenarioResult, Scenarios};
pub use simulation::{SimulationConfig, SimulationOrchestrator, SimulationResult};

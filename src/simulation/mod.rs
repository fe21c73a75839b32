//! End-to-end recalculation: inputs in, contributions, projections and scenarios out

mod engine;

pub use engine::{SimulationConfig, MAX_MONEY, SimulationOrchestrator, SimulationResult};

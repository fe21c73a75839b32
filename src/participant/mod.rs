//! Participant segments, simulation inputs and batch loading

mod data;
pub mod loader;

pub use data::{
    ParticipantInputs, Segment, WageInputs, Dependents,
    DEFAULT_TENURE_MONTHS, DEFAULT_ANNUAL_YIELD_PERCENT,
};
pub use loader::{load_participants, load_participants_from_reader, ParticipantRecord, ParticipantLoadError};

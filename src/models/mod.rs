//! Typed wire models for the observation and concept services.
//!
//! Responses are parsed into these records at the service boundary so the
//! presentation layer never probes dynamic JSON for field presence.

pub mod concept;
pub mod flowsheet;

pub use concept::{ConceptDetail, ConceptMapping, ConceptName, ConceptNameType};
pub use flowsheet::{
    CodedValue, ConceptDataType, ObsConcept, ObsValue, Observation, PivotHeader, PivotRow,
    PivotTable,
};

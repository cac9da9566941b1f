//! Presentation layer: the activation presenter and the pure formatting it
//! delegates to.

pub mod flow_sheet;
pub mod format;

pub use flow_sheet::{EditObsData, EditObsTarget, FlowSheet, FlowSheetParams, SectionConfig};

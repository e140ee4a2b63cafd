//! Transformation module.
//!
//! Turns input rows into ClickUp task rows:
//! - Status: release filter predicate
//! - Phases: `LC Phase` list parsing and explosion
//! - Remap: input record to target schema
//! - Pipeline: per-row algorithm and full run

pub mod phases;
pub mod pipeline;
pub mod remap;
pub mod status;

pub use phases::{explode_phases, parse_list, resolve_phases};
pub use pipeline::*;
pub use remap::{remap, OutputRecord};
pub use status::{is_released, normalize_status};

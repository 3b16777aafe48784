//! Developer Tooling: read-only mission inspection.
//!
//! # Invariants
//! - Tools never mutate the mission.

mod inspector;

pub use inspector::{MissionInspector, MissionSummary, Progress};

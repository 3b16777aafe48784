//! Mission Kernel: authoritative mission state, phase sequencing, deterministic replay.
//!
//! # Invariants
//! - Exactly one stage is active, and it owns the only copy of its phase state.
//! - All state mutations flow through explicit actions.
//! - Every state change and every rejected action leaves an event record.

pub mod config;
pub mod mission;
pub mod phase;
pub mod session;

pub use config::{BridgeConfig, ConfigError, MissionConfig, TimingConfig};
pub use mission::{ActionOutcome, Mission, MissionError, MissionEvent};
pub use phase::{BridgeReport, Phase, Stage};
pub use session::SessionContext;

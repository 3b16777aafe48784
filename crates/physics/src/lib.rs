//! Physics validators: the stateless checks every phase relies on.
//!
//! # Invariants
//! - Every function here is pure; no validator reads or writes phase state.
//! - Balance needs more than one coin, even though a lone coin on the fulcrum
//!   has zero torque.

mod bridge;
mod validators;

pub use bridge::{BridgeScenario, Reactions};
pub use validators::{
    correct_target, is_balanced, is_force_correctly_placed, net_torque, within_tolerance,
};

//! Shared vocabulary: coins on the ruler, forces and their drop targets, team numbers.
//!
//! # Invariants
//! - Identifiers are plain value types; nothing here owns mutable state.

mod types;

pub use types::{
    Coin, CoinId, DropTarget, ForceId, TeamNumber, FULCRUM_TICK_CM, RULER_LENGTH_CM,
};

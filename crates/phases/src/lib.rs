//! Phase models: the state each mini-game owns while it is active.
//!
//! # Invariants
//! - Models are created fresh on phase entry and dropped on exit.
//! - Wrong answers are outcomes, not errors; every model allows unlimited retries.
//! - Deferred feedback is an explicit timed event; a new action on the model
//!   supersedes whatever was pending.

mod bridge;
mod deferred;
mod free_body;
mod quiz;
mod seesaw;

pub use bridge::{BridgeModel, BridgeOutcome};
pub use deferred::{Deferred, TimerToken};
pub use free_body::{DropFeedback, DropOutcome, FreeBodyModel};
pub use quiz::{Puzzle, QuizFeedback, QuizModel, QuizOutcome, QuizTiming, default_puzzles};
pub use seesaw::{BalanceHint, BalanceOutcome, SeesawError, SeesawModel, MAX_TILT_DEGREES};

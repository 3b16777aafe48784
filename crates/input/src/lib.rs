//! Boundary input: the actions a front-end may send, and the parsing that
//! turns raw text into them.
//!
//! # Invariants
//! - Every front-end (terminal, scripted replay, tests) produces the same `Action`s.
//! - Malformed text is rejected here, before any phase model sees it.

pub mod action;
mod field;

pub use action::Action;
pub use field::{InputError, parse_quantity};

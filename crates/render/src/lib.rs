//! Rendering Adapter: renderer-agnostic interface and narrative display data.
//!
//! # Invariants
//! - Renderers cannot mutate mission state.
//! - Everything shown derives from the mission plus the injected [`Narrative`].

mod narrative;
mod renderer;

pub use narrative::{Narrative, NarrativeError, Screen, TEAM_PLACEHOLDER};
pub use renderer::{DebugTextRenderer, RenderView, Renderer};

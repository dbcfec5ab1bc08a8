//! Rendering adapter: renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers read viewer state and never mutate it.
//! - A frame is rebuilt from scratch from the current state; nothing is
//!   cached between frames.

mod geometry;
mod mesher;
mod renderer;

pub use geometry::{ColorVertex, FrameGeometry, TextStyle, WorldText};
pub use mesher::SceneMesher;
pub use renderer::{DebugTextRenderer, Renderer};

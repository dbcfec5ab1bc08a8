//! Viewer state shared by the desktop app and the CLI.
//!
//! Each frame runs marker spin, then the camera transition, then orbit
//! damping, before anything is drawn.

mod startup;
mod viewer;

pub use startup::StartupGate;
pub use viewer::{FrameReport, Viewer};

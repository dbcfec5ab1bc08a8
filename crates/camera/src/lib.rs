//! Camera layer: a perspective orbit camera, damped orbit controls and the
//! fly-to animator used when a plane is clicked.
//!
//! # Invariants
//! - Within a frame the animator ticks before the controls update.
//! - A finished transition leaves the camera exactly on its target.

mod animator;
mod camera;
mod controls;

pub use animator::{CameraAnimator, CameraPose, TickOutcome, TransitionState, TransitionTuning};
pub use camera::OrbitCamera;
pub use controls::OrbitControls;

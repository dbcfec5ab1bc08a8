//! wgpu render backend for the axis viewer.
//!
//! Draws the [`FrameGeometry`](axisview_render::FrameGeometry) produced by the
//! scene mesher: lines and opaque triangles first, then translucent triangles
//! blended over them. Text is left to the host's UI layer.
//!
//! # Invariants
//! - The backend never sees viewer state, only finished frame geometry.
//! - Frame rate is independent of the viewer's frame counter; the host
//!   decides when to advance the viewer.

mod gpu;
mod shaders;

pub use gpu::WgpuRenderer;

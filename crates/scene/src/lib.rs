//! Scene content for the axis viewer.
//!
//! Builds the three selectable axis planes with their grid overlays, the axis
//! labels, the axes indicator and the camera-docked toolbar, all sized from a
//! single reference size. Also answers ray picks against the planes.
//!
//! # Invariants
//! - Exactly one plane, grid group and label exists per axis.
//! - Builders are pure; the same inputs give the same content.

pub mod builder;
pub mod font;
pub mod pick;
pub mod scene;
pub mod theme;
pub mod toolbar;

pub use builder::{
    AxesIndicator, AxisLabel, AxisPlane, GRID_OPACITY, GridGroup, Marker, PLANE_OPACITY,
    hover_opacity,
};
pub use font::{Font, FontError, FontLoader};
pub use pick::PlaneHit;
pub use scene::AxisScene;
pub use theme::Palette;
pub use toolbar::{Toolbar, ToolbarButton, ToolbarLayout};

//! Shared types for the axisview workspace: axes, colors, themes, rays and
//! the viewer configuration.

pub mod config;
pub mod types;

pub use config::{ConfigError, ViewerConfig};
pub use types::{Axis, Color, Ray, Theme};

use axisview_common::{Axis, Color};
use glam::Vec3;

/// Baseline opacity of an axis plane.
pub const PLANE_OPACITY: f32 = 0.5;
/// Opacity of the grid-line overlay.
pub const GRID_OPACITY: f32 = 0.3;
/// Upper bound for the highlighted plane opacity.
pub const MAX_HOVER_OPACITY: f32 = 0.7;
/// Labels and the axes indicator sit at this fraction of the reference size.
pub const LABEL_OFFSET_FACTOR: f32 = 0.6;

/// Opacity applied to a plane while the pointer is over it.
pub fn hover_opacity() -> f32 {
    (2.0 * PLANE_OPACITY).min(MAX_HOVER_OPACITY)
}

/// Creation-time plane colors, before any theme is applied.
pub fn default_axis_color(axis: Axis) -> Color {
    match axis {
        Axis::X => Color::from_hex(0xB74F4F),
        Axis::Y => Color::from_hex(0x4F7D4F),
        Axis::Z => Color::from_hex(0x4F6D8F),
    }
}

/// A selectable translucent square centred on the origin, normal along `axis`.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisPlane {
    pub axis: Axis,
    pub size: f32,
    pub color: Color,
    pub opacity: f32,
    /// Displacement along the normal; nonzero while the plane is pressed.
    pub offset: f32,
}

impl AxisPlane {
    pub fn center(&self) -> Vec3 {
        self.axis.unit() * self.offset
    }

    /// The four corners, counter-clockwise around the normal.
    pub fn corners(&self) -> [Vec3; 4] {
        let (u, v) = self.axis.tangents();
        let h = self.size / 2.0;
        let (u, v) = (u.unit() * h, v.unit() * h);
        let c = self.center();
        [c - u - v, c + u - v, c + u + v, c - u + v]
    }
}

/// A plane together with its grid-line overlay. Hiding the group hides both.
#[derive(Debug, Clone, PartialEq)]
pub struct GridGroup {
    pub axis: Axis,
    pub visible: bool,
    pub plane: AxisPlane,
    pub line_color: Color,
    pub line_opacity: f32,
    pub divisions: u32,
}

impl GridGroup {
    /// Grid line segments lying in the plane (at zero offset), covering the
    /// plane's extent.
    pub fn grid_lines(&self) -> Vec<(Vec3, Vec3)> {
        let (u, v) = self.axis.tangents();
        let (u, v) = (u.unit(), v.unit());
        let size = self.plane.size;
        let half = size / 2.0;
        let divisions = self.divisions.max(1);
        let step = size / divisions as f32;

        let mut lines = Vec::with_capacity(2 * (divisions as usize + 1));
        for i in 0..=divisions {
            let k = -half + i as f32 * step;
            lines.push((u * -half + v * k, u * half + v * k));
            lines.push((u * k + v * -half, u * k + v * half));
        }
        lines
    }
}

/// A floating 2D caption anchored at a world position.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabel {
    pub axis: Axis,
    pub text: String,
    pub position: Vec3,
    pub visible: bool,
}

/// Three colored lines from the origin marking the positive axes.
#[derive(Debug, Clone, PartialEq)]
pub struct AxesIndicator {
    pub length: f32,
}

impl AxesIndicator {
    pub fn color(axis: Axis) -> Color {
        match axis {
            Axis::X => Color::rgb(1.0, 0.0, 0.0),
            Axis::Y => Color::rgb(0.0, 1.0, 0.0),
            Axis::Z => Color::rgb(0.0, 0.0, 1.0),
        }
    }

    pub fn segment(&self, axis: Axis) -> (Vec3, Vec3) {
        (Vec3::ZERO, axis.unit() * self.length)
    }
}

/// Unit cube at the origin spinning a fixed step per frame. Hidden unless
/// enabled by configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub visible: bool,
    pub size: f32,
    pub color: Color,
    /// Euler rotation about X then Y, radians.
    pub rotation: Vec3,
}

impl Marker {
    pub const SPIN_STEP: f32 = 0.01;

    pub fn spin(&mut self) {
        self.rotation.x += Self::SPIN_STEP;
        self.rotation.y += Self::SPIN_STEP;
    }
}

pub fn create_grid_planes(reference_size: f32) -> [GridGroup; 3] {
    let divisions = reference_size.ceil().max(1.0) as u32;
    Axis::ALL.map(|axis| {
        let color = default_axis_color(axis);
        GridGroup {
            axis,
            visible: true,
            plane: AxisPlane {
                axis,
                size: reference_size,
                color,
                opacity: PLANE_OPACITY,
                offset: 0.0,
            },
            line_color: color,
            line_opacity: GRID_OPACITY,
            divisions,
        }
    })
}

pub fn create_axis_labels(reference_size: f32) -> [AxisLabel; 3] {
    let offset = reference_size * LABEL_OFFSET_FACTOR;
    Axis::ALL.map(|axis| AxisLabel {
        axis,
        text: axis.letter().to_string(),
        position: axis.unit() * offset,
        visible: true,
    })
}

pub fn create_axes_indicator(reference_size: f32) -> AxesIndicator {
    AxesIndicator {
        length: reference_size * LABEL_OFFSET_FACTOR,
    }
}

pub fn create_marker(visible: bool) -> Marker {
    Marker {
        visible,
        size: 1.0,
        color: Color::from_hex(0x552222),
        rotation: Vec3::ZERO,
    }
}

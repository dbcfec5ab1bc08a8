use crate::builder::{
    AxesIndicator, AxisLabel, AxisPlane, GridGroup, Marker, PLANE_OPACITY, create_axes_indicator,
    create_axis_labels, create_grid_planes, create_marker,
};
use crate::pick::{PlaneHit, pick_nearest};
use crate::theme::Palette;
use axisview_common::{Axis, Color, Ray, Theme};

/// World-space scene content. Planes, grid groups and labels are stored per
/// axis and addressed by [`Axis`], so every handle always resolves.
#[derive(Debug, Clone)]
pub struct AxisScene {
    reference_size: f32,
    groups: [GridGroup; 3],
    labels: [AxisLabel; 3],
    axes: AxesIndicator,
    marker: Marker,
    theme: Theme,
    background: Color,
}

impl AxisScene {
    pub fn new(reference_size: f32, show_marker: bool) -> Self {
        let mut scene = Self {
            reference_size,
            groups: create_grid_planes(reference_size),
            labels: create_axis_labels(reference_size),
            axes: create_axes_indicator(reference_size),
            marker: create_marker(show_marker),
            theme: Theme::Dark,
            background: Palette::for_theme(Theme::Dark).background,
        };
        scene.apply_theme(Theme::Dark);
        scene
    }

    pub fn reference_size(&self) -> f32 {
        self.reference_size
    }

    pub fn group(&self, axis: Axis) -> &GridGroup {
        &self.groups[axis.index()]
    }

    pub fn groups(&self) -> &[GridGroup; 3] {
        &self.groups
    }

    pub fn plane(&self, axis: Axis) -> &AxisPlane {
        &self.groups[axis.index()].plane
    }

    pub fn label(&self, axis: Axis) -> &AxisLabel {
        &self.labels[axis.index()]
    }

    pub fn labels(&self) -> &[AxisLabel; 3] {
        &self.labels
    }

    pub fn axes(&self) -> &AxesIndicator {
        &self.axes
    }

    pub fn marker(&self) -> &Marker {
        &self.marker
    }

    pub fn marker_mut(&mut self) -> &mut Marker {
        &mut self.marker
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn set_plane_opacity(&mut self, axis: Axis, opacity: f32) {
        self.groups[axis.index()].plane.opacity = opacity;
    }

    pub fn restore_plane_opacity(&mut self, axis: Axis) {
        self.set_plane_opacity(axis, PLANE_OPACITY);
    }

    pub fn set_plane_offset(&mut self, axis: Axis, offset: f32) {
        self.groups[axis.index()].plane.offset = offset;
    }

    pub fn set_group_visible(&mut self, axis: Axis, visible: bool) {
        self.groups[axis.index()].visible = visible;
    }

    pub fn set_label_visible(&mut self, axis: Axis, visible: bool) {
        self.labels[axis.index()].visible = visible;
    }

    /// Show every label and grid group and return every plane to its rest
    /// position.
    pub fn reset_presentation(&mut self) {
        for axis in Axis::ALL {
            self.set_label_visible(axis, true);
            self.set_plane_offset(axis, 0.0);
            self.set_group_visible(axis, true);
        }
    }

    /// Nearest visible plane under `ray`.
    pub fn pick(&self, ray: &Ray) -> Option<PlaneHit> {
        pick_nearest(
            ray,
            self.groups.iter().filter(|g| g.visible).map(|g| &g.plane),
        )
    }

    /// Recolor each grid group (plane and lines) and the background.
    pub fn apply_theme(&mut self, theme: Theme) {
        let palette = Palette::for_theme(theme);
        for group in &mut self.groups {
            let color = palette.axis(group.axis);
            group.plane.color = color;
            group.line_color = color;
        }
        self.background = palette.background;
        self.theme = theme;
    }
}

//! Camera-docked toolbar. All positions are in camera space (the camera looks
//! down -Z), so the toolbar stays fixed in the viewport while the camera orbits.

use crate::font::Font;
use axisview_common::Color;
use glam::{Vec2, Vec3};

pub const BUTTON_WIDTH: f32 = 0.3;
pub const BUTTON_HEIGHT: f32 = 0.3;
pub const PADDING_FACTOR: f32 = 0.2;
/// Number of slots the layout is sized for.
pub const TARGET_BUTTONS: usize = 15;
/// Number of slots actually populated.
pub const POPULATED_BUTTONS: usize = 3;
pub const PANEL_DEPTH: f32 = 0.02;
/// Distance in front of the camera.
pub const PANEL_Z: f32 = -3.0;
pub const MARGIN_FACTOR: f32 = 0.06;

/// Grid geometry derived from the viewport aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolbarLayout {
    pub cols: usize,
    pub rows: usize,
    pub cell_width: f32,
    pub cell_height: f32,
    pub panel_width: f32,
    pub panel_height: f32,
    /// Panel centre in camera space.
    pub position: Vec3,
}

impl ToolbarLayout {
    /// `fov_y` is the vertical field of view in radians.
    pub fn compute(aspect: f32, fov_y: f32) -> Self {
        let cell_width = BUTTON_WIDTH / (1.0 - PADDING_FACTOR);
        let cell_height = BUTTON_HEIGHT / (1.0 - PADDING_FACTOR);

        let cols = ((aspect * 10.0).floor().max(0.0) as usize).max(3);
        let rows = TARGET_BUTTONS.div_ceil(cols).max(2);

        let panel_width = cols as f32 * cell_width;
        let panel_height = rows as f32 * cell_height;

        let margin = panel_height * MARGIN_FACTOR;
        let frustum_height = 2.0 * (fov_y / 2.0).tan() * PANEL_Z.abs();
        let bottom_y = -frustum_height / 2.0 + panel_height / 2.0 + margin;

        Self {
            cols,
            rows,
            cell_width,
            cell_height,
            panel_width,
            panel_height,
            position: Vec3::new(0.0, bottom_y, PANEL_Z),
        }
    }

    /// Centre of cell (`col`, `row`) relative to the panel centre, on the
    /// panel's front face.
    pub fn cell_center(&self, col: usize, row: usize) -> Vec3 {
        let x = -self.panel_width / 2.0 + col as f32 * self.cell_width + self.cell_width / 2.0;
        let y = self.panel_height / 2.0 - row as f32 * self.cell_height - self.cell_height / 2.0;
        Vec3::new(x, y, PANEL_DEPTH / 2.0 + 0.01)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToolbarButton {
    pub name: String,
    pub col: usize,
    pub row: usize,
    /// Centre relative to the panel centre.
    pub center: Vec3,
    pub size: Vec2,
    pub color: Color,
    pub caption_color: Color,
    /// Caption glyph height in world units.
    pub caption_size: f32,
}

#[derive(Debug, Clone)]
pub struct Toolbar {
    pub layout: ToolbarLayout,
    pub panel_color: Color,
    pub buttons: Vec<ToolbarButton>,
    /// Cell boundary segments relative to the panel centre.
    pub grid_lines: Vec<(Vec3, Vec3)>,
    pub grid_color: Color,
    /// Font the captions were laid out with, if it was ready.
    pub font: Option<Font>,
}

impl Toolbar {
    /// Build the toolbar for the current viewport. Buttons need a font; while
    /// it is still loading they are skipped and the panel is built bare.
    pub fn build(aspect: f32, fov_y: f32, font: Option<&Font>) -> Self {
        let layout = ToolbarLayout::compute(aspect, fov_y);

        let mut buttons = Vec::new();
        let mut index = 0;
        'rows: for row in 0..layout.rows {
            for col in 0..layout.cols {
                if index >= POPULATED_BUTTONS {
                    break 'rows;
                }
                let name = format!("button{index}");
                index += 1;
                if font.is_none() {
                    tracing::warn!(button = %name, "font not loaded yet, skipping button");
                    continue;
                }
                buttons.push(ToolbarButton {
                    name,
                    col,
                    row,
                    center: layout.cell_center(col, row),
                    size: Vec2::new(BUTTON_WIDTH, BUTTON_HEIGHT),
                    color: Color::BLACK,
                    caption_color: Color::from_hex(0x8B0000),
                    caption_size: layout.cell_height * 0.12,
                });
            }
        }

        Self {
            grid_lines: panel_grid(&layout),
            layout,
            panel_color: Color::from_hex(0x552222).with_alpha(0.9),
            buttons,
            grid_color: Color::WHITE.with_alpha(0.5),
            font: font.cloned(),
        }
    }
}

fn panel_grid(layout: &ToolbarLayout) -> Vec<(Vec3, Vec3)> {
    let z = PANEL_DEPTH / 2.0 + 0.01;
    let (hw, hh) = (layout.panel_width / 2.0, layout.panel_height / 2.0);
    let mut lines = Vec::with_capacity(layout.cols + layout.rows + 2);
    for i in 0..=layout.cols {
        let x = -hw + i as f32 * layout.cell_width;
        lines.push((Vec3::new(x, hh, z), Vec3::new(x, -hh, z)));
    }
    for j in 0..=layout.rows {
        let y = hh - j as f32 * layout.cell_height;
        lines.push((Vec3::new(-hw, y, z), Vec3::new(hw, y, z)));
    }
    lines
}

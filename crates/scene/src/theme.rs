use axisview_common::{Axis, Color, Theme};

/// Per-axis colors plus the clear color for one theme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub x: Color,
    pub y: Color,
    pub z: Color,
    pub background: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                x: Color::from_hex(0xB74F4F),
                y: Color::from_hex(0x4F7D4F),
                z: Color::from_hex(0x4F6D8F),
                background: Color::from_hex(0x202020),
            },
            // Deeper axis colors for contrast on the off-white background.
            Theme::Light => Self {
                x: Color::from_hex(0xDD6666),
                y: Color::from_hex(0x66AA66),
                z: Color::from_hex(0x6688DD),
                background: Color::from_hex(0xE8E8E8),
            },
        }
    }

    pub fn axis(&self, axis: Axis) -> Color {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }
}

use axisview_common::Color;
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// Position plus straight (non-premultiplied) RGBA color.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ColorVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl ColorVertex {
    pub fn new(position: Vec3, color: Color) -> Self {
        Self {
            position: position.to_array(),
            color: color.to_array(),
        }
    }
}

/// Which typeface a [`WorldText`] wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    /// Axis captions in the host's default face.
    Label,
    /// Toolbar captions in the loaded toolbar font.
    Caption,
}

/// Text anchored at a world point, drawn by the host over the 3D frame.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldText {
    pub text: String,
    pub position: Vec3,
    pub color: Color,
    /// Glyph height on screen, in pixels.
    pub pixel_height: f32,
    pub style: TextStyle,
}

/// Everything needed to draw one frame.
///
/// `lines` and `opaque` are line and triangle lists drawn with depth writes;
/// `translucent` triangles are drawn afterwards with alpha blending.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameGeometry {
    pub clear: Color,
    pub view_projection: Mat4,
    pub lines: Vec<ColorVertex>,
    pub opaque: Vec<ColorVertex>,
    pub translucent: Vec<ColorVertex>,
    pub texts: Vec<WorldText>,
}

impl FrameGeometry {
    pub fn push_line(&mut self, a: Vec3, b: Vec3, color: Color) {
        self.lines.push(ColorVertex::new(a, color));
        self.lines.push(ColorVertex::new(b, color));
    }

    /// Two triangles over `corners`, given in winding order.
    pub fn push_quad(&mut self, corners: [Vec3; 4], color: Color) {
        let out = if color.a < 1.0 {
            &mut self.translucent
        } else {
            &mut self.opaque
        };
        for i in [0, 1, 2, 2, 3, 0] {
            out.push(ColorVertex::new(corners[i], color));
        }
    }

    /// Unit-sized cube transformed by `model`.
    pub fn push_cube(&mut self, model: Mat4, size: f32, color: Color) {
        let h = size / 2.0;
        let p = |x: f32, y: f32, z: f32| model.transform_point3(Vec3::new(x * h, y * h, z * h));
        #[rustfmt::skip]
        let faces = [
            [p(-1.0, -1.0,  1.0), p( 1.0, -1.0,  1.0), p( 1.0,  1.0,  1.0), p(-1.0,  1.0,  1.0)],
            [p( 1.0, -1.0, -1.0), p(-1.0, -1.0, -1.0), p(-1.0,  1.0, -1.0), p( 1.0,  1.0, -1.0)],
            [p( 1.0, -1.0,  1.0), p( 1.0, -1.0, -1.0), p( 1.0,  1.0, -1.0), p( 1.0,  1.0,  1.0)],
            [p(-1.0, -1.0, -1.0), p(-1.0, -1.0,  1.0), p(-1.0,  1.0,  1.0), p(-1.0,  1.0, -1.0)],
            [p(-1.0,  1.0,  1.0), p( 1.0,  1.0,  1.0), p( 1.0,  1.0, -1.0), p(-1.0,  1.0, -1.0)],
            [p(-1.0, -1.0, -1.0), p( 1.0, -1.0, -1.0), p( 1.0, -1.0,  1.0), p(-1.0, -1.0,  1.0)],
        ];
        for face in faces {
            self.push_quad(face, color);
        }
    }

    pub fn triangle_count(&self) -> usize {
        (self.opaque.len() + self.translucent.len()) / 3
    }

    pub fn line_count(&self) -> usize {
        self.lines.len() / 2
    }
}

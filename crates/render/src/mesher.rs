use crate::geometry::{FrameGeometry, TextStyle, WorldText};
use crate::renderer::Renderer;
use axisview_camera::OrbitCamera;
use axisview_common::{Axis, Color, Theme};
use axisview_scene::{AxesIndicator, AxisScene, Toolbar};
use axisview_viewer::Viewer;
use glam::{EulerRot, Mat4, Vec3};

/// Screen height of the floating axis captions.
const LABEL_PIXEL_HEIGHT: f32 = 18.0;

/// Turns viewer state into [`FrameGeometry`].
#[derive(Debug, Default)]
pub struct SceneMesher;

impl SceneMesher {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for SceneMesher {
    type Output = FrameGeometry;

    fn render(&self, viewer: &Viewer) -> FrameGeometry {
        let scene = viewer.scene();
        let camera = viewer.camera();
        let mut frame = FrameGeometry {
            clear: scene.background(),
            view_projection: camera.view_projection(),
            ..FrameGeometry::default()
        };

        mesh_axes(scene, &mut frame);
        mesh_marker(scene, &mut frame);
        if let (Some(toolbar), Some(transform)) = (viewer.toolbar(), viewer.toolbar_transform()) {
            mesh_toolbar(toolbar, transform, camera, viewer.viewport().y, &mut frame);
        }
        // Planes last so they blend over everything else.
        mesh_planes(scene, &mut frame);
        mesh_labels(scene, &mut frame);
        tracing::trace!(
            triangles = frame.triangle_count(),
            lines = frame.line_count(),
            texts = frame.texts.len(),
            "frame meshed"
        );
        frame
    }
}

fn mesh_planes(scene: &AxisScene, frame: &mut FrameGeometry) {
    for group in scene.groups().iter().filter(|g| g.visible) {
        let line_color = group.line_color.with_alpha(group.line_opacity);
        for (a, b) in group.grid_lines() {
            frame.push_line(a, b, line_color);
        }
        let plane = &group.plane;
        frame.push_quad(plane.corners(), plane.color.with_alpha(plane.opacity));
    }
}

fn mesh_axes(scene: &AxisScene, frame: &mut FrameGeometry) {
    let axes = scene.axes();
    for axis in Axis::ALL {
        let (a, b) = axes.segment(axis);
        frame.push_line(a, b, AxesIndicator::color(axis));
    }
}

fn mesh_marker(scene: &AxisScene, frame: &mut FrameGeometry) {
    let marker = scene.marker();
    if !marker.visible {
        return;
    }
    let model = Mat4::from_euler(EulerRot::XYZ, marker.rotation.x, marker.rotation.y, 0.0);
    frame.push_cube(model, marker.size, marker.color);
}

fn mesh_labels(scene: &AxisScene, frame: &mut FrameGeometry) {
    let color = match scene.theme() {
        Theme::Light => Color::BLACK,
        Theme::Dark => Color::WHITE,
    };
    for label in scene.labels().iter().filter(|l| l.visible) {
        frame.texts.push(WorldText {
            text: label.text.clone(),
            position: label.position,
            color,
            pixel_height: LABEL_PIXEL_HEIGHT,
            style: TextStyle::Label,
        });
    }
}

fn mesh_toolbar(
    toolbar: &Toolbar,
    transform: Mat4,
    camera: &OrbitCamera,
    viewport_height: f32,
    frame: &mut FrameGeometry,
) {
    let layout = &toolbar.layout;
    let to_world = |p: Vec3| transform.transform_point3(p);
    let (hw, hh) = (layout.panel_width / 2.0, layout.panel_height / 2.0);

    let panel = [
        Vec3::new(-hw, -hh, 0.0),
        Vec3::new(hw, -hh, 0.0),
        Vec3::new(hw, hh, 0.0),
        Vec3::new(-hw, hh, 0.0),
    ];
    frame.push_quad(panel.map(to_world), toolbar.panel_color);

    for (a, b) in &toolbar.grid_lines {
        frame.push_line(to_world(*a), to_world(*b), toolbar.grid_color);
    }

    // World units per pixel at the panel's depth.
    let pixels_per_unit =
        viewport_height / (2.0 * (camera.fov / 2.0).tan() * layout.position.z.abs());
    for button in &toolbar.buttons {
        let (bw, bh) = (button.size.x / 2.0, button.size.y / 2.0);
        let c = button.center;
        let quad = [
            c + Vec3::new(-bw, -bh, 0.0),
            c + Vec3::new(bw, -bh, 0.0),
            c + Vec3::new(bw, bh, 0.0),
            c + Vec3::new(-bw, bh, 0.0),
        ];
        frame.push_quad(quad.map(to_world), button.color);
        frame.texts.push(WorldText {
            text: button.name.clone(),
            position: to_world(c),
            color: button.caption_color,
            pixel_height: button.caption_size * pixels_per_unit,
            style: TextStyle::Caption,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axisview_common::ViewerConfig;
    use axisview_scene::Font;

    fn viewer(config: ViewerConfig) -> Viewer {
        Viewer::new(&config, 800, 600)
    }

    fn grid_line_count(v: &Viewer) -> usize {
        v.scene()
            .groups()
            .iter()
            .filter(|g| g.visible)
            .map(|g| g.grid_lines().len())
            .sum()
    }

    #[test]
    fn default_frame_has_planes_axes_and_labels() {
        let v = viewer(ViewerConfig::default());
        let frame = SceneMesher::new().render(&v);

        assert_eq!(frame.clear, v.scene().background());
        assert_eq!(frame.translucent.len(), 3 * 6);
        assert!(frame.opaque.is_empty());
        assert_eq!(frame.line_count(), 3 + grid_line_count(&v));
        let texts: Vec<_> = frame.texts.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["X", "Y", "Z"]);
    }

    #[test]
    fn locked_view_drops_hidden_groups_and_label() {
        let mut v = viewer(ViewerConfig::default());
        let p = v.camera().project(Vec3::new(0.0, 2.0, 3.0), v.viewport()).unwrap();
        v.pointer_down(p);
        v.pointer_up(p);

        let frame = SceneMesher::new().render(&v);
        assert_eq!(frame.translucent.len(), 6);
        assert_eq!(frame.texts.len(), 2);
        assert!(frame.texts.iter().all(|t| t.text != "X"));
    }

    #[test]
    fn marker_only_when_enabled() {
        let mut config = ViewerConfig::default();
        assert!(SceneMesher::new().render(&viewer(config.clone())).opaque.is_empty());
        config.show_marker = true;
        let frame = SceneMesher::new().render(&viewer(config));
        assert_eq!(frame.opaque.len(), 36);
    }

    #[test]
    fn toolbar_sits_in_front_of_camera_with_captions() {
        let mut v = viewer(ViewerConfig::default());
        v.set_font(Font {
            name: "test".into(),
            data: std::sync::Arc::new(Vec::new()),
        });
        let frame = SceneMesher::new().render(&v);

        let captions: Vec<_> = frame
            .texts
            .iter()
            .filter(|t| t.style == TextStyle::Caption)
            .collect();
        assert_eq!(captions.len(), 3);
        for caption in captions {
            let depth = (caption.position - v.camera().position).dot(v.camera().forward());
            assert!((depth - 3.0).abs() < 0.05, "caption depth {depth}");
            let pixel = v.camera().project(caption.position, v.viewport()).unwrap();
            assert!(pixel.y > v.viewport().y / 2.0, "toolbar should sit low: {pixel}");
            assert!(caption.pixel_height > 0.0);
        }
        // Panel quad plus three black buttons.
        assert_eq!(frame.opaque.len() + frame.translucent.len(), (3 + 1 + 3) * 6);
    }

    #[test]
    fn dark_theme_switches_label_color() {
        let mut v = viewer(ViewerConfig::default());
        v.set_theme(Theme::Dark);
        let frame = SceneMesher::new().render(&v);
        assert!(frame.texts.iter().all(|t| t.color == Color::WHITE));
    }
}

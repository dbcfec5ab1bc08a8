use axisview_common::Axis;
use axisview_viewer::Viewer;
use std::fmt::Write;

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads viewer state and produces output. It never mutates
/// the viewer; state changes go through the viewer's event methods.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given viewer state.
    fn render(&self, viewer: &Viewer) -> Self::Output;
}

/// Human-readable dump of the viewer state.
///
/// Useful for CLI output, logging, and testing the render interface.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, viewer: &Viewer) -> String {
        let scene = viewer.scene();
        let camera = viewer.camera();
        let animator = viewer.animator().state();

        let mut out = String::new();
        let _ = writeln!(
            out,
            "=== Viewer (frame={}, theme={:?}, state={:?}) ===",
            viewer.frame_count(),
            scene.theme(),
            viewer.state()
        );
        let _ = writeln!(
            out,
            "Camera: eye=({:.2}, {:.2}, {:.2}) target=({:.2}, {:.2}, {:.2}) fov={:.0} aspect={:.3}",
            camera.position.x,
            camera.position.y,
            camera.position.z,
            camera.target.x,
            camera.target.y,
            camera.target.z,
            camera.fov.to_degrees(),
            camera.aspect
        );
        let _ = writeln!(
            out,
            "Transition: moving={} progress={:.2}",
            animator.moving, animator.progress
        );

        for axis in Axis::ALL {
            let group = scene.group(axis);
            let label = scene.label(axis);
            let _ = writeln!(
                out,
                "  [{axis}] visible={} opacity={:.2} offset={:.3} label={}",
                group.visible,
                group.plane.opacity,
                group.plane.offset,
                if label.visible { "shown" } else { "hidden" }
            );
        }

        match viewer.toolbar() {
            Some(toolbar) => {
                let _ = writeln!(
                    out,
                    "Toolbar: {}x{} cells, {} buttons",
                    toolbar.layout.cols,
                    toolbar.layout.rows,
                    toolbar.buttons.len()
                );
            }
            None => out.push_str("Toolbar: not built\n"),
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axisview_common::ViewerConfig;

    #[test]
    fn debug_renderer_fresh_viewer() {
        let viewer = Viewer::new(&ViewerConfig::default(), 800, 600);
        let output = DebugTextRenderer::new().render(&viewer);

        assert!(output.contains("frame=0"));
        assert!(output.contains("state=Idle"));
        assert!(output.contains("fov=75"));
        assert!(output.contains("[X] visible=true opacity=0.50"));
        assert!(output.contains("Toolbar: not built"));
    }

    #[test]
    fn debug_renderer_reports_toolbar_after_resize() {
        let mut viewer = Viewer::new(&ViewerConfig::default(), 800, 600);
        viewer.resize(1600, 900);
        viewer.frame();
        let output = DebugTextRenderer::new().render(&viewer);

        assert!(output.contains("frame=1"));
        assert!(output.contains("Toolbar: 17x2 cells, 0 buttons"));
    }
}

use axisview_camera::{CameraAnimator, OrbitCamera, OrbitControls, TickOutcome};
use axisview_common::{Theme, ViewerConfig};
use axisview_input::{
    Action, InteractionContext, InteractionController, InteractionState, PointerEvent,
};
use axisview_scene::{AxisScene, Font, FontError, Toolbar};
use glam::{Mat4, Vec2};

/// What one frame did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    pub frame: u64,
    pub transition: TickOutcome,
    pub controls_moved: bool,
}

/// Owns the scene, camera, controls, animator and pointer interaction.
///
/// Hosts forward window events to the `pointer_*`, `wheel`, `resize` and
/// theme methods and call [`Viewer::frame`] once per rendered frame.
pub struct Viewer {
    scene: AxisScene,
    camera: OrbitCamera,
    controls: OrbitControls,
    animator: CameraAnimator,
    interaction: InteractionController,
    toolbar: Option<Toolbar>,
    font: Option<Font>,
    viewport: Vec2,
    last_pointer: Vec2,
    frame: u64,
}

impl Viewer {
    pub fn new(config: &ViewerConfig, width: u32, height: u32) -> Self {
        let viewport = Vec2::new(width.max(1) as f32, height.max(1) as f32);
        let mut scene = AxisScene::new(config.reference_size, config.show_marker);
        scene.apply_theme(Theme::from_dark_flag(config.dark_theme));

        Self {
            scene,
            camera: OrbitCamera::for_aspect(viewport.x / viewport.y),
            controls: OrbitControls::new(),
            animator: CameraAnimator::default(),
            interaction: InteractionController::default(),
            toolbar: None,
            font: None,
            viewport,
            last_pointer: Vec2::ZERO,
            frame: 0,
        }
    }

    pub fn scene(&self) -> &AxisScene {
        &self.scene
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn animator(&self) -> &CameraAnimator {
        &self.animator
    }

    pub fn interaction(&self) -> &InteractionController {
        &self.interaction
    }

    pub fn state(&self) -> InteractionState {
        self.interaction.state()
    }

    pub fn toolbar(&self) -> Option<&Toolbar> {
        self.toolbar.as_ref()
    }

    pub fn font(&self) -> Option<&Font> {
        self.font.as_ref()
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    pub fn theme(&self) -> Theme {
        self.scene.theme()
    }

    fn context(&mut self) -> (&mut InteractionController, InteractionContext<'_>) {
        (
            &mut self.interaction,
            InteractionContext {
                scene: &mut self.scene,
                camera: &self.camera,
                animator: &mut self.animator,
                viewport: self.viewport,
            },
        )
    }

    pub fn handle(&mut self, event: PointerEvent) -> Action {
        match event {
            PointerEvent::Down(p) => self.pointer_down(p),
            PointerEvent::Move(p) => self.pointer_move(p),
            PointerEvent::Up(p) => self.pointer_up(p),
        }
    }

    pub fn pointer_down(&mut self, position: Vec2) -> Action {
        self.last_pointer = position;
        self.interaction.pointer_down(position)
    }

    /// Moves below the drag threshold never reach the orbit controls, so a
    /// jittery click still lands exactly on its locked pose.
    pub fn pointer_move(&mut self, position: Vec2) -> Action {
        let delta = position - self.last_pointer;
        self.last_pointer = position;
        let (interaction, mut ctx) = self.context();
        let action = interaction.pointer_move(position, &mut ctx);
        if self.interaction.session().dragging {
            self.controls.rotate(delta.x, delta.y, self.viewport.y);
        }
        action
    }

    pub fn pointer_up(&mut self, position: Vec2) -> Action {
        self.last_pointer = position;
        let (interaction, mut ctx) = self.context();
        let action = interaction.pointer_up(position, &mut ctx);
        if let Action::Lock { .. } = action {
            // Leftover drag momentum would pull the camera off the locked pose.
            self.controls.stop();
        }
        action
    }

    /// Wheel step; negative moves closer.
    pub fn wheel(&mut self, delta: f32) {
        self.controls.zoom(delta);
    }

    pub fn unlock(&mut self) -> Action {
        self.interaction.unlock(&mut self.scene)
    }

    /// Reflow for a new window size: projection, viewport and toolbar.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = Vec2::new(width.max(1) as f32, height.max(1) as f32);
        self.camera.set_aspect(self.viewport.x, self.viewport.y);
        self.rebuild_toolbar();
        tracing::debug!(width, height, "viewer resized");
    }

    /// Install the loaded toolbar font and build the toolbar with it.
    pub fn set_font(&mut self, font: Font) {
        tracing::info!(font = %font.name, "toolbar font ready");
        self.font = Some(font);
        self.rebuild_toolbar();
    }

    /// Record a failed font load. The toolbar stays without buttons.
    pub fn font_failed(&mut self, err: &FontError) {
        tracing::warn!("toolbar font unavailable: {err}");
    }

    fn rebuild_toolbar(&mut self) {
        self.toolbar = Some(Toolbar::build(
            self.camera.aspect,
            self.camera.fov,
            self.font.as_ref(),
        ));
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.scene.apply_theme(theme);
        tracing::info!(?theme, "theme applied");
    }

    pub fn toggle_theme(&mut self) {
        self.set_theme(self.scene.theme().toggled());
    }

    /// Camera-docked toolbar transform (toolbar space to world space).
    pub fn toolbar_transform(&self) -> Option<Mat4> {
        let toolbar = self.toolbar.as_ref()?;
        Some(self.camera.world_from_camera() * Mat4::from_translation(toolbar.layout.position))
    }

    /// Advance one frame: marker spin, then the camera transition, then
    /// control damping. Rendering follows, so it sees this frame's pose.
    pub fn frame(&mut self) -> FrameReport {
        self.frame += 1;
        self.scene.marker_mut().spin();
        let transition = self.animator.tick(&mut self.camera);
        let controls_moved = self.controls.update(&mut self.camera);
        FrameReport {
            frame: self.frame,
            transition,
            controls_moved,
        }
    }

    /// Run frames until the camera transition and the controls are at rest.
    /// Returns the number of frames run; gives up after `max_frames`.
    pub fn settle(&mut self, max_frames: u64) -> u64 {
        let mut frames = 0;
        while frames < max_frames && (self.animator.is_moving() || !self.controls.is_settled()) {
            self.frame();
            frames += 1;
        }
        frames
    }
}

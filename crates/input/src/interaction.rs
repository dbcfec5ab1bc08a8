use crate::action::{Action, PointerEvent};
use crate::session::PointerSession;
use axisview_camera::{CameraAnimator, CameraPose, OrbitCamera};
use axisview_common::Axis;
use axisview_scene::{AxisScene, hover_opacity};
use glam::{Vec2, Vec3};

/// Distance of the canonical axis-aligned viewing poses from the origin.
pub const DEFAULT_VIEW_DISTANCE: f32 = 10.0;
/// How far a clicked plane is pushed back along its normal.
pub const PRESS_DEPTH: f32 = 0.01;

/// Coarse interaction state, for display and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionState {
    Idle,
    PressedNotDragging,
    Dragging,
    Locked(Axis),
}

/// Everything a pointer event may read or change.
pub struct InteractionContext<'a> {
    pub scene: &'a mut AxisScene,
    pub camera: &'a OrbitCamera,
    pub animator: &'a mut CameraAnimator,
    /// Window size in pixels.
    pub viewport: Vec2,
}

/// Hover, click-to-lock and drag handling for the three axis planes.
#[derive(Debug, Clone)]
pub struct InteractionController {
    session: PointerSession,
    locked: Option<Axis>,
    view_distance: f32,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new(DEFAULT_VIEW_DISTANCE)
    }
}

impl InteractionController {
    pub fn new(view_distance: f32) -> Self {
        Self {
            session: PointerSession::default(),
            locked: None,
            view_distance,
        }
    }

    pub fn session(&self) -> &PointerSession {
        &self.session
    }

    pub fn locked(&self) -> Option<Axis> {
        self.locked
    }

    pub fn hovered(&self) -> Option<Axis> {
        self.session.hovered
    }

    pub fn state(&self) -> InteractionState {
        if self.session.dragging {
            InteractionState::Dragging
        } else if self.session.button_down {
            InteractionState::PressedNotDragging
        } else if let Some(axis) = self.locked {
            InteractionState::Locked(axis)
        } else {
            InteractionState::Idle
        }
    }

    /// Positive-side viewing pose for `axis`.
    pub fn canonical_pose(&self, axis: Axis) -> CameraPose {
        CameraPose::new(axis.unit() * self.view_distance, Vec3::ZERO)
    }

    pub fn handle(&mut self, event: PointerEvent, ctx: &mut InteractionContext<'_>) -> Action {
        match event {
            PointerEvent::Down(p) => self.pointer_down(p),
            PointerEvent::Move(p) => self.pointer_move(p, ctx),
            PointerEvent::Up(p) => self.pointer_up(p, ctx),
        }
    }

    pub fn pointer_down(&mut self, position: Vec2) -> Action {
        self.session.press(position);
        Action::Press
    }

    pub fn pointer_move(&mut self, position: Vec2, ctx: &mut InteractionContext<'_>) -> Action {
        if self.session.button_down {
            let started = self.session.track(position);
            if self.session.dragging {
                if started {
                    tracing::debug!(?position, "drag started");
                }
                if self.locked.take().is_some() {
                    tracing::info!("view unlocked by drag");
                }
                ctx.scene.reset_presentation();
                return if started {
                    Action::DragStarted
                } else {
                    Action::Dragging
                };
            }
        }

        if self.locked.is_some() {
            return Action::Noop;
        }
        self.update_hover(position, ctx)
    }

    pub fn pointer_up(&mut self, position: Vec2, ctx: &mut InteractionContext<'_>) -> Action {
        let was_dragging = self.session.release();
        if was_dragging || self.locked.is_some() {
            return Action::Noop;
        }
        self.click(position, ctx)
    }

    /// Leave the locked view, restoring labels, grids and plane positions.
    pub fn unlock(&mut self, scene: &mut AxisScene) -> Action {
        if self.locked.take().is_none() {
            return Action::Noop;
        }
        scene.reset_presentation();
        tracing::info!("view unlocked");
        Action::Unlock
    }

    fn pick(&self, position: Vec2, ctx: &InteractionContext<'_>) -> Option<Axis> {
        let ray = ctx.camera.screen_ray(position, ctx.viewport)?;
        ctx.scene.pick(&ray).map(|hit| hit.axis)
    }

    fn update_hover(&mut self, position: Vec2, ctx: &mut InteractionContext<'_>) -> Action {
        match self.pick(position, ctx) {
            Some(axis) => {
                if let Some(previous) = self.session.hovered {
                    if previous != axis {
                        ctx.scene.restore_plane_opacity(previous);
                    }
                }
                ctx.scene.set_plane_opacity(axis, hover_opacity());
                if self.session.hovered != Some(axis) {
                    tracing::debug!(%axis, "hover");
                }
                self.session.hovered = Some(axis);
                Action::Hover(axis)
            }
            None => match self.session.hovered.take() {
                Some(previous) => {
                    ctx.scene.restore_plane_opacity(previous);
                    Action::HoverCleared
                }
                None => Action::Noop,
            },
        }
    }

    fn click(&mut self, position: Vec2, ctx: &mut InteractionContext<'_>) -> Action {
        let Some(axis) = self.pick(position, ctx) else {
            return Action::Noop;
        };

        self.locked = Some(axis);
        if let Some(hovered) = self.session.hovered.take() {
            ctx.scene.restore_plane_opacity(hovered);
        }
        ctx.scene.set_label_visible(axis, false);
        for other in axis.others() {
            ctx.scene.set_group_visible(other, false);
        }

        let canonical = self.canonical_pose(axis);
        let pose = if axis.component(ctx.camera.position) > 0.0 {
            canonical
        } else {
            canonical.mirrored()
        };
        ctx.animator.request_transition(pose);

        let offset = ctx.scene.plane(axis).offset;
        ctx.scene.set_plane_offset(axis, offset - PRESS_DEPTH);

        tracing::info!(%axis, position = ?pose.position, "view locked");
        Action::Lock { axis, pose }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axisview_scene::PLANE_OPACITY;

    const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);
    const CENTER: Vec2 = Vec2::new(400.0, 300.0);

    struct Rig {
        scene: AxisScene,
        camera: OrbitCamera,
        animator: CameraAnimator,
        controller: InteractionController,
    }

    impl Rig {
        fn new(camera: OrbitCamera) -> Self {
            Self {
                scene: AxisScene::new(10.0, false),
                camera: OrbitCamera {
                    aspect: VIEWPORT.x / VIEWPORT.y,
                    ..camera
                },
                animator: CameraAnimator::default(),
                controller: InteractionController::default(),
            }
        }

        /// Camera on the given side of the X plane, looking straight at it.
        fn facing_x_plane(x: f32) -> Self {
            Self::new(OrbitCamera {
                position: Vec3::new(x, 1.0, 2.0),
                target: Vec3::new(0.0, 1.0, 2.0),
                ..OrbitCamera::default()
            })
        }

        /// Camera looking away from every plane.
        fn facing_away() -> Self {
            Self::new(OrbitCamera {
                position: Vec3::splat(20.0),
                target: Vec3::splat(40.0),
                ..OrbitCamera::default()
            })
        }

        fn send(&mut self, event: PointerEvent) -> Action {
            let mut ctx = InteractionContext {
                scene: &mut self.scene,
                camera: &self.camera,
                animator: &mut self.animator,
                viewport: VIEWPORT,
            };
            self.controller.handle(event, &mut ctx)
        }

        fn pixel_on(&self, world: Vec3) -> Vec2 {
            self.camera.project(world, VIEWPORT).unwrap()
        }

        fn hovered_planes(&self) -> Vec<Axis> {
            Axis::ALL
                .into_iter()
                .filter(|a| self.scene.plane(*a).opacity != PLANE_OPACITY)
                .collect()
        }

        fn assert_opacities_valid(&self) {
            for axis in Axis::ALL {
                let o = self.scene.plane(axis).opacity;
                assert!(o == PLANE_OPACITY || o == hover_opacity(), "bad opacity {o}");
            }
            assert!(self.hovered_planes().len() <= 1);
        }
    }

    #[test]
    fn starts_idle() {
        let rig = Rig::facing_away();
        assert_eq!(rig.controller.state(), InteractionState::Idle);
        assert_eq!(rig.controller.locked(), None);
    }

    #[test]
    fn click_on_empty_space_stays_idle() {
        let mut rig = Rig::facing_away();
        let p = Vec2::new(100.0, 100.0);
        assert_eq!(rig.send(PointerEvent::Down(p)), Action::Press);
        assert_eq!(rig.controller.state(), InteractionState::PressedNotDragging);
        assert_eq!(rig.send(PointerEvent::Up(p)), Action::Noop);

        assert_eq!(rig.controller.state(), InteractionState::Idle);
        assert!(!rig.animator.is_moving());
    }

    #[test]
    fn drag_resets_presentation_and_skips_click() {
        let mut rig = Rig::facing_x_plane(10.0);
        rig.scene.set_label_visible(Axis::Y, false);
        rig.scene.set_group_visible(Axis::Z, false);
        rig.scene.set_plane_offset(Axis::X, -0.01);

        rig.send(PointerEvent::Down(Vec2::new(100.0, 100.0)));
        assert_eq!(rig.send(PointerEvent::Move(Vec2::new(150.0, 100.0))), Action::DragStarted);
        assert_eq!(rig.controller.state(), InteractionState::Dragging);
        for axis in Axis::ALL {
            assert!(rig.scene.label(axis).visible);
            assert!(rig.scene.group(axis).visible);
            assert_eq!(rig.scene.plane(axis).offset, 0.0);
        }

        // Releasing over the plane is not a click.
        assert_eq!(rig.send(PointerEvent::Up(CENTER)), Action::Noop);
        assert_eq!(rig.controller.state(), InteractionState::Idle);
        assert!(!rig.animator.is_moving());
    }

    #[test]
    fn drag_is_entered_once_and_held_until_release() {
        let mut rig = Rig::facing_away();
        rig.send(PointerEvent::Down(Vec2::new(100.0, 100.0)));
        assert_eq!(rig.send(PointerEvent::Move(Vec2::new(103.0, 100.0))), Action::Noop);
        assert_eq!(rig.send(PointerEvent::Move(Vec2::new(106.0, 100.0))), Action::DragStarted);
        assert_eq!(rig.send(PointerEvent::Move(Vec2::new(101.0, 100.0))), Action::Dragging);
        assert_eq!(rig.send(PointerEvent::Move(Vec2::new(300.0, 200.0))), Action::Dragging);
        assert_eq!(rig.controller.state(), InteractionState::Dragging);
        rig.send(PointerEvent::Up(Vec2::new(300.0, 200.0)));
        assert_eq!(rig.controller.state(), InteractionState::Idle);
    }

    #[test]
    fn jitter_within_threshold_still_clicks() {
        let mut rig = Rig::facing_x_plane(10.0);
        rig.send(PointerEvent::Down(CENTER));
        rig.send(PointerEvent::Move(CENTER + Vec2::new(3.0, 4.0)));
        assert_ne!(rig.controller.state(), InteractionState::Dragging);
        let action = rig.send(PointerEvent::Up(CENTER + Vec2::new(3.0, 4.0)));
        assert!(matches!(action, Action::Lock { axis: Axis::X, .. }));
    }

    #[test]
    fn click_on_x_plane_from_positive_side() {
        let mut rig = Rig::facing_x_plane(10.0);
        rig.send(PointerEvent::Move(CENTER));
        assert_eq!(rig.controller.hovered(), Some(Axis::X));

        rig.send(PointerEvent::Down(CENTER));
        let action = rig.send(PointerEvent::Up(CENTER));
        let expected = CameraPose::new(Vec3::new(10.0, 0.0, 0.0), Vec3::ZERO);
        assert_eq!(
            action,
            Action::Lock {
                axis: Axis::X,
                pose: expected
            }
        );

        assert_eq!(rig.controller.state(), InteractionState::Locked(Axis::X));
        assert!(rig.animator.is_moving());
        assert_eq!(rig.animator.target(), expected);
        assert_eq!(rig.scene.plane(Axis::X).opacity, PLANE_OPACITY);
        assert_eq!(rig.controller.hovered(), None);
        assert!(!rig.scene.label(Axis::X).visible);
        assert!(rig.scene.label(Axis::Y).visible);
        assert!(rig.scene.group(Axis::X).visible);
        assert!(!rig.scene.group(Axis::Y).visible);
        assert!(!rig.scene.group(Axis::Z).visible);
        assert_eq!(rig.scene.plane(Axis::X).offset, -PRESS_DEPTH);
    }

    #[test]
    fn click_on_x_plane_from_negative_side_mirrors_pose() {
        let mut rig = Rig::facing_x_plane(-10.0);
        rig.send(PointerEvent::Down(CENTER));
        let action = rig.send(PointerEvent::Up(CENTER));
        let Action::Lock { axis, pose } = action else {
            panic!("expected lock, got {action:?}");
        };
        assert_eq!(axis, Axis::X);
        assert_eq!(pose.position, Vec3::new(-10.0, 0.0, 0.0));
        assert_eq!(pose.look_at, Vec3::ZERO);
    }

    #[test]
    fn click_locks_each_plane_from_either_side() {
        for axis in Axis::ALL {
            let (u, v) = axis.tangents();
            let in_plane = u.unit() * 1.0 + v.unit() * 2.0;
            for side in [1.0_f32, -1.0] {
                let mut rig = Rig::new(OrbitCamera {
                    position: in_plane + axis.unit() * 10.0 * side,
                    target: in_plane,
                    ..OrbitCamera::default()
                });
                rig.send(PointerEvent::Down(CENTER));
                let action = rig.send(PointerEvent::Up(CENTER));
                let Action::Lock { axis: locked, pose } = action else {
                    panic!("{axis} side {side}: expected lock, got {action:?}");
                };

                assert_eq!(locked, axis);
                assert_eq!(pose.position, axis.unit() * 10.0 * side, "{axis} side {side}");
                assert_eq!(pose.look_at, Vec3::ZERO);
                assert_eq!(rig.controller.state(), InteractionState::Locked(axis));

                assert!(!rig.scene.label(axis).visible);
                assert!(rig.scene.group(axis).visible);
                assert_eq!(rig.scene.plane(axis).offset, -PRESS_DEPTH);
                for other in axis.others() {
                    assert!(rig.scene.label(other).visible, "{other} label after {axis}");
                    assert!(!rig.scene.group(other).visible, "{other} group after {axis}");
                    assert_eq!(rig.scene.plane(other).offset, 0.0);
                }
            }
        }
    }

    #[test]
    fn click_on_y_plane_snaps_immediately() {
        let mut rig = Rig::new(OrbitCamera {
            position: Vec3::new(1.0, 10.0, 2.0),
            target: Vec3::new(1.0, 0.0, 2.0),
            ..OrbitCamera::default()
        });
        rig.send(PointerEvent::Down(CENTER));
        let action = rig.send(PointerEvent::Up(CENTER));
        assert!(matches!(action, Action::Lock { axis: Axis::Y, .. }));
        assert_eq!(rig.animator.state().progress, 1.0);
    }

    #[test]
    fn locked_view_ignores_hover_and_clicks() {
        let mut rig = Rig::facing_x_plane(10.0);
        rig.send(PointerEvent::Down(CENTER));
        rig.send(PointerEvent::Up(CENTER));
        assert_eq!(rig.controller.locked(), Some(Axis::X));

        assert_eq!(rig.send(PointerEvent::Move(CENTER)), Action::Noop);
        assert!(rig.hovered_planes().is_empty());

        rig.send(PointerEvent::Down(CENTER));
        assert_eq!(rig.send(PointerEvent::Up(CENTER)), Action::Noop);
        assert_eq!(rig.controller.locked(), Some(Axis::X));
    }

    #[test]
    fn drag_releases_lock() {
        let mut rig = Rig::facing_x_plane(10.0);
        rig.send(PointerEvent::Down(CENTER));
        rig.send(PointerEvent::Up(CENTER));

        rig.send(PointerEvent::Down(CENTER));
        rig.send(PointerEvent::Move(CENTER + Vec2::new(40.0, 0.0)));
        assert_eq!(rig.controller.locked(), None);
        assert!(rig.scene.label(Axis::X).visible);
        assert!(rig.scene.group(Axis::Y).visible);
        assert_eq!(rig.scene.plane(Axis::X).offset, 0.0);
    }

    #[test]
    fn explicit_unlock() {
        let mut rig = Rig::facing_x_plane(10.0);
        assert_eq!(rig.controller.unlock(&mut rig.scene), Action::Noop);

        rig.send(PointerEvent::Down(CENTER));
        rig.send(PointerEvent::Up(CENTER));
        assert_eq!(rig.controller.unlock(&mut rig.scene), Action::Unlock);
        assert_eq!(rig.controller.state(), InteractionState::Idle);
        assert!(rig.scene.group(Axis::Z).visible);
        assert!(rig.scene.label(Axis::X).visible);
    }

    #[test]
    fn hover_moves_between_planes() {
        let mut rig = Rig::new(OrbitCamera::default());
        let on_x = rig.pixel_on(Vec3::new(0.0, 2.0, 3.0));
        let on_z = rig.pixel_on(Vec3::new(3.0, 2.0, 0.0));

        assert_eq!(rig.send(PointerEvent::Move(on_x)), Action::Hover(Axis::X));
        assert_eq!(rig.hovered_planes(), [Axis::X]);
        rig.assert_opacities_valid();

        assert_eq!(rig.send(PointerEvent::Move(on_z)), Action::Hover(Axis::Z));
        assert_eq!(rig.hovered_planes(), [Axis::Z]);
        assert_eq!(rig.scene.plane(Axis::Z).opacity, hover_opacity());
        rig.assert_opacities_valid();
    }

    #[test]
    fn hover_clears_when_leaving_planes() {
        let mut rig = Rig::facing_x_plane(10.0);
        assert_eq!(rig.send(PointerEvent::Move(CENTER)), Action::Hover(Axis::X));
        assert_eq!(rig.send(PointerEvent::Move(Vec2::new(100.0, 100.0))), Action::HoverCleared);
        assert!(rig.hovered_planes().is_empty());
        assert_eq!(rig.send(PointerEvent::Move(Vec2::new(100.0, 100.0))), Action::Noop);
    }

    #[test]
    fn hover_is_suspended_while_dragging() {
        let mut rig = Rig::facing_x_plane(10.0);
        rig.send(PointerEvent::Down(Vec2::new(100.0, 100.0)));
        rig.send(PointerEvent::Move(Vec2::new(200.0, 100.0)));
        assert_eq!(rig.send(PointerEvent::Move(CENTER)), Action::Dragging);
        assert!(rig.hovered_planes().is_empty());
    }

    #[test]
    fn opacity_invariant_over_random_walk() {
        let mut rig = Rig::new(OrbitCamera::default());
        let mut p = Vec2::new(13.0, 7.0);
        for i in 0..400 {
            // Deterministic scribble across the viewport.
            p = Vec2::new((p.x * 1.7 + 97.0) % 800.0, (p.y * 1.3 + 61.0) % 600.0);
            let event = match i % 25 {
                0 => PointerEvent::Down(p),
                3 => PointerEvent::Up(p),
                _ => PointerEvent::Move(p),
            };
            rig.send(event);
            rig.assert_opacities_valid();
            if rig.controller.locked().is_some() {
                rig.controller.unlock(&mut rig.scene);
            }
        }
    }
}

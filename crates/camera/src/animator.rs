//! Camera fly-to animation.
//!
//! A transition first heads for an overshoot point slightly inside the
//! target (along the same direction), then settles onto the target. The orbit
//! focus eases toward the requested look-at independently of progress.

use crate::camera::OrbitCamera;
use glam::Vec3;

/// Where the camera should end up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
}

impl CameraPose {
    pub fn new(position: Vec3, look_at: Vec3) -> Self {
        Self { position, look_at }
    }

    /// Same look-at, position mirrored through the origin.
    pub fn mirrored(&self) -> Self {
        Self {
            position: -self.position,
            look_at: self.look_at,
        }
    }
}

/// Constants shaping a transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionTuning {
    /// Progress added per tick.
    pub step: f64,
    /// Overshoot point = target position × this.
    pub overshoot_factor: f32,
    /// Progress at which the motion switches from overshoot to target.
    pub overshoot_phase: f64,
    /// Multiplier turning phase progress into a lerp factor.
    pub phase_rate: f64,
    /// Per-tick lerp factor for the orbit focus.
    pub focus_smoothing: f32,
}

impl Default for TransitionTuning {
    fn default() -> Self {
        Self {
            step: 0.01,
            overshoot_factor: 0.98,
            overshoot_phase: 0.2,
            phase_rate: 2.0,
            focus_smoothing: 0.1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TransitionState {
    pub progress: f64,
    pub moving: bool,
}

/// Result of one animator tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Idle,
    Moving,
    /// This tick snapped the camera onto the target.
    Arrived,
}

#[derive(Debug, Clone)]
pub struct CameraAnimator {
    tuning: TransitionTuning,
    state: TransitionState,
    target: CameraPose,
    overshoot: Vec3,
}

impl Default for CameraAnimator {
    fn default() -> Self {
        Self::new(TransitionTuning::default())
    }
}

impl CameraAnimator {
    pub fn new(tuning: TransitionTuning) -> Self {
        Self {
            tuning,
            state: TransitionState::default(),
            target: CameraPose::new(Vec3::ZERO, Vec3::ZERO),
            overshoot: Vec3::ZERO,
        }
    }

    pub fn tuning(&self) -> &TransitionTuning {
        &self.tuning
    }

    pub fn state(&self) -> TransitionState {
        self.state
    }

    pub fn is_moving(&self) -> bool {
        self.state.moving
    }

    /// The pose of the current or most recent transition.
    pub fn target(&self) -> CameraPose {
        self.target
    }

    pub fn overshoot(&self) -> Vec3 {
        self.overshoot
    }

    /// Start a transition toward `pose`, replacing any transition in flight.
    ///
    /// Targets off the horizontal plane (nonzero Y) start at full progress,
    /// so the next tick lands them without the animated approach.
    pub fn request_transition(&mut self, pose: CameraPose) {
        self.overshoot = pose.position * self.tuning.overshoot_factor;
        self.target = pose;
        self.state.progress = if pose.position.y.abs() > 0.0 { 1.0 } else { 0.0 };
        self.state.moving = true;
        tracing::debug!(
            position = ?pose.position,
            look_at = ?pose.look_at,
            progress = self.state.progress,
            "camera transition requested"
        );
    }

    /// Advance one frame, moving `camera.position` and `camera.target`.
    pub fn tick(&mut self, camera: &mut OrbitCamera) -> TickOutcome {
        if !self.state.moving {
            return TickOutcome::Idle;
        }
        let t = &self.tuning;
        self.state.progress += t.step;
        let progress = self.state.progress;

        if progress < t.overshoot_phase {
            let factor = (progress * t.phase_rate) as f32;
            camera.position = camera.position.lerp(self.overshoot, factor);
        } else {
            let factor = ((progress - t.overshoot_phase) * t.phase_rate) as f32;
            camera.position = camera.position.lerp(self.target.position, factor);
        }
        camera.target = camera.target.lerp(self.target.look_at, t.focus_smoothing);

        if progress >= 1.0 {
            camera.position = self.target.position;
            camera.target = self.target.look_at;
            self.state.moving = false;
            tracing::debug!(position = ?camera.position, "camera transition finished");
            return TickOutcome::Arrived;
        }
        TickOutcome::Moving
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_rest(animator: &mut CameraAnimator, camera: &mut OrbitCamera) -> usize {
        let mut ticks = 0;
        loop {
            ticks += 1;
            match animator.tick(camera) {
                TickOutcome::Arrived => return ticks,
                TickOutcome::Moving => assert!(ticks < 1000, "transition never finished"),
                TickOutcome::Idle => panic!("animator went idle without arriving"),
            }
        }
    }

    #[test]
    fn idle_animator_does_nothing() {
        let mut animator = CameraAnimator::default();
        let mut cam = OrbitCamera::default();
        assert_eq!(animator.tick(&mut cam), TickOutcome::Idle);
        assert_eq!(cam.position, Vec3::splat(10.0));
    }

    #[test]
    fn horizontal_target_animates_for_a_hundred_ticks() {
        let mut animator = CameraAnimator::default();
        let mut cam = OrbitCamera::default();
        let pose = CameraPose::new(Vec3::new(10.0, 0.0, 0.0), Vec3::ZERO);

        animator.request_transition(pose);
        assert_eq!(animator.state().progress, 0.0);
        assert!(animator.is_moving());
        assert!((animator.overshoot() - Vec3::new(9.8, 0.0, 0.0)).length() < 1e-5);

        let ticks = run_to_rest(&mut animator, &mut cam);
        assert_eq!(ticks, 100);
        assert_eq!(cam.position, pose.position);
        assert_eq!(cam.target, pose.look_at);
        assert!(!animator.is_moving());
    }

    #[test]
    fn vertical_target_snaps_on_first_tick() {
        let mut animator = CameraAnimator::default();
        let mut cam = OrbitCamera::default();
        let pose = CameraPose::new(Vec3::new(0.0, -10.0, 0.0), Vec3::ZERO);

        animator.request_transition(pose);
        assert_eq!(animator.state().progress, 1.0);
        assert_eq!(animator.tick(&mut cam), TickOutcome::Arrived);
        assert_eq!(cam.position, pose.position);
    }

    #[test]
    fn first_phase_heads_for_overshoot() {
        let mut animator = CameraAnimator::default();
        let mut cam = OrbitCamera {
            position: Vec3::new(0.0, 0.0, 20.0),
            ..OrbitCamera::default()
        };
        animator.request_transition(CameraPose::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO));

        for _ in 0..19 {
            assert_eq!(animator.tick(&mut cam), TickOutcome::Moving);
        }
        // Approaching the overshoot point (z = 9.8) from z = 20.
        assert!(cam.position.z < 20.0 && cam.position.z > 9.8);
    }

    #[test]
    fn focus_eases_toward_look_at() {
        let mut animator = CameraAnimator::default();
        let mut cam = OrbitCamera {
            target: Vec3::new(1.0, 0.0, 0.0),
            ..OrbitCamera::default()
        };
        animator.request_transition(CameraPose::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO));
        animator.tick(&mut cam);
        assert!((cam.target.x - 0.9).abs() < 1e-6);
    }

    #[test]
    fn new_request_replaces_transition_in_flight() {
        let mut animator = CameraAnimator::default();
        let mut cam = OrbitCamera::default();
        animator.request_transition(CameraPose::new(Vec3::new(10.0, 0.0, 0.0), Vec3::ZERO));
        for _ in 0..50 {
            animator.tick(&mut cam);
        }
        let second = CameraPose::new(Vec3::new(0.0, 0.0, -10.0), Vec3::ZERO);
        animator.request_transition(second);
        assert_eq!(animator.state().progress, 0.0);

        let ticks = run_to_rest(&mut animator, &mut cam);
        assert_eq!(ticks, 100);
        assert_eq!(cam.position, second.position);
    }

    #[test]
    fn mirrored_pose_keeps_look_at() {
        let pose = CameraPose::new(Vec3::new(10.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
        let m = pose.mirrored();
        assert_eq!(m.position, Vec3::new(-10.0, 0.0, 0.0));
        assert_eq!(m.look_at, pose.look_at);
    }
}

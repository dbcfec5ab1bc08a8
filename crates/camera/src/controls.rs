use crate::camera::OrbitCamera;
use glam::Vec3;
use std::f32::consts::{PI, TAU};

const PHI_EPS: f32 = 1e-6;
/// Deltas below this are treated as settled.
const SETTLE_EPS: f32 = 1e-6;

/// Damped orbit controls. Drags and wheel steps accumulate into a pending
/// delta that `update` applies once per frame, decaying it when damping is on.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitControls {
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    theta_delta: f32,
    phi_delta: f32,
    scale: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            enable_damping: true,
            damping_factor: 0.05,
            min_distance: 1.0,
            max_distance: 50.0,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            theta_delta: 0.0,
            phi_delta: 0.0,
            scale: 1.0,
        }
    }
}

impl OrbitControls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an orbit from a pointer drag of (`dx`, `dy`) pixels.
    pub fn rotate(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        let h = viewport_height.max(1.0);
        self.theta_delta -= TAU * dx / h * self.rotate_speed;
        self.phi_delta -= TAU * dy / h * self.rotate_speed;
    }

    /// Queue a dolly from a wheel step. Negative `delta` moves closer.
    pub fn zoom(&mut self, delta: f32) {
        let step = 0.95_f32.powf(self.zoom_speed);
        if delta < 0.0 {
            self.scale *= step;
        } else if delta > 0.0 {
            self.scale /= step;
        }
    }

    /// Drop any pending motion, leaving the camera where it is.
    pub fn stop(&mut self) {
        self.theta_delta = 0.0;
        self.phi_delta = 0.0;
        self.scale = 1.0;
    }

    pub fn is_settled(&self) -> bool {
        self.theta_delta.abs() < SETTLE_EPS
            && self.phi_delta.abs() < SETTLE_EPS
            && (self.scale - 1.0).abs() < SETTLE_EPS
    }

    /// Apply pending motion to `camera`. Returns whether the camera moved.
    ///
    /// A settled controller leaves the camera untouched, so a pose written by
    /// the animator survives exactly.
    pub fn update(&mut self, camera: &mut OrbitCamera) -> bool {
        if self.is_settled() {
            self.stop();
            return false;
        }

        let offset = camera.position - camera.target;
        let mut radius = offset.length();
        let (mut theta, mut phi) = if radius == 0.0 {
            (0.0, PI / 2.0)
        } else {
            (
                offset.x.atan2(offset.z),
                (offset.y / radius).clamp(-1.0, 1.0).acos(),
            )
        };

        let k = if self.enable_damping {
            self.damping_factor
        } else {
            1.0
        };
        theta += self.theta_delta * k;
        phi += self.phi_delta * k;
        phi = phi.clamp(PHI_EPS, PI - PHI_EPS);

        radius = (radius * self.scale).clamp(self.min_distance, self.max_distance);

        let offset = Vec3::new(
            radius * phi.sin() * theta.sin(),
            radius * phi.cos(),
            radius * phi.sin() * theta.cos(),
        );
        camera.position = camera.target + offset;

        if self.enable_damping {
            self.theta_delta *= 1.0 - self.damping_factor;
            self.phi_delta *= 1.0 - self.damping_factor;
        } else {
            self.theta_delta = 0.0;
            self.phi_delta = 0.0;
        }
        self.scale = 1.0;
        true
    }
}

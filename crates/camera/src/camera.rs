use axisview_common::Ray;
use glam::{Mat4, Vec2, Vec3, Vec4Swizzles};

/// Perspective camera orbiting a focus point.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    pub position: Vec3,
    /// Orbit focus; the camera always looks at it.
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            position: Vec3::splat(10.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov: 75.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 50.0,
        }
    }
}

impl OrbitCamera {
    /// Start position for a viewport: wide screens sit closer.
    pub fn for_aspect(aspect: f32) -> Self {
        let distance = if aspect > 1.0 { 10.0 } else { 15.0 };
        Self {
            position: Vec3::splat(distance),
            aspect,
            ..Self::default()
        }
    }

    pub fn set_aspect(&mut self, width: f32, height: f32) {
        self.aspect = width / height.max(1.0);
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.position)
            .try_normalize()
            .unwrap_or(Vec3::NEG_Z)
    }

    pub fn view_matrix(&self) -> Mat4 {
        // Looking straight along `up` leaves the roll undefined; nudge the
        // view direction so the basis stays well-formed.
        let mut back = self.position - self.target;
        if back.length_squared() == 0.0 {
            back = Vec3::Z;
        }
        if self.up.cross(back.normalize()).length_squared() < 1e-12 {
            if self.up.z.abs() == 1.0 {
                back.x += 1e-4;
            } else {
                back.z += 1e-4;
            }
        }
        Mat4::look_at_rh(self.position, self.position - back, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Camera-to-world transform, for content docked in camera space.
    pub fn world_from_camera(&self) -> Mat4 {
        self.view_matrix().inverse()
    }

    /// Convert a pixel position (origin top-left) to normalized device
    /// coordinates. `None` for an empty viewport.
    pub fn screen_to_ndc(screen: Vec2, viewport: Vec2) -> Option<Vec2> {
        if viewport.x <= 0.0 || viewport.y <= 0.0 {
            return None;
        }
        Some(Vec2::new(
            (screen.x / viewport.x) * 2.0 - 1.0,
            -(screen.y / viewport.y) * 2.0 + 1.0,
        ))
    }

    /// Ray from the eye through a pixel.
    pub fn screen_ray(&self, screen: Vec2, viewport: Vec2) -> Option<Ray> {
        let ndc = Self::screen_to_ndc(screen, viewport)?;
        let inverse = self.view_projection().inverse();
        let far = inverse * ndc.extend(1.0).extend(1.0);
        if far.w == 0.0 {
            return None;
        }
        let far = far.xyz() / far.w;
        Ray::new(self.position, far - self.position)
    }

    /// Project a world point to pixels (origin top-left). `None` when the
    /// point is behind the camera.
    pub fn project(&self, world: Vec3, viewport: Vec2) -> Option<Vec2> {
        let clip = self.view_projection() * world.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.xy() / clip.w;
        Some(Vec2::new(
            (ndc.x + 1.0) / 2.0 * viewport.x,
            (1.0 - ndc.y) / 2.0 * viewport.y,
        ))
    }
}

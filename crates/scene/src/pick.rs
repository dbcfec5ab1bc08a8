use crate::builder::AxisPlane;
use axisview_common::{Axis, Ray};
use glam::Vec3;

/// A ray/plane intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneHit {
    pub axis: Axis,
    /// Distance along the ray.
    pub distance: f32,
    pub point: Vec3,
}

/// Intersect `ray` with the finite square `plane`. Both faces are hit.
pub fn intersect_plane(ray: &Ray, plane: &AxisPlane) -> Option<PlaneHit> {
    let axis = plane.axis;
    let denom = axis.component(ray.direction);
    if denom.abs() < f32::EPSILON {
        return None;
    }
    let t = (plane.offset - axis.component(ray.origin)) / denom;
    if !t.is_finite() || t < 0.0 {
        return None;
    }

    let point = ray.at(t);
    let half = plane.size / 2.0;
    let (u, v) = axis.tangents();
    if u.component(point).abs() > half || v.component(point).abs() > half {
        return None;
    }

    Some(PlaneHit {
        axis,
        distance: t,
        point,
    })
}

/// Nearest hit among `planes`.
pub fn pick_nearest<'a>(ray: &Ray, planes: impl IntoIterator<Item = &'a AxisPlane>) -> Option<PlaneHit> {
    planes
        .into_iter()
        .filter_map(|plane| intersect_plane(ray, plane))
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

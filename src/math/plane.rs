use glam::Vec3;

use super::Ray;

/// `|n · d|` below this treats the ray as parallel to the plane.
const PARALLEL_EPSILON: f32 = 1e-6;

/// Infinite plane `n · p = d`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Unit normal.
    pub normal: Vec3,
    /// Signed distance from the origin along `normal`.
    pub distance: f32,
}

impl Plane {
    /// Plane through `point` with the given normal. Returns `None` when
    /// `normal` has no direction.
    pub fn from_point_normal(point: Vec3, normal: Vec3) -> Option<Self> {
        let normal = normal.try_normalize()?;
        Some(Self {
            normal,
            distance: normal.dot(point),
        })
    }

    /// Point where `ray` crosses the plane, if it does so in front of the
    /// origin.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<Vec3> {
        let denom = self.normal.dot(ray.direction);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }
        let t = (self.distance - self.normal.dot(ray.origin)) / denom;
        (t >= 0.0).then(|| ray.point_at(t))
    }
}

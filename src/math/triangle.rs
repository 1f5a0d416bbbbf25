use glam::Vec3;

use super::Ray;

/// `|edge1 · (d × edge2)|` below this means the ray runs parallel to the
/// triangle plane.
pub const PARALLEL_EPSILON: f32 = 1e-6;

/// Hits closer than this to the ray origin are discarded to avoid
/// self-intersection.
pub const MIN_HIT_DISTANCE: f32 = 1e-4;

/// A triangle in mesh-local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// First vertex.
    pub v0: Vec3,
    /// Second vertex.
    pub v1: Vec3,
    /// Third vertex.
    pub v2: Vec3,
}

impl Triangle {
    /// Triangle from three vertices.
    pub const fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        Self { v0, v1, v2 }
    }

    /// Unnormalized face normal (`edge1 × edge2`); its length is twice the
    /// area.
    pub fn scaled_normal(&self) -> Vec3 {
        (self.v1 - self.v0).cross(self.v2 - self.v0)
    }

    /// Möller–Trumbore ray–triangle intersection.
    ///
    /// Returns the distance along `ray` to the hit, or `None` when the ray
    /// is parallel to the plane, passes outside the barycentric bounds, or
    /// the hit lies within [`MIN_HIT_DISTANCE`] of (or behind) the origin.
    /// Degenerate triangles fall out through the parallel check.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;
        let h = ray.direction.cross(edge2);
        let a = edge1.dot(h);
        if a.abs() < PARALLEL_EPSILON {
            return None;
        }

        let f = 1.0 / a;
        let s = ray.origin - self.v0;
        let u = f * s.dot(h);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = f * ray.direction.dot(q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * edge2.dot(q);
        (t > MIN_HIT_DISTANCE).then_some(t)
    }
}

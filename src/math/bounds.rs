use glam::{Mat4, Vec3};

use super::Ray;

/// Sphere enclosing a mesh, used to prune picking candidates before the
/// per-triangle test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    /// Center (local space when owned by a mesh).
    pub center: Vec3,
    /// Radius, never negative.
    pub radius: f32,
}

impl BoundingSphere {
    /// Zero-radius sphere at the origin. Meshes without vertices get this,
    /// which leaves them unpickable.
    pub const EMPTY: Self = Self {
        center: Vec3::ZERO,
        radius: 0.0,
    };

    /// Centroid of `points` plus the largest distance from it.
    pub fn from_points(points: &[Vec3]) -> Self {
        if points.is_empty() {
            return Self::EMPTY;
        }
        let centroid =
            points.iter().copied().sum::<Vec3>() / points.len() as f32;
        let radius = points
            .iter()
            .map(|p| p.distance(centroid))
            .fold(0.0_f32, f32::max);
        Self {
            center: centroid,
            radius,
        }
    }

    /// World-space copy under `model`.
    ///
    /// The radius grows by the largest absolute scale component. Under
    /// non-uniform scale this over-approximates, which only costs a few
    /// extra triangle tests.
    pub fn transformed(&self, model: Mat4, scale: Vec3) -> Self {
        Self {
            center: model.transform_point3(self.center),
            radius: self.radius * scale.abs().max_element(),
        }
    }

    /// Whether the infinite line carrying `ray` passes within the sphere.
    ///
    /// Compares squared perpendicular distance against the squared radius;
    /// no square root.
    pub fn intersects_ray_line(&self, ray: &Ray) -> bool {
        let to_center = self.center - ray.origin;
        let along = to_center.dot(ray.direction);
        let distance_sq = to_center.length_squared() - along * along;
        distance_sq <= self.radius * self.radius
    }

    /// Distance along `ray` to the first surface crossing at or in front of
    /// the origin, or `None` if the ray misses. A ray starting inside the
    /// sphere reports the exit point.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let offset = ray.origin - self.center;
        let b = offset.dot(ray.direction);
        let c = offset.length_squared() - self.radius * self.radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }
        let root = discriminant.sqrt();
        let near = -b - root;
        if near >= 0.0 {
            return Some(near);
        }
        let far = -b + root;
        (far >= 0.0).then_some(far)
    }
}

impl Default for BoundingSphere {
    fn default() -> Self {
        Self::EMPTY
    }
}

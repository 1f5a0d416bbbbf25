//! Rigid-body transform with a cached model matrix.

use glam::{Mat4, Quat, Vec3};

/// Position, orientation and scale of an entity.
///
/// Every mutator marks the cached model matrix dirty. The cache is only
/// refreshed by an explicit [`Transform::update_model_matrix`] call, which
/// the scene issues once per frame before picking.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    position: Vec3,
    rotation: Quat,
    scale: Vec3,
    model_matrix: Mat4,
    dirty: bool,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            model_matrix: Mat4::IDENTITY,
            dirty: false,
        }
    }
}

impl Transform {
    /// Transform at `position` with identity rotation and unit scale.
    pub fn from_translation(position: Vec3) -> Self {
        let mut transform = Self::default();
        transform.set_translation(position);
        transform.update_model_matrix();
        transform
    }

    /// World position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Orientation, always unit length.
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Per-axis scale.
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Cached model matrix. Stale if [`Self::is_dirty`] is true.
    pub fn model_matrix(&self) -> Mat4 {
        self.model_matrix
    }

    /// Whether a mutation happened since the last matrix refresh.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Move to `position`.
    pub fn set_translation(&mut self, position: Vec3) {
        self.position = position;
        self.dirty = true;
    }

    /// Move by `delta`.
    pub fn translate_by(&mut self, delta: Vec3) {
        self.position += delta;
        self.dirty = true;
    }

    /// Replace the orientation. The quaternion is renormalized; a
    /// degenerate one falls back to identity.
    pub fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = normalize_or_identity(rotation);
        self.dirty = true;
    }

    /// Left-multiply an axis-angle rotation (radians). A zero axis is
    /// ignored.
    pub fn rotate_by(&mut self, axis: Vec3, angle: f32) {
        let Some(axis) = axis.try_normalize() else {
            return;
        };
        self.rotate_by_quaternion(Quat::from_axis_angle(axis, angle));
    }

    /// Left-multiply `delta` onto the current orientation and renormalize.
    pub fn rotate_by_quaternion(&mut self, delta: Quat) {
        self.rotation = normalize_or_identity(delta * self.rotation);
        self.dirty = true;
    }

    /// Replace the scale.
    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.dirty = true;
    }

    /// Multiply the scale component-wise.
    pub fn scale_by(&mut self, factor: Vec3) {
        self.scale *= factor;
        self.dirty = true;
    }

    /// Recompute `T · R · S` and clear the dirty flag. Idempotent.
    pub fn update_model_matrix(&mut self) {
        self.model_matrix = Mat4::from_scale_rotation_translation(
            self.scale,
            self.rotation,
            self.position,
        );
        self.dirty = false;
    }

    /// Inverse of the cached model matrix.
    pub fn inverse_model_matrix(&self) -> Mat4 {
        self.model_matrix.inverse()
    }
}

fn normalize_or_identity(q: Quat) -> Quat {
    let length_sq = q.length_squared();
    if length_sq.is_finite() && length_sq > f32::EPSILON {
        q.normalize()
    } else {
        Quat::IDENTITY
    }
}

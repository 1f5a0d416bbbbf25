use glam::{Mat3, Mat4, Quat, Vec2, Vec3};

use crate::math::ndc_from_pixel;

/// Map an NDC point onto the virtual trackball.
///
/// Inside `d² < 0.5` the point lands on the unit sphere; outside it lands
/// on the hyperbola `z = 0.5 / d`, which keeps drags near the edge smooth.
/// The result is normalized.
pub fn project_to_sphere(ndc: Vec2) -> Vec3 {
    let d_sq = ndc.length_squared();
    let z = if d_sq < 0.5 {
        (1.0 - d_sq).sqrt()
    } else {
        0.5 / d_sq.sqrt()
    };
    Vec3::new(ndc.x, ndc.y, z).normalize()
}

/// Converts pointer drags into rotation quaternions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trackball {
    /// Viewport size in pixels.
    pub viewport: Vec2,
}

impl Trackball {
    /// Trackball over a `width x height` viewport.
    pub fn new(viewport: Vec2) -> Self {
        Self { viewport }
    }

    /// Rotation carrying the sphere point under `from` to the one under
    /// `to`, in view space. Identity when the drag has no usable axis.
    pub fn drag_rotation(&self, from: Vec2, to: Vec2) -> Quat {
        let (Some(a), Some(b)) = (
            ndc_from_pixel(from, self.viewport),
            ndc_from_pixel(to, self.viewport),
        ) else {
            return Quat::IDENTITY;
        };
        let start = project_to_sphere(a);
        let end = project_to_sphere(b);

        let Some(axis) = start.cross(end).try_normalize() else {
            return Quat::IDENTITY;
        };
        let angle = start.dot(end).clamp(-1.0, 1.0).acos();
        Quat::from_axis_angle(axis, angle)
    }

    /// Like [`Self::drag_rotation`] but with the axis carried from view
    /// space into world space, so the object turns the way the pointer
    /// moves on screen whatever the camera orientation.
    pub fn drag_rotation_world(&self, from: Vec2, to: Vec2, view: Mat4) -> Quat {
        let local = self.drag_rotation(from, to);
        let (axis, angle) = local.to_axis_angle();
        if angle.abs() < f32::EPSILON {
            return Quat::IDENTITY;
        }
        // Inverse of an orthonormal view rotation is its transpose.
        let view_to_world = Mat3::from_mat4(view).transpose();
        match (view_to_world * axis).try_normalize() {
            Some(world_axis) => Quat::from_axis_angle(world_axis, angle),
            None => Quat::IDENTITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn center_projects_to_pole() {
        assert!(project_to_sphere(Vec2::ZERO).abs_diff_eq(Vec3::Z, 1e-6));
    }

    #[test]
    fn projection_is_unit_length_inside_and_outside() {
        for p in [Vec2::new(0.3, 0.2), Vec2::new(0.9, 0.9), Vec2::new(-1.0, 0.0)]
        {
            assert!((project_to_sphere(p).length() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn zero_drag_is_identity() {
        let tb = Trackball::new(VIEWPORT);
        let p = Vec2::new(100.0, 200.0);
        assert_eq!(tb.drag_rotation(p, p), Quat::IDENTITY);
    }

    #[test]
    fn horizontal_drag_turns_about_y() {
        let tb = Trackball::new(VIEWPORT);
        let q = tb.drag_rotation(Vec2::new(400.0, 300.0), Vec2::new(500.0, 300.0));
        let (axis, angle) = q.to_axis_angle();
        assert!(axis.abs_diff_eq(Vec3::Y, 1e-5));
        assert!(angle > 0.0);
        assert!((q.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn vertical_drag_turns_about_x() {
        let tb = Trackball::new(VIEWPORT);
        // Pointer moving down the screen is -y in NDC.
        let q = tb.drag_rotation(Vec2::new(400.0, 300.0), Vec2::new(400.0, 400.0));
        let (axis, _) = q.to_axis_angle();
        assert!(axis.abs_diff_eq(Vec3::X, 1e-5));
    }

    #[test]
    fn world_variant_follows_camera_orientation() {
        let tb = Trackball::new(VIEWPORT);
        // Camera on +X looking at the origin: screen-right is world -Z,
        // screen-up stays +Y.
        let view = Mat4::look_at_rh(Vec3::new(10.0, 0.0, 0.0), Vec3::ZERO, Vec3::Y);
        let q = tb.drag_rotation_world(
            Vec2::new(400.0, 300.0),
            Vec2::new(400.0, 400.0),
            view,
        );
        let (axis, _) = q.to_axis_angle();
        assert!(axis.abs_diff_eq(Vec3::NEG_Z, 1e-5));
    }

    #[test]
    fn empty_viewport_is_identity() {
        let tb = Trackball::new(Vec2::ZERO);
        let q = tb.drag_rotation(Vec2::ZERO, Vec2::new(10.0, 0.0));
        assert_eq!(q, Quat::IDENTITY);
    }
}

use glam::{Mat3, Mat4, Vec2, Vec3, Vec4};

/// A half-line with a unit-length direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point.
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// Build a ray, normalizing `direction`. Returns `None` for a zero or
    /// non-finite direction.
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        let direction = direction.try_normalize()?;
        Some(Self { origin, direction })
    }

    /// Point at parameter `t` along the ray.
    #[inline]
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Unproject an NDC position into a world-space ray.
    ///
    /// The near (`z = -1`) and far (`z = +1`) points are pushed through
    /// `inverse(projection * view)` and perspective-divided; the ray starts
    /// at the near point. Returns `None` when the view-projection matrix
    /// has no finite inverse, which means the camera matrices are stale or
    /// broken.
    ///
    /// Invertibility is judged on the inverse itself rather than on the
    /// determinant: a wide orthographic volume has a tiny but perfectly
    /// usable determinant.
    pub fn from_ndc(ndc: Vec2, projection: Mat4, view: Mat4) -> Option<Self> {
        let inverse = finite_inverse(projection * view)?;
        let near = unproject(inverse, Vec4::new(ndc.x, ndc.y, -1.0, 1.0))?;
        let far = unproject(inverse, Vec4::new(ndc.x, ndc.y, 1.0, 1.0))?;
        Self::new(near, far - near)
    }

    /// Express this world-space ray in the local space of `model`.
    ///
    /// The origin goes through the full inverse; the direction only through
    /// the inverse of the upper 3x3 block so translation cannot leak into
    /// it, and is renormalized afterwards.
    pub fn to_local(&self, model: Mat4) -> Option<Self> {
        let linear = Mat3::from_mat4(model);
        if linear.determinant() == 0.0 {
            return None;
        }
        let linear_inverse = linear.inverse();
        let inverse = finite_inverse(model)?;
        if !linear_inverse.is_finite() {
            return None;
        }
        let origin = inverse.transform_point3(self.origin);
        Self::new(origin, linear_inverse * self.direction)
    }
}

fn finite_inverse(matrix: Mat4) -> Option<Mat4> {
    if !matrix.is_finite() || matrix.determinant() == 0.0 {
        return None;
    }
    let inverse = matrix.inverse();
    inverse.is_finite().then_some(inverse)
}

fn unproject(inverse_view_proj: Mat4, clip: Vec4) -> Option<Vec3> {
    let world = inverse_view_proj * clip;
    if world.w.abs() < f32::EPSILON {
        return None;
    }
    let point = world.truncate() / world.w;
    point.is_finite().then_some(point)
}

/// Map a canvas pixel (origin top-left, y down) to NDC (y up).
///
/// Returns `None` for an empty viewport.
pub fn ndc_from_pixel(pixel: Vec2, viewport: Vec2) -> Option<Vec2> {
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return None;
    }
    Some(Vec2::new(
        2.0 * pixel.x / viewport.x - 1.0,
        1.0 - 2.0 * pixel.y / viewport.y,
    ))
}

#[cfg(test)]
mod tests {
    use glam::Quat;

    use super::*;

    fn camera_on_z(distance: f32) -> (Mat4, Mat4) {
        let proj =
            Mat4::perspective_rh_gl(45.0_f32.to_radians(), 1.0, 0.1, 100.0);
        let view = Mat4::look_at_rh(
            Vec3::new(0.0, 0.0, distance),
            Vec3::ZERO,
            Vec3::Y,
        );
        (proj, view)
    }

    #[test]
    fn center_ray_points_down_the_view_axis() {
        let (proj, view) = camera_on_z(10.0);
        let ray = Ray::from_ndc(Vec2::ZERO, proj, view).unwrap();

        assert!(ray.direction.abs_diff_eq(Vec3::NEG_Z, 1e-5));
        assert!((ray.direction.length() - 1.0).abs() < 1e-6);
        // Origin sits on the near plane in front of the eye.
        assert!(ray.origin.abs_diff_eq(Vec3::new(0.0, 0.0, 9.9), 1e-3));
    }

    #[test]
    fn off_center_ray_leans_toward_the_pixel() {
        let (proj, view) = camera_on_z(10.0);
        let ray = Ray::from_ndc(Vec2::new(0.5, -0.5), proj, view).unwrap();
        assert!(ray.direction.x > 0.0);
        assert!(ray.direction.y < 0.0);
        assert!((ray.direction.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn singular_view_projection_yields_no_ray() {
        let (proj, _) = camera_on_z(10.0);
        assert!(Ray::from_ndc(Vec2::ZERO, proj, Mat4::ZERO).is_none());
    }

    #[test]
    fn wide_orthographic_volume_still_unprojects() {
        // det(proj * view) here is far below any fixed epsilon.
        let half = 5.0e5;
        let proj = Mat4::orthographic_rh_gl(-half, half, -half, half, 0.1, 100.0);
        let view =
            Mat4::look_at_rh(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, Vec3::Y);
        assert!((proj * view).determinant().abs() < 1e-12);

        let ray = Ray::from_ndc(Vec2::ZERO, proj, view).unwrap();
        assert!(ray.direction.abs_diff_eq(Vec3::NEG_Z, 1e-5));
        assert!(ray.origin.truncate().abs_diff_eq(Vec2::ZERO, 1e-3));
    }

    #[test]
    fn non_finite_projection_yields_no_ray() {
        let proj = Mat4::orthographic_rh_gl(0.0, 0.0, 0.0, 0.0, 0.1, 100.0);
        let view =
            Mat4::look_at_rh(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, Vec3::Y);
        assert!(Ray::from_ndc(Vec2::ZERO, proj, view).is_none());
    }

    #[test]
    fn zero_direction_is_rejected() {
        assert!(Ray::new(Vec3::ONE, Vec3::ZERO).is_none());
    }

    #[test]
    fn to_local_ignores_translation_for_direction() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z).unwrap();
        let model = Mat4::from_scale_rotation_translation(
            Vec3::splat(2.0),
            Quat::IDENTITY,
            Vec3::new(5.0, 0.0, 0.0),
        );
        let local = ray.to_local(model).unwrap();

        assert!(local.direction.abs_diff_eq(Vec3::NEG_Z, 1e-6));
        assert!(local.origin.abs_diff_eq(Vec3::new(-2.5, 0.0, 5.0), 1e-5));
    }

    #[test]
    fn to_local_rejects_collapsed_scale() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X).unwrap();
        let model = Mat4::from_scale(Vec3::new(1.0, 0.0, 1.0));
        assert!(ray.to_local(model).is_none());
    }

    #[test]
    fn pixel_corners_map_to_ndc_corners() {
        let viewport = Vec2::new(800.0, 600.0);
        assert_eq!(
            ndc_from_pixel(Vec2::ZERO, viewport),
            Some(Vec2::new(-1.0, 1.0))
        );
        assert_eq!(
            ndc_from_pixel(viewport, viewport),
            Some(Vec2::new(1.0, -1.0))
        );
        assert_eq!(
            ndc_from_pixel(Vec2::new(400.0, 300.0), viewport),
            Some(Vec2::ZERO)
        );
        assert!(ndc_from_pixel(Vec2::ZERO, Vec2::new(0.0, 600.0)).is_none());
    }
}

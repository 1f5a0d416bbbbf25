use glam::{Mat4, Vec2, Vec3};

use crate::math::Ray;
use crate::options::CameraOptions;

/// Which projection the camera currently uses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Perspective with the camera's `fovy`.
    Perspective,
    /// Orthographic volume `2 * half_extent` tall, widened by the aspect.
    Orthographic {
        /// Half the visible height in world units.
        half_extent: f32,
    },
}

/// Look-at camera holding derived view and projection matrices.
///
/// `eye`, `target` and `up` are public for direct manipulation; call
/// [`Camera::update_view_matrix`] after changing them.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
    projection: Projection,
    view_matrix: Mat4,
    projection_matrix: Mat4,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform buffer holding the camera matrices.
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// View matrix.
    pub view: [[f32; 4]; 4],
    /// Projection matrix.
    pub proj: [[f32; 4]; 4],
    /// Camera world-space position (w = 1).
    pub eye: [f32; 4],
}

impl Camera {
    /// Perspective camera configured from `options`.
    pub fn from_options(options: &CameraOptions, aspect: f32) -> Self {
        let mut camera = Self {
            eye: Vec3::from(options.eye),
            target: Vec3::from(options.target),
            up: Vec3::Y,
            aspect,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
            projection: Projection::Perspective,
            view_matrix: Mat4::IDENTITY,
            projection_matrix: Mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera.update_view_matrix();
        camera
    }

    /// Switch to perspective projection.
    pub fn set_perspective(&mut self) {
        self.projection = Projection::Perspective;
        self.update_projection_matrix();
    }

    /// Switch to an orthographic projection `2 * half_extent` tall.
    /// Non-positive or non-finite extents are ignored.
    pub fn set_orthographic(&mut self, half_extent: f32) {
        if !(half_extent.is_finite() && half_extent > 0.0) {
            log::warn!("ignoring invalid orthographic extent {half_extent}");
            return;
        }
        self.projection = Projection::Orthographic { half_extent };
        self.update_projection_matrix();
    }

    /// Change the aspect ratio and rebuild the active projection.
    /// Non-positive or non-finite ratios are ignored.
    pub fn set_aspect(&mut self, aspect: f32) {
        if !(aspect.is_finite() && aspect > 0.0) {
            log::warn!("ignoring invalid aspect ratio {aspect}");
            return;
        }
        self.aspect = aspect;
        self.update_projection_matrix();
    }

    /// Active projection kind.
    pub fn projection(&self) -> Projection {
        self.projection
    }

    fn update_projection_matrix(&mut self) {
        self.projection_matrix = match self.projection {
            Projection::Perspective => Mat4::perspective_rh_gl(
                self.fovy.to_radians(),
                self.aspect,
                self.znear,
                self.zfar,
            ),
            Projection::Orthographic { half_extent } => {
                let half_width = half_extent * self.aspect;
                Mat4::orthographic_rh_gl(
                    -half_width,
                    half_width,
                    -half_extent,
                    half_extent,
                    self.znear,
                    self.zfar,
                )
            }
        };
    }

    /// Recompute the view matrix from `eye`, `target` and `up`.
    ///
    /// If the eye sits on the target or `up` is parallel to the view
    /// direction the previous matrix is kept.
    pub fn update_view_matrix(&mut self) {
        let forward = self.target - self.eye;
        if forward.cross(self.up).length_squared() < 1e-12 {
            log::warn!(
                "degenerate camera (eye {:?}, target {:?}, up {:?}); \
                 keeping previous view",
                self.eye,
                self.target,
                self.up
            );
            return;
        }
        self.view_matrix = Mat4::look_at_rh(self.eye, self.target, self.up);
    }

    /// World-to-view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        self.view_matrix
    }

    /// View-to-clip matrix (GL depth range).
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection_matrix
    }

    /// Unit vector from eye toward target, or `-Z` if they coincide.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).try_normalize().unwrap_or(Vec3::NEG_Z)
    }

    /// World-space ray through an NDC position.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Option<Ray> {
        Ray::from_ndc(ndc, self.projection_matrix, self.view_matrix)
    }

    /// Snapshot of the matrices for upload.
    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: (self.projection_matrix * self.view_matrix)
                .to_cols_array_2d(),
            view: self.view_matrix.to_cols_array_2d(),
            proj: self.projection_matrix.to_cols_array_2d(),
            eye: self.eye.extend(1.0).to_array(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera::from_options(&CameraOptions::default(), 4.0 / 3.0)
    }

    #[test]
    fn view_matrix_matches_look_at() {
        let cam = camera();
        let expected =
            Mat4::look_at_rh(Vec3::new(4.0, 5.0, 8.0), Vec3::ZERO, Vec3::Y);
        assert!(cam.view_matrix().abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn degenerate_up_keeps_previous_view() {
        let mut cam = camera();
        let before = cam.view_matrix();
        cam.up = cam.forward();
        cam.update_view_matrix();
        assert_eq!(cam.view_matrix(), before);
    }

    #[test]
    fn orthographic_switch_changes_projection() {
        let mut cam = camera();
        cam.set_orthographic(5.0);
        assert_eq!(
            cam.projection(),
            Projection::Orthographic { half_extent: 5.0 }
        );
        // Orthographic projection has no perspective row.
        assert_eq!(cam.projection_matrix().w_axis.w, 1.0);

        cam.set_perspective();
        assert_eq!(cam.projection(), Projection::Perspective);
        assert_eq!(cam.projection_matrix().w_axis.w, 0.0);
    }

    #[test]
    fn invalid_aspect_is_ignored() {
        let mut cam = camera();
        let before = cam.projection_matrix();
        cam.set_aspect(0.0);
        cam.set_aspect(f32::NAN);
        assert_eq!(cam.projection_matrix(), before);
        cam.set_aspect(2.0);
        assert_ne!(cam.projection_matrix(), before);
    }

    #[test]
    fn center_ray_follows_forward() {
        let cam = camera();
        let ray = cam.ray_from_ndc(Vec2::ZERO).unwrap();
        assert!(ray.direction.abs_diff_eq(cam.forward(), 1e-4));
    }

    #[test]
    fn uniform_combines_matrices() {
        let cam = camera();
        let uniform = cam.uniform();
        let combined = Mat4::from_cols_array_2d(&uniform.view_proj);
        assert!(combined
            .abs_diff_eq(cam.projection_matrix() * cam.view_matrix(), 1e-6));
        assert_eq!(uniform.eye, [4.0, 5.0, 8.0, 1.0]);
        assert_eq!(bytemuck::bytes_of(&uniform).len(), 3 * 64 + 16);
    }
}

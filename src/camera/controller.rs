use std::f32::consts::PI;

use glam::{Quat, Vec2, Vec3};

use super::core::Camera;
use crate::options::CameraOptions;

/// Polar angle kept this far from either pole so `lookAt` never sees an
/// eye directly above or below the target.
pub const POLE_MARGIN: f32 = 0.1;

/// Orbit (perspective) or fixed overhead (orthographic) view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Perspective camera orbiting the target.
    #[default]
    Orbit,
    /// Orthographic camera at a fixed position.
    Top,
}

/// Constraint applied to orbit drags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationAxis {
    /// Azimuth and elevation both follow the drag.
    #[default]
    Free,
    /// Elevation only.
    X,
    /// Azimuth only.
    Y,
    /// Roll `up` about the view direction; the eye stays put.
    Z,
}

/// Eye offset from the target in spherical coordinates, y up.
#[derive(Debug, Clone, Copy)]
struct Spherical {
    radius: f32,
    /// Azimuth in the xz-plane, `atan2(z, x)`.
    theta: f32,
    /// Polar angle from +Y.
    phi: f32,
}

impl Spherical {
    fn from_offset(offset: Vec3) -> Option<Self> {
        let radius = offset.length();
        if radius < 1e-6 {
            return None;
        }
        Some(Self {
            radius,
            theta: offset.z.atan2(offset.x),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
        })
    }

    fn to_offset(self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        self.radius
            * Vec3::new(sin_phi * cos_theta, cos_phi, sin_phi * sin_theta)
    }

    fn tilt(&mut self, delta_phi: f32) {
        self.phi = (self.phi - delta_phi).clamp(POLE_MARGIN, PI - POLE_MARGIN);
    }
}

/// Orbit camera with axis-locked rotation and a top-view toggle.
pub struct OrbitController {
    /// The controlled camera.
    pub camera: Camera,
    /// Radians per pixel of drag.
    pub rotation_speed: f32,
    mode: ViewMode,
    rotation_axis: RotationAxis,
    zoom_speed: f32,
    min_distance: f32,
    max_distance: f32,
    top_eye: Vec3,
    ortho_half_extent: f32,
    min_ortho_half_extent: f32,
    max_ortho_half_extent: f32,
    /// Eye and up to restore when leaving the top view.
    saved_orbit: Option<(Vec3, Vec3)>,
}

impl OrbitController {
    /// Orbit controller in perspective mode configured from `options`.
    pub fn new(options: &CameraOptions, aspect: f32) -> Self {
        let min_extent = options.min_ortho_half_extent.max(f32::EPSILON);
        let max_extent = options.max_ortho_half_extent.max(min_extent);
        Self {
            camera: Camera::from_options(options, aspect),
            rotation_speed: options.rotation_speed,
            mode: ViewMode::Orbit,
            rotation_axis: RotationAxis::Free,
            zoom_speed: options.zoom_speed,
            min_distance: options.min_distance,
            max_distance: options.max_distance,
            top_eye: Vec3::from(options.top_eye),
            ortho_half_extent: options
                .ortho_half_extent
                .clamp(min_extent, max_extent),
            min_ortho_half_extent: min_extent,
            max_ortho_half_extent: max_extent,
            saved_orbit: None,
        }
    }

    /// Current view mode.
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Current rotation constraint.
    pub fn rotation_axis(&self) -> RotationAxis {
        self.rotation_axis
    }

    /// Change the rotation constraint for subsequent drags.
    pub fn set_rotation_axis(&mut self, axis: RotationAxis) {
        log::debug!("camera rotation axis: {axis:?}");
        self.rotation_axis = axis;
    }

    /// Propagate a viewport resize to the active projection.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.camera.set_aspect(aspect);
    }

    /// Orbit by a pointer delta in pixels. Ignored in the top view.
    pub fn rotate(&mut self, delta: Vec2) {
        if self.mode == ViewMode::Top {
            return;
        }
        let d_theta = delta.x * self.rotation_speed;
        let d_phi = delta.y * self.rotation_speed;

        let offset = self.camera.eye - self.camera.target;
        let Some(mut spherical) = Spherical::from_offset(offset) else {
            log::warn!("camera eye coincides with target; rotation ignored");
            return;
        };

        match self.rotation_axis {
            RotationAxis::X => spherical.tilt(d_phi),
            RotationAxis::Y => spherical.theta += d_theta,
            RotationAxis::Z => {
                let view_dir = -offset / spherical.radius;
                let roll = Quat::from_axis_angle(view_dir, d_theta);
                if let Some(up) = (roll * self.camera.up).try_normalize() {
                    self.camera.up = up;
                }
            }
            RotationAxis::Free => {
                spherical.theta += d_theta;
                spherical.tilt(d_phi);
            }
        }

        if self.rotation_axis != RotationAxis::Z {
            self.camera.eye = self.camera.target + spherical.to_offset();
        }
        self.camera.update_view_matrix();
    }

    /// Zoom by a scroll amount (positive moves closer).
    ///
    /// In orbit mode the radius is scaled and clamped to
    /// `[min_distance, max_distance]`; in the top view the orthographic
    /// extent is scaled and clamped to its configured range instead.
    pub fn zoom(&mut self, delta: f32) {
        let factor = (1.0 - delta * self.zoom_speed).max(0.1);
        match self.mode {
            ViewMode::Orbit => {
                let offset = self.camera.eye - self.camera.target;
                let Some(direction) = offset.try_normalize() else {
                    return;
                };
                let radius = (offset.length() * factor)
                    .clamp(self.min_distance, self.max_distance);
                self.camera.eye = self.camera.target + direction * radius;
                self.camera.update_view_matrix();
            }
            ViewMode::Top => {
                self.ortho_half_extent = (self.ortho_half_extent * factor)
                    .clamp(self.min_ortho_half_extent, self.max_ortho_half_extent);
                self.camera.set_orthographic(self.ortho_half_extent);
            }
        }
    }

    /// Swap between the orbit and top views.
    ///
    /// Entering the top view remembers the orbit eye; leaving it restores
    /// that eye and the perspective projection at the current aspect.
    pub fn toggle_view_mode(&mut self) {
        match self.mode {
            ViewMode::Orbit => {
                self.saved_orbit = Some((self.camera.eye, self.camera.up));
                self.camera.eye = self.top_eye;
                self.camera.up = top_up(self.camera.target - self.top_eye);
                self.camera.set_orthographic(self.ortho_half_extent);
                self.mode = ViewMode::Top;
            }
            ViewMode::Top => {
                if let Some((eye, up)) = self.saved_orbit.take() {
                    self.camera.eye = eye;
                    self.camera.up = up;
                }
                self.camera.set_perspective();
                self.mode = ViewMode::Orbit;
            }
        }
        log::debug!("camera view mode: {:?}", self.mode);
        self.camera.update_view_matrix();
    }

    /// Unit view direction.
    pub fn forward(&self) -> Vec3 {
        self.camera.forward()
    }
}

/// `Y` unless the top view looks straight along it.
fn top_up(view_dir: Vec3) -> Vec3 {
    if view_dir.cross(Vec3::Y).length_squared() < 1e-8 {
        Vec3::NEG_Z
    } else {
        Vec3::Y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Projection;

    fn controller() -> OrbitController {
        OrbitController::new(&CameraOptions::default(), 1.0)
    }

    fn polar(c: &OrbitController) -> f32 {
        let offset = c.camera.eye - c.camera.target;
        (offset.y / offset.length()).acos()
    }

    #[test]
    fn free_rotation_preserves_radius() {
        let mut c = controller();
        let radius = c.camera.eye.distance(c.camera.target);
        c.rotate(Vec2::new(40.0, -25.0));
        assert!((c.camera.eye.distance(c.camera.target) - radius).abs() < 1e-4);
    }

    #[test]
    fn x_axis_clamps_at_the_pole() {
        let mut c = controller();
        c.set_rotation_axis(RotationAxis::X);
        c.rotate(Vec2::new(0.0, 10_000.0));
        assert!((polar(&c) - POLE_MARGIN).abs() < 1e-4);

        c.rotate(Vec2::new(0.0, -10_000.0));
        assert!((polar(&c) - (PI - POLE_MARGIN)).abs() < 1e-4);
    }

    #[test]
    fn x_axis_ignores_horizontal_drag() {
        let mut c = controller();
        c.set_rotation_axis(RotationAxis::X);
        let before = c.camera.eye;
        c.rotate(Vec2::new(50.0, 0.0));
        assert!(c.camera.eye.abs_diff_eq(before, 1e-4));
    }

    #[test]
    fn y_axis_keeps_height() {
        let mut c = controller();
        c.set_rotation_axis(RotationAxis::Y);
        let before = c.camera.eye;
        c.rotate(Vec2::new(30.0, 80.0));
        assert!((c.camera.eye.y - before.y).abs() < 1e-4);
        assert!(!c.camera.eye.abs_diff_eq(before, 1e-3));
    }

    #[test]
    fn z_axis_rolls_up_without_moving_eye() {
        let mut c = controller();
        c.set_rotation_axis(RotationAxis::Z);
        let eye = c.camera.eye;
        c.rotate(Vec2::new(50.0, 0.0));

        assert_eq!(c.camera.eye, eye);
        assert!((c.camera.up.length() - 1.0).abs() < 1e-5);
        // The roll axis is the view direction, so the component of `up`
        // along it is unchanged.
        let along = c.camera.up.dot(c.forward());
        assert!((along - Vec3::Y.dot(c.forward())).abs() < 1e-5);
        assert!(!c.camera.up.abs_diff_eq(Vec3::Y, 1e-3));
    }

    #[test]
    fn view_matrix_tracks_rotation() {
        let mut c = controller();
        c.rotate(Vec2::new(12.0, 7.0));
        let expected = glam::Mat4::look_at_rh(
            c.camera.eye,
            c.camera.target,
            c.camera.up,
        );
        assert!(c.camera.view_matrix().abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn eye_on_target_is_left_alone() {
        let mut c = controller();
        c.camera.eye = c.camera.target;
        c.rotate(Vec2::new(10.0, 10.0));
        assert_eq!(c.camera.eye, c.camera.target);
    }

    #[test]
    fn top_toggle_round_trip_restores_orbit() {
        let mut c = controller();
        c.rotate(Vec2::new(20.0, 5.0));
        let eye = c.camera.eye;

        c.toggle_view_mode();
        assert_eq!(c.mode(), ViewMode::Top);
        assert_eq!(c.camera.eye, Vec3::new(0.0, 0.0, 10.0));
        assert_eq!(
            c.camera.projection(),
            Projection::Orthographic { half_extent: 5.0 }
        );

        c.toggle_view_mode();
        assert_eq!(c.mode(), ViewMode::Orbit);
        assert_eq!(c.camera.eye, eye);
        assert_eq!(c.camera.projection(), Projection::Perspective);
    }

    #[test]
    fn rotation_is_ignored_in_top_view() {
        let mut c = controller();
        c.toggle_view_mode();
        let view = c.camera.view_matrix();
        c.rotate(Vec2::new(100.0, 100.0));
        assert_eq!(c.camera.view_matrix(), view);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut c = controller();
        for _ in 0..100 {
            c.zoom(5.0);
        }
        assert!((c.camera.eye.distance(c.camera.target) - 1.0).abs() < 1e-4);
        for _ in 0..100 {
            c.zoom(-5.0);
        }
        assert!((c.camera.eye.distance(c.camera.target) - 80.0).abs() < 1e-3);
    }

    fn top_extent(c: &OrbitController) -> f32 {
        match c.camera.projection() {
            Projection::Orthographic { half_extent } => half_extent,
            Projection::Perspective => panic!("not in the top view"),
        }
    }

    #[test]
    fn top_view_zoom_is_clamped_and_stays_finite() {
        let mut c = controller();
        c.toggle_view_mode();
        for _ in 0..60 {
            c.zoom(50.0);
        }
        assert_eq!(top_extent(&c), 0.5);
        assert!(c.camera.projection_matrix().is_finite());

        for _ in 0..40 {
            c.zoom(-5.0);
        }
        assert_eq!(top_extent(&c), 50.0);
        assert!(c.camera.projection_matrix().is_finite());

        // The zoomed extent survives a round trip through the orbit view.
        c.toggle_view_mode();
        c.toggle_view_mode();
        assert_eq!(top_extent(&c), 50.0);
        assert!(c.camera.ray_from_ndc(Vec2::ZERO).is_some());
    }

    #[test]
    fn out_of_range_extent_option_is_clamped() {
        let options = CameraOptions {
            ortho_half_extent: 0.0,
            ..CameraOptions::default()
        };
        let mut c = OrbitController::new(&options, 1.0);
        c.toggle_view_mode();
        assert_eq!(top_extent(&c), options.min_ortho_half_extent);
    }

    #[test]
    fn repeated_small_tilts_saturate_at_the_poles() {
        let mut c = controller();
        c.set_rotation_axis(RotationAxis::X);
        for _ in 0..2_000 {
            c.rotate(Vec2::new(0.0, 3.0));
            let phi = polar(&c);
            assert!(phi >= POLE_MARGIN - 1e-4);
        }
        assert!((polar(&c) - POLE_MARGIN).abs() < 1e-4);
        assert!(c.camera.view_matrix().is_finite());

        for _ in 0..2_000 {
            c.rotate(Vec2::new(0.0, -3.0));
            let phi = polar(&c);
            assert!(phi <= PI - POLE_MARGIN + 1e-4);
        }
        assert!((polar(&c) - (PI - POLE_MARGIN)).abs() < 1e-4);
        assert!(c.camera.view_matrix().is_finite());
    }
}

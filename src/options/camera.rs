use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection and control parameters.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 90.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
    /// Radians of orbit per pixel of drag.
    #[schemars(title = "Rotate Speed", range(min = 0.001, max = 0.05), extend("step" = 0.001))]
    pub rotation_speed: f32,
    /// Fractional radius change per scroll unit.
    #[schemars(title = "Zoom Speed", range(min = 0.01, max = 0.5), extend("step" = 0.01))]
    pub zoom_speed: f32,
    /// Closest the orbit eye may get to the target.
    #[schemars(skip)]
    pub min_distance: f32,
    /// Farthest the orbit eye may get from the target.
    #[schemars(skip)]
    pub max_distance: f32,
    /// Initial orbit eye position.
    #[schemars(skip)]
    pub eye: [f32; 3],
    /// Look-at target.
    #[schemars(skip)]
    pub target: [f32; 3],
    /// Eye position used by the top view.
    #[schemars(skip)]
    pub top_eye: [f32; 3],
    /// Half height of the top view's orthographic volume.
    #[schemars(title = "Top View Extent", range(min = 1.0, max = 50.0), extend("step" = 0.5))]
    pub ortho_half_extent: f32,
    /// Smallest top-view half height reachable by zooming in.
    #[schemars(skip)]
    pub min_ortho_half_extent: f32,
    /// Largest top-view half height reachable by zooming out.
    #[schemars(skip)]
    pub max_ortho_half_extent: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 45.0,
            znear: 0.1,
            zfar: 100.0,
            rotation_speed: 0.01,
            zoom_speed: 0.1,
            min_distance: 1.0,
            max_distance: 80.0,
            eye: [4.0, 5.0, 8.0],
            target: [0.0, 0.0, 0.0],
            top_eye: [0.0, 0.0, 10.0],
            ortho_half_extent: 5.0,
            min_ortho_half_extent: 0.5,
            max_ortho_half_extent: 50.0,
        }
    }
}

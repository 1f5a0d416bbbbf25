//! The interaction engine: owns the scene, camera, trackball and input
//! processor, and applies queued commands once per frame.
//!
//! # Frame order
//!
//! [`Engine::advance`] runs, in order:
//!
//! 1. apply every queued mutation (camera, trackball, scale, path points,
//!    speed), collecting selection requests;
//! 2. refresh dirty model matrices and the camera view;
//! 3. resolve selection requests against those matrices;
//! 4. integrate path motion and auto-deselect entities whose motion ended.

pub mod command;
mod frame;

use std::path::Path;
use std::sync::Arc;

use glam::{Vec2, Vec3};

use self::command::{EditMode, OrreryCommand};
use crate::camera::{CameraUniform, OrbitController, Trackball};
use crate::error::OrreryError;
use crate::input::{InputContext, InputEvent, InputProcessor};
use crate::math::{ndc_from_pixel, Ray};
use crate::mesh::{obj, primitives, MeshGeometry};
use crate::options::Options;
use crate::picking::PickHit;
use crate::render::RenderItem;
use crate::scene::{EntityId, Scene};
use crate::transform::Transform;

/// What one [`Engine::advance`] call changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Whether the selection differs from the start of the frame.
    pub selection_changed: bool,
    /// Selection at the end of the frame.
    pub selected: Option<EntityId>,
    /// Entities whose path motion reached its end this frame.
    pub finished_motions: Vec<EntityId>,
    /// Model matrices refreshed before picking.
    pub refreshed: usize,
}

/// Scene interaction engine.
pub struct Engine {
    scene: Scene,
    camera: OrbitController,
    trackball: Trackball,
    input: InputProcessor,
    options: Options,
    edit_mode: EditMode,
    viewport: Vec2,
    pending: Vec<OrreryCommand>,
}

impl Engine {
    /// Create an engine for a `viewport` of pixels.
    ///
    /// Adds the axes helper when `options.display.show_axes` is set.
    pub fn new(options: Options, viewport: Vec2) -> Result<Self, OrreryError> {
        let aspect = aspect_of(viewport);
        let mut scene = Scene::new();
        scene.set_selected_color(options.display.selected_color);
        scene.set_motion_speed(options.motion.speed);
        if options.display.show_axes {
            let bar = primitives::axis_bar(options.display.axis_length, 0.05)?;
            let _ = scene.add_axes(&Arc::new(bar));
        }

        Ok(Self {
            scene,
            camera: OrbitController::new(&options.camera, aspect),
            trackball: Trackball::new(viewport),
            input: InputProcessor::new(&options),
            options,
            edit_mode: EditMode::default(),
            viewport,
            pending: Vec::new(),
        })
    }

    // -- Scene population --

    /// Add a mesh at `transform`.
    pub fn add_mesh(
        &mut self,
        geometry: Arc<MeshGeometry>,
        transform: Transform,
    ) -> EntityId {
        self.scene.add(geometry, transform)
    }

    /// Load every object of an OBJ file at the origin.
    pub fn load_obj(
        &mut self,
        path: impl AsRef<Path>,
    ) -> Result<Vec<EntityId>, OrreryError> {
        let meshes = obj::load_obj(path)?;
        Ok(meshes
            .into_iter()
            .map(|mesh| self.scene.add(Arc::new(mesh), Transform::default()))
            .collect())
    }

    // -- Input --

    /// Feed a raw event through the input processor and queue the
    /// resulting command, if any.
    pub fn handle_input(&mut self, event: &InputEvent) {
        let ctx = self.input_context();
        if let Some(command) = self.input.handle_event(event, ctx) {
            self.submit(command);
        }
    }

    /// Queue a command for the next frame.
    ///
    /// Edit mode switches apply immediately so the rest of this frame's
    /// gestures are interpreted in the new mode.
    pub fn submit(&mut self, command: OrreryCommand) {
        if let OrreryCommand::SetEditMode(mode) = command {
            self.set_edit_mode(mode);
            return;
        }
        self.pending.push(command);
    }

    /// Switch edit mode, cutting off any drag in progress.
    pub fn set_edit_mode(&mut self, mode: EditMode) {
        if mode != self.edit_mode {
            log::debug!("edit mode: {mode:?}");
            self.edit_mode = mode;
        }
        self.input.interrupt_drag();
    }

    /// Context the input processor interprets gestures against.
    #[must_use]
    pub fn input_context(&self) -> InputContext {
        InputContext {
            has_selection: self.scene.selected().is_some(),
            edit_mode: self.edit_mode,
        }
    }

    // -- Viewport and picking --

    /// Propagate a viewport resize. Empty sizes are ignored.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        self.viewport = Vec2::new(width, height);
        self.trackball.viewport = self.viewport;
        self.camera.set_aspect(width / height);
    }

    /// World-space ray under a canvas pixel.
    #[must_use]
    pub fn pick_ray(&self, pixel: Vec2) -> Option<Ray> {
        let ndc = ndc_from_pixel(pixel, self.viewport)?;
        let ray = self.camera.camera.ray_from_ndc(ndc);
        if ray.is_none() {
            log::warn!("camera matrices are singular; no pick ray");
        }
        ray
    }

    /// Canvas pixel a world point projects to, or `None` behind the eye.
    #[must_use]
    pub fn pixel_of(&self, world: Vec3) -> Option<Vec2> {
        let camera = &self.camera.camera;
        let clip = camera.projection_matrix()
            * camera.view_matrix()
            * world.extend(1.0);
        if clip.w <= f32::EPSILON {
            return None;
        }
        let ndc = clip.truncate().truncate() / clip.w;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.viewport.x,
            (1.0 - ndc.y) * 0.5 * self.viewport.y,
        ))
    }

    /// Closest selectable entity under a canvas pixel, using the current
    /// model matrices.
    #[must_use]
    pub fn pick_at(&self, pixel: Vec2) -> Option<PickHit<EntityId>> {
        self.scene.pick(&self.pick_ray(pixel)?)
    }

    // -- Accessors --

    /// The scene.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable scene access.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// The camera controller.
    #[must_use]
    pub fn camera(&self) -> &OrbitController {
        &self.camera
    }

    /// Mutable camera controller access.
    pub fn camera_mut(&mut self) -> &mut OrbitController {
        &mut self.camera
    }

    /// Active edit mode.
    #[must_use]
    pub fn edit_mode(&self) -> EditMode {
        self.edit_mode
    }

    /// Options the engine was built with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Viewport size in pixels.
    #[must_use]
    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Commands waiting for the next frame.
    #[must_use]
    pub fn pending_commands(&self) -> &[OrreryCommand] {
        &self.pending
    }

    /// Camera matrices for upload.
    #[must_use]
    pub fn camera_uniform(&self) -> CameraUniform {
        self.camera.camera.uniform()
    }

    /// Draw list for the current state.
    #[must_use]
    pub fn render_items(&self) -> Vec<RenderItem> {
        self.scene.render_items()
    }

    /// World position of an entity, if it exists.
    #[must_use]
    pub fn entity_position(&self, id: EntityId) -> Option<Vec3> {
        self.scene.get(id).map(|e| e.transform.position())
    }
}

fn aspect_of(viewport: Vec2) -> f32 {
    if viewport.x > 0.0 && viewport.y > 0.0 {
        viewport.x / viewport.y
    } else {
        1.0
    }
}

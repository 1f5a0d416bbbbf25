use glam::{Vec2, Vec3};

use super::command::OrreryCommand;
use super::{Engine, FrameReport};
use crate::math::Plane;

/// Selection changes wait until matrices are fresh.
#[derive(Debug, Clone, Copy)]
enum SelectionRequest {
    PickAt(Vec2),
    Clear,
}

impl Engine {
    /// Run one frame: apply queued commands, refresh matrices, resolve
    /// picks, then integrate path motion.
    pub fn advance(&mut self) -> FrameReport {
        let selected_before = self.scene.selected();

        // 1. Mutations.
        let mut requests = Vec::new();
        for command in std::mem::take(&mut self.pending) {
            if let Some(request) = self.apply(command) {
                requests.push(request);
            }
        }

        // 2. Matrices.
        let refreshed = self.scene.refresh_transforms();
        self.camera.camera.update_view_matrix();

        // 3. Selection.
        for request in requests {
            self.resolve_selection(request);
        }
        if self.scene.selected() != selected_before {
            self.input.interrupt_drag();
        }

        // 4. Motion.
        let finished_motions = self.scene.advance_motions();
        for &id in &finished_motions {
            if self.scene.selected() == Some(id) {
                let _ = self.scene.deselect_all();
            }
        }

        let selected = self.scene.selected();
        FrameReport {
            selection_changed: selected != selected_before,
            selected,
            finished_motions,
            refreshed,
        }
    }

    fn apply(&mut self, command: OrreryCommand) -> Option<SelectionRequest> {
        match command {
            OrreryCommand::RotateCamera { delta } => self.camera.rotate(delta),
            OrreryCommand::Zoom { delta } => self.camera.zoom(delta),
            OrreryCommand::SetRotationAxis(axis) => {
                self.camera.set_rotation_axis(axis);
            }
            OrreryCommand::ToggleViewMode => self.camera.toggle_view_mode(),
            OrreryCommand::SelectAt { position } => {
                return Some(SelectionRequest::PickAt(position));
            }
            OrreryCommand::ClearSelection => {
                return Some(SelectionRequest::Clear);
            }
            OrreryCommand::SetEditMode(mode) => self.set_edit_mode(mode),
            OrreryCommand::TrackballDrag { from, to } => {
                self.rotate_selected(from, to);
            }
            OrreryCommand::ScaleSelected { factor } => self.scale_selected(factor),
            OrreryCommand::PlacePathPoint { position } => {
                self.place_path_point(position);
            }
            OrreryCommand::AdjustMotionSpeed { factor } => {
                if factor.is_finite() && factor > 0.0 {
                    let speed = self.scene.motion_speed() * factor;
                    self.scene.set_motion_speed(speed);
                }
            }
            OrreryCommand::CancelMotion => {
                if let Some(entity) = self.scene.selected_entity_mut() {
                    entity.motion.cancel();
                }
            }
        }
        None
    }

    fn resolve_selection(&mut self, request: SelectionRequest) {
        match request {
            SelectionRequest::PickAt(pixel) => match self.pick_at(pixel) {
                Some(hit) => {
                    let _ = self.scene.select(hit.key);
                }
                None => {
                    let _ = self.scene.deselect_all();
                }
            },
            SelectionRequest::Clear => {
                let _ = self.scene.deselect_all();
            }
        }
    }

    fn rotate_selected(&mut self, from: Vec2, to: Vec2) {
        let view = self.camera.camera.view_matrix();
        let delta = self.trackball.drag_rotation_world(from, to, view);
        if let Some(entity) = self.scene.selected_entity_mut() {
            entity.transform.rotate_by_quaternion(delta);
        }
    }

    fn scale_selected(&mut self, factor: f32) {
        if !(factor.is_finite() && factor > 0.0) {
            log::warn!("ignoring scale factor {factor}");
            return;
        }
        if let Some(entity) = self.scene.selected_entity_mut() {
            entity.transform.scale_by(Vec3::splat(factor));
        }
    }

    /// Project the click onto the plane through the selection facing the
    /// camera and hand the point to its path motion.
    fn place_path_point(&mut self, pixel: Vec2) {
        let Some(id) = self.scene.selected() else {
            return;
        };
        let Some(ray) = self.pick_ray(pixel) else {
            return;
        };
        let forward = self.camera.forward();
        let Some(entity) = self.scene.get_mut(id) else {
            return;
        };
        let origin = entity.transform.position();
        let Some(point) = Plane::from_point_normal(origin, forward)
            .and_then(|plane| plane.intersect_ray(&ray))
        else {
            log::debug!("path point ray missed the entity plane");
            return;
        };
        if entity.motion.place_point(point, origin) {
            log::debug!("entity {id} starts moving");
        }
    }
}

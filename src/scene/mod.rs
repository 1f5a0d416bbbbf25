//! Authoritative scene: flat entity storage, exclusive selection and
//! per-entity render data.
//!
//! Entities live in insertion order in a `Vec`; an id → slot map keeps
//! lookups O(1). Selection is owned here rather than on the entities so
//! "at most one selected" is enforced in a single place.

mod entity;

use std::f32::consts::FRAC_PI_2;
use std::sync::Arc;

pub use entity::{Entity, EntityId};
use glam::{Quat, Vec3};
use rustc_hash::FxHashMap;

use crate::animation::clamp_speed;
use crate::math::Ray;
use crate::mesh::MeshGeometry;
use crate::picking::{self, PickCandidate, PickHit, PickStats};
use crate::render::{ObjectUniform, RenderItem};
use crate::transform::Transform;

/// Colours of the X, Y and Z axes helper bars.
pub const AXIS_COLORS: [[f32; 3]; 3] =
    [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

/// The authoritative scene. Owns all entities in a flat list.
pub struct Scene {
    /// Entities in insertion order.
    entities: Vec<Entity>,
    /// Entity id → index into `entities`.
    slots: FxHashMap<EntityId, usize>,
    next_entity_id: u32,
    selected: Option<EntityId>,
    selected_color: [f32; 3],
    motion_speed: f32,
    /// Monotonically increasing generation; bumped on any mutation.
    generation: u64,
    /// Generation that was last consumed by the renderer.
    rendered_generation: u64,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            slots: FxHashMap::default(),
            next_entity_id: 0,
            selected: None,
            selected_color: [1.0, 0.85, 0.2],
            motion_speed: 0.01,
            generation: 0,
            rendered_generation: 0,
        }
    }

    // -- Mutation helpers --

    fn invalidate(&mut self) {
        self.generation += 1;
    }

    /// Whether scene data changed since last `mark_rendered()`.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.generation != self.rendered_generation
    }

    /// Record that the renderer consumed the current state.
    pub fn mark_rendered(&mut self) {
        self.rendered_generation = self.generation;
    }

    // -- Entities --

    /// Add an entity and return its id.
    pub fn add(
        &mut self,
        geometry: Arc<MeshGeometry>,
        mut transform: Transform,
    ) -> EntityId {
        let id = EntityId(self.next_entity_id);
        self.next_entity_id += 1;
        transform.update_model_matrix();
        log::debug!("adding entity {id} ({})", geometry.name());
        let _ = self.slots.insert(id, self.entities.len());
        self.entities
            .push(Entity::new(id, geometry, transform, self.motion_speed));
        self.invalidate();
        id
    }

    /// Remove an entity, clearing the selection if it was selected.
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let slot = self.slots.remove(&id)?;
        let entity = self.entities.remove(slot);
        for (index, e) in self.entities.iter().enumerate().skip(slot) {
            let _ = self.slots.insert(e.id(), index);
        }
        if self.selected == Some(id) {
            self.selected = None;
        }
        self.invalidate();
        Some(entity)
    }

    /// Entity by id.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.slots.get(&id).map(|&slot| &self.entities[slot])
    }

    /// Mutable entity by id. Marks the scene dirty.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        let slot = *self.slots.get(&id)?;
        self.invalidate();
        Some(&mut self.entities[slot])
    }

    /// All entities in insertion order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the scene has no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Add the red/green/blue axes helper built from a +Y bar mesh.
    ///
    /// The bars are unselectable and carry fixed colours.
    pub fn add_axes(&mut self, axis_mesh: &Arc<MeshGeometry>) -> [EntityId; 3] {
        let rotations = [
            Quat::from_axis_angle(Vec3::Z, -FRAC_PI_2),
            Quat::IDENTITY,
            Quat::from_axis_angle(Vec3::X, FRAC_PI_2),
        ];
        let names = ["axis-x", "axis-y", "axis-z"];

        let mut ids = [EntityId(0); 3];
        for (i, rotation) in rotations.into_iter().enumerate() {
            let mut transform = Transform::default();
            transform.set_rotation(rotation);
            let id = self.add(Arc::clone(axis_mesh), transform);
            if let Some(entity) = self.get_mut(id) {
                entity.name = names[i].to_owned();
                entity.selectable = false;
                entity.base_color = AXIS_COLORS[i];
            }
            ids[i] = id;
        }
        ids
    }

    // -- Selection --

    /// Currently selected entity.
    #[must_use]
    pub fn selected(&self) -> Option<EntityId> {
        self.selected
    }

    /// Mutable access to the selected entity.
    pub fn selected_entity_mut(&mut self) -> Option<&mut Entity> {
        let id = self.selected?;
        self.get_mut(id)
    }

    /// Make `id` the only selected entity.
    ///
    /// Returns `false`, leaving the selection untouched, if the entity does
    /// not exist or is not selectable.
    pub fn select(&mut self, id: EntityId) -> bool {
        match self.get(id) {
            Some(entity) if entity.selectable => {}
            _ => return false,
        }
        if self.selected == Some(id) {
            return true;
        }
        let _ = self.deselect_all();
        if let Some(entity) = self.get_mut(id) {
            entity.selected = true;
        }
        self.selected = Some(id);
        log::debug!("selected entity {id}");
        true
    }

    /// Clear the selection and return what was selected.
    ///
    /// Path points the entity had collected are dropped; a running motion
    /// keeps going.
    pub fn deselect_all(&mut self) -> Option<EntityId> {
        let previous = self.selected.take()?;
        if let Some(entity) = self.get_mut(previous) {
            entity.selected = false;
            entity.motion.clear_points();
        }
        log::debug!("deselected entity {previous}");
        Some(previous)
    }

    /// Colour used for the selected entity.
    pub fn set_selected_color(&mut self, color: [f32; 3]) {
        self.selected_color = color;
        self.invalidate();
    }

    // -- Motion --

    /// Per-frame path step shared by every entity.
    #[must_use]
    pub fn motion_speed(&self) -> f32 {
        self.motion_speed
    }

    /// Set the path step for every current and future entity.
    pub fn set_motion_speed(&mut self, speed: f32) {
        self.motion_speed = clamp_speed(speed);
        for entity in &mut self.entities {
            entity.motion.set_speed(self.motion_speed);
        }
        log::debug!("motion speed: {}", self.motion_speed);
    }

    /// Step every running path motion, writing positions into transforms
    /// and refreshing their matrices. Returns the entities whose motion
    /// finished on this step.
    pub fn advance_motions(&mut self) -> Vec<EntityId> {
        let mut finished = Vec::new();
        let mut moved = false;
        for entity in &mut self.entities {
            let Some(step) = entity.motion.advance() else {
                continue;
            };
            entity.transform.set_translation(step.position);
            entity.transform.update_model_matrix();
            moved = true;
            if step.finished {
                log::debug!("entity {} finished its path", entity.id());
                finished.push(entity.id());
            }
        }
        if moved {
            self.invalidate();
        }
        finished
    }

    // -- Matrices and picking --

    /// Recompute every dirty model matrix. Returns how many were refreshed.
    pub fn refresh_transforms(&mut self) -> usize {
        let mut refreshed = 0;
        for entity in &mut self.entities {
            if entity.transform.is_dirty() {
                entity.transform.update_model_matrix();
                refreshed += 1;
            }
        }
        if refreshed > 0 {
            self.invalidate();
        }
        refreshed
    }

    fn pick_candidates(
        &self,
    ) -> impl Iterator<Item = PickCandidate<'_, EntityId>> {
        self.entities
            .iter()
            .filter(|e| e.visible)
            .map(|e| PickCandidate {
                key: e.id(),
                geometry: e.geometry().as_ref(),
                transform: &e.transform,
                selectable: e.selectable,
            })
    }

    /// Closest selectable, visible entity under `ray`.
    ///
    /// Uses the cached model matrices; call
    /// [`Self::refresh_transforms`] first.
    #[must_use]
    pub fn pick(&self, ray: &Ray) -> Option<PickHit<EntityId>> {
        picking::pick(ray, self.pick_candidates())
    }

    /// [`Self::pick`] with work counters.
    #[must_use]
    pub fn pick_with_stats(
        &self,
        ray: &Ray,
    ) -> (Option<PickHit<EntityId>>, PickStats) {
        picking::pick_with_stats(ray, self.pick_candidates())
    }

    // -- Rendering --

    /// One draw item per visible entity.
    #[must_use]
    pub fn render_items(&self) -> Vec<RenderItem> {
        self.entities
            .iter()
            .filter(|e| e.visible)
            .map(|e| RenderItem {
                id: e.id(),
                geometry: Arc::clone(e.geometry()),
                uniform: ObjectUniform {
                    model: e.transform.model_matrix().to_cols_array_2d(),
                    color: if e.is_selected() {
                        self.selected_color
                    } else {
                        e.base_color
                    },
                    selected: u32::from(e.is_selected()),
                },
            })
            .collect()
    }
}

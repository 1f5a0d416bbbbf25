use std::fmt;
use std::sync::Arc;

use rand::Rng;

use crate::animation::PathMotion;
use crate::mesh::MeshGeometry;
use crate::transform::Transform;

// ---------------------------------------------------------------------------
// EntityId
// ---------------------------------------------------------------------------

/// Stable handle for an entity. Never reused within a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A placed mesh with its interaction state.
#[derive(Debug, Clone)]
pub struct Entity {
    id: EntityId,
    /// Display name (defaults to the mesh name).
    pub name: String,
    geometry: Arc<MeshGeometry>,
    /// Placement in the world.
    pub transform: Transform,
    /// Whether picking may select this entity.
    pub selectable: bool,
    /// Whether the entity is drawn.
    pub visible: bool,
    /// Colour when not selected.
    pub base_color: [f32; 3],
    /// Path motion state.
    pub motion: PathMotion,
    pub(super) selected: bool,
}

impl Entity {
    pub(super) fn new(
        id: EntityId,
        geometry: Arc<MeshGeometry>,
        transform: Transform,
        motion_speed: f32,
    ) -> Self {
        Self {
            id,
            name: geometry.name().to_owned(),
            geometry,
            transform,
            selectable: true,
            visible: true,
            base_color: random_color(),
            motion: PathMotion::new(motion_speed),
            selected: false,
        }
    }

    /// Handle of this entity.
    #[must_use]
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Shared geometry.
    #[must_use]
    pub fn geometry(&self) -> &Arc<MeshGeometry> {
        &self.geometry
    }

    /// Whether this entity is the scene's selection.
    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.selected
    }
}

/// Bright-ish random colour so entities stand out against a dark clear.
fn random_color() -> [f32; 3] {
    let mut rng = rand::rng();
    [
        rng.random_range(0.2..1.0),
        rng.random_range(0.2..1.0),
        rng.random_range(0.2..1.0),
    ]
}

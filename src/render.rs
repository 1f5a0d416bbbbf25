//! Renderer-facing snapshots.
//!
//! The crate does no drawing. Each frame a renderer pulls one
//! [`RenderItem`] per visible entity plus the camera's
//! [`CameraUniform`](crate::camera::CameraUniform) and uploads them as-is.

use std::sync::Arc;

use crate::mesh::MeshGeometry;
use crate::scene::EntityId;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
/// Per-object uniform block.
pub struct ObjectUniform {
    /// Column-major model matrix.
    pub model: [[f32; 4]; 4],
    /// Linear RGB colour, already swapped for the selection tint.
    pub color: [f32; 3],
    /// 1 when the entity is selected.
    pub selected: u32,
}

/// One entity ready to draw.
#[derive(Debug, Clone)]
pub struct RenderItem {
    /// Source entity.
    pub id: EntityId,
    /// Vertex and index data.
    pub geometry: Arc<MeshGeometry>,
    /// Uniform contents for this draw.
    pub uniform: ObjectUniform,
}

//! Immutable mesh geometry shared between entities.
//!
//! A [`MeshGeometry`] is built once (from raw buffers, an OBJ file or a
//! primitive generator), validated, and then only read. Entities hold it
//! behind an `Arc`, so several entities can share one mesh.

pub mod obj;
pub mod primitives;

use glam::Vec3;

use crate::error::OrreryError;
use crate::math::{BoundingSphere, Triangle};

/// Interleaved vertex as uploaded to the renderer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    /// Local-space position.
    pub position: [f32; 3],
    /// Unit normal.
    pub normal: [f32; 3],
}

/// Validated triangle mesh with precomputed picking data.
#[derive(Debug, Clone)]
pub struct MeshGeometry {
    name: String,
    vertices: Vec<MeshVertex>,
    indices: Vec<u32>,
    triangles: Vec<Triangle>,
    bounding_sphere: BoundingSphere,
}

impl MeshGeometry {
    /// Build from positions and a triangle index list, computing
    /// area-weighted vertex normals.
    pub fn from_indexed(
        name: impl Into<String>,
        positions: &[Vec3],
        indices: Vec<u32>,
    ) -> Result<Self, OrreryError> {
        validate_indices(positions.len(), &indices)?;
        let normals = vertex_normals(positions, &indices);
        Ok(Self::assemble(name.into(), positions, &normals, indices))
    }

    /// Build from positions, explicit per-vertex normals and indices.
    pub fn with_normals(
        name: impl Into<String>,
        positions: &[Vec3],
        normals: &[Vec3],
        indices: Vec<u32>,
    ) -> Result<Self, OrreryError> {
        if normals.len() != positions.len() {
            return Err(OrreryError::InvalidGeometry(format!(
                "{} normals for {} positions",
                normals.len(),
                positions.len()
            )));
        }
        validate_indices(positions.len(), &indices)?;
        Ok(Self::assemble(name.into(), positions, normals, indices))
    }

    /// Build an unindexed mesh from a triangle soup.
    pub fn from_triangles(
        name: impl Into<String>,
        triangles: &[Triangle],
    ) -> Self {
        let positions: Vec<Vec3> = triangles
            .iter()
            .flat_map(|t| [t.v0, t.v1, t.v2])
            .collect();
        let indices: Vec<u32> = (0..positions.len() as u32).collect();
        let normals = vertex_normals(&positions, &indices);
        Self::assemble(name.into(), &positions, &normals, indices)
    }

    fn assemble(
        name: String,
        positions: &[Vec3],
        normals: &[Vec3],
        indices: Vec<u32>,
    ) -> Self {
        let vertices = positions
            .iter()
            .zip(normals)
            .map(|(p, n)| MeshVertex {
                position: p.to_array(),
                normal: n.to_array(),
            })
            .collect();
        let triangles = indices
            .chunks_exact(3)
            .map(|tri| {
                Triangle::new(
                    positions[tri[0] as usize],
                    positions[tri[1] as usize],
                    positions[tri[2] as usize],
                )
            })
            .collect();
        Self {
            name,
            vertices,
            indices,
            triangles,
            bounding_sphere: BoundingSphere::from_points(positions),
        }
    }

    /// Mesh name (OBJ object name or primitive name).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Vertex buffer contents.
    pub fn vertices(&self) -> &[MeshVertex] {
        &self.vertices
    }

    /// Index buffer contents, three per triangle.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Local-space triangles for picking.
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Local-space bounding sphere.
    pub fn bounding_sphere(&self) -> BoundingSphere {
        self.bounding_sphere
    }

    /// Whether the mesh has no triangles and so can never be picked.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

fn validate_indices(
    vertex_count: usize,
    indices: &[u32],
) -> Result<(), OrreryError> {
    if indices.len() % 3 != 0 {
        return Err(OrreryError::InvalidGeometry(format!(
            "index count {} is not a multiple of 3",
            indices.len()
        )));
    }
    if let Some(&bad) = indices.iter().find(|&&i| i as usize >= vertex_count)
    {
        return Err(OrreryError::InvalidGeometry(format!(
            "index {bad} out of range for {vertex_count} vertices"
        )));
    }
    Ok(())
}

/// Area-weighted vertex normals. Vertices with no incident area get +Y.
fn vertex_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut accum = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let face =
            Triangle::new(positions[a], positions[b], positions[c])
                .scaled_normal();
        accum[a] += face;
        accum[b] += face;
        accum[c] += face;
    }
    accum
        .into_iter()
        .map(|n| n.try_normalize().unwrap_or(Vec3::Y))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> (Vec<Vec3>, Vec<u32>) {
        (
            vec![
                Vec3::new(-1.0, -1.0, 0.0),
                Vec3::new(1.0, -1.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(-1.0, 1.0, 0.0),
            ],
            vec![0, 1, 2, 2, 3, 0],
        )
    }

    #[test]
    fn indexed_quad_builds_triangles_and_sphere() {
        let (positions, indices) = quad();
        let mesh = MeshGeometry::from_indexed("quad", &positions, indices)
            .unwrap();

        assert_eq!(mesh.name(), "quad");
        assert_eq!(mesh.triangles().len(), 2);
        assert_eq!(mesh.vertices().len(), 4);
        let sphere = mesh.bounding_sphere();
        assert!(sphere.center.abs_diff_eq(Vec3::ZERO, 1e-6));
        assert!((sphere.radius - 2.0_f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn computed_normals_face_the_winding() {
        let (positions, indices) = quad();
        let mesh = MeshGeometry::from_indexed("quad", &positions, indices)
            .unwrap();
        for v in mesh.vertices() {
            assert!(Vec3::from(v.normal).abs_diff_eq(Vec3::Z, 1e-6));
        }
    }

    #[test]
    fn partial_triangle_is_rejected() {
        let (positions, _) = quad();
        let err = MeshGeometry::from_indexed("bad", &positions, vec![0, 1])
            .unwrap_err();
        assert!(matches!(err, OrreryError::InvalidGeometry(_)));
    }

    #[test]
    fn dangling_index_is_rejected() {
        let (positions, _) = quad();
        let err = MeshGeometry::from_indexed("bad", &positions, vec![0, 1, 9])
            .unwrap_err();
        assert!(err.to_string().contains("index 9"));
    }

    #[test]
    fn normal_count_must_match() {
        let (positions, indices) = quad();
        let result =
            MeshGeometry::with_normals("bad", &positions, &[Vec3::Z], indices);
        assert!(result.is_err());
    }

    #[test]
    fn empty_mesh_is_unpickable() {
        let mesh = MeshGeometry::from_indexed("empty", &[], Vec::new()).unwrap();
        assert!(mesh.is_empty());
        assert_eq!(mesh.bounding_sphere(), BoundingSphere::EMPTY);
    }

    #[test]
    fn triangle_soup_is_indexed_sequentially() {
        let tri = Triangle::new(Vec3::ZERO, Vec3::X, Vec3::Y);
        let mesh = MeshGeometry::from_triangles("soup", &[tri, tri]);
        assert_eq!(mesh.indices(), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(mesh.triangles()[1], tri);
    }
}

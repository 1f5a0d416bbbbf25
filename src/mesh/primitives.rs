//! Procedural meshes for demos, tests and the axes helper.

use glam::Vec3;

use super::MeshGeometry;
use crate::error::OrreryError;

/// Axis-aligned box between `min` and `max` with flat per-face normals.
pub fn cuboid(
    name: impl Into<String>,
    min: Vec3,
    max: Vec3,
) -> Result<MeshGeometry, OrreryError> {
    // (normal, four corners counter-clockwise seen from outside)
    let faces: [(Vec3, [Vec3; 4]); 6] = [
        (
            Vec3::Z,
            [
                Vec3::new(min.x, min.y, max.z),
                Vec3::new(max.x, min.y, max.z),
                Vec3::new(max.x, max.y, max.z),
                Vec3::new(min.x, max.y, max.z),
            ],
        ),
        (
            Vec3::NEG_Z,
            [
                Vec3::new(min.x, min.y, min.z),
                Vec3::new(min.x, max.y, min.z),
                Vec3::new(max.x, max.y, min.z),
                Vec3::new(max.x, min.y, min.z),
            ],
        ),
        (
            Vec3::NEG_X,
            [
                Vec3::new(min.x, min.y, min.z),
                Vec3::new(min.x, min.y, max.z),
                Vec3::new(min.x, max.y, max.z),
                Vec3::new(min.x, max.y, min.z),
            ],
        ),
        (
            Vec3::X,
            [
                Vec3::new(max.x, min.y, max.z),
                Vec3::new(max.x, min.y, min.z),
                Vec3::new(max.x, max.y, min.z),
                Vec3::new(max.x, max.y, max.z),
            ],
        ),
        (
            Vec3::Y,
            [
                Vec3::new(min.x, max.y, max.z),
                Vec3::new(max.x, max.y, max.z),
                Vec3::new(max.x, max.y, min.z),
                Vec3::new(min.x, max.y, min.z),
            ],
        ),
        (
            Vec3::NEG_Y,
            [
                Vec3::new(min.x, min.y, min.z),
                Vec3::new(max.x, min.y, min.z),
                Vec3::new(max.x, min.y, max.z),
                Vec3::new(min.x, min.y, max.z),
            ],
        ),
    ];

    let mut positions = Vec::with_capacity(24);
    let mut normals = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, corners) in faces {
        let base = positions.len() as u32;
        positions.extend_from_slice(&corners);
        normals.extend_from_slice(&[normal; 4]);
        indices.extend_from_slice(&[
            base,
            base + 1,
            base + 2,
            base + 2,
            base + 3,
            base,
        ]);
    }
    MeshGeometry::with_normals(name, &positions, &normals, indices)
}

/// Cube of edge `size` centered at the origin.
pub fn cube(
    name: impl Into<String>,
    size: f32,
) -> Result<MeshGeometry, OrreryError> {
    let half = Vec3::splat(size * 0.5);
    cuboid(name, -half, half)
}

/// Thin bar from the origin along +Y, used for the axes helper. The scene
/// rotates copies of it onto +X and +Z.
pub fn axis_bar(
    length: f32,
    thickness: f32,
) -> Result<MeshGeometry, OrreryError> {
    let half = thickness * 0.5;
    cuboid(
        "axis",
        Vec3::new(-half, 0.0, -half),
        Vec3::new(half, length, half),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_has_twelve_triangles_and_corner_radius() {
        let mesh = cube("cube", 2.0).unwrap();
        assert_eq!(mesh.triangles().len(), 12);
        assert_eq!(mesh.vertices().len(), 24);
        let sphere = mesh.bounding_sphere();
        assert!(sphere.center.abs_diff_eq(Vec3::ZERO, 1e-6));
        assert!((sphere.radius - 3.0_f32.sqrt()).abs() < 1e-5);
    }

    #[test]
    fn cube_faces_wind_outward() {
        let mesh = cube("cube", 1.0).unwrap();
        for (tri, chunk) in mesh.triangles().iter().zip(mesh.indices().chunks(3))
        {
            let stored = Vec3::from(mesh.vertices()[chunk[0] as usize].normal);
            let winding = tri.scaled_normal().normalize();
            assert!(winding.abs_diff_eq(stored, 1e-6));
        }
    }

    #[test]
    fn axis_bar_runs_along_y() {
        let mesh = axis_bar(2.0, 0.1).unwrap();
        let sphere = mesh.bounding_sphere();
        assert!(sphere.center.abs_diff_eq(Vec3::new(0.0, 1.0, 0.0), 1e-6));
        assert!(sphere.radius > 1.0);
    }
}

//! Wavefront OBJ import via `tobj`.

use std::io::BufRead;
use std::path::Path;

use glam::Vec3;

use super::MeshGeometry;
use crate::error::OrreryError;

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        triangulate: true,
        single_index: true,
        ..Default::default()
    }
}

/// Load every object in an OBJ file as a separate mesh. Materials are
/// ignored.
pub fn load_obj(path: impl AsRef<Path>) -> Result<Vec<MeshGeometry>, OrreryError> {
    let path = path.as_ref();
    let (models, _materials) = tobj::load_obj(path, &load_options())?;
    let meshes = convert_models(models)?;
    log::info!("loaded {} mesh(es) from {}", meshes.len(), path.display());
    Ok(meshes)
}

/// Load OBJ data from an in-memory reader. `mtllib` statements are not
/// followed.
pub fn load_obj_from_reader(
    reader: &mut impl BufRead,
) -> Result<Vec<MeshGeometry>, OrreryError> {
    let (models, _materials) =
        tobj::load_obj_buf(reader, &load_options(), |_| {
            Err(tobj::LoadError::OpenFileFailed)
        })?;
    convert_models(models)
}

fn convert_models(
    models: Vec<tobj::Model>,
) -> Result<Vec<MeshGeometry>, OrreryError> {
    models.into_iter().map(convert_model).collect()
}

fn convert_model(model: tobj::Model) -> Result<MeshGeometry, OrreryError> {
    let mesh = model.mesh;
    let positions: Vec<Vec3> = mesh
        .positions
        .chunks_exact(3)
        .map(Vec3::from_slice)
        .collect();

    let normals: Vec<Vec3> = mesh
        .normals
        .chunks_exact(3)
        .map(Vec3::from_slice)
        .collect();

    if normals.len() == positions.len() && !normals.is_empty() {
        MeshGeometry::with_normals(model.name, &positions, &normals, mesh.indices)
    } else {
        MeshGeometry::from_indexed(model.name, &positions, mesh.indices)
    }
}

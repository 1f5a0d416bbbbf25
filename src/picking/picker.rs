use glam::Vec3;

use crate::math::Ray;
use crate::mesh::MeshGeometry;
use crate::transform::Transform;

/// One pickable thing: a mesh placed by a transform.
///
/// The transform's cached model matrix is used as-is, so callers refresh
/// dirty transforms before picking.
#[derive(Debug, Clone, Copy)]
pub struct PickCandidate<'a, K> {
    /// Caller-side identifier returned in the hit.
    pub key: K,
    /// Local-space geometry.
    pub geometry: &'a MeshGeometry,
    /// Placement of the geometry.
    pub transform: &'a Transform,
    /// Unselectable candidates are skipped entirely.
    pub selectable: bool,
}

/// Closest intersection found by [`pick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit<K> {
    /// Key of the hit candidate.
    pub key: K,
    /// World-space distance from the ray origin.
    pub distance: f32,
    /// World-space hit point.
    pub point: Vec3,
}

/// Work counters from [`pick_with_stats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PickStats {
    /// Selectable candidates considered.
    pub candidates: usize,
    /// Candidates rejected by the bounding-sphere test.
    pub pruned: usize,
    /// Ray-triangle tests performed.
    pub triangles_tested: usize,
}

/// Closest hit along `ray`, or `None`. Ties keep the first candidate.
pub fn pick<'a, K: Copy>(
    ray: &Ray,
    candidates: impl IntoIterator<Item = PickCandidate<'a, K>>,
) -> Option<PickHit<K>> {
    pick_with_stats(ray, candidates).0
}

/// [`pick`] plus counters describing how much work pruning saved.
pub fn pick_with_stats<'a, K: Copy>(
    ray: &Ray,
    candidates: impl IntoIterator<Item = PickCandidate<'a, K>>,
) -> (Option<PickHit<K>>, PickStats) {
    let mut stats = PickStats::default();
    let mut best: Option<PickHit<K>> = None;

    for candidate in candidates {
        if !candidate.selectable {
            continue;
        }
        stats.candidates += 1;

        let Some(hit) = pick_candidate(ray, &candidate, &mut stats) else {
            continue;
        };
        if best.is_none_or(|b| hit.distance < b.distance) {
            best = Some(hit);
        }
    }

    (best, stats)
}

fn pick_candidate<K: Copy>(
    ray: &Ray,
    candidate: &PickCandidate<'_, K>,
    stats: &mut PickStats,
) -> Option<PickHit<K>> {
    let model = candidate.transform.model_matrix();
    let world_sphere = candidate
        .geometry
        .bounding_sphere()
        .transformed(model, candidate.transform.scale());
    if !world_sphere.intersects_ray_line(ray) {
        stats.pruned += 1;
        return None;
    }

    let local_ray = ray.to_local(model)?;
    let triangles = candidate.geometry.triangles();
    stats.triangles_tested += triangles.len();

    let local_t = triangles
        .iter()
        .filter_map(|tri| tri.intersect_ray(&local_ray))
        .min_by(f32::total_cmp)?;

    let point = model.transform_point3(local_ray.point_at(local_t));
    Some(PickHit {
        key: candidate.key,
        distance: (point - ray.origin).dot(ray.direction),
        point,
    })
}

use serde::{Deserialize, Serialize};
use sculptor_core::Isometry;

use crate::aabb::Aabb;
use crate::shape::ShapeDims;

/// Vertical extent of a cluster, used to rest it on the floor and aim the camera.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SpatialBounds {
    pub bottom_y: f32,
    pub middle_y: f32,
    pub top_y: f32,
    pub height: f32,
}

/// World AABB of one shape: its transformed extent points plus the exact
/// extents of its round parts.
fn shape_aabb(dims: &ShapeDims, pose: &Isometry) -> Aabb {
    let mut b = Aabb::from_points(dims.extent_points().into_iter().map(|p| pose.transform_point(p)));
    for part in dims.round_parts() {
        let (c, half) = part.world_extent(pose);
        b = b.union(&Aabb::new(c - half, c + half));
    }
    b
}

fn world_aabb<'a, I>(shapes: I) -> Aabb
where
    I: IntoIterator<Item = (&'a ShapeDims, Isometry)>,
{
    shapes
        .into_iter()
        .fold(Aabb::empty(), |acc, (dims, pose)| acc.union(&shape_aabb(dims, &pose)))
}

/// Bottom, middle and top Y over every shape's geometry. Empty input is all zeros.
pub fn spatial_bounds<'a, I>(shapes: I) -> SpatialBounds
where
    I: IntoIterator<Item = (&'a ShapeDims, Isometry)>,
{
    let b = world_aabb(shapes);
    if b.is_empty() {
        return SpatialBounds::default();
    }
    let (lo, hi) = (b.min.y, b.max.y);
    SpatialBounds { bottom_y: lo, middle_y: (lo + hi) * 0.5, top_y: hi, height: hi - lo }
}

/// World AABB of the cluster, `None` when there is nothing to bound.
pub fn cluster_aabb<'a, I>(shapes: I) -> Option<Aabb>
where
    I: IntoIterator<Item = (&'a ShapeDims, Isometry)>,
{
    let b = world_aabb(shapes);
    (!b.is_empty()).then_some(b)
}

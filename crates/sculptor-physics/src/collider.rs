use rapier3d::prelude::ColliderBuilder;
use sculptor_geom::ColliderSpec;
use thiserror::Error;

use crate::convert::point_to_na;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PhysicsError {
    #[error("collider has a non-finite or non-positive size: {0}")]
    InvalidShape(String),
}

fn positive(v: f32) -> bool { v.is_finite() && v > 0.0 }

fn check(spec: &ColliderSpec) -> Result<(), PhysicsError> {
    let ok = match spec {
        ColliderSpec::Cuboid { half } => half.is_finite() && half.min_element() > 0.0,
        ColliderSpec::RoundCuboid { half, border } => {
            half.is_finite() && half.min_element() > 0.0 && border.is_finite() && *border >= 0.0
        }
        ColliderSpec::Ball { r } => positive(*r),
        ColliderSpec::Cylinder { half_height, r }
        | ColliderSpec::Cone { half_height, r } => positive(*half_height) && positive(*r),
        ColliderSpec::RoundCylinder { half_height, r, border } => {
            positive(*half_height) && positive(*r) && border.is_finite() && *border >= 0.0
        }
        // A zero-length capsule is a ball.
        ColliderSpec::Capsule { half_height, r } => half_height.is_finite() && *half_height >= 0.0 && positive(*r),
        ColliderSpec::ConvexHull { points, fallback_r } => {
            positive(*fallback_r) && points.iter().all(|p| p.is_finite())
        }
    };
    if ok { Ok(()) } else { Err(PhysicsError::InvalidShape(format!("{spec:?}"))) }
}

/// Engine collider for a spec. Hulls that cannot be built degrade to the
/// primitive's bounding ball.
pub fn build_collider(spec: &ColliderSpec) -> Result<ColliderBuilder, PhysicsError> {
    check(spec)?;
    let builder = match spec {
        ColliderSpec::Cuboid { half } => ColliderBuilder::cuboid(half.x, half.y, half.z),
        ColliderSpec::RoundCuboid { half, border } => ColliderBuilder::round_cuboid(half.x, half.y, half.z, *border),
        ColliderSpec::Ball { r } => ColliderBuilder::ball(*r),
        ColliderSpec::Cylinder { half_height, r } => ColliderBuilder::cylinder(*half_height, *r),
        ColliderSpec::RoundCylinder { half_height, r, border } => {
            ColliderBuilder::round_cylinder(*half_height, *r, *border)
        }
        ColliderSpec::Cone { half_height, r } => ColliderBuilder::cone(*half_height, *r),
        ColliderSpec::Capsule { half_height, r } => ColliderBuilder::capsule_y(*half_height, *r),
        ColliderSpec::ConvexHull { points, fallback_r } => {
            let pts: Vec<_> = points.iter().copied().map(point_to_na).collect();
            match ColliderBuilder::convex_hull(&pts) {
                Some(b) => b,
                None => {
                    log::warn!("convex hull of {} points failed; using ball r={fallback_r}", pts.len());
                    ColliderBuilder::ball(*fallback_r)
                }
            }
        }
    };
    Ok(builder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use sculptor_geom::{ShapeDims, ShapeKind};

    #[test]
    fn every_default_kind_builds() {
        for kind in ShapeKind::ALL {
            let spec = ShapeDims::default_for(kind).collider();
            assert!(build_collider(&spec).is_ok(), "{kind}");
        }
    }

    #[test]
    fn rejects_bad_sizes() {
        assert!(build_collider(&ColliderSpec::Ball { r: 0.0 }).is_err());
        assert!(build_collider(&ColliderSpec::Ball { r: f32::NAN }).is_err());
        assert!(build_collider(&ColliderSpec::Cuboid { half: Vec3::new(0.1, -0.1, 0.1) }).is_err());
    }
}

//! Property tests for the spatial bounds calculator.

use glam::{Quat, Vec3};
use proptest::prelude::*;
use sculptor_core::iso;
use sculptor_geom::{spatial_bounds, CapsuleDims, ShapeDims, ShapeKind, SphereDims};

fn any_kind() -> impl Strategy<Value = ShapeKind> {
    (0..ShapeKind::ALL.len()).prop_map(|i| ShapeKind::ALL[i])
}

fn any_rotation() -> impl Strategy<Value = Quat> {
    (-3.2f32..3.2, -3.2f32..3.2, -3.2f32..3.2)
        .prop_map(|(x, y, z)| Quat::from_euler(glam::EulerRot::XYZ, x, y, z))
}

fn any_position() -> impl Strategy<Value = Vec3> {
    (-5.0f32..5.0, -5.0f32..5.0, -5.0f32..5.0).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Bounds never leave the bounding sphere around the shape's centre.
    #[test]
    fn bounds_within_bounding_radius(kind in any_kind(), rot in any_rotation(), pos in any_position()) {
        let dims = ShapeDims::default_for(kind);
        let r = dims.bounding_radius();
        let b = spatial_bounds([(&dims, iso(pos, rot))]);
        prop_assert!(b.bottom_y >= pos.y - r - 1e-4);
        prop_assert!(b.top_y <= pos.y + r + 1e-4);
        prop_assert!((b.height - (b.top_y - b.bottom_y)).abs() < 1e-5);
        prop_assert!((b.middle_y - 0.5 * (b.top_y + b.bottom_y)).abs() < 1e-5);
    }

    /// Translating the pose shifts all three levels by the same amount.
    #[test]
    fn bounds_follow_translation(kind in any_kind(), rot in any_rotation(), dy in -3.0f32..3.0) {
        let dims = ShapeDims::default_for(kind);
        let a = spatial_bounds([(&dims, iso(Vec3::ZERO, rot))]);
        let b = spatial_bounds([(&dims, iso(Vec3::new(0.0, dy, 0.0), rot))]);
        prop_assert!((b.bottom_y - a.bottom_y - dy).abs() < 1e-4);
        prop_assert!((b.top_y - a.top_y - dy).abs() < 1e-4);
        prop_assert!((b.height - a.height).abs() < 1e-4);
    }

    /// Unrotated spheres are bounded exactly by their poles.
    #[test]
    fn upright_sphere_is_exact(r in 0.01f32..2.0, pos in any_position()) {
        let dims = ShapeDims::Sphere(SphereDims { r });
        let b = spatial_bounds([(&dims, iso(pos, Quat::IDENTITY))]);
        prop_assert!((b.bottom_y - (pos.y - r)).abs() < 1e-4);
        prop_assert!((b.top_y - (pos.y + r)).abs() < 1e-4);
    }

    /// Spheres are bounded by their true poles whatever their rotation.
    #[test]
    fn rotated_sphere_reaches_its_poles(r in 0.01f32..2.0, rot in any_rotation(), pos in any_position()) {
        let dims = ShapeDims::Sphere(SphereDims { r });
        let b = spatial_bounds([(&dims, iso(pos, rot))]);
        prop_assert!(b.top_y >= pos.y + r - 1e-4, "top {} for r {r} at {pos}", b.top_y);
        prop_assert!(b.bottom_y <= pos.y - r + 1e-4, "bottom {} for r {r} at {pos}", b.bottom_y);
        prop_assert!((b.height - 2.0 * r).abs() < 1e-4);
    }

    /// A capsule's lowest point is its lower cap centre minus the radius.
    #[test]
    fn rotated_capsule_bottom_is_cap_exact(h in 0.01f32..2.0, r in 0.01f32..1.0, rot in any_rotation()) {
        let dims = ShapeDims::Capsule(CapsuleDims { h, r });
        let b = spatial_bounds([(&dims, iso(Vec3::ZERO, rot))]);
        let cap = (rot * Vec3::new(0.0, h * 0.5, 0.0)).y.abs();
        prop_assert!((b.bottom_y + cap + r).abs() < 1e-4, "bottom {} cap {cap} r {r}", b.bottom_y);
        prop_assert!((b.top_y - cap - r).abs() < 1e-4);
    }
}

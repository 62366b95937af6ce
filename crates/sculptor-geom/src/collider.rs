use glam::Vec3;

/// Engine-neutral collider description. Native variants map 1:1 onto the
/// physics engine's primitives; everything else ships as a hull point cloud.
#[derive(Clone, Debug, PartialEq)]
pub enum ColliderSpec {
    Cuboid { half: Vec3 },
    RoundCuboid { half: Vec3, border: f32 },
    Ball { r: f32 },
    Cylinder { half_height: f32, r: f32 },
    RoundCylinder { half_height: f32, r: f32, border: f32 },
    Cone { half_height: f32, r: f32 },
    Capsule { half_height: f32, r: f32 },
    ConvexHull { points: Vec<Vec3>, fallback_r: f32 },
}

impl ColliderSpec {
    #[inline] pub fn is_native(&self) -> bool { !matches!(self, ColliderSpec::ConvexHull { .. }) }
}

use glam::{EulerRot, Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

pub type Scalar = f32;

#[inline] pub fn vec3(x: Scalar, y: Scalar, z: Scalar) -> Vec3 { Vec3::new(x, y, z) }
#[inline] pub fn vec2(x: Scalar, y: Scalar) -> Vec2 { Vec2::new(x, y) }
#[inline] pub fn iso(pos: Vec3, rot: Quat) -> Isometry { Isometry { pos, rot } }
#[inline] pub fn quat_identity() -> Quat { Quat::IDENTITY }

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Isometry { pub pos: Vec3, pub rot: Quat }

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity { pub lin: Vec3, pub ang: Vec3 }

impl Default for Isometry {
    fn default() -> Self { Self { pos: Vec3::ZERO, rot: Quat::IDENTITY } }
}

impl Isometry {
    #[inline] pub fn transform_point(&self, p: Vec3) -> Vec3 { self.pos + self.rot * p }
}

/// Intrinsic XYZ Euler angles, the convention the renderer stores.
#[inline]
pub fn quat_from_euler_xyz(e: Vec3) -> Quat { Quat::from_euler(EulerRot::XYZ, e.x, e.y, e.z) }

#[inline]
pub fn euler_xyz(q: Quat) -> Vec3 {
    let (x, y, z) = q.to_euler(EulerRot::XYZ);
    Vec3::new(x, y, z)
}

/// Horizontal distance from the vertical (Y) axis.
#[inline]
pub fn axis_distance(p: Vec3) -> Scalar { (p.x * p.x + p.z * p.z).sqrt() }

use glam::{Quat, Vec3};
use rapier3d::na::{Isometry3, Point3, Quaternion, Translation3, UnitQuaternion, Vector3};
use sculptor_core::Isometry;

#[inline] pub(crate) fn vec_to_na(v: Vec3) -> Vector3<f32> { Vector3::new(v.x, v.y, v.z) }
#[inline] pub(crate) fn point_to_na(v: Vec3) -> Point3<f32> { Point3::new(v.x, v.y, v.z) }
#[inline] pub(crate) fn vec_from_na(v: &Vector3<f32>) -> Vec3 { Vec3::new(v.x, v.y, v.z) }

#[inline]
pub(crate) fn quat_to_na(q: Quat) -> UnitQuaternion<f32> {
    UnitQuaternion::from_quaternion(Quaternion::new(q.w, q.x, q.y, q.z))
}

#[inline]
pub(crate) fn quat_from_na(q: &UnitQuaternion<f32>) -> Quat {
    Quat::from_xyzw(q.i, q.j, q.k, q.w)
}

#[inline]
pub(crate) fn iso_to_na(iso: &Isometry) -> Isometry3<f32> {
    Isometry3::from_parts(Translation3::new(iso.pos.x, iso.pos.y, iso.pos.z), quat_to_na(iso.rot))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quaternion_component_order_survives() {
        let q = Quat::from_euler(glam::EulerRot::XYZ, 0.3, -1.1, 2.0);
        let back = quat_from_na(&quat_to_na(q));
        assert!(q.dot(back).abs() > 1.0 - 1e-6);
        let p = Vec3::new(0.2, 0.5, -0.7);
        let rotated = quat_to_na(q) * point_to_na(p);
        assert!((Vec3::new(rotated.x, rotated.y, rotated.z) - q * p).length() < 1e-5);
    }
}

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use sculptor_core::{euler_xyz, iso, Isometry, ShapeToken};

use crate::shape::{ShapeDims, ShapeKind};

/// A generated or settled shape: geometry, pose and material slot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapeInstance {
    pub token: ShapeToken,
    pub dims: ShapeDims,
    pub position: Vec3,
    #[serde(default = "identity")]
    pub rotation: Quat,
    #[serde(default)]
    pub material: u32,
}

fn identity() -> Quat { Quat::IDENTITY }

impl ShapeInstance {
    pub fn new(token: ShapeToken, dims: ShapeDims, material: u32) -> Self {
        Self { token, dims, position: Vec3::ZERO, rotation: Quat::IDENTITY, material }
    }

    #[inline] pub fn kind(&self) -> ShapeKind { self.dims.kind() }
    #[inline] pub fn pose(&self) -> Isometry { iso(self.position, self.rotation) }

    /// Intrinsic XYZ Euler angles for the renderer.
    #[inline] pub fn euler(&self) -> Vec3 { euler_xyz(self.rotation) }

    pub fn set_pose(&mut self, pose: Isometry) {
        self.position = pose.pos;
        self.rotation = pose.rot;
    }
}

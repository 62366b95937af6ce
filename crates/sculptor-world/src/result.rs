use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use sculptor_core::{euler_xyz, BodyId, StepStats};
use sculptor_geom::{ShapeDims, ShapeKind, SpatialBounds};
use sculptor_physics::Overlap;

use crate::connectivity::ConnectivityReport;
use crate::resolution::ResolutionPhase;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionReason {
    /// Every dynamic body is attached and nothing overlaps.
    AllConnected,
    /// Attempts ran out before the cluster connected.
    Forced,
    /// The run was cancelled.
    UserStopped,
}

/// State of one body after a step. Anchors come first, in the order given.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodySnapshot {
    pub id: BodyId,
    pub kind: ShapeKind,
    pub dims: ShapeDims,
    pub position: Vec3,
    pub rotation: Quat,
    pub linear_velocity: Vec3,
    pub angular_velocity: Vec3,
    pub sleeping: bool,
    pub is_static: bool,
}

impl BodySnapshot {
    /// Orientation as intrinsic XYZ Euler angles.
    pub fn euler(&self) -> Vec3 { euler_xyz(self.rotation) }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OverlapPair {
    pub a: BodyId,
    pub b: BodyId,
    pub depth: f32,
}

impl From<Overlap> for OverlapPair {
    fn from(o: Overlap) -> Self { Self { a: o.a, b: o.b, depth: o.depth } }
}

/// What `PhysicsSimulator::step` reports.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub bodies: Vec<BodySnapshot>,
    pub frame: u32,
    pub attempts: u32,
    pub complete: bool,
    pub reason: Option<CompletionReason>,
    pub overlaps: Vec<OverlapPair>,
    pub resolution_iteration: u32,
    pub phase: ResolutionPhase,
    /// Present while settling and once complete.
    pub connectivity: Option<ConnectivityReport>,
    /// Present once complete.
    pub bounds: Option<SpatialBounds>,
    pub stats: StepStats,
}

impl SimulationResult {
    /// Snapshots of the bodies created from the run's new shapes.
    pub fn dynamic_bodies(&self) -> impl Iterator<Item = &BodySnapshot> {
        self.bodies.iter().filter(|b| !b.is_static)
    }
}

/// Outcome of a manual resolution request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ManualResolution {
    pub started: bool,
    pub phase: ResolutionPhase,
    pub remaining_overlaps: usize,
    pub connectivity: Option<ConnectivityReport>,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulatorStatus {
    pub initialized: bool,
    pub running: bool,
    pub frame: u32,
    pub attempts: u32,
    pub static_bodies: usize,
    pub dynamic_bodies: usize,
}

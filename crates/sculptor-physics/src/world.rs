use glam::{Quat, Vec3};
use rapier3d::prelude::*;
use sculptor_core::{BodyId, Isometry, Velocity};
use sculptor_geom::ColliderSpec;

use crate::collider::{build_collider, PhysicsError};
use crate::convert::{iso_to_na, quat_from_na, vec_from_na, vec_to_na};
use crate::events::{body_of, ContactForceCollector};

/// Contact distance below which two bodies count as interpenetrating.
pub const PENETRATION_EPS: f32 = 1e-4;

/// Creation parameters for one body.
#[derive(Clone, Debug)]
pub struct BodyDesc {
    pub pose: Isometry,
    pub collider: ColliderSpec,
    pub dynamic: bool,
    pub friction: f32,
}

/// One interpenetrating pair, `a < b`, with the deepest contact's depth.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Overlap {
    pub a: BodyId,
    pub b: BodyId,
    pub depth: f32,
}

/// A contact point seen from one body: `normal` points away from that body.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BodyContact {
    pub other: BodyId,
    pub dist: f32,
    pub normal: Vec3,
}

struct Slot {
    body: RigidBodyHandle,
    collider: ColliderHandle,
    dynamic: bool,
}

/// Zero-gravity rigid-body world. Bodies are addressed by creation index.
pub struct PhysicsWorld {
    gravity: Vector<Real>,
    params: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: BroadPhaseBvh,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd: CCDSolver,
    events: ContactForceCollector,
    slots: Vec<Slot>,
}

impl Default for PhysicsWorld {
    fn default() -> Self { Self::new() }
}

impl PhysicsWorld {
    pub fn new() -> Self {
        Self {
            gravity: Vector::zeros(),
            params: IntegrationParameters::default(),
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: BroadPhaseBvh::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd: CCDSolver::new(),
            events: ContactForceCollector::default(),
            slots: Vec::new(),
        }
    }

    /// Adds a body with one collider. Static bodies are fixed at `desc.pose`.
    pub fn add(&mut self, desc: &BodyDesc) -> Result<BodyId, PhysicsError> {
        let id = BodyId(self.slots.len() as u32);
        let collider = build_collider(&desc.collider)?
            .friction(desc.friction)
            .restitution(0.0)
            .active_events(ActiveEvents::CONTACT_FORCE_EVENTS)
            .contact_force_event_threshold(0.0)
            .user_data(id.0 as u128)
            .build();

        let pose = iso_to_na(&desc.pose);
        let builder = if desc.dynamic { RigidBodyBuilder::dynamic() } else { RigidBodyBuilder::fixed() };
        let builder = builder.translation(pose.translation.vector).rotation(pose.rotation.scaled_axis());
        let rb = if desc.dynamic {
            builder
                .linear_damping(1.0)
                .angular_damping(10.0)
                .ccd_enabled(true)
                .additional_mass(0.001)
                .build()
        } else {
            builder.build()
        };
        let body = self.bodies.insert(rb);
        let collider = self.colliders.insert_with_parent(collider, body, &mut self.bodies);
        self.slots.push(Slot { body, collider, dynamic: desc.dynamic });
        Ok(id)
    }

    #[inline] pub fn len(&self) -> usize { self.slots.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.slots.is_empty() }
    pub fn indices(&self) -> impl Iterator<Item = BodyId> + '_ { (0..self.slots.len() as u32).map(BodyId) }
    pub fn dynamic_indices(&self) -> impl Iterator<Item = BodyId> + '_ {
        self.indices().filter(|&id| self.is_dynamic(id))
    }

    #[inline]
    pub fn is_dynamic(&self, id: BodyId) -> bool {
        self.slots.get(id.index()).is_some_and(|s| s.dynamic)
    }

    fn rb(&self, id: BodyId) -> Option<&RigidBody> {
        self.slots.get(id.index()).and_then(|s| self.bodies.get(s.body))
    }

    fn rb_mut(&mut self, id: BodyId) -> Option<&mut RigidBody> {
        let handle = self.slots.get(id.index())?.body;
        self.bodies.get_mut(handle)
    }

    pub fn pose(&self, id: BodyId) -> Isometry {
        self.rb(id)
            .map(|rb| Isometry { pos: vec_from_na(rb.translation()), rot: quat_from_na(rb.rotation()) })
            .unwrap_or_default()
    }

    pub fn rotation(&self, id: BodyId) -> Quat { self.pose(id).rot }

    pub fn vel(&self, id: BodyId) -> Velocity {
        self.rb(id)
            .map(|rb| Velocity { lin: vec_from_na(rb.linvel()), ang: vec_from_na(rb.angvel()) })
            .unwrap_or_default()
    }

    pub fn set_vel(&mut self, id: BodyId, v: Velocity) {
        if let Some(rb) = self.rb_mut(id) {
            rb.set_linvel(vec_to_na(v.lin), true);
            rb.set_angvel(vec_to_na(v.ang), true);
        }
    }

    pub fn zero_velocity(&mut self, id: BodyId) { self.set_vel(id, Velocity::default()); }

    pub fn set_translation(&mut self, id: BodyId, pos: Vec3) {
        if let Some(rb) = self.rb_mut(id) {
            rb.set_translation(vec_to_na(pos), true);
        }
    }

    pub fn apply_impulse(&mut self, id: BodyId, j: Vec3) {
        if let Some(rb) = self.rb_mut(id) {
            rb.apply_impulse(vec_to_na(j), true);
        }
    }

    pub fn wake(&mut self, id: BodyId) {
        if let Some(rb) = self.rb_mut(id) {
            rb.wake_up(true);
        }
    }

    pub fn is_sleeping(&self, id: BodyId) -> bool { self.rb(id).is_some_and(|rb| rb.is_sleeping()) }

    pub fn lock_rotations(&mut self, id: BodyId, locked: bool) {
        if let Some(rb) = self.rb_mut(id) {
            rb.lock_rotations(locked, true);
        }
    }

    /// Advances the world by `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        self.params.dt = dt;
        self.pipeline.step(
            &self.gravity,
            &self.params,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd,
            &(),
            &self.events,
        );
    }

    /// Body pairs that pushed on each other since the last drain.
    pub fn drain_contact_pairs(&mut self) -> Vec<(BodyId, BodyId)> { self.events.drain() }

    /// Every interpenetrating pair, one entry per pair, sorted by ids.
    pub fn overlaps(&self) -> Vec<Overlap> {
        let mut out = Vec::new();
        for pair in self.narrow_phase.contact_pairs() {
            let (Some(a), Some(b)) = (
                body_of(&self.colliders, pair.collider1),
                body_of(&self.colliders, pair.collider2),
            ) else {
                continue;
            };
            let deepest = pair
                .manifolds
                .iter()
                .flat_map(|m| m.points.iter())
                .map(|p| p.dist)
                .fold(f32::INFINITY, f32::min);
            if deepest < -PENETRATION_EPS {
                let (a, b) = if a < b { (a, b) } else { (b, a) };
                out.push(Overlap { a, b, depth: -deepest });
            }
        }
        out.sort_by_key(|o| (o.a, o.b));
        out
    }

    /// Contact points touching `id`, normals oriented away from it.
    pub fn contacts_of(&self, id: BodyId) -> Vec<BodyContact> {
        let Some(slot) = self.slots.get(id.index()) else { return Vec::new() };
        let mut out = Vec::new();
        for pair in self.narrow_phase.contact_pairs_with(slot.collider) {
            let (own_first, other_handle) = if pair.collider1 == slot.collider {
                (true, pair.collider2)
            } else {
                (false, pair.collider1)
            };
            let Some(other) = body_of(&self.colliders, other_handle) else { continue };
            for manifold in &pair.manifolds {
                let n = vec_from_na(&manifold.data.normal);
                let normal = if own_first { n } else { -n };
                for p in &manifold.points {
                    out.push(BodyContact { other, dist: p.dist, normal });
                }
            }
        }
        out
    }
}

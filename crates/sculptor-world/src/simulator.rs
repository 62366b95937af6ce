use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use sculptor_core::{hash_quat, hash_vec3, iso, BodyId, StepHasher, StepStats, XorShift64};
use sculptor_geom::{spatial_bounds, ShapeDims, SpatialBounds};
use sculptor_gravity::CenterPull;
use sculptor_physics::{BodyDesc, Overlap, PhysicsWorld};

use crate::config::SimulationConfig;
use crate::connectivity::{analyse, ContactGraph, ConnectivityReport};
use crate::error::SimError;
use crate::placement::PlacementSeeder;
use crate::resolution::{OverlapResolver, ResolutionPhase};
use crate::result::{
    BodySnapshot, CompletionReason, ManualResolution, OverlapPair, SimulationResult, SimulatorStatus,
};

/// Speed under which a lone body counts as at rest.
const REST_SPEED: f32 = 0.01;

/// Shared stop flag, checked at the top of every `step()`.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn cancel(&self) { self.0.store(true, Ordering::Relaxed); }
    pub fn is_cancelled(&self) -> bool { self.0.load(Ordering::Relaxed) }
}

/// Drives one settle run: new shapes fall toward the axis around the anchors
/// until they form a single touching, non-overlapping cluster.
pub struct PhysicsSimulator {
    config: SimulationConfig,
    rng: XorShift64,
    pull: CenterPull,
    world: Option<PhysicsWorld>,
    dims: Vec<ShapeDims>,
    dynamic: Vec<bool>,
    /// Contact-force pairs from the most recent frame.
    contacts: Vec<(BodyId, BodyId)>,
    resolver: OverlapResolver,
    cancel: CancelHandle,
    frame: u32,
    attempts: u32,
    running: bool,
    finished: Option<(CompletionReason, SpatialBounds)>,
}

impl PhysicsSimulator {
    pub fn new(config: SimulationConfig) -> Self {
        let rng = XorShift64::from_seed_str(&config.seed);
        let pull = CenterPull { strength: config.gravity_strength, vertical_offset: config.vertical_offset };
        Self {
            config,
            rng,
            pull,
            world: None,
            dims: Vec::new(),
            dynamic: Vec::new(),
            contacts: Vec::new(),
            resolver: OverlapResolver::default(),
            cancel: CancelHandle::default(),
            frame: 0,
            attempts: 0,
            running: false,
            finished: None,
        }
    }

    #[inline] pub fn config(&self) -> &SimulationConfig { &self.config }
    #[inline] pub fn cancel_handle(&self) -> CancelHandle { self.cancel.clone() }
    #[inline] pub fn is_initialized(&self) -> bool { self.world.is_some() }

    /// Builds the world: anchors as fixed bodies at their stored pose, then the
    /// new shapes as dynamic bodies at seeded starting poses.
    pub fn initialize(&mut self) -> Result<(), SimError> {
        if self.world.is_some() {
            self.reset();
        }
        let cfg = &self.config;
        let mut world = PhysicsWorld::new();
        let mut dims = Vec::with_capacity(cfg.anchors.len() + cfg.shapes.len());

        for (index, anchor) in cfg.anchors.iter().enumerate() {
            let desc = BodyDesc {
                pose: anchor.pose(),
                collider: anchor.dims.collider(),
                dynamic: false,
                friction: cfg.friction,
            };
            world.add(&desc).map_err(|source| SimError::AdapterInit { index, source })?;
            dims.push(anchor.dims);
        }

        let new_dims: Vec<ShapeDims> = cfg.shapes.iter().map(|s| s.dims).collect();
        let poses = PlacementSeeder::from(cfg).place(&new_dims, &mut self.rng);
        for (k, (d, pose)) in new_dims.iter().zip(poses).enumerate() {
            let desc = BodyDesc { pose, collider: d.collider(), dynamic: true, friction: cfg.friction };
            world
                .add(&desc)
                .map_err(|source| SimError::AdapterInit { index: cfg.anchors.len() + k, source })?;
            dims.push(*d);
        }

        log::info!(
            "simulation ready: {} anchors, {} new shapes, seed {:?}",
            cfg.anchors.len(),
            cfg.shapes.len(),
            cfg.seed
        );
        self.dynamic = world.indices().map(|id| world.is_dynamic(id)).collect();
        self.dims = dims;
        self.world = Some(world);
        Ok(())
    }

    /// Advances `steps_per_iteration` frames, runs the overlap resolver and
    /// checks for completion. After completion it keeps returning the final
    /// state without advancing.
    pub fn step(&mut self) -> Result<SimulationResult, SimError> {
        if self.world.is_none() {
            return Err(SimError::NotInitialized);
        }
        if self.finished.is_none() && self.cancel.is_cancelled() {
            log::info!("simulation stopped at frame {}", self.frame);
            let bounds = self.bounds();
            self.finished = Some((CompletionReason::UserStopped, bounds));
        }
        if self.finished.is_some() {
            self.running = false;
            return Ok(self.result(0, StepStats::default()));
        }
        self.running = true;

        let mut stats = StepStats::default();
        let mut connected = false;
        for _ in 0..self.config.steps_per_iteration.max(1) {
            self.frame += 1;
            self.advance_frame(&mut stats);
            connected |= self.evaluate_connectivity(&mut stats).fully_connected;
        }

        let budget = self.config.frame_budget(self.attempts);
        let Some(world) = self.world.as_mut() else { return Err(SimError::NotInitialized) };
        if connected && self.frame >= budget && self.resolver.is_idle() && self.config.overlap_resolution {
            let overlaps = world.overlaps();
            self.resolver.start(world, &overlaps);
        }
        let mut iteration = 0;
        if !self.resolver.is_idle() {
            iteration = self.resolver.advance(world, &self.config, &mut self.rng);
        }
        let overlaps = world.overlaps();
        stats.overlaps = overlaps.len() as u32;

        if let Some(reason) = self.check_completion(&overlaps, connected) {
            let bounds = self.bounds();
            match reason {
                CompletionReason::Forced => log::warn!(
                    "forcing completion after {} attempts with the cluster still split",
                    self.attempts
                ),
                _ => log::info!("simulation complete at frame {} ({reason:?})", self.frame),
            }
            self.finished = Some((reason, bounds));
            self.running = false;
        }
        Ok(self.result(iteration, stats))
    }

    fn advance_frame(&mut self, stats: &mut StepStats) {
        let Some(world) = self.world.as_mut() else { return };
        if self.resolver.is_idle() {
            let dynamics: Vec<BodyId> = world.dynamic_indices().collect();
            for id in dynamics {
                if world.is_sleeping(id) {
                    world.wake(id);
                }
                let pull = self.pull.eval(world.pose(id).pos);
                let mut v = world.vel(id);
                v.lin *= pull.damping;
                v.ang *= pull.damping;
                world.set_vel(id, v);
                world.apply_impulse(id, pull.impulse);
            }
        }
        let dt = self.config.substep_dt();
        for _ in 0..self.config.substeps.max(1) {
            world.step(dt);
            stats.world_steps += 1;
        }
    }

    fn evaluate_connectivity(&mut self, stats: &mut StepStats) -> ConnectivityReport {
        if let Some(world) = self.world.as_mut() {
            self.contacts = world.drain_contact_pairs();
        }
        stats.contact_events += self.contacts.len() as u32;
        self.connectivity_report()
    }

    /// Connectivity from the last frame's contact reports and the current overlaps.
    pub fn connectivity_report(&self) -> ConnectivityReport {
        let overlaps = self.world.as_ref().map(PhysicsWorld::overlaps).unwrap_or_default();
        let mut graph = ContactGraph::new((0..self.dynamic.len() as u32).map(BodyId));
        for &(a, b) in &self.contacts {
            graph.link_contact(a, b);
        }
        for o in &overlaps {
            graph.link_overlap(o.a, o.b);
        }
        analyse(&graph, &self.dynamic, overlaps.len())
    }

    fn check_completion(&mut self, overlaps: &[Overlap], connected: bool) -> Option<CompletionReason> {
        let world = self.world.as_ref()?;
        match world.len() {
            0 => return Some(CompletionReason::AllConnected),
            1 => {
                let speed = world.vel(BodyId(0)).lin.length();
                return (speed < REST_SPEED).then_some(CompletionReason::AllConnected);
            }
            _ => {}
        }
        let phase = self.resolver.phase();
        let settled = phase == ResolutionPhase::Settling && overlaps.is_empty();
        let joined = phase == ResolutionPhase::Idle && overlaps.is_empty() && connected;
        if !(settled || joined) {
            return None;
        }
        if connected {
            Some(CompletionReason::AllConnected)
        } else if self.attempts >= self.config.max_attempts {
            Some(CompletionReason::Forced)
        } else {
            self.attempts += 1;
            self.frame = 0;
            log::debug!("cluster still split; attempt {}", self.attempts);
            None
        }
    }

    fn snapshots(&self) -> Vec<BodySnapshot> {
        let Some(world) = self.world.as_ref() else { return Vec::new() };
        world
            .indices()
            .zip(&self.dims)
            .map(|(id, dims)| {
                let pose = world.pose(id);
                let vel = world.vel(id);
                BodySnapshot {
                    id,
                    kind: dims.kind(),
                    dims: *dims,
                    position: pose.pos,
                    rotation: pose.rot,
                    linear_velocity: vel.lin,
                    angular_velocity: vel.ang,
                    sleeping: world.is_sleeping(id),
                    is_static: !world.is_dynamic(id),
                }
            })
            .collect()
    }

    fn bounds(&self) -> SpatialBounds {
        let Some(world) = self.world.as_ref() else { return SpatialBounds::default() };
        spatial_bounds(world.indices().zip(&self.dims).map(|(id, d)| {
            let p = world.pose(id);
            (d, iso(p.pos, p.rot))
        }))
    }

    fn result(&self, resolution_iteration: u32, stats: StepStats) -> SimulationResult {
        let overlaps: Vec<OverlapPair> = self
            .world
            .as_ref()
            .map(|w| w.overlaps().into_iter().map(OverlapPair::from).collect())
            .unwrap_or_default();
        let phase = self.resolver.phase();
        SimulationResult {
            bodies: self.snapshots(),
            frame: self.frame,
            attempts: self.attempts,
            complete: self.finished.is_some(),
            reason: self.finished.map(|(r, _)| r),
            overlaps,
            resolution_iteration,
            phase,
            connectivity: (phase == ResolutionPhase::Settling || self.finished.is_some())
                .then(|| self.connectivity_report()),
            bounds: self.finished.map(|(_, b)| b),
            stats,
        }
    }

    /// Starts overlap resolution now if idle and anything overlaps.
    pub fn resolve_overlaps_manually(&mut self) -> Result<ManualResolution, SimError> {
        let world = self.world.as_mut().ok_or(SimError::NotInitialized)?;
        let overlaps = world.overlaps();
        let started = self.resolver.start(world, &overlaps);
        let phase = self.resolver.phase();
        Ok(ManualResolution {
            started,
            phase,
            remaining_overlaps: overlaps.len(),
            connectivity: (phase == ResolutionPhase::Settling).then(|| self.connectivity_report()),
        })
    }

    pub fn status(&self) -> SimulatorStatus {
        let dynamic_bodies = self.dynamic.iter().filter(|&&d| d).count();
        SimulatorStatus {
            initialized: self.world.is_some(),
            running: self.running,
            frame: self.frame,
            attempts: self.attempts,
            static_bodies: self.dynamic.len() - dynamic_bodies,
            dynamic_bodies,
        }
    }

    /// Drops the world and every per-run counter. `initialize()` starts over.
    pub fn reset(&mut self) {
        self.resolver.reset(self.world.as_mut());
        self.world = None;
        self.dims.clear();
        self.dynamic.clear();
        self.contacts.clear();
        self.frame = 0;
        self.attempts = 0;
        self.running = false;
        self.finished = None;
    }

    /// Digest of everything that determines the next step.
    pub fn step_hash(&self) -> [u8; 32] {
        let mut h = StepHasher::new();
        h.update_u32(self.frame);
        h.update_u32(self.attempts);
        h.update_bytes(&self.rng.state().to_le_bytes());
        h.update_u32(self.resolver.phase() as u32);
        h.update_u32(self.resolver.iteration());
        if let Some(world) = self.world.as_ref() {
            for id in world.indices() {
                let pose = world.pose(id);
                let vel = world.vel(id);
                h.update_u32(id.0);
                hash_vec3(&mut h, &pose.pos);
                hash_quat(&mut h, &pose.rot);
                hash_vec3(&mut h, &vel.lin);
                hash_vec3(&mut h, &vel.ang);
            }
        }
        h.finalize()
    }
}

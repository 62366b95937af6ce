use glam::Vec3;
use serde::{Deserialize, Serialize};
use sculptor_core::{iso, Range, RunToken, XorShift64};
use sculptor_geom::{ShapeInstance, SpatialBounds};
use sculptor_materials::{ColorPalette, Material, MaterialRule};
use sculptor_rules::{generate, Pass, RuleSet, ShapeRule};

use crate::config::SimulationConfig;
use crate::error::SimError;
use crate::result::{CompletionReason, SimulationResult, SimulatorStatus};
use crate::simulator::{CancelHandle, PhysicsSimulator};

/// Gap left between the lowest point of a finished sculpture and the floor.
pub const FLOOR_GAP: f32 = 0.02;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    /// Seed root; every run's seed is this plus the settled shape count.
    pub sculpture_id: String,
    pub base_count: Range<u32>,
    pub upgrade_count: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self { sculpture_id: "sculpture".into(), base_count: Range { min: 4, max: 6 }, upgrade_count: 0 }
    }
}

/// Simulation scalars a session applies to each of its runs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub radius: f32,
    pub gravity_strength: f32,
    pub friction: f32,
    pub vertical_spread: f32,
    pub vertical_offset: f32,
    pub steps_per_iteration: u32,
    pub timestep: f32,
    pub substeps: u32,
    pub initial_frame_budget: u32,
    pub subsequent_frame_budget: u32,
    pub max_attempts: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        let d = SimulationConfig::default();
        Self {
            radius: d.radius,
            gravity_strength: d.gravity_strength,
            friction: d.friction,
            vertical_spread: d.vertical_spread,
            vertical_offset: d.vertical_offset,
            steps_per_iteration: d.steps_per_iteration,
            timestep: d.timestep,
            substeps: d.substeps,
            initial_frame_budget: d.initial_frame_budget,
            subsequent_frame_budget: d.subsequent_frame_budget,
            max_attempts: d.max_attempts,
        }
    }
}

impl Tuning {
    pub fn config(
        &self,
        shapes: Vec<ShapeInstance>,
        anchors: Vec<ShapeInstance>,
        seed: String,
        add_from_top: bool,
    ) -> SimulationConfig {
        SimulationConfig {
            shapes,
            anchors,
            radius: self.radius,
            gravity_strength: self.gravity_strength,
            friction: self.friction,
            vertical_spread: self.vertical_spread,
            vertical_offset: self.vertical_offset,
            steps_per_iteration: self.steps_per_iteration,
            timestep: self.timestep,
            substeps: self.substeps,
            initial_frame_budget: self.initial_frame_budget,
            subsequent_frame_budget: self.subsequent_frame_budget,
            max_attempts: self.max_attempts,
            add_from_top,
            seed,
            ..SimulationConfig::default()
        }
    }
}

/// The authored rules a session generates from.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleBook {
    pub shapes: Vec<ShapeRule>,
    pub materials: Vec<MaterialRule>,
    pub palettes: Vec<ColorPalette>,
}

impl RuleBook {
    pub fn as_set(&self) -> RuleSet<'_> {
        RuleSet { shapes: &self.shapes, materials: &self.materials, palettes: &self.palettes }
    }
}

struct ActiveRun {
    token: RunToken,
    sim: PhysicsSimulator,
    /// Shapes this run adds to the settled count once it completes.
    adds: u32,
}

/// A sculpture under construction: its rules, its settled shapes and
/// materials, and at most one simulation run in flight.
pub struct SculptureSession {
    pub settings: GenerationSettings,
    pub tuning: Tuning,
    pub rules: RuleBook,
    pub shapes: Vec<ShapeInstance>,
    /// Index 0 is the default material.
    pub materials: Vec<Material>,
    pub camera_target: Vec3,
    settled: u32,
    run: Option<ActiveRun>,
    next_token: u64,
}

impl SculptureSession {
    pub fn new(settings: GenerationSettings, tuning: Tuning, rules: RuleBook) -> Self {
        Self {
            settings,
            tuning,
            rules,
            shapes: Vec::new(),
            materials: vec![Material::default()],
            camera_target: Vec3::ZERO,
            settled: 0,
            run: None,
            next_token: 1,
        }
    }

    /// Continues from previously saved shapes and materials.
    pub fn restore(&mut self, shapes: Vec<ShapeInstance>, materials: Vec<Material>, camera_target: Vec3) {
        self.run = None;
        self.settled = shapes.len() as u32;
        self.shapes = shapes;
        self.materials = materials;
        if self.materials.is_empty() {
            self.materials.push(Material::default());
        }
        self.camera_target = camera_target;
    }

    /// Shapes that belong to finished generations. A run's shapes count once it
    /// completes on its own; stopped or superseded runs never count.
    #[inline] pub fn settled_count(&self) -> u32 { self.settled }
    pub fn active_token(&self) -> Option<RunToken> { self.run.as_ref().map(|r| r.token) }
    pub fn status(&self) -> Option<SimulatorStatus> { self.run.as_ref().map(|r| r.sim.status()) }
    pub fn cancel_handle(&self) -> Option<CancelHandle> { self.run.as_ref().map(|r| r.sim.cancel_handle()) }

    pub fn cancel(&self) {
        if let Some(handle) = self.cancel_handle() {
            handle.cancel();
        }
    }

    /// Discards every shape and generated material and starts a fresh run
    /// with no anchors.
    pub fn begin_base(&mut self) -> Result<RunToken, SimError> {
        self.run = None;
        self.shapes.clear();
        self.materials.truncate(1);
        if self.materials.is_empty() {
            self.materials.push(Material::default());
        }
        self.settled = 0;

        let seed = format!("{}{}", self.settings.sculpture_id, self.settled);
        let mut rng = XorShift64::from_seed_str(&seed);
        let batch = generate(
            self.rules.as_set(),
            Pass::Base,
            self.settings.base_count,
            &mut rng,
            &seed,
            0,
            self.materials.len() as u32,
        )?;
        let adds = batch.shapes.len() as u32;
        self.materials.extend(batch.materials);
        self.shapes = batch.shapes;

        let config = self.tuning.config(self.shapes.clone(), Vec::new(), seed, false);
        self.launch(config, adds)
    }

    /// Adds `upgrade_count` new shapes dropped from above onto the current
    /// shapes, which stay fixed.
    pub fn begin_upgrade(&mut self) -> Result<RunToken, SimError> {
        self.run = None;
        let n = self.settings.upgrade_count;
        let seed = format!("{}{}", self.settings.sculpture_id, self.settled);
        let mut rng = XorShift64::from_seed_str(&seed);
        let batch = generate(
            self.rules.as_set(),
            Pass::Upgrade,
            Range { min: n, max: n },
            &mut rng,
            &seed,
            self.shapes.len() as u32,
            self.materials.len() as u32,
        )?;

        let anchors = self.shapes.clone();
        self.materials.extend(batch.materials);
        self.shapes.extend(batch.shapes.iter().cloned());

        let config = self.tuning.config(batch.shapes, anchors, seed, true);
        self.launch(config, n)
    }

    fn launch(&mut self, config: SimulationConfig, adds: u32) -> Result<RunToken, SimError> {
        let mut sim = PhysicsSimulator::new(config);
        sim.initialize()?;
        let token = RunToken(self.next_token);
        self.next_token += 1;
        log::info!("{token} started with {} shapes", self.shapes.len());
        self.run = Some(ActiveRun { token, sim, adds });
        Ok(token)
    }

    /// One simulator step for the run `token`, mirrored into `shapes`.
    /// A token that is not the active run's yields `None`.
    pub fn step(&mut self, token: RunToken) -> Result<Option<SimulationResult>, SimError> {
        let Some(run) = self.run.as_mut().filter(|r| r.token == token) else {
            return Ok(None);
        };
        let adds = run.adds;
        let result = run.sim.step()?;
        for body in &result.bodies {
            if let Some(shape) = self.shapes.get_mut(body.id.index()) {
                shape.set_pose(iso(body.position, body.rotation));
            }
        }
        if result.complete {
            if let (Some(reason), Some(bounds)) = (result.reason, result.bounds) {
                if reason != CompletionReason::UserStopped {
                    self.rest_on_floor(&bounds);
                    self.settled += adds;
                }
            }
            log::info!("{token} finished: {:?}", result.reason);
            self.run = None;
        }
        Ok(Some(result))
    }

    /// Steps `token` until it completes. After `max_steps` calls the run is
    /// cancelled and its stopped state returned.
    pub fn run_to_completion(&mut self, token: RunToken, max_steps: usize) -> Result<Option<SimulationResult>, SimError> {
        let mut calls = 0;
        loop {
            if calls == max_steps {
                self.cancel();
            }
            let Some(result) = self.step(token)? else { return Ok(None) };
            if result.complete {
                return Ok(Some(result));
            }
            calls += 1;
        }
    }

    fn rest_on_floor(&mut self, bounds: &SpatialBounds) {
        let lift = FLOOR_GAP - bounds.bottom_y;
        for shape in &mut self.shapes {
            shape.position.y += lift;
        }
        self.camera_target = Vec3::new(0.0, bounds.middle_y + lift, 0.0);
    }
}

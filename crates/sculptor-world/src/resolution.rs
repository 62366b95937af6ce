use std::f32::consts::TAU;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use sculptor_core::{axis_distance, BodyId, XorShift64};
use sculptor_physics::{Overlap, PhysicsWorld, PENETRATION_EPS};

use crate::config::SimulationConfig;

/// Distance from the axis under which the radial direction is undefined.
const AXIS_EPS: f32 = 1e-3;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionPhase {
    #[default]
    Idle,
    /// Overlapping bodies are nudged apart with rotations locked.
    Separating,
    /// One more world step with rotations free before returning to idle.
    Settling,
}

/// Pushes interpenetrating bodies apart a small step at a time.
#[derive(Clone, Debug, Default)]
pub struct OverlapResolver {
    phase: ResolutionPhase,
    iteration: u32,
    counter: u32,
}

impl OverlapResolver {
    #[inline] pub fn phase(&self) -> ResolutionPhase { self.phase }
    #[inline] pub fn iteration(&self) -> u32 { self.iteration }
    #[inline] pub fn is_idle(&self) -> bool { self.phase == ResolutionPhase::Idle }

    /// Enters separation if idle and something overlaps. Returns whether it did.
    pub fn start(&mut self, world: &mut PhysicsWorld, overlaps: &[Overlap]) -> bool {
        if !self.is_idle() || overlaps.is_empty() {
            return false;
        }
        log::debug!("separating {} overlapping pairs", overlaps.len());
        self.phase = ResolutionPhase::Separating;
        self.iteration = 0;
        self.counter = 0;
        set_dynamic_rotation_lock(world, true);
        true
    }

    /// One frame of the machine. Returns the separation iteration reached.
    pub fn advance(&mut self, world: &mut PhysicsWorld, cfg: &SimulationConfig, rng: &mut XorShift64) -> u32 {
        match self.phase {
            ResolutionPhase::Idle => return 0,
            ResolutionPhase::Separating => {
                self.counter += 1;
                if self.counter < cfg.resolution_frames_per_step {
                    return self.iteration;
                }
                self.counter = 0;
                self.iteration += 1;

                let overlaps = world.overlaps();
                if overlaps.is_empty() || self.iteration >= cfg.max_resolution_iterations {
                    set_dynamic_rotation_lock(world, false);
                    let dynamics: Vec<BodyId> = world.dynamic_indices().collect();
                    for id in dynamics {
                        world.zero_velocity(id);
                        world.wake(id);
                    }
                    log::debug!(
                        "separation done after {} iterations, {} pairs left; settling",
                        self.iteration,
                        overlaps.len()
                    );
                    self.phase = ResolutionPhase::Settling;
                    return self.iteration;
                }

                for o in &overlaps {
                    let Some(mover) = choose_mover(world, o) else { continue };
                    let dir = separation_direction(world, mover, rng);
                    let pos = world.pose(mover).pos + dir * cfg.resolution_step;
                    world.set_translation(mover, pos);
                    world.zero_velocity(mover);
                }
            }
            ResolutionPhase::Settling => {
                self.counter += 1;
                if self.counter >= cfg.settle_frames_per_step {
                    self.counter = 0;
                    world.step(cfg.substep_dt());
                    self.phase = ResolutionPhase::Idle;
                    log::debug!("settled; resolution idle");
                }
            }
        }
        self.iteration
    }

    /// Back to idle, rotations unlocked.
    pub fn reset(&mut self, world: Option<&mut PhysicsWorld>) {
        if let Some(world) = world {
            set_dynamic_rotation_lock(world, false);
        }
        *self = Self::default();
    }
}

fn set_dynamic_rotation_lock(world: &mut PhysicsWorld, locked: bool) {
    let dynamics: Vec<BodyId> = world.dynamic_indices().collect();
    for id in dynamics {
        world.lock_rotations(id, locked);
    }
}

/// Which body of an overlapping pair moves: the dynamic one against an
/// anchor, the one farther from the axis between two dynamics, none for two anchors.
pub fn choose_mover(world: &PhysicsWorld, o: &Overlap) -> Option<BodyId> {
    match (world.is_dynamic(o.a), world.is_dynamic(o.b)) {
        (true, false) => Some(o.a),
        (false, true) => Some(o.b),
        (true, true) => {
            let da = axis_distance(world.pose(o.a).pos);
            let db = axis_distance(world.pose(o.b).pos);
            Some(if da >= db { o.a } else { o.b })
        }
        (false, false) => None,
    }
}

/// Horizontal unit direction that takes `id` out of its penetrations.
///
/// Each penetrating contact contributes its reversed normal weighted by depth.
/// If that cancels out, the body moves radially away from the axis, or in a
/// random horizontal direction when it sits on the axis.
pub fn separation_direction(world: &PhysicsWorld, id: BodyId, rng: &mut XorShift64) -> Vec3 {
    let push: Vec3 = world
        .contacts_of(id)
        .iter()
        .filter(|c| c.dist < -PENETRATION_EPS)
        .map(|c| -c.normal * -c.dist)
        .sum();
    let flat = Vec3::new(push.x, 0.0, push.z);
    if flat.length_squared() > 1e-12 {
        return flat.normalize();
    }
    radial_direction(world.pose(id).pos, rng)
}

/// Outward from the vertical axis in XZ.
pub fn radial_direction(p: Vec3, rng: &mut XorShift64) -> Vec3 {
    let d = axis_distance(p);
    if d < AXIS_EPS {
        let angle = rng.next_f32() * TAU;
        Vec3::new(angle.cos(), 0.0, angle.sin())
    } else {
        Vec3::new(p.x / d, 0.0, p.z / d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;
    use sculptor_core::iso;
    use sculptor_geom::ColliderSpec;
    use sculptor_physics::BodyDesc;

    fn ball(world: &mut PhysicsWorld, pos: Vec3, dynamic: bool) -> BodyId {
        world
            .add(&BodyDesc {
                pose: iso(pos, Quat::IDENTITY),
                collider: ColliderSpec::Ball { r: 0.5 },
                dynamic,
                friction: 1.0,
            })
            .unwrap()
    }

    #[test]
    fn radial_is_horizontal_and_unit() {
        let mut rng = XorShift64::from_seed_str("r");
        let d = radial_direction(Vec3::new(3.0, 7.0, 4.0), &mut rng);
        assert!((d - Vec3::new(0.6, 0.0, 0.8)).length() < 1e-6);
        let on_axis = radial_direction(Vec3::new(0.0, 2.0, 0.0), &mut rng);
        assert_eq!(on_axis.y, 0.0);
        assert!((on_axis.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn mover_prefers_dynamic_then_outer() {
        let mut w = PhysicsWorld::new();
        let anchor = ball(&mut w, Vec3::ZERO, false);
        let inner = ball(&mut w, Vec3::new(0.2, 0.0, 0.0), true);
        let outer = ball(&mut w, Vec3::new(0.0, 0.0, 0.9), true);
        let other_anchor = ball(&mut w, Vec3::new(5.0, 0.0, 0.0), false);
        assert_eq!(choose_mover(&w, &Overlap { a: anchor, b: inner, depth: 0.1 }), Some(inner));
        assert_eq!(choose_mover(&w, &Overlap { a: inner, b: outer, depth: 0.1 }), Some(outer));
        assert_eq!(choose_mover(&w, &Overlap { a: anchor, b: other_anchor, depth: 0.1 }), None);
    }

    #[test]
    fn separation_follows_contact_normals() {
        let mut w = PhysicsWorld::new();
        let _anchor = ball(&mut w, Vec3::ZERO, false);
        let b = ball(&mut w, Vec3::new(0.0, 0.0, 0.7), true);
        w.lock_rotations(b, true);
        w.step(1.0 / 240.0);
        let mut rng = XorShift64::from_seed_str("n");
        let dir = separation_direction(&w, b, &mut rng);
        assert!(dir.z > 0.99, "{dir}");
    }

    #[test]
    fn machine_walks_idle_separating_settling_idle() {
        let mut w = PhysicsWorld::new();
        let _anchor = ball(&mut w, Vec3::ZERO, false);
        let b = ball(&mut w, Vec3::new(0.8, 0.0, 0.0), true);
        let cfg = SimulationConfig { max_resolution_iterations: 3, ..SimulationConfig::default() };
        let mut rng = XorShift64::from_seed_str("m");
        w.step(cfg.substep_dt());

        let mut res = OverlapResolver::default();
        assert!(!res.start(&mut w, &[]));
        let overlaps = w.overlaps();
        assert!(!overlaps.is_empty());
        assert!(res.start(&mut w, &overlaps));
        assert_eq!(res.phase(), ResolutionPhase::Separating);

        let x0 = w.pose(b).pos.x;
        res.advance(&mut w, &cfg, &mut rng);
        assert!(w.pose(b).pos.x > x0);
        assert!(w.pose(b).pos.y.abs() < 1e-6);

        let mut guard = 0;
        while res.phase() == ResolutionPhase::Separating && guard < 10 {
            w.step(cfg.substep_dt());
            res.advance(&mut w, &cfg, &mut rng);
            guard += 1;
        }
        assert_eq!(res.phase(), ResolutionPhase::Settling);
        assert!(res.iteration() <= 3);
        assert_eq!(w.vel(b).lin, Vec3::ZERO);

        res.advance(&mut w, &cfg, &mut rng);
        assert!(res.is_idle());
    }
}

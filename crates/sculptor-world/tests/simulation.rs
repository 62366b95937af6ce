use glam::{Quat, Vec3};
use sculptor_core::ShapeToken;
use sculptor_geom::{ShapeDims, ShapeInstance, SphereDims};
use sculptor_world::det_harness::{digest, record};
use sculptor_world::*;

fn sphere(name: &str, r: f32) -> ShapeInstance {
    ShapeInstance::new(ShapeToken(name.into()), ShapeDims::Sphere(SphereDims { r }), 0)
}

fn spheres(n: usize, r: f32) -> Vec<ShapeInstance> {
    (0..n).map(|i| sphere(&format!("s{i}"), r)).collect()
}

fn config(shapes: Vec<ShapeInstance>, seed: &str) -> SimulationConfig {
    SimulationConfig { shapes, seed: seed.into(), ..SimulationConfig::default() }
}

fn run(sim: &mut PhysicsSimulator, max_steps: usize) -> SimulationResult {
    let mut last = sim.step().unwrap();
    for _ in 0..max_steps {
        if last.complete {
            break;
        }
        last = sim.step().unwrap();
    }
    last
}

#[test]
fn step_before_initialize_is_an_error() {
    let mut sim = PhysicsSimulator::new(config(spheres(2, 0.1), "x"));
    assert!(matches!(sim.step(), Err(SimError::NotInitialized)));
    assert!(matches!(sim.resolve_overlaps_manually(), Err(SimError::NotInitialized)));
    assert!(!sim.status().initialized);
}

#[test]
fn invalid_dimensions_fail_initialize() {
    let mut cfg = config(spheres(2, 0.1), "x");
    cfg.shapes.push(sphere("bad", -1.0));
    let mut sim = PhysicsSimulator::new(cfg);
    match sim.initialize() {
        Err(SimError::AdapterInit { index, .. }) => assert_eq!(index, 2),
        other => panic!("expected AdapterInit, got {other:?}"),
    }
}

#[test]
fn same_seed_replays_identically() {
    let digest_of = |seed: &str| {
        let mut sim = PhysicsSimulator::new(config(spheres(4, 0.1), seed));
        sim.initialize().unwrap();
        digest(&record(&mut sim, 120).unwrap())
    };
    assert_eq!(digest_of("abc0"), digest_of("abc0"));
    assert_ne!(digest_of("abc0"), digest_of("abd0"));
}

#[test]
fn empty_run_completes_immediately() {
    let mut sim = PhysicsSimulator::new(config(Vec::new(), "none"));
    sim.initialize().unwrap();
    let r = sim.step().unwrap();
    assert!(r.complete);
    assert_eq!(r.reason, Some(CompletionReason::AllConnected));
    assert_eq!(r.bounds, Some(sculptor_geom::SpatialBounds::default()));
}

#[test]
fn lone_body_completes_when_at_rest() {
    let mut sim = PhysicsSimulator::new(config(spheres(1, 0.1), "one"));
    sim.initialize().unwrap();
    let r = run(&mut sim, 3000);
    assert!(r.complete);
    assert_eq!(r.reason, Some(CompletionReason::AllConnected));
    assert!(r.bodies[0].linear_velocity.length() < 0.01);
    let b = r.bounds.unwrap();
    // Rotation doesn't change a sphere's height.
    assert!((b.height - 0.2).abs() < 1e-4, "{}", b.height);
}

#[test]
fn four_small_spheres_settle() {
    let mut sim = PhysicsSimulator::new(config(spheres(4, 0.1), "abc0"));
    sim.initialize().unwrap();
    let first = sim.step().unwrap();
    assert_eq!(first.bodies.len(), 4);
    assert!(first.bodies.iter().all(|b| !b.is_static && b.kind == sculptor_geom::ShapeKind::Sphere));

    let r = run(&mut sim, 20_000);
    assert!(r.complete);
    assert_eq!(r.reason, Some(CompletionReason::AllConnected), "after {} attempts", r.attempts);
    assert!(r.overlaps.is_empty(), "{:?}", r.overlaps);
    assert!(sim.connectivity_report().fully_connected);
    let report = r.connectivity.unwrap();
    assert!(report.fully_connected);
    assert!(report.disconnected_dynamic_bodies.is_empty());
    assert!(r.bounds.is_some());
    assert!(r.bodies.iter().all(|b| b.position.is_finite()));
    // Pulled in toward the axis from the 0.5 ring.
    for b in &r.bodies {
        assert!(Vec3::new(b.position.x, 0.0, b.position.z).length() < 0.6);
    }

    // Finished runs keep reporting the same state.
    let again = sim.step().unwrap();
    assert_eq!(again.frame, r.frame);
    assert_eq!(again.reason, r.reason);
}

#[test]
fn anchors_never_move() {
    let mut anchor = sphere("anchor", 0.3);
    anchor.position = Vec3::new(0.0, 0.1, 0.0);
    anchor.rotation = Quat::from_rotation_y(0.7);
    let mut cfg = config(spheres(3, 0.1), "anchored");
    cfg.anchors = vec![anchor.clone()];
    cfg.add_from_top = true;
    let mut sim = PhysicsSimulator::new(cfg);
    sim.initialize().unwrap();
    let status = sim.status();
    assert_eq!((status.static_bodies, status.dynamic_bodies), (1, 3));

    for _ in 0..200 {
        let r = sim.step().unwrap();
        let a = &r.bodies[0];
        assert!(a.is_static);
        assert_eq!(a.position, anchor.position);
        assert!(a.rotation.dot(anchor.rotation).abs() > 1.0 - 1e-6);
        if r.complete {
            break;
        }
    }
}

#[test]
fn cancel_stops_without_advancing() {
    let mut sim = PhysicsSimulator::new(config(spheres(4, 0.1), "stop"));
    sim.initialize().unwrap();
    let handle = sim.cancel_handle();
    let mut last = sim.step().unwrap();
    for _ in 0..4 {
        last = sim.step().unwrap();
    }
    handle.cancel();
    let stopped = sim.step().unwrap();
    assert!(stopped.complete);
    assert_eq!(stopped.reason, Some(CompletionReason::UserStopped));
    assert_eq!(stopped.frame, last.frame);
    let pos: Vec<Vec3> = stopped.bodies.iter().map(|b| b.position).collect();
    let before: Vec<Vec3> = last.bodies.iter().map(|b| b.position).collect();
    assert_eq!(pos, before);
    assert!(!sim.status().running);
}

#[test]
fn manual_resolution_starts_on_overlap() {
    // A big anchor on the axis swallows the spawn ring.
    let mut anchor = sphere("core", 0.8);
    anchor.position = Vec3::new(0.0, 0.4, 0.0);
    let mut cfg = config(spheres(2, 0.1), "manual");
    cfg.anchors = vec![anchor];
    let mut sim = PhysicsSimulator::new(cfg);
    sim.initialize().unwrap();
    let r = sim.step().unwrap();
    assert!(!r.overlaps.is_empty());

    let m = sim.resolve_overlaps_manually().unwrap();
    assert!(m.started);
    assert_eq!(m.phase, ResolutionPhase::Separating);
    assert_eq!(m.remaining_overlaps, r.overlaps.len());

    let again = sim.resolve_overlaps_manually().unwrap();
    assert!(!again.started);

    let next = sim.step().unwrap();
    assert_ne!(next.phase, ResolutionPhase::Idle);
    assert!(next.resolution_iteration >= 1);
}

#[test]
fn reset_drops_the_world() {
    let mut sim = PhysicsSimulator::new(config(spheres(2, 0.1), "reset"));
    sim.initialize().unwrap();
    sim.step().unwrap();
    sim.reset();
    let s = sim.status();
    assert!(!s.initialized);
    assert_eq!((s.frame, s.attempts, s.dynamic_bodies), (0, 0, 0));
    assert!(matches!(sim.step(), Err(SimError::NotInitialized)));
    sim.initialize().unwrap();
    assert_eq!(sim.step().unwrap().frame, 1);
}

#[test]
fn snapshots_serialize() {
    let mut sim = PhysicsSimulator::new(config(spheres(2, 0.1), "json"));
    sim.initialize().unwrap();
    let r = sim.step().unwrap();
    let text = serde_json::to_string(&r).unwrap();
    let back: SimulationResult = serde_json::from_str(&text).unwrap();
    assert_eq!(back.frame, r.frame);
    assert_eq!(back.bodies.len(), 2);
    assert!(text.contains("\"phase\":\"idle\""));
}

use sculptor_core::Range;
use sculptor_geom::{spatial_bounds, ShapeDims, SphereDims};
use sculptor_materials::{ColorPalette, MaterialRule};
use sculptor_rules::{DimRanges, ShapeRule, UpgradeGroup};
use sculptor_world::*;

fn rules(upgrade: UpgradeGroup) -> RuleBook {
    RuleBook {
        shapes: vec![ShapeRule {
            name: "pebble".into(),
            id: "pebble".into(),
            dims: DimRanges::Sphere { r: Range::new(0.1, 0.1) },
            materials: vec!["glass".into()],
            weight: 1.0,
            upgrade,
        }],
        materials: vec![MaterialRule {
            id: "glass".into(),
            palettes: vec![ColorPalette::primaries().id],
            ..MaterialRule::default()
        }],
        palettes: vec![ColorPalette::primaries()],
    }
}

fn session(upgrade_count: u32) -> SculptureSession {
    let settings = GenerationSettings {
        sculpture_id: "abc".into(),
        base_count: Range { min: 4, max: 4 },
        upgrade_count,
    };
    SculptureSession::new(settings, Tuning::default(), rules(UpgradeGroup::Both))
}

#[test]
fn base_run_generates_and_rests_on_the_floor() {
    let mut s = session(0);
    let token = s.begin_base().unwrap();
    assert_eq!(s.shapes.len(), 4);
    assert_eq!(s.materials.len(), 5);
    assert_eq!(s.settled_count(), 0);
    for shape in &s.shapes {
        assert_eq!(shape.dims, ShapeDims::Sphere(SphereDims { r: 0.1 }));
    }

    let result = s.run_to_completion(token, 20_000).unwrap().unwrap();
    assert!(result.complete);
    assert_eq!(result.reason, Some(CompletionReason::AllConnected));
    assert!(result.overlaps.is_empty(), "{:?}", result.overlaps);
    assert!(result.connectivity.unwrap().fully_connected);
    assert_eq!(s.active_token(), None);
    assert_eq!(s.settled_count(), 4);

    let b = spatial_bounds(s.shapes.iter().map(|sh| (&sh.dims, sh.pose())));
    assert!((b.bottom_y - FLOOR_GAP).abs() < 1e-4, "{b:?}");
    assert!((s.camera_target.y - b.middle_y).abs() < 1e-4);
    assert_eq!((s.camera_target.x, s.camera_target.z), (0.0, 0.0));
}

#[test]
fn base_runs_are_reproducible() {
    let positions = || {
        let mut s = session(0);
        let token = s.begin_base().unwrap();
        for _ in 0..60 {
            s.step(token).unwrap();
        }
        s.shapes.iter().map(|sh| (sh.token.clone(), sh.position)).collect::<Vec<_>>()
    };
    assert_eq!(positions(), positions());
}

#[test]
fn stale_tokens_are_ignored() {
    let mut s = session(0);
    let first = s.begin_base().unwrap();
    let second = s.begin_base().unwrap();
    assert_ne!(first, second);
    assert!(s.step(first).unwrap().is_none());
    assert!(s.step(second).unwrap().is_some());
}

#[test]
fn cancelled_run_keeps_its_last_positions() {
    let mut s = session(0);
    let token = s.begin_base().unwrap();
    for _ in 0..5 {
        s.step(token).unwrap();
    }
    let before: Vec<_> = s.shapes.iter().map(|sh| sh.position).collect();
    s.cancel();
    let r = s.step(token).unwrap().unwrap();
    assert_eq!(r.reason, Some(CompletionReason::UserStopped));
    let after: Vec<_> = s.shapes.iter().map(|sh| sh.position).collect();
    assert_eq!(before, after);
    assert!(s.step(token).unwrap().is_none());
}

#[test]
fn upgrade_keeps_settled_shapes_fixed() {
    let mut s = session(2);
    let token = s.begin_base().unwrap();
    s.run_to_completion(token, 20_000).unwrap();
    let settled: Vec<_> = s.shapes.iter().map(|sh| (sh.token.clone(), sh.position, sh.rotation)).collect();
    let materials_before = s.materials.len();

    let token = s.begin_upgrade().unwrap();
    assert_eq!(s.shapes.len(), 6);
    assert_eq!(s.settled_count(), 4);
    assert_eq!(s.materials.len(), materials_before + 2);
    assert_eq!(s.status().map(|st| (st.static_bodies, st.dynamic_bodies)), Some((4, 2)));

    for _ in 0..100 {
        let r = s.step(token).unwrap().unwrap();
        if r.complete {
            break;
        }
        for (shape, (tok, pos, rot)) in s.shapes.iter().zip(&settled) {
            assert_eq!(&shape.token, tok);
            assert_eq!(shape.position, *pos);
            assert!(shape.rotation.dot(*rot).abs() > 1.0 - 1e-6);
        }
    }
    // New tokens never collide with settled ones.
    let mut tokens: Vec<_> = s.shapes.iter().map(|sh| sh.token.clone()).collect();
    tokens.sort_by(|a, b| a.0.cmp(&b.0));
    tokens.dedup();
    assert_eq!(tokens.len(), 6);
}

#[test]
fn stopped_upgrade_does_not_advance_the_seed() {
    let mut s = session(2);
    let token = s.begin_base().unwrap();
    s.run_to_completion(token, 20_000).unwrap();
    assert_eq!(s.settled_count(), 4);

    let stopped = s.begin_upgrade().unwrap();
    let first_dims: Vec<_> = s.shapes[4..].iter().map(|sh| sh.dims).collect();
    s.cancel();
    let r = s.step(stopped).unwrap().unwrap();
    assert_eq!(r.reason, Some(CompletionReason::UserStopped));
    assert_eq!(s.settled_count(), 4);

    // Same seed suffix, so the retry draws the same shapes.
    s.shapes.truncate(4);
    s.begin_upgrade().unwrap();
    let retry_dims: Vec<_> = s.shapes[4..].iter().map(|sh| sh.dims).collect();
    assert_eq!(first_dims, retry_dims);

    // A superseded run doesn't count either.
    s.begin_upgrade().unwrap();
    assert_eq!(s.settled_count(), 4);
}

#[test]
fn base_only_rules_cannot_upgrade() {
    let settings = GenerationSettings { sculpture_id: "abc".into(), base_count: Range { min: 2, max: 2 }, upgrade_count: 1 };
    let mut s = SculptureSession::new(settings, Tuning::default(), rules(UpgradeGroup::Base));
    s.begin_base().unwrap();
    assert!(matches!(s.begin_upgrade(), Err(SimError::Generation(_))));
}

#[test]
fn tuning_defaults_match_the_session_constants() {
    let t: Tuning = serde_json::from_str("{}").unwrap();
    assert_eq!(t, Tuning::default());
    assert_eq!((t.radius, t.gravity_strength, t.friction), (0.5, 0.1, 1.0));
    assert_eq!((t.vertical_spread, t.vertical_offset), (0.5, 0.4));
    assert_eq!((t.initial_frame_budget, t.subsequent_frame_budget, t.max_attempts), (300, 30, 10));
    assert!((t.timestep - 1.0 / 30.0).abs() < 1e-9);
}

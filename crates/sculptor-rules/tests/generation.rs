use sculptor_core::{Range, XorShift64};
use sculptor_geom::{ShapeDims, ShapeKind};
use sculptor_materials::{ColorPalette, MaterialRule};
use sculptor_rules::*;

fn sphere_rule(id: &str, upgrade: UpgradeGroup, materials: &[&str]) -> ShapeRule {
    ShapeRule {
        name: id.into(),
        id: id.into(),
        dims: DimRanges::Sphere { r: Range::new(0.1, 0.1) },
        materials: materials.iter().map(|s| s.to_string()).collect(),
        weight: 1.0,
        upgrade,
    }
}

fn material_rule() -> MaterialRule {
    MaterialRule { id: "m".into(), palettes: vec!["DEFAULT".into()], ..MaterialRule::default() }
}

fn run(rules: RuleSet<'_>, pass: Pass, seed: &str) -> Result<Generated, RuleError> {
    let mut rng = XorShift64::from_seed_str(seed);
    generate(rules, pass, Range { min: 4, max: 4 }, &mut rng, seed, 0, 1)
}

#[test]
fn four_spheres_of_fixed_radius() {
    let shapes = [sphere_rule("s", UpgradeGroup::Base, &[])];
    let rules = RuleSet { shapes: &shapes, materials: &[], palettes: &[] };
    let out = run(rules, Pass::Base, "abc0").unwrap();
    assert_eq!(out.shapes.len(), 4);
    assert!(out.materials.is_empty());
    for s in &out.shapes {
        assert_eq!(s.dims, ShapeDims::Sphere(sculptor_geom::SphereDims { r: 0.1 }));
        assert_eq!(s.material, 0);
    }
}

#[test]
fn same_seed_same_batch() {
    let shapes = [sphere_rule("s", UpgradeGroup::Both, &["m"])];
    let mats = [material_rule()];
    let pals = [ColorPalette::primaries()];
    let rules = RuleSet { shapes: &shapes, materials: &mats, palettes: &pals };
    let a = run(rules, Pass::Base, "seed-1").unwrap();
    let b = run(rules, Pass::Base, "seed-1").unwrap();
    assert_eq!(a.shapes, b.shapes);
    assert_eq!(a.materials, b.materials);
    let c = run(rules, Pass::Base, "seed-2").unwrap();
    assert_ne!(a.materials, c.materials);
}

#[test]
fn materials_are_numbered_from_base() {
    let shapes = [sphere_rule("s", UpgradeGroup::Base, &["m"])];
    let mats = [material_rule()];
    let rules = RuleSet { shapes: &shapes, materials: &mats, palettes: &[] };
    let out = run(rules, Pass::Base, "mat").unwrap();
    let idx: Vec<u32> = out.shapes.iter().map(|s| s.material).collect();
    assert_eq!(idx, vec![1, 2, 3, 4]);
    assert_eq!(out.materials.len(), 4);
}

#[test]
fn upgrade_pass_only_uses_upgrade_rules() {
    let mut box_rule = sphere_rule("b", UpgradeGroup::UpgradeOnly, &[]);
    box_rule.dims = DimRanges::Box { a: Range::new(glam::Vec3::splat(0.1), glam::Vec3::splat(0.2)) };
    let shapes = [sphere_rule("s", UpgradeGroup::Base, &[]), box_rule];
    let rules = RuleSet { shapes: &shapes, materials: &[], palettes: &[] };

    let base = run(rules, Pass::Base, "g").unwrap();
    assert!(base.shapes.iter().all(|s| s.kind() == ShapeKind::Sphere));
    let up = run(rules, Pass::Upgrade, "g").unwrap();
    assert!(up.shapes.iter().all(|s| s.kind() == ShapeKind::Box));
}

#[test]
fn empty_pass_is_an_error() {
    let shapes = [sphere_rule("s", UpgradeGroup::Base, &[])];
    let rules = RuleSet { shapes: &shapes, materials: &[], palettes: &[] };
    assert_eq!(run(rules, Pass::Upgrade, "x").unwrap_err(), RuleError::NoRules(Pass::Upgrade));
}

#[test]
fn zero_weight_rules_fail_generation() {
    let mut rule = sphere_rule("s", UpgradeGroup::Base, &[]);
    rule.weight = 0.0;
    let shapes = [rule];
    let rules = RuleSet { shapes: &shapes, materials: &[], palettes: &[] };
    assert!(matches!(run(rules, Pass::Base, "z"), Err(RuleError::Sample(_))));
}

#[test]
fn tokens_continue_from_first_ordinal() {
    let shapes = [sphere_rule("s", UpgradeGroup::Both, &[])];
    let rules = RuleSet { shapes: &shapes, materials: &[], palettes: &[] };
    let mut rng = XorShift64::from_seed_str("tok");
    let out = generate(rules, Pass::Upgrade, Range { min: 2, max: 2 }, &mut rng, "tok", 7, 1).unwrap();
    assert_eq!(out.shapes[0].token, sculptor_core::ShapeToken::derive("tok", 7));
    assert_eq!(out.shapes[1].token, sculptor_core::ShapeToken::derive("tok", 8));
}

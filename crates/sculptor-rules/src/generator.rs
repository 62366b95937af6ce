use thiserror::Error;
use sculptor_core::{pick, Range, SampleError, ShapeToken, XorShift64};
use sculptor_geom::ShapeInstance;
use sculptor_materials::{pick_rule, synthesize, ColorPalette, Material, MaterialRule};

use crate::shape_rule::{Pass, ShapeRule};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuleError {
    #[error("no shape rule is usable for the {0:?} pass")]
    NoRules(Pass),
    #[error("shape count range {min}..={max} is inverted")]
    InvalidCount { min: u32, max: u32 },
    #[error(transparent)]
    Sample(#[from] SampleError),
}

/// Borrowed view of everything the generator draws from.
#[derive(Copy, Clone, Debug)]
pub struct RuleSet<'a> {
    pub shapes: &'a [ShapeRule],
    pub materials: &'a [MaterialRule],
    pub palettes: &'a [ColorPalette],
}

/// Output of one generation call. Material indices point into the caller's
/// material list after `materials` has been appended to it.
#[derive(Clone, Debug, Default)]
pub struct Generated {
    pub shapes: Vec<ShapeInstance>,
    pub materials: Vec<Material>,
}

/// `min + floor(r * (max - min + 1))`, clamped to `max`.
pub fn shape_count(range: Range<u32>, r: f32) -> Result<u32, RuleError> {
    let Range { min, max } = range;
    if min > max {
        return Err(RuleError::InvalidCount { min, max });
    }
    let span = (max - min + 1) as f32;
    Ok((min + (r * span).floor() as u32).min(max))
}

/// Draws a batch of shapes for `pass`.
///
/// `material_base` is the length of the caller's material list; synthesised
/// materials are numbered from there. Shapes whose rule has no eligible material
/// rule use material 0. Identity tokens come from `seed` and `first_ordinal + i`.
pub fn generate(
    rules: RuleSet<'_>,
    pass: Pass,
    count: Range<u32>,
    rng: &mut XorShift64,
    seed: &str,
    first_ordinal: u32,
    material_base: u32,
) -> Result<Generated, RuleError> {
    let usable: Vec<&ShapeRule> = rules.shapes.iter().filter(|r| r.upgrade.allows(pass)).collect();
    if usable.is_empty() {
        return Err(RuleError::NoRules(pass));
    }

    let n = shape_count(count, rng.next_f32())?;
    let mut out = Generated { shapes: Vec::with_capacity(n as usize), materials: Vec::new() };

    for i in 0..n {
        let rule = *pick(&usable, |r| r.weight, rng.next_f32())?;
        let dims = rule.dims.synthesize(rng);

        let material = match pick_rule(rules.materials, &rule.materials, rng)? {
            Some(mat_rule) => {
                out.materials.push(synthesize(mat_rule, rules.palettes, rng)?);
                material_base + out.materials.len() as u32 - 1
            }
            None => 0,
        };

        let token = ShapeToken::derive(seed, first_ordinal + i);
        log::trace!("shape {} <- rule {} ({}), material {}", token, rule.id, dims.kind(), material);
        out.shapes.push(ShapeInstance::new(token, dims, material));
    }

    log::debug!("{pass:?} pass generated {} shapes, {} materials", out.shapes.len(), out.materials.len());
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_formula_covers_inclusive_range() {
        let r = Range { min: 3u32, max: 5 };
        assert_eq!(shape_count(r, 0.0), Ok(3));
        assert_eq!(shape_count(r, 0.34), Ok(4));
        assert_eq!(shape_count(r, 0.999), Ok(5));
        assert_eq!(shape_count(Range { min: 4, max: 4 }, 0.7), Ok(4));
        assert_eq!(shape_count(Range { min: 5, max: 3 }, 0.1), Err(RuleError::InvalidCount { min: 5, max: 3 }));
    }
}

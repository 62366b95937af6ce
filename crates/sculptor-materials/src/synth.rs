use serde::{Deserialize, Serialize};
use sculptor_core::{pick, pick_index, SampleError, XorShift64};

use crate::palette::{ColorPalette, Rgb};
use crate::rule::MaterialRule;

/// Concrete optical properties handed to the renderer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    pub name: String,
    /// Rule the material was drawn from; `None` for the default material.
    pub rule: Option<String>,
    pub color: Rgb,
    pub secondary_color: Rgb,
    pub kd: f32,
    pub ior: f32,
    pub reflectivity: f32,
    pub int_ref: bool,
    pub roughness: f32,
    pub reflect_roughness: f32,
    pub refract_roughness: f32,
    pub surface_blur: f32,
    pub metallic: f32,
    pub transparency: f32,
    pub attenuation: f32,
    pub attenuation_strength: f32,
    pub edge_tint_strength: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: "Default Material".into(),
            rule: None,
            color: Rgb::WHITE,
            secondary_color: Rgb::WHITE,
            kd: 0.0,
            ior: 1.0,
            reflectivity: 0.0,
            int_ref: false,
            roughness: 0.0,
            reflect_roughness: 0.0,
            refract_roughness: 0.0,
            surface_blur: 0.0,
            metallic: 0.0,
            transparency: 0.0,
            attenuation: 0.0,
            attenuation_strength: 0.0,
            edge_tint_strength: 0.0,
        }
    }
}

/// Chooses one of the rules whose id is in `eligible`, by weight.
/// `Ok(None)` without drawing when no rule is eligible.
pub fn pick_rule<'a>(
    rules: &'a [MaterialRule],
    eligible: &[String],
    rng: &mut XorShift64,
) -> Result<Option<&'a MaterialRule>, SampleError> {
    let candidates: Vec<&MaterialRule> = rules.iter().filter(|r| eligible.contains(&r.id)).collect();
    if candidates.is_empty() {
        return Ok(None);
    }
    let chosen = pick(&candidates, |r| r.weight, rng.next_f32())?;
    Ok(Some(*chosen))
}

/// One draw for the palette choice, always consumed; `None` when the rule names no known palette.
fn pick_palette<'a>(
    palettes: &'a [ColorPalette],
    ids: &[String],
    rng: &mut XorShift64,
) -> Result<Option<&'a ColorPalette>, SampleError> {
    let r = rng.next_f32();
    let candidates: Vec<&ColorPalette> = palettes.iter().filter(|p| ids.contains(&p.id)).collect();
    if candidates.is_empty() {
        return Ok(None);
    }
    Ok(Some(*pick(&candidates, |p| p.weight, r)?))
}

/// Draws a material from `rule`. Field draw order is fixed so a seed always
/// reproduces the same material.
pub fn synthesize(
    rule: &MaterialRule,
    palettes: &[ColorPalette],
    rng: &mut XorShift64,
) -> Result<Material, SampleError> {
    let primary = pick_palette(palettes, &rule.palettes, rng)?;
    let secondary = pick_palette(palettes, &rule.secondary_palettes, rng)?;

    let mut m = Material { name: rule.name.clone(), rule: Some(rule.id.clone()), ..Material::default() };

    if let Some(palette) = primary {
        let r = rng.next_f32();
        if !palette.colors.is_empty() {
            let i = pick_index(&palette.colors, |c| c.weight, r)?;
            m.color = palette.colors[i].rgb;
            if let Some(sec) = secondary.filter(|p| !p.colors.is_empty()) {
                // Same relative position in the secondary palette.
                let j = i * sec.colors.len() / palette.colors.len();
                m.secondary_color = sec.colors[j].rgb;
            }
        }
    }

    m.kd = rule.kd.sample(rng);
    m.metallic = rule.metallic.sample(rng);
    m.roughness = rule.roughness.sample(rng);
    m.reflectivity = rule.reflectivity.sample(rng);
    m.transparency = rule.transparency.sample(rng);

    if m.reflectivity > 0.0 {
        m.reflect_roughness = rule.reflect_roughness.sample(rng);
    }
    if m.transparency > 0.0 {
        m.ior = rule.ior.sample(rng);
        m.int_ref = rule.int_ref > rng.next_f32();
        m.refract_roughness = rule.refract_roughness.sample(rng);
        m.attenuation = rule.attenuation.sample(rng);
        m.attenuation_strength = rule.attenuation_strength.sample(rng);
    }
    if m.transparency > 0.0 || m.reflectivity > 0.0 {
        m.surface_blur = rule.surface_blur.sample(rng);
    }
    m.edge_tint_strength = rule.edge_tint_strength.sample(rng);

    log::trace!("material from rule {}: kd {:.3} refl {:.3} transp {:.3}", rule.id, m.kd, m.reflectivity, m.transparency);
    Ok(m)
}

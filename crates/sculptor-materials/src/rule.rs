use serde::{Deserialize, Serialize};
use sculptor_core::Range;

/// Authoring rule a material is drawn from. Palette ids refer to `ColorPalette::id`;
/// ids with no matching palette are ignored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialRule {
    pub name: String,
    pub id: String,
    pub palettes: Vec<String>,
    pub secondary_palettes: Vec<String>,
    pub kd: Range<f32>,
    pub ior: Range<f32>,
    pub reflectivity: Range<f32>,
    /// Probability that a transparent material reflects internally.
    pub int_ref: f32,
    pub roughness: Range<f32>,
    pub reflect_roughness: Range<f32>,
    pub refract_roughness: Range<f32>,
    pub surface_blur: Range<f32>,
    pub metallic: Range<f32>,
    pub transparency: Range<f32>,
    pub attenuation: Range<f32>,
    pub attenuation_strength: Range<f32>,
    pub edge_tint_strength: Range<f32>,
    pub weight: f32,
}

impl Default for MaterialRule {
    fn default() -> Self {
        let unit = Range::new(0.0, 1.0);
        Self {
            name: "Default Material Rule".into(),
            id: "DEFAULT".into(),
            palettes: Vec::new(),
            secondary_palettes: Vec::new(),
            kd: Range::new(0.0, 10.0),
            ior: Range::new(1.0, 5.0),
            reflectivity: unit,
            int_ref: 0.5,
            roughness: unit,
            reflect_roughness: unit,
            refract_roughness: unit,
            surface_blur: unit,
            metallic: unit,
            transparency: unit,
            attenuation: unit,
            attenuation_strength: Range::new(0.0, 50.0),
            edge_tint_strength: unit,
            weight: 1.0,
        }
    }
}

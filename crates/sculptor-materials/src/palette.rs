use serde::{Deserialize, Serialize};

/// Linear RGB in `[0, 1]`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgb { pub r: f32, pub g: f32, pub b: f32 }

impl Rgb {
    pub const WHITE: Rgb = Rgb { r: 1.0, g: 1.0, b: 1.0 };
    #[inline] pub const fn new(r: f32, g: f32, b: f32) -> Self { Self { r, g, b } }
}

impl Default for Rgb {
    fn default() -> Self { Rgb::WHITE }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaletteColor {
    pub name: String,
    pub id: String,
    pub rgb: Rgb,
    pub weight: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorPalette {
    pub name: String,
    pub id: String,
    pub weight: f32,
    pub colors: Vec<PaletteColor>,
}

impl ColorPalette {
    /// Red, green and blue at equal weight.
    pub fn primaries() -> Self {
        let c = |name: &str, rgb| PaletteColor { name: name.to_string(), id: name.to_uppercase(), rgb, weight: 1.0 };
        ColorPalette {
            name: "Default Color Palette".into(),
            id: "DEFAULT".into(),
            weight: 1.0,
            colors: vec![
                c("Red", Rgb::new(1.0, 0.0, 0.0)),
                c("Green", Rgb::new(0.0, 1.0, 0.0)),
                c("Blue", Rgb::new(0.0, 0.0, 1.0)),
            ],
        }
    }
}

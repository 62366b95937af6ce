pub mod palette;
pub mod rule;
pub mod synth;

pub use palette::{ColorPalette, PaletteColor, Rgb};
pub use rule::MaterialRule;
pub use synth::{pick_rule, synthesize, Material};

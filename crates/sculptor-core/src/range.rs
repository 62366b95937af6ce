use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::rng::XorShift64;

/// Inclusive authoring range; draws are `min + (max - min) * r`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Range<T> { pub min: T, pub max: T }

/// Types a `Range` can be drawn from. Vectors draw per component, x first.
pub trait Lerp: Copy {
    fn draw(min: Self, max: Self, rng: &mut XorShift64) -> Self;
}

impl Lerp for f32 {
    #[inline] fn draw(min: f32, max: f32, rng: &mut XorShift64) -> f32 { rng.range(min, max) }
}
impl Lerp for Vec2 {
    #[inline] fn draw(min: Vec2, max: Vec2, rng: &mut XorShift64) -> Vec2 { rng.range_vec2(min, max) }
}
impl Lerp for Vec3 {
    #[inline] fn draw(min: Vec3, max: Vec3, rng: &mut XorShift64) -> Vec3 { rng.range_vec3(min, max) }
}

impl<T: Lerp> Range<T> {
    #[inline] pub fn new(min: T, max: T) -> Self { Self { min, max } }
    #[inline] pub fn fixed(v: T) -> Self { Self { min: v, max: v } }
    #[inline] pub fn sample(&self, rng: &mut XorShift64) -> T { T::draw(self.min, self.max, rng) }
}

impl Default for Range<f32> {
    fn default() -> Self { Self { min: 0.0, max: 0.0 } }
}

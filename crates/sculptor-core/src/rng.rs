use glam::{Vec2, Vec3};
use crate::StepHasher;

#[derive(Copy, Clone, Debug)]
pub struct XorShift64 { state: u64 }

impl XorShift64 {
    pub fn new(seed: u64) -> Self { Self { state: seed | 1 } }

    /// Seed from an arbitrary string (sculpture id + shape count).
    pub fn from_seed_str(seed: &str) -> Self {
        let mut h = StepHasher::new();
        h.update_bytes(b"RNGv1\0");
        h.update_bytes(seed.as_bytes());
        let b = h.finalize();
        Self::new(u64::from_le_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]]))
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x >> 12; x ^= x << 25; x ^= x >> 27;
        self.state = x;
        ((x.wrapping_mul(2685821657736338717)) >> 32) as u32
    }

    /// Uniform in [0, 1). Uses the top 24 bits so every value is exact in f32.
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 * (1.0 / 16_777_216.0)
    }

    #[inline] pub fn range(&mut self, min: f32, max: f32) -> f32 { (max - min) * self.next_f32() + min }

    pub fn range_vec2(&mut self, min: Vec2, max: Vec2) -> Vec2 {
        let x = self.range(min.x, max.x);
        let y = self.range(min.y, max.y);
        Vec2::new(x, y)
    }

    pub fn range_vec3(&mut self, min: Vec3, max: Vec3) -> Vec3 {
        let x = self.range(min.x, max.x);
        let y = self.range(min.y, max.y);
        let z = self.range(min.z, max.z);
        Vec3::new(x, y, z)
    }

    pub fn state(&self) -> u64 { self.state }
}

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use sculptor_core::{iso, quat_from_euler_xyz, Isometry, XorShift64};
use sculptor_geom::ShapeDims;

use crate::config::SimulationConfig;

const RING_CANDIDATES: usize = 10;
const CANDIDATES: usize = 50;
const ANGLE_JITTER: f32 = 0.2;
const CLEARANCE: f32 = 0.1;

/// Spreads a batch of new shapes around a ring so they start apart.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlacementSeeder {
    pub radius: f32,
    pub vertical_spread: f32,
    pub vertical_offset: f32,
    pub add_from_top: bool,
}

impl From<&SimulationConfig> for PlacementSeeder {
    fn from(cfg: &SimulationConfig) -> Self {
        Self {
            radius: cfg.radius,
            vertical_spread: cfg.vertical_spread,
            vertical_offset: cfg.vertical_offset,
            add_from_top: cfg.add_from_top,
        }
    }
}

impl PlacementSeeder {
    fn height(&self, rng: &mut XorShift64) -> f32 {
        let r = rng.next_f32();
        if self.add_from_top {
            self.vertical_offset + r * self.vertical_spread
        } else {
            self.vertical_offset + (r - 0.5) * self.vertical_spread * 2.0
        }
    }

    fn candidate(&self, attempt: usize, base_angle: f32, rng: &mut XorShift64) -> Vec3 {
        let (angle, ring) = if attempt < RING_CANDIDATES {
            (base_angle + (rng.next_f32() - 0.5) * ANGLE_JITTER, self.radius)
        } else {
            let angle = rng.next_f32() * TAU;
            (angle, rng.next_f32() * self.radius)
        };
        let y = self.height(rng);
        Vec3::new(angle.cos() * ring, y, angle.sin() * ring)
    }

    /// Starting position for one shape given the shapes already placed.
    /// When every candidate collides the last one is used.
    pub fn position(&self, radius: f32, placed: &[(Vec3, f32)], base_angle: f32, rng: &mut XorShift64) -> Vec3 {
        let mut last = Vec3::ZERO;
        for attempt in 0..CANDIDATES {
            last = self.candidate(attempt, base_angle, rng);
            let clear = placed.iter().all(|&(p, r)| p.distance(last) >= radius + r + CLEARANCE);
            if clear {
                return last;
            }
        }
        log::debug!("no clear start position after {CANDIDATES} candidates; using {last}");
        last
    }

    /// Starting poses for a batch, in order. Draws one ring offset, then per
    /// shape its position candidates and a random orientation.
    pub fn place(&self, shapes: &[ShapeDims], rng: &mut XorShift64) -> Vec<Isometry> {
        let offset = rng.next_f32() * TAU;
        let n = shapes.len().max(1) as f32;
        let mut placed: Vec<(Vec3, f32)> = Vec::with_capacity(shapes.len());
        let mut poses = Vec::with_capacity(shapes.len());
        for (i, dims) in shapes.iter().enumerate() {
            let radius = dims.bounding_radius();
            let base = offset + i as f32 / n * TAU;
            let pos = self.position(radius, &placed, base, rng);
            placed.push((pos, radius));
            let euler = Vec3::new(rng.next_f32() * PI, rng.next_f32() * PI, rng.next_f32() * PI);
            poses.push(iso(pos, quat_from_euler_xyz(euler)));
        }
        poses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sculptor_geom::SphereDims;

    fn seeder(add_from_top: bool) -> PlacementSeeder {
        PlacementSeeder { radius: 0.5, vertical_spread: 0.5, vertical_offset: 0.4, add_from_top }
    }

    fn spheres(n: usize, r: f32) -> Vec<ShapeDims> { vec![ShapeDims::Sphere(SphereDims { r }); n] }

    #[test]
    fn small_spheres_start_clear_of_each_other() {
        let mut rng = XorShift64::from_seed_str("abc0");
        let shapes = spheres(4, 0.1);
        let poses = seeder(false).place(&shapes, &mut rng);
        assert_eq!(poses.len(), 4);
        for i in 0..4 {
            for j in i + 1..4 {
                assert!(poses[i].pos.distance(poses[j].pos) >= 0.3 - 1e-5);
            }
        }
        for p in &poses {
            assert!(p.pos.y >= 0.4 - 0.5 && p.pos.y <= 0.4 + 0.5);
            assert!((p.rot.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn add_from_top_stays_above_offset() {
        let mut rng = XorShift64::from_seed_str("top");
        for p in seeder(true).place(&spheres(6, 0.05), &mut rng) {
            assert!(p.pos.y >= 0.4);
        }
    }

    #[test]
    fn crowded_batch_still_places_everything() {
        let mut rng = XorShift64::from_seed_str("crowd");
        let poses = seeder(false).place(&spheres(12, 1.0), &mut rng);
        assert_eq!(poses.len(), 12);
        assert!(poses.iter().all(|p| p.pos.is_finite()));
    }

    #[test]
    fn same_seed_same_poses() {
        let shapes = spheres(5, 0.2);
        let a = seeder(false).place(&shapes, &mut XorShift64::from_seed_str("s"));
        let b = seeder(false).place(&shapes, &mut XorShift64::from_seed_str("s"));
        assert_eq!(a, b);
    }
}

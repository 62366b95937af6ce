use glam::Vec3;
use serde::{Deserialize, Serialize};
use sculptor_core::axis_distance;

/// Impulse per unit strength per frame.
pub const IMPULSE_SCALE: f32 = 0.005;

/// Centre-seeking pull toward the point `(0, vertical_offset, 0)`.
///
/// Not a force field: each frame a body receives one impulse toward the target
/// and has its velocities scaled by a damping factor that falls to zero on the
/// vertical axis, so bodies collapse inward and come to rest near the centre.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CenterPull {
    pub strength: f32,
    pub vertical_offset: f32,
}

/// What one frame of pull does to one body.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pull {
    pub impulse: Vec3,
    /// Multiplier for both linear and angular velocity, in `[0, 1]`.
    pub damping: f32,
}

impl CenterPull {
    #[inline] pub fn target(&self) -> Vec3 { Vec3::new(0.0, self.vertical_offset, 0.0) }

    #[inline]
    pub fn eval(&self, p: Vec3) -> Pull {
        let d = axis_distance(p);
        let damping = d.powf(0.1).min(1.0);
        let dir = (self.target() - p).normalize_or_zero();
        // Ease off near the axis so bodies don't overshoot it.
        let mult = if d < 0.5 { d } else { 1.0 };
        let mut impulse = dir * (self.strength * IMPULSE_SCALE * mult);
        impulse.y *= 0.5;
        Pull { impulse, damping }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PULL: CenterPull = CenterPull { strength: 0.1, vertical_offset: 0.4 };

    #[test]
    fn far_body_gets_full_strength_horizontal_impulse() {
        let p = PULL.eval(Vec3::new(2.0, 0.4, 0.0));
        assert!((p.impulse - Vec3::new(-0.1 * IMPULSE_SCALE, 0.0, 0.0)).length() < 1e-9);
        assert_eq!(p.damping, 1.0);
    }

    #[test]
    fn vertical_component_is_halved() {
        // Straight above the target but off-axis by 1: direction (-1, -1)/sqrt2.
        let p = PULL.eval(Vec3::new(1.0, 1.4, 0.0));
        let full = 0.1 * IMPULSE_SCALE / 2f32.sqrt();
        assert!((p.impulse.x + full).abs() < 1e-9);
        assert!((p.impulse.y + 0.5 * full).abs() < 1e-9);
    }

    #[test]
    fn near_axis_scales_with_distance() {
        let p = PULL.eval(Vec3::new(0.25, 0.4, 0.0));
        assert!((p.impulse.x + 0.25 * 0.1 * IMPULSE_SCALE).abs() < 1e-9);
        assert!((p.damping - 0.25f32.powf(0.1)).abs() < 1e-6);
        assert!(p.damping < 1.0);
    }

    #[test]
    fn on_axis_body_is_fully_damped() {
        let p = PULL.eval(Vec3::new(0.0, 3.0, 0.0));
        assert_eq!(p.damping, 0.0);
        assert_eq!(p.impulse, Vec3::ZERO);
    }

    #[test]
    fn at_target_no_impulse() {
        let p = PULL.eval(PULL.target());
        assert_eq!(p.impulse, Vec3::ZERO);
    }
}

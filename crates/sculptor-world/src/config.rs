use serde::{Deserialize, Serialize};
use sculptor_geom::ShapeInstance;

/// Everything one simulation run needs. Missing fields take the defaults below.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Shapes to drop; they become dynamic bodies.
    pub shapes: Vec<ShapeInstance>,
    /// Already-settled shapes; fixed bodies at their stored transform.
    pub anchors: Vec<ShapeInstance>,

    /// Ring radius for starting positions.
    pub radius: f32,
    pub gravity_strength: f32,
    pub friction: f32,
    pub vertical_spread: f32,
    pub vertical_offset: f32,
    pub steps_per_iteration: u32,
    pub timestep: f32,
    pub substeps: u32,
    /// Frames before overlap resolution may start on the first attempt.
    pub initial_frame_budget: u32,
    /// Same, after an attempt reset.
    pub subsequent_frame_budget: u32,
    pub max_attempts: u32,

    pub overlap_resolution: bool,
    pub max_resolution_iterations: u32,
    pub resolution_step: f32,
    /// Kept so saved configurations round-trip; separation moves by `resolution_step`.
    pub separation_buffer: f32,
    pub resolution_frames_per_step: u32,
    pub settle_frames_per_step: u32,

    /// Spawn new shapes only above the vertical offset.
    pub add_from_top: bool,
    pub seed: String,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            shapes: Vec::new(),
            anchors: Vec::new(),
            radius: 0.5,
            gravity_strength: 0.1,
            friction: 1.0,
            vertical_spread: 0.5,
            vertical_offset: 0.4,
            steps_per_iteration: 1,
            timestep: 1.0 / 30.0,
            substeps: 1,
            initial_frame_budget: 300,
            subsequent_frame_budget: 30,
            max_attempts: 10,
            overlap_resolution: true,
            max_resolution_iterations: 10,
            resolution_step: 0.003,
            separation_buffer: 0.01,
            resolution_frames_per_step: 1,
            settle_frames_per_step: 1,
            add_from_top: false,
            seed: String::new(),
        }
    }
}

impl SimulationConfig {
    /// Length of one world step.
    #[inline]
    pub fn substep_dt(&self) -> f32 { self.timestep / self.substeps.max(1) as f32 }

    /// Frame budget for the current attempt.
    #[inline]
    pub fn frame_budget(&self, attempts: u32) -> u32 {
        if attempts == 0 { self.initial_frame_budget } else { self.subsequent_frame_budget }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: SimulationConfig = serde_json::from_str(r#"{ "seed": "abc0", "radius": 0.8 }"#).unwrap();
        assert_eq!(cfg.seed, "abc0");
        assert_eq!(cfg.radius, 0.8);
        assert_eq!(cfg.substeps, 1);
        assert_eq!(cfg.max_resolution_iterations, 10);
        assert_eq!(cfg.resolution_step, 0.003);
        assert!(cfg.overlap_resolution);
        assert!(cfg.anchors.is_empty());
    }

    #[test]
    fn budgets_switch_after_first_attempt() {
        let cfg = SimulationConfig::default();
        assert_eq!(cfg.frame_budget(0), 300);
        assert_eq!(cfg.frame_budget(3), 30);
        let cfg = SimulationConfig { timestep: 0.1, substeps: 4, ..cfg };
        assert!((cfg.substep_dt() - 0.025).abs() < 1e-7);
    }
}

//! Replays a run and digests every step so two runs can be compared byte for byte.

mod types;

pub use types::{SimWorld, StepReport};

use sculptor_core::StepHasher;

use crate::error::SimError;
use crate::simulator::PhysicsSimulator;

impl SimWorld for PhysicsSimulator {
    fn step_frame(&mut self) -> Result<StepReport, SimError> {
        let result = self.step()?;
        Ok(StepReport { frame: result.frame, hash: self.step_hash(), stats: result.stats, reason: result.reason })
    }

    fn step_hash(&self) -> [u8; 32] { PhysicsSimulator::step_hash(self) }
}

/// Steps until completion or `max_steps`, whichever comes first.
pub fn record<W: SimWorld>(world: &mut W, max_steps: usize) -> Result<Vec<StepReport>, SimError> {
    let mut out = Vec::new();
    for _ in 0..max_steps {
        let report = world.step_frame()?;
        let done = report.reason.is_some();
        out.push(report);
        if done {
            break;
        }
    }
    Ok(out)
}

/// One digest over a whole recording.
pub fn digest(reports: &[StepReport]) -> [u8; 32] {
    let mut h = StepHasher::new();
    for r in reports {
        h.update_u32(r.frame);
        h.update_bytes(&r.hash);
    }
    h.finalize()
}

use sculptor_core::StepStats;

use crate::error::SimError;
use crate::result::CompletionReason;

/// What the harness expects from anything it drives.
pub trait SimWorld {
    fn step_frame(&mut self) -> Result<StepReport, SimError>;
    fn step_hash(&self) -> [u8; 32];
}

/// Per-step record used for determinism checks.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StepReport {
    pub frame: u32,
    pub hash: [u8; 32],
    pub stats: StepStats,
    pub reason: Option<CompletionReason>,
}

use serde::{Deserialize, Serialize};

/// Counters for one `step()` call.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepStats {
    pub world_steps: u32,
    pub contact_events: u32,
    pub overlaps: u32,
}

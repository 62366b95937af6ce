//! Settles generated shapes into a connected sculpture.
//!
//! [`PhysicsSimulator`] owns one run: seeded placement, the centre pull, the
//! connectivity gate and the overlap resolver. [`SculptureSession`] wraps it
//! with generation, run tokens and the stored shape list.

pub mod config;
pub mod connectivity;
pub mod det_harness;
mod error;
pub mod placement;
pub mod resolution;
pub mod result;
pub mod session;
pub mod simulator;

pub use config::SimulationConfig;
pub use connectivity::{analyse, ConnectivityMode, ConnectivityReport, ContactGraph};
pub use error::SimError;
pub use placement::PlacementSeeder;
pub use resolution::{OverlapResolver, ResolutionPhase};
pub use result::{
    BodySnapshot, CompletionReason, ManualResolution, OverlapPair, SimulationResult, SimulatorStatus,
};
pub use session::{GenerationSettings, RuleBook, SculptureSession, Tuning, FLOOR_GAP};
pub use simulator::{CancelHandle, PhysicsSimulator};

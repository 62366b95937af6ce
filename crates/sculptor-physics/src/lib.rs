//! Rigid-body adapter: an arena of bodies addressed by `BodyId`, backed by rapier.

mod convert;
pub mod collider;
pub mod events;
pub mod world;

pub use collider::{build_collider, PhysicsError};
pub use world::{BodyContact, BodyDesc, Overlap, PhysicsWorld, PENETRATION_EPS};

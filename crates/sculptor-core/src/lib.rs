pub mod ids;
pub mod types;
pub mod hash;
pub mod time;
pub mod rng;
pub mod range;
pub mod sample;

pub use ids::{BodyId, ShapeToken, RunToken};
pub use types::{
    Scalar, Isometry, Velocity, vec2, vec3, iso, quat_identity, quat_from_euler_xyz, euler_xyz,
    axis_distance,
};
pub use hash::{StepHasher, hash_vec3, hash_quat, hex};
pub use time::StepStats;
pub use rng::XorShift64;
pub use range::{Lerp, Range};
pub use sample::{pick, pick_index, SampleError};
pub use glam::{Quat, Vec2, Vec3};

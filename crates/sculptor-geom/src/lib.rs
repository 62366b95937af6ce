pub mod aabb;
pub mod bounds;
pub mod collider;
pub mod hull;
pub mod instance;
pub mod shape;
mod solids;

pub use aabb::Aabb;
pub use bounds::{cluster_aabb, spatial_bounds, SpatialBounds};
pub use collider::ColliderSpec;
pub use instance::ShapeInstance;
pub use shape::*;

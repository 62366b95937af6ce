pub mod dims;
pub mod shape_rule;
pub mod generator;

pub use dims::DimRanges;
pub use shape_rule::{Pass, ShapeRule, UpgradeGroup};
pub use generator::{generate, shape_count, Generated, RuleError, RuleSet};

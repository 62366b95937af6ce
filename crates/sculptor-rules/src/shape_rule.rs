use serde::{Deserialize, Serialize};
use sculptor_geom::ShapeKind;

use crate::dims::DimRanges;

/// Which generation passes may draw a rule.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeGroup {
    #[default]
    Base,
    UpgradeOnly,
    Both,
}

/// The two generation operations.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pass { Base, Upgrade }

impl UpgradeGroup {
    #[inline]
    pub fn allows(self, pass: Pass) -> bool {
        matches!(
            (self, pass),
            (UpgradeGroup::Base | UpgradeGroup::Both, Pass::Base)
                | (UpgradeGroup::UpgradeOnly | UpgradeGroup::Both, Pass::Upgrade)
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapeRule {
    pub name: String,
    pub id: String,
    #[serde(flatten)]
    pub dims: DimRanges,
    /// Ids of the material rules this shape may draw from.
    #[serde(default)]
    pub materials: Vec<String>,
    pub weight: f32,
    #[serde(default)]
    pub upgrade: UpgradeGroup,
}

impl ShapeRule {
    #[inline] pub fn kind(&self) -> ShapeKind { self.dims.kind() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_gate_passes() {
        assert!(UpgradeGroup::Base.allows(Pass::Base));
        assert!(!UpgradeGroup::Base.allows(Pass::Upgrade));
        assert!(!UpgradeGroup::UpgradeOnly.allows(Pass::Base));
        assert!(UpgradeGroup::UpgradeOnly.allows(Pass::Upgrade));
        assert!(UpgradeGroup::Both.allows(Pass::Base) && UpgradeGroup::Both.allows(Pass::Upgrade));
    }

    #[test]
    fn rule_json_flattens_kind_ranges() {
        let json = r#"{
            "name": "pebble", "id": "p1", "weight": 2.0,
            "type": "sphere", "r": {"min": 0.1, "max": 0.2},
            "materials": ["m1"], "upgrade": "both"
        }"#;
        let rule: ShapeRule = serde_json::from_str(json).unwrap();
        assert_eq!(rule.kind(), ShapeKind::Sphere);
        assert_eq!(rule.upgrade, UpgradeGroup::Both);
        let back: ShapeRule = serde_json::from_str(&serde_json::to_string(&rule).unwrap()).unwrap();
        assert_eq!(back, rule);
    }
}

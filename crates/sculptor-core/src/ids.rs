use core::fmt;
use serde::{Deserialize, Serialize};

/// Arena slot of a body inside the physics adapter. Index order is creation order:
/// anchors first, then new shapes.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct BodyId(pub u32);
impl fmt::Display for BodyId { fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "BodyId({})", self.0) } }

impl BodyId {
    #[inline] pub fn index(self) -> usize { self.0 as usize }
}

/// Stable identity of a generated shape, carried through every re-simulation.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ShapeToken(pub String);
impl fmt::Display for ShapeToken { fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) } }

impl ShapeToken {
    /// Deterministic token from the generation seed and the shape's ordinal.
    pub fn derive(seed: &str, ordinal: u32) -> Self {
        let mut h = blake3::Hasher::new();
        h.update(b"SHAPEv1\0");
        h.update(seed.as_bytes());
        h.update(&ordinal.to_le_bytes());
        let hex = h.finalize().to_hex();
        ShapeToken(hex.as_str()[..16].to_string())
    }
}

/// Identifies one simulation run. A session hands one out per run and ignores
/// steps carrying any other token.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct RunToken(pub u64);
impl fmt::Display for RunToken { fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "RunToken({})", self.0) } }

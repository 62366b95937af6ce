use core::fmt;
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use sculptor_core::Isometry;

use crate::collider::ColliderSpec;
use crate::solids;

/// The sixteen primitive kinds. Numeric codes match the ones saved sculptures use.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Sphere = 1,
    Box = 2,
    RoundBox = 3,
    Torus = 4,
    Link = 5,
    Cone = 6,
    HexPrism = 7,
    TriPrism = 8,
    Capsule = 9,
    Cylinder = 10,
    RoundCylinder = 11,
    CutCone = 12,
    SolidAngle = 13,
    CutSphere = 14,
    RoundCone = 15,
    Octahedron = 18,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 16] = [
        ShapeKind::Sphere, ShapeKind::Box, ShapeKind::RoundBox, ShapeKind::Torus,
        ShapeKind::Link, ShapeKind::Cone, ShapeKind::HexPrism, ShapeKind::TriPrism,
        ShapeKind::Capsule, ShapeKind::Cylinder, ShapeKind::RoundCylinder, ShapeKind::CutCone,
        ShapeKind::SolidAngle, ShapeKind::CutSphere, ShapeKind::RoundCone, ShapeKind::Octahedron,
    ];

    #[inline] pub fn code(self) -> u8 { self as u8 }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.code() == code)
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{self:?}") }
}

// Per-kind dimension records. Field names follow the renderer's uniforms.

/// `r`: radius.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SphereDims { pub r: f32 }

/// `a`: half extents.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoxDims { pub a: Vec3 }

/// `a`: outer half extents, `r`: edge rounding.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundBoxDims { pub a: Vec3, pub r: f32 }

/// `r1`: major radius, `r2`: tube radius.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TorusDims { pub r1: f32, pub r2: f32 }

/// `h`: half length of the straight sides, `r1`: arc radius, `r2`: tube radius.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinkDims { pub h: f32, pub r1: f32, pub r2: f32 }

/// `h`: full height, `r`: base radius, `c`: normalized `(r, h)`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConeDims { pub h: f32, pub r: f32, pub c: Vec2 }

/// `c.x`: apothem, `c.y`: half depth along local Z.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HexPrismDims { pub c: Vec2 }

/// `c.x`: triangle scale (circumradius), `c.y`: half depth along local Z.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TriPrismDims { pub c: Vec2 }

/// `h`: length of the straight segment, `r`: radius.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CapsuleDims { pub h: f32, pub r: f32 }

/// `h`: half height, `r`: radius.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CylinderDims { pub h: f32, pub r: f32 }

/// `h`: core half height, `r`: core radius, `r2`: rounding.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundCylinderDims { pub h: f32, pub r: f32, pub r2: f32 }

/// `h`: half height, `r`: bottom radius, `r2`: top radius.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CutConeDims { pub h: f32, pub r: f32, pub r2: f32 }

/// `h`: full opening angle (radians), `r`: radius, `c`: `(sin(h/2), cos(h/2))`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SolidAngleDims { pub h: f32, pub r: f32, pub c: Vec2 }

/// `h`: cut plane height normalized to `[-1, 1]` of the radius, `r`: radius.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CutSphereDims { pub h: f32, pub r: f32 }

/// `h`: distance between the sphere centres, `r1`: bottom radius, `r2`: top radius.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundConeDims { pub h: f32, pub r1: f32, pub r2: f32 }

/// `r`: distance from centre to each vertex.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OctahedronDims { pub r: f32 }

impl ConeDims {
    pub fn new(h: f32, r: f32) -> Self { Self { h, r, c: Vec2::new(r, h).normalize_or_zero() } }
}

impl SolidAngleDims {
    pub fn new(h: f32, r: f32) -> Self {
        let half = h * 0.5;
        Self { h, r, c: Vec2::new(half.sin(), half.cos()) }
    }
}

/// Concrete dimensions of one shape; the variant is the kind.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeDims {
    Sphere(SphereDims),
    Box(BoxDims),
    RoundBox(RoundBoxDims),
    Torus(TorusDims),
    Link(LinkDims),
    Cone(ConeDims),
    HexPrism(HexPrismDims),
    TriPrism(TriPrismDims),
    Capsule(CapsuleDims),
    Cylinder(CylinderDims),
    RoundCylinder(RoundCylinderDims),
    CutCone(CutConeDims),
    SolidAngle(SolidAngleDims),
    CutSphere(CutSphereDims),
    RoundCone(RoundConeDims),
    Octahedron(OctahedronDims),
}

/// A disc of `radius` about a local `centre`, facing `axis`, grown by `border`
/// in every direction. A ball is a disc of radius zero.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RoundPart {
    pub centre: Vec3,
    pub axis: Vec3,
    pub radius: f32,
    pub border: f32,
}

impl RoundPart {
    #[inline] pub fn ball(centre: Vec3, r: f32) -> Self { Self { centre, axis: Vec3::Y, radius: 0.0, border: r } }

    /// Horizontal disc at local height `y`.
    #[inline] pub fn disc(y: f32, radius: f32, border: f32) -> Self {
        Self { centre: Vec3::new(0.0, y, 0.0), axis: Vec3::Y, radius, border }
    }

    /// World centre and per-axis half extent under `pose`.
    pub fn world_extent(&self, pose: &Isometry) -> (Vec3, Vec3) {
        let n = pose.rot * self.axis;
        let spread = |c: f32| self.radius * (1.0 - c * c).max(0.0).sqrt() + self.border;
        (pose.transform_point(self.centre), Vec3::new(spread(n.x), spread(n.y), spread(n.z)))
    }

    /// Farthest distance from the local origin.
    pub fn reach(&self) -> f32 {
        let along = self.centre.dot(self.axis);
        let across = (self.centre - self.axis * along).length() + self.radius;
        (along * along + across * across).sqrt() + self.border
    }
}

/// Everything kind-specific the engine needs from a primitive.
pub trait Solid {
    fn kind(&self) -> ShapeKind;
    /// Collider for the physics adapter: a native primitive or a hull point cloud.
    fn collider(&self) -> ColliderSpec;
    /// Local-frame points whose transformed extremes bound the flat-sided geometry.
    fn extent_points(&self) -> Vec<Vec3>;
    /// Balls and discs covering the round geometry.
    fn round_parts(&self) -> Vec<RoundPart> { Vec::new() }
    /// Cheap conservative radius used to space out starting positions.
    fn bounding_radius(&self) -> f32;
}

impl ShapeDims {
    /// The handler for this kind. The only place that switches on the variant.
    pub fn solid(&self) -> &dyn Solid {
        match self {
            ShapeDims::Sphere(d) => d,
            ShapeDims::Box(d) => d,
            ShapeDims::RoundBox(d) => d,
            ShapeDims::Torus(d) => d,
            ShapeDims::Link(d) => d,
            ShapeDims::Cone(d) => d,
            ShapeDims::HexPrism(d) => d,
            ShapeDims::TriPrism(d) => d,
            ShapeDims::Capsule(d) => d,
            ShapeDims::Cylinder(d) => d,
            ShapeDims::RoundCylinder(d) => d,
            ShapeDims::CutCone(d) => d,
            ShapeDims::SolidAngle(d) => d,
            ShapeDims::CutSphere(d) => d,
            ShapeDims::RoundCone(d) => d,
            ShapeDims::Octahedron(d) => d,
        }
    }

    #[inline] pub fn kind(&self) -> ShapeKind { self.solid().kind() }
    #[inline] pub fn collider(&self) -> ColliderSpec { self.solid().collider() }
    #[inline] pub fn extent_points(&self) -> Vec<Vec3> { self.solid().extent_points() }
    #[inline] pub fn round_parts(&self) -> Vec<RoundPart> { self.solid().round_parts() }
    #[inline] pub fn bounding_radius(&self) -> f32 { self.solid().bounding_radius() }

    /// Fallback dimensions for a kind, used when a saved anchor lacks its record.
    pub fn default_for(kind: ShapeKind) -> Self {
        solids::default_dims(kind)
    }
}

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use sculptor_core::{Range, XorShift64};
use sculptor_geom::*;

/// Per-kind authoring ranges. Each variant carries exactly the fields its kind draws.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DimRanges {
    Sphere { r: Range<f32> },
    Box { a: Range<Vec3> },
    RoundBox { a: Range<Vec3>, r: Range<f32> },
    Torus { r1: Range<f32>, r2: Range<f32> },
    Link { h: Range<f32>, r1: Range<f32>, r2: Range<f32> },
    Cone { h: Range<f32>, r: Range<f32> },
    HexPrism { c: Range<Vec2> },
    TriPrism { c: Range<Vec2> },
    Capsule { h: Range<f32>, r: Range<f32> },
    Cylinder { h: Range<f32>, r: Range<f32> },
    RoundCylinder { h: Range<f32>, r: Range<f32>, r2: Range<f32> },
    CutCone { h: Range<f32>, r: Range<f32>, r2: Range<f32> },
    SolidAngle { h: Range<f32>, r: Range<f32> },
    CutSphere { h: Range<f32>, r: Range<f32> },
    RoundCone { h: Range<f32>, r1: Range<f32>, r2: Range<f32> },
    Octahedron { r: Range<f32> },
}

impl DimRanges {
    pub fn kind(&self) -> ShapeKind {
        match self {
            DimRanges::Sphere { .. } => ShapeKind::Sphere,
            DimRanges::Box { .. } => ShapeKind::Box,
            DimRanges::RoundBox { .. } => ShapeKind::RoundBox,
            DimRanges::Torus { .. } => ShapeKind::Torus,
            DimRanges::Link { .. } => ShapeKind::Link,
            DimRanges::Cone { .. } => ShapeKind::Cone,
            DimRanges::HexPrism { .. } => ShapeKind::HexPrism,
            DimRanges::TriPrism { .. } => ShapeKind::TriPrism,
            DimRanges::Capsule { .. } => ShapeKind::Capsule,
            DimRanges::Cylinder { .. } => ShapeKind::Cylinder,
            DimRanges::RoundCylinder { .. } => ShapeKind::RoundCylinder,
            DimRanges::CutCone { .. } => ShapeKind::CutCone,
            DimRanges::SolidAngle { .. } => ShapeKind::SolidAngle,
            DimRanges::CutSphere { .. } => ShapeKind::CutSphere,
            DimRanges::RoundCone { .. } => ShapeKind::RoundCone,
            DimRanges::Octahedron { .. } => ShapeKind::Octahedron,
        }
    }

    /// Draws concrete dimensions. Fields are drawn in declaration order of the
    /// renderer's record (e.g. a round box draws `r` before `a`), vectors x, y, z.
    pub fn synthesize(&self, rng: &mut XorShift64) -> ShapeDims {
        match self {
            DimRanges::Sphere { r } => ShapeDims::Sphere(SphereDims { r: r.sample(rng) }),
            DimRanges::Octahedron { r } => ShapeDims::Octahedron(OctahedronDims { r: r.sample(rng) }),
            DimRanges::RoundBox { a, r } => {
                let r = r.sample(rng);
                ShapeDims::RoundBox(RoundBoxDims { a: a.sample(rng), r })
            }
            DimRanges::Box { a } => ShapeDims::Box(BoxDims { a: a.sample(rng) }),
            DimRanges::Link { h, r1, r2 } => {
                let (h, r1, r2) = (h.sample(rng), r1.sample(rng), r2.sample(rng));
                ShapeDims::Link(LinkDims { h, r1, r2 })
            }
            DimRanges::RoundCone { h, r1, r2 } => {
                let (h, r1, r2) = (h.sample(rng), r1.sample(rng), r2.sample(rng));
                ShapeDims::RoundCone(RoundConeDims { h, r1, r2 })
            }
            DimRanges::Torus { r1, r2 } => {
                let (r1, r2) = (r1.sample(rng), r2.sample(rng));
                ShapeDims::Torus(TorusDims { r1, r2 })
            }
            DimRanges::Cone { h, r } => {
                let (h, r) = (h.sample(rng), r.sample(rng));
                ShapeDims::Cone(ConeDims::new(h, r))
            }
            DimRanges::HexPrism { c } => ShapeDims::HexPrism(HexPrismDims { c: c.sample(rng) }),
            DimRanges::TriPrism { c } => ShapeDims::TriPrism(TriPrismDims { c: c.sample(rng) }),
            DimRanges::Capsule { h, r } => {
                let (h, r) = (h.sample(rng), r.sample(rng));
                ShapeDims::Capsule(CapsuleDims { h, r })
            }
            DimRanges::Cylinder { h, r } => {
                let (h, r) = (h.sample(rng), r.sample(rng));
                ShapeDims::Cylinder(CylinderDims { h, r })
            }
            DimRanges::RoundCylinder { h, r, r2 } => {
                let (h, r, r2) = (h.sample(rng), r.sample(rng), r2.sample(rng));
                ShapeDims::RoundCylinder(RoundCylinderDims { h, r, r2 })
            }
            DimRanges::CutCone { h, r, r2 } => {
                let (h, r, r2) = (h.sample(rng), r.sample(rng), r2.sample(rng));
                ShapeDims::CutCone(CutConeDims { h, r, r2 })
            }
            DimRanges::SolidAngle { h, r } => {
                let (h, r) = (h.sample(rng), r.sample(rng));
                ShapeDims::SolidAngle(SolidAngleDims::new(h, r))
            }
            DimRanges::CutSphere { h, r } => {
                let (h, r) = (h.sample(rng), r.sample(rng));
                ShapeDims::CutSphere(CutSphereDims { h, r })
            }
        }
    }
}

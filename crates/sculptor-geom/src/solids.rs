//! One `Solid` implementation per primitive kind.

use glam::{Vec2, Vec3};

use crate::collider::ColliderSpec;
use crate::hull;
use crate::shape::*;

fn corners(a: Vec3) -> Vec<Vec3> {
    let mut pts = Vec::with_capacity(8);
    for x in [-a.x, a.x] {
        for y in [-a.y, a.y] {
            for z in [-a.z, a.z] { pts.push(Vec3::new(x, y, z)); }
        }
    }
    pts
}

fn hull_spec(points: Vec<Vec3>, fallback_r: f32) -> ColliderSpec {
    ColliderSpec::ConvexHull { points, fallback_r }
}

impl Solid for SphereDims {
    fn kind(&self) -> ShapeKind { ShapeKind::Sphere }
    fn collider(&self) -> ColliderSpec { ColliderSpec::Ball { r: self.r } }
    fn extent_points(&self) -> Vec<Vec3> { Vec::new() }
    fn round_parts(&self) -> Vec<RoundPart> { vec![RoundPart::ball(Vec3::ZERO, self.r)] }
    fn bounding_radius(&self) -> f32 { self.r }
}

impl Solid for BoxDims {
    fn kind(&self) -> ShapeKind { ShapeKind::Box }
    fn collider(&self) -> ColliderSpec { ColliderSpec::Cuboid { half: self.a } }
    fn extent_points(&self) -> Vec<Vec3> { corners(self.a) }
    fn bounding_radius(&self) -> f32 { self.a.length() }
}

impl Solid for RoundBoxDims {
    fn kind(&self) -> ShapeKind { ShapeKind::RoundBox }
    fn collider(&self) -> ColliderSpec {
        // `a` is the outer size; the engine wants the core box plus border.
        let core = (self.a - Vec3::splat(self.r)).max(Vec3::splat(1e-4));
        ColliderSpec::RoundCuboid { half: core, border: self.r }
    }
    fn extent_points(&self) -> Vec<Vec3> { Vec::new() }
    fn round_parts(&self) -> Vec<RoundPart> {
        let core = (self.a - Vec3::splat(self.r)).max(Vec3::ZERO);
        corners(core).into_iter().map(|c| RoundPart::ball(c, self.r)).collect()
    }
    fn bounding_radius(&self) -> f32 { self.a.length() }
}

impl Solid for TorusDims {
    fn kind(&self) -> ShapeKind { ShapeKind::Torus }
    fn collider(&self) -> ColliderSpec {
        hull_spec(hull::torus_points(self.r1, self.r2, 16, 8), self.bounding_radius())
    }
    fn extent_points(&self) -> Vec<Vec3> { Vec::new() }
    fn round_parts(&self) -> Vec<RoundPart> { vec![RoundPart::disc(0.0, self.r1, self.r2)] }
    fn bounding_radius(&self) -> f32 { self.r1 + self.r2 }
}

impl Solid for LinkDims {
    fn kind(&self) -> ShapeKind { ShapeKind::Link }
    fn collider(&self) -> ColliderSpec {
        hull_spec(hull::link_points(self.r1, self.r2, self.h, 16, 8), self.bounding_radius())
    }
    fn extent_points(&self) -> Vec<Vec3> {
        let mut pts = hull::link_points(self.r1, self.r2, self.h, 8, 8);
        pts.extend(
            hull::link_path(self.r1 + self.r2, self.h, 8)
                .into_iter()
                .map(|p| Vec3::new(p.x, p.y, 0.0)),
        );
        pts
    }
    fn bounding_radius(&self) -> f32 { self.h + self.r1 + self.r2 }
}

impl ConeDims {
    /// Base radius as the collider sees it: `h * c.x / c.y`.
    pub fn base_radius(&self) -> f32 {
        if self.c.y > 1e-6 { self.h * self.c.x / self.c.y } else { self.r }
    }
}

impl Solid for ConeDims {
    fn kind(&self) -> ShapeKind { ShapeKind::Cone }
    fn collider(&self) -> ColliderSpec {
        ColliderSpec::Cone { half_height: self.h * 0.5, r: self.base_radius() }
    }
    fn extent_points(&self) -> Vec<Vec3> { vec![Vec3::new(0.0, self.h * 0.5, 0.0)] }
    fn round_parts(&self) -> Vec<RoundPart> { vec![RoundPart::disc(-self.h * 0.5, self.base_radius(), 0.0)] }
    fn bounding_radius(&self) -> f32 {
        Vec2::new(self.base_radius(), self.h * 0.5).length()
    }
}

impl Solid for HexPrismDims {
    fn kind(&self) -> ShapeKind { ShapeKind::HexPrism }
    fn collider(&self) -> ColliderSpec {
        hull_spec(hull::hex_prism_points(self.c.x, self.c.y), self.bounding_radius())
    }
    fn extent_points(&self) -> Vec<Vec3> { hull::hex_prism_points(self.c.x, self.c.y) }
    fn bounding_radius(&self) -> f32 {
        let circum = self.c.x * (2.0 / 3f32.sqrt());
        Vec2::new(circum, self.c.y).length()
    }
}

impl Solid for TriPrismDims {
    fn kind(&self) -> ShapeKind { ShapeKind::TriPrism }
    fn collider(&self) -> ColliderSpec {
        hull_spec(hull::tri_prism_points(self.c.x, self.c.y), self.bounding_radius())
    }
    fn extent_points(&self) -> Vec<Vec3> { hull::tri_prism_points(self.c.x, self.c.y) }
    fn bounding_radius(&self) -> f32 { self.c.length() }
}

impl Solid for CapsuleDims {
    fn kind(&self) -> ShapeKind { ShapeKind::Capsule }
    fn collider(&self) -> ColliderSpec {
        ColliderSpec::Capsule { half_height: self.h * 0.5, r: self.r }
    }
    fn extent_points(&self) -> Vec<Vec3> { Vec::new() }
    fn round_parts(&self) -> Vec<RoundPart> {
        let half = self.h * 0.5;
        vec![RoundPart::ball(Vec3::new(0.0, half, 0.0), self.r), RoundPart::ball(Vec3::new(0.0, -half, 0.0), self.r)]
    }
    fn bounding_radius(&self) -> f32 { self.h * 0.5 + self.r }
}

impl Solid for CylinderDims {
    fn kind(&self) -> ShapeKind { ShapeKind::Cylinder }
    fn collider(&self) -> ColliderSpec { ColliderSpec::Cylinder { half_height: self.h, r: self.r } }
    fn extent_points(&self) -> Vec<Vec3> { Vec::new() }
    fn round_parts(&self) -> Vec<RoundPart> {
        vec![RoundPart::disc(self.h, self.r, 0.0), RoundPart::disc(-self.h, self.r, 0.0)]
    }
    fn bounding_radius(&self) -> f32 { Vec2::new(self.r, self.h).length() }
}

impl Solid for RoundCylinderDims {
    fn kind(&self) -> ShapeKind { ShapeKind::RoundCylinder }
    fn collider(&self) -> ColliderSpec {
        ColliderSpec::RoundCylinder { half_height: self.h, r: self.r, border: self.r2 }
    }
    fn extent_points(&self) -> Vec<Vec3> { Vec::new() }
    fn round_parts(&self) -> Vec<RoundPart> {
        vec![RoundPart::disc(self.h, self.r, self.r2), RoundPart::disc(-self.h, self.r, self.r2)]
    }
    fn bounding_radius(&self) -> f32 { Vec2::new(self.r + self.r2, self.h + self.r2).length() }
}

impl Solid for CutConeDims {
    fn kind(&self) -> ShapeKind { ShapeKind::CutCone }
    fn collider(&self) -> ColliderSpec {
        hull_spec(hull::cut_cone_points(self.r, self.r2, self.h, 16), self.bounding_radius())
    }
    fn extent_points(&self) -> Vec<Vec3> { Vec::new() }
    fn round_parts(&self) -> Vec<RoundPart> {
        vec![RoundPart::disc(-self.h, self.r, 0.0), RoundPart::disc(self.h, self.r2, 0.0)]
    }
    fn bounding_radius(&self) -> f32 { Vec2::new(self.r.max(self.r2), self.h).length() }
}

impl Solid for SolidAngleDims {
    fn kind(&self) -> ShapeKind { ShapeKind::SolidAngle }
    fn collider(&self) -> ColliderSpec {
        hull_spec(hull::solid_angle_points(self.h * 0.5, self.r), self.bounding_radius())
    }
    fn extent_points(&self) -> Vec<Vec3> { hull::solid_angle_points(self.h * 0.5, self.r) }
    fn bounding_radius(&self) -> f32 { self.r }
}

impl Solid for CutSphereDims {
    fn kind(&self) -> ShapeKind { ShapeKind::CutSphere }
    fn collider(&self) -> ColliderSpec {
        hull_spec(hull::cut_sphere_points(self.r, self.h), self.bounding_radius())
    }
    fn extent_points(&self) -> Vec<Vec3> { hull::cut_sphere_points(self.r, self.h) }
    fn bounding_radius(&self) -> f32 { self.r }
}

impl Solid for RoundConeDims {
    fn kind(&self) -> ShapeKind { ShapeKind::RoundCone }
    fn collider(&self) -> ColliderSpec {
        hull_spec(hull::round_cone_points(self.r1, self.r2, self.h, 16, 8), self.bounding_radius())
    }
    fn extent_points(&self) -> Vec<Vec3> { Vec::new() }
    fn round_parts(&self) -> Vec<RoundPart> {
        vec![RoundPart::ball(Vec3::ZERO, self.r1), RoundPart::ball(Vec3::new(0.0, self.h, 0.0), self.r2)]
    }
    fn bounding_radius(&self) -> f32 { self.r1.max(self.h + self.r2) }
}

impl Solid for OctahedronDims {
    fn kind(&self) -> ShapeKind { ShapeKind::Octahedron }
    fn collider(&self) -> ColliderSpec {
        hull_spec(hull::octahedron_points(self.r), self.r)
    }
    fn extent_points(&self) -> Vec<Vec3> { hull::octahedron_points(self.r) }
    fn bounding_radius(&self) -> f32 { self.r }
}

pub(crate) fn default_dims(kind: ShapeKind) -> ShapeDims {
    let half = Vec3::splat(0.5);
    match kind {
        ShapeKind::Sphere => ShapeDims::Sphere(SphereDims { r: 0.5 }),
        ShapeKind::Box => ShapeDims::Box(BoxDims { a: half }),
        ShapeKind::RoundBox => ShapeDims::RoundBox(RoundBoxDims { a: half, r: 0.1 }),
        ShapeKind::Torus => ShapeDims::Torus(TorusDims { r1: 0.5, r2: 0.2 }),
        ShapeKind::Link => ShapeDims::Link(LinkDims { h: 1.0, r1: 0.5, r2: 0.2 }),
        ShapeKind::Cone => ShapeDims::Cone(ConeDims::new(1.0, 0.5)),
        ShapeKind::HexPrism => ShapeDims::HexPrism(HexPrismDims { c: Vec2::new(0.5, 1.0) }),
        ShapeKind::TriPrism => ShapeDims::TriPrism(TriPrismDims { c: Vec2::new(0.5, 1.0) }),
        ShapeKind::Capsule => ShapeDims::Capsule(CapsuleDims { h: 1.0, r: 0.5 }),
        ShapeKind::Cylinder => ShapeDims::Cylinder(CylinderDims { h: 1.0, r: 0.5 }),
        ShapeKind::RoundCylinder => ShapeDims::RoundCylinder(RoundCylinderDims { h: 1.0, r: 0.5, r2: 0.1 }),
        ShapeKind::CutCone => ShapeDims::CutCone(CutConeDims { h: 1.0, r: 0.5, r2: 0.3 }),
        ShapeKind::SolidAngle => ShapeDims::SolidAngle(SolidAngleDims::new(1.0, 0.5)),
        ShapeKind::CutSphere => ShapeDims::CutSphere(CutSphereDims { h: 0.0, r: 0.5 }),
        ShapeKind::RoundCone => ShapeDims::RoundCone(RoundConeDims { h: 1.0, r1: 0.5, r2: 0.3 }),
        ShapeKind::Octahedron => ShapeDims::Octahedron(OctahedronDims { r: 0.5 }),
    }
}

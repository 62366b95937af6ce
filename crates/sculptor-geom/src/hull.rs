//! Hull point clouds for kinds the physics engine has no primitive for.
//! Segment counts are fixed so colliders are reproducible run to run.

use core::f32::consts::{PI, TAU};
use glam::{Vec2, Vec3};

const SQRT3_2: f32 = 0.866_025_4;

pub fn cut_cone_points(bottom_r: f32, top_r: f32, half_h: f32, segments: u32) -> Vec<Vec3> {
    let mut pts = Vec::with_capacity(segments as usize * 2);
    for (r, y) in [(bottom_r, -half_h), (top_r, half_h)] {
        for i in 0..segments {
            let a = i as f32 / segments as f32 * TAU;
            pts.push(Vec3::new(a.cos() * r, y, a.sin() * r));
        }
    }
    pts
}

/// Triangle in XY extruded along Z. `scale` is the circumradius, `half_d` the half depth.
pub fn tri_prism_points(scale: f32, half_d: f32) -> Vec<Vec3> {
    let tri = triangle(scale);
    let mut pts = Vec::with_capacity(6);
    for z in [-half_d, half_d] {
        for v in tri { pts.push(Vec3::new(v.x, v.y, z)); }
    }
    pts
}

pub(crate) fn triangle(scale: f32) -> [Vec2; 3] {
    [
        Vec2::new(0.0, scale),
        Vec2::new(-scale * SQRT3_2, -scale * 0.5),
        Vec2::new(scale * SQRT3_2, -scale * 0.5),
    ]
}

/// Regular hexagon in XY (flat top/bottom) extruded along Z.
pub fn hex_prism_points(apothem: f32, half_d: f32) -> Vec<Vec3> {
    let hex = hexagon(apothem);
    let mut pts = Vec::with_capacity(12);
    for z in [-half_d, half_d] {
        for v in hex { pts.push(Vec3::new(v.x, v.y, z)); }
    }
    pts
}

pub(crate) fn hexagon(apothem: f32) -> [Vec2; 6] {
    let radius = apothem * (2.0 / 3f32.sqrt());
    core::array::from_fn(|i| {
        let a = i as f32 * PI / 3.0;
        Vec2::new(radius * a.cos(), radius * a.sin())
    })
}

/// Torus around Y: `segments` around the ring, `sides` around the tube.
pub fn torus_points(major: f32, minor: f32, segments: u32, sides: u32) -> Vec<Vec3> {
    let mut pts = Vec::with_capacity((segments * sides) as usize);
    for i in 0..segments {
        let theta = i as f32 / segments as f32 * TAU;
        let (st, ct) = theta.sin_cos();
        for j in 0..sides {
            let phi = j as f32 / sides as f32 * TAU;
            let ring = major + phi.cos() * minor;
            pts.push(Vec3::new(ct * ring, phi.sin() * minor, st * ring));
        }
    }
    pts
}

/// Stadium-shaped centreline in XY: arcs of `arc_r` centred at `±half_len`.
pub(crate) fn link_path(arc_r: f32, half_len: f32, arc_steps: u32) -> Vec<Vec2> {
    let n = arc_steps as f32;
    let mut path = Vec::with_capacity(arc_steps as usize * 4);
    for i in 0..=arc_steps {
        let t = PI - i as f32 / n * PI;
        path.push(Vec2::new(arc_r * t.cos(), half_len + arc_r * t.sin()));
    }
    for i in 1..arc_steps {
        let t = i as f32 / n;
        path.push(Vec2::new(arc_r, half_len - 2.0 * half_len * t));
    }
    for i in 0..=arc_steps {
        let t = i as f32 / n * PI;
        path.push(Vec2::new(arc_r * t.cos(), -half_len - arc_r * t.sin()));
    }
    for i in 1..arc_steps {
        let t = i as f32 / n;
        path.push(Vec2::new(-arc_r, -half_len + 2.0 * half_len * t));
    }
    path
}

/// Chain link: a circular tube swept along the stadium path.
pub fn link_points(arc_r: f32, tube_r: f32, half_len: f32, arc_steps: u32, sides: u32) -> Vec<Vec3> {
    let path = link_path(arc_r, half_len, arc_steps);
    let mut pts = Vec::with_capacity(path.len() * sides as usize);
    for p in path {
        for j in 0..sides {
            let phi = j as f32 / sides as f32 * TAU;
            pts.push(Vec3::new(p.x + tube_r * phi.cos(), p.y, tube_r * phi.sin()));
        }
    }
    pts
}

/// Spherical sector opening around +Y with half angle `half_angle`.
pub fn solid_angle_points(half_angle: f32, r: f32) -> Vec<Vec3> {
    const AZIMUTH: u32 = 6;
    const POLAR: u32 = 3;
    let mut pts = vec![Vec3::ZERO, Vec3::new(0.0, r, 0.0)];
    for i in 0..AZIMUTH {
        let phi = i as f32 / AZIMUTH as f32 * TAU;
        for j in 1..=POLAR {
            let theta = j as f32 / POLAR as f32 * half_angle;
            for rr in [r * 0.5, r] {
                pts.push(spherical(rr, theta, phi));
            }
        }
    }
    pts
}

/// Sphere of radius `r` with everything below `h_norm * r` removed.
pub fn cut_sphere_points(r: f32, h_norm: f32) -> Vec<Vec3> {
    const AZIMUTH: u32 = 16;
    const POLAR: u32 = 12;
    let h = h_norm.clamp(-1.0, 1.0) * r;
    let w = (r * r - h * h).max(0.0).sqrt();
    let mut pts = Vec::new();
    for i in 0..AZIMUTH {
        let phi = i as f32 / AZIMUTH as f32 * TAU;
        for j in 0..POLAR {
            let theta = j as f32 / (POLAR - 1) as f32 * PI;
            let p = spherical(r, theta, phi);
            if p.y >= h { pts.push(p); }
        }
    }
    if h.abs() < r {
        for i in 0..AZIMUTH {
            let phi = i as f32 / AZIMUTH as f32 * TAU;
            pts.push(Vec3::new(w * phi.cos(), h, w * phi.sin()));
        }
        pts.push(Vec3::new(0.0, h, 0.0));
    }
    pts
}

/// Two spheres (`r1` at the origin, `r2` at `(0, h, 0)`) joined by a cone band.
pub fn round_cone_points(r1: f32, r2: f32, h: f32, azimuth: u32, polar: u32) -> Vec<Vec3> {
    let mut pts = Vec::new();
    for i in 0..azimuth {
        let phi = i as f32 / azimuth as f32 * TAU;
        for j in 0..polar {
            let theta = j as f32 / (polar - 1) as f32 * PI;
            let p = spherical(r1, theta, phi);
            if p.y <= 0.0 { pts.push(p); }
        }
    }
    for i in 0..azimuth {
        let phi = i as f32 / azimuth as f32 * TAU;
        for j in 0..polar {
            let theta = j as f32 / (polar - 1) as f32 * PI;
            let p = spherical(r2, theta, phi);
            if p.y >= 0.0 { pts.push(p + Vec3::new(0.0, h, 0.0)); }
        }
    }
    const BAND: u32 = 4;
    for i in 0..azimuth {
        let phi = i as f32 / azimuth as f32 * TAU;
        for j in 1..BAND {
            let t = j as f32 / BAND as f32;
            let rr = r1 + (r2 - r1) * t;
            pts.push(Vec3::new(rr * phi.cos(), t * h, rr * phi.sin()));
        }
    }
    pts.push(Vec3::new(0.0, -r1, 0.0));
    pts.push(Vec3::new(0.0, h + r2, 0.0));
    pts
}

pub fn octahedron_points(r: f32) -> Vec<Vec3> {
    vec![
        Vec3::new(r, 0.0, 0.0), Vec3::new(-r, 0.0, 0.0),
        Vec3::new(0.0, r, 0.0), Vec3::new(0.0, -r, 0.0),
        Vec3::new(0.0, 0.0, r), Vec3::new(0.0, 0.0, -r),
    ]
}

/// Polar angle `theta` measured from +Y, azimuth `phi` around Y.
#[inline]
pub(crate) fn spherical(r: f32, theta: f32, phi: f32) -> Vec3 {
    let (st, ct) = theta.sin_cos();
    let (sp, cp) = phi.sin_cos();
    Vec3::new(r * st * cp, r * ct, r * st * sp)
}

//! Shape tessellation for 2D primitives
//!
//! All shapes are emitted as triangle lists in screen pixels. Angles here
//! follow the screen convention (y down), matching a 2D canvas `arc()`.

use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, TAU};

use super::vertex::{Vertex, colors};
use crate::polar_to_cartesian;

#[inline]
fn tri(out: &mut Vec<Vertex>, a: Vec2, ca: [f32; 4], b: Vec2, cb: [f32; 4], c: Vec2, cc: [f32; 4]) {
    out.push(Vertex::new(a.x, a.y, ca));
    out.push(Vertex::new(b.x, b.y, cb));
    out.push(Vertex::new(c.x, c.y, cc));
}

/// Axis-aligned rectangle filled with a vertical gradient (one band per stop pair)
pub fn vertical_gradient_rect(min: Vec2, max: Vec2, stops: &[(f32, [f32; 4])]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(stops.len().saturating_sub(1) * 6);
    let height = max.y - min.y;

    for pair in stops.windows(2) {
        let (t0, c0) = pair[0];
        let (t1, c1) = pair[1];
        let y0 = min.y + height * t0;
        let y1 = min.y + height * t1;

        let tl = Vec2::new(min.x, y0);
        let tr = Vec2::new(max.x, y0);
        let bl = Vec2::new(min.x, y1);
        let br = Vec2::new(max.x, y1);

        tri(&mut vertices, tl, c0, tr, c0, bl, c1);
        tri(&mut vertices, bl, c1, tr, c0, br, c1);
    }

    vertices
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    ellipse(center, radius, radius, 0.0, color, segments)
}

/// Filled ellipse with radii `rx`, `ry` rotated by `rotation`
pub fn ellipse(
    center: Vec2,
    rx: f32,
    ry: f32,
    rotation: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity((segments * 3) as usize);
    let (sin_r, cos_r) = rotation.sin_cos();
    let point = |theta: f32| {
        let local = Vec2::new(rx * theta.cos(), ry * theta.sin());
        center + Vec2::new(local.x * cos_r - local.y * sin_r, local.x * sin_r + local.y * cos_r)
    };

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;
        tri(&mut vertices, center, color, point(theta1), color, point(theta2), color);
    }

    vertices
}

/// Thick arc band between `inner_radius` and `outer_radius`, from `theta_start` to `theta_end`
pub fn arc_band(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    theta_start: f32,
    theta_end: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let segments = segments.max(1);
    let span = theta_end - theta_start;
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = theta_start + span * (i as f32 / segments as f32);
        let theta2 = theta_start + span * ((i + 1) as f32 / segments as f32);

        let inner1 = center + polar_to_cartesian(inner_radius, theta1);
        let outer1 = center + polar_to_cartesian(outer_radius, theta1);
        let inner2 = center + polar_to_cartesian(inner_radius, theta2);
        let outer2 = center + polar_to_cartesian(outer_radius, theta2);

        // Two triangles per segment
        tri(&mut vertices, inner1, color, outer1, color, inner2, color);
        tri(&mut vertices, inner2, color, outer1, color, outer2, color);
    }

    vertices
}

/// Stroked circle outline of the given line width
pub fn ring(
    center: Vec2,
    radius: f32,
    line_width: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let half = line_width / 2.0;
    arc_band(center, (radius - half).max(0.0), radius + half, 0.0, TAU, color, segments)
}

/// Four-pointed star: long points on the axes, pinched diagonals
pub fn four_pointed_star(center: Vec2, size: f32, color: [f32; 4]) -> Vec<Vertex> {
    let inner = size * 0.2;
    let outline: Vec<Vec2> = (0..4)
        .flat_map(|i| {
            let outer_angle = i as f32 * FRAC_PI_2;
            let inner_angle = outer_angle + FRAC_PI_4;
            [
                center + polar_to_cartesian(size, outer_angle),
                center + polar_to_cartesian(inner, inner_angle),
            ]
        })
        .collect();

    let mut vertices = Vec::with_capacity(outline.len() * 3);
    for (i, &a) in outline.iter().enumerate() {
        let b = outline[(i + 1) % outline.len()];
        tri(&mut vertices, center, color, a, color, b, color);
    }
    vertices
}

/// Round-capped, round-joined polyline
pub fn polyline(points: &[Vec2], width: f32, color: [f32; 4], join_segments: u32) -> Vec<Vertex> {
    if points.len() < 2 {
        return Vec::new();
    }

    let half = width / 2.0;
    let mut vertices = Vec::with_capacity(points.len() * (6 + join_segments as usize * 3));

    for pair in points.windows(2) {
        let (p1, p2) = (pair[0], pair[1]);
        let dir = (p2 - p1).normalize_or_zero();
        let perp = Vec2::new(-dir.y, dir.x) * half;

        tri(&mut vertices, p1 + perp, color, p1 - perp, color, p2 + perp, color);
        tri(&mut vertices, p2 + perp, color, p1 - perp, color, p2 - perp, color);
    }

    for &p in points {
        vertices.extend(circle(p, half, color, join_segments));
    }

    vertices
}

/// Canvas-style two-circle radial gradient
#[derive(Debug, Clone)]
pub struct RadialGradient {
    pub inner_center: Vec2,
    pub inner_radius: f32,
    pub outer_center: Vec2,
    pub outer_radius: f32,
    pub stops: Vec<(f32, [f32; 4])>,
}

impl RadialGradient {
    /// Gradient parameter at `p`: the largest `t` whose interpolated circle
    /// passes through `p`, clamped to [0, 1]
    pub fn t_at(&self, p: Vec2) -> f32 {
        let cd = self.outer_center - self.inner_center;
        let dr = self.outer_radius - self.inner_radius;
        let pd = p - self.inner_center;

        let a = cd.dot(cd) - dr * dr;
        let b = -2.0 * (pd.dot(cd) + self.inner_radius * dr);
        let c = pd.dot(pd) - self.inner_radius * self.inner_radius;
        let radius_ok = |t: f32| self.inner_radius + t * dr >= 0.0;

        let t = if a.abs() < f32::EPSILON {
            if b.abs() < f32::EPSILON { None } else { Some(-c / b) }
        } else {
            let disc = b * b - 4.0 * a * c;
            if disc < 0.0 {
                None
            } else {
                let sq = disc.sqrt();
                let r1 = (-b + sq) / (2.0 * a);
                let r2 = (-b - sq) / (2.0 * a);
                let (hi, lo) = if r1 > r2 { (r1, r2) } else { (r2, r1) };
                [hi, lo].into_iter().find(|&t| radius_ok(t))
            }
        };

        t.filter(|t| radius_ok(*t)).unwrap_or(1.0).clamp(0.0, 1.0)
    }

    pub fn color_at(&self, p: Vec2) -> [f32; 4] {
        colors::sample(&self.stops, self.t_at(p))
    }
}

/// Filled disc shaded per vertex by a radial gradient
pub fn shaded_disc(
    center: Vec2,
    radius: f32,
    gradient: &RadialGradient,
    rings: u32,
    segments: u32,
) -> Vec<Vertex> {
    let rings = rings.max(1);
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity((rings * segments * 6) as usize);

    let point = |ring: u32, seg: u32| {
        let r = radius * ring as f32 / rings as f32;
        let theta = TAU * seg as f32 / segments as f32;
        let p = center + polar_to_cartesian(r, theta);
        (p, gradient.color_at(p))
    };

    for ring in 0..rings {
        for seg in 0..segments {
            let (a, ca) = point(ring, seg);
            let (b, cb) = point(ring + 1, seg);
            let (c, cc) = point(ring, seg + 1);
            let (d, cd) = point(ring + 1, seg + 1);
            if ring > 0 {
                tri(&mut vertices, a, ca, b, cb, c, cc);
            }
            tri(&mut vertices, c, cc, b, cb, d, cd);
        }
    }

    vertices
}

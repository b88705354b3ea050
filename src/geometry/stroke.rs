//! Polyline stroke expansion: quads, caps, joins and dashing.

use crate::document::proto::{LineCap, LineJoin};
use crate::foundation::core::{Point, Vec2};

/// Segments per half-disc in a round end cap.
const ROUND_CAP_SEGMENTS: usize = 20;
/// Segments in a round corner join fan.
const ROUND_JOIN_SEGMENTS: usize = 8;
/// Squared distance under which two segment endpoints count as meeting.
const JOIN_PROXIMITY_SQ: f64 = 1e-3;
/// Segments shorter than this are dropped.
const MIN_SEGMENT_LEN: f64 = 1e-9;

/// Dash pattern as carried on the wire: dash length, gap length and a phase
/// offset applied to the first polyline segment only.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DashPattern {
    /// Length of each dash. Dashing is active only when positive.
    pub length: f64,
    /// Gap between dashes.
    pub gap: f64,
    /// Phase shift of the first segment's dash cycle.
    pub offset: f64,
}

impl DashPattern {
    /// True when the pattern produces dashes rather than a solid line.
    pub fn is_active(self) -> bool {
        self.length > 0.0
    }
}

/// Stroke parameters resolved from a shape's style record.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Full stroke width; no geometry is produced when non-positive.
    pub width: f64,
    /// End cap applied to open ends and dash sub-segments.
    pub cap: LineCap,
    /// Corner treatment between adjacent solid segments.
    pub join: LineJoin,
    /// Miter limit from the wire. Corners are beveled regardless, so the
    /// limit never truncates anything, but it is carried for hosts that
    /// re-stroke with their own renderer.
    pub miter_limit: f64,
    /// Dash pattern; inactive when the dash length is non-positive.
    pub dash: DashPattern,
}

/// Expand a polyline into stroke triangles.
///
/// Each segment becomes a quad of width `style.width`. Dashing splits
/// segments into capped sub-segments and restarts its cycle on every
/// polyline segment, with `dash.offset` shifting only the first one. Corner
/// joins are added only for solid strokes: round joins fan between the outer
/// edges, miter and bevel both produce a single bevel triangle. A closed
/// solid ring gets a join at the wrap point and no caps; an open solid
/// polyline gets caps at its two true ends.
pub fn build_stroke(
    pts: &[Point],
    closed: bool,
    style: &StrokeStyle,
) -> (Vec<[f32; 2]>, Vec<u32>) {
    let mut mesh = StrokeMesh::default();
    if style.width <= 0.0 || pts.len() < 2 {
        return mesh.into_buffers();
    }
    let half = style.width * 0.5;
    let dashed = style.dash.is_active();

    for i in 0..pts.len() - 1 {
        let p0 = pts[i];
        let p1 = pts[i + 1];
        let delta = p1 - p0;
        let len = delta.hypot();
        if len < MIN_SEGMENT_LEN {
            continue;
        }
        let dir = delta / len;

        if dashed {
            let step = (style.dash.length + style.dash.gap.max(0.0)).max(MIN_SEGMENT_LEN);
            let mut at = if i == 0 { style.dash.offset.max(0.0) } else { 0.0 };
            while at < len {
                let end = (at + style.dash.length).min(len);
                if end > at {
                    let a = p0 + dir * at;
                    let b = p0 + dir * end;
                    mesh.push_quad(a, b, dir, half);
                    mesh.push_cap(style.cap, a, -dir, half);
                    mesh.push_cap(style.cap, b, dir, half);
                }
                at += step;
            }
        } else {
            mesh.push_quad(p0, p1, dir, half);
        }
    }

    if !dashed && style.dash.gap <= 0.0 {
        push_joins(&mut mesh, pts, closed, style, half);
    }

    if !dashed && !closed {
        if let Some((first, dir)) = first_direction(pts) {
            mesh.push_cap(style.cap, first, -dir, half);
        }
        if let Some((last, dir)) = last_direction(pts) {
            mesh.push_cap(style.cap, last, dir, half);
        }
    }

    mesh.into_buffers()
}

fn push_joins(mesh: &mut StrokeMesh, pts: &[Point], closed: bool, style: &StrokeStyle, half: f64) {
    let n = pts.len();
    if n < 3 {
        return;
    }
    // Interior corners, plus the wrap corner when the ring is closed. The
    // wrap pairs the last segment with the first; its shared point is the
    // ring start.
    let corner_count = if closed { n - 1 } else { n - 2 };
    for c in 0..corner_count {
        let (a, p, b) = if closed && c == n - 2 {
            (pts[n - 2], pts[n - 1], pts[1])
        } else {
            (pts[c], pts[c + 1], pts[c + 2])
        };
        if closed && c == n - 2 && (pts[n - 1] - pts[0]).hypot2() > JOIN_PROXIMITY_SQ {
            continue;
        }
        let d0 = p - a;
        let d1 = b - p;
        let l0 = d0.hypot();
        let l1 = d1.hypot();
        if l0 < MIN_SEGMENT_LEN || l1 < MIN_SEGMENT_LEN {
            continue;
        }
        let d0 = d0 / l0;
        let d1 = d1 / l1;
        let cross = d0.cross(d1);
        if cross.abs() < MIN_SEGMENT_LEN {
            continue;
        }
        // The outer wedge lies on the right of a left turn and on the left
        // of a right turn.
        let side = if cross > 0.0 { -1.0 } else { 1.0 };
        let outer0 = perp(d0) * (half * side);
        let outer1 = perp(d1) * (half * side);
        match style.join {
            LineJoin::Round => mesh.push_fan(p, outer0, outer1, ROUND_JOIN_SEGMENTS),
            LineJoin::Miter | LineJoin::Bevel => {
                mesh.push_triangle(p, p + outer0, p + outer1);
            }
        }
    }
}

fn first_direction(pts: &[Point]) -> Option<(Point, Vec2)> {
    for w in pts.windows(2) {
        let d = w[1] - w[0];
        let len = d.hypot();
        if len >= MIN_SEGMENT_LEN {
            return Some((w[0], d / len));
        }
    }
    None
}

fn last_direction(pts: &[Point]) -> Option<(Point, Vec2)> {
    for w in pts.windows(2).rev() {
        let d = w[1] - w[0];
        let len = d.hypot();
        if len >= MIN_SEGMENT_LEN {
            return Some((w[1], d / len));
        }
    }
    None
}

fn perp(v: Vec2) -> Vec2 {
    Vec2::new(-v.y, v.x)
}

#[derive(Default)]
struct StrokeMesh {
    positions: Vec<[f32; 2]>,
    indices: Vec<u32>,
}

impl StrokeMesh {
    fn into_buffers(self) -> (Vec<[f32; 2]>, Vec<u32>) {
        (self.positions, self.indices)
    }

    fn vertex(&mut self, p: Point) -> u32 {
        let idx = self.positions.len() as u32;
        self.positions.push([p.x as f32, p.y as f32]);
        idx
    }

    fn push_triangle(&mut self, a: Point, b: Point, c: Point) {
        let ia = self.vertex(a);
        let ib = self.vertex(b);
        let ic = self.vertex(c);
        self.indices.extend_from_slice(&[ia, ib, ic]);
    }

    /// Quad spanning the segment `a -> b`, `2 * half` wide across `dir`.
    fn push_quad(&mut self, a: Point, b: Point, dir: Vec2, half: f64) {
        let n = perp(dir) * half;
        let i0 = self.vertex(a + n);
        let i1 = self.vertex(a - n);
        let i2 = self.vertex(b + n);
        let i3 = self.vertex(b - n);
        self.indices.extend_from_slice(&[i0, i2, i1, i1, i2, i3]);
    }

    /// End cap at `end`, with `outward` the unit direction pointing away
    /// from the segment body.
    fn push_cap(&mut self, cap: LineCap, end: Point, outward: Vec2, half: f64) {
        match cap {
            LineCap::Butt => {}
            LineCap::Round => self.push_half_disc(end, outward, half),
            LineCap::Square => {
                let n = perp(outward) * half;
                let out = outward * half;
                let i0 = self.vertex(end + n);
                let i1 = self.vertex(end - n);
                let i2 = self.vertex(end + n + out);
                let i3 = self.vertex(end - n + out);
                self.indices.extend_from_slice(&[i0, i2, i1, i1, i2, i3]);
            }
        }
    }

    /// Half disc of radius `half` centered on `center`, bulging toward
    /// `outward`. Spans from one stroke edge to the other.
    fn push_half_disc(&mut self, center: Point, outward: Vec2, half: f64) {
        let center_idx = self.vertex(center);
        // Start at the edge offset whose positive rotation passes through
        // the outward direction.
        let from = perp(outward) * -half;
        let mut prev = self.vertex(center + from);
        for k in 1..=ROUND_CAP_SEGMENTS {
            let angle = std::f64::consts::PI * k as f64 / ROUND_CAP_SEGMENTS as f64;
            let (sin, cos) = angle.sin_cos();
            let rotated = Vec2::new(from.x * cos - from.y * sin, from.x * sin + from.y * cos);
            let next = self.vertex(center + rotated);
            self.indices.extend_from_slice(&[center_idx, prev, next]);
            prev = next;
        }
    }

    /// Triangle fan centered on `center` sweeping from offset vector `from`
    /// to offset vector `to` along the shorter arc.
    fn push_fan(&mut self, center: Point, from: Vec2, to: Vec2, segments: usize) {
        let sweep = from.cross(to).atan2(from.dot(to));
        if sweep == 0.0 {
            return;
        }
        let center_idx = self.vertex(center);
        let mut prev = self.vertex(center + from);
        for k in 1..=segments {
            let angle = sweep * k as f64 / segments as f64;
            let (sin, cos) = angle.sin_cos();
            let rotated = Vec2::new(from.x * cos - from.y * sin, from.x * sin + from.y * cos);
            let next = self.vertex(center + rotated);
            self.indices.extend_from_slice(&[center_idx, prev, next]);
            prev = next;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/stroke.rs"]
mod tests;

//! SVG-style path string flattening.

use kurbo::{CubicBez, ParamCurve, QuadBez};

use crate::foundation::core::{Affine, Point, Vec2};

/// Flattening tolerance: subdivision stops once the chord-sum excess of a
/// curve half falls below this, and chords shorter than it are not split.
const FLATTEN_TOLERANCE: f64 = 0.01;
/// Hard recursion limit for curve subdivision.
const MAX_DEPTH: u32 = 16;
/// Arc sampling density: segments per pi radians of sweep.
const ARC_SEGMENTS_PER_PI: f64 = 150.0;
/// Upper bound on segments for a single arc command.
const ARC_MAX_SEGMENTS: usize = 300;

/// Flatten a path-language string into an ordered polyline.
///
/// Pure and restartable: two calls with the same input yield identical point
/// sequences.
pub fn parse_path(d: &str) -> Vec<Point> {
    PathParser::new().parse(d)
}

/// Interpreter for the SVG path command subset `M L H V C S Q T A Z` in
/// absolute and relative forms.
///
/// The interpreter state (current point, contour start, last control point,
/// output buffer) is a value threaded through command processing and reset at
/// the start of every [`parse`](Self::parse) call. Curves are flattened by
/// recursive midpoint subdivision, arcs by endpoint-to-center conversion and
/// angular sampling. Malformed or unknown commands are skipped without
/// aborting the remainder of the string.
#[derive(Clone, Debug)]
pub struct PathParser {
    transform: Affine,
    current: Point,
    start: Point,
    last_control: Point,
    points: Vec<Point>,
}

impl Default for PathParser {
    fn default() -> Self {
        Self::new()
    }
}

impl PathParser {
    /// Interpreter emitting untransformed points.
    pub fn new() -> Self {
        Self::with_transform(Affine::IDENTITY)
    }

    /// Interpreter applying `transform` to every emitted point.
    pub fn with_transform(transform: Affine) -> Self {
        Self {
            transform,
            current: Point::ZERO,
            start: Point::ZERO,
            last_control: Point::ZERO,
            points: Vec::new(),
        }
    }

    /// Interpret `d` and return the flattened polyline.
    pub fn parse(&mut self, d: &str) -> Vec<Point> {
        self.current = Point::ZERO;
        self.start = Point::ZERO;
        self.last_control = Point::ZERO;
        self.points.clear();

        let bytes = d.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            let c = bytes[i] as char;
            if !is_command(c) {
                i += 1;
                continue;
            }
            let span_start = i + 1;
            let mut j = span_start;
            while j < bytes.len() && !is_command(bytes[j] as char) {
                j += 1;
            }
            let numbers = scan_numbers(&bytes[span_start..j]);
            self.dispatch(c, &numbers);
            i = j;
        }

        std::mem::take(&mut self.points)
    }

    fn dispatch(&mut self, command: char, numbers: &[f64]) {
        let relative = command.is_ascii_lowercase();
        match command.to_ascii_uppercase() {
            'M' => self.move_to(numbers, relative),
            'L' => self.line_to(numbers, relative),
            'H' => self.axis_line_to(numbers, relative, true),
            'V' => self.axis_line_to(numbers, relative, false),
            'C' => self.cubic_to(numbers, relative),
            'S' => self.smooth_cubic_to(numbers, relative),
            'Q' => self.quad_to(numbers, relative),
            'T' => self.smooth_quad_to(numbers, relative),
            'A' => self.arc_to(numbers, relative),
            'Z' => self.close_path(),
            _ => {}
        }
    }

    fn emit(&mut self, p: Point) {
        self.points.push(self.transform * p);
    }

    fn resolve(&self, x: f64, y: f64, relative: bool) -> Point {
        if relative {
            Point::new(self.current.x + x, self.current.y + y)
        } else {
            Point::new(x, y)
        }
    }

    fn move_to(&mut self, n: &[f64], relative: bool) {
        if n.len() < 2 {
            return;
        }
        self.current = self.resolve(n[0], n[1], relative);
        self.start = self.current;
        self.emit(self.current);
    }

    fn line_to(&mut self, n: &[f64], relative: bool) {
        for pair in n.chunks_exact(2) {
            self.current = self.resolve(pair[0], pair[1], relative);
            self.emit(self.current);
        }
    }

    fn axis_line_to(&mut self, n: &[f64], relative: bool, horizontal: bool) {
        for &v in n {
            self.current = match (horizontal, relative) {
                (true, true) => Point::new(self.current.x + v, self.current.y),
                (true, false) => Point::new(v, self.current.y),
                (false, true) => Point::new(self.current.x, self.current.y + v),
                (false, false) => Point::new(self.current.x, v),
            };
            self.emit(self.current);
        }
    }

    fn close_path(&mut self) {
        if !self.points.is_empty() && self.current != self.start {
            self.emit(self.start);
            self.current = self.start;
        }
    }

    fn cubic_to(&mut self, n: &[f64], relative: bool) {
        for g in n.chunks_exact(6) {
            let p1 = self.resolve(g[0], g[1], relative);
            let p2 = self.resolve(g[2], g[3], relative);
            let p3 = self.resolve(g[4], g[5], relative);
            self.flatten_cubic(CubicBez::new(self.current, p1, p2, p3));
            self.current = p3;
            self.last_control = p2;
        }
    }

    fn smooth_cubic_to(&mut self, n: &[f64], relative: bool) {
        for g in n.chunks_exact(4) {
            let p1 = reflect(self.last_control, self.current);
            let p2 = self.resolve(g[0], g[1], relative);
            let p3 = self.resolve(g[2], g[3], relative);
            self.flatten_cubic(CubicBez::new(self.current, p1, p2, p3));
            self.current = p3;
            self.last_control = p2;
        }
    }

    fn quad_to(&mut self, n: &[f64], relative: bool) {
        for g in n.chunks_exact(4) {
            let p1 = self.resolve(g[0], g[1], relative);
            let p2 = self.resolve(g[2], g[3], relative);
            self.flatten_quad(QuadBez::new(self.current, p1, p2));
            self.current = p2;
            self.last_control = p1;
        }
    }

    fn smooth_quad_to(&mut self, n: &[f64], relative: bool) {
        for g in n.chunks_exact(2) {
            let p1 = reflect(self.last_control, self.current);
            let p2 = self.resolve(g[0], g[1], relative);
            self.flatten_quad(QuadBez::new(self.current, p1, p2));
            self.current = p2;
            self.last_control = p1;
        }
    }

    fn flatten_cubic(&mut self, curve: CubicBez) {
        self.subdivide(&|t| curve.eval(t), 0.0, 1.0, 0, curve.p0, curve.p3);
    }

    fn flatten_quad(&mut self, curve: QuadBez) {
        self.subdivide(&|t| curve.eval(t), 0.0, 1.0, 0, curve.p0, curve.p2);
    }

    /// Adaptive binary subdivision over parameter range `[t0, t1]` whose
    /// endpoints evaluate to `v0`/`v1`. Emits `v1` once the half is flat
    /// enough, producing dense points on tight curvature and sparse points on
    /// near-straight spans.
    fn subdivide(
        &mut self,
        eval: &dyn Fn(f64) -> Point,
        t0: f64,
        t1: f64,
        depth: u32,
        v0: Point,
        v1: Point,
    ) {
        let t_mid = (t0 + t1) * 0.5;
        let v_mid = eval(t_mid);

        let chord = v0.distance(v1);
        let excess = v0.distance(v_mid) + v_mid.distance(v1) - chord;
        if depth >= MAX_DEPTH || excess < FLATTEN_TOLERANCE || chord < FLATTEN_TOLERANCE {
            self.emit(v1);
        } else {
            self.subdivide(eval, t0, t_mid, depth + 1, v0, v_mid);
            self.subdivide(eval, t_mid, t1, depth + 1, v_mid, v1);
        }
    }

    fn arc_to(&mut self, n: &[f64], relative: bool) {
        for g in n.chunks_exact(7) {
            let mut rx = g[0];
            let mut ry = g[1];
            let x_rotation = g[2].to_radians();
            let large_arc = g[3] != 0.0;
            let sweep = g[4] != 0.0;
            let end = self.resolve(g[5], g[6], relative);

            // Coincident endpoints draw nothing.
            if self.current == end {
                continue;
            }

            // Degenerate radii collapse to a straight segment.
            if rx.abs() < 0.001 || ry.abs() < 0.001 {
                self.emit(end);
                self.current = end;
                continue;
            }
            rx = rx.abs();
            ry = ry.abs();

            let (cos_rot, sin_rot) = (x_rotation.cos(), x_rotation.sin());

            // Endpoint-to-center parameterization (SVG F.6.5).
            let dx = (self.current.x - end.x) * 0.5;
            let dy = (self.current.y - end.y) * 0.5;
            let x1 = cos_rot * dx + sin_rot * dy;
            let y1 = -sin_rot * dx + cos_rot * dy;

            // Scale radii up until the ellipse equation is satisfiable.
            let radii_check = (x1 * x1) / (rx * rx) + (y1 * y1) / (ry * ry);
            if radii_check > 1.0 {
                rx *= radii_check.sqrt();
                ry *= radii_check.sqrt();
            }

            let sign = if large_arc == sweep { -1.0 } else { 1.0 };
            let num = (rx * rx * ry * ry) - (rx * rx * y1 * y1) - (ry * ry * x1 * x1);
            let den = (rx * rx * y1 * y1) + (ry * ry * x1 * x1);
            let coef = sign * (num / den).max(0.0).sqrt();
            let cx1 = coef * ((rx * y1) / ry);
            let cy1 = coef * -((ry * x1) / rx);

            let cx = cos_rot * cx1 - sin_rot * cy1 + (self.current.x + end.x) * 0.5;
            let cy = sin_rot * cx1 + cos_rot * cy1 + (self.current.y + end.y) * 0.5;

            let start_angle = vector_angle(1.0, 0.0, (x1 - cx1) / rx, (y1 - cy1) / ry);
            let mut delta = vector_angle(
                (x1 - cx1) / rx,
                (y1 - cy1) / ry,
                (-x1 - cx1) / rx,
                (-y1 - cy1) / ry,
            ) % std::f64::consts::TAU;

            if !sweep && delta > 0.0 {
                delta -= std::f64::consts::TAU;
            } else if sweep && delta < 0.0 {
                delta += std::f64::consts::TAU;
            }

            let segments = ((delta.abs() * ARC_SEGMENTS_PER_PI / std::f64::consts::PI).ceil()
                as usize)
                .clamp(1, ARC_MAX_SEGMENTS);
            let dt = delta / segments as f64;
            for k in 0..=segments {
                let t = start_angle + k as f64 * dt;
                let (sin_t, cos_t) = t.sin_cos();
                self.emit(Point::new(
                    cos_rot * rx * cos_t - sin_rot * ry * sin_t + cx,
                    sin_rot * rx * cos_t + cos_rot * ry * sin_t + cy,
                ));
            }

            self.current = end;
        }
    }
}

fn is_command(c: char) -> bool {
    matches!(
        c.to_ascii_uppercase(),
        'M' | 'L' | 'H' | 'V' | 'C' | 'S' | 'Q' | 'T' | 'A' | 'Z'
    )
}

/// Reflect `control` about `pivot` for smooth curve continuation.
fn reflect(control: Point, pivot: Point) -> Point {
    Point::new(2.0 * pivot.x - control.x, 2.0 * pivot.y - control.y)
}

/// Signed angle from vector `(ux, uy)` to `(vx, vy)`.
fn vector_angle(ux: f64, uy: f64, vx: f64, vy: f64) -> f64 {
    let dot = ux * vx + uy * vy;
    let len = Vec2::new(ux, uy).hypot() * Vec2::new(vx, vy).hypot();
    let angle = (dot / len).clamp(-1.0, 1.0).acos();
    if ux * vy - uy * vx < 0.0 { -angle } else { angle }
}

/// Scan a parameter span for floating-point numbers, tolerating comma and
/// whitespace separators, bare signs, leading dots and exponents.
fn scan_numbers(b: &[u8]) -> Vec<f64> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < b.len() {
        let c = b[i];
        if !(c == b'+' || c == b'-' || c == b'.' || c.is_ascii_digit()) {
            i += 1;
            continue;
        }
        let start = i;
        if c == b'+' || c == b'-' {
            i += 1;
        }
        let mut seen_dot = false;
        let mut seen_digit = false;
        while i < b.len() {
            match b[i] {
                d if d.is_ascii_digit() => {
                    seen_digit = true;
                    i += 1;
                }
                b'.' if !seen_dot => {
                    seen_dot = true;
                    i += 1;
                }
                _ => break,
            }
        }
        if seen_digit && i < b.len() && (b[i] == b'e' || b[i] == b'E') {
            let mut j = i + 1;
            if j < b.len() && (b[j] == b'+' || b[j] == b'-') {
                j += 1;
            }
            if j < b.len() && b[j].is_ascii_digit() {
                i = j;
                while i < b.len() && b[i].is_ascii_digit() {
                    i += 1;
                }
            }
        }
        if seen_digit {
            // Number spans are pure ASCII by construction.
            if let Some(v) = std::str::from_utf8(&b[start..i])
                .ok()
                .and_then(|t| t.parse::<f64>().ok())
            {
                out.push(v);
            }
        }
        if i == start {
            i += 1;
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/path.rs"]
mod tests;

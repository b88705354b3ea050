//! Frame geometry resolution: shape inheritance, outlines and mesh caching.

use rayon::prelude::*;

use crate::document::movie::{MovieDocument, affine_of};
use crate::document::proto::{FrameEntity, ShapeArgs, ShapeEntity, ShapeType};
use crate::foundation::core::{Affine, Point, Rgba, map_to_view};
use crate::geometry::mesh::{Mesh, ShapeMesh};
use crate::geometry::path::PathParser;
use crate::geometry::stroke::{DashPattern, StrokeStyle, build_stroke};
use crate::geometry::tessellate::fill_triangles;

/// Segments per quarter arc of a rounded rectangle corner.
const RECT_CORNER_SEGMENTS: usize = 12;
/// Segments approximating an ellipse outline.
const ELLIPSE_SEGMENTS: usize = 36;
/// Squared endpoint distance under which an outline counts as closed.
const CLOSED_EPSILON_SQ: f64 = 1e-6;
/// Squared gap above which a fill contour gets an explicit closing point.
const RING_GAP_SQ: f64 = 1e-4;
/// Points closer than this are merged during simplification.
const MERGE_DISTANCE: f64 = 0.01;

/// Pre-resolved triangle meshes for every `(sprite, frame)` pair.
///
/// Built once per document, immutable afterwards. Shape inheritance (`Keep`
/// sentinels and shapeless frames) is resolved at build time, so lookups
/// during playback are plain slice indexing. Sprites are resolved in
/// parallel.
#[derive(Clone, Debug)]
pub struct FrameGeometryCache {
    sprites: Vec<Vec<Vec<ShapeMesh>>>,
}

impl FrameGeometryCache {
    /// Resolve and tessellate every frame of every sprite.
    #[tracing::instrument(skip_all)]
    pub fn build(doc: &MovieDocument) -> Self {
        let (view_w, view_h) = doc.view_size();
        let sprites: Vec<Vec<Vec<ShapeMesh>>> = doc
            .sprites()
            .par_iter()
            .map(|sprite| {
                (0..sprite.frames.len())
                    .map(|fi| resolve_frame(&sprite.frames, fi, view_w, view_h))
                    .collect()
            })
            .collect();

        let shape_count: usize = sprites
            .iter()
            .flat_map(|frames| frames.iter())
            .map(Vec::len)
            .sum();
        tracing::info!(
            sprites = sprites.len(),
            shapes = shape_count,
            "frame geometry cache built"
        );
        Self { sprites }
    }

    /// Number of sprite tracks in the cache.
    pub fn sprite_count(&self) -> usize {
        self.sprites.len()
    }

    /// Number of cached frames for one sprite, zero when out of range.
    pub fn frame_count(&self, sprite: usize) -> usize {
        self.sprites.get(sprite).map_or(0, Vec::len)
    }

    /// Resolved shape meshes for one frame of one sprite. Out-of-range
    /// indices yield an empty slice.
    pub fn shapes(&self, sprite: usize, frame: usize) -> &[ShapeMesh] {
        self.sprites
            .get(sprite)
            .and_then(|frames| frames.get(frame))
            .map_or(&[], Vec::as_slice)
    }
}

/// Resolve one frame's shape list, following frame-level and shape-level
/// inheritance, and tessellate each shape under the current frame's
/// transform and layout.
fn resolve_frame(
    frames: &[FrameEntity],
    fi: usize,
    view_w: f64,
    view_h: f64,
) -> Vec<ShapeMesh> {
    let frame = &frames[fi];

    // A frame without drawable shape records inherits its whole shape list
    // from the nearest drawable frame, looking backward first. The inherited
    // list is still placed under the current frame's transform and layout.
    let (src_fi, inclusive) = if inherits_whole_frame(frame) {
        match find_drawable_frame(frames, fi) {
            Some(src) => (src, true),
            None => return Vec::new(),
        }
    } else {
        (fi, false)
    };

    let layout_offset = frame
        .layout
        .map(|l| (f64::from(l.x), f64::from(l.y)))
        .unwrap_or((0.0, 0.0));
    let base = Affine::translate(layout_offset) * affine_of(frame.transform.as_ref());
    let alpha = frame.alpha.clamp(0.0, 1.0);

    frames[src_fi]
        .shapes
        .iter()
        .enumerate()
        .map(|(si, shape)| {
            let concrete = if shape.kind() == ShapeType::Keep {
                let from = if inclusive {
                    Some(src_fi)
                } else {
                    src_fi.checked_sub(1)
                };
                from.and_then(|f| find_concrete_shape(frames, f, si))
            } else {
                Some(shape)
            };
            match concrete {
                Some(shape) => build_shape_mesh(shape, base, alpha, view_w, view_h),
                None => ShapeMesh::default(),
            }
        })
        .collect()
}

/// True when the frame carries no shape data of its own: an empty list, or a
/// single `Keep` sentinel standing in for the whole list.
fn inherits_whole_frame(frame: &FrameEntity) -> bool {
    match frame.shapes.as_slice() {
        [] => true,
        [only] => only.kind() == ShapeType::Keep,
        _ => false,
    }
}

/// Nearest drawable frame: backward from `fi`, then forward.
fn find_drawable_frame(frames: &[FrameEntity], fi: usize) -> Option<usize> {
    (0..fi)
        .rev()
        .chain(fi + 1..frames.len())
        .find(|&fj| !inherits_whole_frame(&frames[fj]))
}

/// Nearest non-`Keep` shape at slot `si`, scanning backward from `from`
/// inclusive. Frames whose shape list is shorter than `si` are skipped.
fn find_concrete_shape(frames: &[FrameEntity], from: usize, si: usize) -> Option<&ShapeEntity> {
    (0..=from)
        .rev()
        .filter_map(|fj| frames[fj].shapes.get(si))
        .find(|shape| shape.kind() != ShapeType::Keep)
}

fn build_shape_mesh(
    shape: &ShapeEntity,
    base: Affine,
    alpha: f32,
    view_w: f64,
    view_h: f64,
) -> ShapeMesh {
    let Some(style) = shape.styles.as_ref() else {
        return ShapeMesh::default();
    };
    let affine = base * affine_of(shape.transform.as_ref());
    let Some((raw, closed)) = outline(shape, affine) else {
        return ShapeMesh::default();
    };

    let points: Vec<Point> = raw
        .into_iter()
        .map(|p| map_to_view(p, view_w, view_h))
        .collect();
    let points = simplify(points);
    if points.len() < 2 {
        return ShapeMesh::default();
    }

    let mut out = ShapeMesh::default();

    if let Some(fill) = style.fill {
        let ring = close_ring(points.clone());
        let (positions, indices) = fill_triangles(&ring);
        if !indices.is_empty() {
            out.fill = Some(Mesh {
                positions,
                indices,
                color: scaled_color(fill.r, fill.g, fill.b, fill.a, alpha),
            });
        }
    }

    if let Some(stroke) = style.stroke {
        let width = f64::from(style.stroke_width);
        if width > 0.0 {
            let stroke_style = StrokeStyle {
                width,
                cap: style.cap(),
                join: style.join(),
                miter_limit: f64::from(style.miter_limit),
                dash: DashPattern {
                    length: f64::from(style.line_dash_i),
                    gap: f64::from(style.line_dash_ii),
                    offset: f64::from(style.line_dash_iii),
                },
            };
            let (positions, indices) = build_stroke(&points, closed, &stroke_style);
            if !indices.is_empty() {
                out.stroke = Some(Mesh {
                    positions,
                    indices,
                    color: scaled_color(stroke.r, stroke.g, stroke.b, stroke.a, alpha),
                });
            }
        }
    }

    out
}

fn scaled_color(r: f32, g: f32, b: f32, a: f32, alpha: f32) -> Rgba {
    Rgba::new(r, g, b, a * alpha)
}

/// Flatten the shape outline under `affine`. Returns the point list and
/// whether the outline is a closed ring. `None` means the shape has no
/// drawable geometry.
fn outline(shape: &ShapeEntity, affine: Affine) -> Option<(Vec<Point>, bool)> {
    match shape.args.as_ref()? {
        ShapeArgs::Path(args) => {
            let points = PathParser::with_transform(affine).parse(&args.d);
            if points.len() < 2 {
                return None;
            }
            let closed = (points[points.len() - 1] - points[0]).hypot2() < CLOSED_EPSILON_SQ;
            Some((points, closed))
        }
        ShapeArgs::Rect(args) => {
            let w = f64::from(args.width);
            let h = f64::from(args.height);
            if w <= 0.0 || h <= 0.0 {
                return None;
            }
            let radius = f64::from(args.corner_radius)
                .max(0.0)
                .min(w.min(h) * 0.5);
            let points =
                rect_outline(f64::from(args.x), f64::from(args.y), w, h, radius, affine);
            Some((points, true))
        }
        ShapeArgs::Ellipse(args) => {
            let rx = f64::from(args.radius_x);
            let ry = f64::from(args.radius_y);
            if rx <= 0.0 || ry <= 0.0 {
                return None;
            }
            let (cx, cy) = (f64::from(args.x), f64::from(args.y));
            let points = (0..=ELLIPSE_SEGMENTS)
                .map(|k| {
                    let theta = std::f64::consts::TAU * k as f64 / ELLIPSE_SEGMENTS as f64;
                    affine * Point::new(cx + rx * theta.cos(), cy + ry * theta.sin())
                })
                .collect();
            Some((points, true))
        }
    }
}

/// Rectangle ring, clockwise in movie space, with optional rounded corners.
fn rect_outline(x: f64, y: f64, w: f64, h: f64, radius: f64, affine: Affine) -> Vec<Point> {
    let mut points = Vec::new();
    if radius < 1e-6 {
        points.push(affine * Point::new(x, y));
        points.push(affine * Point::new(x + w, y));
        points.push(affine * Point::new(x + w, y + h));
        points.push(affine * Point::new(x, y + h));
        points.push(affine * Point::new(x, y));
        return points;
    }

    // Quarter arcs in corner order top-right, bottom-right, bottom-left,
    // top-left; the straight edges fall out of consecutive arc endpoints.
    let corners = [
        (x + w - radius, y + radius, -std::f64::consts::FRAC_PI_2),
        (x + w - radius, y + h - radius, 0.0),
        (x + radius, y + h - radius, std::f64::consts::FRAC_PI_2),
        (x + radius, y + radius, std::f64::consts::PI),
    ];
    for (cx, cy, start) in corners {
        for k in 0..=RECT_CORNER_SEGMENTS {
            let theta =
                start + std::f64::consts::FRAC_PI_2 * k as f64 / RECT_CORNER_SEGMENTS as f64;
            points.push(affine * Point::new(cx + radius * theta.cos(), cy + radius * theta.sin()));
        }
    }
    if let Some(&first) = points.first() {
        points.push(first);
    }
    points
}

/// Append an explicit closing point when the ring endpoints are apart.
fn close_ring(mut points: Vec<Point>) -> Vec<Point> {
    if let (Some(&first), Some(&last)) = (points.first(), points.last()) {
        if (last - first).hypot2() > RING_GAP_SQ {
            points.push(first);
        }
    }
    points
}

/// Merge near-duplicate points and drop collinear interior points. The first
/// and last points always survive, so ring closure is preserved.
fn simplify(points: Vec<Point>) -> Vec<Point> {
    if points.len() < 3 {
        return points;
    }

    let mut deduped: Vec<Point> = Vec::with_capacity(points.len());
    let last_index = points.len() - 1;
    for (i, p) in points.into_iter().enumerate() {
        match deduped.last() {
            Some(&prev) if i != last_index && (p - prev).hypot() < MERGE_DISTANCE => {}
            _ => deduped.push(p),
        }
    }
    if deduped.len() < 3 {
        return deduped;
    }

    let mut out: Vec<Point> = Vec::with_capacity(deduped.len());
    out.push(deduped[0]);
    for i in 1..deduped.len() - 1 {
        let a = out[out.len() - 1];
        let b = deduped[i];
        let c = deduped[i + 1];
        let u = b - a;
        let v = c - b;
        let denom = u.hypot() * v.hypot();
        if denom > 1e-8 && u.cross(v).abs() / denom < 1e-4 {
            continue;
        }
        out.push(b);
    }
    out.push(deduped[deduped.len() - 1]);
    out
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/cache.rs"]
mod tests;

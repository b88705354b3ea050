//! Fill tessellation of closed contours.

use lyon::math::point;
use lyon::path::{FillRule, Path};
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, TessellationError, VertexBuffers,
};

use crate::foundation::core::Point as KPoint;

/// Triangulate a closed polyline into fill triangles.
///
/// The non-zero fill rule is tried first; if it errors or yields no
/// triangles, the even-odd rule is retried before giving up. Degenerate
/// input (fewer than three points, zero area, self-crossing contours the
/// tessellator cannot repair) yields empty buffers, never a panic or an
/// error.
pub fn fill_triangles(points: &[KPoint]) -> (Vec<[f32; 2]>, Vec<u32>) {
    if points.len() < 3 {
        return (Vec::new(), Vec::new());
    }

    let mut builder = Path::builder();
    builder.begin(point(points[0].x as f32, points[0].y as f32));
    for p in &points[1..] {
        builder.line_to(point(p.x as f32, p.y as f32));
    }
    builder.close();
    let path = builder.build();

    match run(&path, FillRule::NonZero) {
        Ok(buffers) if !buffers.indices.is_empty() => (buffers.vertices, buffers.indices),
        first => {
            if let Err(err) = &first {
                tracing::warn!(error = ?err, "non-zero tessellation failed, retrying even-odd");
            }
            match run(&path, FillRule::EvenOdd) {
                Ok(buffers) => (buffers.vertices, buffers.indices),
                Err(err) => {
                    tracing::warn!(error = ?err, "fill tessellation failed, emitting no geometry");
                    (Vec::new(), Vec::new())
                }
            }
        }
    }
}

fn run(path: &Path, rule: FillRule) -> Result<VertexBuffers<[f32; 2], u32>, TessellationError> {
    let mut buffers: VertexBuffers<[f32; 2], u32> = VertexBuffers::new();
    let mut tessellator = FillTessellator::new();
    tessellator.tessellate_path(
        path,
        &FillOptions::default().with_fill_rule(rule),
        &mut BuffersBuilder::new(&mut buffers, |v: FillVertex| v.position().to_array()),
    )?;
    Ok(buffers)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/tessellate.rs"]
mod tests;

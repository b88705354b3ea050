//! Triangle mesh output types.

use crate::foundation::core::Rgba;

/// Triangle mesh ready for a graphics sink: flat vertex positions, triangle
/// indices and one straight RGBA color.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct Mesh {
    /// Vertex positions in view space.
    pub positions: Vec<[f32; 2]>,
    /// Triangle index list, three entries per triangle.
    pub indices: Vec<u32>,
    /// Straight RGBA color applied to every vertex.
    pub color: Rgba,
}

impl Mesh {
    /// True when the mesh carries no triangles.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Resolved geometry for one shape slot of one frame.
///
/// Either half may be absent: a shape without a fill style has no fill mesh,
/// and an unresolvable `Keep` sentinel yields the empty default. Empty is
/// legal, never an error.
#[derive(Clone, Debug, Default, serde::Serialize)]
pub struct ShapeMesh {
    /// Fill triangles, when a fill style is present and tessellation
    /// produced output.
    pub fill: Option<Mesh>,
    /// Stroke triangles, when a stroke style with positive width is present.
    pub stroke: Option<Mesh>,
}

impl ShapeMesh {
    /// True when neither fill nor stroke geometry exists.
    pub fn is_empty(&self) -> bool {
        self.fill.is_none() && self.stroke.is_none()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/mesh.rs"]
mod tests;

//! Geometric primitives and the color type shared across the crate.

pub use kurbo::{Affine, Point, Vec2};

/// Straight (non-premultiplied) RGBA color with components in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rgba {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    /// Build a color from raw components.
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// Map a movie-space point into the centered, y-flipped view space of size
/// `(view_w, view_h)`.
///
/// Movie space has its origin at the top-left with y growing downward; view
/// space is centered on the view box with y growing upward.
pub fn map_to_view(p: Point, view_w: f64, view_h: f64) -> Point {
    Point::new(p.x - view_w * 0.5, view_h * 0.5 - p.y)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

//! Vector geometry pipeline: path flattening, tessellation and the per-frame
//! shape mesh cache.
//!
//! The pipeline is pure and CPU-bound: path strings become polylines
//! ([`path`]), polylines become fill triangles ([`tessellate`]) and stroke
//! quads ([`stroke`]), and [`cache`] resolves shape inheritance and stores
//! the finished meshes per `(sprite, frame)` pair.

pub mod cache;
pub mod mesh;
pub mod path;
pub mod stroke;
pub mod tessellate;

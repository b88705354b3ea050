//! Hand-written mirror of the SVGA 2.0 protobuf movie schema.
//!
//! Field numbers and types match the wire format; no build-time codegen is
//! involved. Messages are kept free of behavior beyond small enum accessors.
#![allow(missing_docs)]

use std::collections::HashMap;

/// Root movie entity: global parameters, binary resources, sprite tracks and
/// audio trigger records.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MovieEntity {
    #[prost(string, tag = "1")]
    pub version: String,
    #[prost(message, optional, tag = "2")]
    pub params: Option<MovieParams>,
    /// Resource blobs keyed by name. Despite the field name, audio binaries
    /// travel in this map too; classification happens after decode.
    #[prost(map = "string, bytes", tag = "3")]
    pub images: HashMap<String, Vec<u8>>,
    #[prost(message, repeated, tag = "4")]
    pub sprites: Vec<SpriteEntity>,
    #[prost(message, repeated, tag = "5")]
    pub audios: Vec<AudioEntity>,
}

/// Global movie parameters.
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct MovieParams {
    #[prost(float, tag = "1")]
    pub view_box_width: f32,
    #[prost(float, tag = "2")]
    pub view_box_height: f32,
    #[prost(int32, tag = "3")]
    pub fps: i32,
    #[prost(int32, tag = "4")]
    pub frames: i32,
}

/// One animated layer with one frame record per movie frame.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SpriteEntity {
    #[prost(string, tag = "1")]
    pub image_key: String,
    #[prost(message, repeated, tag = "2")]
    pub frames: Vec<FrameEntity>,
}

/// An audio trigger tied to a frame range. `start_time` is in milliseconds.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AudioEntity {
    #[prost(string, tag = "1")]
    pub audio_key: String,
    #[prost(int32, tag = "2")]
    pub start_frame: i32,
    #[prost(int32, tag = "3")]
    pub end_frame: i32,
    #[prost(int32, tag = "4")]
    pub start_time: i32,
    #[prost(int32, tag = "5")]
    pub total_frame: i32,
}

/// Per-frame sprite state: opacity, placement, mask and vector shapes.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FrameEntity {
    #[prost(float, tag = "1")]
    pub alpha: f32,
    #[prost(message, optional, tag = "2")]
    pub layout: Option<Layout>,
    #[prost(message, optional, tag = "3")]
    pub transform: Option<Transform>,
    #[prost(string, tag = "4")]
    pub clip_path: String,
    #[prost(message, repeated, tag = "5")]
    pub shapes: Vec<ShapeEntity>,
}

/// Placement rectangle for a frame.
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct Layout {
    #[prost(float, tag = "1")]
    pub x: f32,
    #[prost(float, tag = "2")]
    pub y: f32,
    #[prost(float, tag = "3")]
    pub width: f32,
    #[prost(float, tag = "4")]
    pub height: f32,
}

/// 2x3 affine transform; maps `(x, y)` to `(a*x + c*y + tx, b*x + d*y + ty)`.
/// Identity when absent.
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct Transform {
    #[prost(float, tag = "1")]
    pub a: f32,
    #[prost(float, tag = "2")]
    pub b: f32,
    #[prost(float, tag = "3")]
    pub c: f32,
    #[prost(float, tag = "4")]
    pub d: f32,
    #[prost(float, tag = "5")]
    pub tx: f32,
    #[prost(float, tag = "6")]
    pub ty: f32,
}

/// One vector shape within a frame's shape list.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ShapeEntity {
    #[prost(enumeration = "ShapeType", tag = "1")]
    pub shape_type: i32,
    #[prost(oneof = "ShapeArgs", tags = "2, 3, 4")]
    pub args: Option<ShapeArgs>,
    #[prost(message, optional, tag = "10")]
    pub styles: Option<ShapeStyle>,
    #[prost(message, optional, tag = "11")]
    pub transform: Option<Transform>,
}

impl ShapeEntity {
    /// Shape kind, defaulting to [`ShapeType::Path`] on out-of-range values.
    pub fn kind(&self) -> ShapeType {
        ShapeType::try_from(self.shape_type).unwrap_or(ShapeType::Path)
    }
}

/// Closed set of shape kinds. `Keep` is the inheritance sentinel and carries
/// no payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ShapeType {
    Path = 0,
    Rect = 1,
    Ellipse = 2,
    Keep = 3,
}

/// Type-specific shape payload.
#[derive(Clone, PartialEq, ::prost::Oneof)]
pub enum ShapeArgs {
    #[prost(message, tag = "2")]
    Path(PathArgs),
    #[prost(message, tag = "3")]
    Rect(RectArgs),
    #[prost(message, tag = "4")]
    Ellipse(EllipseArgs),
}

/// Path payload: an SVG-style path command string.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PathArgs {
    #[prost(string, tag = "1")]
    pub d: String,
}

/// Rectangle payload with an optional corner radius.
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct RectArgs {
    #[prost(float, tag = "1")]
    pub x: f32,
    #[prost(float, tag = "2")]
    pub y: f32,
    #[prost(float, tag = "3")]
    pub width: f32,
    #[prost(float, tag = "4")]
    pub height: f32,
    #[prost(float, tag = "5")]
    pub corner_radius: f32,
}

/// Ellipse payload defined by center and radii.
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct EllipseArgs {
    #[prost(float, tag = "1")]
    pub x: f32,
    #[prost(float, tag = "2")]
    pub y: f32,
    #[prost(float, tag = "3")]
    pub radius_x: f32,
    #[prost(float, tag = "4")]
    pub radius_y: f32,
}

/// Fill/stroke styling for a shape. Dash fields are length, gap, offset.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ShapeStyle {
    #[prost(message, optional, tag = "1")]
    pub fill: Option<RgbaColor>,
    #[prost(message, optional, tag = "2")]
    pub stroke: Option<RgbaColor>,
    #[prost(float, tag = "3")]
    pub stroke_width: f32,
    #[prost(enumeration = "LineCap", tag = "4")]
    pub line_cap: i32,
    #[prost(enumeration = "LineJoin", tag = "5")]
    pub line_join: i32,
    #[prost(float, tag = "6")]
    pub miter_limit: f32,
    #[prost(float, tag = "7")]
    pub line_dash_i: f32,
    #[prost(float, tag = "8")]
    pub line_dash_ii: f32,
    #[prost(float, tag = "9")]
    pub line_dash_iii: f32,
}

impl ShapeStyle {
    /// Line cap, defaulting to [`LineCap::Butt`] on out-of-range values.
    pub fn cap(&self) -> LineCap {
        LineCap::try_from(self.line_cap).unwrap_or(LineCap::Butt)
    }

    /// Line join, defaulting to [`LineJoin::Miter`] on out-of-range values.
    pub fn join(&self) -> LineJoin {
        LineJoin::try_from(self.line_join).unwrap_or(LineJoin::Miter)
    }
}

/// Straight RGBA color with float components in `[0, 1]`.
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct RgbaColor {
    #[prost(float, tag = "1")]
    pub r: f32,
    #[prost(float, tag = "2")]
    pub g: f32,
    #[prost(float, tag = "3")]
    pub b: f32,
    #[prost(float, tag = "4")]
    pub a: f32,
}

/// Stroke end-cap style.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum LineCap {
    Butt = 0,
    Round = 1,
    Square = 2,
}

/// Stroke corner-join style.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum LineJoin {
    Miter = 0,
    Round = 1,
    Bevel = 2,
}

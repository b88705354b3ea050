//! SVGA animation engine core.
//!
//! The crate turns an SVGA 2.0 container into renderable frames: the
//! [`document`] layer inflates and decodes the protobuf movie and
//! classifies its binary resources, [`geometry`] flattens and tessellates
//! every vector shape into triangle meshes ahead of time, and [`playback`]
//! drives a frame clock and audio cue table against host-provided sinks.
//!
//! ```no_run
//! use svga::{MovieDocument, PlaybackSession};
//! # struct Silent;
//! # impl svga::AudioSink for Silent {
//! #     fn load(&mut self, _: &str, _: svga::AudioFormat, _: &[u8]) -> svga::LoadOutcome {
//! #         svga::LoadOutcome::Pending
//! #     }
//! # }
//!
//! let bytes = std::fs::read("rocket.svga")?;
//! let doc = MovieDocument::from_bytes(&bytes)?;
//! let mut session = PlaybackSession::new(doc, &mut Silent);
//! session.play();
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod document;
pub mod foundation;
pub mod geometry;
pub mod playback;

pub use document::movie::MovieDocument;
pub use document::proto;
pub use document::resources::AudioFormat;
pub use foundation::core::{Affine, Point, Rgba, Vec2};
pub use foundation::error::{SvgaError, SvgaResult};
pub use geometry::cache::FrameGeometryCache;
pub use geometry::mesh::{Mesh, ShapeMesh};
pub use playback::audio::{CueScheduler, CueState};
pub use playback::session::{PlaybackSession, SpriteKind};
pub use playback::sink::{AudioClip, AudioSink, GraphicsSink, ImageDraw, LoadOutcome};
pub use playback::timeline::{PlayState, Tick, TickEvent, Timeline};

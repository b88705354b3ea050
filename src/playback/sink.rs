//! Host-facing seams: graphics output and the audio backend.

use crate::document::resources::AudioFormat;
use crate::foundation::core::Affine;
use crate::geometry::mesh::ShapeMesh;

/// One bitmap draw instruction.
///
/// The transform places the sprite's layout rectangle in movie space; the
/// host applies its own movie-to-screen mapping on top.
#[derive(Clone, Copy, Debug)]
pub struct ImageDraw<'a> {
    /// Resource key of the bitmap blob.
    pub key: &'a str,
    /// Frame placement transform.
    pub transform: Affine,
    /// Layout rectangle origin in movie space.
    pub x: f64,
    /// Layout rectangle origin in movie space.
    pub y: f64,
    /// Layout rectangle width; zero when the frame declares no layout.
    pub width: f64,
    /// Layout rectangle height; zero when the frame declares no layout.
    pub height: f64,
    /// Resolved opacity in `[0, 1]`.
    pub alpha: f32,
}

/// Receiver for one rendered frame's draw instructions.
///
/// Calls arrive strictly as `begin_frame`, any number of draws in sprite
/// order, `end_frame`. Implementations own all GPU or canvas state; the
/// session never retains frame output.
pub trait GraphicsSink {
    /// A new frame starts.
    fn begin_frame(&mut self, frame: usize);
    /// Install or clear the clip mask for subsequent draws. `d` is a raw
    /// path-language outline in the same movie space as the sprite's
    /// shapes. Hosts without masking support can ignore it.
    fn set_clip_path(&mut self, _d: Option<&str>) {}
    /// Draw a bitmap sprite.
    fn draw_image(&mut self, draw: ImageDraw<'_>);
    /// Draw a sprite's tessellated vector shapes, in shape order.
    fn draw_meshes(&mut self, meshes: &[ShapeMesh]);
    /// The frame is complete.
    fn end_frame(&mut self);
}

/// A decoded, playable audio clip owned by the host's audio backend.
pub trait AudioClip: Send {
    /// Start playback `offset_ms` milliseconds into the clip at the given
    /// pitch multiplier.
    fn play(&mut self, offset_ms: u32, pitch: f64);
    /// Suspend playback, keeping position.
    fn pause(&mut self);
    /// Continue a paused clip.
    fn resume(&mut self);
    /// Halt playback and discard position.
    fn stop(&mut self);
    /// Adjust the pitch multiplier of a clip that is already playing.
    fn set_pitch(&mut self, pitch: f64);
    /// True while the clip is audible.
    fn is_playing(&self) -> bool;
}

/// Result of asking the audio backend to decode a blob.
pub enum LoadOutcome {
    /// The clip decoded synchronously and is ready to play.
    Ready(Box<dyn AudioClip>),
    /// Decoding continues in the background; the host hands the clip over
    /// later via the session's `finish_audio_load`.
    Pending,
}

/// Audio backend seam: turns classified audio blobs into playable clips.
pub trait AudioSink {
    /// Decode `bytes` into a clip. `format` is the sniffed container
    /// signature, [`AudioFormat::Unknown`] when unrecognized.
    fn load(&mut self, key: &str, format: AudioFormat, bytes: &[u8]) -> LoadOutcome;
}

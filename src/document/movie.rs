//! The decoded animation document and wire-transform conversion.

use std::{collections::HashMap, io::Read};

use crate::{
    document::{decode, proto, resources},
    foundation::core::Affine,
    foundation::error::SvgaResult,
};

/// Fully decoded, classified animation document.
///
/// Built once per load, immutable afterwards, owned by exactly one playback
/// session. Derived caches (frame geometry, audio cues) are rebuilt from it
/// at load time and dropped with it.
#[derive(Clone, Debug)]
pub struct MovieDocument {
    movie: proto::MovieEntity,
    image_binaries: HashMap<String, Vec<u8>>,
    audio_binaries: HashMap<String, Vec<u8>>,
}

impl MovieDocument {
    /// Decode and classify a container from any readable byte source.
    pub fn from_reader<R: Read>(src: R) -> SvgaResult<Self> {
        let movie = decode::decode_movie(src)?;
        Ok(Self::from_movie(movie))
    }

    /// Decode and classify a fully buffered container.
    pub fn from_bytes(bytes: &[u8]) -> SvgaResult<Self> {
        let movie = decode::decode_movie_bytes(bytes)?;
        Ok(Self::from_movie(movie))
    }

    pub(crate) fn from_movie(movie: proto::MovieEntity) -> Self {
        let (image_binaries, audio_binaries) = resources::classify(&movie);

        let total = movie.params.map(|p| p.frames.max(0)).unwrap_or(0) as usize;
        for sprite in &movie.sprites {
            if sprite.frames.len() != total {
                tracing::warn!(
                    image_key = %sprite.image_key,
                    frames = sprite.frames.len(),
                    total_frames = total,
                    "sprite frame count differs from movie total"
                );
            }
        }

        Self {
            movie,
            image_binaries,
            audio_binaries,
        }
    }

    /// Container format version string.
    pub fn version(&self) -> &str {
        &self.movie.version
    }

    /// Total frame count declared by the movie parameters.
    pub fn total_frames(&self) -> usize {
        self.movie
            .params
            .map(|p| p.frames.max(0) as usize)
            .unwrap_or(0)
    }

    /// Declared frame rate; may be zero in malformed documents, callers
    /// default to 30 in that case.
    pub fn fps(&self) -> i32 {
        self.movie.params.map(|p| p.fps).unwrap_or(0)
    }

    /// View box size `(width, height)`.
    pub fn view_size(&self) -> (f64, f64) {
        self.movie
            .params
            .map(|p| (f64::from(p.view_box_width), f64::from(p.view_box_height)))
            .unwrap_or((0.0, 0.0))
    }

    /// Sprite records in draw order.
    pub fn sprites(&self) -> &[proto::SpriteEntity] {
        &self.movie.sprites
    }

    /// Audio trigger records.
    pub fn audios(&self) -> &[proto::AudioEntity] {
        &self.movie.audios
    }

    /// Look up a classified image blob by key.
    pub fn image_binary(&self, key: &str) -> Option<&[u8]> {
        self.image_binaries.get(key).map(Vec::as_slice)
    }

    /// Look up a classified audio blob by key.
    pub fn audio_binary(&self, key: &str) -> Option<&[u8]> {
        self.audio_binaries.get(key).map(Vec::as_slice)
    }

    /// Classified image blobs keyed by resource name.
    pub fn image_binaries(&self) -> &HashMap<String, Vec<u8>> {
        &self.image_binaries
    }

    /// Classified audio blobs keyed by resource name.
    pub fn audio_binaries(&self) -> &HashMap<String, Vec<u8>> {
        &self.audio_binaries
    }

    /// Release binary maps early; used during session teardown.
    pub(crate) fn release_binaries(&mut self) {
        self.image_binaries.clear();
        self.audio_binaries.clear();
    }
}

/// Convert an optional wire transform into a [`kurbo::Affine`], identity when
/// absent. The wire coefficient order `[a, b, c, d, tx, ty]` matches kurbo's.
pub fn affine_of(t: Option<&proto::Transform>) -> Affine {
    match t {
        Some(t) => Affine::new([
            f64::from(t.a),
            f64::from(t.b),
            f64::from(t.c),
            f64::from(t.d),
            f64::from(t.tx),
            f64::from(t.ty),
        ]),
        None => Affine::IDENTITY,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/movie.rs"]
mod tests;

//! Container inflation and protobuf decoding.

use std::io::Read;

use prost::Message;

use crate::{
    document::proto::MovieEntity,
    foundation::error::{SvgaError, SvgaResult},
};

/// Decode an SVGA container from any readable byte source.
///
/// The container layout is a fixed 2-byte compression marker (which the raw
/// deflate decoder must not see) followed by a raw deflate stream whose
/// payload is the protobuf-encoded movie. This is a pure transform: on any
/// failure no partial document is produced.
pub fn decode_movie<R: Read>(mut src: R) -> SvgaResult<MovieEntity> {
    let mut marker = [0u8; 2];
    src.read_exact(&mut marker).map_err(|_| SvgaError::BadHeader)?;

    let mut inflated = Vec::new();
    flate2::read::DeflateDecoder::new(src)
        .read_to_end(&mut inflated)
        .map_err(SvgaError::Inflate)?;

    let movie = MovieEntity::decode(inflated.as_slice())
        .map_err(|e| SvgaError::schema(e.to_string()))?;

    if movie.params.is_none() {
        return Err(SvgaError::schema("movie params are absent"));
    }

    tracing::info!(
        version = %movie.version,
        sprites = movie.sprites.len(),
        audios = movie.audios.len(),
        inflated_len = inflated.len(),
        "decoded movie container"
    );
    Ok(movie)
}

/// Decode an SVGA container from a fully buffered byte slice.
pub fn decode_movie_bytes(bytes: &[u8]) -> SvgaResult<MovieEntity> {
    decode_movie(bytes)
}

#[cfg(test)]
#[path = "../../tests/unit/document/decode.rs"]
mod tests;

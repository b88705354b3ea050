use std::io::Write as _;

use prost::Message;

use crate::document::decode::{decode_movie, decode_movie_bytes};
use crate::document::proto::{MovieEntity, MovieParams};
use crate::foundation::error::SvgaError;

fn sample_movie() -> MovieEntity {
    MovieEntity {
        version: "2.0.0".into(),
        params: Some(MovieParams {
            view_box_width: 100.0,
            view_box_height: 80.0,
            fps: 20,
            frames: 12,
        }),
        ..Default::default()
    }
}

/// Wrap a protobuf payload the way the file format does: 2-byte compression
/// marker, then a raw deflate stream.
fn pack(payload: &[u8]) -> Vec<u8> {
    let mut out = vec![0x78, 0x9c];
    let mut enc = flate2::write::DeflateEncoder::new(&mut out, flate2::Compression::default());
    enc.write_all(payload).unwrap();
    enc.finish().unwrap();
    out
}

#[test]
fn packed_movie_round_trips() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let movie = sample_movie();
    let decoded = decode_movie_bytes(&pack(&movie.encode_to_vec())).unwrap();
    assert_eq!(decoded.version, "2.0.0");
    let params = decoded.params.unwrap();
    assert_eq!(params.fps, 20);
    assert_eq!(params.frames, 12);
    assert_eq!(params.view_box_width, 100.0);
}

#[test]
fn reader_source_decodes_like_a_slice() {
    let bytes = pack(&sample_movie().encode_to_vec());
    let decoded = decode_movie(std::io::Cursor::new(bytes)).unwrap();
    assert_eq!(decoded.version, "2.0.0");
}

#[test]
fn truncated_marker_is_a_header_error() {
    assert!(matches!(
        decode_movie_bytes(&[0x78]),
        Err(SvgaError::BadHeader)
    ));
    assert!(matches!(decode_movie_bytes(&[]), Err(SvgaError::BadHeader)));
}

#[test]
fn garbage_after_the_marker_is_an_inflate_error() {
    let bytes = [0x78, 0x9c, 0xde, 0xad, 0xbe, 0xef, 0x00, 0x01];
    assert!(matches!(
        decode_movie_bytes(&bytes),
        Err(SvgaError::Inflate(_))
    ));
}

#[test]
fn valid_deflate_of_non_protobuf_is_a_schema_error() {
    let bytes = pack(b"not a protobuf payload");
    assert!(matches!(
        decode_movie_bytes(&bytes),
        Err(SvgaError::Schema(_))
    ));
}

#[test]
fn movie_without_params_is_rejected() {
    let movie = MovieEntity {
        version: "2.0.0".into(),
        ..Default::default()
    };
    assert!(matches!(
        decode_movie_bytes(&pack(&movie.encode_to_vec())),
        Err(SvgaError::Schema(_))
    ));
}

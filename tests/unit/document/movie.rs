use std::collections::HashMap;

use crate::document::movie::{MovieDocument, affine_of};
use crate::document::proto::{AudioEntity, MovieEntity, MovieParams, Transform};
use crate::foundation::core::Point;

fn sample_movie() -> MovieEntity {
    let mut images = HashMap::new();
    images.insert("hero".to_string(), b"\x89PNG\r\n".to_vec());
    images.insert("boom".to_string(), b"RIFFxxxxWAVEdata".to_vec());
    MovieEntity {
        version: "2.0.0".into(),
        params: Some(MovieParams {
            view_box_width: 320.0,
            view_box_height: 240.0,
            fps: 24,
            frames: 48,
        }),
        images,
        audios: vec![AudioEntity {
            audio_key: "boom".into(),
            start_frame: 3,
            end_frame: 10,
            start_time: 0,
            total_frame: 48,
        }],
        ..Default::default()
    }
}

#[test]
fn document_exposes_movie_parameters() {
    let doc = MovieDocument::from_movie(sample_movie());
    assert_eq!(doc.version(), "2.0.0");
    assert_eq!(doc.total_frames(), 48);
    assert_eq!(doc.fps(), 24);
    assert_eq!(doc.view_size(), (320.0, 240.0));
    assert_eq!(doc.audios().len(), 1);
}

#[test]
fn binaries_are_split_by_audio_key_membership() {
    let doc = MovieDocument::from_movie(sample_movie());
    assert!(doc.image_binary("hero").is_some());
    assert!(doc.image_binary("boom").is_none());
    assert!(doc.audio_binary("boom").is_some());
    assert_eq!(doc.image_binaries().len(), 1);
    assert_eq!(doc.audio_binaries().len(), 1);
}

#[test]
fn negative_frame_count_reads_as_zero() {
    let mut movie = sample_movie();
    movie.params = Some(MovieParams {
        frames: -5,
        ..movie.params.unwrap()
    });
    let doc = MovieDocument::from_movie(movie);
    assert_eq!(doc.total_frames(), 0);
}

#[test]
fn absent_transform_is_identity() {
    let affine = affine_of(None);
    assert_eq!(affine * Point::new(7.0, -3.0), Point::new(7.0, -3.0));
}

#[test]
fn wire_coefficients_map_in_column_order() {
    let t = Transform {
        a: 2.0,
        b: 0.5,
        c: -1.0,
        d: 3.0,
        tx: 10.0,
        ty: 20.0,
    };
    let affine = affine_of(Some(&t));
    // (x, y) -> (a*x + c*y + tx, b*x + d*y + ty)
    assert_eq!(affine * Point::new(1.0, 0.0), Point::new(12.0, 20.5));
    assert_eq!(affine * Point::new(0.0, 1.0), Point::new(9.0, 23.0));
}

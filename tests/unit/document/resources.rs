use std::collections::HashMap;

use crate::document::proto::{AudioEntity, MovieEntity};
use crate::document::resources::{AudioFormat, classify, sniff_audio_format};

fn movie_with(blobs: &[(&str, &[u8])], audio_keys: &[&str]) -> MovieEntity {
    let mut images = HashMap::new();
    for (key, bytes) in blobs {
        images.insert((*key).to_string(), bytes.to_vec());
    }
    MovieEntity {
        images,
        audios: audio_keys
            .iter()
            .map(|key| AudioEntity {
                audio_key: (*key).to_string(),
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    }
}

#[test]
fn audio_key_membership_wins_over_signature() {
    // A blob that sniffs as PNG-ish still classifies as audio when an audio
    // record names its key.
    let movie = movie_with(
        &[("a", b"\x89PNG\r\n\x1a\n"), ("b", b"RIFFxxxxWAVEdata")],
        &["a"],
    );
    let (images, audios) = classify(&movie);
    assert!(audios.contains_key("a"));
    assert!(images.contains_key("b"));
    assert_eq!(images.len(), 1);
    assert_eq!(audios.len(), 1);
}

#[test]
fn tiny_blobs_are_dropped() {
    let movie = movie_with(&[("stub", b"abc"), ("ok", b"abcd")], &[]);
    let (images, audios) = classify(&movie);
    assert!(!images.contains_key("stub"));
    assert!(images.contains_key("ok"));
    assert!(audios.is_empty());
}

#[test]
fn signature_table_recognizes_common_containers() {
    assert_eq!(sniff_audio_format(b"RIFFxxxxWAVEdata"), AudioFormat::Wav);
    assert_eq!(sniff_audio_format(b"OggS\x00\x02"), AudioFormat::Ogg);
    assert_eq!(sniff_audio_format(b"ID3\x04\x00"), AudioFormat::Mpeg);
    assert_eq!(sniff_audio_format(&[0xFF, 0xFB, 0x90, 0x00]), AudioFormat::Mpeg);
    assert_eq!(sniff_audio_format(&[0xFF, 0xF3, 0x90, 0x00]), AudioFormat::Mpeg);
    assert_eq!(sniff_audio_format(&[0xFF, 0xF1, 0x50, 0x80]), AudioFormat::Aac);
    assert_eq!(sniff_audio_format(b"????"), AudioFormat::Unknown);
    assert_eq!(sniff_audio_format(b"Og"), AudioFormat::Unknown);
}

#[test]
fn riff_without_wave_is_not_wav() {
    assert_eq!(sniff_audio_format(b"RIFFxxxxAVI LIST"), AudioFormat::Unknown);
}

#[test]
fn extensions_follow_the_format() {
    assert_eq!(AudioFormat::Wav.extension(), "wav");
    assert_eq!(AudioFormat::Ogg.extension(), "ogg");
    assert_eq!(AudioFormat::Mpeg.extension(), "mpeg");
    assert_eq!(AudioFormat::Aac.extension(), "aac");
    assert_eq!(AudioFormat::Unknown.extension(), "bin");
}

//! Binary resource classification and audio signature sniffing.

use std::collections::HashMap;

use crate::document::proto::MovieEntity;

/// Resource format recognized by the byte-signature sniffer.
///
/// Classification into image vs. audio is driven by audio-key membership, not
/// by sniffing; the format tag exists for hosts that hand blobs to an
/// external decoder or materialize them to disk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum AudioFormat {
    /// RIFF/WAVE container.
    Wav,
    /// Ogg (Vorbis) container.
    Ogg,
    /// MPEG audio (ID3 tag or MPEG frame sync).
    Mpeg,
    /// ADTS AAC frame sync.
    Aac,
    /// No recognized signature.
    Unknown,
}

impl AudioFormat {
    /// File extension hosts use when materializing a blob to disk.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Wav => "wav",
            Self::Ogg => "ogg",
            Self::Mpeg => "mpeg",
            Self::Aac => "aac",
            Self::Unknown => "bin",
        }
    }
}

/// Partition the movie's binary blobs into disjoint image and audio maps.
///
/// A blob whose key appears in `audios[].audio_key` is audio regardless of
/// its byte signature; everything else is an image. Blobs shorter than 4
/// bytes cannot be a resource of either kind and are dropped silently. Never
/// fails.
pub fn classify(
    movie: &MovieEntity,
) -> (HashMap<String, Vec<u8>>, HashMap<String, Vec<u8>>) {
    let mut images = HashMap::new();
    let mut audios = HashMap::new();

    for (key, blob) in &movie.images {
        if blob.len() < 4 {
            continue;
        }
        if movie.audios.iter().any(|a| a.audio_key == *key) {
            audios.insert(key.clone(), blob.clone());
        } else {
            images.insert(key.clone(), blob.clone());
        }
    }

    (images, audios)
}

/// Sniff an audio blob's container format from its leading bytes.
pub fn sniff_audio_format(bytes: &[u8]) -> AudioFormat {
    if bytes.len() < 4 {
        return AudioFormat::Unknown;
    }
    if bytes.len() >= 12 && bytes.starts_with(b"RIFF") && &bytes[8..12] == b"WAVE" {
        return AudioFormat::Wav;
    }
    if bytes.starts_with(b"OggS") {
        return AudioFormat::Ogg;
    }
    if bytes.starts_with(b"ID3") {
        return AudioFormat::Mpeg;
    }
    if bytes[0] == 0xFF && matches!(bytes[1], 0xFB | 0xF3 | 0xF2) {
        return AudioFormat::Mpeg;
    }
    if bytes[0] == 0xFF && bytes[1] & 0xF0 == 0xF0 {
        return AudioFormat::Aac;
    }
    AudioFormat::Unknown
}

#[cfg(test)]
#[path = "../../tests/unit/document/resources.rs"]
mod tests;

//! Container decoding and the decoded animation document.
//!
//! The SVGA container is a 2-byte compression marker followed by a raw
//! deflate stream whose payload is a protobuf-encoded [`proto::MovieEntity`].
//! [`decode`] turns raw bytes into that entity, [`resources`] partitions the
//! embedded binaries into images and audio, and [`movie::MovieDocument`] is
//! the immutable root value the rest of the crate works from.

pub mod decode;
pub mod movie;
pub mod proto;
pub mod resources;

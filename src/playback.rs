//! Playback runtime: the frame timeline, audio cue scheduling and the
//! host-facing session that ties a document, its geometry cache and the
//! host sinks together.

pub mod audio;
pub mod session;
pub mod sink;
pub mod timeline;

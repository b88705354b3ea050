//! Error taxonomy for container decoding and playback.

/// Convenience result type used across the crate.
pub type SvgaResult<T> = Result<T, SvgaError>;

/// Top-level error taxonomy for SVGA loading and playback.
///
/// Only decode-time structural failures surface as errors; geometry and audio
/// problems found after a successful decode are logged and recovered locally
/// (empty mesh, skipped cue).
#[derive(thiserror::Error, Debug)]
pub enum SvgaError {
    /// The container is shorter than the 2-byte compression marker.
    #[error("container too short: missing 2-byte compression header")]
    BadHeader,

    /// The deflate stream after the marker could not be decompressed.
    #[error("inflate failed: {0}")]
    Inflate(#[source] std::io::Error),

    /// The inflated payload does not deserialize against the movie schema.
    #[error("movie schema mismatch: {0}")]
    Schema(String),

    /// Invalid caller-provided data or document state.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SvgaError {
    /// Build a [`SvgaError::Schema`] value.
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }

    /// Build a [`SvgaError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

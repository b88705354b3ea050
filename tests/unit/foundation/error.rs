use crate::foundation::error::{SvgaError, SvgaResult};

#[test]
fn display_messages_name_the_failure() {
    assert_eq!(
        SvgaError::BadHeader.to_string(),
        "container too short: missing 2-byte compression header"
    );
    assert_eq!(
        SvgaError::schema("unexpected field").to_string(),
        "movie schema mismatch: unexpected field"
    );
    assert_eq!(
        SvgaError::validation("frame out of range").to_string(),
        "validation error: frame out of range"
    );
}

#[test]
fn anyhow_errors_pass_through_transparently() {
    fn backend() -> SvgaResult<()> {
        Err(anyhow::anyhow!("backend unavailable").into())
    }
    let err = backend().unwrap_err();
    assert!(matches!(err, SvgaError::Other(_)));
    assert_eq!(err.to_string(), "backend unavailable");
}

#[test]
fn inflate_errors_keep_their_source() {
    let io = std::io::Error::new(std::io::ErrorKind::InvalidData, "corrupt deflate block");
    let err = SvgaError::Inflate(io);
    assert_eq!(err.to_string(), "inflate failed: corrupt deflate block");
    assert!(std::error::Error::source(&err).is_some());
}

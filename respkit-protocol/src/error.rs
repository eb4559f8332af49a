//! Decoder error types.

use thiserror::Error;

/// Errors produced while decoding a RESP2 stream.
///
/// End of input at a frame boundary is not an error; the decoder reports
/// it as a `None` value instead.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The stream ended inside a frame. The payload names what was being
    /// read when input ran out.
    #[error("incomplete frame while reading {0}")]
    Incomplete(&'static str),

    /// The input violates the wire grammar. Framing past this point cannot
    /// be trusted, so the stream should be discarded.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// The underlying byte source failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DecodeError {
    /// Returns whether this error means the stream ended mid-frame.
    pub fn is_incomplete(&self) -> bool {
        matches!(self, DecodeError::Incomplete(_))
    }

    /// Returns whether this error is a wire grammar violation.
    pub fn is_protocol(&self) -> bool {
        matches!(self, DecodeError::Protocol(_))
    }
}

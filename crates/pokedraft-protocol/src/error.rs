//! Error types for the protocol layer.

/// Errors raised while turning frames into messages and back.
///
/// Anything that reaches the session layer has already decoded cleanly;
/// a `ProtocolError` always means the bytes themselves were the problem.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// A message could not be serialized.
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// A frame was not valid JSON or did not match any request shape.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),
}

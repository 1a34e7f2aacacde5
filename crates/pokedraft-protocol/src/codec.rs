//! Codec trait and the JSON implementation used on the wire.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// Converts messages to bytes and back.
///
/// The server holds one codec for its whole lifetime and shares it
/// between connection tasks, hence `Send + Sync + 'static`.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Encode`] if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Decode`] if the bytes are malformed or
    /// don't match the expected type.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

/// A [`Codec`] backed by `serde_json`. Frames are sent as WebSocket text.
///
/// ```rust
/// use pokedraft_protocol::{ClientEnvelope, Codec, JsonCodec, Request};
///
/// let codec = JsonCodec;
/// let env = ClientEnvelope { request_id: 1, request: Request::ListDraftSets };
///
/// let bytes = codec.encode(&env).unwrap();
/// let decoded: ClientEnvelope = codec.decode(&bytes).unwrap();
/// assert_eq!(env, decoded);
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}

#[cfg(all(test, feature = "json"))]
mod tests {
    use super::*;
    use crate::{ClientEnvelope, Request, SessionId};

    #[test]
    fn test_decode_garbage_returns_decode_error() {
        let result: Result<ClientEnvelope, _> = JsonCodec.decode(b"not json at all");
        assert!(matches!(result, Err(ProtocolError::Decode(_))));
    }

    #[test]
    fn test_decode_missing_field_returns_decode_error() {
        let result: Result<ClientEnvelope, _> =
            JsonCodec.decode(br#"{"request": {"type": "ListDraftSets"}}"#);
        assert!(matches!(result, Err(ProtocolError::Decode(_))));
    }

    #[test]
    fn test_encode_produces_tagged_json() {
        let env = ClientEnvelope {
            request_id: 5,
            request: Request::GetUpdate {
                session_id: SessionId(9),
            },
        };
        let bytes = JsonCodec.encode(&env).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.contains(r#""type":"GetUpdate""#));
        assert!(text.contains(r#""session_id":9"#));
    }
}

//! Decoding of raw response bodies.

use serde_json::Value;

use super::RawPayload;
use crate::error::LoadError;

/// Decode a body into a JSON array of candidates.
///
/// Anything other than a top-level array is a total failure.
pub fn decode_payload(bytes: &[u8]) -> Result<RawPayload, LoadError> {
    match serde_json::from_slice::<Value>(bytes)? {
        Value::Array(items) => Ok(items),
        _ => Err(LoadError::NotAnArray),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_array() {
        let payload = decode_payload(br#"[{"id": "a"}, 3, null]"#).unwrap();
        assert_eq!(payload.len(), 3);
    }

    #[test]
    fn test_decode_not_array() {
        assert!(matches!(
            decode_payload(br#"{"id": "a"}"#),
            Err(LoadError::NotAnArray)
        ));
    }

    #[test]
    fn test_decode_invalid_json() {
        let err = decode_payload(b"not json").unwrap_err();
        assert!(matches!(err, LoadError::Decode(_)));
        assert!(err.to_string().starts_with("Failed to decode response"));
    }
}
